//! Seed a service bundle with a known fixture set.
//!
//! The fixtures mirror the demo data the desktop client ships with: one
//! admin, one test client with two addresses, and three deliverers spread
//! over the city grid.

use tracing::info;

use sameday_core::{AddressId, Email, GridPoint, UserId, UserRole};
use sameday_domain::Services;
use sameday_domain::model::{NewAddress, NewDeliverer, NewUser};

/// Identities of the seeded fixtures, for follow-up commands.
pub struct Seeded {
    pub client: UserId,
    pub casa: AddressId,
    pub oficina: AddressId,
}

/// Populate `services` with the demo fixture set.
///
/// # Errors
///
/// Returns an error if any fixture violates a domain rule, which would mean
/// the fixture data itself is broken.
pub fn run(services: &Services) -> Result<Seeded, Box<dyn std::error::Error>> {
    services.users.register(NewUser {
        name: "Administrador".to_owned(),
        email: Email::parse("admin@sameday.example")?,
        password: "admin123".to_owned(),
        phone: "3100000000".to_owned(),
        role: UserRole::Admin,
    })?;

    let client = services.users.register(NewUser {
        name: "Cliente Prueba".to_owned(),
        email: Email::parse("cliente@sameday.example")?,
        password: "cliente123".to_owned(),
        phone: "3101234567".to_owned(),
        role: UserRole::Client,
    })?;

    let casa = services.users.add_address(
        client.id(),
        NewAddress {
            alias: "Casa".to_owned(),
            street: "Calle 14 #3-21".to_owned(),
            city: "Armenia".to_owned(),
            zone: "CENTRO".to_owned(),
            zip_code: "630004".to_owned(),
            position: GridPoint::new(10.0, 10.0),
            is_default: true,
        },
    )?;
    let oficina = services.users.add_address(
        client.id(),
        NewAddress {
            alias: "Oficina".to_owned(),
            street: "Carrera 19 #22-10".to_owned(),
            city: "Armenia".to_owned(),
            zone: "NORTE".to_owned(),
            zip_code: "630001".to_owned(),
            position: GridPoint::new(40.0, 50.0),
            is_default: false,
        },
    )?;

    for (name, document, phone, zone, x, y) in [
        ("Carlos Gomez", "1094900001", "3100000001", "CENTRO", 12.0, 9.0),
        ("Marta Rios", "1094900002", "3100000002", "NORTE", 42.0, 55.0),
        ("Julian Pardo", "1094900003", "3100000003", "SUR", 70.0, 20.0),
    ] {
        services.deliverers.register(NewDeliverer {
            name: name.to_owned(),
            document: document.to_owned(),
            phone: phone.to_owned(),
            zone: zone.to_owned(),
            position: GridPoint::new(x, y),
        })?;
    }

    info!(
        users = services.users.all().len(),
        deliverers = services.deliverers.all().len(),
        "fixtures seeded"
    );

    Ok(Seeded {
        client: client.id(),
        casa: casa.id(),
        oficina: oficina.id(),
    })
}
