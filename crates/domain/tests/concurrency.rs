//! The service bundle shared across threads: races must serialize cleanly.

#![allow(clippy::unwrap_used)]

use std::sync::{Arc, Barrier};
use std::thread;

use sameday_core::{Email, GridPoint, ShipmentPriority, ShipmentStatus, UserRole};
use sameday_domain::model::{Actor, NewAddress, NewDeliverer, NewShipment, NewUser};
use sameday_domain::{DomainError, Services};

fn seeded() -> (Arc<Services>, NewShipment) {
    let services = Services::new();
    let client = services
        .users
        .register(NewUser {
            name: "Cliente Prueba".to_owned(),
            email: Email::parse("cliente@uq.example").unwrap(),
            password: "secret123".to_owned(),
            phone: "3101234567".to_owned(),
            role: UserRole::Client,
        })
        .unwrap();
    let origin = services
        .users
        .add_address(
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
        )
        .unwrap();
    let destination = services
        .users
        .add_address(
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
        )
        .unwrap();
    let new = NewShipment {
        client: client.id(),
        origin: origin.id(),
        destination: destination.id(),
        weight: 2.0,
        priority: ShipmentPriority::Standard,
    };
    (Arc::new(services), new)
}

#[test]
fn racing_assignments_on_one_shipment_admit_exactly_one_winner() {
    let (services, new) = seeded();
    let deliverer = services
        .deliverers
        .register(NewDeliverer {
            name: "Carlos Gomez".to_owned(),
            document: "1094900001".to_owned(),
            phone: "3100000001".to_owned(),
            zone: "CENTRO".to_owned(),
            position: GridPoint::new(12.0, 9.0),
        })
        .unwrap();
    let shipment = services.shipments.create(new).unwrap();

    let barrier = Arc::new(Barrier::new(2));
    let handles: Vec<_> = (0..2)
        .map(|_| {
            let services = Arc::clone(&services);
            let barrier = Arc::clone(&barrier);
            let id = shipment.id();
            let courier = deliverer.id();
            thread::spawn(move || {
                barrier.wait();
                services.shipments.assign_deliverer(id, courier, Actor::System)
            })
        })
        .collect();

    let results: Vec<_> = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .collect();

    let wins = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(wins, 1);
    for result in results {
        if let Err(err) = result {
            assert!(matches!(
                err,
                DomainError::IllegalTransition {
                    from: ShipmentStatus::Assigned,
                    to: ShipmentStatus::Assigned,
                }
            ));
        }
    }

    // The loser must not have charged the deliverer a second slot
    assert_eq!(services.deliverers.find(deliverer.id()).unwrap().load(), 1);
    assert_eq!(
        services.shipments.find(shipment.id()).unwrap().deliverer,
        Some(deliverer.id())
    );
}

#[test]
fn capacity_holds_under_concurrent_assignments_to_one_deliverer() {
    let (services, new) = seeded();
    let deliverer = services
        .deliverers
        .register(NewDeliverer {
            name: "Carlos Gomez".to_owned(),
            document: "1094900001".to_owned(),
            phone: "3100000001".to_owned(),
            zone: "CENTRO".to_owned(),
            position: GridPoint::new(12.0, 9.0),
        })
        .unwrap();

    let shipments: Vec<_> = (0..6)
        .map(|_| services.shipments.create(new.clone()).unwrap())
        .collect();

    let barrier = Arc::new(Barrier::new(shipments.len()));
    let handles: Vec<_> = shipments
        .iter()
        .map(|s| {
            let services = Arc::clone(&services);
            let barrier = Arc::clone(&barrier);
            let id = s.id();
            let courier = deliverer.id();
            thread::spawn(move || {
                barrier.wait();
                services.shipments.assign_deliverer(id, courier, Actor::System)
            })
        })
        .collect();

    let results: Vec<_> = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .collect();

    let wins = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(wins, 3);
    assert_eq!(services.deliverers.find(deliverer.id()).unwrap().load(), 3);

    // Losers are untouched and still assignable elsewhere
    let created = services
        .shipments
        .with_status(ShipmentStatus::Created)
        .len();
    assert_eq!(created, 3);
}

#[test]
fn concurrent_registrations_keep_email_unique() {
    let (services, _) = seeded();

    let barrier = Arc::new(Barrier::new(4));
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let services = Arc::clone(&services);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                services.users.register(NewUser {
                    name: format!("Ana {i}"),
                    email: Email::parse("ana@uq.example").unwrap(),
                    password: "secret123".to_owned(),
                    phone: "3109999999".to_owned(),
                    role: UserRole::Client,
                })
            })
        })
        .collect();

    let wins = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(Result::is_ok)
        .count();

    assert_eq!(wins, 1);
    let anas = services
        .users
        .all()
        .into_iter()
        .filter(|u| u.email.as_str() == "ana@uq.example")
        .count();
    assert_eq!(anas, 1);
}
