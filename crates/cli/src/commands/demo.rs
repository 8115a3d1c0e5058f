//! Walk a seeded shipment through the full lifecycle, logging each hop.

use tracing::info;

use sameday_core::{IncidentKind, IncidentSeverity, ShipmentPriority, ShipmentStatus};
use sameday_domain::Services;
use sameday_domain::model::{Actor, NewIncident, NewShipment};
use sameday_domain::service::IncidentResolution;

use super::seed;

/// Seed the fixtures and run one shipment end to end, including an incident
/// report and its resolution.
///
/// # Errors
///
/// Returns an error if any lifecycle step is rejected, which indicates a bug
/// in the state machine rather than bad input.
pub fn run(priority: ShipmentPriority) -> Result<(), Box<dyn std::error::Error>> {
    let services = Services::new();
    let seeded = seed::run(&services)?;

    let quote = services
        .shipments
        .quote(seeded.casa, seeded.oficina, 2.5, priority)?;
    info!(cost = quote, ?priority, "route quoted");

    let shipment = services.shipments.create(NewShipment {
        client: seeded.client,
        origin: seeded.casa,
        destination: seeded.oficina,
        weight: 2.5,
        priority,
    })?;
    info!(shipment = %shipment.id(), status = %shipment.status(), "created");

    let shipment = services
        .shipments
        .assign_nearest(shipment.id(), Actor::System)?;
    let deliverer = shipment.deliverer.map(|d| d.to_string()).unwrap_or_default();
    info!(shipment = %shipment.id(), %deliverer, "assigned to nearest deliverer");

    let shipment =
        services
            .shipments
            .advance(shipment.id(), ShipmentStatus::InTransit, Actor::System)?;
    info!(shipment = %shipment.id(), status = %shipment.status(), "picked up");

    let incident = services.shipments.report_incident(
        shipment.id(),
        NewIncident {
            kind: IncidentKind::RecipientAbsent,
            severity: IncidentSeverity::Minor,
            description: "Nobody answered the door".to_owned(),
        },
        Actor::System,
    )?;
    info!(incident = %incident.id(), "incident reported");

    let shipment = services.shipments.resolve_incident(
        incident.id(),
        IncidentResolution::Resolved {
            note: "Recipient called back, retrying".to_owned(),
        },
        Actor::System,
    )?;
    info!(shipment = %shipment.id(), status = %shipment.status(), "incident resolved");

    let shipment = services
        .shipments
        .complete(shipment.id(), Some(5), Actor::User(seeded.client))?;
    info!(
        shipment = %shipment.id(),
        status = %shipment.status(),
        cost = shipment.cost,
        hops = shipment.history().len(),
        "delivered"
    );

    Ok(())
}
