//! Incident aggregate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use sameday_core::{IncidentId, IncidentKind, IncidentSeverity, ShipmentId};

/// Parameters for reporting a new incident.
#[derive(Debug, Clone)]
pub struct NewIncident {
    pub kind: IncidentKind,
    pub severity: IncidentSeverity,
    pub description: String,
}

/// A problem reported during a delivery.
///
/// Owned by its shipment and cascade-deleted with it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Incident {
    id: IncidentId,
    pub shipment: ShipmentId,
    pub kind: IncidentKind,
    pub severity: IncidentSeverity,
    pub description: String,
    pub reported_at: DateTime<Utc>,
    resolved: bool,
    pub resolved_at: Option<DateTime<Utc>>,
    pub resolution: Option<String>,
}

impl Incident {
    /// Construct an open incident against `shipment` with a fresh identity.
    #[must_use]
    pub fn new(shipment: ShipmentId, new: NewIncident) -> Self {
        Self {
            id: IncidentId::generate(),
            shipment,
            kind: new.kind,
            severity: new.severity,
            description: new.description,
            reported_at: Utc::now(),
            resolved: false,
            resolved_at: None,
            resolution: None,
        }
    }

    /// The immutable identity of this incident.
    #[must_use]
    pub const fn id(&self) -> IncidentId {
        self.id
    }

    /// Whether this incident has been closed.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// Close the incident with a resolution note.
    pub fn close(&mut self, note: String) {
        self.resolved = true;
        self.resolved_at = Some(Utc::now());
        self.resolution = Some(note);
    }
}
