//! Role, status, priority and severity enums for the shipment domain.

use serde::{Deserialize, Serialize};

/// Role a user plays in the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    /// System administrator.
    Admin,
    /// Regular user who creates shipments.
    Client,
    /// Courier who carries out deliveries.
    Deliverer,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "ADMIN"),
            Self::Client => write!(f, "CLIENT"),
            Self::Deliverer => write!(f, "DELIVERER"),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(Self::Admin),
            "CLIENT" => Ok(Self::Client),
            "DELIVERER" => Ok(Self::Deliverer),
            _ => Err(format!("invalid user role: {s}")),
        }
    }
}

/// Lifecycle state of a shipment.
///
/// The legal transitions form a small state machine:
///
/// ```text
/// Created -> Assigned -> InTransit -> Delivered
///    |           |           |
///    +-> Cancelled <---------|--- (unresolvable incident)
///                            v
///                    IncidentReported -> InTransit (resolved)
/// ```
///
/// `Delivered` and `Cancelled` are terminal. [`Self::can_transition_to`] is
/// the single source of truth for the table; services reject everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShipmentStatus {
    /// Created but not yet assigned to a deliverer.
    #[default]
    Created,
    /// Assigned to a deliverer, not yet picked up.
    Assigned,
    /// The deliverer is on the way.
    InTransit,
    /// A problem was reported mid-delivery; awaiting resolution.
    IncidentReported,
    /// Delivery completed. Terminal.
    Delivered,
    /// Cancelled by the client or after an unresolvable incident. Terminal.
    Cancelled,
}

impl ShipmentStatus {
    /// Whether this state admits no further transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// Whether moving from `self` to `target` is a legal transition.
    ///
    /// This is the full table, including edges that require a dedicated
    /// service operation (assignment, incident report, incident resolution).
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Created, Self::Assigned | Self::Cancelled)
                | (Self::Assigned, Self::InTransit | Self::Cancelled)
                | (Self::InTransit, Self::Delivered | Self::IncidentReported)
                | (Self::IncidentReported, Self::InTransit | Self::Cancelled)
        )
    }
}

impl std::fmt::Display for ShipmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Created => write!(f, "CREATED"),
            Self::Assigned => write!(f, "ASSIGNED"),
            Self::InTransit => write!(f, "IN_TRANSIT"),
            Self::IncidentReported => write!(f, "INCIDENT_REPORTED"),
            Self::Delivered => write!(f, "DELIVERED"),
            Self::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

impl std::str::FromStr for ShipmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "CREATED" => Ok(Self::Created),
            "ASSIGNED" => Ok(Self::Assigned),
            "IN_TRANSIT" => Ok(Self::InTransit),
            "INCIDENT_REPORTED" => Ok(Self::IncidentReported),
            "DELIVERED" => Ok(Self::Delivered),
            "CANCELLED" => Ok(Self::Cancelled),
            _ => Err(format!("invalid shipment status: {s}")),
        }
    }
}

/// Availability of a deliverer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DelivererStatus {
    /// Ready to receive assignments.
    #[default]
    Available,
    /// Carrying shipments but still under capacity.
    Active,
    /// At the maximum permitted shipment load.
    Busy,
    /// On a break; not accepting assignments.
    OnBreak,
    /// Off shift; not accepting assignments.
    OffDuty,
}

impl DelivererStatus {
    /// Whether a deliverer in this state may receive new assignments.
    ///
    /// `Busy` deliverers are excluded here; the capacity counter is the
    /// authoritative check and keeps the two in sync.
    #[must_use]
    pub const fn accepts_assignments(self) -> bool {
        matches!(self, Self::Available | Self::Active)
    }
}

impl std::fmt::Display for DelivererStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Available => write!(f, "AVAILABLE"),
            Self::Active => write!(f, "ACTIVE"),
            Self::Busy => write!(f, "BUSY"),
            Self::OnBreak => write!(f, "ON_BREAK"),
            Self::OffDuty => write!(f, "OFF_DUTY"),
        }
    }
}

/// Delivery priority, with its rate surcharge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShipmentPriority {
    /// Normal delivery, no surcharge.
    #[default]
    Standard,
    /// Priority delivery, 50% surcharge.
    Priority,
    /// Urgent delivery, 100% surcharge.
    Urgent,
}

impl ShipmentPriority {
    /// Multiplier applied to the base shipping rate.
    #[must_use]
    pub const fn rate_multiplier(self) -> f64 {
        match self {
            Self::Standard => 1.0,
            Self::Priority => 1.5,
            Self::Urgent => 2.0,
        }
    }
}

/// Category of problem reported during a delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IncidentKind {
    /// The provided address is wrong or does not exist.
    WrongAddress,
    /// Nobody present to receive the package.
    RecipientAbsent,
    /// The package was damaged in transport.
    PackageDamaged,
    /// The delivery zone cannot be reached.
    InaccessibleZone,
    /// External events (weather, road closures, protests).
    ForceMajeure,
    /// The package was stolen or lost.
    Theft,
    /// The assigned deliverer became unavailable.
    DelivererUnavailable,
    /// Anything not covered by the categories above.
    Other,
}

impl IncidentKind {
    /// Whether this kind of incident calls for handing the shipment to a
    /// different deliverer once resolved.
    #[must_use]
    pub const fn requires_reassignment(self) -> bool {
        matches!(self, Self::InaccessibleZone | Self::DelivererUnavailable)
    }
}

/// How serious a reported incident is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IncidentSeverity {
    Minor,
    Major,
    Critical,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_legal_transitions() {
        use ShipmentStatus::{
            Assigned, Cancelled, Created, Delivered, InTransit, IncidentReported,
        };

        assert!(Created.can_transition_to(Assigned));
        assert!(Created.can_transition_to(Cancelled));
        assert!(Assigned.can_transition_to(InTransit));
        assert!(Assigned.can_transition_to(Cancelled));
        assert!(InTransit.can_transition_to(Delivered));
        assert!(InTransit.can_transition_to(IncidentReported));
        assert!(IncidentReported.can_transition_to(InTransit));
        assert!(IncidentReported.can_transition_to(Cancelled));
    }

    #[test]
    fn test_illegal_transitions() {
        use ShipmentStatus::{
            Assigned, Cancelled, Created, Delivered, InTransit, IncidentReported,
        };

        assert!(!Created.can_transition_to(Delivered));
        assert!(!Created.can_transition_to(InTransit));
        assert!(!Created.can_transition_to(IncidentReported));
        assert!(!Assigned.can_transition_to(Delivered));
        assert!(!InTransit.can_transition_to(Cancelled));
        assert!(!IncidentReported.can_transition_to(Delivered));

        // No transition targets itself
        for s in [
            Created,
            Assigned,
            InTransit,
            IncidentReported,
            Delivered,
            Cancelled,
        ] {
            assert!(!s.can_transition_to(s));
        }
    }

    #[test]
    fn test_terminal_states_admit_nothing() {
        use ShipmentStatus::{
            Assigned, Cancelled, Created, Delivered, InTransit, IncidentReported,
        };

        for terminal in [Delivered, Cancelled] {
            assert!(terminal.is_terminal());
            for target in [
                Created,
                Assigned,
                InTransit,
                IncidentReported,
                Delivered,
                Cancelled,
            ] {
                assert!(!terminal.can_transition_to(target));
            }
        }
    }

    #[test]
    fn test_priority_multipliers() {
        assert!((ShipmentPriority::Standard.rate_multiplier() - 1.0).abs() < f64::EPSILON);
        assert!((ShipmentPriority::Priority.rate_multiplier() - 1.5).abs() < f64::EPSILON);
        assert!((ShipmentPriority::Urgent.rate_multiplier() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_deliverer_availability() {
        assert!(DelivererStatus::Available.accepts_assignments());
        assert!(DelivererStatus::Active.accepts_assignments());
        assert!(!DelivererStatus::Busy.accepts_assignments());
        assert!(!DelivererStatus::OnBreak.accepts_assignments());
        assert!(!DelivererStatus::OffDuty.accepts_assignments());
    }

    #[test]
    fn test_reassignment_kinds() {
        assert!(IncidentKind::InaccessibleZone.requires_reassignment());
        assert!(IncidentKind::DelivererUnavailable.requires_reassignment());
        assert!(!IncidentKind::PackageDamaged.requires_reassignment());
    }

    #[test]
    fn test_status_display_and_parse() {
        let status: ShipmentStatus = "IN_TRANSIT".parse().unwrap();
        assert_eq!(status, ShipmentStatus::InTransit);
        assert_eq!(status.to_string(), "IN_TRANSIT");
        assert!("SHIPPED".parse::<ShipmentStatus>().is_err());
    }
}
