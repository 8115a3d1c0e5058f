//! Quote a shipping rate from raw route parameters.

use tracing::info;

use sameday_core::ShipmentPriority;
use sameday_domain::rates;

/// Compute and log the rate for a route of `distance` grid units carrying
/// `weight` kilograms.
pub fn run(distance: f64, weight: f64, priority: ShipmentPriority) {
    let cost = rates::shipping_rate(distance, weight, priority);
    info!(distance, weight, ?priority, cost, "rate quoted");
}
