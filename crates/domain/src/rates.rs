//! Shipping rate calculation.
//!
//! Rates are distance + weight based, scaled by the priority surcharge:
//! `(distance * 10 + weight * 5) * multiplier`, in local currency units.

use sameday_core::ShipmentPriority;

/// Charge per grid unit of distance.
pub const RATE_PER_DISTANCE_UNIT: f64 = 10.0;

/// Charge per kilogram of package weight.
pub const RATE_PER_KG: f64 = 5.0;

/// Quote a shipping rate.
#[must_use]
pub fn shipping_rate(distance: f64, weight: f64, priority: ShipmentPriority) -> f64 {
    weight.mul_add(RATE_PER_KG, distance * RATE_PER_DISTANCE_UNIT) * priority.rate_multiplier()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_rate() {
        // 10 units away, 2 kg: 10*10 + 2*5 = 110
        let rate = shipping_rate(10.0, 2.0, ShipmentPriority::Standard);
        assert!((rate - 110.0).abs() < 1e-9);
    }

    #[test]
    fn test_priority_surcharges() {
        let base = shipping_rate(10.0, 2.0, ShipmentPriority::Standard);
        assert!((shipping_rate(10.0, 2.0, ShipmentPriority::Priority) - base * 1.5).abs() < 1e-9);
        assert!((shipping_rate(10.0, 2.0, ShipmentPriority::Urgent) - base * 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_distance_still_charges_weight() {
        let rate = shipping_rate(0.0, 4.0, ShipmentPriority::Standard);
        assert!((rate - 20.0).abs() < 1e-9);
    }
}
