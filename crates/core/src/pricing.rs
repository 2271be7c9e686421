//! Evening discount schedule.
//!
//! Produce is perishable, so from 19:00 local time every product loses 10%
//! of its base price for each full hour that has passed. The price never
//! drops below zero and resets at midnight.

use chrono::{NaiveDateTime, Timelike};
use rust_decimal::Decimal;

/// Local hour at which the discount starts.
pub const DISCOUNT_START_HOUR: u32 = 19;

/// Fraction of the base price removed per elapsed hour (0.10).
pub const HOURLY_DISCOUNT_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// Full hours elapsed since today's discount start.
///
/// Returns 0 at or before 19:00.
#[must_use]
pub fn hours_since_discount_start(now: NaiveDateTime) -> u32 {
    if now.hour() < DISCOUNT_START_HOUR {
        return 0;
    }
    let Some(start) = now.date().and_hms_opt(DISCOUNT_START_HOUR, 0, 0) else {
        return 0;
    };
    u32::try_from((now - start).num_hours()).unwrap_or(0)
}

/// Price after `hours` of discount, rounded to two decimal places.
///
/// Non-positive base prices yield zero.
#[must_use]
pub fn discounted_price(base_price: Decimal, hours: u32) -> Decimal {
    if base_price <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let discount = base_price * HOURLY_DISCOUNT_RATE * Decimal::from(hours);
    (base_price - discount).max(Decimal::ZERO).round_dp(2)
}

/// Current price of a product with `base_price` at local time `now`.
#[must_use]
pub fn dynamic_price(base_price: Decimal, now: NaiveDateTime) -> Decimal {
    discounted_price(base_price, hours_since_discount_start(now))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 14)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn test_no_discount_before_start() {
        assert_eq!(hours_since_discount_start(at(8, 0)), 0);
        assert_eq!(hours_since_discount_start(at(18, 59)), 0);
        assert_eq!(hours_since_discount_start(at(19, 0)), 0);
    }

    #[test]
    fn test_hours_are_floored() {
        assert_eq!(hours_since_discount_start(at(19, 59)), 0);
        assert_eq!(hours_since_discount_start(at(20, 0)), 1);
        assert_eq!(hours_since_discount_start(at(22, 30)), 3);
        assert_eq!(hours_since_discount_start(at(23, 59)), 4);
    }

    #[test]
    fn test_discounted_price() {
        let base = Decimal::new(1000, 2); // 10.00
        assert_eq!(discounted_price(base, 0), Decimal::new(1000, 2));
        assert_eq!(discounted_price(base, 1), Decimal::new(900, 2));
        assert_eq!(discounted_price(base, 4), Decimal::new(600, 2));
        assert_eq!(discounted_price(base, 10), Decimal::ZERO);
        assert_eq!(discounted_price(base, 15), Decimal::ZERO);
    }

    #[test]
    fn test_rounds_to_cents() {
        let base = Decimal::new(333, 2); // 3.33
        assert_eq!(discounted_price(base, 1), Decimal::new(300, 2));
    }

    #[test]
    fn test_non_positive_base() {
        assert_eq!(discounted_price(Decimal::ZERO, 3), Decimal::ZERO);
        assert_eq!(discounted_price(Decimal::new(-500, 2), 3), Decimal::ZERO);
    }

    #[test]
    fn test_dynamic_price_uses_clock() {
        let base = Decimal::new(250, 2);
        assert_eq!(dynamic_price(base, at(12, 0)), base);
        assert_eq!(dynamic_price(base, at(21, 15)), Decimal::new(200, 2));
    }
}
