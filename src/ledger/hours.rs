//! Hours <-> minutes conversion
//!
//! Worked time is canonical in whole minutes; the API and CSV boundaries
//! speak fractional hours. Both directions round half-up, and the round trip
//! is exact for any whole-minute value.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::utils::{AppError, AppResult};

const MINUTES_PER_HOUR: Decimal = Decimal::from_parts(60, 0, 0, false, 0);

/// Fractional hours to whole minutes, rounded half-up
pub fn to_minutes(hours: Decimal) -> AppResult<i64> {
    if hours.is_sign_negative() {
        return Err(AppError::validation(format!(
            "Worked hours cannot be negative: {}",
            hours
        )));
    }

    (hours * MINUTES_PER_HOUR)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or_else(|| AppError::validation(format!("Worked hours out of range: {}", hours)))
}

/// Whole minutes to hours with two decimal digits, rounded half-up
pub fn to_hours(minutes: i64) -> Decimal {
    (Decimal::from(minutes) / MINUTES_PER_HOUR)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Render hours with exactly two decimal digits (CSV export format)
pub fn format_hours(minutes: i64) -> String {
    format!("{:.2}", to_hours(minutes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn hours_round_half_up_to_the_nearest_minute() {
        // 4h35m
        assert_eq!(to_minutes(dec("4.5833")).unwrap(), 275);
        // exactly half a minute rounds up
        assert_eq!(to_minutes(dec("0.0083")).unwrap(), 0);
        assert_eq!(to_minutes(dec("0.0084")).unwrap(), 1);
        assert_eq!(to_minutes(dec("8")).unwrap(), 480);
        assert_eq!(to_minutes(dec("0")).unwrap(), 0);
    }

    #[test]
    fn negative_hours_are_rejected() {
        assert!(to_minutes(dec("-0.5")).is_err());
    }

    #[test]
    fn minutes_render_with_two_digits() {
        assert_eq!(format_hours(275), "4.58");
        assert_eq!(format_hours(30), "0.50");
        assert_eq!(format_hours(0), "0.00");
        assert_eq!(format_hours(90), "1.50");
    }

    #[test]
    fn round_trip_is_exact_for_every_whole_minute_of_a_day() {
        for minutes in 0..=1440i64 {
            let hours = to_hours(minutes);
            assert_eq!(
                to_minutes(hours).unwrap(),
                minutes,
                "round trip failed for {} minutes",
                minutes
            );
        }
    }
}
