//! Fantasy points as exact two-place decimals.

use rust_decimal::{prelude::FromPrimitive, Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::error::{Result, SleeperError};

/// Points rounded to hundredths. Serialised as a plain JSON number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Points(Decimal);

impl Points {
    pub const ZERO: Points = Points(Decimal::ZERO);

    /// Rebuild an authoritative total from whole points plus hundredths,
    /// i.e. `whole * 100 + fraction` cents. `fraction` must be in `0..=99`.
    pub fn from_fixed(roster_id: u32, whole: i64, fraction: i64) -> Result<Self> {
        if !(0..=99).contains(&fraction) {
            return Err(SleeperError::InvalidFraction { roster_id, fraction });
        }
        let cents = whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(fraction))
            .ok_or(SleeperError::PointsOverflow { roster_id, whole })?;
        Ok(Self(Decimal::new(cents, 2)))
    }

    /// Sum raw starter scores and round half away from zero to two places.
    pub fn from_starters(starters: &[f64]) -> Self {
        let sum: Decimal = starters
            .iter()
            .filter_map(|p| Decimal::from_f64(*p))
            .sum();
        Self(sum.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl From<Decimal> for Points {
    fn from(value: Decimal) -> Self {
        Self(value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
    }
}

impl fmt::Display for Points {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Serialize for Points {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Points {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        rust_decimal::serde::float::deserialize(deserializer).map(Points::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_fixed_point_zero_pads_fraction() {
        let total = Points::from_fixed(1, 123, 7).unwrap();
        assert_eq!(total.as_decimal(), dec!(123.07));
        assert_ne!(total.as_decimal(), dec!(123.7));
    }

    #[test]
    fn test_fixed_point_two_digit_fraction() {
        assert_eq!(
            Points::from_fixed(1, 1500, 42).unwrap().as_decimal(),
            dec!(1500.42)
        );
        assert_eq!(Points::from_fixed(1, 0, 0).unwrap(), Points::ZERO);
    }

    #[test]
    fn test_fixed_point_rejects_out_of_range_fraction() {
        for bad in [100, 150, -1] {
            match Points::from_fixed(9, 10, bad) {
                Err(SleeperError::InvalidFraction { roster_id, fraction }) => {
                    assert_eq!(roster_id, 9);
                    assert_eq!(fraction, bad);
                }
                other => panic!("Expected InvalidFraction, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_from_starters_rounds_to_hundredths() {
        let p = Points::from_starters(&[10.111, 20.222, 0.0]);
        assert_eq!(p.as_decimal(), dec!(30.33));

        let half = Points::from_starters(&[0.125]);
        assert_eq!(half.as_decimal(), dec!(0.13));
    }

    #[test]
    fn test_from_starters_avoids_float_drift() {
        // 0.1 + 0.2 in f64 is 0.30000000000000004
        assert_eq!(Points::from_starters(&[0.1, 0.2]).as_decimal(), dec!(0.30));
        assert_eq!(Points::from_starters(&[]), Points::ZERO);
    }

    #[test]
    fn test_serializes_as_json_number() {
        let p = Points::from_fixed(1, 123, 7).unwrap();
        assert_eq!(serde_json::to_string(&p).unwrap(), "123.07");

        let back: Points = serde_json::from_str("123.07").unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn test_fixed_point_overflow_is_an_error() {
        match Points::from_fixed(3, i64::MAX, 0) {
            Err(SleeperError::PointsOverflow { roster_id, whole }) => {
                assert_eq!(roster_id, 3);
                assert_eq!(whole, i64::MAX);
            }
            other => panic!("Expected PointsOverflow, got {other:?}"),
        }
        // Fits after the multiply but not after adding the fraction.
        let edge = i64::MAX / 100;
        assert!(Points::from_fixed(3, edge, 7).is_ok());
        assert!(matches!(
            Points::from_fixed(3, edge, 8),
            Err(SleeperError::PointsOverflow { .. })
        ));
        assert!(Points::from_fixed(3, i64::MIN, 0).is_err());
    }

    #[test]
    fn test_display_two_places() {
        assert_eq!(Points::from_fixed(1, 4, 5).unwrap().to_string(), "4.05");
        assert_eq!(Points::ZERO.to_string(), "0.00");
    }
}
