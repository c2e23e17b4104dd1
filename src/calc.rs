use thiserror::Error;

use crate::models::StatusTier;

pub const HIGH_RELIABILITY_THRESHOLD: f64 = 0.95;
pub const SATISFACTORY_THRESHOLD: f64 = 0.80;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CalcError {
    #[error("{field} must be ≥ 0")]
    NegativeInput { field: &'static str },
    #[error("Tn and Tv cannot both be 0")]
    ZeroDenominator,
}

/// Availability coefficient Kg = Tn / (Tn + Tv), rounded to 4 decimal
/// digits. Rounding is `f64::round` on the scaled value, i.e. half away
/// from zero.
pub fn availability(tn: f64, tv: f64) -> Result<f64, CalcError> {
    if tn < 0.0 {
        return Err(CalcError::NegativeInput { field: "Tn" });
    }
    if tv < 0.0 {
        return Err(CalcError::NegativeInput { field: "Tv" });
    }
    if tn == 0.0 && tv == 0.0 {
        return Err(CalcError::ZeroDenominator);
    }
    Ok(round4(tn / (tn + tv)))
}

pub fn classify(kg: f64) -> StatusTier {
    if kg >= HIGH_RELIABILITY_THRESHOLD {
        StatusTier::HighReliability
    } else if kg >= SATISFACTORY_THRESHOLD {
        StatusTier::Satisfactory
    } else {
        StatusTier::LowReliability
    }
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_downtime_gives_full_availability() {
        let kg = availability(5.0, 0.0).unwrap();
        assert_eq!(kg, 1.0);
        assert_eq!(classify(kg), StatusTier::HighReliability);
    }

    #[test]
    fn satisfactory_boundary_is_inclusive() {
        let kg = availability(8.0, 2.0).unwrap();
        assert_eq!(kg, 0.8);
        assert_eq!(classify(kg), StatusTier::Satisfactory);
    }

    #[test]
    fn high_reliability_boundary_is_inclusive() {
        let kg = availability(95.0, 5.0).unwrap();
        assert_eq!(kg, 0.95);
        assert_eq!(classify(kg), StatusTier::HighReliability);
    }

    #[test]
    fn low_tier_below_satisfactory() {
        let kg = availability(1.0, 9.0).unwrap();
        assert_eq!(kg, 0.1);
        assert_eq!(classify(kg), StatusTier::LowReliability);
    }

    #[test]
    fn just_under_the_boundaries_falls_through() {
        assert_eq!(classify(0.9499), StatusTier::Satisfactory);
        assert_eq!(classify(0.7999), StatusTier::LowReliability);
    }

    #[test]
    fn zero_denominator_is_rejected() {
        assert_eq!(availability(0.0, 0.0), Err(CalcError::ZeroDenominator));
    }

    #[test]
    fn negative_inputs_are_rejected_with_the_field_named() {
        assert_eq!(
            availability(-1.0, 5.0),
            Err(CalcError::NegativeInput { field: "Tn" })
        );
        assert_eq!(
            availability(1.0, -5.0),
            Err(CalcError::NegativeInput { field: "Tv" })
        );
    }

    #[test]
    fn rounds_to_four_decimals_half_away_from_zero() {
        // 1 / 3 = 0.3333..., 2 / 3 = 0.6666...
        assert_eq!(availability(1.0, 2.0).unwrap(), 0.3333);
        assert_eq!(availability(2.0, 1.0).unwrap(), 0.6667);
        assert_eq!(round4(0.12344), 0.1234);
        assert_eq!(round4(0.12346), 0.1235);
    }

    #[test]
    fn deterministic_for_equal_inputs() {
        let a = availability(7.31, 0.42).unwrap();
        let b = availability(7.31, 0.42).unwrap();
        assert_eq!(a, b);
    }
}
