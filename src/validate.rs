use crate::models::{Field, FieldError, ValidationReport};

/// Parses a raw input field the way the calculator accepts numbers:
/// surrounding whitespace is ignored, NaN and infinities are rejected.
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Checks both raw fields independently and returns every error found,
/// Tn-related first. Pure; rendering and gating are the caller's job.
pub fn validate(raw_tn: &str, raw_tv: &str, strict_positive_tn: bool) -> ValidationReport {
    let mut errors = Vec::new();

    match parse_number(raw_tn) {
        None => errors.push(FieldError::new(Field::Tn, "Tn: please input a number")),
        Some(tn) if strict_positive_tn && tn <= 0.0 => {
            errors.push(FieldError::new(Field::Tn, "Tn must be > 0"));
        }
        Some(tn) if tn < 0.0 => {
            errors.push(FieldError::new(Field::Tn, "Tn must be ≥ 0"));
        }
        Some(_) => {}
    }

    match parse_number(raw_tv) {
        None => errors.push(FieldError::new(Field::Tv, "Tv: please input a number")),
        Some(tv) if tv < 0.0 => {
            errors.push(FieldError::new(Field::Tv, "Tv must be ≥ 0"));
        }
        Some(_) => {}
    }

    ValidationReport {
        valid: errors.is_empty(),
        errors,
    }
}
