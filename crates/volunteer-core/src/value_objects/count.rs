//! Lenient non-negative integer coercion for event counters
//!
//! Event forms submit `points_awarded`, `hours_required` and
//! `participant_limit` either as JSON numbers or as strings, and often leave
//! them blank. Blank means zero; anything that is not a whole non-negative
//! number is rejected.

use serde_json::Value;

use crate::error::DomainError;

/// Coerce a raw JSON value into a non-negative `i32`.
///
/// - absent, `null` or an empty/blank string → `0`
/// - an integer, an integer-valued float or an integer string → that value
/// - anything else → `DomainError::ValidationError` naming the field
pub fn coerce_count(field: &str, raw: Option<&Value>) -> Result<i32, DomainError> {
    let invalid = || DomainError::ValidationError(format!("{field} must be a non-negative integer"));

    let value: i64 = match raw {
        None | Some(Value::Null) => return Ok(0),
        Some(Value::Number(n)) => {
            if let Some(v) = n.as_i64() {
                v
            } else if let Some(f) = n.as_f64() {
                if f.fract() != 0.0 || !f.is_finite() || f > f64::from(i32::MAX) {
                    return Err(invalid());
                }
                f as i64
            } else {
                return Err(invalid());
            }
        }
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(0);
            }
            s.parse::<i64>().map_err(|_| invalid())?
        }
        Some(_) => return Err(invalid()),
    };

    if value < 0 {
        return Err(invalid());
    }
    i32::try_from(value).map_err(|_| invalid())
}
