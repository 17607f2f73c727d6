pub mod nutrition;
pub mod profile;
pub mod targets;
pub mod weekly;

pub use nutrition::*;
pub use profile::*;
pub use targets::*;
pub use weekly::*;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Lenient numeric coercion
// ---------------------------------------------------------------------------

/// Coerce a loosely-typed JSON value into a non-negative finite amount.
///
/// Numbers and numeric strings are accepted. Missing values, `null`,
/// non-numeric strings, other JSON types, negative and non-finite numbers
/// all become `0.0`. Anything other than a missing value or `null` that
/// gets replaced is logged.
pub fn coerce_amount(value: Option<&Value>) -> f64 {
    let parsed = match value {
        None | Some(Value::Null) => return 0.0,
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };
    match parsed {
        Some(x) if x.is_finite() && x >= 0.0 => x,
        _ => {
            tracing::warn!(value = ?value, "malformed nutrition amount treated as 0");
            0.0
        }
    }
}

/// Like [`coerce_amount`] but keeps "absent" distinct from zero and does not
/// clamp negatives.
pub(crate) fn coerce_optional(value: Option<&Value>) -> Option<f64> {
    let parsed = match value {
        None | Some(Value::Null) => return None,
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) if s.trim().is_empty() => return None,
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };
    parsed.filter(|x| x.is_finite())
}

pub(crate) fn lenient_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(coerce_amount(value.as_ref()))
}

pub(crate) fn lenient_optional<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(coerce_optional(value.as_ref()))
}

pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    })
}
