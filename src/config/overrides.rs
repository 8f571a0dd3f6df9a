//! Command-line override parsing.
//!
//! An override has the fixed shape `<dotted.path>:<raw-value>`; the raw
//! value is classified by trying grammars in a fixed priority order, so
//! numeric-looking overrides arrive typed instead of as text.

use crate::value::{Datetime, Value};

use super::source::{ConfigEntry, ConfigSource};
use super::ConfigError;

/// Splits a `path:value` argument on its first `:` and classifies the value.
///
/// The value grammars are tried in order: RFC 3339 date-time (with a time
/// zone offset), signed base-10 integer, float (decimal point or exponent),
/// literal `true`/`false`, and finally the raw string unmodified. Trying
/// integers before floats keeps `"214"` an integer; splitting on the first
/// colon lets values carry colons of their own, as date-times do.
///
/// The path is not validated here: any string is accepted, and applying it
/// is the caller's business via [`Config::set_path`](super::Config::set_path).
///
/// ```
/// use dragon_conf::{parse_set_argument, Value};
///
/// let (path, value) = parse_set_argument("setter.int:214").unwrap();
/// assert_eq!(path, "setter.int");
/// assert_eq!(value, Value::Integer(214));
/// ```
pub fn parse_set_argument(argument: &str) -> Result<(String, Value), ConfigError> {
    let (path, raw) = argument
        .split_once(':')
        .ok_or_else(|| ConfigError::InvalidOverride(argument.to_string()))?;
    Ok((path.to_string(), infer_value(raw)))
}

/// Classifies a raw override string into the most specific value kind.
pub(crate) fn infer_value(raw: &str) -> Value {
    if let Ok(datetime) = raw.parse::<Datetime>() {
        // Only full date-times with an offset count; bare dates and local
        // times fall through to the later grammars.
        if datetime.date.is_some() && datetime.time.is_some() && datetime.offset.is_some() {
            return Value::Datetime(datetime);
        }
    }

    if looks_like_integer(raw) {
        if let Ok(integer) = raw.parse::<i64>() {
            return Value::Integer(integer);
        }
    }

    if raw.contains('.') || raw.contains(['e', 'E']) {
        if let Ok(float) = raw.parse::<f64>() {
            return Value::Float(float);
        }
    }

    match raw {
        "true" => Value::Boolean(true),
        "false" => Value::Boolean(false),
        _ => Value::String(raw.to_string()),
    }
}

fn looks_like_integer(s: &str) -> bool {
    let s = s.strip_prefix('-').unwrap_or(s);
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

/// A single `path:value` override, applied through the builder pipeline.
#[derive(Debug, Clone)]
pub(crate) struct OverrideSource {
    argument: String,
}

impl OverrideSource {
    pub(crate) fn new(argument: impl Into<String>) -> Self {
        Self {
            argument: argument.into(),
        }
    }
}

impl ConfigSource for OverrideSource {
    fn entries(&self) -> Result<Vec<ConfigEntry>, ConfigError> {
        let (path, value) = parse_set_argument(&self.argument)?;
        let segments = path
            .split('.')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        Ok(vec![ConfigEntry::at_path(segments, value)])
    }
}
