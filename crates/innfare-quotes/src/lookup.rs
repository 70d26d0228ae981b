//! Total lookup helpers over untrusted provider JSON.
//!
//! Every function returns `None` (or an empty slice) on any shape mismatch.
//! Callers chain them instead of deserializing into fixed structs, because
//! the provider omits, renames and retypes fields between responses.

use serde_json::Value;

/// Walks `keys` as nested object fields.
pub(crate) fn at<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().try_fold(value, |cur, key| cur.get(key))
}

/// Coerces a JSON number or numeric string to a finite, non-negative `f64`.
///
/// Strings may carry a leading currency symbol and thousands separators
/// (`"$1,234.50"`). Anything else is absent, never zero.
pub(crate) fn coerce_price(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => parse_price_str(s)?,
        _ => return None,
    };
    (n.is_finite() && n >= 0.0).then_some(n)
}

fn parse_price_str(raw: &str) -> Option<f64> {
    let trimmed = raw
        .trim()
        .trim_start_matches(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-'));
    if trimmed.is_empty() {
        return None;
    }
    let cleaned: String = trimmed.chars().filter(|&c| c != ',').collect();
    cleaned.trim().parse::<f64>().ok()
}

/// Price at `keys`, coerced per [`coerce_price`].
pub(crate) fn price_at(value: &Value, keys: &[&str]) -> Option<f64> {
    at(value, keys).and_then(coerce_price)
}

/// First path in `paths` that yields a price.
pub(crate) fn first_price(value: &Value, paths: &[&[&str]]) -> Option<f64> {
    paths.iter().find_map(|p| price_at(value, p))
}

/// Trimmed, non-empty string at `keys`.
pub(crate) fn str_at<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a str> {
    at(value, keys)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Boolean at `keys`; accepts `true`/`false`, `1`/`0` and their string forms.
pub(crate) fn bool_at(value: &Value, keys: &[&str]) -> Option<bool> {
    match at(value, keys)? {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_i64().and_then(|i| match i {
            1 => Some(true),
            0 => Some(false),
            _ => None,
        }),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Some(true),
            "false" | "0" | "no" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Array at `keys`, or an empty slice.
pub(crate) fn array_at<'a>(value: &'a Value, keys: &[&str]) -> &'a [Value] {
    at(value, keys)
        .and_then(Value::as_array)
        .map_or(&[][..], Vec::as_slice)
}

/// First element of the array at `keys`, when it is a non-empty string.
pub(crate) fn first_str_at<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a str> {
    array_at(value, keys)
        .first()
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}
