//! Loose comparison of values.
//!
//! Sorting, de-duplication and searching compare values the way loosely
//! typed nested data expects: numbers and numeric strings compare as numbers,
//! other text compares byte-wise, null and booleans compare by truthiness.

use std::cmp::Ordering;

use super::{Key, Value};
use crate::container::ContainerError;

/// How values are compared when sorting or de-duplicating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortFlag {
    /// Loose comparison: numeric when both sides look numeric, else textual
    #[default]
    Regular,
    /// Both sides converted to numbers
    Numeric,
    /// Both sides converted to text
    String,
}

/// Returns true if `s` spells a number, allowing surrounding whitespace.
///
/// ```
/// # use dotstore::value::compare::is_numeric_str;
/// assert!(is_numeric_str("42"));
/// assert!(is_numeric_str(" -1.5e3 "));
/// assert!(is_numeric_str(".5"));
/// assert!(!is_numeric_str("12abc"));
/// assert!(!is_numeric_str("inf"));
/// assert!(!is_numeric_str(""));
/// ```
pub fn is_numeric_str(s: &str) -> bool {
    let trimmed = s.trim();
    if !trimmed.bytes().any(|b| b.is_ascii_digit()) {
        return false;
    }
    if !trimmed
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'))
    {
        return false;
    }
    trimmed.parse::<f64>().is_ok()
}

/// Numeric reading of a value: the leading number of a text, `1`/`0` for
/// booleans, `0` for null. Tables have none.
fn to_number(value: &Value) -> Option<f64> {
    match value {
        Value::Null => Some(0.0),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Int(n) => Some(*n as f64),
        Value::Float(f) => Some(*f),
        Value::Text(s) => Some(leading_number(s)),
        Value::Table(_) => None,
    }
}

fn leading_number(s: &str) -> f64 {
    let s = s.trim_start();
    let candidate_len = s
        .bytes()
        .take_while(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'))
        .count();
    (1..=candidate_len)
        .rev()
        .find_map(|end| s[..end].parse::<f64>().ok())
        .unwrap_or(0.0)
}

fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Loose comparison of two non-table-mixed values under `flag`.
///
/// # Errors
/// Returns `ContainerError::InvalidArgument` when a table meets a scalar
/// under [`SortFlag::Regular`], or when either side is a table under
/// [`SortFlag::Numeric`] or [`SortFlag::String`].
pub fn compare_values(a: &Value, b: &Value, flag: SortFlag) -> Result<Ordering, ContainerError> {
    match flag {
        SortFlag::Regular => compare_regular(a, b),
        SortFlag::Numeric => match (to_number(a), to_number(b)) {
            (Some(x), Some(y)) => Ok(cmp_f64(x, y)),
            _ => Err(uncomparable("numeric", a, b)),
        },
        SortFlag::String => {
            if a.is_table() || b.is_table() {
                return Err(uncomparable("string", a, b));
            }
            Ok(a.to_text().cmp(&b.to_text()))
        }
    }
}

fn uncomparable(mode: &str, a: &Value, b: &Value) -> ContainerError {
    ContainerError::invalid_argument(
        "compare",
        format!(
            "cannot compare {} with {} in {mode} mode",
            a.type_name(),
            b.type_name()
        ),
    )
}

fn compare_regular(a: &Value, b: &Value) -> Result<Ordering, ContainerError> {
    use Value::*;

    let ordering = match (a, b) {
        (Table(x), Table(y)) => {
            if x.len() != y.len() {
                x.len().cmp(&y.len())
            } else {
                for (left, right) in x.values().zip(y.values()) {
                    let ordering = compare_regular(left, right)?;
                    if ordering != Ordering::Equal {
                        return Ok(ordering);
                    }
                }
                Ordering::Equal
            }
        }
        (Table(_), _) | (_, Table(_)) => return Err(uncomparable("regular", a, b)),
        (Null, Text(s)) => "".cmp(s.as_str()),
        (Text(s), Null) => s.as_str().cmp(""),
        (Null | Bool(_), _) | (_, Null | Bool(_)) => (!a.is_empty_like()).cmp(&!b.is_empty_like()),
        (Int(x), Int(y)) => x.cmp(y),
        (Int(_) | Float(_), Int(_) | Float(_)) => {
            cmp_f64(a.as_float().unwrap_or(0.0), b.as_float().unwrap_or(0.0))
        }
        (Text(s), Text(t)) => {
            if is_numeric_str(s) && is_numeric_str(t) {
                cmp_f64(leading_number(s), leading_number(t))
            } else {
                s.cmp(t)
            }
        }
        (Int(_) | Float(_), Text(s)) => {
            if is_numeric_str(s) {
                cmp_f64(a.as_float().unwrap_or(0.0), leading_number(s))
            } else {
                a.to_text().as_str().cmp(s.as_str())
            }
        }
        (Text(s), Int(_) | Float(_)) => {
            if is_numeric_str(s) {
                cmp_f64(leading_number(s), b.as_float().unwrap_or(0.0))
            } else {
                s.as_str().cmp(b.to_text().as_str())
            }
        }
    };
    Ok(ordering)
}

/// Loose equality, as used by non-strict searches.
///
/// Tables are equal when they hold the same keys with loosely equal values,
/// in any order.
pub fn loose_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Table(x), Value::Table(y)) => {
            x.len() == y.len()
                && x.iter()
                    .all(|(key, value)| y.get(key).is_some_and(|other| loose_eq(value, other)))
        }
        (Value::Table(_), _) | (_, Value::Table(_)) => false,
        _ => matches!(compare_regular(a, b), Ok(Ordering::Equal)),
    }
}

/// Equality under a sort flag, as used by de-duplication.
pub fn equal_under(a: &Value, b: &Value, flag: SortFlag) -> bool {
    match flag {
        SortFlag::Regular => loose_eq(a, b),
        SortFlag::Numeric => match (to_number(a), to_number(b)) {
            (Some(x), Some(y)) => x == y,
            _ => a == b,
        },
        SortFlag::String => a.to_text() == b.to_text(),
    }
}

/// Compares two keys under `flag`. Keys are never tables, so this cannot fail.
pub fn compare_keys(a: &Key, b: &Key, flag: SortFlag) -> Ordering {
    if let (Key::Int(x), Key::Int(y)) = (a, b) {
        if flag != SortFlag::String {
            return x.cmp(y);
        }
    }
    let left = Value::from(a.clone());
    let right = Value::from(b.clone());
    compare_values(&left, &right, flag).unwrap_or(Ordering::Equal)
}

/// Checks that every pair of `values` can be compared under `flag`.
pub(crate) fn ensure_sortable<'a>(
    values: impl IntoIterator<Item = &'a Value>,
    flag: SortFlag,
) -> Result<(), ContainerError> {
    let mut has_table = false;
    let mut has_scalar = false;
    for value in values {
        if value.is_table() {
            has_table = true;
        } else {
            has_scalar = true;
        }
    }
    let invalid = match flag {
        SortFlag::Regular => has_table && has_scalar,
        SortFlag::Numeric | SortFlag::String => has_table,
    };
    if invalid {
        return Err(ContainerError::invalid_argument(
            "sort",
            format!("tables cannot be sorted alongside other values with {flag:?}"),
        ));
    }
    Ok(())
}
