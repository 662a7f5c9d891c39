//! Keys addressing entries of a [`Table`](super::Table).
//!
//! A key is either an integer or a string. Strings holding the canonical
//! decimal form of an `i64` are stored as integer keys, so `"0"` and `0`
//! address the same entry and dotted paths like `"items.0"` reach into lists.

use std::fmt;

/// A key of a nested table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// Integer key (list positions and numeric map keys)
    Int(i64),
    /// String key
    Str(String),
}

impl Key {
    /// Parses a string into a key, collapsing canonical integers.
    ///
    /// ```
    /// # use dotstore::Key;
    /// assert_eq!(Key::parse("42"), Key::Int(42));
    /// assert_eq!(Key::parse("-7"), Key::Int(-7));
    /// assert_eq!(Key::parse("007"), Key::Str("007".to_string()));
    /// assert_eq!(Key::parse("1.5"), Key::Str("1.5".to_string()));
    /// ```
    pub fn parse(s: &str) -> Self {
        match canonical_int(s) {
            Some(n) => Key::Int(n),
            None => Key::Str(s.to_string()),
        }
    }

    /// Builds the key used for a float: its string form, then parsed.
    pub fn from_float(f: f64) -> Self {
        Key::parse(&float_text(f))
    }

    /// Returns true for integer keys
    pub fn is_int(&self) -> bool {
        matches!(self, Key::Int(_))
    }

    /// Returns the integer if this is an integer key
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Key::Int(n) => Some(*n),
            Key::Str(_) => None,
        }
    }

    /// Returns the string if this is a string key
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Key::Str(s) => Some(s),
            Key::Int(_) => None,
        }
    }

    /// Returns the key in string form.
    pub fn to_text(&self) -> String {
        match self {
            Key::Int(n) => n.to_string(),
            Key::Str(s) => s.clone(),
        }
    }
}

/// Returns the integer a string canonically spells, if any.
///
/// Canonical means no sign other than a leading `-`, no leading zeros,
/// no `-0`, and the value fits in an `i64`.
pub(crate) fn canonical_int(s: &str) -> Option<i64> {
    let digits = s.strip_prefix('-').unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return None;
    }
    if s == "-0" {
        return None;
    }
    s.parse().ok()
}

/// String form of a float as used for keys and loose comparisons.
pub(crate) fn float_text(f: f64) -> String {
    if f.is_nan() {
        "NAN".to_string()
    } else if f.is_infinite() {
        let text = if f > 0.0 { "INF" } else { "-INF" };
        text.to_string()
    } else {
        format!("{f}")
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(n) => write!(f, "{n}"),
            Key::Str(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::parse(s)
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        match canonical_int(&s) {
            Some(n) => Key::Int(n),
            None => Key::Str(s),
        }
    }
}

impl From<&String> for Key {
    fn from(s: &String) -> Self {
        Key::parse(s)
    }
}

impl From<i64> for Key {
    fn from(n: i64) -> Self {
        Key::Int(n)
    }
}

impl From<i32> for Key {
    fn from(n: i32) -> Self {
        Key::Int(n as i64)
    }
}

impl From<u32> for Key {
    fn from(n: u32) -> Self {
        Key::Int(n as i64)
    }
}

impl From<usize> for Key {
    fn from(n: usize) -> Self {
        Key::Int(n as i64)
    }
}

impl From<bool> for Key {
    fn from(b: bool) -> Self {
        Key::Int(b as i64)
    }
}

impl From<f64> for Key {
    fn from(f: f64) -> Self {
        Key::from_float(f)
    }
}

impl From<&Key> for Key {
    fn from(key: &Key) -> Self {
        key.clone()
    }
}

impl PartialEq<&str> for Key {
    fn eq(&self, other: &&str) -> bool {
        *self == Key::parse(other)
    }
}

impl PartialEq<i64> for Key {
    fn eq(&self, other: &i64) -> bool {
        matches!(self, Key::Int(n) if n == other)
    }
}
