//! Key expressions and the dotted paths they resolve to.
//!
//! Every addressing operation of a [`Container`](crate::Container) takes a
//! [`KeyExpr`]: a plain key, a dotted string, a pre-split sequence of keys, or
//! the root. [`resolve`] turns an expression into a [`Path`], the ordered
//! segments walked from the root.
//!
//! # Usage
//!
//! ```rust
//! use dotstore::{Key, Path, path::resolve};
//!
//! // Dotted strings split on every dot
//! assert_eq!(resolve("user.profile.name").len(), 3);
//!
//! // Build incrementally
//! let path = Path::new().push("user").push(0);
//! assert_eq!(path.segments(), &[Key::from("user"), Key::Int(0)]);
//! assert_eq!(path.to_string(), "user.0");
//!
//! // Floats are one segment even though they hold a dot
//! assert_eq!(resolve(1.5).segments(), &[Key::from("1.5")]);
//! ```

use std::fmt;

use tracing::trace;

use crate::value::Key;

/// Separator between path segments.
pub const SEPARATOR: char = '.';

/// An expression addressing an entry of a nested container.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyExpr {
    /// The container itself
    Root,
    /// Pre-split segments, used verbatim
    Segments(Vec<Key>),
    /// A float key, stringified into one segment
    Float(f64),
    /// A string, split on dots
    Text(String),
    /// A single integer key
    Int(i64),
}

impl KeyExpr {
    /// Resolves this expression into a path.
    pub fn resolve(&self) -> Path {
        resolve(self.clone())
    }

    /// Returns true for [`KeyExpr::Root`]
    pub fn is_root(&self) -> bool {
        matches!(self, KeyExpr::Root)
    }

    /// Returns true for pre-split [`KeyExpr::Segments`]
    pub fn is_sequence(&self) -> bool {
        matches!(self, KeyExpr::Segments(_))
    }

    /// The expression as a single root-level key, when it has one.
    ///
    /// Sequences and the root are never direct keys. Strings are taken whole,
    /// dots included, and canonicalized.
    pub fn direct_key(&self) -> Option<Key> {
        match self {
            KeyExpr::Root | KeyExpr::Segments(_) => None,
            KeyExpr::Float(f) => Some(Key::from_float(*f)),
            KeyExpr::Text(s) => Some(Key::parse(s)),
            KeyExpr::Int(n) => Some(Key::Int(*n)),
        }
    }

    /// Splits a batch expression into its member expressions.
    ///
    /// A sequence is a batch of independent keys; anything else is a batch
    /// of one.
    pub(crate) fn into_batch(self) -> Vec<KeyExpr> {
        match self {
            KeyExpr::Segments(keys) => keys.into_iter().map(KeyExpr::from).collect(),
            other => vec![other],
        }
    }
}

/// Resolves a key expression into the path it addresses.
///
/// - `Root` resolves to the empty path.
/// - `Segments` are used verbatim.
/// - A `Float` becomes one segment holding its string form.
/// - `Text` splits on every `.`; empty pieces are kept as empty keys.
/// - An `Int` is one segment.
pub fn resolve(expr: impl Into<KeyExpr>) -> Path {
    let expr = expr.into();
    let path = match expr {
        KeyExpr::Root => Path::new(),
        KeyExpr::Segments(keys) => Path::from(keys),
        KeyExpr::Float(f) => Path::from(vec![Key::from_float(f)]),
        KeyExpr::Text(s) if s.contains(SEPARATOR) => s.split(SEPARATOR).map(Key::parse).collect(),
        KeyExpr::Text(s) => Path::from(vec![Key::from(s)]),
        KeyExpr::Int(n) => Path::from(vec![Key::Int(n)]),
    };
    trace!(path = %path, segments = path.len(), "Resolved key expression");
    path
}

/// An ordered sequence of keys walked from the root of a container.
///
/// The empty path addresses the root itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<Key>,
}

impl Path {
    /// Creates the root path
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns this path extended by one segment.
    pub fn push(mut self, segment: impl Into<Key>) -> Self {
        self.segments.push(segment.into());
        self
    }

    /// The segments, in walk order
    pub fn segments(&self) -> &[Key] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns true for the empty path
    pub fn is_root(&self) -> bool {
        self.is_empty()
    }

    /// Splits off the last segment, returning the parent path and the leaf.
    pub fn split_last(&self) -> Option<(&[Key], &Key)> {
        self.segments
            .split_last()
            .map(|(last, parent)| (parent, last))
    }

    /// The path without its last segment; the root has no parent.
    pub fn parent(&self) -> Option<Path> {
        self.split_last()
            .map(|(parent, _)| Path::from(parent.to_vec()))
    }

    /// The first segment
    pub fn first(&self) -> Option<&Key> {
        self.segments.first()
    }

    /// The last segment
    pub fn last(&self) -> Option<&Key> {
        self.segments.last()
    }

    pub fn into_segments(self) -> Vec<Key> {
        self.segments
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "(root)");
        }
        for (position, segment) in self.segments.iter().enumerate() {
            if position > 0 {
                write!(f, "{SEPARATOR}")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl From<Vec<Key>> for Path {
    fn from(segments: Vec<Key>) -> Self {
        Path { segments }
    }
}

impl FromIterator<Key> for Path {
    fn from_iter<T: IntoIterator<Item = Key>>(iter: T) -> Self {
        Path {
            segments: iter.into_iter().collect(),
        }
    }
}

impl AsRef<[Key]> for Path {
    fn as_ref(&self) -> &[Key] {
        &self.segments
    }
}

impl From<&str> for KeyExpr {
    fn from(s: &str) -> Self {
        KeyExpr::Text(s.to_string())
    }
}

impl From<String> for KeyExpr {
    fn from(s: String) -> Self {
        KeyExpr::Text(s)
    }
}

impl From<&String> for KeyExpr {
    fn from(s: &String) -> Self {
        KeyExpr::Text(s.clone())
    }
}

impl From<i64> for KeyExpr {
    fn from(n: i64) -> Self {
        KeyExpr::Int(n)
    }
}

impl From<i32> for KeyExpr {
    fn from(n: i32) -> Self {
        KeyExpr::Int(n as i64)
    }
}

impl From<u32> for KeyExpr {
    fn from(n: u32) -> Self {
        KeyExpr::Int(n as i64)
    }
}

impl From<usize> for KeyExpr {
    fn from(n: usize) -> Self {
        KeyExpr::Int(n as i64)
    }
}

impl From<bool> for KeyExpr {
    fn from(b: bool) -> Self {
        KeyExpr::Int(b as i64)
    }
}

impl From<f64> for KeyExpr {
    fn from(f: f64) -> Self {
        KeyExpr::Float(f)
    }
}

/// A key becomes the scalar expression of the same kind.
impl From<Key> for KeyExpr {
    fn from(key: Key) -> Self {
        match key {
            Key::Int(n) => KeyExpr::Int(n),
            Key::Str(s) => KeyExpr::Text(s),
        }
    }
}

impl From<&Key> for KeyExpr {
    fn from(key: &Key) -> Self {
        KeyExpr::from(key.clone())
    }
}

impl From<Vec<Key>> for KeyExpr {
    fn from(keys: Vec<Key>) -> Self {
        KeyExpr::Segments(keys)
    }
}

impl From<Vec<&str>> for KeyExpr {
    fn from(keys: Vec<&str>) -> Self {
        KeyExpr::Segments(keys.into_iter().map(Key::from).collect())
    }
}

impl From<&[&str]> for KeyExpr {
    fn from(keys: &[&str]) -> Self {
        KeyExpr::Segments(keys.iter().copied().map(Key::from).collect())
    }
}

impl<const N: usize> From<[&str; N]> for KeyExpr {
    fn from(keys: [&str; N]) -> Self {
        KeyExpr::Segments(keys.into_iter().map(Key::from).collect())
    }
}

impl From<Path> for KeyExpr {
    fn from(path: Path) -> Self {
        KeyExpr::Segments(path.into_segments())
    }
}

impl From<&Path> for KeyExpr {
    fn from(path: &Path) -> Self {
        KeyExpr::Segments(path.segments.clone())
    }
}

/// `None` addresses the root.
impl<T: Into<KeyExpr>> From<Option<T>> for KeyExpr {
    fn from(option: Option<T>) -> Self {
        option.map(Into::into).unwrap_or(KeyExpr::Root)
    }
}
