//! Nested containers with dot-path addressing.
//!
//! A [`Container`] owns a root [`Table`] and reads and writes it through
//! [`KeyExpr`]s: `"a.b.c"` walks three levels, `["a.b", "c"]` walks two with
//! the first key taken literally, and the root expression addresses the whole
//! tree.
//!
//! # Usage
//!
//! ```rust
//! use dotstore::{Container, Value};
//!
//! let mut store = Container::new();
//! store.set("user.profile.name", "Alice");
//! store.set("user.tags", dotstore::list!["admin", "ops"]);
//!
//! assert_eq!(store.get("user.profile.name", Value::Null), "Alice");
//! assert!(store.has("user.tags.1"));
//! assert_eq!(store.get("user.missing", "none"), "none");
//!
//! store.remove("user.profile");
//! assert!(!store.has("user.profile.name"));
//! ```
//!
//! Lookups never fail. A missing path returns the caller's default, `has`
//! answers false and `remove` does nothing.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    path::{KeyExpr, Path, resolve},
    value::{Key, Table, Value, key::float_text},
};

pub mod bulk;
pub mod errors;
mod ops;
mod sort;

pub use bulk::{Diff, KeyComparator};
pub use errors::ContainerError;

/// A mutable tree of nested tables.
///
/// The root is always a table. Values read out are copies; nothing handed
/// out aliases the tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Container {
    items: Table,
}

impl Container {
    /// Creates an empty container
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a container from any value.
    ///
    /// Null gives an empty container, a scalar a one-element list, a table
    /// itself.
    pub fn from_value(value: impl Into<Value>) -> Self {
        Self {
            items: value.into().into_table(),
        }
    }

    /// Creates a container owning `table`
    pub fn from_table(table: Table) -> Self {
        Self { items: table }
    }

    /// Replaces the whole tree, wrapping the value like [`Container::from_value`].
    pub fn replace_items(&mut self, items: impl Into<Value>) -> &mut Self {
        self.items = items.into().into_table();
        self
    }

    /// The root table
    pub fn all(&self) -> &Table {
        &self.items
    }

    pub fn into_inner(self) -> Table {
        self.items
    }

    /// The root as a [`Value::Table`]
    pub fn to_value(&self) -> Value {
        Value::Table(self.items.clone())
    }

    /// Number of root entries
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Reads the value at `key`, or `default` when nothing is there.
    ///
    /// A key that exists at the root as written is returned unchanged, even
    /// if it holds a dot, null or an empty table. Otherwise the path is
    /// walked; at the end the value is viewed as a table: an empty one gives
    /// `default`, a single element comes back unwrapped, anything larger
    /// comes back whole.
    ///
    /// ```
    /// # use dotstore::{Container, Value, list, table};
    /// let store = Container::from_table(table! {
    ///     "tags" => list!["only"],
    ///     "user" => table! { "tags" => list!["only"] },
    /// });
    /// // A direct key is returned as stored
    /// assert_eq!(store.get("tags", Value::Null), list!["only"]);
    /// // A walked path unwraps a single element
    /// assert_eq!(store.get("user.tags", Value::Null), "only");
    /// ```
    pub fn get(&self, key: impl Into<KeyExpr>, default: impl Into<Value>) -> Value {
        let expr = key.into();
        if let Some(direct) = expr.direct_key() {
            if let Some(value) = self.items.get(&direct) {
                return value.clone();
            }
        }

        let path = resolve(expr);
        if path.is_root() {
            return self.to_value();
        }

        match self.walk(path.segments()) {
            Some(Value::Table(table)) => match table.len() {
                0 => default.into(),
                1 => table.values().next().cloned().unwrap_or_default(),
                _ => Value::Table(table.clone()),
            },
            Some(Value::Null) | None => default.into(),
            Some(scalar) => scalar.clone(),
        }
    }

    /// Property-style read: [`Container::get`] with a null default.
    pub fn value(&self, key: impl Into<KeyExpr>) -> Value {
        self.get(key, Value::Null)
    }

    /// Reads the value at `key` and converts it, if present and of the
    /// right type.
    pub fn get_as<T>(&self, key: impl Into<KeyExpr>) -> Option<T>
    where
        T: TryFrom<Value>,
    {
        T::try_from(self.value(key)).ok()
    }

    /// Writes `value` at `key`.
    ///
    /// The root expression appends at the next free index; when the table has
    /// no free index left nothing is written. Along the path,
    /// every intermediate slot that is missing, empty-like or not a table is
    /// replaced with an empty table first.
    pub fn set(&mut self, key: impl Into<KeyExpr>, value: impl Into<Value>) -> &mut Self {
        let path = resolve(key);
        match path.split_last() {
            None => {
                self.items.push(value.into());
            }
            Some((parents, leaf)) => {
                let mut table = &mut self.items;
                for segment in parents {
                    table = table.child_table_or_reset(segment);
                }
                table.insert(leaf.clone(), value.into());
            }
        }
        self
    }

    /// Returns true if `key` is a root-level key.
    ///
    /// Dots are not followed. Floats are turned into their string form
    /// first. Without `strict`, `"1"` and `1.0` find the key `1`; with
    /// `strict`, a string or float only finds a string key. Sequences and
    /// the root are never keys.
    pub fn exists(&self, key: impl Into<KeyExpr>, strict: bool) -> bool {
        match key.into() {
            KeyExpr::Text(raw) if strict => self.items.contains_key(&Key::Str(raw)),
            KeyExpr::Float(f) if strict => self.items.contains_key(&Key::Str(float_text(f))),
            expr => expr
                .direct_key()
                .is_some_and(|direct| self.items.contains_key(&direct)),
        }
    }

    /// Sets `key` only when reading it yields null.
    pub fn add(&mut self, key: impl Into<KeyExpr>, value: impl Into<Value>) -> &mut Self {
        let expr = key.into();
        if self.get(expr.clone(), Value::Null).is_null() {
            self.set(expr, value);
        }
        self
    }

    /// Removes `key`.
    ///
    /// The root expression clears everything. A sequence is a batch of
    /// independent keys, each tried first as a root key and then as a dotted
    /// path. A path whose intermediate slots are not all tables is left
    /// alone.
    pub fn remove(&mut self, key: impl Into<KeyExpr>) -> &mut Self {
        let expr = key.into();
        if expr.is_root() {
            self.items.clear();
            return self;
        }
        for member in expr.into_batch() {
            self.remove_one(member);
        }
        self
    }

    fn remove_one(&mut self, expr: KeyExpr) {
        if let Some(direct) = expr.direct_key() {
            if self.items.remove(&direct).is_some() {
                return;
            }
        }

        let path = resolve(expr);
        let Some((parents, leaf)) = path.split_last() else {
            return;
        };
        let mut table = &mut self.items;
        for segment in parents {
            match table.get_mut(segment) {
                Some(Value::Table(child)) => table = child,
                _ => {
                    debug!(
                        path = %path,
                        segment = %segment,
                        "Nothing to remove: path leaves the tree"
                    );
                    return;
                }
            }
        }
        table.remove(leaf);
    }

    /// Returns true if every key of the batch is present.
    ///
    /// A single expression is a batch of one. An empty container, an empty
    /// batch, an empty string or the root all answer false.
    pub fn has(&self, key: impl Into<KeyExpr>) -> bool {
        let expr = key.into();
        if self.items.is_empty() || expr.is_root() {
            return false;
        }
        let batch = expr.into_batch();
        !batch.is_empty() && batch.into_iter().all(|member| self.has_one(member))
    }

    fn has_one(&self, expr: KeyExpr) -> bool {
        if matches!(&expr, KeyExpr::Text(s) if s.is_empty()) {
            return false;
        }
        if let Some(direct) = expr.direct_key() {
            if self.items.contains_key(&direct) {
                return true;
            }
        }
        self.walk(resolve(expr).segments()).is_some()
    }

    /// Walks `segments` from the root, viewing each value on the way as a
    /// table. The root itself is not a value, so the empty walk finds
    /// nothing.
    fn walk(&self, segments: &[Key]) -> Option<&Value> {
        let (first, rest) = segments.split_first()?;
        let mut node = self.items.get(first)?;
        for segment in rest {
            node = node.child(segment)?;
        }
        Some(node)
    }

    /// Raw lookup of a path, with no default and no unwrapping.
    pub(crate) fn lookup_path(&self, path: &Path) -> Option<Value> {
        if path.is_root() {
            return Some(self.to_value());
        }
        self.walk(path.segments()).cloned()
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encoded = serde_json::to_string(&self.items).map_err(|_| fmt::Error)?;
        f.write_str(&encoded)
    }
}

impl From<Table> for Container {
    fn from(table: Table) -> Self {
        Container::from_table(table)
    }
}

impl From<Value> for Container {
    fn from(value: Value) -> Self {
        Container::from_value(value)
    }
}

impl From<Container> for Value {
    fn from(container: Container) -> Self {
        Value::Table(container.items)
    }
}

impl From<Container> for Table {
    fn from(container: Container) -> Self {
        container.items
    }
}
