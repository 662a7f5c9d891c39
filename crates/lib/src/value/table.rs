//! Insertion-ordered tables.
//!
//! [`Table`] is the single branch type of the nested tree. It plays both
//! roles a nested document needs: a list is a table whose keys are `0..n`
//! in order, a map is anything else. Keeping one type means every write can
//! turn a list into a map (or back) without conversion.

use std::{cmp::Ordering, collections::HashMap, fmt};

use super::{Key, Value};

/// An insertion-ordered mapping from [`Key`] to [`Value`].
///
/// Besides the entries, a table remembers the next free integer index: one
/// past the largest integer key ever inserted. [`Table::push`] appends at
/// that index, and removing entries does not lower it. Once `i64::MAX` has
/// been used there is no free index left and pushes are refused.
///
/// Equality compares entries in order and ignores the next free index.
#[derive(Clone)]
pub struct Table {
    entries: Vec<(Key, Value)>,
    index: HashMap<Key, usize>,
    next_index: Option<i64>,
}

impl Default for Table {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
            next_index: Some(0),
        }
    }
}

impl Table {
    /// Creates an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty table with room for `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
            next_index: Some(0),
        }
    }

    /// Builds a list from values, keyed `0..n`.
    pub fn from_values<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> Self {
        let mut table = Table::new();
        for value in values {
            table.push(value.into());
        }
        table
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The index the next [`Table::push`] will use, or `None` once
    /// `i64::MAX` is taken.
    pub fn next_index(&self) -> Option<i64> {
        self.next_index
    }

    /// Returns true if the keys are exactly `0..n` in order.
    ///
    /// The empty table is a list.
    pub fn is_list(&self) -> bool {
        self.entries
            .iter()
            .enumerate()
            .all(|(position, (key, _))| *key == Key::Int(position as i64))
    }

    /// Returns true if the table is not a list.
    pub fn is_assoc(&self) -> bool {
        !self.is_list()
    }

    pub fn contains_key(&self, key: &Key) -> bool {
        self.index.contains_key(key)
    }

    pub fn get(&self, key: &Key) -> Option<&Value> {
        self.index.get(key).map(|&position| &self.entries[position].1)
    }

    pub fn get_mut(&mut self, key: &Key) -> Option<&mut Value> {
        match self.index.get(key) {
            Some(&position) => Some(&mut self.entries[position].1),
            None => None,
        }
    }

    /// Position of a key in insertion order
    pub fn position(&self, key: &Key) -> Option<usize> {
        self.index.get(key).copied()
    }

    /// Inserts a value, returning the previous one.
    ///
    /// Replacing an existing key keeps its position; new keys go last.
    pub fn insert(&mut self, key: Key, value: Value) -> Option<Value> {
        if let Some(&position) = self.index.get(&key) {
            return Some(std::mem::replace(&mut self.entries[position].1, value));
        }
        if let (Key::Int(n), Some(next)) = (&key, self.next_index) {
            if *n >= next {
                self.next_index = n.checked_add(1);
            }
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
        None
    }

    /// Appends a value at the next free index and returns its key.
    ///
    /// When no free index is left the value is dropped and `None` is
    /// returned; an existing entry is never replaced.
    pub fn push(&mut self, value: Value) -> Option<Key> {
        let Some(next) = self.next_index else {
            tracing::debug!(
                dropped = value.type_name(),
                "Cannot append: the next integer index is already taken"
            );
            return None;
        };
        let key = Key::Int(next);
        self.insert(key.clone(), value);
        Some(key)
    }

    /// Removes a key, shifting later entries forward.
    pub fn remove(&mut self, key: &Key) -> Option<Value> {
        let position = self.index.remove(key)?;
        let (_, value) = self.entries.remove(position);
        self.reindex_from(position);
        Some(value)
    }

    /// Removes every entry and resets the next free index.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
        self.next_index = Some(0);
    }

    /// Keeps only the entries for which `keep` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(&Key, &Value) -> bool) {
        self.entries.retain(|(key, value)| keep(key, value));
        self.rebuild_index();
    }

    /// Reorders entries with a comparator over `(key, value)` pairs.
    ///
    /// The sort is stable.
    pub fn sort_entries_by(
        &mut self,
        mut compare: impl FnMut(&(Key, Value), &(Key, Value)) -> Ordering,
    ) {
        self.entries.sort_by(|a, b| compare(a, b));
        self.rebuild_index();
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&Key, &Value)> + ExactSizeIterator {
        self.entries.iter().map(|(key, value)| (key, value))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&Key, &mut Value)> {
        self.entries.iter_mut().map(|entry| (&entry.0, &mut entry.1))
    }

    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &Key> + ExactSizeIterator {
        self.entries.iter().map(|(key, _)| key)
    }

    pub fn values(&self) -> impl DoubleEndedIterator<Item = &Value> + ExactSizeIterator {
        self.entries.iter().map(|(_, value)| value)
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut Value> {
        self.entries.iter_mut().map(|(_, value)| value)
    }

    /// First entry in insertion order
    pub fn first(&self) -> Option<(&Key, &Value)> {
        self.entries.first().map(|(key, value)| (key, value))
    }

    /// Last entry in insertion order
    pub fn last(&self) -> Option<(&Key, &Value)> {
        self.entries.last().map(|(key, value)| (key, value))
    }

    /// Returns a list of the values, renumbered from zero.
    pub fn to_list(&self) -> Table {
        Table::from_values(self.values().cloned())
    }

    /// Returns a copy with integer keys renumbered from zero.
    ///
    /// String keys keep their place.
    pub fn renumbered(&self) -> Table {
        let mut table = Table::with_capacity(self.len());
        for (key, value) in self.iter() {
            match key {
                Key::Int(_) => {
                    table.push(value.clone());
                }
                Key::Str(_) => {
                    table.insert(key.clone(), value.clone());
                }
            }
        }
        table
    }

    /// Returns the table reached by `key`, replacing whatever is there with
    /// an empty table unless it already is a non-empty table.
    ///
    /// This is the creation-on-write step of dotted writes: any scalar, null,
    /// falsy value or empty table in the way is overwritten.
    pub(crate) fn child_table_or_reset(&mut self, key: &Key) -> &mut Table {
        let keep = matches!(self.get(key), Some(Value::Table(table)) if !table.is_empty());
        if !keep {
            if let Some(old) = self.get(key).filter(|old| !old.is_empty_like()) {
                tracing::debug!(
                    key = %key,
                    replaced = old.type_name(),
                    "Overwriting non-table value to create nested path"
                );
            }
            self.insert(key.clone(), Value::Table(Table::new()));
        }
        match self.get_mut(key) {
            Some(Value::Table(table)) => table,
            _ => unreachable!("slot holds a table after reset"),
        }
    }

    fn reindex_from(&mut self, start: usize) {
        for (position, (key, _)) in self.entries.iter().enumerate().skip(start) {
            if let Some(slot) = self.index.get_mut(key) {
                *slot = position;
            }
        }
    }

    fn rebuild_index(&mut self) {
        self.index.clear();
        for (position, (key, _)) in self.entries.iter().enumerate() {
            self.index.insert(key.clone(), position);
        }
    }
}

impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl fmt::Debug for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl FromIterator<(Key, Value)> for Table {
    fn from_iter<T: IntoIterator<Item = (Key, Value)>>(iter: T) -> Self {
        let mut table = Table::new();
        for (key, value) in iter {
            table.insert(key, value);
        }
        table
    }
}

impl IntoIterator for Table {
    type Item = (Key, Value);
    type IntoIter = std::vec::IntoIter<(Key, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Builds a [`Table`] from `key => value` pairs.
///
/// ```
/// # use dotstore::{table, Key, Value};
/// let colors = table! { "red" => "#f00", 0 => "first" };
/// assert_eq!(colors.get(&Key::from("red")), Some(&Value::from("#f00")));
/// assert_eq!(colors.get(&Key::Int(0)), Some(&Value::from("first")));
/// ```
#[macro_export]
macro_rules! table {
    () => {
        $crate::Table::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut table = $crate::Table::new();
        $(
            table.insert($crate::Key::from($key), $crate::Value::from($value));
        )+
        table
    }};
}

/// Builds a list [`Table`] keyed `0..n`.
///
/// ```
/// # use dotstore::list;
/// let langs = list!["html", "css"];
/// assert!(langs.is_list());
/// assert_eq!(langs.len(), 2);
/// ```
#[macro_export]
macro_rules! list {
    () => {
        $crate::Table::new()
    };
    ($($value:expr),+ $(,)?) => {{
        let mut table = $crate::Table::new();
        $(
            table.push($crate::Value::from($value));
        )+
        table
    }};
}
