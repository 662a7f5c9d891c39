//! Whole-table operations: differences, merges, replacement and set-like
//! combinations.
//!
//! Values are matched by their string form unless noted, so `1` and `"1"`
//! count as the same value.

use std::{cmp::Ordering, fmt, iter, mem};

use tracing::debug;

use super::Container;
use crate::value::{
    Key, SortFlag, Table, Value,
    compare::equal_under,
};

/// A key comparator for the user-defined difference modes.
pub type KeyComparator<'a> = &'a dyn Fn(&Key, &Key) -> Ordering;

/// How [`Container::diff`] decides that an entry also occurs elsewhere.
#[derive(Clone, Copy)]
pub enum Diff<'a> {
    /// The value occurs anywhere in another table
    Values,
    /// Another table has the same key with the same value
    Assoc,
    /// Another table has the same key
    Keys,
    /// Another table has a key the comparator calls equal
    KeysUsing(KeyComparator<'a>),
    /// Another table has the same value under a key the comparator calls equal
    AssocUsing(KeyComparator<'a>),
}

impl<'a> Diff<'a> {
    /// Parses a mode name: `diff`, `assoc`, `key`, `ukey` or `uassoc`.
    ///
    /// The comparator modes need `comparator`; without one, or for an unknown
    /// name, there is no mode.
    pub fn named(name: &str, comparator: Option<KeyComparator<'a>>) -> Option<Self> {
        match name {
            "diff" => Some(Diff::Values),
            "assoc" => Some(Diff::Assoc),
            "key" => Some(Diff::Keys),
            "ukey" => comparator.map(Diff::KeysUsing),
            "uassoc" => comparator.map(Diff::AssocUsing),
            _ => None,
        }
    }

    /// The mode's name as accepted by [`Diff::named`]
    pub fn name(&self) -> &'static str {
        match self {
            Diff::Values => "diff",
            Diff::Assoc => "assoc",
            Diff::Keys => "key",
            Diff::KeysUsing(_) => "ukey",
            Diff::AssocUsing(_) => "uassoc",
        }
    }

    fn occurs_in(&self, key: &Key, value: &Value, other: &Table) -> bool {
        match self {
            Diff::Values => {
                let text = value.to_text();
                other.values().any(|candidate| candidate.to_text() == text)
            }
            Diff::Assoc => other
                .get(key)
                .is_some_and(|candidate| candidate.to_text() == value.to_text()),
            Diff::Keys => other.contains_key(key),
            Diff::KeysUsing(compare) => other
                .keys()
                .any(|candidate| compare(key, candidate) == Ordering::Equal),
            Diff::AssocUsing(compare) => {
                let text = value.to_text();
                other.iter().any(|(candidate_key, candidate)| {
                    candidate.to_text() == text && compare(key, candidate_key) == Ordering::Equal
                })
            }
        }
    }
}

impl fmt::Debug for Diff<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Diff").field(&self.name()).finish()
    }
}

impl Container {
    /// Returns the entries that occur in none of `others`, keys preserved.
    ///
    /// ```
    /// # use dotstore::{Container, Diff, table};
    /// let store = Container::from_table(table! {
    ///     "a" => "green", "b" => "brown", "c" => "blue", 0 => "red",
    /// });
    /// let other = table! { "a" => "green", 0 => "yellow", 1 => "red" };
    ///
    /// assert_eq!(
    ///     store.diff(Diff::Values, &[other]),
    ///     table! { "b" => "brown", "c" => "blue" },
    /// );
    /// ```
    pub fn diff(&self, mode: Diff<'_>, others: &[Table]) -> Table {
        self.items
            .iter()
            .filter(|(key, value)| !others.iter().any(|other| mode.occurs_in(key, value, other)))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// [`Container::diff`] with the mode given by name.
    ///
    /// An unknown name, or a comparator mode without a comparator, gives an
    /// empty table.
    pub fn diff_named(
        &self,
        name: &str,
        comparator: Option<KeyComparator<'_>>,
        others: &[Table],
    ) -> Table {
        match Diff::named(name, comparator) {
            Some(mode) => self.diff(mode, others),
            None => {
                debug!(mode = name, "Unusable diff mode, returning no entries");
                Table::new()
            }
        }
    }

    /// Merges `others` after the receiver.
    ///
    /// Integer keys are renumbered from zero in order; a string key takes
    /// the value of the last table holding it.
    pub fn merge(&self, others: &[Table]) -> Table {
        let mut merged = Table::new();
        for table in iter::once(&self.items).chain(others) {
            for (key, value) in table.iter() {
                match key {
                    Key::Int(_) => {
                        merged.push(value.clone());
                    }
                    Key::Str(_) => {
                        merged.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        merged
    }

    /// Merges `others` after the receiver, collecting colliding values.
    ///
    /// Integer keys are appended. When a string key collides, the existing
    /// value becomes a list (null empty, a scalar a list of itself); an
    /// incoming table is then merged into it the same way and an incoming
    /// scalar is appended.
    ///
    /// ```
    /// # use dotstore::{Container, list, table};
    /// let store = Container::from_table(table! { "size" => 5 });
    /// let merged = store.merge_recursive(&[table! { "size" => 10 }]);
    /// assert_eq!(merged, table! { "size" => list![5, 10] });
    /// ```
    pub fn merge_recursive(&self, others: &[Table]) -> Table {
        let mut merged = Table::new();
        for table in iter::once(&self.items).chain(others) {
            merge_recursive_into(&mut merged, table);
        }
        merged
    }

    /// Overwrites the receiver's keys with the values `other` has for them.
    ///
    /// Keys only `other` has are ignored. An incoming table extends the
    /// existing value (viewed as a table) recursively instead of replacing
    /// it. Returns the updated tree.
    pub fn extend(&mut self, other: &Table) -> &Table {
        extend_into(&mut self.items, other);
        &self.items
    }

    /// Returns the receiver with every entry of `replacements` written over
    /// it, keys preserved.
    ///
    /// With `recursive`, a table written over a table replaces it entry by
    /// entry instead of whole.
    pub fn replace(&self, recursive: bool, replacements: &[Table]) -> Table {
        let mut replaced = self.items.clone();
        for replacement in replacements {
            if recursive {
                replace_recursive_into(&mut replaced, replacement);
            } else {
                for (key, value) in replacement.iter() {
                    replaced.insert(key.clone(), value.clone());
                }
            }
        }
        replaced
    }

    /// The receiver plus the entries of `other` under keys it lacks.
    pub fn union(&self, other: &Table) -> Container {
        let mut items = self.items.clone();
        for (key, value) in other.iter() {
            if !items.contains_key(key) {
                items.insert(key.clone(), value.clone());
            }
        }
        Container::from_table(items)
    }

    /// The receiver's entries whose value occurs in `other`.
    pub fn intersect(&self, other: &Table) -> Container {
        let texts: Vec<String> = other.values().map(Value::to_text).collect();
        let mut items = self.items.clone();
        items.retain(|_, value| texts.contains(&value.to_text()));
        Container::from_table(items)
    }

    /// The receiver's entries whose key occurs in `other`.
    pub fn intersect_by_keys(&self, other: &Table) -> Container {
        let mut items = self.items.clone();
        items.retain(|key, _| other.contains_key(key));
        Container::from_table(items)
    }

    /// Drops every value equal to an earlier one under `flag`, keeping keys.
    ///
    /// [`SortFlag::String`] compares string forms, which is what most
    /// callers want.
    pub fn unique(&mut self, flag: SortFlag) -> &mut Self {
        let mut kept: Vec<Value> = Vec::with_capacity(self.items.len());
        self.items.retain(|_, value| {
            if kept.iter().any(|seen| equal_under(seen, value, flag)) {
                false
            } else {
                kept.push(value.clone());
                true
            }
        });
        self
    }
}

fn merge_recursive_into(target: &mut Table, source: &Table) {
    for (key, value) in source.iter() {
        match key {
            Key::Int(_) => {
                target.push(value.clone());
            }
            Key::Str(_) => match target.get_mut(key) {
                Some(existing) => {
                    let mut collected = mem::take(existing).into_table();
                    match value {
                        Value::Table(incoming) => merge_recursive_into(&mut collected, incoming),
                        scalar => {
                            collected.push(scalar.clone());
                        }
                    }
                    *existing = Value::Table(collected);
                }
                None => {
                    target.insert(key.clone(), value.clone());
                }
            },
        }
    }
}

fn extend_into(target: &mut Table, source: &Table) {
    for (key, value) in source.iter() {
        let Some(existing) = target.get_mut(key) else {
            continue;
        };
        match value {
            Value::Table(incoming) => {
                let mut extended = mem::take(existing).into_table();
                extend_into(&mut extended, incoming);
                *existing = Value::Table(extended);
            }
            other => *existing = other.clone(),
        }
    }
}

fn replace_recursive_into(target: &mut Table, source: &Table) {
    for (key, value) in source.iter() {
        if let (Some(Value::Table(existing)), Value::Table(incoming)) =
            (target.get_mut(key), value)
        {
            replace_recursive_into(existing, incoming);
            continue;
        }
        target.insert(key.clone(), value.clone());
    }
}
