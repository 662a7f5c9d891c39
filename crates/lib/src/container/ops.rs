//! Everyday table operations: building, querying, slicing and reshaping.
//!
//! Operations that read return new tables; `push`, `pull`, `prepend` and
//! `shuffle` change the container.

use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom, thread_rng};
use tracing::debug;

use super::{Container, ContainerError};
use crate::{
    path::KeyExpr,
    value::{Key, Table, Value, compare::loose_eq},
};

impl Container {
    /// A list of `count` copies of `value`, keyed from `start`.
    ///
    /// # Errors
    /// Keys past `i64::MAX` are an invalid argument.
    pub fn fill(
        start: i64,
        count: usize,
        value: impl Into<Value>,
    ) -> Result<Table, ContainerError> {
        if count == 0 {
            return Ok(Table::new());
        }
        let last = i64::try_from(count - 1)
            .ok()
            .and_then(|offset| start.checked_add(offset))
            .ok_or_else(|| {
                ContainerError::invalid_argument(
                    "fill",
                    format!("{count} keys starting at {start} do not fit in an integer key"),
                )
            })?;
        let value = value.into();
        Ok((start..=last)
            .map(|key| (Key::Int(key), value.clone()))
            .collect())
    }

    /// A table mapping every key in `keys` to `value`.
    pub fn fill_keys<K: Into<Key>>(
        keys: impl IntoIterator<Item = K>,
        value: impl Into<Value>,
    ) -> Table {
        let value = value.into();
        keys.into_iter()
            .map(|key| (key.into(), value.clone()))
            .collect()
    }

    /// Views any value as a table: null is empty, a scalar is a list of itself.
    pub fn wrap(value: impl Into<Value>) -> Table {
        value.into().into_table()
    }

    /// Returns true if some value equals `needle`; loosely unless `strict`.
    pub fn contains(&self, needle: impl Into<Value>, strict: bool) -> bool {
        let needle = needle.into();
        self.items
            .values()
            .any(|value| values_match(value, &needle, strict))
    }

    /// The root keys in order
    pub fn keys(&self) -> Vec<Key> {
        self.items.keys().cloned().collect()
    }

    /// The root values as a list
    pub fn values(&self) -> Table {
        self.items.to_list()
    }

    pub fn first(&self) -> Option<&Value> {
        self.items.first().map(|(_, value)| value)
    }

    pub fn last(&self) -> Option<&Value> {
        self.items.last().map(|(_, value)| value)
    }

    /// Number of root entries
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Counts how often each value occurs.
    ///
    /// Only integers and text can be counted; other values are skipped.
    pub fn count_values(&self) -> Table {
        let mut counts = Table::new();
        for value in self.items.values() {
            let Some(key) = countable_key(value) else {
                debug!(
                    kind = value.type_name(),
                    "Skipping value that cannot be counted"
                );
                continue;
            };
            let seen = counts.get(&key).and_then(Value::as_int).unwrap_or(0);
            counts.insert(key, Value::Int(seen + 1));
        }
        counts
    }

    /// Splits the entries into lists of `size`; the last may be shorter.
    ///
    /// # Errors
    /// A `size` of zero is an invalid argument.
    pub fn chunk(&self, size: usize, preserve_keys: bool) -> Result<Table, ContainerError> {
        if size == 0 {
            return Err(ContainerError::invalid_argument(
                "chunk",
                "chunk size must be at least 1",
            ));
        }
        let mut chunks = Table::new();
        let mut current = Table::new();
        for (key, value) in self.items.iter() {
            if preserve_keys {
                current.insert(key.clone(), value.clone());
            } else {
                current.push(value.clone());
            }
            if current.len() == size {
                chunks.push(Value::Table(std::mem::take(&mut current)));
            }
        }
        if !current.is_empty() {
            chunks.push(Value::Table(current));
        }
        Ok(chunks)
    }

    /// Picks one column out of a list of rows.
    ///
    /// Each table row contributes its `column` entry (the whole row when
    /// `column` is `None`), keyed by its `index` entry when it has one and
    /// appended otherwise. Rows lacking the column are skipped.
    pub fn column(&self, column: Option<&Key>, index: Option<&Key>) -> Table {
        let mut picked = Table::new();
        for row in self.items.values() {
            let Value::Table(row) = row else {
                continue;
            };
            let value = match column {
                Some(column) => match row.get(column) {
                    Some(value) => value.clone(),
                    None => continue,
                },
                None => Value::Table(row.clone()),
            };
            match index.and_then(|index| row.get(index)).and_then(countable_key) {
                Some(key) => {
                    picked.insert(key, value);
                }
                None => {
                    picked.push(value);
                }
            }
        }
        picked
    }

    /// Uses the receiver's values as keys for `values`.
    ///
    /// # Errors
    /// The two must have the same number of entries, and every receiver
    /// value must be usable as a key.
    pub fn combine(&self, values: &Table) -> Result<Table, ContainerError> {
        if self.items.len() != values.len() {
            return Err(ContainerError::invalid_argument(
                "combine",
                format!(
                    "{} keys cannot be paired with {} values",
                    self.items.len(),
                    values.len()
                ),
            ));
        }
        self.items
            .values()
            .zip(values.values())
            .map(|(raw, value)| {
                raw.to_key()
                    .map(|key| (key, value.clone()))
                    .ok_or_else(|| ContainerError::type_mismatch("key", raw))
            })
            .collect()
    }

    /// Splits into a list of keys and a list of values.
    pub fn divide(&self) -> (Table, Table) {
        let keys = Table::from_values(self.items.keys().cloned());
        (keys, self.values())
    }

    /// The entries for which `keep` returns true, keys preserved.
    pub fn filter(&self, mut keep: impl FnMut(&Key, &Value) -> bool) -> Table {
        self.items
            .iter()
            .filter(|&(key, value)| keep(key, value))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// The entries whose value is not null
    pub fn filter_not_null(&self) -> Table {
        self.filter(|_, value| !value.is_null())
    }

    /// Swaps keys and values. Values other than integers and text are skipped;
    /// a repeated value keeps the last key.
    pub fn flip(&self) -> Table {
        let mut flipped = Table::new();
        for (key, value) in self.items.iter() {
            match countable_key(value) {
                Some(new_key) => {
                    flipped.insert(new_key, Value::from(key.clone()));
                }
                None => debug!(
                    kind = value.type_name(),
                    "Skipping value that cannot be a key"
                ),
            }
        }
        flipped
    }

    /// Applies `f` to every entry, keeping keys.
    pub fn map(&self, mut f: impl FnMut(&Key, &Value) -> Value) -> Table {
        self.items
            .iter()
            .map(|(key, value)| (key.clone(), f(key, value)))
            .collect()
    }

    /// The key of the first value equal to `needle`.
    pub fn search(&self, needle: impl Into<Value>, strict: bool) -> Option<Key> {
        let needle = needle.into();
        self.items
            .iter()
            .find(|(_, value)| values_match(value, &needle, strict))
            .map(|(key, _)| key.clone())
    }

    /// The keys of every value equal to `needle`.
    pub fn search_keys(&self, needle: impl Into<Value>, strict: bool) -> Vec<Key> {
        let needle = needle.into();
        self.items
            .iter()
            .filter(|(_, value)| values_match(value, &needle, strict))
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// The entries under `keys`, in the receiver's order.
    pub fn only<K: Into<Key>>(&self, keys: impl IntoIterator<Item = K>) -> Table {
        let wanted: Vec<Key> = keys.into_iter().map(Into::into).collect();
        let mut items = self.items.clone();
        items.retain(|key, _| wanted.contains(key));
        items
    }

    /// The tree without `keys`, removed as by [`Container::remove`].
    ///
    /// The receiver is not changed.
    pub fn except(&self, keys: impl Into<KeyExpr>) -> Table {
        let mut rest = self.clone();
        rest.remove(keys);
        rest.into_inner()
    }

    /// Joins the values' string forms with `glue`, using `final_glue` before
    /// the last one when it is not empty.
    ///
    /// ```
    /// # use dotstore::{Container, list};
    /// let store = Container::from_value(list!["a", "b", "c"]);
    /// assert_eq!(store.join(", ", ""), "a, b, c");
    /// assert_eq!(store.join(", ", " and "), "a, b and c");
    /// ```
    pub fn join(&self, glue: &str, final_glue: &str) -> String {
        let texts: Vec<String> = self.items.values().map(Value::to_text).collect();
        if final_glue.is_empty() {
            return texts.join(glue);
        }
        match texts.split_last() {
            None => String::new(),
            Some((last, [])) => last.clone(),
            Some((last, rest)) => format!("{}{final_glue}{last}", rest.join(glue)),
        }
    }

    /// Pads to `len` entries with `value`: at the end for a positive `len`,
    /// at the start for a negative one.
    ///
    /// Integer keys are renumbered when padding happens.
    pub fn pad(&self, len: i64, value: impl Into<Value>) -> Table {
        let target = len.unsigned_abs() as usize;
        if target <= self.items.len() {
            return self.items.clone();
        }
        let value = value.into();
        let missing = target - self.items.len();
        if len > 0 {
            let mut padded = self.items.renumbered();
            for _ in 0..missing {
                padded.push(value.clone());
            }
            padded
        } else {
            let mut padded = Table::from_values(std::iter::repeat_n(value, missing));
            append_renumbered(&mut padded, &self.items);
            padded
        }
    }

    /// Appends `values` at the next free index and returns the new length.
    pub fn push<V: Into<Value>>(&mut self, values: impl IntoIterator<Item = V>) -> usize {
        for value in values {
            self.items.push(value.into());
        }
        self.items.len()
    }

    /// Reads `key` as [`Container::get`] does, then removes it.
    pub fn pull(&mut self, key: impl Into<KeyExpr>, default: impl Into<Value>) -> Value {
        let expr = key.into();
        let value = self.get(expr.clone(), default);
        self.remove(expr);
        value
    }

    /// Puts `value` first, renumbering integer keys.
    pub fn prepend(&mut self, value: impl Into<Value>) -> &mut Self {
        let mut items = Table::with_capacity(self.items.len() + 1);
        items.push(value.into());
        append_renumbered(&mut items, &self.items);
        self.items = items;
        self
    }

    /// Puts `value` first under `key`, dropping any later entry with that key.
    pub fn prepend_with_key(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> &mut Self {
        let key = key.into();
        let mut items = Table::with_capacity(self.items.len() + 1);
        items.insert(key.clone(), value.into());
        for (existing, value) in std::mem::take(&mut self.items) {
            if existing != key {
                items.insert(existing, value);
            }
        }
        self.items = items;
        self
    }

    /// The entries in reverse order.
    ///
    /// Without `preserve_keys`, integer keys are renumbered; string keys
    /// always stay.
    pub fn reverse(&self, preserve_keys: bool) -> Table {
        let mut reversed = Table::with_capacity(self.items.len());
        for (key, value) in self.items.iter().rev() {
            if preserve_keys || !key.is_int() {
                reversed.insert(key.clone(), value.clone());
            } else {
                reversed.push(value.clone());
            }
        }
        reversed
    }

    /// Shuffles the values into a new list, dropping keys.
    ///
    /// With a `seed` the order is reproducible.
    pub fn shuffle(&mut self, seed: Option<u64>) -> &Table {
        let mut values: Vec<Value> = std::mem::take(&mut self.items)
            .into_iter()
            .map(|(_, value)| value)
            .collect();
        match seed {
            Some(seed) => values.shuffle(&mut StdRng::seed_from_u64(seed)),
            None => values.shuffle(&mut thread_rng()),
        }
        self.items = Table::from_values(values);
        &self.items
    }
}

fn values_match(value: &Value, needle: &Value, strict: bool) -> bool {
    if strict {
        value == needle
    } else {
        loose_eq(value, needle)
    }
}

/// The key an integer or text value turns into when used as a key.
fn countable_key(value: &Value) -> Option<Key> {
    match value {
        Value::Int(_) | Value::Text(_) => value.to_key(),
        _ => None,
    }
}

fn append_renumbered(target: &mut Table, source: &Table) {
    for (key, value) in source.iter() {
        if key.is_int() {
            target.push(value.clone());
        } else {
            target.insert(key.clone(), value.clone());
        }
    }
}
