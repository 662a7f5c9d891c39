//! Sorting. Every sort returns a new container, keeps each value under its
//! key and is stable.

use std::cmp::Ordering;

use super::{Container, ContainerError};
use crate::value::{
    Key, SortFlag, Value,
    compare::{compare_keys, compare_values, ensure_sortable},
};

impl Container {
    /// Sorts by value, ascending, under `flag`.
    ///
    /// # Errors
    /// Returns [`ContainerError::InvalidArgument`] when the values cannot be
    /// compared under `flag`: tables mixed with scalars, or any table with
    /// [`SortFlag::Numeric`] or [`SortFlag::String`].
    pub fn sort(&self, flag: SortFlag) -> Result<Container, ContainerError> {
        self.sorted_values(flag, false)
    }

    /// Sorts by value, descending, under `flag`.
    ///
    /// # Errors
    /// Fails like [`Container::sort`].
    pub fn sort_desc(&self, flag: SortFlag) -> Result<Container, ContainerError> {
        self.sorted_values(flag, true)
    }

    /// Sorts by value with a caller comparator.
    pub fn sort_by(&self, mut compare: impl FnMut(&Value, &Value) -> Ordering) -> Container {
        let mut items = self.items.clone();
        items.sort_entries_by(|(_, a), (_, b)| compare(a, b));
        Container::from_table(items)
    }

    /// Sorts by key under `flag`.
    pub fn sort_keys(&self, flag: SortFlag, descending: bool) -> Container {
        let mut items = self.items.clone();
        items.sort_entries_by(|(a, _), (b, _)| {
            let ordering = compare_keys(a, b, flag);
            if descending {
                ordering.reverse()
            } else {
                ordering
            }
        });
        Container::from_table(items)
    }

    /// Sorts by key, descending, under `flag`.
    pub fn sort_keys_desc(&self, flag: SortFlag) -> Container {
        self.sort_keys(flag, true)
    }

    /// Sorts by key with a caller comparator.
    pub fn sort_keys_using(&self, mut compare: impl FnMut(&Key, &Key) -> Ordering) -> Container {
        let mut items = self.items.clone();
        items.sort_entries_by(|(a, _), (b, _)| compare(a, b));
        Container::from_table(items)
    }

    fn sorted_values(&self, flag: SortFlag, descending: bool) -> Result<Container, ContainerError> {
        ensure_sortable(self.items.values(), flag)?;
        let mut items = self.items.clone();
        items.sort_entries_by(|(_, a), (_, b)| {
            let ordering = compare_values(a, b, flag).unwrap_or(Ordering::Equal);
            if descending {
                ordering.reverse()
            } else {
                ordering
            }
        });
        Ok(Container::from_table(items))
    }
}
