//! Read access for collaborators that only need to look settings up.
//!
//! Validators and other consumers take `impl Lookup` instead of a concrete
//! store, so they work the same against a [`Container`] or a [`Config`].

use crate::{config::Config, container::Container, path::Path};

/// Path lookup over a nested store.
///
/// # Examples
///
/// ```
/// use dotstore::{Container, Lookup, Value, path::resolve, table};
///
/// fn required_missing(store: &impl Lookup, required: &[&str]) -> Vec<String> {
///     required
///         .iter()
///         .filter(|key| !store.contains_path(&resolve(**key)))
///         .map(|key| key.to_string())
///         .collect()
/// }
///
/// let store = Container::from_table(table! { "database" => table! { "driver" => "mysql" } });
/// assert_eq!(
///     required_missing(&store, &["database.driver", "database.username"]),
///     vec!["database.username"],
/// );
/// assert_eq!(store.lookup(&resolve("database.driver")), Some(Value::from("mysql")));
/// ```
pub trait Lookup {
    /// The value stored at `path`, exactly as stored.
    ///
    /// Unlike `get`, there is no default and no unwrapping of single-element
    /// tables. The root path yields the whole tree.
    fn lookup(&self, path: &Path) -> Option<crate::Value>;

    /// Returns true if something is stored at `path`.
    fn contains_path(&self, path: &Path) -> bool {
        self.lookup(path).is_some()
    }
}

impl Lookup for Container {
    fn lookup(&self, path: &Path) -> Option<crate::Value> {
        self.lookup_path(path)
    }
}

impl Lookup for Config {
    fn lookup(&self, path: &Path) -> Option<crate::Value> {
        self.container().lookup_path(path)
    }
}
