//! Layered configuration built on a [`Container`].
//!
//! A [`Config`] is an explicit object: create it, merge sources into it in
//! order of precedence, and read settings back with dotted paths. Nothing is
//! global; [`ConfigSlot`] gives a long-lived owner the lazily created,
//! explicitly torn-down lifecycle a shared configuration needs.
//!
//! ```rust
//! use dotstore::{Config, Value, table};
//!
//! let mut config = Config::from_value(table! {
//!     "database" => table! { "host" => "localhost", "port" => 3306 },
//! });
//! config.merge(table! { "database" => table! { "port" => 3307 } });
//!
//! assert_eq!(config.get("database.host", Value::Null), "localhost");
//! assert_eq!(config.get("database.port", Value::Null), 3307);
//! // Property names use `_` where paths use `.`
//! assert_eq!(config.property("database_port"), 3307);
//! assert_eq!(config.layers(), 2);
//! ```

use std::path::Path as FsPath;

use tracing::{debug, info};

use crate::{
    Result,
    codec::json,
    container::Container,
    path::{KeyExpr, SEPARATOR},
    value::{Key, Table, Value},
};

/// Separator property names use in place of [`SEPARATOR`].
pub const PROPERTY_SEPARATOR: char = '_';

/// A configuration store fed by one or more layers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    store: Container,
    layers: usize,
}

impl Config {
    /// Creates an empty configuration with no layers
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration with `value` as its first layer.
    pub fn from_value(value: impl Into<Value>) -> Self {
        Self {
            store: Container::from_value(value),
            layers: 1,
        }
    }

    /// Creates a configuration from a JSON document.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let store = json::decode_str(text)?;
        Ok(Self { store, layers: 1 })
    }

    /// Creates a configuration from a JSON file.
    pub fn load_json_file(path: impl AsRef<FsPath>) -> Result<Self> {
        let store = json::load_path(path)?;
        Ok(Self { store, layers: 1 })
    }

    /// Overlays `layer` on the current settings.
    ///
    /// Later layers win. Where both sides hold a table the two are merged
    /// entry by entry, so a layer only needs the settings it changes.
    pub fn merge(&mut self, layer: impl Into<Value>) -> &mut Self {
        let layer = layer.into().into_table();
        let merged = self.store.replace(true, &[layer]);
        self.store = Container::from_table(merged);
        self.layers += 1;
        info!(
            layers = self.layers,
            entries = self.store.len(),
            "Merged configuration layer"
        );
        self
    }

    /// Overlays a JSON file on the current settings.
    pub fn merge_json_file(&mut self, path: impl AsRef<FsPath>) -> Result<&mut Self> {
        let layer = json::load_path(path)?;
        Ok(self.merge(layer.into_inner()))
    }

    /// Number of layers merged so far
    pub fn layers(&self) -> usize {
        self.layers
    }

    /// Reads a setting, or `default` when it is missing.
    pub fn get(&self, key: impl Into<KeyExpr>, default: impl Into<Value>) -> Value {
        self.store.get(key, default)
    }

    /// Writes a setting.
    pub fn set(&mut self, key: impl Into<KeyExpr>, value: impl Into<Value>) -> &mut Self {
        self.store.set(key, value);
        self
    }

    pub fn has(&self, key: impl Into<KeyExpr>) -> bool {
        self.store.has(key)
    }

    /// Reads a setting by property name.
    ///
    /// `database_username` first reads `database.username`, and falls back
    /// to the literal `database_username` key when that path is missing.
    pub fn property(&self, name: &str) -> Value {
        match property_alias(name) {
            Some(alias) if self.store.has(alias.as_str()) => self.store.value(alias),
            _ => self.store.value(name),
        }
    }

    /// Writes a setting by property name.
    ///
    /// The dotted form is used when its first segment is already a table,
    /// so `database_password` updates `database.password` inside an existing
    /// `database` section; otherwise the literal name is written.
    pub fn set_property(&mut self, name: &str, value: impl Into<Value>) -> &mut Self {
        match property_alias(name) {
            Some(alias) if self.section_exists(&alias) => {
                self.store.set(alias, value);
            }
            _ => {
                debug!(property = name, "Writing property under its literal name");
                self.store.set(KeyExpr::Segments(vec![Key::from(name)]), value);
            }
        }
        self
    }

    /// All settings
    pub fn all(&self) -> &Table {
        self.store.all()
    }

    /// The underlying container
    pub fn container(&self) -> &Container {
        &self.store
    }

    fn section_exists(&self, alias: &str) -> bool {
        alias
            .split(SEPARATOR)
            .next()
            .and_then(|first| self.store.all().get(&Key::parse(first)))
            .is_some_and(Value::is_table)
    }
}

/// The dotted path a property name stands for, if it differs from the name.
fn property_alias(name: &str) -> Option<String> {
    name.contains(PROPERTY_SEPARATOR)
        .then(|| name.replace(PROPERTY_SEPARATOR, &SEPARATOR.to_string()))
}

/// Owner of a configuration that is created on first use and dropped on
/// request.
#[derive(Debug, Default)]
pub struct ConfigSlot {
    config: Option<Config>,
}

impl ConfigSlot {
    /// Creates an empty slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the configuration, creating it with `init` if the slot is empty.
    pub fn get_or_init(&mut self, init: impl FnOnce() -> Config) -> &mut Config {
        self.config.get_or_insert_with(|| {
            info!("Initializing configuration");
            init()
        })
    }

    pub fn get(&self) -> Option<&Config> {
        self.config.as_ref()
    }

    pub fn get_mut(&mut self) -> Option<&mut Config> {
        self.config.as_mut()
    }

    pub fn is_initialized(&self) -> bool {
        self.config.is_some()
    }

    /// Empties the slot, returning the configuration it held.
    pub fn teardown(&mut self) -> Option<Config> {
        let config = self.config.take();
        if config.is_some() {
            info!("Tearing down configuration");
        }
        config
    }
}
