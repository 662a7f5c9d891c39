//!
//! dotstore: nested key/value containers with dot-path addressing.
//!
//! ## Core Concepts
//!
//! * **Values (`value::Value`)**: A node of the nested tree: null, bool, integer, float, text, or a `Table`.
//! * **Tables (`value::Table`)**: Insertion-ordered maps from integer or string `Key`s to values. A list is a table keyed `0..n`.
//! * **Paths (`path::Path`)**: The segments a key expression resolves to. `"a.b.c"` walks three levels; a pre-split sequence is used verbatim.
//! * **Containers (`container::Container`)**: Own a root table and read, write, test and remove entries by path, with creation-on-write for missing levels. Bulk operations (diff, merge, replace, union, intersect, unique, sorting) work on whole tables.
//! * **Configuration (`config::Config`)**: A container fed by layered sources, with property-style access where `_` stands for `.`.
//! * **Codec (`codec::json`)**: JSON decoding and encoding of containers.

pub mod codec;
pub mod config;
pub mod container;
pub mod path;
pub mod traits;
pub mod value;

pub use codec::CodecError;
pub use config::{Config, ConfigSlot};
pub use container::{Container, ContainerError, Diff, KeyComparator};
pub use path::{KeyExpr, Path};
pub use traits::Lookup;
pub use value::{Key, SortFlag, Table, Value};

/// Result type used throughout the dotstore library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the dotstore library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Structured container errors from the container module
    #[error(transparent)]
    Container(container::ContainerError),

    /// Structured codec errors from the codec module
    #[error(transparent)]
    Codec(codec::CodecError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Container(_) => "container",
            Error::Codec(_) => "codec",
        }
    }

    /// Check if this error indicates a file was not found.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Codec(codec_err) => codec_err.is_not_found(),
            _ => false,
        }
    }

    /// Check if this error is an invalid argument to a container operation.
    pub fn is_invalid_argument(&self) -> bool {
        match self {
            Error::Container(container_err) => container_err.is_invalid_argument(),
            _ => false,
        }
    }

    /// Check if this error is a type mismatch.
    pub fn is_type_error(&self) -> bool {
        match self {
            Error::Container(container_err) => container_err.is_type_error(),
            _ => false,
        }
    }

    /// Check if this error came from decoding or encoding.
    pub fn is_codec_error(&self) -> bool {
        matches!(self, Error::Codec(_))
    }

    /// Check if this error is I/O related.
    pub fn is_io_error(&self) -> bool {
        match self {
            Error::Codec(codec_err) => codec_err.is_io_error(),
            _ => false,
        }
    }
}
