//! JSON decoding and encoding of containers.
//!
//! ```rust
//! use dotstore::codec::json;
//!
//! let store = json::decode_str(r#"{"db": {"port": 5432}, "tags": ["a", "b"]}"#)?;
//! assert_eq!(store.value("db.port"), 5432);
//! assert_eq!(json::encode_string(&store)?, r#"{"db":{"port":5432},"tags":["a","b"]}"#);
//! # Ok::<(), dotstore::codec::CodecError>(())
//! ```

use std::{fs, path::Path};

use tracing::{debug, info};

use super::CodecError;
use crate::{container::Container, value::Value};

/// Decodes JSON text into a container; a scalar document is wrapped.
pub fn decode_str(text: &str) -> Result<Container, CodecError> {
    let value: Value = serde_json::from_str(text)?;
    Ok(Container::from_value(value))
}

/// Decodes JSON bytes into a container; a scalar document is wrapped.
pub fn decode_slice(bytes: &[u8]) -> Result<Container, CodecError> {
    let value: Value = serde_json::from_slice(bytes)?;
    Ok(Container::from_value(value))
}

/// Reads and decodes a JSON file.
///
/// # Errors
/// [`CodecError::FileNotFound`] when nothing exists at `path`,
/// [`CodecError::ReadFailed`] when it cannot be read and
/// [`CodecError::MalformedJson`] when its content does not parse.
pub fn load_path(path: impl AsRef<Path>) -> Result<Container, CodecError> {
    let path = path.as_ref();
    if !path.exists() {
        debug!(path = %path.display(), "JSON file not found");
        return Err(CodecError::file_not_found(path));
    }
    let bytes = fs::read(path).map_err(|err| CodecError::read_failed(path, &err))?;
    let container = decode_slice(&bytes)?;
    info!(path = %path.display(), entries = container.len(), "Loaded JSON document");
    Ok(container)
}

/// Encodes a container as compact JSON.
pub fn encode_string(container: &Container) -> Result<String, CodecError> {
    serde_json::to_string(container).map_err(encode_failed)
}

/// Encodes a container as indented JSON.
pub fn encode_pretty(container: &Container) -> Result<String, CodecError> {
    serde_json::to_string_pretty(container).map_err(encode_failed)
}

/// Returns true if `text` is a non-empty, well-formed JSON document.
pub fn is_valid(text: &str) -> bool {
    !text.is_empty() && serde_json::from_str::<serde::de::IgnoredAny>(text).is_ok()
}

fn encode_failed(err: serde_json::Error) -> CodecError {
    CodecError::EncodeFailed {
        reason: err.to_string(),
    }
}
