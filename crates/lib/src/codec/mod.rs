//! Encoding containers to and from external text formats.
//!
//! JSON is the only format. Decoding keeps object key order and turns keys
//! spelling integers into integer keys; encoding writes lists as arrays and
//! every other table as an object.

pub mod errors;
pub mod json;

pub use errors::CodecError;
