//! Encodes RDF values into *internal values* (IVs): compact byte sequences that can be used as
//! keys of a sorted index.
//!
//! The byte order of two IVs of the same datatype matches the natural order of the values, so an
//! index can answer range scans without decoding its keys. Every IV starts with a kind tag that
//! identifies its decoder. Custom datatypes are supported via [extension::Extension]s, which embed
//! a compact [DatatypeHandle](rdf_iv_model::DatatypeHandle) instead of the datatype IRI.

pub mod codec;
mod error;
pub mod extension;
mod internal_value;
pub mod resolver;
pub mod verify;

pub use codec::{CodecOptions, IvCodec, KeyReader};
pub use error::*;
pub use internal_value::InternalValue;
