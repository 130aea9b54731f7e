mod error;
mod handle;
mod term_id;
mod value;
pub mod vocab;
mod xsd;

pub use error::*;
pub use handle::*;
pub use term_id::*;
pub use value::*;
pub use xsd::*;

// Re-export some oxrdf types.
pub use oxrdf::{Literal, LiteralRef, NamedNode, NamedNodeRef};
