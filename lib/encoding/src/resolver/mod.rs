//! Maps datatype IRIs to the compact [DatatypeHandle]s that are embedded into extension keys.

mod mem;

pub use mem::MemHandleTable;

use crate::IvResult;
use rdf_iv_model::{DatatypeHandle, NamedNode, NamedNodeRef};
use std::fmt::Debug;
use std::sync::Arc;

/// A cheaply clonable reference to a [DatatypeResolver].
pub type DatatypeResolverRef = Arc<dyn DatatypeResolver>;

/// Assigns handles to datatype IRIs.
///
/// A resolver is owned by a namespace. Once a handle has been assigned to an IRI, the mapping must
/// never change, as the handle is persisted in the keys of the namespace.
pub trait DatatypeResolver: Debug + Send + Sync {
    /// Returns the handle of `datatype`. A new handle is allocated on first use.
    ///
    /// # Errors
    ///
    /// Returns [IvError::HandlesExhausted](crate::IvError::HandlesExhausted) if a new handle is
    /// required but none is left.
    fn resolve(&self, datatype: NamedNodeRef<'_>) -> IvResult<DatatypeHandle>;

    /// Returns the datatype IRI that `handle` has been assigned to, if any.
    fn lookup(&self, handle: DatatypeHandle) -> Option<NamedNode>;
}
