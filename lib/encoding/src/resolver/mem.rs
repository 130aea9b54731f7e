use crate::resolver::DatatypeResolver;
use crate::{IvError, IvResult};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use rdf_iv_model::{DatatypeHandle, NamedNode, NamedNodeRef};
use rustc_hash::FxHasher;
use std::hash::BuildHasherDefault;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Maintains the mapping between datatype IRIs and handles in memory.
///
/// # Handles
///
/// Handles are allocated from a counter that starts at the first handle of the table (1 by
/// default). `u64::MAX` is never allocated. Allocation happens while holding the shard lock of the
/// IRI, so concurrent first uses of the same IRI observe the same handle. Resolving an IRI that
/// already has a handle only requires a read lock on a single shard.
///
/// # Persistence
///
/// The table itself is not persisted. Use [MemHandleTable::entries] to obtain the current mapping
/// and [MemHandleTable::try_from_entries] to restore it.
#[derive(Debug)]
pub struct MemHandleTable {
    /// Contains the next free handle.
    next_handle: AtomicU64,
    /// Maps datatype IRIs to their handle.
    iri2handle: DashMap<Arc<str>, DatatypeHandle, BuildHasherDefault<FxHasher>>,
    /// Maps handles back to the datatype IRI.
    handle2iri: DashMap<DatatypeHandle, Arc<str>, BuildHasherDefault<FxHasher>>,
}

impl Default for MemHandleTable {
    fn default() -> Self {
        Self::new()
    }
}

impl MemHandleTable {
    /// The handle that is allocated first in a new table.
    pub const DEFAULT_FIRST_HANDLE: DatatypeHandle = DatatypeHandle::new(1);

    /// Creates a new empty [MemHandleTable].
    pub fn new() -> Self {
        Self::with_first_handle(Self::DEFAULT_FIRST_HANDLE)
    }

    /// Creates a new empty [MemHandleTable] that allocates handles starting at `first_handle`.
    pub fn with_first_handle(first_handle: DatatypeHandle) -> Self {
        Self {
            next_handle: AtomicU64::new(first_handle.as_u64()),
            iri2handle: DashMap::with_hasher(BuildHasherDefault::default()),
            handle2iri: DashMap::with_hasher(BuildHasherDefault::default()),
        }
    }

    /// Restores a table from previously obtained [entries](Self::entries).
    ///
    /// New handles are allocated starting at `first_handle` or after the largest restored handle,
    /// whichever is larger.
    ///
    /// # Errors
    ///
    /// Returns [IvError::ConflictingRegistration] if an IRI or a handle occurs more than once or if
    /// an entry uses the reserved handle `u64::MAX`.
    pub fn try_from_entries(
        first_handle: DatatypeHandle,
        entries: impl IntoIterator<Item = (DatatypeHandle, NamedNode)>,
    ) -> IvResult<Self> {
        let table = Self::new();
        let mut next_handle = first_handle.as_u64();
        for (handle, datatype) in entries {
            let Some(after_handle) = handle.as_u64().checked_add(1) else {
                return Err(IvError::conflicting_registration(
                    datatype.as_str(),
                    "the reserved handle",
                    handle.to_string(),
                ));
            };
            let iri: Arc<str> = Arc::from(datatype.as_str());
            if let Some(existing) = table.handle2iri.get(&handle) {
                return Err(IvError::conflicting_registration(
                    datatype.as_str(),
                    existing.value().to_string(),
                    handle.to_string(),
                ));
            }
            if let Some(existing) = table.iri2handle.get(&iri) {
                return Err(IvError::conflicting_registration(
                    datatype.as_str(),
                    existing.value().to_string(),
                    handle.to_string(),
                ));
            }

            table.iri2handle.insert(Arc::clone(&iri), handle);
            table.handle2iri.insert(handle, iri);
            next_handle = next_handle.max(after_handle);
        }

        table.next_handle.store(next_handle, Ordering::Relaxed);
        debug!(
            "Restored handle table with {} entries, next handle: {next_handle}",
            table.len()
        );
        Ok(table)
    }

    /// Returns all assigned handles, ordered by handle.
    pub fn entries(&self) -> Vec<(DatatypeHandle, NamedNode)> {
        let mut entries = self
            .handle2iri
            .iter()
            .map(|entry| {
                (
                    *entry.key(),
                    NamedNode::new_unchecked(entry.value().to_string()),
                )
            })
            .collect::<Vec<_>>();
        entries.sort_unstable_by_key(|(handle, _)| *handle);
        entries
    }

    /// Returns the handle of `datatype` without allocating a new one.
    pub fn try_get_handle(&self, datatype: NamedNodeRef<'_>) -> Option<DatatypeHandle> {
        self.iri2handle.get(datatype.as_str()).map(|entry| *entry)
    }

    pub fn len(&self) -> usize {
        self.iri2handle.len()
    }

    pub fn is_empty(&self) -> bool {
        self.iri2handle.is_empty()
    }

    fn allocate(&self, datatype: NamedNodeRef<'_>) -> IvResult<DatatypeHandle> {
        let iri: Arc<str> = Arc::from(datatype.as_str());
        match self.iri2handle.entry(Arc::clone(&iri)) {
            Entry::Occupied(entry) => Ok(*entry.get()),
            Entry::Vacant(entry) => {
                let handle = self
                    .next_handle
                    .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |next| {
                        next.checked_add(1)
                    })
                    .map(DatatypeHandle::new)
                    .map_err(|_| IvError::HandlesExhausted(datatype.as_str().to_owned()))?;
                self.handle2iri.insert(handle, iri);
                entry.insert(handle);
                debug!("Allocated handle {handle} for datatype {datatype}");
                Ok(handle)
            }
        }
    }
}

impl DatatypeResolver for MemHandleTable {
    fn resolve(&self, datatype: NamedNodeRef<'_>) -> IvResult<DatatypeHandle> {
        match self.try_get_handle(datatype) {
            Some(handle) => Ok(handle),
            None => self.allocate(datatype),
        }
    }

    fn lookup(&self, handle: DatatypeHandle) -> Option<NamedNode> {
        self.handle2iri
            .get(&handle)
            .map(|entry| NamedNode::new_unchecked(entry.value().to_string()))
    }
}
