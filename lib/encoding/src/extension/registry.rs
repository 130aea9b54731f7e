use crate::extension::ExtensionRef;
use crate::{IvError, IvResult};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use rdf_iv_model::{DatatypeHandle, NamedNodeRef};
use rustc_hash::FxHasher;
use std::hash::BuildHasherDefault;
use std::sync::Arc;
use tracing::{debug, warn};

/// Holds the [Extension](crate::extension::Extension)s of a namespace.
///
/// Extensions can be looked up by their datatype (for encoding) and by the handle of their
/// datatype (for decoding). A datatype is bound to a single extension for the lifetime of the
/// registry.
#[derive(Debug, Default)]
pub struct ExtensionRegistry {
    by_datatype: DashMap<String, ExtensionRef, BuildHasherDefault<FxHasher>>,
    by_handle: DashMap<DatatypeHandle, ExtensionRef, BuildHasherDefault<FxHasher>>,
}

impl ExtensionRegistry {
    /// Creates a new empty [ExtensionRegistry].
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `extension` for its own datatype.
    pub fn register_extension(&self, extension: ExtensionRef) -> IvResult<()> {
        let datatype = extension.datatype().into_owned();
        self.register(datatype.as_ref(), extension)
    }

    /// Registers `extension` for `datatype`.
    ///
    /// Registering the same extension for the same datatype again has no effect.
    ///
    /// # Errors
    ///
    /// Returns [IvError::ConflictingRegistration] if
    /// - `datatype` is not the datatype of `extension`,
    /// - another extension is already registered for `datatype`, or
    /// - another extension already uses the handle of `datatype`.
    pub fn register(&self, datatype: NamedNodeRef<'_>, extension: ExtensionRef) -> IvResult<()> {
        if extension.datatype() != datatype {
            warn!(
                "Extension '{}' handles {} and cannot be registered for {datatype}",
                extension.id(),
                extension.datatype()
            );
            return Err(IvError::conflicting_registration(
                datatype.as_str(),
                extension.datatype().as_str(),
                extension.id(),
            ));
        }

        match self.by_datatype.entry(datatype.as_str().to_owned()) {
            Entry::Occupied(entry) => {
                let existing = entry.get();
                if existing.id() == extension.id() {
                    debug!("Extension '{}' is already registered", extension.id());
                    return Ok(());
                }

                warn!(
                    "Extension '{}' conflicts with '{}' for {datatype}",
                    extension.id(),
                    existing.id()
                );
                Err(IvError::conflicting_registration(
                    datatype.as_str(),
                    existing.id(),
                    extension.id(),
                ))
            }
            Entry::Vacant(entry) => {
                let handle = extension.handle()?;
                match self.by_handle.entry(handle) {
                    Entry::Occupied(existing) => {
                        let existing = existing.get();
                        warn!(
                            "Handle {handle} of {datatype} is already used by {}",
                            existing.datatype()
                        );
                        Err(IvError::conflicting_registration(
                            datatype.as_str(),
                            existing.id(),
                            extension.id(),
                        ))
                    }
                    Entry::Vacant(by_handle) => {
                        debug!(
                            "Registered extension '{}' for {datatype} with handle {handle}",
                            extension.id()
                        );
                        by_handle.insert(Arc::clone(&extension));
                        entry.insert(extension);
                        Ok(())
                    }
                }
            }
        }
    }

    /// Returns the extension that is registered for `datatype`.
    pub fn lookup(&self, datatype: NamedNodeRef<'_>) -> Option<ExtensionRef> {
        self.by_datatype
            .get(datatype.as_str())
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Returns the extension whose datatype has the given `handle`.
    pub fn lookup_by_handle(&self, handle: DatatypeHandle) -> Option<ExtensionRef> {
        self.by_handle
            .get(&handle)
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Returns all registered extensions, ordered by their handle.
    pub fn extensions(&self) -> Vec<ExtensionRef> {
        let mut extensions = self
            .by_handle
            .iter()
            .map(|entry| (*entry.key(), Arc::clone(entry.value())))
            .collect::<Vec<_>>();
        extensions.sort_unstable_by_key(|(handle, _)| *handle);
        extensions
            .into_iter()
            .map(|(_, extension)| extension)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.by_datatype.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_datatype.is_empty()
    }
}
