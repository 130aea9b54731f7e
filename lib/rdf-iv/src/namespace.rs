//! The [Namespace] bundles the state that is required to encode and decode internal values.
//!
//! Usage example:
//! ```
//! use rdf_iv::model::{LogicalValue, NamedNode};
//! use rdf_iv::{Namespace, NamespaceConfig};
//!
//! let namespace = Namespace::try_new(NamespaceConfig::new("example"))?;
//!
//! // Built-in values
//! let encoded = namespace.encode(&LogicalValue::Int(-5))?;
//! assert_eq!(namespace.decode(encoded.as_bytes())?, LogicalValue::Int(-5));
//!
//! // Custom extensions
//! let color = NamedNode::new("http://example.com/color")?;
//! let extension = namespace.enum_extension(color, ["red", "green", "blue"])?;
//! namespace.register_extension(extension)?;
//! # Result::<_, Box<dyn std::error::Error>>::Ok(())
//! ```

use crate::NamespaceConfig;
use rdf_iv_encoding::extension::{
    CompressedTimestampExtension, EnumDefinitionError, EnumExtension, Extension, ExtensionRef,
    ExtensionRegistry,
};
use rdf_iv_encoding::resolver::{DatatypeResolver, DatatypeResolverRef, MemHandleTable};
use rdf_iv_encoding::verify::RoundTripVerifier;
use rdf_iv_encoding::{CodecOptions, InternalValue, IvCodec, IvError, IvResult};
use rdf_iv_model::{Literal, LiteralRef, LogicalValue, NamedNode};
use std::sync::Arc;
use tracing::{info, warn};

/// An isolated scope for internal values, usually one per knowledge base.
///
/// A namespace owns the datatype handle table, the extension registry and the codec. Handles and
/// extension registrations of one namespace are never visible to another namespace, so keys
/// must only be decoded by the namespace that created them.
///
/// Cloning a namespace is cheap and the clone shares the state with the original.
#[derive(Debug, Clone)]
pub struct Namespace {
    config: NamespaceConfig,
    resolver: Arc<MemHandleTable>,
    registry: Arc<ExtensionRegistry>,
    codec: IvCodec,
}

impl Namespace {
    /// Creates a new [Namespace] with an empty handle table.
    ///
    /// # Errors
    ///
    /// Returns an error if the built-in extensions cannot be registered.
    pub fn try_new(config: NamespaceConfig) -> IvResult<Self> {
        let resolver = MemHandleTable::with_first_handle(config.first_handle);
        Self::try_new_with_handle_table(config, resolver)
    }

    /// Creates a [Namespace] with the default configuration.
    ///
    /// The built-in extensions are registered like in [Self::try_new]. A failed registration is
    /// logged.
    pub fn with_default_config() -> Self {
        let config = NamespaceConfig::default();
        let handle_table = MemHandleTable::with_first_handle(config.first_handle);
        let namespace = Self::from_parts(config, handle_table);
        namespace.register_builtin_extensions();
        namespace
    }

    /// Creates a [Namespace] that uses a previously restored `handle_table`.
    ///
    /// [NamespaceConfig::first_handle] is ignored, as new handles are allocated after the
    /// handles of the table.
    ///
    /// # Errors
    ///
    /// Returns an error if the built-in extensions cannot be registered.
    pub fn try_new_with_handle_table(
        config: NamespaceConfig,
        handle_table: MemHandleTable,
    ) -> IvResult<Self> {
        let namespace = Self::from_parts(config, handle_table);
        namespace.try_register_builtin_extensions()?;
        Ok(namespace)
    }

    fn try_register_builtin_extensions(&self) -> IvResult<()> {
        if self.config.register_compressed_timestamp {
            self.register_extension(self.compressed_timestamp_extension())?;
        }
        Ok(())
    }

    fn register_builtin_extensions(&self) {
        if let Err(error) = self.try_register_builtin_extensions() {
            warn!(
                namespace = %self.config.name,
                "Cannot register the built-in extensions: {error}"
            );
        }
    }

    fn from_parts(config: NamespaceConfig, handle_table: MemHandleTable) -> Self {
        info!(
            namespace = %config.name,
            datatypes = handle_table.len(),
            "Created namespace"
        );
        let resolver = Arc::new(handle_table);
        let registry = Arc::new(ExtensionRegistry::new());
        let codec = IvCodec::new(Arc::clone(&registry), config.codec_options());
        Self {
            config,
            resolver,
            registry,
            codec,
        }
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn config(&self) -> &NamespaceConfig {
        &self.config
    }

    pub fn codec_options(&self) -> CodecOptions {
        self.codec.options()
    }

    /// Returns the handle table of this namespace.
    pub fn resolver(&self) -> &Arc<MemHandleTable> {
        &self.resolver
    }

    pub fn registry(&self) -> &Arc<ExtensionRegistry> {
        &self.registry
    }

    pub fn codec(&self) -> &IvCodec {
        &self.codec
    }

    /// Registers `extension` for its datatype.
    ///
    /// # Errors
    ///
    /// Returns [IvError::ConflictingRegistration] if the handle of `extension` differs from the
    /// handle that the [resolver](Self::resolver) of this namespace assigns to its datatype, and
    /// for every conflict reported by [ExtensionRegistry::register].
    pub fn register_extension(&self, extension: ExtensionRef) -> IvResult<()> {
        let expected = self.resolver.resolve(extension.datatype())?;
        let actual = extension.handle()?;
        if expected != actual {
            warn!(
                namespace = %self.config.name,
                "Extension '{}' uses handle {actual} for {}, but the namespace assigned {expected}",
                extension.id(),
                extension.datatype()
            );
            return Err(IvError::conflicting_registration(
                extension.datatype().as_str(),
                format!("handle {expected}"),
                format!("{} with handle {actual}", extension.id()),
            ));
        }
        self.registry.register_extension(extension)
    }

    /// Creates a [CompressedTimestampExtension] that is bound to this namespace.
    pub fn compressed_timestamp_extension(&self) -> Arc<CompressedTimestampExtension> {
        Arc::new(CompressedTimestampExtension::new(self.datatype_resolver()))
    }

    /// Creates an [EnumExtension] that is bound to this namespace.
    pub fn enum_extension(
        &self,
        datatype: NamedNode,
        labels: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<Arc<EnumExtension>, EnumDefinitionError> {
        EnumExtension::try_new(datatype, labels, self.datatype_resolver()).map(Arc::new)
    }

    /// Encodes `value` with the codec of this namespace.
    pub fn encode(&self, value: &LogicalValue) -> IvResult<InternalValue> {
        self.codec.encode(value)
    }

    /// Decodes `bytes` with the codec of this namespace.
    pub fn decode(&self, bytes: &[u8]) -> IvResult<LogicalValue> {
        self.codec.decode(bytes)
    }

    /// Encodes a literal. Literals of the built-in datatypes are validated and inlined, all other
    /// literals require an extension.
    pub fn encode_literal(&self, literal: LiteralRef<'_>) -> IvResult<InternalValue> {
        let value = LogicalValue::try_from_literal(literal)?;
        self.codec.encode(&value)
    }

    /// Decodes `bytes` and renders the value as a literal. Returns [None] for term references.
    pub fn decode_to_literal(&self, bytes: &[u8]) -> IvResult<Option<Literal>> {
        Ok(self.codec.decode(bytes)?.to_literal())
    }

    /// Returns a [RoundTripVerifier] for the codec of this namespace.
    pub fn verifier(&self) -> RoundTripVerifier<'_> {
        RoundTripVerifier::new(&self.codec)
    }

    fn datatype_resolver(&self) -> DatatypeResolverRef {
        Arc::<MemHandleTable>::clone(&self.resolver)
    }
}

impl Default for Namespace {
    fn default() -> Self {
        Self::with_default_config()
    }
}
