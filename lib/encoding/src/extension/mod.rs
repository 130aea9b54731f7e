//! Extensions encode literals of custom datatypes.
//!
//! Every extension key starts with the same header: the extension tag, followed by the datatype
//! handle encoded as a URI term. The handle identifies the extension that decodes the rest of the
//! key. The layout of the payload is up to the extension, but it must preserve the natural order of
//! its datatype.

mod compressed_timestamp;
mod enumeration;
mod registry;

pub use compressed_timestamp::CompressedTimestampExtension;
pub use enumeration::{EnumDefinitionError, EnumExtension};
pub use registry::ExtensionRegistry;

use crate::codec::{KeyReader, KindTag};
use crate::resolver::DatatypeResolverRef;
use crate::{ExtensionKey, IvError, IvResult};
use rdf_iv_model::{DatatypeHandle, Literal, NamedNode, NamedNodeRef};
use std::cmp::Ordering;
use std::fmt::Debug;
use std::sync::{Arc, OnceLock};

/// A cheaply clonable reference to an [Extension].
pub type ExtensionRef = Arc<dyn Extension>;

/// An encoding strategy for the literals of a single datatype.
///
/// Extensions are registered in an [ExtensionRegistry]. Two extensions with the same
/// [id](Extension::id) are considered to be the same extension, which makes registration
/// idempotent.
///
/// # Order
///
/// For two lexical forms `a` and `b`, the order of the encoded keys must match
/// [Extension::compare_lexical]. Use the [RoundTripVerifier](crate::verify::RoundTripVerifier) to
/// check an extension before using it for a namespace.
pub trait Extension: Debug + Send + Sync {
    /// A stable identifier of this extension.
    fn id(&self) -> &str;

    /// The datatype that this extension is responsible for.
    fn datatype(&self) -> NamedNodeRef<'_>;

    /// The handle of [Self::datatype]. It is resolved on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the resolver cannot assign a handle.
    fn handle(&self) -> IvResult<DatatypeHandle>;

    /// Appends the key of `lexical`, including the extension header, to `buffer`.
    ///
    /// # Errors
    ///
    /// Returns [IvError::InvalidLiteralFormat] if `lexical` is not valid for the datatype.
    fn encode_literal(&self, lexical: &str, buffer: &mut Vec<u8>) -> IvResult<()>;

    /// Decodes a key that has been created by [Self::encode_literal]. The reader must be
    /// positioned at the extension tag and is advanced past the payload.
    ///
    /// # Errors
    ///
    /// Returns [IvError::UnrecognizedExtension] if the key has been created by another extension
    /// and [IvError::MalformedEncoding] if the payload is invalid.
    fn decode_literal(&self, reader: &mut KeyReader<'_>) -> IvResult<Literal>;

    /// Compares two lexical forms in the natural order of the datatype.
    fn compare_lexical(&self, lhs: &str, rhs: &str) -> IvResult<Ordering>;

    /// Returns the canonical lexical form of `lexical`.
    fn canonicalize(&self, lexical: &str) -> IvResult<String> {
        let mut buffer = Vec::new();
        self.encode_literal(lexical, &mut buffer)?;
        let literal = self.decode_literal(&mut KeyReader::new(&buffer))?;
        Ok(literal.value().to_owned())
    }
}

/// Appends the header of an extension key.
pub fn write_extension_header(buffer: &mut Vec<u8>, handle: DatatypeHandle) {
    buffer.push(KindTag::Extension.into());
    buffer.push(KindTag::UriTerm.into());
    buffer.extend_from_slice(&handle.to_be_bytes());
}

/// Reads the header of an extension key and returns the embedded handle.
pub fn read_extension_header(reader: &mut KeyReader<'_>) -> IvResult<DatatypeHandle> {
    if reader.read_u8()? != u8::from(KindTag::Extension) {
        return Err(reader.error_at_previous("expected an extension tag"));
    }
    if reader.read_u8()? != u8::from(KindTag::UriTerm) {
        return Err(reader.error_at_previous("expected a datatype handle"));
    }
    Ok(DatatypeHandle::from_be_bytes(reader.read_array()?))
}

/// A datatype whose handle is resolved once and cached afterward.
///
/// Extensions use this type to avoid consulting the resolver for every key.
#[derive(Debug)]
pub struct ResolvedDatatype {
    datatype: NamedNode,
    resolver: DatatypeResolverRef,
    handle: OnceLock<DatatypeHandle>,
}

impl ResolvedDatatype {
    /// Creates a new [ResolvedDatatype]. The handle is not resolved until it is needed.
    pub fn new(datatype: NamedNode, resolver: DatatypeResolverRef) -> Self {
        Self {
            datatype,
            resolver,
            handle: OnceLock::new(),
        }
    }

    pub fn datatype(&self) -> NamedNodeRef<'_> {
        self.datatype.as_ref()
    }

    pub fn handle(&self) -> IvResult<DatatypeHandle> {
        if let Some(handle) = self.handle.get() {
            return Ok(*handle);
        }
        let handle = self.resolver.resolve(self.datatype.as_ref())?;
        Ok(*self.handle.get_or_init(|| handle))
    }

    /// Appends the extension header for this datatype.
    pub fn write_header(&self, buffer: &mut Vec<u8>) -> IvResult<()> {
        write_extension_header(buffer, self.handle()?);
        Ok(())
    }

    /// Reads the extension header and checks that it refers to this datatype.
    pub fn read_header(&self, reader: &mut KeyReader<'_>) -> IvResult<()> {
        let handle = read_extension_header(reader)?;
        if handle != self.handle()? {
            return Err(IvError::UnrecognizedExtension(ExtensionKey::Handle(handle)));
        }
        Ok(())
    }
}
