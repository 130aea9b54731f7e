use rdf_iv_model::{DatatypeHandle, InvalidLiteralError, NamedNode};
use std::fmt::{Display, Formatter};

/// A result of an encoding or decoding operation.
pub type IvResult<T> = Result<T, IvError>;

/// An error that occurs while encoding, decoding or registering extensions.
///
/// None of these errors are transient. They either indicate invalid input, corrupted data, or a
/// namespace whose configuration does not match the data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum IvError {
    /// The value cannot be represented by the encoding of its datatype.
    #[error(transparent)]
    InvalidLiteralFormat(#[from] InvalidLiteralError),
    /// The bytes are not a valid internal value.
    #[error(transparent)]
    MalformedEncoding(#[from] MalformedEncodingError),
    /// No extension is registered for a datatype or a handle.
    #[error("No extension is registered for {0}.")]
    UnrecognizedExtension(ExtensionKey),
    /// A datatype is already bound to another extension.
    #[error(
        "Cannot register extension '{attempted}' for <{datatype}> as it conflicts with '{existing}'."
    )]
    ConflictingRegistration {
        datatype: String,
        existing: String,
        attempted: String,
    },
    /// The resolver has no free handle left for a new datatype.
    #[error("No datatype handle is left for <{0}>.")]
    HandlesExhausted(String),
}

impl IvError {
    /// Creates a [IvError::MalformedEncoding] for the byte at `offset`.
    pub fn malformed(offset: usize, message: impl Into<String>) -> Self {
        Self::MalformedEncoding(MalformedEncodingError::new(offset, message))
    }

    /// Creates a [IvError::ConflictingRegistration].
    pub fn conflicting_registration(
        datatype: impl Into<String>,
        existing: impl Into<String>,
        attempted: impl Into<String>,
    ) -> Self {
        Self::ConflictingRegistration {
            datatype: datatype.into(),
            existing: existing.into(),
            attempted: attempted.into(),
        }
    }
}

/// The bytes of an internal value do not match any known layout.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Malformed encoding at byte {offset}: {message}")]
pub struct MalformedEncodingError {
    offset: usize,
    message: String,
}

impl MalformedEncodingError {
    /// Creates a new [MalformedEncodingError].
    pub fn new(offset: usize, message: impl Into<String>) -> Self {
        Self {
            offset,
            message: message.into(),
        }
    }

    /// The offset of the first offending byte.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Identifies the extension that could not be found.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExtensionKey {
    /// Encoding looks up extensions by datatype.
    Datatype(NamedNode),
    /// Decoding looks up extensions by the handle embedded in the key.
    Handle(DatatypeHandle),
}

impl Display for ExtensionKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtensionKey::Datatype(datatype) => write!(f, "datatype {datatype}"),
            ExtensionKey::Handle(handle) => write!(f, "handle {handle}"),
        }
    }
}
