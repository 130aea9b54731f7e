use rdf_iv_encoding::resolver::MemHandleTable;
use rdf_iv_encoding::CodecOptions;
use rdf_iv_model::DatatypeHandle;

/// The configuration of a [Namespace](crate::Namespace).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceConfig {
    /// The name of the namespace. Only used for diagnostics.
    pub name: String,
    /// The first handle that is allocated for a datatype.
    pub first_handle: DatatypeHandle,
    /// The maximum length of an inline string in UTF-8 bytes.
    pub max_inline_string_len: usize,
    /// Whether the compressed timestamp extension is registered when the namespace is created.
    pub register_compressed_timestamp: bool,
}

impl NamespaceConfig {
    /// Creates a default configuration with the given `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Returns the options of the codec.
    pub fn codec_options(&self) -> CodecOptions {
        CodecOptions {
            max_inline_string_len: self.max_inline_string_len,
        }
    }
}

impl Default for NamespaceConfig {
    fn default() -> Self {
        Self {
            name: "kb".to_owned(),
            first_handle: MemHandleTable::DEFAULT_FIRST_HANDLE,
            max_inline_string_len: CodecOptions::DEFAULT_MAX_INLINE_STRING_LEN,
            register_compressed_timestamp: true,
        }
    }
}
