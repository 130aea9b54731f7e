//! The order-preserving key format of the built-in value kinds.
//!
//! Every internal value starts with a [KindTag]. The payload of the built-in kinds has a fixed
//! layout, while the payload of an extension value is defined by its [Extension]. All values are
//! self-delimiting, so multiple values can be concatenated into a composite key.
//!
//! | Tag    | Kind            | Payload                                        |
//! |--------|-----------------|------------------------------------------------|
//! | `0x10` | URI term        | `u64` BE                                       |
//! | `0x11` | literal term    | `u64` BE                                       |
//! | `0x12` | blank node term | `u64` BE                                       |
//! | `0x20` | boolean         | `0x00` or `0x01`                               |
//! | `0x21` | byte            | `i8` with flipped sign bit                     |
//! | `0x22` | short           | `i16` BE with flipped sign bit                 |
//! | `0x23` | int             | `i32` BE with flipped sign bit                 |
//! | `0x24` | long            | `i64` BE with flipped sign bit                 |
//! | `0x25` | float           | `f32` bits, sortable                           |
//! | `0x26` | double          | `f64` bits, sortable                           |
//! | `0x27` | dateTime        | epoch milliseconds as `i64` BE, flipped sign   |
//! | `0x28` | string          | UTF-8, `0x00` escaped as `0x00 0xFF`, `0x00`   |
//! | `0x30` | extension       | `0x10`, handle as `u64` BE, extension payload  |
//!
//! [Extension]: crate::extension::Extension

mod kind;
mod primitives;
mod reader;
mod string;

pub use kind::{KindTag, UnknownKindTagError};
pub use reader::KeyReader;

use crate::extension::{read_extension_header, ExtensionRegistry};
use crate::{ExtensionKey, InternalValue, IvError, IvResult};
use primitives::{
    read_double, read_float, read_i16, read_i32, read_i64, read_i8, read_timestamp,
    write_double, write_float, write_i16, write_i32, write_i64, write_i8, write_timestamp,
};
use rdf_iv_model::vocab::xsd;
use rdf_iv_model::{InvalidLiteralError, Literal, LogicalValue, TermId, TermKind};
use std::cmp::Ordering;
use std::sync::Arc;
use string::{read_string, write_string};
use tracing::trace;

/// Options of an [IvCodec].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecOptions {
    /// The maximum length of an inline string in UTF-8 bytes. Longer strings must be stored in
    /// the lexicon and referenced with a [TermId].
    pub max_inline_string_len: usize,
}

impl CodecOptions {
    pub const DEFAULT_MAX_INLINE_STRING_LEN: usize = 256;
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            max_inline_string_len: Self::DEFAULT_MAX_INLINE_STRING_LEN,
        }
    }
}

/// Converts [LogicalValue]s into [InternalValue]s and back.
///
/// The codec itself is stateless. Extension values are delegated to the extensions of the
/// registry.
#[derive(Debug, Clone)]
pub struct IvCodec {
    registry: Arc<ExtensionRegistry>,
    options: CodecOptions,
}

impl IvCodec {
    /// Creates a new [IvCodec].
    pub fn new(registry: Arc<ExtensionRegistry>, options: CodecOptions) -> Self {
        Self { registry, options }
    }

    pub fn registry(&self) -> &Arc<ExtensionRegistry> {
        &self.registry
    }

    pub fn options(&self) -> CodecOptions {
        self.options
    }

    /// Encodes a single value.
    ///
    /// # Errors
    ///
    /// - [IvError::InvalidLiteralFormat] if the value cannot be inlined.
    /// - [IvError::UnrecognizedExtension] if no extension is registered for an extension value.
    pub fn encode(&self, value: &LogicalValue) -> IvResult<InternalValue> {
        let mut buffer = Vec::new();
        self.encode_into(value, &mut buffer)?;
        Ok(InternalValue::from(buffer))
    }

    /// Encodes a composite key that consists of all `values`.
    pub fn encode_key(&self, values: &[LogicalValue]) -> IvResult<InternalValue> {
        let mut buffer = Vec::new();
        for value in values {
            self.encode_into(value, &mut buffer)?;
        }
        Ok(InternalValue::from(buffer))
    }

    /// Appends the encoding of `value` to `buffer`. If encoding fails, `buffer` is left unchanged.
    pub fn encode_into(&self, value: &LogicalValue, buffer: &mut Vec<u8>) -> IvResult<()> {
        let start = buffer.len();
        let result = self.encode_value(value, buffer);
        match &result {
            Ok(()) => trace!(kind = ?value.kind(), len = buffer.len() - start, "Encoded value"),
            Err(_) => buffer.truncate(start),
        }
        result
    }

    fn encode_value(&self, value: &LogicalValue, buffer: &mut Vec<u8>) -> IvResult<()> {
        let tag = KindTag::from(value.kind());
        if tag != KindTag::Extension {
            buffer.push(tag.into());
        }

        match value {
            LogicalValue::Term(term) => buffer.extend_from_slice(&term.id().to_be_bytes()),
            LogicalValue::Boolean(value) => buffer.push(u8::from(*value)),
            LogicalValue::Byte(value) => write_i8(buffer, *value),
            LogicalValue::Short(value) => write_i16(buffer, *value),
            LogicalValue::Int(value) => write_i32(buffer, *value),
            LogicalValue::Long(value) => write_i64(buffer, *value),
            LogicalValue::Float(value) => write_float(buffer, *value),
            LogicalValue::Double(value) => write_double(buffer, *value),
            LogicalValue::DateTime(value) => write_timestamp(buffer, *value),
            LogicalValue::String(value) => {
                if value.len() > self.options.max_inline_string_len {
                    return Err(InvalidLiteralError::new(
                        xsd::STRING,
                        value.as_str(),
                        format!(
                            "string has {} bytes, at most {} bytes can be inlined",
                            value.len(),
                            self.options.max_inline_string_len
                        ),
                    )
                    .into());
                }
                write_string(buffer, value);
            }
            LogicalValue::Extension(literal) => self.encode_extension(literal, buffer)?,
        }
        Ok(())
    }

    fn encode_extension(&self, literal: &Literal, buffer: &mut Vec<u8>) -> IvResult<()> {
        if literal.language().is_some() {
            return Err(InvalidLiteralError::new(
                literal.datatype(),
                literal.value(),
                "language-tagged strings cannot be inlined",
            )
            .into());
        }

        let extension = self.registry.lookup(literal.datatype()).ok_or_else(|| {
            IvError::UnrecognizedExtension(ExtensionKey::Datatype(
                literal.datatype().into_owned(),
            ))
        })?;
        extension.encode_literal(literal.value(), buffer)
    }

    /// Decodes a single value. The value must span all of `bytes`.
    ///
    /// # Errors
    ///
    /// - [IvError::MalformedEncoding] if `bytes` is not a valid internal value.
    /// - [IvError::UnrecognizedExtension] if the handle of an extension value is not registered.
    pub fn decode(&self, bytes: &[u8]) -> IvResult<LogicalValue> {
        let mut reader = KeyReader::new(bytes);
        let value = self.decode_from(&mut reader)?;
        if !reader.is_empty() {
            return Err(IvError::malformed(
                reader.position(),
                format!("{} trailing byte(s) after value", reader.remaining().len()),
            ));
        }
        Ok(value)
    }

    /// Decodes the value at the start of `bytes` and returns it together with the number of bytes
    /// it occupies.
    pub fn decode_prefix(&self, bytes: &[u8]) -> IvResult<(LogicalValue, usize)> {
        let mut reader = KeyReader::new(bytes);
        let value = self.decode_from(&mut reader)?;
        Ok((value, reader.position()))
    }

    /// Splits a composite key into its values.
    pub fn decode_key(&self, bytes: &[u8]) -> IvResult<Vec<LogicalValue>> {
        let mut reader = KeyReader::new(bytes);
        let mut values = Vec::new();
        while !reader.is_empty() {
            values.push(self.decode_from(&mut reader)?);
        }
        Ok(values)
    }

    /// Decodes the value at the position of `reader` and advances it past the value.
    pub fn decode_from(&self, reader: &mut KeyReader<'_>) -> IvResult<LogicalValue> {
        let at_tag = *reader;
        let start = reader.position();
        let tag = reader
            .read_u8()
            .map_err(|_| IvError::malformed(start, "expected a kind tag"))?;
        let tag =
            KindTag::try_from(tag).map_err(|error| IvError::malformed(start, error.to_string()))?;

        let value = match tag {
            KindTag::UriTerm => Self::read_term(reader, TermKind::Uri)?,
            KindTag::LiteralTerm => Self::read_term(reader, TermKind::Literal)?,
            KindTag::BlankNodeTerm => Self::read_term(reader, TermKind::BlankNode)?,
            KindTag::Boolean => match reader.read_u8()? {
                0 => LogicalValue::Boolean(false),
                1 => LogicalValue::Boolean(true),
                other => {
                    return Err(reader.error_at_previous(format!(
                        "0x{other:02x} is not a boolean"
                    )))
                }
            },
            KindTag::Byte => LogicalValue::Byte(read_i8(reader)?),
            KindTag::Short => LogicalValue::Short(read_i16(reader)?),
            KindTag::Int => LogicalValue::Int(read_i32(reader)?),
            KindTag::Long => LogicalValue::Long(read_i64(reader)?),
            KindTag::Float => LogicalValue::Float(read_float(reader)?),
            KindTag::Double => LogicalValue::Double(read_double(reader)?),
            KindTag::DateTime => LogicalValue::DateTime(read_timestamp(reader)?),
            KindTag::String => LogicalValue::String(read_string(reader)?),
            KindTag::Extension => {
                *reader = at_tag;
                self.decode_extension(reader)?
            }
        };

        trace!(kind = ?value.kind(), len = reader.position() - start, "Decoded value");
        Ok(value)
    }

    fn read_term(reader: &mut KeyReader<'_>, kind: TermKind) -> IvResult<LogicalValue> {
        let id = u64::from_be_bytes(reader.read_array()?);
        Ok(LogicalValue::Term(TermId::new(kind, id)))
    }

    fn decode_extension(&self, reader: &mut KeyReader<'_>) -> IvResult<LogicalValue> {
        let mut lookahead = *reader;
        let handle = read_extension_header(&mut lookahead)?;
        let extension = self
            .registry
            .lookup_by_handle(handle)
            .ok_or(IvError::UnrecognizedExtension(ExtensionKey::Handle(handle)))?;
        let literal = extension.decode_literal(reader)?;
        Ok(LogicalValue::Extension(literal))
    }

    /// Compares two values in their natural order.
    ///
    /// Returns [None] if the values have no common order. Extension values of the same datatype
    /// are compared by their extension.
    ///
    /// # Errors
    ///
    /// Returns an error if no extension is registered for the datatype of extension values or if
    /// the extension rejects one of the values.
    pub fn compare_values(
        &self,
        lhs: &LogicalValue,
        rhs: &LogicalValue,
    ) -> IvResult<Option<Ordering>> {
        match (lhs, rhs) {
            (LogicalValue::Extension(lhs), LogicalValue::Extension(rhs)) => {
                if lhs.datatype() != rhs.datatype()
                    || lhs.language().is_some()
                    || rhs.language().is_some()
                {
                    return Ok(None);
                }

                let extension = self.registry.lookup(lhs.datatype()).ok_or_else(|| {
                    IvError::UnrecognizedExtension(ExtensionKey::Datatype(
                        lhs.datatype().into_owned(),
                    ))
                })?;
                extension.compare_lexical(lhs.value(), rhs.value()).map(Some)
            }
            _ => Ok(lhs.partial_cmp(rhs)),
        }
    }
}
