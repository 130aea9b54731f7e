use rdf_iv_model::ValueKind;
use std::fmt::Display;
use thiserror::Error;

/// The first byte of every internal value.
///
/// Tags are grouped by the family of the value. Term references come first, followed by the
/// inline numeric kinds and finally the extensions. The numeric values of the tags are part of the
/// persisted format and must never change.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum KindTag {
    UriTerm,
    LiteralTerm,
    BlankNodeTerm,
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    DateTime,
    String,
    Extension,
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq, Hash)]
pub struct UnknownKindTagError(pub u8);

impl Display for UnknownKindTagError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unknown kind tag 0x{:02x}", self.0)
    }
}

impl TryFrom<u8> for KindTag {
    type Error = UnknownKindTagError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        let tag = match value {
            0x10 => KindTag::UriTerm,
            0x11 => KindTag::LiteralTerm,
            0x12 => KindTag::BlankNodeTerm,
            0x20 => KindTag::Boolean,
            0x21 => KindTag::Byte,
            0x22 => KindTag::Short,
            0x23 => KindTag::Int,
            0x24 => KindTag::Long,
            0x25 => KindTag::Float,
            0x26 => KindTag::Double,
            0x27 => KindTag::DateTime,
            0x28 => KindTag::String,
            0x30 => KindTag::Extension,
            _ => return Err(UnknownKindTagError(value)),
        };
        Ok(tag)
    }
}

impl From<KindTag> for u8 {
    fn from(value: KindTag) -> Self {
        match value {
            KindTag::UriTerm => 0x10,
            KindTag::LiteralTerm => 0x11,
            KindTag::BlankNodeTerm => 0x12,
            KindTag::Boolean => 0x20,
            KindTag::Byte => 0x21,
            KindTag::Short => 0x22,
            KindTag::Int => 0x23,
            KindTag::Long => 0x24,
            KindTag::Float => 0x25,
            KindTag::Double => 0x26,
            KindTag::DateTime => 0x27,
            KindTag::String => 0x28,
            KindTag::Extension => 0x30,
        }
    }
}

impl From<ValueKind> for KindTag {
    fn from(value: ValueKind) -> Self {
        match value {
            ValueKind::UriTerm => KindTag::UriTerm,
            ValueKind::LiteralTerm => KindTag::LiteralTerm,
            ValueKind::BlankNodeTerm => KindTag::BlankNodeTerm,
            ValueKind::Boolean => KindTag::Boolean,
            ValueKind::Byte => KindTag::Byte,
            ValueKind::Short => KindTag::Short,
            ValueKind::Int => KindTag::Int,
            ValueKind::Long => KindTag::Long,
            ValueKind::Float => KindTag::Float,
            ValueKind::Double => KindTag::Double,
            ValueKind::DateTime => KindTag::DateTime,
            ValueKind::String => KindTag::String,
            ValueKind::Extension => KindTag::Extension,
        }
    }
}
