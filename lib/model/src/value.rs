use crate::vocab::xsd;
use crate::{Double, Float, InvalidLiteralError, TermId, TermKind, Timestamp};
use oxrdf::{Literal, LiteralRef, NamedNodeRef};
use oxsdatatypes::Boolean;
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// The logical value that is encoded into an internal value.
///
/// The built-in kinds are encoded by the codec directly. Literals with any other datatype are
/// held as [LogicalValue::Extension] and can only be encoded if an extension is registered for
/// their datatype.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub enum LogicalValue {
    /// A reference to a term stored in the lexicon.
    Term(TermId),
    /// `xsd:boolean`
    Boolean(bool),
    /// `xsd:byte`
    Byte(i8),
    /// `xsd:short`
    Short(i16),
    /// `xsd:int`
    Int(i32),
    /// `xsd:long`
    Long(i64),
    /// `xsd:float`
    Float(Float),
    /// `xsd:double`
    Double(Double),
    /// `xsd:dateTime`
    DateTime(Timestamp),
    /// A short `xsd:string` that is inlined into the key.
    String(String),
    /// A literal whose datatype is handled by an extension.
    Extension(Literal),
}

/// The kind of a [LogicalValue]. Each kind has its own natural order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ValueKind {
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

impl LogicalValue {
    /// Returns the kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            LogicalValue::Term(term) => match term.kind() {
                TermKind::Uri => ValueKind::UriTerm,
                TermKind::Literal => ValueKind::LiteralTerm,
                TermKind::BlankNode => ValueKind::BlankNodeTerm,
            },
            LogicalValue::Boolean(_) => ValueKind::Boolean,
            LogicalValue::Byte(_) => ValueKind::Byte,
            LogicalValue::Short(_) => ValueKind::Short,
            LogicalValue::Int(_) => ValueKind::Int,
            LogicalValue::Long(_) => ValueKind::Long,
            LogicalValue::Float(_) => ValueKind::Float,
            LogicalValue::Double(_) => ValueKind::Double,
            LogicalValue::DateTime(_) => ValueKind::DateTime,
            LogicalValue::String(_) => ValueKind::String,
            LogicalValue::Extension(_) => ValueKind::Extension,
        }
    }

    /// Returns the datatype of this value. Term references have no datatype.
    pub fn datatype(&self) -> Option<NamedNodeRef<'_>> {
        Some(match self {
            LogicalValue::Term(_) => return None,
            LogicalValue::Boolean(_) => xsd::BOOLEAN,
            LogicalValue::Byte(_) => xsd::BYTE,
            LogicalValue::Short(_) => xsd::SHORT,
            LogicalValue::Int(_) => xsd::INT,
            LogicalValue::Long(_) => xsd::LONG,
            LogicalValue::Float(_) => xsd::FLOAT,
            LogicalValue::Double(_) => xsd::DOUBLE,
            LogicalValue::DateTime(_) => xsd::DATE_TIME,
            LogicalValue::String(_) => xsd::STRING,
            LogicalValue::Extension(literal) => literal.datatype(),
        })
    }

    /// Returns the lexical form of this value.
    ///
    /// Built-in kinds render their canonical form. Extension values return the lexical form of
    /// the literal as given, as only the extension knows the canonical form of its datatype.
    pub fn as_text(&self) -> String {
        match self {
            LogicalValue::Extension(literal) => literal.value().to_owned(),
            LogicalValue::String(value) => value.clone(),
            _ => self.to_string(),
        }
    }

    /// Maps a literal onto the built-in kinds. Literals of other datatypes become
    /// [LogicalValue::Extension].
    ///
    /// # Errors
    ///
    /// Returns an error if the lexical form is invalid for a built-in datatype.
    pub fn try_from_literal(literal: LiteralRef<'_>) -> Result<Self, InvalidLiteralError> {
        let datatype = literal.datatype();
        let value = literal.value();
        let invalid = |reason: &str| InvalidLiteralError::new(datatype, value, reason);

        if literal.language().is_some() {
            return Ok(LogicalValue::Extension(literal.into_owned()));
        }

        Ok(match datatype {
            xsd::BOOLEAN => LogicalValue::Boolean(
                Boolean::from_str(value)
                    .map_err(|error| invalid(&error.to_string()))?
                    .into(),
            ),
            xsd::BYTE => LogicalValue::Byte(
                i8::from_str(value).map_err(|_| invalid("not an 8-bit integer"))?,
            ),
            xsd::SHORT => LogicalValue::Short(
                i16::from_str(value).map_err(|_| invalid("not a 16-bit integer"))?,
            ),
            xsd::INT => LogicalValue::Int(
                i32::from_str(value).map_err(|_| invalid("not a 32-bit integer"))?,
            ),
            xsd::LONG => LogicalValue::Long(
                i64::from_str(value).map_err(|_| invalid("not a 64-bit integer"))?,
            ),
            xsd::FLOAT => LogicalValue::Float(Float::from_str(value)?),
            xsd::DOUBLE => LogicalValue::Double(Double::from_str(value)?),
            xsd::DATE_TIME => LogicalValue::DateTime(Timestamp::from_str(value)?),
            xsd::STRING => LogicalValue::String(value.to_owned()),
            _ => LogicalValue::Extension(literal.into_owned()),
        })
    }

    /// Renders this value as a literal. Term references are not literals and return [None].
    pub fn to_literal(&self) -> Option<Literal> {
        match self {
            LogicalValue::Term(_) => None,
            LogicalValue::Extension(literal) => Some(literal.clone()),
            LogicalValue::String(value) => Some(Literal::new_simple_literal(value)),
            _ => self
                .datatype()
                .map(|datatype| Literal::new_typed_literal(self.as_text(), datatype)),
        }
    }
}

impl PartialOrd for LogicalValue {
    /// Compares two values of the same kind in their natural order.
    ///
    /// Returns [None] for values of different kinds and for extension values, as only the
    /// extension knows the order of its datatype.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (LogicalValue::Term(a), LogicalValue::Term(b)) if a.kind() == b.kind() => {
                Some(a.id().cmp(&b.id()))
            }
            (LogicalValue::Boolean(a), LogicalValue::Boolean(b)) => Some(a.cmp(b)),
            (LogicalValue::Byte(a), LogicalValue::Byte(b)) => Some(a.cmp(b)),
            (LogicalValue::Short(a), LogicalValue::Short(b)) => Some(a.cmp(b)),
            (LogicalValue::Int(a), LogicalValue::Int(b)) => Some(a.cmp(b)),
            (LogicalValue::Long(a), LogicalValue::Long(b)) => Some(a.cmp(b)),
            (LogicalValue::Float(a), LogicalValue::Float(b)) => Some(a.cmp(b)),
            (LogicalValue::Double(a), LogicalValue::Double(b)) => Some(a.cmp(b)),
            (LogicalValue::DateTime(a), LogicalValue::DateTime(b)) => Some(a.cmp(b)),
            (LogicalValue::String(a), LogicalValue::String(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl Display for LogicalValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LogicalValue::Term(value) => value.fmt(f),
            LogicalValue::Boolean(value) => value.fmt(f),
            LogicalValue::Byte(value) => value.fmt(f),
            LogicalValue::Short(value) => value.fmt(f),
            LogicalValue::Int(value) => value.fmt(f),
            LogicalValue::Long(value) => value.fmt(f),
            LogicalValue::Float(value) => value.fmt(f),
            LogicalValue::Double(value) => value.fmt(f),
            LogicalValue::DateTime(value) => value.fmt(f),
            LogicalValue::String(value) => write!(f, "{value:?}"),
            LogicalValue::Extension(value) => value.fmt(f),
        }
    }
}

macro_rules! impl_from {
    ($TYPE: ty, $VARIANT: path) => {
        impl From<$TYPE> for LogicalValue {
            fn from(value: $TYPE) -> Self {
                $VARIANT(value)
            }
        }
    };
}

impl_from!(TermId, LogicalValue::Term);
impl_from!(bool, LogicalValue::Boolean);
impl_from!(i8, LogicalValue::Byte);
impl_from!(i16, LogicalValue::Short);
impl_from!(i32, LogicalValue::Int);
impl_from!(i64, LogicalValue::Long);
impl_from!(Float, LogicalValue::Float);
impl_from!(Double, LogicalValue::Double);
impl_from!(Timestamp, LogicalValue::DateTime);
impl_from!(String, LogicalValue::String);
