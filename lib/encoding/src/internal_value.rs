use std::fmt::{Debug, Display, Formatter};

/// The encoded form of a [LogicalValue](rdf_iv_model::LogicalValue).
///
/// Internal values are compared byte-wise. For two values of the same datatype, this order matches
/// the natural order of the values.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InternalValue(Box<[u8]>);

impl InternalValue {
    /// Returns a reference to the underlying bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consumes `self` and returns the underlying bytes.
    pub fn into_bytes(self) -> Box<[u8]> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for InternalValue {
    fn from(value: Vec<u8>) -> Self {
        Self(value.into_boxed_slice())
    }
}

impl From<&[u8]> for InternalValue {
    fn from(value: &[u8]) -> Self {
        Self(value.into())
    }
}

impl AsRef<[u8]> for InternalValue {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Debug for InternalValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "InternalValue({self})")
    }
}

impl Display for InternalValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&hex::encode(&self.0))
    }
}
