use std::fmt::{Display, Formatter};

/// A compact substitute for a datatype IRI.
///
/// Handles are assigned by a resolver that is owned by a namespace. Within one namespace, a handle
/// always refers to the same IRI. Handles are embedded into keys, so changing the mapping after
/// keys have been written invalidates these keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct DatatypeHandle(u64);

impl DatatypeHandle {
    /// Creates a new [DatatypeHandle].
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn as_u64(self) -> u64 {
        self.0
    }

    #[inline]
    #[must_use]
    pub fn from_be_bytes(bytes: [u8; 8]) -> Self {
        Self(u64::from_be_bytes(bytes))
    }

    #[inline]
    #[must_use]
    pub fn to_be_bytes(self) -> [u8; 8] {
        self.0.to_be_bytes()
    }
}

impl From<u64> for DatatypeHandle {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<DatatypeHandle> for u64 {
    fn from(value: DatatypeHandle) -> Self {
        value.0
    }
}

impl Display for DatatypeHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
