use crate::vocab::xsd;
use crate::InvalidLiteralError;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// [XML Schema `float` datatype](https://www.w3.org/TR/xmlschema11-2/#float)
///
/// Uses internally a [`f32`]. Equality and order follow IEEE 754 `totalOrder`, see
/// [Double](crate::Double).
#[derive(Debug, Clone, Copy, Default)]
#[repr(transparent)]
pub struct Float {
    value: f32,
}

impl Float {
    pub const INFINITY: Self = Self {
        value: f32::INFINITY,
    };
    pub const MAX: Self = Self { value: f32::MAX };
    pub const MIN: Self = Self { value: f32::MIN };
    pub const NAN: Self = Self { value: f32::NAN };
    pub const NEG_INFINITY: Self = Self {
        value: f32::NEG_INFINITY,
    };

    pub const fn new(value: f32) -> Self {
        Self { value }
    }

    #[inline]
    #[must_use]
    pub fn from_bits(bits: u32) -> Self {
        Self {
            value: f32::from_bits(bits),
        }
    }

    #[inline]
    #[must_use]
    pub fn to_bits(self) -> u32 {
        self.value.to_bits()
    }

    #[inline]
    pub fn is_nan(self) -> bool {
        self.value.is_nan()
    }

    #[inline]
    pub fn as_f32(self) -> f32 {
        self.value
    }
}

impl PartialEq for Float {
    fn eq(&self, other: &Self) -> bool {
        self.to_bits() == other.to_bits()
    }
}

impl Eq for Float {}

impl Hash for Float {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_bits().hash(state);
    }
}

impl PartialOrd for Float {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Float {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.total_cmp(&other.value)
    }
}

impl From<f32> for Float {
    #[inline]
    fn from(value: f32) -> Self {
        Self { value }
    }
}

impl From<Float> for f32 {
    #[inline]
    fn from(value: Float) -> Self {
        value.value
    }
}

impl FromStr for Float {
    type Err = InvalidLiteralError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        oxsdatatypes::Float::from_str(input)
            .map(|value| Self::from(f32::from(value)))
            .map_err(|error| InvalidLiteralError::new(xsd::FLOAT, input, error.to_string()))
    }
}

impl fmt::Display for Float {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&oxsdatatypes::Float::from(self.value), f)
    }
}
