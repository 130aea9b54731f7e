use crate::vocab::xsd;
use crate::{Float, InvalidLiteralError};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// [XML Schema `double` datatype](https://www.w3.org/TR/xmlschema11-2/#double)
///
/// Uses internally a [`f64`].
///
/// Equality and order follow the IEEE 754 `totalOrder` predicate: `-0.0` is smaller than `0.0`,
/// and NaNs are ordered after positive infinity (negative NaNs before negative infinity). This
/// makes [Double] a total order that is consistent with its bit-level identity.
#[derive(Debug, Clone, Copy, Default)]
#[repr(transparent)]
pub struct Double {
    value: f64,
}

impl Double {
    pub const INFINITY: Self = Self {
        value: f64::INFINITY,
    };
    pub const MAX: Self = Self { value: f64::MAX };
    pub const MIN: Self = Self { value: f64::MIN };
    pub const NAN: Self = Self { value: f64::NAN };
    pub const NEG_INFINITY: Self = Self {
        value: f64::NEG_INFINITY,
    };

    pub const fn new(value: f64) -> Self {
        Self { value }
    }

    #[inline]
    #[must_use]
    pub fn from_bits(bits: u64) -> Self {
        Self {
            value: f64::from_bits(bits),
        }
    }

    #[inline]
    #[must_use]
    pub fn to_bits(self) -> u64 {
        self.value.to_bits()
    }

    #[inline]
    pub fn is_nan(self) -> bool {
        self.value.is_nan()
    }

    #[inline]
    pub fn as_f64(self) -> f64 {
        self.value
    }
}

impl PartialEq for Double {
    fn eq(&self, other: &Self) -> bool {
        self.to_bits() == other.to_bits()
    }
}

impl Eq for Double {}

impl Hash for Double {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_bits().hash(state);
    }
}

impl PartialOrd for Double {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Double {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.total_cmp(&other.value)
    }
}

impl From<f64> for Double {
    #[inline]
    fn from(value: f64) -> Self {
        Self { value }
    }
}

impl From<f32> for Double {
    #[inline]
    fn from(value: f32) -> Self {
        Self {
            value: value.into(),
        }
    }
}

impl From<Float> for Double {
    #[inline]
    fn from(value: Float) -> Self {
        f32::from(value).into()
    }
}

impl From<Double> for f64 {
    #[inline]
    fn from(value: Double) -> Self {
        value.value
    }
}

impl FromStr for Double {
    type Err = InvalidLiteralError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        oxsdatatypes::Double::from_str(input)
            .map(|value| Self::from(f64::from(value)))
            .map_err(|error| InvalidLiteralError::new(xsd::DOUBLE, input, error.to_string()))
    }
}

impl fmt::Display for Double {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&oxsdatatypes::Double::from(self.value), f)
    }
}
