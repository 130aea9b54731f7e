//! Checks that a codec honors the guarantees of the key format for a set of values.
//!
//! This is mainly intended for authors of extensions. Combine [boundary_values] with
//! representative values of the extension and pass them to [RoundTripVerifier::verify].

use crate::{InternalValue, IvCodec, IvError};
use rdf_iv_model::{Double, Float, LogicalValue, TermId, Timestamp};
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

/// Verifies round trip, determinism, uniqueness and order preservation of encoded values.
#[derive(Debug, Clone, Copy)]
pub struct RoundTripVerifier<'codec> {
    codec: &'codec IvCodec,
}

/// A summary of a successful verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerificationReport {
    values: usize,
    compared_pairs: usize,
}

impl VerificationReport {
    /// The number of verified values.
    pub fn values(&self) -> usize {
        self.values
    }

    /// The number of value pairs whose natural order has been compared to their byte order.
    pub fn compared_pairs(&self) -> usize {
        self.compared_pairs
    }
}

/// A single guarantee that does not hold.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    /// The value could not be encoded.
    Encode {
        value: LogicalValue,
        error: IvError,
    },
    /// The encoded value could not be decoded.
    Decode {
        value: LogicalValue,
        encoded: InternalValue,
        error: IvError,
    },
    /// Decoding produced a different value.
    RoundTrip {
        value: LogicalValue,
        decoded: LogicalValue,
    },
    /// Encoding the same value twice produced different bytes.
    Nondeterministic {
        value: LogicalValue,
        first: InternalValue,
        second: InternalValue,
    },
    /// Two different values share the same bytes.
    Collision {
        lhs: LogicalValue,
        rhs: LogicalValue,
        encoded: InternalValue,
    },
    /// The byte order disagrees with the natural order.
    Order {
        lhs: LogicalValue,
        rhs: LogicalValue,
        expected: Ordering,
        actual: Ordering,
    },
    /// The natural order of two values could not be determined.
    Compare {
        lhs: LogicalValue,
        rhs: LogicalValue,
        error: IvError,
    },
}

impl Display for Violation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Violation::Encode { value, error } => write!(f, "Cannot encode {value}: {error}"),
            Violation::Decode {
                value,
                encoded,
                error,
            } => write!(f, "Cannot decode {value} from {encoded}: {error}"),
            Violation::RoundTrip { value, decoded } => {
                write!(f, "{value} was decoded as {decoded}")
            }
            Violation::Nondeterministic {
                value,
                first,
                second,
            } => write!(f, "{value} was encoded as {first} and {second}"),
            Violation::Collision { lhs, rhs, encoded } => {
                write!(f, "{lhs} and {rhs} are both encoded as {encoded}")
            }
            Violation::Order {
                lhs,
                rhs,
                expected,
                actual,
            } => write!(
                f,
                "{lhs} is {expected:?} than {rhs}, but its encoding is {actual:?}"
            ),
            Violation::Compare { lhs, rhs, error } => {
                write!(f, "Cannot compare {lhs} and {rhs}: {error}")
            }
        }
    }
}

/// Returned if at least one guarantee does not hold.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub struct VerificationFailure {
    violations: Vec<Violation>,
}

impl VerificationFailure {
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }
}

impl Display for VerificationFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} violation(s) found:", self.violations.len())?;
        for violation in &self.violations {
            writeln!(f, "- {violation}")?;
        }
        Ok(())
    }
}

impl<'codec> RoundTripVerifier<'codec> {
    /// Creates a new [RoundTripVerifier] for `codec`.
    pub fn new(codec: &'codec IvCodec) -> Self {
        Self { codec }
    }

    /// Verifies all `values` and every pair of them.
    ///
    /// Values that cannot be encoded are reported and excluded from the pairwise checks.
    pub fn verify(
        &self,
        values: &[LogicalValue],
    ) -> Result<VerificationReport, VerificationFailure> {
        let mut violations = Vec::new();
        let mut encoded = Vec::with_capacity(values.len());

        for value in values {
            if let Some(bytes) = self.verify_single(value, &mut violations) {
                encoded.push((value, bytes));
            }
        }

        let mut compared_pairs = 0;
        for (i, (lhs, lhs_bytes)) in encoded.iter().enumerate() {
            for (rhs, rhs_bytes) in &encoded[i + 1..] {
                if self.verify_pair(lhs, lhs_bytes, rhs, rhs_bytes, &mut violations) {
                    compared_pairs += 1;
                }
            }
        }

        if violations.is_empty() {
            Ok(VerificationReport {
                values: values.len(),
                compared_pairs,
            })
        } else {
            Err(VerificationFailure { violations })
        }
    }

    fn verify_single(
        &self,
        value: &LogicalValue,
        violations: &mut Vec<Violation>,
    ) -> Option<InternalValue> {
        let first = match self.codec.encode(value) {
            Ok(first) => first,
            Err(error) => {
                violations.push(Violation::Encode {
                    value: value.clone(),
                    error,
                });
                return None;
            }
        };

        match self.codec.encode(value) {
            Ok(second) if second == first => {}
            Ok(second) => violations.push(Violation::Nondeterministic {
                value: value.clone(),
                first: first.clone(),
                second,
            }),
            Err(error) => violations.push(Violation::Encode {
                value: value.clone(),
                error,
            }),
        }

        match self.codec.decode(first.as_bytes()) {
            Ok(decoded) => {
                if !self.is_same_value(value, &decoded) {
                    violations.push(Violation::RoundTrip {
                        value: value.clone(),
                        decoded,
                    });
                }
            }
            Err(error) => violations.push(Violation::Decode {
                value: value.clone(),
                encoded: first.clone(),
                error,
            }),
        }

        Some(first)
    }

    /// Returns whether the natural order of the pair has been compared.
    fn verify_pair(
        &self,
        lhs: &LogicalValue,
        lhs_bytes: &InternalValue,
        rhs: &LogicalValue,
        rhs_bytes: &InternalValue,
        violations: &mut Vec<Violation>,
    ) -> bool {
        let actual = lhs_bytes.cmp(rhs_bytes);
        let expected = match self.codec.compare_values(lhs, rhs) {
            Ok(expected) => expected,
            Err(error) => {
                violations.push(Violation::Compare {
                    lhs: lhs.clone(),
                    rhs: rhs.clone(),
                    error,
                });
                return false;
            }
        };

        if actual == Ordering::Equal && expected != Some(Ordering::Equal) {
            violations.push(Violation::Collision {
                lhs: lhs.clone(),
                rhs: rhs.clone(),
                encoded: lhs_bytes.clone(),
            });
            return expected.is_some();
        }

        match expected {
            Some(expected) if expected != actual => {
                violations.push(Violation::Order {
                    lhs: lhs.clone(),
                    rhs: rhs.clone(),
                    expected,
                    actual,
                });
                true
            }
            Some(_) => true,
            None => false,
        }
    }

    /// Extension values are equal if their extension considers them equal.
    fn is_same_value(&self, value: &LogicalValue, decoded: &LogicalValue) -> bool {
        match (value, decoded) {
            (LogicalValue::Extension(_), LogicalValue::Extension(_)) => matches!(
                self.codec.compare_values(value, decoded),
                Ok(Some(Ordering::Equal))
            ),
            _ => value == decoded,
        }
    }
}

/// Returns the boundary values of all built-in kinds.
///
/// This includes zero and the extremes of every numeric kind, the extremes of the timestamp range,
/// the special floating point values, the empty string and both booleans.
pub fn boundary_values() -> Vec<LogicalValue> {
    vec![
        LogicalValue::Term(TermId::uri(0)),
        LogicalValue::Term(TermId::uri(u64::MAX)),
        LogicalValue::Term(TermId::literal(1)),
        LogicalValue::Term(TermId::blank_node(1)),
        LogicalValue::Boolean(false),
        LogicalValue::Boolean(true),
        LogicalValue::Byte(i8::MIN),
        LogicalValue::Byte(-1),
        LogicalValue::Byte(0),
        LogicalValue::Byte(i8::MAX),
        LogicalValue::Short(i16::MIN),
        LogicalValue::Short(0),
        LogicalValue::Short(i16::MAX),
        LogicalValue::Int(i32::MIN),
        LogicalValue::Int(-1),
        LogicalValue::Int(0),
        LogicalValue::Int(1),
        LogicalValue::Int(i32::MAX),
        LogicalValue::Long(i64::MIN),
        LogicalValue::Long(0),
        LogicalValue::Long(i64::MAX),
        LogicalValue::Float(Float::NEG_INFINITY),
        LogicalValue::Float(Float::MIN),
        LogicalValue::Float(Float::from(-0.0)),
        LogicalValue::Float(Float::from(0.0)),
        LogicalValue::Float(Float::MAX),
        LogicalValue::Float(Float::INFINITY),
        LogicalValue::Float(Float::NAN),
        LogicalValue::Double(Double::NEG_INFINITY),
        LogicalValue::Double(Double::MIN),
        LogicalValue::Double(Double::from(-0.0)),
        LogicalValue::Double(Double::from(0.0)),
        LogicalValue::Double(Double::from(f64::MIN_POSITIVE)),
        LogicalValue::Double(Double::MAX),
        LogicalValue::Double(Double::INFINITY),
        LogicalValue::Double(Double::NAN),
        LogicalValue::DateTime(Timestamp::MIN),
        LogicalValue::DateTime(Timestamp::UNIX_EPOCH),
        LogicalValue::DateTime(Timestamp::MAX),
        LogicalValue::String(String::new()),
        LogicalValue::String("\0".to_owned()),
        LogicalValue::String("a".to_owned()),
    ]
}
