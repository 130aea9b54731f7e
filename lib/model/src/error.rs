use oxrdf::NamedNodeRef;
use std::fmt::{Display, Formatter};

/// Returned if a lexical form cannot be represented by the value space of its datatype.
///
/// For example, `"256"^^xsd:byte` or `"yes"^^xsd:boolean`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub struct InvalidLiteralError {
    datatype: String,
    lexical: String,
    reason: String,
}

impl InvalidLiteralError {
    /// Creates a new [InvalidLiteralError].
    pub fn new(
        datatype: NamedNodeRef<'_>,
        lexical: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            datatype: datatype.as_str().to_owned(),
            lexical: lexical.into(),
            reason: reason.into(),
        }
    }

    /// The IRI of the datatype the lexical form was checked against.
    pub fn datatype(&self) -> &str {
        &self.datatype
    }

    /// The rejected lexical form.
    pub fn lexical(&self) -> &str {
        &self.lexical
    }

    /// Why the lexical form was rejected.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl Display for InvalidLiteralError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "'{}' is not a valid lexical form of <{}>: {}",
            self.lexical, self.datatype, self.reason
        )
    }
}
