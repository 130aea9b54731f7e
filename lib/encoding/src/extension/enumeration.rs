use crate::codec::KeyReader;
use crate::extension::{Extension, ResolvedDatatype};
use crate::resolver::DatatypeResolverRef;
use crate::IvResult;
use rdf_iv_model::{DatatypeHandle, InvalidLiteralError, Literal, NamedNode, NamedNodeRef};
use std::cmp::Ordering;
use thiserror::Error;

/// Returned if the labels of an [EnumExtension] are invalid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnumDefinitionError {
    #[error("An enumeration must have at least one label.")]
    NoLabels,
    #[error("An enumeration can have at most 256 labels, got {0}.")]
    TooManyLabels(usize),
    #[error("Enumeration labels must not be empty.")]
    EmptyLabel,
    #[error("The label '{0}' occurs more than once.")]
    DuplicateLabel(String),
}

/// Encodes a datatype with a closed set of labels as the ordinal of the label.
///
/// The natural order of the datatype is the order in which the labels are declared.
///
/// ```text
/// 0x30 0x10 <handle: u64 BE> <ordinal: u8>
/// ```
#[derive(Debug)]
pub struct EnumExtension {
    id: String,
    datatype: ResolvedDatatype,
    labels: Vec<String>,
}

impl EnumExtension {
    /// The maximum number of labels of an enumeration.
    pub const MAX_LABELS: usize = 256;

    /// Creates a new [EnumExtension] for `datatype` with the given `labels`.
    pub fn try_new(
        datatype: NamedNode,
        labels: impl IntoIterator<Item = impl Into<String>>,
        resolver: DatatypeResolverRef,
    ) -> Result<Self, EnumDefinitionError> {
        let labels = labels.into_iter().map(Into::into).collect::<Vec<String>>();
        if labels.is_empty() {
            return Err(EnumDefinitionError::NoLabels);
        }
        if labels.len() > Self::MAX_LABELS {
            return Err(EnumDefinitionError::TooManyLabels(labels.len()));
        }
        for (i, label) in labels.iter().enumerate() {
            if label.is_empty() {
                return Err(EnumDefinitionError::EmptyLabel);
            }
            if labels[..i].contains(label) {
                return Err(EnumDefinitionError::DuplicateLabel(label.clone()));
            }
        }

        Ok(Self {
            id: format!("rdf-iv.enum{labels:?}"),
            datatype: ResolvedDatatype::new(datatype, resolver),
            labels,
        })
    }

    /// The labels in their natural order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    fn ordinal(&self, lexical: &str) -> IvResult<u8> {
        self.labels
            .iter()
            .position(|label| label == lexical)
            .and_then(|ordinal| u8::try_from(ordinal).ok())
            .ok_or_else(|| {
                let datatype = self.datatype.datatype();
                InvalidLiteralError::new(datatype, lexical, "unknown label").into()
            })
    }
}

impl Extension for EnumExtension {
    fn id(&self) -> &str {
        &self.id
    }

    fn datatype(&self) -> NamedNodeRef<'_> {
        self.datatype.datatype()
    }

    fn handle(&self) -> IvResult<DatatypeHandle> {
        self.datatype.handle()
    }

    fn encode_literal(&self, lexical: &str, buffer: &mut Vec<u8>) -> IvResult<()> {
        let ordinal = self.ordinal(lexical)?;
        self.datatype.write_header(buffer)?;
        buffer.push(ordinal);
        Ok(())
    }

    fn decode_literal(&self, reader: &mut KeyReader<'_>) -> IvResult<Literal> {
        self.datatype.read_header(reader)?;
        let ordinal = reader.read_u8()?;
        let label = self.labels.get(usize::from(ordinal)).ok_or_else(|| {
            reader.error_at_previous(format!(
                "ordinal {ordinal} is out of range for {} labels",
                self.labels.len()
            ))
        })?;
        Ok(Literal::new_typed_literal(label, self.datatype()))
    }

    fn compare_lexical(&self, lhs: &str, rhs: &str) -> IvResult<Ordering> {
        Ok(self.ordinal(lhs)?.cmp(&self.ordinal(rhs)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::MemHandleTable;
    use crate::IvError;
    use std::sync::Arc;

    fn color() -> NamedNode {
        NamedNode::new_unchecked("http://example.com/color")
    }

    fn extension() -> EnumExtension {
        EnumExtension::try_new(
            color(),
            ["red", "green", "blue"],
            Arc::new(MemHandleTable::new()),
        )
        .unwrap()
    }

    #[test]
    fn test_declaration_order() {
        let extension = extension();
        let mut red = Vec::new();
        let mut blue = Vec::new();
        extension.encode_literal("red", &mut red).unwrap();
        extension.encode_literal("blue", &mut blue).unwrap();

        assert!(red < blue);
        assert_eq!(
            extension.compare_lexical("blue", "green").unwrap(),
            Ordering::Greater
        );
        assert_eq!(
            extension
                .decode_literal(&mut KeyReader::new(&blue))
                .unwrap()
                .value(),
            "blue"
        );
    }

    #[test]
    fn test_unknown_label() {
        let error = extension()
            .encode_literal("purple", &mut Vec::new())
            .unwrap_err();
        assert!(matches!(error, IvError::InvalidLiteralFormat(_)));
    }

    #[test]
    fn test_ordinal_out_of_range() {
        let extension = extension();
        let mut buffer = Vec::new();
        extension.encode_literal("red", &mut buffer).unwrap();
        if let Some(ordinal) = buffer.last_mut() {
            *ordinal = 3;
        }

        let error = extension
            .decode_literal(&mut KeyReader::new(&buffer))
            .unwrap_err();
        let IvError::MalformedEncoding(error) = error else {
            panic!("Unexpected error: {error:?}");
        };
        assert_eq!(error.offset(), buffer.len() - 1);
    }

    #[test]
    fn test_invalid_definitions() {
        let resolver: DatatypeResolverRef = Arc::new(MemHandleTable::new());
        let no_labels: [&str; 0] = [];
        assert_eq!(
            EnumExtension::try_new(color(), no_labels, Arc::clone(&resolver)).unwrap_err(),
            EnumDefinitionError::NoLabels
        );
        assert_eq!(
            EnumExtension::try_new(color(), ["a", ""], Arc::clone(&resolver)).unwrap_err(),
            EnumDefinitionError::EmptyLabel
        );
        assert_eq!(
            EnumExtension::try_new(color(), ["a", "b", "a"], Arc::clone(&resolver))
                .unwrap_err(),
            EnumDefinitionError::DuplicateLabel("a".to_owned())
        );
        assert_eq!(
            EnumExtension::try_new(color(), (0..257).map(|i| i.to_string()), resolver)
                .unwrap_err(),
            EnumDefinitionError::TooManyLabels(257)
        );
    }

    #[test]
    fn test_id_depends_on_labels() {
        let resolver: DatatypeResolverRef = Arc::new(MemHandleTable::new());
        let first =
            EnumExtension::try_new(color(), ["a,b"], Arc::clone(&resolver)).unwrap();
        let second = EnumExtension::try_new(color(), ["a", "b"], resolver).unwrap();
        assert_ne!(first.id(), second.id());
        assert_eq!(second.id(), r#"rdf-iv.enum["a", "b"]"#);
    }
}
