use crate::DatatypeHandle;
use std::fmt::{Display, Formatter};

/// The kind of term a [TermId] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TermKind {
    Uri,
    Literal,
    BlankNode,
}

impl Display for TermKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            TermKind::Uri => "uri",
            TermKind::Literal => "literal",
            TermKind::BlankNode => "bnode",
        })
    }
}

/// A reference to a term that is stored in the lexicon instead of being inlined into the key.
///
/// Terms that are too large to be inlined (long strings, IRIs) are assigned an identifier by the
/// lexicon. The identifier is only meaningful within the namespace that assigned it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TermId {
    kind: TermKind,
    id: u64,
}

impl TermId {
    pub const fn new(kind: TermKind, id: u64) -> Self {
        Self { kind, id }
    }

    pub const fn uri(id: u64) -> Self {
        Self::new(TermKind::Uri, id)
    }

    pub const fn literal(id: u64) -> Self {
        Self::new(TermKind::Literal, id)
    }

    pub const fn blank_node(id: u64) -> Self {
        Self::new(TermKind::BlankNode, id)
    }

    pub const fn kind(self) -> TermKind {
        self.kind
    }

    pub const fn id(self) -> u64 {
        self.id
    }
}

/// A datatype handle is the term id of the datatype IRI.
impl From<DatatypeHandle> for TermId {
    fn from(value: DatatypeHandle) -> Self {
        Self::uri(value.as_u64())
    }
}

impl Display for TermId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}
