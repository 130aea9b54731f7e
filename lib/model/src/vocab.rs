pub use oxrdf::vocab::{rdf, xsd};

/// Datatypes of the `http://www.bigdata.com/rdf/datatype#` namespace.
pub mod bigdata {
    use oxrdf::NamedNodeRef;

    /// A timestamp that is stored as a plain unsigned numeral instead of an `xsd:dateTime`.
    pub const COMPRESSED_TIMESTAMP: NamedNodeRef<'_> = NamedNodeRef::new_unchecked(
        "http://www.bigdata.com/rdf/datatype#compressedTimestamp",
    );
}
