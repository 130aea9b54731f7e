use crate::codec::KeyReader;
use crate::extension::{Extension, ResolvedDatatype};
use crate::resolver::DatatypeResolverRef;
use crate::IvResult;
use rdf_iv_model::vocab::bigdata;
use rdf_iv_model::{DatatypeHandle, InvalidLiteralError, Literal, NamedNodeRef};
use std::cmp::Ordering;
use std::str::FromStr;

/// Encodes `rdf-iv:compressedTimestamp` literals as a fixed-width unsigned integer.
///
/// The lexical form is a non-negative decimal numeral that fits into 64 bits. A leading `+` and
/// leading zeros are accepted, the decoded literal always uses the shortest form.
///
/// ```text
/// 0x30 0x10 <handle: u64 BE> <value: u64 BE>
/// ```
#[derive(Debug)]
pub struct CompressedTimestampExtension {
    datatype: ResolvedDatatype,
}

impl CompressedTimestampExtension {
    /// The id of this extension.
    pub const ID: &'static str = "rdf-iv.compressed-timestamp";

    /// Creates a new [CompressedTimestampExtension] that obtains its handle from `resolver`.
    pub fn new(resolver: DatatypeResolverRef) -> Self {
        Self {
            datatype: ResolvedDatatype::new(bigdata::COMPRESSED_TIMESTAMP.into_owned(), resolver),
        }
    }

    fn parse(lexical: &str) -> IvResult<u64> {
        u64::from_str(lexical).map_err(|error| {
            InvalidLiteralError::new(bigdata::COMPRESSED_TIMESTAMP, lexical, error.to_string())
                .into()
        })
    }
}

impl Extension for CompressedTimestampExtension {
    fn id(&self) -> &str {
        Self::ID
    }

    fn datatype(&self) -> NamedNodeRef<'_> {
        self.datatype.datatype()
    }

    fn handle(&self) -> IvResult<DatatypeHandle> {
        self.datatype.handle()
    }

    fn encode_literal(&self, lexical: &str, buffer: &mut Vec<u8>) -> IvResult<()> {
        let value = Self::parse(lexical)?;
        self.datatype.write_header(buffer)?;
        buffer.extend_from_slice(&value.to_be_bytes());
        Ok(())
    }

    fn decode_literal(&self, reader: &mut KeyReader<'_>) -> IvResult<Literal> {
        self.datatype.read_header(reader)?;
        let value = u64::from_be_bytes(reader.read_array()?);
        Ok(Literal::new_typed_literal(
            value.to_string(),
            self.datatype.datatype(),
        ))
    }

    fn compare_lexical(&self, lhs: &str, rhs: &str) -> IvResult<Ordering> {
        Ok(Self::parse(lhs)?.cmp(&Self::parse(rhs)?))
    }
}
