#![cfg(test)]
#![allow(clippy::panic_in_result_fn)]

use rdf_iv::encoding::resolver::{DatatypeResolver, MemHandleTable};
use rdf_iv::encoding::extension::CompressedTimestampExtension;
use rdf_iv::encoding::{ExtensionKey, IvError};
use rdf_iv::model::vocab::{bigdata, xsd};
use rdf_iv::model::{
    DatatypeHandle, Double, Literal, LiteralRef, LogicalValue, NamedNode, TermId, Timestamp,
};
use rdf_iv::{Namespace, NamespaceConfig};
use std::error::Error;
use std::str::FromStr;

#[test]
fn test_compressed_timestamp_roundtrip() -> Result<(), Box<dyn Error>> {
    let namespace = Namespace::with_default_config();
    let literal = LiteralRef::new_typed_literal("12345678", bigdata::COMPRESSED_TIMESTAMP);

    let encoded = namespace.encode_literal(literal)?;
    let decoded = namespace.decode_to_literal(encoded.as_bytes())?;

    assert_eq!(decoded, Some(literal.into_owned()));
    Ok(())
}

#[test]
fn test_compressed_timestamp_layout() -> Result<(), Box<dyn Error>> {
    let namespace = Namespace::with_default_config();
    let literal = LiteralRef::new_typed_literal("12345678", bigdata::COMPRESSED_TIMESTAMP);

    let encoded = namespace.encode_literal(literal)?;

    insta::assert_snapshot!(encoded, @"301000000000000000010000000000bc614e");
    Ok(())
}

#[test]
fn test_integer_order() -> Result<(), Box<dyn Error>> {
    let namespace = Namespace::with_default_config();

    let negative = namespace.encode(&LogicalValue::Int(-5))?;
    let zero = namespace.encode(&LogicalValue::Int(0))?;
    let positive = namespace.encode(&LogicalValue::Int(7))?;

    assert!(negative < zero);
    assert!(zero < positive);
    Ok(())
}

#[test]
fn test_builtin_layouts() -> Result<(), Box<dyn Error>> {
    let namespace = Namespace::with_default_config();

    insta::assert_snapshot!(namespace.encode(&LogicalValue::Long(-5))?, @"247ffffffffffffffb");
    insta::assert_snapshot!(namespace.encode(&LogicalValue::Byte(-1))?, @"217f");
    insta::assert_snapshot!(namespace.encode(&LogicalValue::Short(1))?, @"228001");
    insta::assert_snapshot!(namespace.encode(&LogicalValue::Double(Double::from(-1.0)))?, @"26400fffffffffffff");
    insta::assert_snapshot!(namespace.encode(&LogicalValue::String("a\0".to_owned()))?, @"286100ff00");
    insta::assert_snapshot!(namespace.encode(&LogicalValue::Term(TermId::uri(258)))?, @"100000000000000102");
    Ok(())
}

#[test]
fn test_truncated_key() {
    let namespace = Namespace::with_default_config();

    let result = namespace.decode(&[0x24]);

    assert!(matches!(result, Err(IvError::MalformedEncoding(_))));
}

#[test]
fn test_builtin_literals() -> Result<(), Box<dyn Error>> {
    let namespace = Namespace::with_default_config();
    let literals = [
        Literal::new_typed_literal("true", xsd::BOOLEAN),
        Literal::new_typed_literal("-128", xsd::BYTE),
        Literal::new_typed_literal("32767", xsd::SHORT),
        Literal::new_typed_literal("42", xsd::INT),
        Literal::new_typed_literal("-9223372036854775808", xsd::LONG),
        Literal::new_typed_literal("INF", xsd::FLOAT),
        Literal::new_typed_literal("NaN", xsd::DOUBLE),
        Literal::new_typed_literal("2015-08-31T10:00:00.500Z", xsd::DATE_TIME),
        Literal::new_simple_literal("hello"),
    ];

    for literal in literals {
        let encoded = namespace.encode_literal(literal.as_ref())?;
        assert_eq!(
            namespace.decode_to_literal(encoded.as_bytes())?,
            Some(literal)
        );
    }
    Ok(())
}

#[test]
fn test_invalid_literals() {
    let namespace = Namespace::with_default_config();
    let literals = [
        LiteralRef::new_typed_literal("256", xsd::BYTE),
        LiteralRef::new_typed_literal("yes", xsd::BOOLEAN),
        LiteralRef::new_typed_literal("2015-02-30T00:00:00Z", xsd::DATE_TIME),
        LiteralRef::new_typed_literal("-1", bigdata::COMPRESSED_TIMESTAMP),
    ];

    for literal in literals {
        let result = namespace.encode_literal(literal);
        assert!(
            matches!(result, Err(IvError::InvalidLiteralFormat(_))),
            "Unexpected result for {literal}: {result:?}"
        );
    }
}

#[test]
fn test_dates_sort_chronologically() -> Result<(), Box<dyn Error>> {
    let namespace = Namespace::with_default_config();
    let dates = [
        "0001-01-01T00:00:00Z",
        "1969-12-31T23:59:59.999Z",
        "1970-01-01T00:00:00Z",
        "2015-08-31T12:00:00+02:00",
        "2015-08-31T10:00:00.001Z",
        "9999-12-31T23:59:59.999Z",
    ];

    let encoded = dates
        .iter()
        .map(|date| -> Result<_, Box<dyn Error>> {
            let value = LogicalValue::DateTime(Timestamp::from_str(date)?);
            Ok(namespace.encode(&value)?)
        })
        .collect::<Result<Vec<_>, Box<dyn Error>>>()?;

    for window in encoded.windows(2) {
        assert!(window[0] < window[1]);
    }
    Ok(())
}

#[test]
fn test_namespaces_are_isolated() -> Result<(), Box<dyn Error>> {
    let first = Namespace::try_new(NamespaceConfig::new("first"))?;
    let second = Namespace::try_new(NamespaceConfig {
        register_compressed_timestamp: false,
        ..NamespaceConfig::new("second")
    })?;
    let literal = LiteralRef::new_typed_literal("1", bigdata::COMPRESSED_TIMESTAMP);

    let encoded = first.encode_literal(literal)?;

    assert_eq!(
        second.decode(encoded.as_bytes()),
        Err(IvError::UnrecognizedExtension(ExtensionKey::Handle(
            DatatypeHandle::new(1)
        )))
    );
    assert_eq!(
        second.encode_literal(literal),
        Err(IvError::UnrecognizedExtension(ExtensionKey::Datatype(
            bigdata::COMPRESSED_TIMESTAMP.into_owned()
        )))
    );
    Ok(())
}

#[test]
fn test_unbound_handle_in_same_namespace() -> Result<(), Box<dyn Error>> {
    let namespace = Namespace::with_default_config();
    let handle = namespace
        .resolver()
        .resolve(NamedNode::new("http://example.com/unregistered")?.as_ref())?;
    let mut key = vec![0x30, 0x10];
    key.extend_from_slice(&handle.to_be_bytes());
    key.push(0);

    assert_eq!(
        namespace.decode(&key),
        Err(IvError::UnrecognizedExtension(ExtensionKey::Handle(handle)))
    );
    Ok(())
}

#[test]
fn test_default_namespace_matches_default_config() -> Result<(), Box<dyn Error>> {
    let default = Namespace::with_default_config();
    let configured = Namespace::try_new(NamespaceConfig::default())?;

    assert_eq!(default.config(), configured.config());
    assert_eq!(default.resolver().entries(), configured.resolver().entries());
    assert_eq!(
        default
            .registry()
            .extensions()
            .iter()
            .map(|extension| extension.id().to_owned())
            .collect::<Vec<_>>(),
        [CompressedTimestampExtension::ID]
    );
    Ok(())
}

#[test]
fn test_restore_handle_table() -> Result<(), Box<dyn Error>> {
    let namespace = Namespace::try_new(NamespaceConfig {
        first_handle: DatatypeHandle::new(100),
        ..NamespaceConfig::default()
    })?;
    let literal = LiteralRef::new_typed_literal("987654321", bigdata::COMPRESSED_TIMESTAMP);
    let encoded = namespace.encode_literal(literal)?;

    let entries = namespace.resolver().entries();
    let restored = Namespace::try_new_with_handle_table(
        NamespaceConfig::new("restored"),
        MemHandleTable::try_from_entries(MemHandleTable::DEFAULT_FIRST_HANDLE, entries)?,
    )?;

    assert_eq!(
        restored.decode_to_literal(encoded.as_bytes())?,
        Some(literal.into_owned())
    );
    assert_eq!(
        restored.resolver().resolve(xsd::DECIMAL)?,
        DatatypeHandle::new(101)
    );
    Ok(())
}

#[test]
fn test_long_strings_are_not_inlined() -> Result<(), Box<dyn Error>> {
    let namespace = Namespace::try_new(NamespaceConfig {
        max_inline_string_len: 4,
        ..NamespaceConfig::default()
    })?;

    namespace.encode_literal(LiteralRef::new_simple_literal("four"))?;
    let result = namespace.encode_literal(LiteralRef::new_simple_literal("fives"));

    assert!(matches!(result, Err(IvError::InvalidLiteralFormat(_))));
    Ok(())
}

#[test]
fn test_statement_key() -> Result<(), Box<dyn Error>> {
    let namespace = Namespace::with_default_config();
    let statement = [
        LogicalValue::Term(TermId::uri(1)),
        LogicalValue::Term(TermId::uri(2)),
        LogicalValue::Extension(Literal::new_typed_literal(
            "42",
            bigdata::COMPRESSED_TIMESTAMP,
        )),
        LogicalValue::String("object".to_owned()),
    ];

    let key = namespace.codec().encode_key(&statement)?;

    assert_eq!(namespace.codec().decode_key(key.as_bytes())?, statement);
    Ok(())
}
