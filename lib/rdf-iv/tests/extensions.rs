#![cfg(test)]
#![allow(clippy::panic_in_result_fn)]

use rdf_iv::encoding::codec::KeyReader;
use rdf_iv::encoding::extension::{Extension, ResolvedDatatype};
use rdf_iv::encoding::resolver::{DatatypeResolver, DatatypeResolverRef, MemHandleTable};
use rdf_iv::encoding::verify::{boundary_values, Violation};
use rdf_iv::encoding::{IvError, IvResult};
use rdf_iv::model::vocab::bigdata;
use rdf_iv::model::{
    DatatypeHandle, InvalidLiteralError, Literal, LogicalValue, NamedNode, NamedNodeRef,
};
use rdf_iv::{Namespace, NamespaceConfig};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::error::Error;
use std::sync::Arc;

fn compressed_timestamp(lexical: &str) -> LogicalValue {
    LogicalValue::Extension(Literal::new_typed_literal(
        lexical,
        bigdata::COMPRESSED_TIMESTAMP,
    ))
}

fn color() -> NamedNode {
    NamedNode::new_unchecked("http://example.com/color")
}

#[test]
fn test_register_twice_is_idempotent() -> Result<(), Box<dyn Error>> {
    let namespace = Namespace::with_default_config();

    namespace.register_extension(namespace.compressed_timestamp_extension())?;
    namespace.register_extension(namespace.compressed_timestamp_extension())?;

    assert_eq!(namespace.registry().len(), 1);
    Ok(())
}

#[test]
fn test_register_conflicting_extension() -> Result<(), Box<dyn Error>> {
    let namespace = Namespace::with_default_config();
    let other = namespace.enum_extension(
        bigdata::COMPRESSED_TIMESTAMP.into_owned(),
        ["before", "after"],
    )?;

    let result = namespace.register_extension(other);

    assert!(matches!(
        result,
        Err(IvError::ConflictingRegistration { .. })
    ));
    Ok(())
}

#[test]
fn test_concurrent_registration() -> Result<(), Box<dyn Error>> {
    let namespace = Namespace::try_new(NamespaceConfig {
        register_compressed_timestamp: false,
        ..NamespaceConfig::default()
    })?;

    let results = std::thread::scope(|scope| {
        let workers = (0..8)
            .map(|_| {
                scope.spawn(|| {
                    namespace.register_extension(namespace.compressed_timestamp_extension())
                })
            })
            .collect::<Vec<_>>();
        workers
            .into_iter()
            .map(|worker| worker.join().unwrap())
            .collect::<Vec<_>>()
    });

    assert!(results.iter().all(Result::is_ok));
    assert_eq!(namespace.registry().len(), 1);
    assert_eq!(namespace.resolver().len(), 1);
    Ok(())
}

#[test]
fn test_concurrent_encoding_allocates_one_handle() -> Result<(), Box<dyn Error>> {
    let namespace = Namespace::try_new(NamespaceConfig {
        register_compressed_timestamp: false,
        ..NamespaceConfig::default()
    })?;
    let extension = namespace.enum_extension(color(), ["red", "green", "blue"])?;

    let handles = std::thread::scope(|scope| {
        let workers = (0..16)
            .map(|_| scope.spawn(|| extension.handle().unwrap()))
            .collect::<Vec<_>>();
        workers
            .into_iter()
            .map(|worker| worker.join().unwrap())
            .collect::<HashSet<_>>()
    });

    assert_eq!(handles.len(), 1);
    assert_eq!(namespace.resolver().entries().len(), 1);
    Ok(())
}

#[test]
fn test_concurrent_encode_and_decode() -> Result<(), Box<dyn Error>> {
    let namespace = Namespace::with_default_config();
    namespace.register_extension(namespace.enum_extension(color(), ["red", "green", "blue"])?)?;
    let values = ["0", "12345678", "18446744073709551615"]
        .map(compressed_timestamp)
        .into_iter()
        .chain(["red", "green", "blue"].map(|label| {
            LogicalValue::Extension(Literal::new_typed_literal(label, color()))
        }))
        .collect::<Vec<_>>();
    let expected = values
        .iter()
        .map(|value| namespace.encode(value))
        .collect::<Result<Vec<_>, _>>()?;

    let results = std::thread::scope(|scope| {
        let workers = (0..8)
            .map(|_| {
                scope.spawn(|| {
                    let mut encoded = Vec::new();
                    for _ in 0..100 {
                        for value in &values {
                            let bytes = namespace.encode(value)?;
                            assert_eq!(&namespace.decode(bytes.as_bytes())?, value);
                            encoded.push(bytes);
                        }
                    }
                    IvResult::Ok(encoded)
                })
            })
            .collect::<Vec<_>>();
        workers
            .into_iter()
            .map(|worker| worker.join().unwrap())
            .collect::<Vec<_>>()
    });

    for result in results {
        let encoded = result?;
        for chunk in encoded.chunks(values.len()) {
            assert_eq!(chunk, expected.as_slice());
        }
    }
    assert_eq!(namespace.resolver().len(), 2);
    Ok(())
}

#[test]
fn test_extension_of_other_namespace_is_rejected() -> Result<(), Box<dyn Error>> {
    let namespace = Namespace::with_default_config();
    let other = Namespace::with_default_config();
    other.resolver().resolve(NamedNode::new("http://example.com/shift")?.as_ref())?;
    let foreign = other.enum_extension(color(), ["red", "green", "blue"])?;

    let result = namespace.register_extension(foreign);

    assert!(matches!(
        result,
        Err(IvError::ConflictingRegistration { .. })
    ));
    assert!(namespace.registry().lookup(color().as_ref()).is_none());

    let local = namespace.enum_extension(color(), ["red", "green", "blue"])?;
    namespace.register_extension(local)?;
    let encoded = namespace.encode(&LogicalValue::Extension(Literal::new_typed_literal(
        "green",
        color(),
    )))?;
    let restored = Namespace::try_new_with_handle_table(
        NamespaceConfig::default(),
        MemHandleTable::try_from_entries(
            MemHandleTable::DEFAULT_FIRST_HANDLE,
            namespace.resolver().entries(),
        )?,
    )?;
    restored.register_extension(restored.enum_extension(color(), ["red", "green", "blue"])?)?;
    assert_eq!(
        restored.decode_to_literal(encoded.as_bytes())?,
        Some(Literal::new_typed_literal("green", color()))
    );
    Ok(())
}

#[test]
fn test_enum_extension_order() -> Result<(), Box<dyn Error>> {
    let namespace = Namespace::with_default_config();
    namespace.register_extension(namespace.enum_extension(color(), ["red", "green", "blue"])?)?;

    let encode = |label: &str| {
        namespace.encode(&LogicalValue::Extension(Literal::new_typed_literal(
            label,
            color(),
        )))
    };
    let red = encode("red")?;
    let green = encode("green")?;
    let blue = encode("blue")?;

    assert!(red < green);
    assert!(green < blue);
    assert_eq!(
        namespace.decode_to_literal(blue.as_bytes())?,
        Some(Literal::new_typed_literal("blue", color()))
    );
    Ok(())
}

#[test]
fn test_verify_compressed_timestamps() -> Result<(), Box<dyn Error>> {
    let namespace = Namespace::with_default_config();
    let mut values = boundary_values();
    values.extend(
        ["0", "1", "9", "10", "12345678", "18446744073709551615"]
            .into_iter()
            .map(compressed_timestamp),
    );

    let report = namespace.verifier().verify(&values)?;

    assert_eq!(report.values(), values.len());
    assert!(report.compared_pairs() >= 15);
    Ok(())
}

#[test]
fn test_verify_non_canonical_lexical_forms() -> Result<(), Box<dyn Error>> {
    let namespace = Namespace::with_default_config();
    let values = [compressed_timestamp("+0042"), compressed_timestamp("42")];

    let report = namespace.verifier().verify(&values)?;

    assert_eq!(report.compared_pairs(), 1);
    Ok(())
}

#[test]
fn test_verify_enum_extension() -> Result<(), Box<dyn Error>> {
    let namespace = Namespace::with_default_config();
    namespace.register_extension(namespace.enum_extension(color(), ["red", "green", "blue"])?)?;
    let values = ["red", "green", "blue"]
        .map(|label| LogicalValue::Extension(Literal::new_typed_literal(label, color())));

    namespace.verifier().verify(&values)?;
    Ok(())
}

/// Encodes numerals as text, so that "10" sorts before "9".
#[derive(Debug)]
struct TextualNumeralExtension {
    datatype: ResolvedDatatype,
}

impl TextualNumeralExtension {
    fn parse(&self, lexical: &str) -> IvResult<u64> {
        lexical.parse().map_err(|_| {
            InvalidLiteralError::new(self.datatype.datatype(), lexical, "not a numeral").into()
        })
    }
}

impl Extension for TextualNumeralExtension {
    fn id(&self) -> &str {
        "test.textual-numeral"
    }

    fn datatype(&self) -> NamedNodeRef<'_> {
        self.datatype.datatype()
    }

    fn handle(&self) -> IvResult<DatatypeHandle> {
        self.datatype.handle()
    }

    fn encode_literal(&self, lexical: &str, buffer: &mut Vec<u8>) -> IvResult<()> {
        let value = self.parse(lexical)?;
        self.datatype.write_header(buffer)?;
        buffer.extend_from_slice(value.to_string().as_bytes());
        buffer.push(0);
        Ok(())
    }

    fn decode_literal(&self, reader: &mut KeyReader<'_>) -> IvResult<Literal> {
        self.datatype.read_header(reader)?;
        let mut lexical = String::new();
        loop {
            match reader.read_u8()? {
                0 => break,
                digit => lexical.push(char::from(digit)),
            }
        }
        Ok(Literal::new_typed_literal(lexical, self.datatype()))
    }

    fn compare_lexical(&self, lhs: &str, rhs: &str) -> IvResult<Ordering> {
        Ok(self.parse(lhs)?.cmp(&self.parse(rhs)?))
    }
}

#[test]
fn test_verifier_rejects_order_breaking_extension() -> Result<(), Box<dyn Error>> {
    let namespace = Namespace::with_default_config();
    let datatype = NamedNode::new("http://example.com/numeral")?;
    let resolver: DatatypeResolverRef = Arc::<MemHandleTable>::clone(namespace.resolver());
    namespace.register_extension(Arc::new(TextualNumeralExtension {
        datatype: ResolvedDatatype::new(datatype.clone(), resolver),
    }))?;
    let values = ["9", "10"].map(|lexical| {
        LogicalValue::Extension(Literal::new_typed_literal(lexical, datatype.clone()))
    });

    let failure = namespace.verifier().verify(&values).unwrap_err();

    assert_eq!(failure.violations().len(), 1);
    let Violation::Order {
        expected, actual, ..
    } = &failure.violations()[0]
    else {
        panic!("Unexpected violation: {failure}");
    };
    assert_eq!(*expected, Ordering::Less);
    assert_eq!(*actual, Ordering::Greater);
    Ok(())
}
