//! Inline strings are terminated by `0x00`. A `0x00` within the string is escaped as
//! `0x00 0xFF`, so a string sorts before all strings it is a prefix of.

use crate::codec::KeyReader;
use crate::{IvError, IvResult};

const TERMINATOR: u8 = 0x00;
const ESCAPE: u8 = 0xFF;

pub(crate) fn write_string(buffer: &mut Vec<u8>, value: &str) {
    buffer.reserve(value.len() + 1);
    for byte in value.bytes() {
        buffer.push(byte);
        if byte == TERMINATOR {
            buffer.push(ESCAPE);
        }
    }
    buffer.push(TERMINATOR);
}

pub(crate) fn read_string(reader: &mut KeyReader<'_>) -> IvResult<String> {
    let start = reader.position();
    let mut bytes = Vec::new();
    loop {
        let byte = reader
            .read_u8()
            .map_err(|_| IvError::malformed(start, "string is not terminated"))?;
        if byte != TERMINATOR {
            bytes.push(byte);
            continue;
        }

        if reader.peek_u8() == Some(ESCAPE) {
            reader.read_u8()?;
            bytes.push(TERMINATOR);
        } else {
            break;
        }
    }

    String::from_utf8(bytes).map_err(|error| {
        IvError::malformed(
            start + error.utf8_error().valid_up_to(),
            "string is not valid UTF-8",
        )
    })
}
