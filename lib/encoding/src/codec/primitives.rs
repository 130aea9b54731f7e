//! Fixed-width encodings of the primitive kinds.
//!
//! Signed integers are written big-endian with the sign bit flipped, so negative values sort
//! before positive ones. Floating point numbers use the same transformation as
//! [f64::total_cmp]: positive values get their sign bit set, negative values have all bits
//! inverted.

use crate::codec::KeyReader;
use crate::{IvError, IvResult};
use rdf_iv_model::{Double, Float, Timestamp};

macro_rules! sign_flipped_int {
    ($WRITE: ident, $READ: ident, $INT: ty) => {
        #[inline]
        pub(crate) fn $WRITE(buffer: &mut Vec<u8>, value: $INT) {
            let mut bytes = value.to_be_bytes();
            bytes[0] ^= 0x80;
            buffer.extend_from_slice(&bytes);
        }

        #[inline]
        pub(crate) fn $READ(reader: &mut KeyReader<'_>) -> IvResult<$INT> {
            let mut bytes = reader.read_array::<{ size_of::<$INT>() }>()?;
            bytes[0] ^= 0x80;
            Ok(<$INT>::from_be_bytes(bytes))
        }
    };
}

sign_flipped_int!(write_i8, read_i8, i8);
sign_flipped_int!(write_i16, read_i16, i16);
sign_flipped_int!(write_i32, read_i32, i32);
sign_flipped_int!(write_i64, read_i64, i64);

macro_rules! sortable_float {
    ($WRITE: ident, $READ: ident, $FLOAT: ty, $BITS: ty) => {
        #[inline]
        pub(crate) fn $WRITE(buffer: &mut Vec<u8>, value: $FLOAT) {
            const SIGN: $BITS = 1 << (<$BITS>::BITS - 1);
            let bits = value.to_bits();
            let sortable = if bits & SIGN == 0 { bits | SIGN } else { !bits };
            buffer.extend_from_slice(&sortable.to_be_bytes());
        }

        #[inline]
        pub(crate) fn $READ(reader: &mut KeyReader<'_>) -> IvResult<$FLOAT> {
            const SIGN: $BITS = 1 << (<$BITS>::BITS - 1);
            let bytes = reader.read_array::<{ size_of::<$BITS>() }>()?;
            let sortable = <$BITS>::from_be_bytes(bytes);
            let bits = if sortable & SIGN == 0 {
                !sortable
            } else {
                sortable & !SIGN
            };
            Ok(<$FLOAT>::from_bits(bits))
        }
    };
}

sortable_float!(write_float, read_float, Float, u32);
sortable_float!(write_double, read_double, Double, u64);

pub(crate) fn write_timestamp(buffer: &mut Vec<u8>, value: Timestamp) {
    write_i64(buffer, value.as_millis());
}

pub(crate) fn read_timestamp(reader: &mut KeyReader<'_>) -> IvResult<Timestamp> {
    let start = reader.position();
    let millis = read_i64(reader)?;
    Timestamp::try_from_millis(millis)
        .map_err(|error| IvError::malformed(start, error.to_string()))
}
