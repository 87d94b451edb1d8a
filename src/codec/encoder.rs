// src/codec/encoder.rs
use super::header::ArrayTag;
use crate::convert::{self, Element};
use crate::error::Result;
use crate::mdarray::MDArray;
use crate::types::ByteOrder;
use bytes::{Bytes, BytesMut};

/// Encode a flattened array and its dimensions into a fresh tagged buffer.
///
/// The header and the payload both use `order`; `ByteOrder::Native` is
/// written as the concrete order of this platform.
///
/// # Errors
///
/// - `DimensionMismatch` if `data.len()` is not the product of `dimensions`
/// - `RankTooLarge` for more than 255 dimensions
/// - `InvalidArgument` for an extent that does not fit in an `i32`
///
/// # Example
///
/// ```
/// use tagged_array::codec::{encode, try_get_array_tag};
/// use tagged_array::ByteOrder;
///
/// let bytes = encode(&[1.1f32, -3.2, 1001.5], &[3], ByteOrder::Native).unwrap();
/// assert_eq!(bytes.len(), 3 * 4 + 4 + 4);
///
/// let tag = try_get_array_tag(&bytes).unwrap();
/// assert_eq!(tag.dimensions(), &[3]);
/// ```
pub fn encode<T: Element>(data: &[T], dimensions: &[usize], order: ByteOrder) -> Result<Bytes> {
    let tag = ArrayTag::for_data::<T>(data.len(), dimensions, order)?;

    let mut buffer = BytesMut::with_capacity(tag.total_len());
    tag.put_header(&mut buffer);
    buffer.resize(tag.total_len(), 0);
    convert::write_slice(data, &mut buffer[tag.header_size()..], tag.byte_order());

    Ok(buffer.freeze())
}

/// Encode a one-dimensional array.
pub fn encode_1d<T: Element>(data: &[T], order: ByteOrder) -> Result<Bytes> {
    encode(data, &[data.len()], order)
}

/// Encode the logical content of an [`MDArray`]; spare capacity is not written.
pub fn encode_mdarray<T: Element>(array: &MDArray<T>, order: ByteOrder) -> Result<Bytes> {
    encode(array.as_slice(), array.dimensions(), order)
}

macro_rules! typed_encoders {
    ($($ty:ty => $name:ident;)*) => {
        $(
            #[doc = concat!("Encode a flattened `", stringify!($ty), "` array with its dimensions.")]
            pub fn $name(data: &[$ty], dimensions: &[usize], order: ByteOrder) -> Result<Bytes> {
                encode(data, dimensions, order)
            }
        )*
    };
}

typed_encoders! {
    i8 => encode_i8;
    i16 => encode_i16;
    i32 => encode_i32;
    i64 => encode_i64;
    f32 => encode_f32;
    f64 => encode_f64;
}
