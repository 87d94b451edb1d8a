// src/codec/decoder.rs
use super::header::{try_get_array_tag, ArrayTag};
use crate::convert::{self, Element};
use crate::mdarray::MDArray;

/// Header of `bytes` if it is a well-formed tagged array holding `T`.
fn tag_for<T: Element>(bytes: &[u8]) -> Option<ArrayTag> {
    let tag = try_get_array_tag(bytes)?;
    if !tag.holds::<T>() {
        tracing::trace!(
            found = %tag.encoding(),
            requested = T::NAME,
            "tagged array element type mismatch"
        );
        return None;
    }
    Some(tag)
}

fn decode_payload<T: Element>(bytes: &[u8], tag: &ArrayTag) -> Vec<T> {
    let mut values = vec![T::default(); tag.element_count()];
    convert::read_slice(&bytes[tag.header_size()..], &mut values, tag.byte_order());
    values
}

/// Decode a tagged array of any rank.
///
/// Returns `None` when `bytes` is not a well-formed tagged array or when it
/// holds a different element type than `T`. No conversion between element
/// types is attempted.
///
/// # Example
///
/// ```
/// use tagged_array::codec::{encode, try_to_array};
/// use tagged_array::ByteOrder;
///
/// let bytes = encode(&[1i32, 2, 3, 4, 5, 6], &[2, 3], ByteOrder::Big).unwrap();
/// let array = try_to_array::<i32>(&bytes).unwrap();
/// assert_eq!(array[[1, 2]], 6);
///
/// assert!(try_to_array::<f32>(&bytes).is_none());
/// ```
pub fn try_to_array<T: Element>(bytes: &[u8]) -> Option<MDArray<T>> {
    let tag = tag_for::<T>(bytes)?;
    let values = decode_payload(bytes, &tag);
    MDArray::from_vec(values, tag.dimensions()).ok()
}

/// Decode a tagged array that must have rank 1.
pub fn try_to_array_1d<T: Element>(bytes: &[u8]) -> Option<Vec<T>> {
    let tag = tag_for::<T>(bytes)?;
    if tag.rank() != 1 {
        tracing::trace!(rank = tag.rank(), "tagged array is not one-dimensional");
        return None;
    }
    Some(decode_payload(bytes, &tag))
}

macro_rules! typed_decoders {
    ($($ty:ty => $nd:ident, $one:ident;)*) => {
        $(
            #[doc = concat!("Decode a tagged `", stringify!($ty), "` array of any rank.")]
            pub fn $nd(bytes: &[u8]) -> Option<MDArray<$ty>> {
                try_to_array::<$ty>(bytes)
            }

            #[doc = concat!("Decode a one-dimensional tagged `", stringify!($ty), "` array.")]
            pub fn $one(bytes: &[u8]) -> Option<Vec<$ty>> {
                try_to_array_1d::<$ty>(bytes)
            }
        )*
    };
}

typed_decoders! {
    i8 => try_to_i8_array, try_to_i8_array_1d;
    i16 => try_to_i16_array, try_to_i16_array_1d;
    i32 => try_to_i32_array, try_to_i32_array_1d;
    i64 => try_to_i64_array, try_to_i64_array_1d;
    f32 => try_to_f32_array, try_to_f32_array_1d;
    f64 => try_to_f64_array, try_to_f64_array_1d;
}
