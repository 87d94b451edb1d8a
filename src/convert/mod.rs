// src/convert/mod.rs
//! Endian-aware bulk conversion between primitive slices and bytes
//!
//! This is the byte-order-aware equivalent of `memcpy`: each element is copied
//! into (or out of) a byte slice and its bytes are swapped when the requested
//! order differs from the platform's.
//!
//! Two backends share one contract:
//!
//! - a portable backend built on `byteorder`, always available
//! - a native backend that is a plain `bytemuck` copy, used when the
//!   requested order equals the native one and the `native` feature is on
//!
//! Both produce bit-identical output. The native path can be switched off at
//! runtime by setting `TAGGED_ARRAY_PORTABLE=1` before first use.
//!
//! # Examples
//!
//! ```
//! use tagged_array::convert::{primitives_to_bytes, bytes_to_primitives};
//! use tagged_array::ByteOrder;
//!
//! let values = [1i32, -2, 3];
//! let mut bytes = [0u8; 12];
//! primitives_to_bytes(&values, 0, &mut bytes, 0, 3, ByteOrder::Big).unwrap();
//! assert_eq!(&bytes[..4], &[0, 0, 0, 1]);
//!
//! let mut back = [0i32; 3];
//! bytes_to_primitives(&bytes, 0, &mut back, 0, 3, ByteOrder::Big).unwrap();
//! assert_eq!(back, values);
//! ```

mod element;
pub(crate) mod native;
pub(crate) mod portable;

pub use element::Element;

use crate::error::{Result, TaggedArrayError};
use crate::types::ByteOrder;
use crate::utils;
use std::ops::Range;
use std::sync::OnceLock;

pub use crate::utils::native_byte_order;

/// Environment variable that forces the portable backend when set to anything but `0`
pub const PORTABLE_ENV: &str = "TAGGED_ARRAY_PORTABLE";

static NATIVE_PATH: OnceLock<bool> = OnceLock::new();

/// Whether the native copy backend is in use. Decided once per process.
pub fn native_path_enabled() -> bool {
    *NATIVE_PATH.get_or_init(|| {
        let forced_portable = std::env::var_os(PORTABLE_ENV)
            .map(|v| !v.is_empty() && v != "0")
            .unwrap_or(false);
        let enabled = cfg!(feature = "native") && !forced_portable;
        tracing::debug!(
            enabled,
            native_order = ?native_byte_order(),
            "selected bulk conversion backend"
        );
        enabled
    })
}

fn use_native(order: ByteOrder) -> bool {
    order.resolve() == native_byte_order() && native_path_enabled()
}

fn sub_range(len: usize, offset: usize, count: usize) -> Result<Range<usize>> {
    match offset.checked_add(count) {
        Some(end) if end <= len => Ok(offset..end),
        _ => Err(TaggedArrayError::IndexOutOfRange { offset, count, len }),
    }
}

fn byte_count<T: Element>(count: usize) -> Result<usize> {
    count.checked_mul(T::SIZE).ok_or_else(|| {
        TaggedArrayError::InvalidArgument(format!(
            "{} elements of {} overflow the addressable byte length",
            count,
            T::NAME
        ))
    })
}

/// Copy elements into an exactly sized byte slice.
pub(crate) fn write_slice<T: Element>(src: &[T], dst: &mut [u8], order: ByteOrder) {
    if use_native(order) {
        native::write(src, dst);
    } else {
        portable::write(src, dst, order);
    }
}

/// Copy an exactly sized byte slice into elements.
pub(crate) fn read_slice<T: Element>(src: &[u8], dst: &mut [T], order: ByteOrder) {
    if use_native(order) {
        native::read(src, dst);
    } else {
        portable::read(src, dst, order);
    }
}

/// Write `count` elements of `src`, starting at `src_offset`, into `dst` at
/// `dst_offset`, each serialized in `order`.
///
/// Bounds are checked before anything is written, so on error `dst` is
/// untouched. On success only `dst[dst_offset..dst_offset + count * T::SIZE]`
/// changes.
pub fn primitives_to_bytes<T: Element>(
    src: &[T],
    src_offset: usize,
    dst: &mut [u8],
    dst_offset: usize,
    count: usize,
    order: ByteOrder,
) -> Result<()> {
    let src_range = sub_range(src.len(), src_offset, count)?;
    let dst_range = sub_range(dst.len(), dst_offset, byte_count::<T>(count)?)?;
    write_slice(&src[src_range], &mut dst[dst_range], order);
    Ok(())
}

/// Read `count` elements from `src` at `src_offset` into `dst` at `dst_offset`.
///
/// The inverse of [`primitives_to_bytes`], with the same bounds contract.
pub fn bytes_to_primitives<T: Element>(
    src: &[u8],
    src_offset: usize,
    dst: &mut [T],
    dst_offset: usize,
    count: usize,
    order: ByteOrder,
) -> Result<()> {
    let src_range = sub_range(src.len(), src_offset, byte_count::<T>(count)?)?;
    let dst_range = sub_range(dst.len(), dst_offset, count)?;
    read_slice(&src[src_range], &mut dst[dst_range], order);
    Ok(())
}

/// Serialize a whole slice.
pub fn to_bytes<T: Element>(src: &[T], order: ByteOrder) -> Vec<u8> {
    let mut bytes = vec![0u8; src.len() * T::SIZE];
    write_slice(src, &mut bytes, order);
    bytes
}

/// Deserialize a whole byte slice.
///
/// Fails with `InvalidArgument` when the length is not a multiple of the element size.
pub fn from_bytes<T: Element>(bytes: &[u8], order: ByteOrder) -> Result<Vec<T>> {
    if bytes.len() % T::SIZE != 0 {
        return Err(TaggedArrayError::InvalidArgument(format!(
            "byte length {} is not a multiple of the {} size {}",
            bytes.len(),
            T::NAME,
            T::SIZE
        )));
    }
    let mut values = vec![T::default(); bytes.len() / T::SIZE];
    read_slice(bytes, &mut values, order);
    Ok(values)
}

/// Reverse the byte sequence of one value. Floats are swapped through their bit pattern.
pub fn change_byte_order<T: Element>(value: T) -> T {
    value.swap_bytes()
}

/// Reverse the byte sequence of every value in `data`.
pub fn change_byte_order_in_place<T: Element>(data: &mut [T]) {
    utils::swap_endianness(data);
}
