// src/convert/portable.rs
//! Byte-shuffling backend built on `byteorder`. Always available.

use super::Element;
use crate::types::ByteOrder;
use byteorder::{BigEndian, LittleEndian};

/// Serialize `src` into `dst` in the given order.
///
/// `dst.len()` must equal `src.len() * T::SIZE`.
pub(crate) fn write<T: Element>(src: &[T], dst: &mut [u8], order: ByteOrder) {
    match order.resolve() {
        ByteOrder::Big => T::write_into::<BigEndian>(src, dst),
        _ => T::write_into::<LittleEndian>(src, dst),
    }
}

/// Deserialize `src` into `dst` in the given order.
///
/// `src.len()` must equal `dst.len() * T::SIZE`.
pub(crate) fn read<T: Element>(src: &[u8], dst: &mut [T], order: ByteOrder) {
    match order.resolve() {
        ByteOrder::Big => T::read_into::<BigEndian>(src, dst),
        _ => T::read_into::<LittleEndian>(src, dst),
    }
}
