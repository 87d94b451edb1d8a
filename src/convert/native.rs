// src/convert/native.rs
//! Zero-shuffle backend: a straight memory copy through `bytemuck`.
//! Only valid when the requested order is the platform's own.

use super::Element;

pub(crate) fn write<T: Element>(src: &[T], dst: &mut [u8]) {
    dst.copy_from_slice(bytemuck::cast_slice(src));
}

pub(crate) fn read<T: Element>(src: &[u8], dst: &mut [T]) {
    bytemuck::cast_slice_mut::<T, u8>(dst).copy_from_slice(src);
}
