// src/utils/endian.rs
use crate::types::ByteOrder;
use bytemuck::Pod;
use std::sync::OnceLock;

static NATIVE_ORDER: OnceLock<ByteOrder> = OnceLock::new();

/// The byte order of the executing CPU, computed on first use.
pub fn native_byte_order() -> ByteOrder {
    *NATIVE_ORDER.get_or_init(|| {
        if u16::from_ne_bytes([1, 0]) == 1 {
            ByteOrder::Little
        } else {
            ByteOrder::Big
        }
    })
}

/// Reverse the bytes of every element in place.
pub fn swap_endianness<T: Pod>(data: &mut [T]) {
    let size = std::mem::size_of::<T>();
    if size <= 1 {
        return;
    }

    let bytes: &mut [u8] = bytemuck::cast_slice_mut(data);
    for chunk in bytes.chunks_exact_mut(size) {
        chunk.reverse();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_byte_order_matches_target() {
        let expected = if cfg!(target_endian = "big") {
            ByteOrder::Big
        } else {
            ByteOrder::Little
        };
        assert_eq!(native_byte_order(), expected);
    }

    #[test]
    fn test_swap_endianness() {
        let mut data = [0x0102u16, 0x0304];
        swap_endianness(&mut data);
        assert_eq!(data, [0x0201, 0x0403]);

        let mut bytes = [1u8, 2, 3];
        swap_endianness(&mut bytes);
        assert_eq!(bytes, [1, 2, 3]);
    }
}
