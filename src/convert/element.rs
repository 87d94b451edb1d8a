// src/convert/element.rs
use bytemuck::Pod;
use std::fmt::Debug;

mod sealed {
    pub trait Sealed {}
}

/// A fixed-width numeric primitive that can travel through the bulk converter
/// and the tagged array codec.
///
/// Implemented for `i8`, `i16`, `i32`, `i64`, `f32` and `f64`; the trait is sealed.
pub trait Element: Pod + Default + PartialEq + Debug + Send + Sync + sealed::Sealed + 'static {
    /// Whether the tag marks this type with `F` rather than `I`
    const IS_FLOATING_POINT: bool;

    /// Size of one element in bytes
    const SIZE: usize = std::mem::size_of::<Self>();

    /// Rust name of the type, used in diagnostics
    const NAME: &'static str;

    /// Reverse the byte representation of the value.
    fn swap_bytes(self) -> Self;

    /// Decode `src` into `dst` using the byte order `B`.
    ///
    /// `src.len()` must equal `dst.len() * Self::SIZE`.
    fn read_into<B: byteorder::ByteOrder>(src: &[u8], dst: &mut [Self]);

    /// Encode `src` into `dst` using the byte order `B`.
    ///
    /// `dst.len()` must equal `src.len() * Self::SIZE`.
    fn write_into<B: byteorder::ByteOrder>(src: &[Self], dst: &mut [u8]);
}

impl sealed::Sealed for i8 {}

impl Element for i8 {
    const IS_FLOATING_POINT: bool = false;
    const NAME: &'static str = "i8";

    fn swap_bytes(self) -> Self {
        self
    }

    // Single bytes have no order
    fn read_into<B: byteorder::ByteOrder>(src: &[u8], dst: &mut [Self]) {
        dst.copy_from_slice(bytemuck::cast_slice(src));
    }

    fn write_into<B: byteorder::ByteOrder>(src: &[Self], dst: &mut [u8]) {
        dst.copy_from_slice(bytemuck::cast_slice(src));
    }
}

macro_rules! impl_integer_element {
    ($ty:ty, $read:ident, $write:ident) => {
        impl sealed::Sealed for $ty {}

        impl Element for $ty {
            const IS_FLOATING_POINT: bool = false;
            const NAME: &'static str = stringify!($ty);

            fn swap_bytes(self) -> Self {
                <$ty>::swap_bytes(self)
            }

            fn read_into<B: byteorder::ByteOrder>(src: &[u8], dst: &mut [Self]) {
                B::$read(src, dst);
            }

            fn write_into<B: byteorder::ByteOrder>(src: &[Self], dst: &mut [u8]) {
                B::$write(src, dst);
            }
        }
    };
}

macro_rules! impl_float_element {
    ($ty:ty, $bits:ty, $read:ident, $write:ident) => {
        impl sealed::Sealed for $ty {}

        impl Element for $ty {
            const IS_FLOATING_POINT: bool = true;
            const NAME: &'static str = stringify!($ty);

            fn swap_bytes(self) -> Self {
                <$ty>::from_bits(<$bits>::swap_bytes(self.to_bits()))
            }

            fn read_into<B: byteorder::ByteOrder>(src: &[u8], dst: &mut [Self]) {
                B::$read(src, dst);
            }

            fn write_into<B: byteorder::ByteOrder>(src: &[Self], dst: &mut [u8]) {
                B::$write(src, dst);
            }
        }
    };
}

impl_integer_element!(i16, read_i16_into, write_i16_into);
impl_integer_element!(i32, read_i32_into, write_i32_into);
impl_integer_element!(i64, read_i64_into, write_i64_into);
impl_float_element!(f32, u32, read_f32_into, write_f32_into);
impl_float_element!(f64, u64, read_f64_into, write_f64_into);
