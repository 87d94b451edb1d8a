// src/codec/mod.rs
//! The tagged array wire format
//!
//! A tagged array is a byte buffer that carries its own element type, byte
//! order and shape:
//!
//! ```text
//! offset  size  field
//! 0       1     'F' floating point / 'I' integer
//! 1       1     'L' little-endian / 'B' big-endian
//! 2       1     element size in bytes (1, 2, 4 or 8)
//! 3       1     rank r
//! 4       4*r   dimensions, each an i32 in the declared byte order
//! 4+4r    N     row-major payload, N = product(dimensions) * element size
//! ```
//!
//! Decoding is a probe: every `try_*` function returns `None` for buffers
//! that are not tagged arrays of the requested type and shape, and only
//! programming errors on the encode side surface as `Err`.
//!
//! # Examples
//!
//! ```
//! use tagged_array::codec::{encode_f32, try_get_array_tag, try_to_f32_array_1d, try_to_i32_array_1d};
//! use tagged_array::ByteOrder;
//!
//! let values = [1.1f32, -3.2, 1001.5];
//! let bytes = encode_f32(&values, &[3], ByteOrder::Native).unwrap();
//!
//! let tag = try_get_array_tag(&bytes).unwrap();
//! assert_eq!(tag.rank(), 1);
//!
//! assert_eq!(try_to_f32_array_1d(&bytes).unwrap(), values);
//! assert!(try_to_i32_array_1d(&bytes).is_none());
//! ```

mod decoder;
mod encoder;
mod header;

pub mod file;
pub mod stream;

pub use decoder::*;
pub use encoder::*;
pub use header::{
    header_size, try_get_array_tag, try_get_encoding, ArrayTag, DIMENSIONS_INDEX, DIMENSION_SIZE,
    MAX_RANK, MIN_TAGGED_LEN, RANK_INDEX,
};

pub use file::{write_file, TaggedArrayFile};
