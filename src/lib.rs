// src/lib.rs
//! # tagged-array
//!
//! Self-describing binary tags for multi-dimensional numeric arrays, plus the
//! endian-aware bulk conversion routines underneath them.
//!
//! ## Features
//!
//! - 🏷️ **Self-Describing**: a 3-byte magic names element kind, byte order and size
//! - 📐 **Multi-Dimensional**: rank and extents travel with the payload
//! - 🔍 **Safe Probing**: decoding foreign buffers yields `None`, never a panic
//! - ⚡ **Native Fast Path**: plain memory copies when no byte swap is needed
//! - 🔄 **Either Byte Order**: little, big or native, chosen per call
//! - 📈 **Growable Arrays**: `MDArray` grows along dimension 0 like a `Vec`
//!
//! ## Quick Start
//!
//! ### Encoding
//!
//! ```rust
//! use tagged_array::*;
//!
//! fn main() -> Result<()> {
//!     let data: Vec<f64> = (0..6).map(|i| i as f64 * 0.5).collect();
//!     let bytes = codec::encode(&data, &[2, 3], ByteOrder::Big)?;
//!
//!     let tag = codec::try_get_array_tag(&bytes).expect("tagged array");
//!     assert_eq!(tag.dimensions(), &[2, 3]);
//!     Ok(())
//! }
//! ```
//!
//! ### Probing and Decoding
//!
//! ```rust
//! use tagged_array::*;
//!
//! fn describe(bytes: &[u8]) -> String {
//!     if let Some(values) = codec::try_to_f32_array_1d(bytes) {
//!         format!("{} floats", values.len())
//!     } else if let Some(array) = codec::try_to_i32_array(bytes) {
//!         format!("int array with dimensions {:?}", array.dimensions())
//!     } else {
//!         "something else".to_string()
//!     }
//! }
//!
//! let bytes = codec::encode(&[1i32, 2, 3, 4], &[2, 2], ByteOrder::Little).unwrap();
//! assert_eq!(describe(&bytes), "int array with dimensions [2, 2]");
//! assert_eq!(describe(b"not a tag"), "something else");
//! ```
//!
//! ### Bulk Conversion
//!
//! ```rust
//! use tagged_array::convert::{to_bytes, from_bytes, change_byte_order};
//! use tagged_array::ByteOrder;
//!
//! let bytes = to_bytes(&[0x0102i16, 0x0304], ByteOrder::Big);
//! assert_eq!(bytes, [1, 2, 3, 4]);
//! assert_eq!(from_bytes::<i16>(&bytes, ByteOrder::Big).unwrap(), [0x0102, 0x0304]);
//! assert_eq!(change_byte_order(0x0102i16), 0x0201);
//! ```

// Modules
pub mod error;
pub mod types;
pub mod convert;
pub mod mdarray;
pub mod codec;

mod utils;

// Re-export commonly used types at the crate root for convenience
pub use error::{TaggedArrayError, Result};

pub use types::{
    ByteOrder,
    ElementEncoding,
};

pub use convert::{
    Element,
    native_byte_order,
    native_path_enabled,
};

pub use mdarray::{
    MDArray,
    Dimensions,
};

pub use codec::{
    ArrayTag,
    TaggedArrayFile,
};

// Prelude module for glob imports
pub mod prelude {
    //! Convenient imports for common use cases.
    //!
    //! ```rust
    //! use tagged_array::prelude::*;
    //! ```

    pub use crate::error::{TaggedArrayError, Result};
    pub use crate::types::{ByteOrder, ElementEncoding};
    pub use crate::convert::Element;
    pub use crate::mdarray::MDArray;
    pub use crate::codec::{encode, encode_mdarray, try_get_array_tag, try_to_array, try_to_array_1d, ArrayTag};
}

/// Size of the fixed part of every tag: magic plus rank byte
pub const FIXED_HEADER_SIZE: usize = codec::DIMENSIONS_INDEX;

/// The library version
pub const LIBRARY_VERSION: &str = env!("CARGO_PKG_VERSION");
