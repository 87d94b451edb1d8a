// src/codec/header.rs
use crate::convert::{self, Element};
use crate::error::{Result, TaggedArrayError};
use crate::mdarray::{element_count, Dimensions};
use crate::types::{ByteOrder, ElementEncoding};
use bytes::BufMut;
use smallvec::SmallVec;

/// Offset of the rank byte
pub const RANK_INDEX: usize = 3;
/// Offset of the first dimension
pub const DIMENSIONS_INDEX: usize = 4;
/// Bytes per encoded dimension
pub const DIMENSION_SIZE: usize = 4;
/// Shortest buffer that is probed as a tagged array
pub const MIN_TAGGED_LEN: usize = 8;
/// Largest rank the one-byte rank field can carry
pub const MAX_RANK: usize = u8::MAX as usize;

/// Size of the header for an array of the given rank
pub const fn header_size(rank: usize) -> usize {
    DIMENSIONS_INDEX + DIMENSION_SIZE * rank
}

/// Type and shape read from (or about to be written to) a tagged array header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayTag {
    encoding: &'static ElementEncoding,
    dimensions: Dimensions,
    element_count: usize,
    payload_len: usize,
}

impl ArrayTag {
    /// Build a tag from decoded parts. Returns `None` when the sizes overflow.
    pub(crate) fn from_parts(encoding: &'static ElementEncoding, dimensions: Dimensions) -> Option<Self> {
        let element_count = element_count(&dimensions).ok()?;
        let payload_len = element_count.checked_mul(encoding.size_in_bytes())?;
        header_size(dimensions.len()).checked_add(payload_len)?;
        Some(ArrayTag {
            encoding,
            dimensions,
            element_count,
            payload_len,
        })
    }

    /// Validate `data_len` elements of `T` shaped by `dimensions` for encoding.
    pub(crate) fn for_data<T: Element>(
        data_len: usize,
        dimensions: &[usize],
        order: ByteOrder,
    ) -> Result<Self> {
        if dimensions.len() > MAX_RANK {
            return Err(TaggedArrayError::RankTooLarge(dimensions.len()));
        }
        if let Some(&d) = dimensions.iter().find(|&&d| d > i32::MAX as usize) {
            return Err(TaggedArrayError::InvalidArgument(format!(
                "dimension {} does not fit in a 4-byte extent",
                d
            )));
        }

        let expected = element_count(dimensions)?;
        if data_len != expected {
            return Err(TaggedArrayError::DimensionMismatch {
                expected,
                found: data_len,
            });
        }

        let encoding = ElementEncoding::lookup(T::IS_FLOATING_POINT, order, T::SIZE).ok_or(
            TaggedArrayError::UnsupportedElement {
                kind: T::NAME,
                size: T::SIZE,
            },
        )?;

        Self::from_parts(encoding, SmallVec::from_slice(dimensions)).ok_or_else(|| {
            TaggedArrayError::InvalidArgument(format!(
                "{} elements of {} overflow the addressable byte length",
                expected,
                T::NAME
            ))
        })
    }

    pub fn encoding(&self) -> &'static ElementEncoding {
        self.encoding
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.encoding.byte_order()
    }

    pub fn rank(&self) -> usize {
        self.dimensions.len()
    }

    pub fn dimensions(&self) -> &[usize] {
        &self.dimensions
    }

    pub fn element_count(&self) -> usize {
        self.element_count
    }

    pub fn header_size(&self) -> usize {
        header_size(self.rank())
    }

    pub fn payload_len(&self) -> usize {
        self.payload_len
    }

    /// Exact length of a buffer carrying this tag
    pub fn total_len(&self) -> usize {
        self.header_size() + self.payload_len
    }

    /// Whether the payload holds elements of type `T`
    pub fn holds<T: Element>(&self) -> bool {
        self.encoding.is_floating_point() == T::IS_FLOATING_POINT
            && self.encoding.size_in_bytes() == T::SIZE
    }

    /// Append the header bytes: magic, rank, then each dimension in the tag's byte order.
    pub fn put_header<B: BufMut>(&self, buf: &mut B) {
        buf.put_slice(&self.encoding.magic());
        buf.put_u8(self.rank() as u8);
        let big_endian = self.encoding.byte_order() == ByteOrder::Big;
        for &d in &self.dimensions {
            if big_endian {
                buf.put_i32(d as i32);
            } else {
                buf.put_i32_le(d as i32);
            }
        }
    }
}

/// Read the element encoding from the start of a buffer.
///
/// `None` means the buffer is not a tagged array: it is shorter than
/// [`MIN_TAGGED_LEN`], or its magic names no known encoding.
pub fn try_get_encoding(bytes: &[u8]) -> Option<&'static ElementEncoding> {
    if bytes.len() < MIN_TAGGED_LEN {
        tracing::trace!(len = bytes.len(), "buffer too short for a tagged array");
        return None;
    }
    let magic = &bytes[..ElementEncoding::MAGIC_LEN];
    let encoding = ElementEncoding::from_magic(magic);
    if encoding.is_none() {
        tracing::trace!(?magic, "unknown tagged array magic");
    }
    encoding
}

/// Decode signed extents, rejecting negative ones.
fn read_dimensions(bytes: &[u8], order: ByteOrder) -> Option<Dimensions> {
    let mut extents: SmallVec<[i32; 4]> = SmallVec::from_elem(0, bytes.len() / DIMENSION_SIZE);
    convert::read_slice(bytes, &mut extents[..], order);
    extents.iter().map(|&d| usize::try_from(d).ok()).collect()
}

/// Read and validate the whole header of a tagged array.
///
/// Besides the checks of [`try_get_encoding`], the buffer length must equal
/// the header size plus the payload size exactly.
pub fn try_get_array_tag(bytes: &[u8]) -> Option<ArrayTag> {
    let encoding = try_get_encoding(bytes)?;
    let rank = bytes[RANK_INDEX] as usize;
    let header_len = header_size(rank);
    if bytes.len() < header_len {
        tracing::trace!(rank, len = bytes.len(), "buffer shorter than its header");
        return None;
    }

    let Some(dimensions) = read_dimensions(&bytes[DIMENSIONS_INDEX..header_len], encoding.byte_order()) else {
        tracing::trace!("negative dimension in tagged array header");
        return None;
    };
    let tag = ArrayTag::from_parts(encoding, dimensions)?;

    if tag.total_len() != bytes.len() {
        tracing::trace!(
            expected = tag.total_len(),
            actual = bytes.len(),
            "tagged array length mismatch"
        );
        return None;
    }
    Some(tag)
}
