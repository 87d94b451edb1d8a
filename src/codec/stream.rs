// src/codec/stream.rs
//! Tagged arrays over `std::io` streams
//!
//! A stream has no known length, so the exact-length check of the slice
//! decoder is replaced by reading exactly the payload the header declares.
//! A foreign header yields `Ok(None)`; a stream that ends early is an I/O error.

use super::header::ArrayTag;
use crate::convert::{self, Element};
use crate::error::Result;
use crate::mdarray::{Dimensions, MDArray};
use crate::types::{ByteOrder, ElementEncoding};
use byteorder::{BigEndian, LittleEndian, ReadBytesExt};
use bytes::BytesMut;
use std::io::{self, Read, Write};

/// Elements converted per write call
const CHUNK_ELEMENTS: usize = 8192;

/// Write a tagged array to `writer`.
///
/// The payload is converted in fixed-size chunks, so no second copy of the
/// whole array is made.
pub fn write_array<T: Element, W: Write>(
    writer: &mut W,
    data: &[T],
    dimensions: &[usize],
    order: ByteOrder,
) -> Result<()> {
    let tag = ArrayTag::for_data::<T>(data.len(), dimensions, order)?;

    let mut header = BytesMut::with_capacity(tag.header_size());
    tag.put_header(&mut header);
    writer.write_all(&header)?;

    let mut scratch = vec![0u8; data.len().min(CHUNK_ELEMENTS) * T::SIZE];
    for chunk in data.chunks(CHUNK_ELEMENTS) {
        let bytes = &mut scratch[..chunk.len() * T::SIZE];
        convert::write_slice(chunk, bytes, tag.byte_order());
        writer.write_all(bytes)?;
    }
    Ok(())
}

/// Write the logical content of an [`MDArray`] to `writer`.
pub fn write_mdarray<T: Element, W: Write>(
    writer: &mut W,
    array: &MDArray<T>,
    order: ByteOrder,
) -> Result<()> {
    write_array(writer, array.as_slice(), array.dimensions(), order)
}

/// Read a tagged array header from `reader`.
///
/// Returns `Ok(None)` when the magic names no known encoding or an extent is
/// negative. The stream is left positioned after whatever was consumed.
pub fn read_array_tag<R: Read>(reader: &mut R) -> Result<Option<ArrayTag>> {
    let mut magic = [0u8; ElementEncoding::MAGIC_LEN];
    reader.read_exact(&mut magic)?;
    let Some(encoding) = ElementEncoding::from_magic(&magic) else {
        tracing::trace!(?magic, "stream does not start with a tagged array magic");
        return Ok(None);
    };

    let rank = reader.read_u8()? as usize;
    let is_big_endian = encoding.byte_order() == ByteOrder::Big;
    let mut dimensions = Dimensions::with_capacity(rank);
    for _ in 0..rank {
        let extent = if is_big_endian {
            reader.read_i32::<BigEndian>()?
        } else {
            reader.read_i32::<LittleEndian>()?
        };
        match usize::try_from(extent) {
            Ok(extent) => dimensions.push(extent),
            Err(_) => {
                tracing::trace!(extent, "negative dimension in tagged array stream");
                return Ok(None);
            }
        }
    }

    Ok(ArrayTag::from_parts(encoding, dimensions))
}

/// Read a complete tagged array holding `T` from `reader`.
///
/// Returns `Ok(None)` for a foreign header or a different element type; in
/// the latter case the payload is left unread.
pub fn read_array<T: Element, R: Read>(reader: &mut R) -> Result<Option<MDArray<T>>> {
    let Some(tag) = read_array_tag(reader)? else {
        return Ok(None);
    };
    if !tag.holds::<T>() {
        tracing::trace!(
            found = %tag.encoding(),
            requested = T::NAME,
            "tagged array element type mismatch"
        );
        return Ok(None);
    }

    // Grow with the data actually present rather than trusting the header.
    let mut payload = Vec::new();
    reader
        .by_ref()
        .take(tag.payload_len() as u64)
        .read_to_end(&mut payload)?;
    if payload.len() != tag.payload_len() {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!(
                "tagged array payload truncated: expected {} bytes, got {}",
                tag.payload_len(),
                payload.len()
            ),
        )
        .into());
    }

    let mut values = vec![T::default(); tag.element_count()];
    convert::read_slice(&payload, &mut values, tag.byte_order());
    Ok(MDArray::from_vec(values, tag.dimensions()).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::encode;
    use crate::error::TaggedArrayError;
    use std::io::Cursor;

    #[test]
    fn test_stream_matches_slice_encoding() {
        let data: Vec<i32> = (0..20_000).collect();
        let mut out = Vec::new();
        write_array(&mut out, &data, &[100, 200], ByteOrder::Big).unwrap();

        let direct = encode(&data, &[100, 200], ByteOrder::Big).unwrap();
        assert_eq!(out, direct.to_vec());
    }

    #[test]
    fn test_stream_roundtrip() {
        let array = MDArray::from_vec(vec![1.5f32, -2.5, 3.25, 0.0, 8.0, 9.5], &[3, 2]).unwrap();
        let mut out = Vec::new();
        write_mdarray(&mut out, &array, ByteOrder::Little).unwrap();

        let mut cursor = Cursor::new(out);
        let back = read_array::<f32, _>(&mut cursor).unwrap().unwrap();
        assert_eq!(back, array);
    }

    #[test]
    fn test_consecutive_arrays() {
        let mut out = Vec::new();
        write_array(&mut out, &[1i16, 2], &[2], ByteOrder::Big).unwrap();
        write_array(&mut out, &[3.0f64], &[1, 1], ByteOrder::Little).unwrap();

        let mut cursor = Cursor::new(out);
        let first = read_array::<i16, _>(&mut cursor).unwrap().unwrap();
        let second = read_array::<f64, _>(&mut cursor).unwrap().unwrap();
        assert_eq!(first.as_slice(), &[1, 2]);
        assert_eq!(second.dimensions(), &[1, 1]);
    }

    #[test]
    fn test_foreign_magic_is_none() {
        let mut cursor = Cursor::new(b"PK\x03\x04rest".to_vec());
        assert!(read_array_tag(&mut cursor).unwrap().is_none());
    }

    #[test]
    fn test_type_mismatch_is_none() {
        let mut out = Vec::new();
        write_array(&mut out, &[1i64], &[1], ByteOrder::Big).unwrap();
        let mut cursor = Cursor::new(out);
        assert!(read_array::<f64, _>(&mut cursor).unwrap().is_none());
    }

    #[test]
    fn test_truncated_payload_is_io_error() {
        let mut out = Vec::new();
        write_array(&mut out, &[1i32, 2, 3], &[3], ByteOrder::Little).unwrap();
        out.pop();

        let mut cursor = Cursor::new(out);
        let result = read_array::<i32, _>(&mut cursor);
        match result {
            Err(TaggedArrayError::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::UnexpectedEof),
            other => panic!("Expected Io error, got {:?}", other),
        }
    }

    #[test]
    fn test_truncated_header_is_io_error() {
        let mut cursor = Cursor::new(vec![b'F', b'B']);
        assert!(matches!(read_array_tag(&mut cursor), Err(TaggedArrayError::Io(_))));
    }
}
