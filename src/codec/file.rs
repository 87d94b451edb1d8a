// src/codec/file.rs
use super::header::{try_get_array_tag, ArrayTag};
use super::{decoder, stream};
use crate::convert::Element;
use crate::error::Result;
use crate::mdarray::MDArray;
use crate::types::ByteOrder;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[cfg(feature = "mmap")]
use memmap2::Mmap;

/// A file whose whole content is probed as one tagged array
///
/// Opening never fails because the content is foreign; [`TaggedArrayFile::tag`]
/// is simply `None` then.
pub struct TaggedArrayFile<B: AsRef<[u8]> = Vec<u8>> {
    bytes: B,
    tag: Option<ArrayTag>,
}

impl TaggedArrayFile<Vec<u8>> {
    /// Read the whole file into memory.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Ok(Self::from_bytes(bytes))
    }
}

/// Constructor for memory-mapped file I/O (requires "mmap" feature)
#[cfg(feature = "mmap")]
impl TaggedArrayFile<Mmap> {
    pub fn open_mmap(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let mmap = unsafe { Mmap::map(&file)? };
        Ok(Self::from_bytes(mmap))
    }
}

impl<B: AsRef<[u8]>> TaggedArrayFile<B> {
    pub fn from_bytes(bytes: B) -> Self {
        let tag = try_get_array_tag(bytes.as_ref());
        TaggedArrayFile { bytes, tag }
    }

    pub fn tag(&self) -> Option<&ArrayTag> {
        self.tag.as_ref()
    }

    pub fn is_tagged_array(&self) -> bool {
        self.tag.is_some()
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.as_ref()
    }

    pub fn to_array<T: Element>(&self) -> Option<MDArray<T>> {
        self.tag.as_ref()?;
        decoder::try_to_array(self.as_bytes())
    }

    pub fn to_array_1d<T: Element>(&self) -> Option<Vec<T>> {
        self.tag.as_ref()?;
        decoder::try_to_array_1d(self.as_bytes())
    }
}

/// Create (or truncate) `path` and write one tagged array to it.
pub fn write_file<T: Element>(
    path: impl AsRef<Path>,
    data: &[T],
    dimensions: &[usize],
    order: ByteOrder,
) -> Result<()> {
    let mut writer = BufWriter::with_capacity(65536, File::create(path)?);
    stream::write_array(&mut writer, data, dimensions, order)?;
    writer.flush()?;
    Ok(())
}
