// src/error.rs
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaggedArrayError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Index out of range: {count} items at offset {offset} exceed length {len}")]
    IndexOutOfRange { offset: usize, count: usize, len: usize },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Dimension mismatch: dimensions require {expected} elements, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("Rank {0} does not fit in the one-byte rank field (max 255)")]
    RankTooLarge(usize),

    #[error("No element encoding for {kind} of size {size}")]
    UnsupportedElement { kind: &'static str, size: usize },
}

pub type Result<T> = std::result::Result<T, TaggedArrayError>;
