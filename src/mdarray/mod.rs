// src/mdarray/mod.rs
//! Row-major multi-dimensional arrays
//!
//! [`MDArray`] stores its elements flat, with the last dimension varying
//! fastest. One slice along dimension 0 is called a *hyper-row*; dimension 0
//! is the only one that can change after construction. It grows like a
//! `Vec`, doubling its capacity, and shrinks by truncation without
//! reallocating.
//!
//! # Examples
//!
//! ```
//! use tagged_array::MDArray;
//!
//! let mut array = MDArray::<i32>::with_capacity(&[2, 2], 3).unwrap();
//! array[[1, 1]] = 4;
//!
//! array.inc_number_of_hyper_rows(1).unwrap();
//! assert_eq!(array.dimensions(), &[3, 2]);
//! assert_eq!(array[[1, 1]], 4);
//! ```

mod shape;

pub use shape::{compute_index, element_count, hyper_row_length, storage_length, Dimensions};

use crate::convert::Element;
use crate::error::{Result, TaggedArrayError};
use smallvec::SmallVec;
use std::fmt;
use std::ops::{Index, IndexMut};

/// A multi-dimensional numeric array with growable dimension 0
///
/// The backing storage holds `capacity_hyper_rows * hyper_row_len` elements;
/// only the first `dimensions[0]` hyper-rows are logically part of the array.
#[derive(Clone)]
pub struct MDArray<T: Element> {
    data: Vec<T>,
    dimensions: Dimensions,
    hyper_row_len: usize,
    capacity_hyper_rows: usize,
}

impl<T: Element> MDArray<T> {
    /// Create a zero-filled array with the given dimensions.
    pub fn new(dimensions: &[usize]) -> Result<Self> {
        Self::with_capacity(dimensions, 0)
    }

    /// Create a zero-filled array with room for `capacity_hyper_rows` hyper-rows.
    ///
    /// A capacity smaller than `dimensions[0]` is raised to it.
    pub fn with_capacity(dimensions: &[usize], capacity_hyper_rows: usize) -> Result<Self> {
        let hyper_row_len = Self::hyper_row_len_for(dimensions)?;
        let capacity_hyper_rows = match dimensions.first() {
            Some(&rows) => capacity_hyper_rows.max(rows),
            None => 0,
        };
        let storage_len = storage_length(dimensions, capacity_hyper_rows)?;

        Ok(MDArray {
            data: vec![T::default(); storage_len],
            dimensions: SmallVec::from_slice(dimensions),
            hyper_row_len,
            capacity_hyper_rows,
        })
    }

    /// Wrap an existing flat buffer. Its length must match the dimensions exactly.
    pub fn from_vec(data: Vec<T>, dimensions: &[usize]) -> Result<Self> {
        let expected = element_count(dimensions)?;
        if data.len() != expected {
            return Err(TaggedArrayError::DimensionMismatch {
                expected,
                found: data.len(),
            });
        }
        Self::from_vec_unchecked(data, dimensions)
    }

    /// Wrap a flat buffer without the exact-length check.
    ///
    /// Storage beyond the logical extent becomes spare capacity along
    /// dimension 0. Storage shorter than the logical extent is still rejected.
    pub fn from_vec_unchecked(data: Vec<T>, dimensions: &[usize]) -> Result<Self> {
        let hyper_row_len = Self::hyper_row_len_for(dimensions)?;
        let logical_len = element_count(dimensions)?;
        if data.len() < logical_len {
            return Err(TaggedArrayError::DimensionMismatch {
                expected: logical_len,
                found: data.len(),
            });
        }

        let capacity_hyper_rows = match dimensions.first() {
            Some(&rows) if hyper_row_len > 0 => (data.len() / hyper_row_len).max(rows),
            Some(&rows) => rows,
            None => 0,
        };

        Ok(MDArray {
            data,
            dimensions: SmallVec::from_slice(dimensions),
            hyper_row_len,
            capacity_hyper_rows,
        })
    }

    // An array with no hyper-rows may have trailing extents whose product
    // overflows; its row length saturates and growth revalidates the storage.
    fn hyper_row_len_for(dimensions: &[usize]) -> Result<usize> {
        match hyper_row_length(dimensions) {
            Err(_) if dimensions.first() == Some(&0) => Ok(usize::MAX),
            result => result,
        }
    }

    pub fn dimensions(&self) -> &[usize] {
        &self.dimensions
    }

    pub fn rank(&self) -> usize {
        self.dimensions.len()
    }

    /// Number of logically valid elements
    pub fn len(&self) -> usize {
        match self.dimensions.first() {
            Some(&rows) => rows * self.hyper_row_len,
            None => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn hyper_row_len(&self) -> usize {
        self.hyper_row_len
    }

    pub fn number_of_hyper_rows(&self) -> usize {
        self.dimensions.first().copied().unwrap_or(0)
    }

    pub fn capacity_hyper_rows(&self) -> usize {
        self.capacity_hyper_rows
    }

    /// The logical elements in row-major order
    pub fn as_slice(&self) -> &[T] {
        &self.data[..self.len()]
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        let len = self.len();
        &mut self.data[..len]
    }

    /// The whole backing storage, including spare capacity
    pub fn storage(&self) -> &[T] {
        &self.data
    }

    /// Consume the array, returning only its logical elements.
    pub fn into_vec(mut self) -> Vec<T> {
        let len = self.len();
        self.data.truncate(len);
        self.data
    }

    /// Flat index for a full set of indices. Indices are not range checked.
    #[inline]
    pub fn compute_index(&self, indices: &[usize]) -> usize {
        compute_index(&self.dimensions, indices)
    }

    /// Flat index for a rank-2 array.
    #[inline]
    pub fn compute_index2(&self, i: usize, j: usize) -> usize {
        i * self.dimensions[1] + j
    }

    /// Flat index for a rank-3 array.
    #[inline]
    pub fn compute_index3(&self, i: usize, j: usize, k: usize) -> usize {
        (i * self.dimensions[1] + j) * self.dimensions[2] + k
    }

    fn in_bounds(&self, indices: &[usize]) -> bool {
        indices.len() == self.dimensions.len()
            && indices.iter().zip(&self.dimensions).all(|(&i, &d)| i < d)
    }

    /// Element at `indices`, or `None` when any index is outside its dimension.
    pub fn get(&self, indices: &[usize]) -> Option<&T> {
        if !self.in_bounds(indices) {
            return None;
        }
        self.data.get(self.compute_index(indices))
    }

    pub fn get_mut(&mut self, indices: &[usize]) -> Option<&mut T> {
        if !self.in_bounds(indices) {
            return None;
        }
        let index = self.compute_index(indices);
        self.data.get_mut(index)
    }

    /// One slice along dimension 0
    pub fn hyper_row(&self, row: usize) -> Option<&[T]> {
        if self.rank() == 0 || row >= self.dimensions[0] {
            return None;
        }
        let start = row * self.hyper_row_len;
        Some(&self.data[start..start + self.hyper_row_len])
    }

    pub fn hyper_row_mut(&mut self, row: usize) -> Option<&mut [T]> {
        if self.rank() == 0 || row >= self.dimensions[0] {
            return None;
        }
        let start = row * self.hyper_row_len;
        Some(&mut self.data[start..start + self.hyper_row_len])
    }

    fn require_hyper_rows(&self) -> Result<()> {
        if self.dimensions.is_empty() {
            return Err(TaggedArrayError::InvalidArgument(
                "a rank-0 array has no hyper-rows".to_string(),
            ));
        }
        Ok(())
    }

    /// Add `count` hyper-rows, returning the new size of dimension 0.
    ///
    /// When the capacity is exceeded it becomes `max(2 * capacity, rows)`;
    /// new storage is allocated and the logical content copied to its start.
    /// Rows exposed without reallocation keep whatever the storage held.
    pub fn inc_number_of_hyper_rows(&mut self, count: usize) -> Result<usize> {
        self.require_hyper_rows()?;
        let rows = self.dimensions[0].checked_add(count).ok_or_else(|| {
            TaggedArrayError::InvalidArgument(format!(
                "cannot grow {} hyper-rows by {}",
                self.dimensions[0], count
            ))
        })?;

        if rows > self.capacity_hyper_rows {
            let capacity = self.capacity_hyper_rows.saturating_mul(2).max(rows);
            let storage_len = storage_length(&self.dimensions, capacity)?;

            let len = self.len();
            let mut grown = vec![T::default(); storage_len];
            grown[..len].copy_from_slice(&self.data[..len]);
            self.data = grown;

            tracing::trace!(
                old_capacity = self.capacity_hyper_rows,
                new_capacity = capacity,
                "reallocated hyper-row storage"
            );
            self.capacity_hyper_rows = capacity;
        }

        self.dimensions[0] = rows;
        Ok(rows)
    }

    /// Remove `count` hyper-rows from the end, returning the new size of dimension 0.
    ///
    /// The storage is not reallocated.
    pub fn dec_number_of_hyper_rows(&mut self, count: usize) -> Result<usize> {
        self.require_hyper_rows()?;
        let rows = self.dimensions[0].checked_sub(count).ok_or_else(|| {
            TaggedArrayError::InvalidArgument(format!(
                "cannot remove {} of {} hyper-rows",
                count, self.dimensions[0]
            ))
        })?;
        self.dimensions[0] = rows;
        Ok(rows)
    }
}

impl<T: Element, const N: usize> Index<[usize; N]> for MDArray<T> {
    type Output = T;

    fn index(&self, indices: [usize; N]) -> &T {
        if !self.in_bounds(&indices) {
            panic!(
                "index {:?} out of range for dimensions {:?}",
                indices, self.dimensions
            );
        }
        &self.data[self.compute_index(&indices)]
    }
}

impl<T: Element, const N: usize> IndexMut<[usize; N]> for MDArray<T> {
    fn index_mut(&mut self, indices: [usize; N]) -> &mut T {
        if !self.in_bounds(&indices) {
            panic!(
                "index {:?} out of range for dimensions {:?}",
                indices, self.dimensions
            );
        }
        let index = self.compute_index(&indices);
        &mut self.data[index]
    }
}

// Spare capacity is not part of the value
impl<T: Element> PartialEq for MDArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.dimensions == other.dimensions && self.as_slice() == other.as_slice()
    }
}

impl<T: Element> fmt::Debug for MDArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MDArray")
            .field("element", &T::NAME)
            .field("dimensions", &self.dimensions.as_slice())
            .field("capacity_hyper_rows", &self.capacity_hyper_rows)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_zero_filled() {
        let array = MDArray::<f64>::new(&[2, 3]).unwrap();
        assert_eq!(array.rank(), 2);
        assert_eq!(array.len(), 6);
        assert_eq!(array.hyper_row_len(), 3);
        assert_eq!(array.capacity_hyper_rows(), 2);
        assert!(array.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_with_capacity_sizes_storage() {
        let array = MDArray::<i16>::with_capacity(&[2, 4], 5).unwrap();
        assert_eq!(array.storage().len(), 20);
        assert_eq!(array.len(), 8);

        let array = MDArray::<i16>::with_capacity(&[3, 4], 1).unwrap();
        assert_eq!(array.capacity_hyper_rows(), 3);
    }

    #[test]
    fn test_from_vec_checks_length() {
        let array = MDArray::from_vec(vec![1i32, 2, 3, 4, 5, 6], &[2, 3]).unwrap();
        assert_eq!(array[[1, 0]], 4);
        assert_eq!(array.hyper_row(1), Some(&[4, 5, 6][..]));

        let result = MDArray::from_vec(vec![1i32, 2, 3], &[2, 3]);
        assert!(matches!(
            result,
            Err(TaggedArrayError::DimensionMismatch { expected: 6, found: 3 })
        ));
    }

    #[test]
    fn test_from_vec_unchecked_keeps_spare_storage() {
        let array = MDArray::from_vec_unchecked(vec![1i64; 10], &[2, 3]).unwrap();
        assert_eq!(array.capacity_hyper_rows(), 3);
        assert_eq!(array.len(), 6);
        assert_eq!(array.into_vec().len(), 6);

        assert!(MDArray::from_vec_unchecked(vec![1i64; 5], &[2, 3]).is_err());
    }

    #[test]
    fn test_index_helpers_agree() {
        let mut array = MDArray::<i32>::new(&[2, 3, 4]).unwrap();
        for (n, v) in array.as_mut_slice().iter_mut().enumerate() {
            *v = n as i32;
        }
        assert_eq!(array.compute_index(&[1, 2, 3]), array.compute_index3(1, 2, 3));
        assert_eq!(array[[1, 2, 3]], 23);
        assert_eq!(array[[0, 1, 0]], 4);

        let flat = MDArray::from_vec(vec![0i8, 1, 2, 3, 4, 5], &[3, 2]).unwrap();
        assert_eq!(flat.compute_index2(2, 1), 5);
    }

    #[test]
    fn test_get_rejects_out_of_range_instead_of_wrapping() {
        let array = MDArray::<i32>::new(&[2, 3]).unwrap();
        assert!(array.get(&[0, 3]).is_none());
        assert!(array.get(&[2, 0]).is_none());
        assert!(array.get(&[1]).is_none());
        assert!(array.get(&[1, 2]).is_some());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_index_panics_out_of_range() {
        let array = MDArray::<i32>::new(&[2, 2]).unwrap();
        let _value = array[[0, 2]];
    }

    #[test]
    fn test_growth_scenario() {
        let mut array = MDArray::<i32>::with_capacity(&[2, 2], 3).unwrap();
        array[[0, 0]] = 1;
        array[[0, 1]] = 2;
        array[[1, 0]] = 3;
        array[[1, 1]] = 4;

        assert_eq!(array.inc_number_of_hyper_rows(1).unwrap(), 3);
        assert_eq!(array.capacity_hyper_rows(), 3);
        array[[2, 0]] = 5;
        array[[2, 1]] = 6;

        assert_eq!(array.inc_number_of_hyper_rows(2).unwrap(), 5);
        assert_eq!(array.capacity_hyper_rows(), 6);
        array[[3, 0]] = 7;
        array[[3, 1]] = 8;
        array[[4, 0]] = 9;

        assert_eq!(array.dec_number_of_hyper_rows(1).unwrap(), 4);
        assert_eq!(array.dimensions(), &[4, 2]);
        assert_eq!(array.as_slice(), &[1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(array.storage().len(), 12);
    }

    #[test]
    fn test_growth_doubles_capacity() {
        let mut array = MDArray::<f32>::new(&[4, 1]).unwrap();
        array.inc_number_of_hyper_rows(1).unwrap();
        assert_eq!(array.capacity_hyper_rows(), 8);

        array.inc_number_of_hyper_rows(20).unwrap();
        assert_eq!(array.capacity_hyper_rows(), 25);
    }

    #[test]
    fn test_shrink_keeps_storage() {
        let mut array = MDArray::from_vec(vec![1i16, 2, 3, 4], &[4]).unwrap();
        assert_eq!(array.dec_number_of_hyper_rows(2).unwrap(), 2);
        assert_eq!(array.as_slice(), &[1, 2]);
        assert_eq!(array.storage(), &[1, 2, 3, 4]);

        assert_eq!(array.inc_number_of_hyper_rows(1).unwrap(), 3);
        assert_eq!(array.as_slice(), &[1, 2, 3]);

        assert!(array.dec_number_of_hyper_rows(4).is_err());
    }

    #[test]
    fn test_rank_zero_is_a_scalar() {
        let mut scalar = MDArray::<f64>::new(&[]).unwrap();
        assert_eq!(scalar.len(), 1);
        assert_eq!(scalar.capacity_hyper_rows(), 0);
        scalar.as_mut_slice()[0] = 2.5;
        assert_eq!(scalar.as_slice(), &[2.5]);
        assert!(scalar.inc_number_of_hyper_rows(1).is_err());
        assert!(scalar.hyper_row(0).is_none());
    }

    #[test]
    fn test_empty_array_with_huge_trailing_extents() {
        let huge = i32::MAX as usize;
        let mut array = MDArray::<i8>::from_vec(Vec::new(), &[0, huge, huge, huge]).unwrap();
        assert!(array.is_empty());
        assert_eq!(array.dimensions(), &[0, huge, huge, huge]);
        assert!(array.hyper_row(0).is_none());
        assert!(array.get(&[0, 0, 0, 0]).is_none());

        assert!(matches!(
            array.inc_number_of_hyper_rows(1),
            Err(TaggedArrayError::InvalidArgument(_))
        ));
        assert_eq!(array.number_of_hyper_rows(), 0);

        assert!(MDArray::<i8>::new(&[1, huge, huge, huge]).is_err());
    }

    #[test]
    fn test_equality_ignores_capacity() {
        let a = MDArray::from_vec(vec![1i32, 2], &[2]).unwrap();
        let mut b = MDArray::<i32>::with_capacity(&[2], 10).unwrap();
        b.as_mut_slice().copy_from_slice(&[1, 2]);
        assert_eq!(a, b);
        assert!(format!("{:?}", b).contains("capacity_hyper_rows: 10"));
    }
}
