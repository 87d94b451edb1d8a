// src/mdarray/shape.rs
use crate::error::{Result, TaggedArrayError};
use smallvec::SmallVec;

/// Inline storage for array dimensions; most arrays have rank four or less.
pub type Dimensions = SmallVec<[usize; 4]>;

/// Number of elements an array with these dimensions holds.
///
/// An empty dimension list is a scalar and holds one element. Overflow of
/// `usize` is an `InvalidArgument`.
pub fn element_count(dimensions: &[usize]) -> Result<usize> {
    dimensions
        .iter()
        .try_fold(1usize, |acc, &d| acc.checked_mul(d))
        .ok_or_else(|| {
            TaggedArrayError::InvalidArgument(format!(
                "dimensions {:?} exceed the addressable length",
                dimensions
            ))
        })
}

/// Length of one hyper-row, i.e. the product of all dimensions after the first.
pub fn hyper_row_length(dimensions: &[usize]) -> Result<usize> {
    element_count(dimensions.get(1..).unwrap_or(&[]))
}

/// Element count with dimension 0 replaced by `capacity_hyper_rows` when that is larger.
pub fn storage_length(dimensions: &[usize], capacity_hyper_rows: usize) -> Result<usize> {
    match dimensions.first() {
        Some(&rows) if capacity_hyper_rows > rows => {
            let mut sized: Dimensions = SmallVec::from_slice(dimensions);
            sized[0] = capacity_hyper_rows;
            element_count(&sized)
        }
        _ => element_count(dimensions),
    }
}

/// Row-major flat index: the last dimension varies fastest.
///
/// Does not check the indices against the dimensions.
#[inline]
pub fn compute_index(dimensions: &[usize], indices: &[usize]) -> usize {
    debug_assert_eq!(dimensions.len(), indices.len(), "index rank mismatch");
    let mut index = indices.first().copied().unwrap_or(0);
    for d in 1..indices.len() {
        index = index * dimensions[d] + indices[d];
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_count() {
        assert_eq!(element_count(&[2, 3, 4]).unwrap(), 24);
        assert_eq!(element_count(&[5, 0]).unwrap(), 0);
        assert_eq!(element_count(&[]).unwrap(), 1);
        assert!(matches!(
            element_count(&[usize::MAX, 2]),
            Err(TaggedArrayError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_storage_length_uses_capacity() {
        assert_eq!(storage_length(&[2, 3], 5).unwrap(), 15);
        assert_eq!(storage_length(&[4, 3], 2).unwrap(), 12);
        assert_eq!(hyper_row_length(&[4, 3, 2]).unwrap(), 6);
        assert_eq!(hyper_row_length(&[4]).unwrap(), 1);
    }

    #[test]
    fn test_compute_index_row_major() {
        let dims = [2, 3, 4];
        assert_eq!(compute_index(&dims, &[0, 0, 0]), 0);
        assert_eq!(compute_index(&dims, &[0, 0, 3]), 3);
        assert_eq!(compute_index(&dims, &[0, 1, 0]), 4);
        assert_eq!(compute_index(&dims, &[1, 2, 3]), 23);
        assert_eq!(compute_index(&[7], &[5]), 5);
    }
}
