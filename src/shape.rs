//! Pure shape and stride arithmetic shared by every array operation.

use crate::Order;

/// Linear offset of `indices` from the first element.
///
/// # Panics
///
/// Panics if the number of indices differs from the number of axes.
pub fn flat_index(shape: &[usize], strides: &[isize], indices: &[usize]) -> isize {
    assert_eq!(
        indices.len(),
        shape.len(),
        "incorrect number of indices for array: array is {}-dimensional, but {} were indexed",
        shape.len(),
        indices.len(),
    );
    debug_assert_eq!(shape.len(), strides.len());

    indices
        .iter()
        .zip(strides)
        .fold(0_isize, |acc, (&index, &stride)| acc + index as isize * stride)
}

pub fn contiguous_strides(shape: &[usize], order: Order) -> Vec<isize> {
    order.contiguous_strides(shape)
}

pub fn element_count(shape: &[usize]) -> usize {
    shape.iter().product()
}

/// `0` when the array holds no element, otherwise the number of axes.
pub fn effective_ndims(shape: &[usize]) -> usize {
    if shape.is_empty() || shape.contains(&0) {
        0
    } else {
        shape.len()
    }
}

/// Number of buffer slots reachable from the first element: the flat index
/// of the last element plus one. Axes with a negative stride reach backwards
/// and do not extend the range.
pub fn data_len(shape: &[usize], strides: &[isize]) -> usize {
    debug_assert_eq!(shape.len(), strides.len());

    if shape.contains(&0) {
        return 0;
    }
    let last = shape
        .iter()
        .zip(strides)
        .fold(0_isize, |acc, (&dim, &stride)| {
            acc + (dim as isize - 1) * stride.max(0)
        });
    last as usize + 1
}
