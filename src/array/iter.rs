use core::{iter::FusedIterator, marker::PhantomData, ptr::NonNull};

use super::Array;

/// Iterator over the elements of an array in logical row-major order,
/// yielding copies.
pub struct Iter<'a, T> {
    ptr: NonNull<T>,
    indices: Option<Vec<usize>>,
    len: usize,
    shape: Vec<usize>,
    strides: Vec<isize>,
    phantom: PhantomData<&'a Array<T>>,
}

impl<'a, T> Iter<'a, T> {
    pub(super) fn new(a: &'a Array<T>) -> Self {
        let len = a.len();
        Self {
            ptr: a.ptr,
            indices: (len > 0).then(|| vec![0; a.ndims()]),
            len,
            shape: a.shape.clone(),
            strides: a.strides.clone(),
            phantom: PhantomData,
        }
    }
}

#[inline]
fn increment_indices(maybe_indices: &mut Option<Vec<usize>>, shape: &[usize], len: &mut usize) {
    if let Some(indices) = maybe_indices {
        for (index, &dim) in indices.iter_mut().rev().zip(shape.iter().rev()) {
            *index += 1;
            if *index == dim {
                *index = 0;
            } else {
                break;
            }
        }

        *len -= 1;
    }

    if *len == 0 {
        maybe_indices.take();
    }
}

impl<T> ExactSizeIterator for Iter<'_, T>
where
    T: Copy,
{
    #[inline(always)]
    fn len(&self) -> usize {
        self.len
    }
}

impl<T> FusedIterator for Iter<'_, T> where T: Copy {}

impl<T> Iterator for Iter<'_, T>
where
    T: Copy,
{
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let indices = self.indices.as_ref()?;
        let offset = indices
            .iter()
            .zip(&self.strides)
            .fold(0_isize, |acc, (&index, &stride)| acc + index as isize * stride);

        increment_indices(&mut self.indices, &self.shape, &mut self.len);

        // SAFETY: the indices stay within the shape, so the offset is inside
        // the reachable range of the array the iterator borrows.
        Some(unsafe { self.ptr.as_ptr().offset(offset).read() })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<T> Array<T>
where
    T: Copy,
{
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }
}

impl<'a, T> IntoIterator for &'a Array<T>
where
    T: Copy,
{
    type Item = T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::Iter;
    use crate::{s, Array, Order, Result};

    #[test]
    fn iterate_1d_storage() {
        let data = vec![1, 2, 3, 4];
        let a1 = Array::from(data.clone());
        let iter = Iter::new(&a1);

        assert_eq!(iter.ptr.as_ptr() as *const _, a1.as_ptr());
        assert_eq!(iter.indices, Some(vec![0]));
        assert_eq!(iter.len(), data.len());

        for (i, (actual, &expected)) in iter.zip(&data).enumerate() {
            assert_eq!(actual, expected, "{}th element is not equal", i);
        }
    }

    #[test]
    fn iterate_nd_storage() -> Result<()> {
        let data = (1..25).collect::<Vec<usize>>();
        let a3 = Array::from_shape_vec(&[2, 3, 4], data.clone(), Order::RowMajor)?;
        let a3s = a3.slice(s![.., .., ..;2]);
        let iter = a3s.iter();

        assert_eq!(iter.len(), data.len() / 2);

        for (i, (actual, &expected)) in iter.zip(data.iter().step_by(2)).enumerate() {
            assert_eq!(actual, expected, "{}th element is not equal", i);
        }

        Ok(())
    }

    #[test]
    fn iterate_column_major_storage_in_logical_order() {
        let a = Array::from_rows(&[[1, 2, 3], [4, 5, 6]], Order::ColumnMajor);

        assert_eq!(a.iter().collect::<Vec<_>>(), [1, 2, 3, 4, 5, 6]);
        assert_eq!((&a).into_iter().last(), Some(6));
    }

    #[test]
    fn iterate_empty_storage() {
        let a = Array::<u8>::zeros(&[3, 0], Order::RowMajor);
        let mut iter = a.iter();

        assert!(iter.indices.is_none());
        assert_eq!(iter.len(), 0);
        assert_eq!(iter.next(), None);
    }
}
