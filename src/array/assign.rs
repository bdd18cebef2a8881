use core::ptr;

use tracing::trace;

use super::{Array, Scalar};
use crate::{ArrayIndex, Order};

impl<T> Array<T>
where
    T: Scalar,
{
    /// Copies every element of `self` into `destination`.
    ///
    /// The two arrays may alias. The result is always as if `self` had been
    /// read completely before `destination` was written.
    ///
    /// # Panics
    ///
    /// Panics if the shapes differ.
    pub fn copy_to(&self, destination: &mut Array<T>) {
        assert_eq!(
            self.shape, destination.shape,
            "could not copy array of shape {:?} into array of shape {:?}",
            self.shape, destination.shape,
        );

        let len = self.len();
        if len == 0 {
            return;
        }

        if self.is_contiguous_like(destination) {
            trace!(len, "bulk copy");
            // SAFETY: both arrays cover exactly `len` consecutive slots;
            // `ptr::copy` tolerates overlapping ranges.
            unsafe { ptr::copy(self.as_ptr(), destination.as_mut_ptr(), len) };
        } else if self.overlaps(destination) {
            let order = if destination.is_column_major_contiguous() {
                Order::ColumnMajor
            } else {
                Order::RowMajor
            };
            trace!(len, order = order.name(), "copy through intermediate buffer");
            let mut staged = Array::allocate_with_shape(&self.shape, order);
            self.copy_to(&mut staged);
            staged.copy_to(destination);
        } else if self.ndims() == 1 {
            let (src_stride, dst_stride) = (self.strides[0], destination.strides[0]);
            let (src, dst) = (self.as_ptr(), destination.as_mut_ptr());
            for i in 0..self.shape[0] as isize {
                // SAFETY: `i` is below the extent of both arrays.
                unsafe { dst.offset(i * dst_stride).write(src.offset(i * src_stride).read()) };
            }
        } else {
            for i in 0..self.shape[0] {
                self.index_axis0(i)
                    .copy_to(&mut destination.index_axis0(i));
            }
        }
    }

    /// Copies `source` into `self`. See [`copy_to`](Self::copy_to).
    pub fn assign(&mut self, source: &Array<T>) {
        source.copy_to(self);
    }

    /// Copies `source` into the region of `self` selected by `info`.
    pub fn assign_slice<I>(&mut self, info: I, source: &Array<T>)
    where
        I: AsRef<[ArrayIndex]>,
    {
        let mut region = self.slice(info);
        source.copy_to(&mut region);
    }
}
