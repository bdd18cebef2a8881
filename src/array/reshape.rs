use tracing::debug;

use super::{Array, Scalar};
use crate::{shape, Order, Result, ShapeError};

/// Strides that lay out `to_shape` over the same memory as `from_shape` with
/// `from_strides`, reading elements in `order`.
///
/// Unit axes of the source are ignored. Source and target axes are grouped
/// left to right until the products of their extents agree; each group of
/// source axes has to be contiguous relative to itself under `order`.
pub(crate) fn reshape_strides(
    from_shape: &[usize],
    from_strides: &[isize],
    to_shape: &[usize],
    order: Order,
) -> core::result::Result<Vec<isize>, ShapeError> {
    debug_assert_eq!(from_shape.len(), from_strides.len());

    let len = shape::element_count(from_shape);
    if len != shape::element_count(to_shape) {
        return Err(ShapeError::IncompatibleShape {
            len,
            to: to_shape.to_vec(),
        });
    }
    if len == 0 {
        return Ok(vec![1; to_shape.len()]);
    }

    let (old_dims, old_strides): (Vec<usize>, Vec<isize>) = from_shape
        .iter()
        .zip(from_strides)
        .filter(|&(&dim, _)| dim != 1)
        .map(|(&dim, &stride)| (dim, stride))
        .unzip();
    let incompatible_layout = || ShapeError::IncompatibleLayout {
        shape: from_shape.to_vec(),
        strides: from_strides.to_vec(),
        to: to_shape.to_vec(),
    };

    let mut strides = vec![0_isize; to_shape.len()];
    let (mut oi, mut oj) = (0, 1);
    let (mut ni, mut nj) = (0, 1);
    while ni < to_shape.len() && oi < old_dims.len() {
        let mut np = to_shape[ni];
        let mut op = old_dims[oi];
        while np != op {
            if np < op {
                np *= to_shape[nj];
                nj += 1;
            } else {
                op *= old_dims[oj];
                oj += 1;
            }
        }

        for k in oi..oj - 1 {
            let contiguous = match order {
                Order::RowMajor => old_strides[k] == old_dims[k + 1] as isize * old_strides[k + 1],
                Order::ColumnMajor => old_strides[k + 1] == old_dims[k] as isize * old_strides[k],
            };
            if !contiguous {
                return Err(incompatible_layout());
            }
        }

        match order {
            Order::RowMajor => {
                strides[nj - 1] = old_strides[oj - 1];
                for k in (ni + 1..nj).rev() {
                    strides[k - 1] = strides[k] * to_shape[k] as isize;
                }
            }
            Order::ColumnMajor => {
                strides[ni] = old_strides[oi];
                for k in ni + 1..nj {
                    strides[k] = strides[k - 1] * to_shape[k - 1] as isize;
                }
            }
        }

        ni = nj;
        nj += 1;
        oi = oj;
        oj += 1;
    }

    // trailing unit axes
    let last_stride = match (ni, order) {
        (0, _) => 1,
        (_, Order::RowMajor) => strides[ni - 1],
        (_, Order::ColumnMajor) => strides[ni - 1] * to_shape[ni - 1] as isize,
    };
    for stride in &mut strides[ni..] {
        *stride = last_stride;
    }

    Ok(strides)
}

impl<T> Array<T> {
    /// Reinterprets the array with `shape` in place, without moving data.
    ///
    /// On failure the array is left untouched. An
    /// [`IncompatibleLayout`](ShapeError::IncompatibleLayout) error means
    /// the data has to be copied before it can take the new shape.
    pub fn reshape(
        &mut self,
        shape: &[usize],
        order: Order,
    ) -> core::result::Result<(), ShapeError> {
        let strides = reshape_strides(&self.shape, &self.strides, shape, order)?;
        self.shape = shape.to_vec();
        self.strides = strides;
        self.len = shape::data_len(&self.shape, &self.strides);
        Ok(())
    }

    /// Borrowing view with `shape`. Never copies.
    pub fn reshaped(&self, shape: &[usize], order: Order) -> Result<Array<T>> {
        let mut out = Array::view_of(self);
        out.reshape(shape, order)?;
        Ok(out)
    }
}

impl<T> Array<T>
where
    T: Scalar,
{
    /// Array with `shape`: a view when the layout allows one, otherwise an
    /// owning copy stored in `order`.
    pub fn to_shape(&self, shape: &[usize], order: Order) -> Result<Array<T>> {
        match self.reshaped(shape, order) {
            Err(crate::Error::Shape(e)) if e.is_layout() => self.reshape_copy(shape, order),
            result => result,
        }
    }

    /// Consuming form of [`to_shape`](Self::to_shape). Ownership carries
    /// over when no copy is needed.
    pub fn into_shape(mut self, shape: &[usize], order: Order) -> Result<Array<T>> {
        match self.reshape(shape, order) {
            Ok(()) => Ok(self),
            Err(e) if e.is_layout() => self.reshape_copy(shape, order),
            Err(e) => Err(e.into()),
        }
    }

    fn reshape_copy(&self, shape: &[usize], order: Order) -> Result<Array<T>> {
        debug!(
            from = ?self.shape,
            strides = ?self.strides,
            to = ?shape,
            order = order.name(),
            "layout does not allow a view, copying before reshape"
        );
        let mut out = Array::allocate_with_shape(&self.shape, order);
        self.copy_to(&mut out);
        out.reshape(shape, order)?;
        Ok(out)
    }
}
