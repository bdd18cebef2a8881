mod assign;

mod iter;
pub use iter::Iter;

mod layout;

mod reshape;

mod scalar;
pub use scalar::Scalar;

mod traverse;

use core::{fmt, iter::FromIterator, ptr::NonNull};
use std::rc::Rc;

use crate::{
    shape,
    storage::{self, SharedBuffer},
    ArrayIndex, Order, Result, ShapeError,
};

/// A strided view of elements in a shared buffer.
///
/// Exactly one array per buffer carries the owner flag; every other array
/// over the same buffer is a borrowing view. All of them hold a keep-alive
/// handle, so the buffer is released once, when the last of them is
/// dropped.
///
/// Arrays are single-threaded: views may alias and are written through raw
/// pointers, so `Array` is neither `Send` nor `Sync`.
pub struct Array<T> {
    ptr: NonNull<T>,
    len: usize,
    shape: Vec<usize>,
    strides: Vec<isize>,
    storage: SharedBuffer<T>,
    owns_data: bool,
}

impl<T> Array<T> {
    fn from_parts(
        storage: SharedBuffer<T>,
        ptr: NonNull<T>,
        shape: Vec<usize>,
        strides: Vec<isize>,
        owns_data: bool,
    ) -> Self {
        debug_assert_eq!(shape.len(), strides.len());
        debug_assert!(storage.contains(ptr.as_ptr()));

        Self {
            len: shape::data_len(&shape, &strides),
            ptr,
            shape,
            strides,
            storage,
            owns_data,
        }
    }

    fn from_buffer(data: Vec<T>, shape: &[usize], order: Order) -> Self {
        debug_assert_eq!(data.len(), shape.iter().product::<usize>());

        let storage = storage::share(data);
        let ptr = storage.as_non_null();
        Self::from_parts(
            storage,
            ptr,
            shape.to_vec(),
            order.contiguous_strides(shape),
            true,
        )
    }

    /// A borrowing array over the same elements as `other`.
    ///
    /// The view holds the buffer directly, so views of views never form a
    /// chain back to the owner.
    pub fn view_of(other: &Array<T>) -> Self {
        Self {
            ptr: other.ptr,
            len: other.len,
            shape: other.shape.clone(),
            strides: other.strides.clone(),
            storage: Rc::clone(&other.storage),
            owns_data: false,
        }
    }

    /// Moves the owner flag from `donor` to `self`.
    ///
    /// # Panics
    ///
    /// Panics unless `self` is borrowing, `donor` is owning, and both use
    /// the same buffer.
    pub fn steal(&mut self, donor: &mut Array<T>) {
        assert!(!self.owns_data, "cannot steal into an array that owns its data");
        assert!(donor.owns_data, "cannot steal from an array that does not own its data");
        assert!(
            Rc::ptr_eq(&self.storage, &donor.storage),
            "cannot steal ownership of an unrelated buffer"
        );

        self.owns_data = true;
        donor.owns_data = false;
    }

    pub fn owns_data(&self) -> bool {
        self.owns_data
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn strides(&self) -> &[isize] {
        &self.strides
    }

    pub fn ndims(&self) -> usize {
        self.shape.len()
    }

    pub fn effective_ndims(&self) -> usize {
        shape::effective_ndims(&self.shape)
    }

    /// Number of elements; `0` for arrays whose effective dimensionality is
    /// zero.
    pub fn len(&self) -> usize {
        if self.effective_ndims() == 0 {
            0
        } else {
            shape::element_count(&self.shape)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of buffer slots reachable from [`as_ptr`](Self::as_ptr).
    pub fn data_len(&self) -> usize {
        self.len
    }

    /// Size of the whole underlying allocation.
    pub fn storage_len(&self) -> usize {
        self.storage.len()
    }

    /// Address of the first element. Valid for `data_len()` slots at the
    /// array's strides while the array is alive.
    pub fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    /// Mutable counterpart of [`as_ptr`](Self::as_ptr). Writes are visible
    /// through every array sharing the buffer.
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }

    fn element_ptr(&self, indices: &[usize]) -> *mut T {
        let offset = shape::flat_index(&self.shape, &self.strides, indices);
        for (axis, (&index, &dim)) in indices.iter().zip(&self.shape).enumerate() {
            assert!(
                index < dim,
                "index {} is out of bounds for axis {} with size {}",
                index,
                axis,
                dim,
            );
        }
        // SAFETY: every index is in bounds, so the offset stays inside the
        // reachable range of the buffer.
        unsafe { self.ptr.as_ptr().offset(offset) }
    }

    /// Moves the data pointer by `offset` elements.
    ///
    /// Only valid while the array holds at least one element.
    fn advance(&mut self, offset: isize) {
        debug_assert!(!self.shape.contains(&0));
        // SAFETY: callers derive `offset` from an in-bounds selection of an
        // array with at least one element, so the result points at an element
        // of the allocation and is non-null.
        self.ptr = unsafe { NonNull::new_unchecked(self.ptr.as_ptr().offset(offset)) };
    }

    /// Applies `index` to `axis` in place. Returns whether the axis is kept.
    pub(crate) fn select_axis(&mut self, axis: usize, index: &ArrayIndex) -> bool {
        let selection = index.select(axis, self.shape[axis], self.strides[axis]);
        // With a zero extent anywhere no element is reachable, and the buffer
        // may have no slots to move into.
        if !self.shape.contains(&0) {
            self.advance(selection.offset);
        }
        let kept = match selection.axis {
            Some((dim, stride)) => {
                self.shape[axis] = dim;
                self.strides[axis] = stride;
                true
            }
            None => {
                self.shape.remove(axis);
                self.strides.remove(axis);
                false
            }
        };
        self.len = shape::data_len(&self.shape, &self.strides);
        kept
    }

    /// Borrowing view of position `index` along axis 0.
    pub(crate) fn index_axis0(&self, index: usize) -> Array<T> {
        let mut out = Array::view_of(self);
        out.select_axis(0, &ArrayIndex::Index(index));
        out
    }

    /// Non-owning view selected by one [`ArrayIndex`] per leading axis.
    /// Axes without a selection keep their full extent.
    ///
    /// # Panics
    ///
    /// Panics if there are more selections than axes or an index is out of
    /// bounds.
    pub fn slice<I>(&self, info: I) -> Array<T>
    where
        I: AsRef<[ArrayIndex]>,
    {
        let indices = info.as_ref();
        let n_dims = self.ndims();
        assert!(
            indices.len() <= n_dims,
            "too many indices for array: array is {}-dimensional, but {} were indexed",
            n_dims,
            indices.len(),
        );

        let mut out = Array::view_of(self);
        let mut axis = 0;
        for index in indices {
            if out.select_axis(axis, index) {
                axis += 1;
            }
        }
        out
    }

    /// Reorders the axes without moving data: axis `i` of the result is axis
    /// `axes[i]` of `self`.
    ///
    /// # Panics
    ///
    /// Panics if `axes` is not a permutation of `0..self.ndims()`.
    pub fn permuted_axes(&self, axes: &[usize]) -> Array<T> {
        let n_dims = self.ndims();
        assert_eq!(axes.len(), n_dims, "axes don't match array");
        let mut seen = vec![false; n_dims];
        for &axis in axes {
            assert!(
                axis < n_dims,
                "axis {} is out of bounds for array of dimension {}",
                axis,
                n_dims
            );
            assert!(!seen[axis], "repeated axis in permutation");
            seen[axis] = true;
        }

        let mut out = Array::view_of(self);
        out.shape = axes.iter().map(|&axis| self.shape[axis]).collect();
        out.strides = axes.iter().map(|&axis| self.strides[axis]).collect();
        out
    }

    pub fn transpose(&self) -> Array<T> {
        let axes = (0..self.ndims()).rev().collect::<Vec<_>>();
        self.permuted_axes(&axes)
    }
}

impl<T> Array<T>
where
    T: Scalar,
{
    /// Owning one-dimensional array of `len` elements. The contents are
    /// unspecified by contract; this implementation zero-fills them.
    pub fn allocate(len: usize) -> Self {
        Self::allocate_with_shape(&[len], Order::RowMajor)
    }

    pub fn allocate_with_shape(shape: &[usize], order: Order) -> Self {
        Self::zeros(shape, order)
    }

    pub fn zeros(shape: &[usize], order: Order) -> Self {
        let len = shape.iter().product();
        Self::from_buffer(vec![T::zero(); len], shape, order)
    }

    pub fn ones(shape: &[usize], order: Order) -> Self {
        let len = shape.iter().product();
        Self::from_buffer(vec![T::one(); len], shape, order)
    }

    /// Builds an array from elements listed in row-major index order,
    /// stored in `order`.
    pub fn from_shape_vec(shape: &[usize], data: Vec<T>, order: Order) -> Result<Self> {
        let len = shape.iter().product::<usize>();
        if data.len() != len {
            return Err(ShapeError::IncompatibleShape {
                len: data.len(),
                to: shape.to_vec(),
            }
            .into());
        }

        let src = Self::from_buffer(data, shape, Order::RowMajor);
        match order {
            Order::RowMajor => Ok(src),
            Order::ColumnMajor => {
                let mut dst = Self::allocate_with_shape(shape, order);
                src.copy_to(&mut dst);
                Ok(dst)
            }
        }
    }

    /// Two-dimensional array from equally long rows.
    ///
    /// # Panics
    ///
    /// Panics if the rows differ in length.
    pub fn from_rows<R>(rows: &[R], order: Order) -> Self
    where
        R: AsRef<[T]>,
    {
        let cols = rows.first().map_or(0, |row| row.as_ref().len());
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            assert_eq!(
                row.len(),
                cols,
                "row {} has {} elements, expected {}",
                i,
                row.len(),
                cols
            );
            data.extend_from_slice(row);
        }

        let src = Self::from_buffer(data, &[rows.len(), cols], Order::RowMajor);
        match order {
            Order::RowMajor => src,
            Order::ColumnMajor => {
                let mut dst = Self::allocate_with_shape(src.shape(), order);
                src.copy_to(&mut dst);
                dst
            }
        }
    }

    /// `start, start + 1, ...` up to but excluding `end`.
    pub fn range(start: T, end: T) -> Self
    where
        T: PartialOrd,
    {
        let mut data = Vec::new();
        let mut x = start;
        while x < end {
            data.push(x);
            x = x + T::one();
        }
        Self::from(data)
    }

    /// Owning array with the same elements as `other`, in `other`'s storage
    /// order if it is contiguous and row-major otherwise.
    ///
    /// A zero-dimensional `other` counts as empty, like in every bulk
    /// operation: the copy gets a fresh element rather than `other`'s one,
    /// and still compares equal to it.
    pub fn copy_of(other: &Array<T>) -> Self {
        let order = other.contiguous_order().unwrap_or_default();
        let mut out = Self::allocate_with_shape(&other.shape, order);
        other.copy_to(&mut out);
        out
    }

    /// Element at `indices`.
    ///
    /// `get(&[])` reads the element of a zero-dimensional array, which bulk
    /// operations such as [`copy_of`](Self::copy_of), [`to_vec`](Self::to_vec)
    /// and reductions treat as empty.
    ///
    /// # Panics
    ///
    /// Panics if the number of indices differs from the number of axes or an
    /// index is out of bounds.
    pub fn get(&self, indices: &[usize]) -> T {
        let ptr = self.element_ptr(indices);
        // SAFETY: `element_ptr` checked the indices.
        unsafe { ptr.read() }
    }

    /// # Panics
    ///
    /// Panics under the same conditions as [`get`](Self::get).
    pub fn set(&mut self, indices: &[usize], value: T) {
        let ptr = self.element_ptr(indices);
        // SAFETY: `element_ptr` checked the indices.
        unsafe { ptr.write(value) }
    }

    /// Elements in logical row-major order.
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().collect()
    }

    /// The reachable memory region `[as_ptr(), as_ptr() + data_len())` in
    /// memory order. For a contiguous array these are exactly its elements.
    pub fn data_array(&self) -> Vec<T> {
        (0..self.len)
            // SAFETY: `len` never exceeds the reachable part of the buffer.
            .map(|i| unsafe { self.ptr.as_ptr().add(i).read() })
            .collect()
    }
}

impl<T> Clone for Array<T>
where
    T: Scalar,
{
    /// Deep copy; the clone owns a fresh buffer.
    fn clone(&self) -> Self {
        Self::copy_of(self)
    }
}

impl<T> fmt::Debug for Array<T>
where
    T: Copy + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Array")
            .field("shape", &self.shape)
            .field("strides", &self.strides)
            .field("owns_data", &self.owns_data)
            .field("data", &self.iter().collect::<Vec<_>>())
            .finish()
    }
}

impl<T> From<Vec<T>> for Array<T> {
    fn from(data: Vec<T>) -> Self {
        let len = data.len();
        Self::from_buffer(data, &[len], Order::RowMajor)
    }
}

impl<T> FromIterator<T> for Array<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}
