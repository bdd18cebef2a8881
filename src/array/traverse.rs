//! Element traversal shared by every elementwise operation and reduction.
//!
//! Arrays without elements are skipped, one-dimensional arrays are walked
//! with a strided loop, contiguous blocks with a flat loop, and anything
//! else one axis-0 sub-array at a time.

use super::{Array, Scalar};

/// Calls `f` with the address of every element of `a`. Contiguous arrays are
/// visited in memory order, the others in row-major order.
fn visit<T, F>(a: &Array<T>, f: &mut F)
where
    F: FnMut(*mut T),
{
    if a.effective_ndims() == 0 {
        return;
    }

    let ptr = a.ptr.as_ptr();
    if a.ndims() == 1 {
        let stride = a.strides[0];
        for i in 0..a.shape[0] as isize {
            // SAFETY: `i` is below the extent of the only axis.
            f(unsafe { ptr.offset(i * stride) });
        }
    } else if a.is_contiguous() {
        for i in 0..a.len() {
            // SAFETY: a contiguous array covers exactly `len()` slots.
            f(unsafe { ptr.add(i) });
        }
    } else {
        for i in 0..a.shape[0] {
            visit(&a.index_axis0(i), f);
        }
    }
}

/// Calls `f` with the addresses of corresponding elements of two arrays of
/// the same shape.
fn visit_pair<T, U, F>(a: &Array<T>, b: &Array<U>, f: &mut F)
where
    F: FnMut(*mut T, *mut U),
{
    debug_assert_eq!(a.shape, b.shape);

    if a.effective_ndims() == 0 {
        return;
    }

    let (pa, pb) = (a.ptr.as_ptr(), b.ptr.as_ptr());
    if a.ndims() == 1 {
        let (sa, sb) = (a.strides[0], b.strides[0]);
        for i in 0..a.shape[0] as isize {
            // SAFETY: `i` is below the common extent.
            f(unsafe { pa.offset(i * sa) }, unsafe { pb.offset(i * sb) });
        }
    } else if a.is_contiguous_like(b) {
        for i in 0..a.len() {
            // SAFETY: both arrays cover exactly `len()` slots in the same
            // order.
            f(unsafe { pa.add(i) }, unsafe { pb.add(i) });
        }
    } else {
        for i in 0..a.shape[0] {
            visit_pair(&a.index_axis0(i), &b.index_axis0(i), f);
        }
    }
}

fn assert_same_shape<T, U>(a: &Array<T>, b: &Array<U>) {
    assert_eq!(
        a.shape, b.shape,
        "operands could not be combined with shapes {:?} {:?}",
        a.shape, b.shape,
    );
}

impl<T> Array<T>
where
    T: Scalar,
{
    pub fn fill(&mut self, value: T) {
        // SAFETY: `visit` only yields element addresses.
        visit(self, &mut |p: *mut T| unsafe { p.write(value) });
    }

    /// Replaces every element with `f` of itself.
    pub fn apply<F>(&mut self, mut f: F)
    where
        F: FnMut(T) -> T,
    {
        // SAFETY: `visit` only yields element addresses.
        visit(self, &mut |p: *mut T| unsafe { p.write(f(p.read())) });
    }

    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(T),
    {
        // SAFETY: `visit` only yields element addresses.
        visit(self, &mut |p: *mut T| f(unsafe { p.read() }));
    }

    /// Folds every element into an accumulator. The visiting order is
    /// unspecified.
    pub fn fold<B, F>(&self, init: B, mut f: F) -> B
    where
        F: FnMut(B, T) -> B,
    {
        let mut acc = Some(init);
        visit(self, &mut |p: *mut T| {
            if let Some(a) = acc.take() {
                // SAFETY: `visit` only yields element addresses.
                acc = Some(f(a, unsafe { p.read() }));
            }
        });
        // only empty while the closure runs
        acc.unwrap_or_else(|| unreachable!())
    }

    /// New owning array of `f` applied to every element, in this array's
    /// storage order when it is contiguous and row-major otherwise.
    pub fn map<U, F>(&self, mut f: F) -> Array<U>
    where
        F: FnMut(T) -> U,
        U: Scalar,
    {
        let order = self.contiguous_order().unwrap_or_default();
        let out = Array::allocate_with_shape(&self.shape, order);
        // SAFETY: `visit_pair` only yields element addresses.
        visit_pair(self, &out, &mut |src: *mut T, dst: *mut U| unsafe {
            dst.write(f(src.read()))
        });
        out
    }

    /// Combines every element with the corresponding element of `other`.
    /// `other` is read as it was before the call, even if it aliases `self`.
    ///
    /// # Panics
    ///
    /// Panics if the shapes differ.
    pub fn zip_apply<F>(&mut self, other: &Array<T>, mut f: F)
    where
        F: FnMut(T, T) -> T,
    {
        assert_same_shape(self, other);

        let staged;
        let other = if self.overlaps(other) {
            staged = Array::copy_of(other);
            &staged
        } else {
            other
        };
        // SAFETY: `visit_pair` only yields element addresses.
        visit_pair(self, other, &mut |dst: *mut T, src: *mut T| unsafe {
            dst.write(f(dst.read(), src.read()))
        });
    }

    pub fn sum(&self) -> T {
        self.fold(T::zero(), |acc, x| acc + x)
    }

    pub fn product(&self) -> T {
        self.fold(T::one(), |acc, x| acc * x)
    }

    /// Largest element, or `None` if the array is empty.
    pub fn max(&self) -> Option<T>
    where
        T: PartialOrd,
    {
        self.fold(None, |acc, x| match acc {
            Some(m) if m >= x => Some(m),
            _ => Some(x),
        })
    }

    /// Smallest element, or `None` if the array is empty.
    pub fn min(&self) -> Option<T>
    where
        T: PartialOrd,
    {
        self.fold(None, |acc, x| match acc {
            Some(m) if m <= x => Some(m),
            _ => Some(x),
        })
    }

    pub fn scale(&self, factor: T) -> Array<T> {
        self.map(|x| x * factor)
    }

    pub fn scale_in_place(&mut self, factor: T) {
        self.apply(|x| x * factor);
    }
}

macro_rules! impl_binary_op {
    ($op:ident, $op_in_place:ident, $bin:tt) => {
        impl<T> Array<T>
        where
            T: Scalar,
        {
            #[doc = concat!(
                "Elementwise `self ",
                stringify!($bin),
                " other` into a new owning array."
            )]
            ///
            /// # Panics
            ///
            /// Panics if the shapes differ.
            pub fn $op(&self, other: &Array<T>) -> Array<T> {
                let mut out = Array::copy_of(self);
                out.$op_in_place(other);
                out
            }

            #[doc = concat!("Elementwise `self ", stringify!($bin), "= other`.")]
            ///
            /// # Panics
            ///
            /// Panics if the shapes differ.
            pub fn $op_in_place(&mut self, other: &Array<T>) {
                self.zip_apply(other, |a, b| a $bin b);
            }
        }
    };
}

impl_binary_op!(add, add_in_place, +);
impl_binary_op!(sub, sub_in_place, -);
impl_binary_op!(mul, mul_in_place, *);
impl_binary_op!(div, div_in_place, /);

impl<T> PartialEq for Array<T>
where
    T: Scalar,
{
    fn eq(&self, other: &Self) -> bool {
        if self.shape != other.shape {
            return false;
        }

        let mut equal = true;
        visit_pair(self, other, &mut |a: *mut T, b: *mut T| {
            // SAFETY: `visit_pair` only yields element addresses.
            equal = equal && unsafe { a.read() == b.read() };
        });
        equal
    }
}
