use core::{
    fmt,
    ops::{Deref, DerefMut},
};

use crate::{Array, ArrayIndex};

/// Array selected one axis at a time.
///
/// Each call to [`at`](View::at) applies to the next axis that has not been
/// consumed yet: an index removes that axis, a range keeps it and moves past
/// it.
///
/// ```
/// use hagane::{Array, Order};
///
/// let a = Array::from_shape_vec(&[2, 3, 4], (0..24).collect(), Order::RowMajor).unwrap();
/// let v = a.view().at(1).at(..2).at(3);
///
/// assert_eq!(v.shape(), &[2]);
/// assert_eq!(v.to_vec(), [15, 19]);
/// assert_eq!(v.debug_description(), "Array[2, 3, 4][1][..2][3]");
/// ```
pub struct View<T> {
    array: Array<T>,
    cursor: usize,
    origin: Vec<usize>,
    trail: Vec<ArrayIndex>,
}

impl<T> View<T> {
    pub(crate) fn new(array: Array<T>) -> Self {
        Self {
            origin: array.shape().to_vec(),
            array,
            cursor: 0,
            trail: Vec::new(),
        }
    }

    /// Applies `index` to the next unconsumed axis.
    ///
    /// # Panics
    ///
    /// Panics if every axis has already been consumed, or if the index is
    /// out of bounds.
    pub fn at<I>(mut self, index: I) -> View<T>
    where
        I: Into<ArrayIndex>,
    {
        let index = index.into();
        assert!(
            self.cursor < self.array.ndims(),
            "too many indices for array: array is {}-dimensional, but {} were indexed",
            self.origin.len(),
            self.trail.len() + 1,
        );

        if self.array.select_axis(self.cursor, &index) {
            self.cursor += 1;
        }
        self.trail.push(index);
        self
    }

    /// Number of axes of the original array consumed so far.
    pub fn consumed(&self) -> usize {
        self.trail.len()
    }

    /// The original shape followed by every applied selection, e.g.
    /// `Array[2, 3, 4][1][..;2]`.
    pub fn debug_description(&self) -> String {
        let mut out = format!("Array{:?}", self.origin);
        for index in &self.trail {
            out.push_str(&format!("[{}]", index));
        }
        out
    }

    pub fn into_array(self) -> Array<T> {
        self.array
    }
}

impl<T> Deref for View<T> {
    type Target = Array<T>;

    fn deref(&self) -> &Self::Target {
        &self.array
    }
}

impl<T> DerefMut for View<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.array
    }
}

impl<T> fmt::Debug for View<T>
where
    T: Copy + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("View")
            .field("description", &self.debug_description())
            .field("array", &self.array)
            .finish()
    }
}

impl<T> Array<T> {
    /// Starts a chain of per-axis selections over a borrowing view.
    pub fn view(&self) -> View<T> {
        View::new(Array::view_of(self))
    }
}

#[cfg(test)]
mod tests {
    use core::num::NonZeroUsize;

    use crate::{s, Array, Order, Result, Slice};

    fn array3() -> Result<Array<i32>> {
        Array::from_shape_vec(&[2, 3, 4], (0..24).collect(), Order::RowMajor)
    }

    #[test]
    fn chain_ranges() -> Result<()> {
        let a = array3()?;
        let v = a.view().at(1..).at(..).at(1..3);

        assert_eq!(v.consumed(), 3);
        assert_eq!(v.shape(), &[1, 3, 2]);
        assert_eq!(v.strides(), &[12, 4, 1]);
        assert_eq!(v.to_vec(), [13, 14, 17, 18, 21, 22]);
        assert!(!v.owns_data());

        Ok(())
    }

    #[test]
    fn chain_matches_slice() -> Result<()> {
        let a = array3()?;
        let step = NonZeroUsize::new(2).unwrap();
        let chained = a.view().at(0).at(Slice::full().step_by(step)).into_array();
        let sliced = a.slice(s![0, ..;2]);

        assert_eq!(chained.shape(), sliced.shape());
        assert_eq!(chained.strides(), sliced.strides());
        assert_eq!(chained.as_ptr(), sliced.as_ptr());

        Ok(())
    }

    #[test]
    fn index_consumes_axis() -> Result<()> {
        let a = array3()?;
        let v = a.view().at(1);

        assert_eq!(v.shape(), &[3, 4]);
        assert_eq!(v.consumed(), 1);

        let v = v.at(2);

        assert_eq!(v.shape(), &[4]);
        assert_eq!(v.to_vec(), [20, 21, 22, 23]);

        Ok(())
    }

    #[test]
    fn describe_trail() -> Result<()> {
        let a = array3()?;
        let v = a.view().at(1).at(Slice::new(None, None, NonZeroUsize::new(2)));

        assert_eq!(v.debug_description(), "Array[2, 3, 4][1][..;2]");
        assert_eq!(a.view().debug_description(), "Array[2, 3, 4]");

        Ok(())
    }

    #[test]
    fn write_through_view() -> Result<()> {
        let a = array3()?;
        let mut v = a.view().at(..).at(0);
        v.fill(-1);

        assert_eq!(a.get(&[0, 0, 3]), -1);
        assert_eq!(a.get(&[1, 0, 0]), -1);
        assert_eq!(a.get(&[1, 1, 0]), 16);

        Ok(())
    }

    #[test]
    #[should_panic(
        expected = "too many indices for array: array is 2-dimensional, but 3 were indexed"
    )]
    fn chain_too_many_indices() {
        let a = Array::<u8>::zeros(&[2, 2], Order::RowMajor);
        let _ = a.view().at(0).at(1).at(0);
    }

    #[test]
    #[should_panic(expected = "too many indices for array")]
    fn chain_past_last_axis() {
        let a = Array::<u8>::zeros(&[2, 2], Order::RowMajor);
        let _ = a.view().at(..).at(..).at(..);
    }
}
