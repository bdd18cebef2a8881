use core::{
    fmt,
    ops::{Range, RangeFrom, RangeFull, RangeInclusive, RangeTo, RangeToInclusive},
};

use crate::{slice::ResolvedSlice, Slice};

/// Selection applied to a single axis.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ArrayIndex {
    /// Selects one position and removes the axis.
    Index(usize),
    /// Selects a range and keeps the axis.
    Slice(Slice),
}

/// Effect of an [`ArrayIndex`] on one axis of a shape.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct AxisSelection {
    /// Offset added to the data pointer, in elements.
    pub offset: isize,
    /// Extent and stride of the resulting axis, or `None` if it is removed.
    pub axis: Option<(usize, isize)>,
}

impl ArrayIndex {
    pub const fn is_index(&self) -> bool {
        matches!(self, Self::Index(_))
    }

    pub const fn is_slice(&self) -> bool {
        matches!(self, Self::Slice(_))
    }

    /// Applies the selection to axis `axis` with extent `dim` and stride
    /// `stride`.
    ///
    /// # Panics
    ///
    /// Panics if an index is out of bounds or a slice step is zero.
    pub(crate) fn select(&self, axis: usize, dim: usize, stride: isize) -> AxisSelection {
        match self {
            Self::Index(index) => {
                assert!(
                    *index < dim,
                    "index {} is out of bounds for axis {} with size {}",
                    index,
                    axis,
                    dim,
                );
                AxisSelection {
                    offset: *index as isize * stride,
                    axis: None,
                }
            }
            Self::Slice(slice) => {
                assert!(slice.step() > 0, "slice step cannot be zero");
                let ResolvedSlice { start, len, step } = slice.resolve(dim);
                if len == 0 {
                    AxisSelection {
                        offset: 0,
                        axis: Some((0, stride)),
                    }
                } else {
                    AxisSelection {
                        offset: start as isize * stride,
                        axis: Some((len, stride * step as isize)),
                    }
                }
            }
        }
    }
}

impl fmt::Display for ArrayIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "{i}"),
            Self::Slice(s) => write!(f, "{s}"),
        }
    }
}

impl From<usize> for ArrayIndex {
    fn from(v: usize) -> Self {
        Self::Index(v)
    }
}

impl From<Range<usize>> for ArrayIndex {
    fn from(v: Range<usize>) -> Self {
        Self::from(Slice::from(v))
    }
}

impl From<RangeFrom<usize>> for ArrayIndex {
    fn from(v: RangeFrom<usize>) -> Self {
        Self::from(Slice::from(v))
    }
}

impl From<RangeFull> for ArrayIndex {
    fn from(v: RangeFull) -> Self {
        Self::from(Slice::from(v))
    }
}

impl From<RangeInclusive<usize>> for ArrayIndex {
    fn from(v: RangeInclusive<usize>) -> Self {
        Self::from(Slice::from(v))
    }
}

impl From<RangeToInclusive<usize>> for ArrayIndex {
    fn from(v: RangeToInclusive<usize>) -> Self {
        Self::from(Slice::from(v))
    }
}

impl From<RangeTo<usize>> for ArrayIndex {
    fn from(v: RangeTo<usize>) -> Self {
        Self::from(Slice::from(v))
    }
}

impl From<Slice> for ArrayIndex {
    fn from(v: Slice) -> Self {
        Self::Slice(v)
    }
}
