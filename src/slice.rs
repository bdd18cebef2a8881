use core::{
    fmt,
    num::NonZeroUsize,
    ops::{Bound, Range, RangeFrom, RangeFull, RangeInclusive, RangeTo, RangeToInclusive},
};

/// A bounded or unbounded range over one axis, with a positive step.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Slice {
    pub(crate) start: Bound<usize>,
    pub(crate) end: Bound<usize>,
    pub(crate) step: usize,
}

impl From<Range<usize>> for Slice {
    fn from(v: Range<usize>) -> Self {
        Self {
            start: Bound::Included(v.start),
            end: Bound::Excluded(v.end),
            step: 1,
        }
    }
}

impl From<RangeFrom<usize>> for Slice {
    fn from(v: RangeFrom<usize>) -> Self {
        Self {
            start: Bound::Included(v.start),
            end: Bound::Unbounded,
            step: 1,
        }
    }
}

impl From<RangeFull> for Slice {
    fn from(_: RangeFull) -> Self {
        Self::full()
    }
}

impl From<RangeInclusive<usize>> for Slice {
    fn from(v: RangeInclusive<usize>) -> Self {
        Self {
            start: Bound::Included(*v.start()),
            end: Bound::Included(*v.end()),
            step: 1,
        }
    }
}

impl From<RangeToInclusive<usize>> for Slice {
    fn from(v: RangeToInclusive<usize>) -> Self {
        Self {
            start: Bound::Unbounded,
            end: Bound::Included(v.end),
            step: 1,
        }
    }
}

impl From<RangeTo<usize>> for Slice {
    fn from(v: RangeTo<usize>) -> Self {
        Self {
            start: Bound::Unbounded,
            end: Bound::Excluded(v.end),
            step: 1,
        }
    }
}

/// Position and extent of a range once resolved against an axis.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ResolvedSlice {
    pub start: usize,
    pub len: usize,
    pub step: usize,
}

impl Slice {
    pub const fn full() -> Self {
        Self {
            start: Bound::Unbounded,
            end: Bound::Unbounded,
            step: 1,
        }
    }

    pub const fn new(start: Option<usize>, end: Option<usize>, step: Option<NonZeroUsize>) -> Self {
        Self {
            start: match start {
                Some(x) => Bound::Included(x),
                None => Bound::Unbounded,
            },
            end: match end {
                Some(x) => Bound::Excluded(x),
                None => Bound::Unbounded,
            },
            step: match step {
                Some(x) => x.get(),
                None => 1,
            },
        }
    }

    pub const fn step_by(self, step: NonZeroUsize) -> Self {
        Self {
            step: step.get(),
            ..self
        }
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn is_full(&self) -> bool {
        self.start == Bound::Unbounded && self.end == Bound::Unbounded && self.step == 1
    }

    fn end_with_dim(&self, dim: usize) -> usize {
        match self.end {
            Bound::Excluded(x) => x.min(dim),
            Bound::Included(x) => x.saturating_add(1).min(dim),
            Bound::Unbounded => dim,
        }
    }

    pub(crate) fn start_with_dim(&self, dim: usize) -> usize {
        match self.start {
            Bound::Excluded(x) => x.saturating_add(1).min(dim),
            Bound::Included(x) => x.min(dim),
            Bound::Unbounded => 0,
        }
    }

    pub(crate) fn len_with_dim(&self, dim: usize) -> usize {
        let start = self.start_with_dim(dim);
        let end = self.end_with_dim(dim);
        if start >= end {
            0
        } else {
            (end - start).div_ceil(self.step)
        }
    }

    /// Resolves the range against an axis of extent `dim`. An empty range
    /// starts at `0` so the data pointer is left where it was.
    pub fn resolve(&self, dim: usize) -> ResolvedSlice {
        let len = self.len_with_dim(dim);
        let start = if len == 0 { 0 } else { self.start_with_dim(dim) };
        ResolvedSlice {
            start,
            len,
            step: self.step,
        }
    }
}

impl fmt::Display for Slice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.start {
            Bound::Included(x) => write!(f, "{x}")?,
            Bound::Excluded(x) => write!(f, "{}", x + 1)?,
            Bound::Unbounded => {}
        }
        match self.end {
            Bound::Included(x) => write!(f, "..={x}")?,
            Bound::Excluded(x) => write!(f, "..{x}")?,
            Bound::Unbounded => write!(f, "..")?,
        }
        if self.step != 1 {
            write!(f, ";{}", self.step)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use core::{num::NonZeroUsize, ops::Bound};

    use super::{ResolvedSlice, Slice};

    fn step(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn new() {
        let s = Slice::from(2..5);

        assert_eq!(s.start, Bound::Included(2));
        assert_eq!(s.end, Bound::Excluded(5));
        assert_eq!(s.step, 1);

        let s = Slice::from(2..5).step_by(step(2));

        assert_eq!(s.step, 2);
        assert_eq!(Slice::new(Some(2), Some(5), Some(step(2))), s);
        assert_eq!(Slice::new(None, None, None), Slice::from(..));
        assert!(Slice::from(..).is_full());
    }

    #[test]
    fn len_with_range_from() {
        assert_eq!(Slice::from(0..).len_with_dim(10), 10);
        assert_eq!(Slice::from(5..).len_with_dim(10), 5);
        assert_eq!(Slice::from(10..).len_with_dim(10), 0);
        assert_eq!(Slice::from(11..).len_with_dim(10), 0);
        assert_eq!(Slice::from(1..).step_by(step(3)).len_with_dim(10), 3);
    }

    #[test]
    fn len_with_range() {
        assert_eq!(Slice::from(5..12).len_with_dim(10), 5);
        assert_eq!(Slice::from(0..5).len_with_dim(10), 5);
        assert_eq!(Slice::from(5..2).len_with_dim(10), 0);
        assert_eq!(Slice::from(2..10).step_by(step(3)).len_with_dim(10), 3);
        assert_eq!(Slice::from(2..9).step_by(step(3)).len_with_dim(10), 3);
        assert_eq!(Slice::from(2..8).step_by(step(3)).len_with_dim(10), 2);
    }

    #[test]
    fn len_with_range_full() {
        assert_eq!(Slice::from(..).len_with_dim(10), 10);
        assert_eq!(Slice::from(..).step_by(step(2)).len_with_dim(10), 5);
        assert_eq!(Slice::from(..).step_by(step(3)).len_with_dim(10), 4);
        assert_eq!(Slice::from(..).len_with_dim(0), 0);
    }

    #[test]
    fn len_with_range_to() {
        assert_eq!(Slice::from(..0).len_with_dim(10), 0);
        assert_eq!(Slice::from(..5).len_with_dim(10), 5);
        assert_eq!(Slice::from(..11).len_with_dim(10), 10);
        assert_eq!(Slice::from(..10).step_by(step(3)).len_with_dim(10), 4);
    }

    #[test]
    fn len_with_inclusive_ranges() {
        assert_eq!(Slice::from(..=0).len_with_dim(10), 1);
        assert_eq!(Slice::from(..=5).len_with_dim(10), 6);
        assert_eq!(Slice::from(..=10).len_with_dim(10), 10);
        assert_eq!(Slice::from(2..=3).len_with_dim(10), 2);
        assert_eq!(Slice::from(..=9).step_by(step(3)).len_with_dim(10), 4);
        assert_eq!(Slice::from(..=usize::MAX).len_with_dim(10), 10);
    }

    #[test]
    fn resolve_against_dim() {
        assert_eq!(
            Slice::from(3..).step_by(step(2)).resolve(10),
            ResolvedSlice {
                start: 3,
                len: 4,
                step: 2
            }
        );
        assert_eq!(
            Slice::from(7..3).resolve(10),
            ResolvedSlice {
                start: 0,
                len: 0,
                step: 1
            }
        );
    }

    #[test]
    fn display() {
        assert_eq!(Slice::from(..).to_string(), "..");
        assert_eq!(Slice::from(1..4).to_string(), "1..4");
        assert_eq!(Slice::from(..=4).step_by(step(2)).to_string(), "..=4;2");
    }
}
