use crate::ArrayIndex;

/// A sequence of per-axis selections, applied from axis 0 onwards.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct SliceInfo {
    pub indices: Vec<ArrayIndex>,
}

impl AsRef<[ArrayIndex]> for SliceInfo {
    fn as_ref(&self) -> &[ArrayIndex] {
        &self.indices
    }
}

impl From<Vec<ArrayIndex>> for SliceInfo {
    fn from(indices: Vec<ArrayIndex>) -> Self {
        Self { indices }
    }
}

impl From<&[ArrayIndex]> for SliceInfo {
    fn from(indices: &[ArrayIndex]) -> Self {
        Self::from(indices.to_vec())
    }
}

impl<const N: usize> From<[ArrayIndex; N]> for SliceInfo {
    fn from(indices: [ArrayIndex; N]) -> Self {
        Self::from(Vec::from(indices))
    }
}

/// Builds a [`SliceInfo`]. Each argument is an index or a range, optionally
/// followed by `;step`.
///
/// ```
/// use hagane::{s, Array, Order};
///
/// let a = Array::from_shape_vec(&[3, 4], (0..12).collect(), Order::RowMajor).unwrap();
/// let v = a.slice(s![1.., ..;2]);
///
/// assert_eq!(v.shape(), &[2, 2]);
/// assert_eq!(v.to_vec(), [4, 6, 8, 10]);
/// ```
#[macro_export]
macro_rules! s {
    (@fold [$( $idx:tt )*] $r:expr;$s:expr) => {
        $crate::SliceInfo::from(vec![$( $idx )* $crate::ArrayIndex::from(
            $crate::Slice::from($r).step_by(
                core::num::NonZeroUsize::new($s).expect("slice step cannot be zero")
            )
        )])
    };
    (@fold [$( $idx:tt )*] $r:expr) => {
        $crate::SliceInfo::from(vec![$( $idx )* $crate::ArrayIndex::from($r)])
    };
    (@fold [$( $idx:tt )*] $r:expr;$s:expr, $( $t:tt )*) => {
        $crate::s!(@fold
            [$( $idx )* $crate::ArrayIndex::from($crate::Slice::from($r).step_by(
                core::num::NonZeroUsize::new($s).expect("slice step cannot be zero")
            )),]
            $( $t )*
        )
    };
    (@fold [$( $idx:tt )*] $r:expr, $( $t:tt )*) => {
        $crate::s!(@fold
            [$( $idx )* $crate::ArrayIndex::from($r),]
            $( $t )*
        )
    };
    () => {
        $crate::SliceInfo::default()
    };
    ($( $t:tt )*) => {
        $crate::s!(@fold [] $( $t )*)
    };
}

#[cfg(test)]
mod tests {
    use core::num::NonZeroUsize;

    use super::SliceInfo;
    use crate::{ArrayIndex, Slice};

    #[test]
    fn from_vec() {
        let subject = SliceInfo::from(vec![Slice::from(..).into(), 1.into()]);

        assert!(subject.as_ref()[0].is_slice());
        assert!(subject.as_ref()[1].is_index());
        assert_eq!(subject.as_ref().len(), 2);
    }

    #[test]
    fn s_with_index() {
        let x = 1;
        let info = s!(x);

        assert_eq!(info.indices, [ArrayIndex::Index(1)]);
    }

    #[test]
    fn s_with_ranges() {
        let info = s!(2..3, 1.., ..2, 2..=3, ..=4, .., 2..7;2, 1..;3);

        assert_eq!(info.indices.len(), 8);
        assert_eq!(info.indices[0], ArrayIndex::Slice((2..3).into()));
        assert_eq!(info.indices[1], ArrayIndex::Slice((1..).into()));
        assert_eq!(info.indices[2], ArrayIndex::Slice((..2).into()));
        assert_eq!(info.indices[3], ArrayIndex::Slice((2..=3).into()));
        assert_eq!(info.indices[4], ArrayIndex::Slice((..=4).into()));
        assert_eq!(info.indices[5], ArrayIndex::Slice((..).into()));
        assert_eq!(
            info.indices[6],
            ArrayIndex::Slice(Slice::from(2..7).step_by(NonZeroUsize::new(2).unwrap()))
        );
        assert_eq!(
            info.indices[7],
            ArrayIndex::Slice(Slice::from(1..).step_by(NonZeroUsize::new(3).unwrap()))
        );
    }

    #[test]
    fn s_empty() {
        assert!(s![].indices.is_empty());
    }

    #[test]
    #[should_panic]
    fn s_with_invalid_range() {
        s!(2..10;0);
    }

    #[test]
    #[should_panic]
    fn s_with_invalid_ranges() {
        s!(2..10;0, 1..);
    }
}
