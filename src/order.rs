/// Storage order of a contiguous block.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Order {
    /// Last axis varies fastest.
    #[default]
    RowMajor,
    /// First axis varies fastest.
    ColumnMajor,
}

impl Order {
    /// Writes the contiguous strides of `shape` into `strides`, starting
    /// from `base_stride` at the fastest-varying axis. Zero extents count as
    /// one so they do not collapse the strides of their neighbours.
    pub fn convert_shape_to_strides(
        self,
        shape: &[usize],
        base_stride: isize,
        strides: &mut [isize],
    ) {
        debug_assert_eq!(shape.len(), strides.len());

        let pairs = strides.iter_mut().zip(shape.iter());
        let step = |acc: isize, (stride, &dim): (&mut isize, &usize)| {
            *stride = acc;
            acc * (dim as isize).max(1)
        };
        match self {
            Self::RowMajor => {
                pairs.rfold(base_stride, step);
            }
            Self::ColumnMajor => {
                pairs.fold(base_stride, step);
            }
        }
    }

    pub fn contiguous_strides(self, shape: &[usize]) -> Vec<isize> {
        let mut strides = vec![0; shape.len()];
        self.convert_shape_to_strides(shape, 1, &mut strides);
        strides
    }

    pub fn is_contiguous(self, shape: &[usize], strides: &[isize]) -> bool {
        if shape.len() != strides.len() {
            return false;
        }

        let mut expected = 1_isize;
        let mut check = |(&dim, &stride): (&usize, &isize)| {
            let ok = stride == expected;
            expected *= (dim as isize).max(1);
            ok
        };
        match self {
            Self::RowMajor => shape.iter().zip(strides).rev().all(&mut check),
            Self::ColumnMajor => shape.iter().zip(strides).all(&mut check),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::RowMajor => "row major",
            Self::ColumnMajor => "column major",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Order;

    #[test]
    fn check_whether_data_is_contiguous_with_c_order() {
        assert!(Order::RowMajor.is_contiguous(&[2, 3, 4], &[12, 4, 1]));
        assert!(!Order::RowMajor.is_contiguous(&[2, 3, 4], &[12, -4, 1]));
        assert!(!Order::RowMajor.is_contiguous(&[2, 3, 4], &[1, 2, 6]));
        assert!(Order::RowMajor.is_contiguous(&[], &[]));
    }

    #[test]
    fn check_whether_data_is_contiguous_with_f_order() {
        assert!(Order::ColumnMajor.is_contiguous(&[2, 3, 4], &[1, 2, 6]));
        assert!(!Order::ColumnMajor.is_contiguous(&[2, 3, 4], &[1, -2, 6]));
        assert!(!Order::ColumnMajor.is_contiguous(&[2, 3, 4], &[12, 4, 1]));
    }

    #[test]
    fn convert_shape_to_stride_with_c_order() {
        assert_eq!(Order::RowMajor.contiguous_strides(&[2, 3, 4]), [12, 4, 1]);
        assert_eq!(Order::RowMajor.contiguous_strides(&[2, 0, 4]), [4, 4, 1]);
    }

    #[test]
    fn convert_shape_to_stride_with_f_order() {
        assert_eq!(Order::ColumnMajor.contiguous_strides(&[2, 3, 4]), [1, 2, 6]);
        assert_eq!(Order::ColumnMajor.contiguous_strides(&[2, 0, 4]), [1, 2, 2]);
    }

    #[test]
    fn convert_shape_with_base_stride() {
        let mut strides = [0_isize; 2];
        Order::RowMajor.convert_shape_to_strides(&[3, 4], 2, &mut strides);

        assert_eq!(strides, [8, 2]);
    }

    #[test]
    fn default_order_is_row_major() {
        assert_eq!(Order::default(), Order::RowMajor);
        assert_eq!(Order::ColumnMajor.name(), "column major");
    }
}
