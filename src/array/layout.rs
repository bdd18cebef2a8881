use super::Array;
use crate::Order;

impl<T> Array<T> {
    pub fn is_row_major_contiguous(&self) -> bool {
        Order::RowMajor.is_contiguous(&self.shape, &self.strides)
    }

    pub fn is_column_major_contiguous(&self) -> bool {
        Order::ColumnMajor.is_contiguous(&self.shape, &self.strides)
    }

    pub fn is_contiguous(&self) -> bool {
        self.is_row_major_contiguous() || self.is_column_major_contiguous()
    }

    /// The order the strides are contiguous in. Row major wins when both
    /// apply, as for one-dimensional arrays.
    pub fn contiguous_order(&self) -> Option<Order> {
        if self.is_row_major_contiguous() {
            Some(Order::RowMajor)
        } else if self.is_column_major_contiguous() {
            Some(Order::ColumnMajor)
        } else {
            None
        }
    }

    /// Whether both arrays are contiguous in a common order.
    pub(crate) fn is_contiguous_like<U>(&self, other: &Array<U>) -> bool {
        (self.is_row_major_contiguous() && other.is_row_major_contiguous())
            || (self.is_column_major_contiguous() && other.is_column_major_contiguous())
    }

    /// Conservative aliasing test: true if either array's first element lies
    /// inside the other's reachable range.
    pub fn overlaps(&self, other: &Array<T>) -> bool {
        let (a, b) = (self.as_ptr(), other.as_ptr());
        let a_end = a.wrapping_add(self.data_len());
        let b_end = b.wrapping_add(other.data_len());
        (a <= b && b < a_end) || (b <= a && a < b_end)
    }
}

#[cfg(test)]
mod tests {
    use crate::{s, shape, Array, Order};

    #[test]
    fn fresh_arrays_are_contiguous() {
        for shape in [vec![], vec![4], vec![2, 3], vec![2, 0, 4], vec![3, 1, 2, 5]] {
            for order in [Order::RowMajor, Order::ColumnMajor] {
                let a = Array::<f32>::zeros(&shape, order);

                assert_eq!(a.strides(), shape::contiguous_strides(&shape, order));
                assert!(a.is_contiguous(), "{:?} {:?}", shape, order);
            }
        }
    }

    #[test]
    fn classify_layouts() {
        let a = Array::<f32>::zeros(&[2, 3], Order::RowMajor);

        assert!(a.is_row_major_contiguous());
        assert!(!a.is_column_major_contiguous());
        assert_eq!(a.contiguous_order(), Some(Order::RowMajor));

        let t = a.transpose();

        assert_eq!(t.contiguous_order(), Some(Order::ColumnMajor));

        let s = a.slice(s![.., 1..]);

        assert!(!s.is_contiguous());
        assert_eq!(s.contiguous_order(), None);

        let row = a.slice(s![1..2, ..]);

        assert!(row.is_row_major_contiguous());
    }

    #[test]
    fn one_dimensional_arrays_are_contiguous_in_both_orders() {
        let a = Array::range(0, 5);

        assert!(a.is_row_major_contiguous());
        assert!(a.is_column_major_contiguous());
        assert!(a.is_contiguous_like(&Array::range(0, 5)));
        assert!(!a.slice(s![..;2]).is_contiguous());
    }

    #[test]
    fn overlapping_views() {
        let a = Array::range(0, 11);
        let b = a.slice(s![..=5]);
        let c = a.slice(s![5..]);

        assert!(a.overlaps(&b));
        assert!(b.overlaps(&c));
        assert!(c.overlaps(&b));
        assert!(a.overlaps(&c));
    }

    #[test]
    fn disjoint_views() {
        let a = Array::range(0, 10);
        let b = a.slice(s![..5]);
        let c = a.slice(s![5..]);

        assert!(!b.overlaps(&c));
        assert!(!a.overlaps(&Array::range(0, 10)));
    }
}
