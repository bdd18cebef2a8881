use core::fmt::Debug;

use num_complex::Complex;
use num_traits::Num;

/// Element types an [`Array`](crate::Array) can hold.
pub trait Scalar: Copy + Debug + Num + 'static {}

macro_rules! impl_scalar {
    ($( $t:ty ),*) => {
        $( impl Scalar for $t {} )*
    };
}

impl_scalar!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);
impl_scalar!(Complex<f32>, Complex<f64>);
