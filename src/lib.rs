//! Strided multi-dimensional arrays over shared buffers.
//!
//! An [`Array`] is a shape, a set of strides and a pointer into a buffer
//! that other arrays may share. Slicing, transposing and most reshapes
//! produce views without copying. Copies between arrays stay correct when
//! their memory overlaps.

mod array;
pub use array::{Array, Iter, Scalar};

mod array_index;
pub use array_index::ArrayIndex;

mod error;
pub use error::{Error, Result, ShapeError};

mod order;
pub use order::Order;

pub mod shape;

mod slice;
pub use slice::Slice;

mod slice_info;
pub use slice_info::SliceInfo;

pub mod storage;

mod typed;
pub use typed::{Matrix, Vector};

mod view;
pub use view::View;
