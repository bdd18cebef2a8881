//! One- and two-dimensional wrappers that check their dimensionality once,
//! at construction.

use core::{
    convert::TryFrom,
    fmt,
    ops::{Deref, DerefMut},
};

use crate::{Array, ArrayIndex, Scalar, ShapeError};

fn check_ndims<T>(a: &Array<T>, expected: usize) -> Result<(), ShapeError> {
    if a.ndims() == expected {
        Ok(())
    } else {
        Err(ShapeError::IncompatibleDimension {
            expected,
            actual: a.ndims(),
        })
    }
}

macro_rules! impl_typed {
    ($name:ident, $ndims:expr) => {
        impl<T> $name<T> {
            /// Wraps a view of `donor` and takes over its ownership of the
            /// buffer. `donor` stays usable as a borrowing view.
            ///
            /// # Panics
            ///
            /// Panics if `donor` does not own its data.
            pub fn adopt(donor: &mut Array<T>) -> Result<Self, ShapeError> {
                check_ndims(donor, $ndims)?;
                let mut array = Array::view_of(donor);
                array.steal(donor);
                Ok(Self(array))
            }

            pub fn into_array(self) -> Array<T> {
                self.0
            }
        }

        impl<T> TryFrom<Array<T>> for $name<T> {
            type Error = ShapeError;

            fn try_from(array: Array<T>) -> Result<Self, Self::Error> {
                check_ndims(&array, $ndims)?;
                Ok(Self(array))
            }
        }

        impl<T> Deref for $name<T> {
            type Target = Array<T>;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl<T> DerefMut for $name<T> {
            fn deref_mut(&mut self) -> &mut Self::Target {
                &mut self.0
            }
        }

        impl<T> fmt::Debug for $name<T>
        where
            T: Copy + fmt::Debug,
        {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.0).finish()
            }
        }
    };
}

/// A one-dimensional [`Array`].
pub struct Vector<T>(Array<T>);

/// A two-dimensional [`Array`].
pub struct Matrix<T>(Array<T>);

impl_typed!(Vector, 1);
impl_typed!(Matrix, 2);

impl<T> Vector<T>
where
    T: Scalar,
{
    pub fn get(&self, index: usize) -> T {
        self.0.get(&[index])
    }

    pub fn set(&mut self, index: usize, value: T) {
        self.0.set(&[index], value);
    }
}

impl<T> Matrix<T> {
    pub fn rows(&self) -> usize {
        self.0.shape()[0]
    }

    pub fn cols(&self) -> usize {
        self.0.shape()[1]
    }

    pub fn is_square(&self) -> bool {
        self.rows() == self.cols()
    }

    /// Borrowing view of row `i`.
    pub fn row(&self, i: usize) -> Vector<T> {
        Vector(self.0.slice([ArrayIndex::Index(i)]))
    }

    /// Borrowing view of column `j`.
    pub fn column(&self, j: usize) -> Vector<T> {
        Vector(self.0.slice([ArrayIndex::from(..), ArrayIndex::Index(j)]))
    }

    pub fn transpose(&self) -> Matrix<T> {
        Matrix(self.0.transpose())
    }
}

impl<T> Matrix<T>
where
    T: Scalar,
{
    pub fn get(&self, i: usize, j: usize) -> T {
        self.0.get(&[i, j])
    }

    pub fn set(&mut self, i: usize, j: usize, value: T) {
        self.0.set(&[i, j], value);
    }
}
