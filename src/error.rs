use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Shape(#[from] ShapeError),
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ShapeError {
    #[error("expected a {expected}-dimensional array, but got {actual} dimensions")]
    IncompatibleDimension { expected: usize, actual: usize },
    #[error("shape {shape:?} with strides {strides:?} cannot be viewed as {to:?} without copying")]
    IncompatibleLayout {
        shape: Vec<usize>,
        strides: Vec<isize>,
        to: Vec<usize>,
    },
    #[error("cannot reshape array of length {len} into shape {to:?}")]
    IncompatibleShape { len: usize, to: Vec<usize> },
}

impl ShapeError {
    pub fn is_layout(&self) -> bool {
        matches!(self, Self::IncompatibleLayout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, ShapeError};

    #[test]
    fn display_shape_errors() {
        let e = ShapeError::IncompatibleShape {
            len: 12,
            to: vec![5, 2],
        };

        assert_eq!(e.to_string(), "cannot reshape array of length 12 into shape [5, 2]");
        assert!(!e.is_layout());

        let e = Error::from(ShapeError::IncompatibleDimension {
            expected: 2,
            actual: 3,
        });

        assert_eq!(
            e.to_string(),
            "expected a 2-dimensional array, but got 3 dimensions"
        );
    }
}
