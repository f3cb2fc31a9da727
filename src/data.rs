//! Training data.
//!
//! The network works column-wise: features are rows and samples are columns.
//! `Dataset` pairs an input matrix `x` with a label matrix `y` and checks that
//! they describe the same samples.

use crate::{Error, Matrix, Result};

/// Inputs (X) and labels (Y) for supervised training.
///
/// - `x` has shape `(input_features, samples)`
/// - `y` has shape `(output_features, samples)`
#[derive(Debug, Clone)]
pub struct Dataset {
    x: Matrix,
    y: Matrix,
}

impl Dataset {
    pub fn new(x: Matrix, y: Matrix) -> Result<Self> {
        if x.columns() != y.columns() {
            return Err(Error::ShapeMismatch(format!(
                "x has {} samples (columns), y has {}",
                x.columns(),
                y.columns()
            )));
        }
        if x.columns() == 0 {
            return Err(Error::InvalidConfig(
                "dataset must contain at least one sample".to_owned(),
            ));
        }
        if x.rows() == 0 || y.rows() == 0 {
            return Err(Error::InvalidConfig(format!(
                "x and y need at least one feature row, got {} and {}",
                x.rows(),
                y.rows()
            )));
        }
        Ok(Self { x, y })
    }

    /// Build from flat row-major buffers.
    pub fn from_flat(
        x: Vec<f32>,
        y: Vec<f32>,
        input_features: usize,
        output_features: usize,
    ) -> Result<Self> {
        if input_features == 0 || output_features == 0 {
            return Err(Error::InvalidConfig(
                "feature counts must be > 0".to_owned(),
            ));
        }
        if !x.len().is_multiple_of(input_features) {
            return Err(Error::ShapeMismatch(format!(
                "x length {} is not divisible by input_features {input_features}",
                x.len()
            )));
        }
        let samples = x.len() / input_features;
        let x = Matrix::from_vec(input_features, samples, x)?;
        let y = Matrix::from_vec(output_features, samples, y)?;
        Self::new(x, y)
    }

    #[inline]
    pub fn x(&self) -> &Matrix {
        &self.x
    }

    #[inline]
    pub fn y(&self) -> &Matrix {
        &self.y
    }

    #[inline]
    /// Number of samples (columns).
    pub fn samples(&self) -> usize {
        self.x.columns()
    }

    #[inline]
    pub fn input_features(&self) -> usize {
        self.x.rows()
    }

    #[inline]
    pub fn output_features(&self) -> usize {
        self.y.rows()
    }
}
