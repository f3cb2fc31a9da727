//! Dense row-major `f32` matrix.
//!
//! A `Matrix` never changes after construction: every operation allocates and
//! returns a new one. Elementwise work goes through the fixed-width lane kernels;
//! products go through the blocked kernel in `matmul`.
//!
//! Operations that combine two matrices validate shapes and return
//! [`Error::ShapeMismatch`](crate::Error::ShapeMismatch). Scalar operations
//! cannot fail and are also available as operators on `&Matrix`.

use std::fmt;
use std::ops::{Add, Div, Index, Mul, Neg, Sub};

use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::ensure_shape;
use crate::lanes::{self, LANES};
use crate::{Activation, Error, Result, matmul};

#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    columns: usize,
    /// Row-major, `rows * columns` long.
    data: Vec<f32>,
}

impl Matrix {
    /// Zero-filled `rows x columns` matrix.
    pub fn new(rows: usize, columns: usize) -> Self {
        Self::filled(rows, columns, 0.0)
    }

    pub fn filled(rows: usize, columns: usize, value: f32) -> Self {
        Self {
            rows,
            columns,
            data: vec![value; rows * columns],
        }
    }

    /// Build from row-major `data`.
    ///
    /// Fails with `ShapeMismatch` unless `data.len() == rows * columns`.
    pub fn from_vec(rows: usize, columns: usize, data: Vec<f32>) -> Result<Self> {
        if data.len() != rows * columns {
            return Err(Error::ShapeMismatch(format!(
                "data length {} does not match {rows}x{columns} ({})",
                data.len(),
                rows * columns
            )));
        }
        Ok(Self {
            rows,
            columns,
            data,
        })
    }

    pub fn zeros(rows: usize, columns: usize) -> Self {
        Self::new(rows, columns)
    }

    pub fn ones(rows: usize, columns: usize) -> Self {
        Self::filled(rows, columns, 1.0)
    }

    pub fn identity(size: usize) -> Self {
        let mut data = vec![0.0; size * size];
        for i in 0..size {
            data[i * size + i] = 1.0;
        }
        Self {
            rows: size,
            columns: size,
            data,
        }
    }

    /// Uniform `[0, 1)` entries.
    ///
    /// `seed == 0` seeds from OS entropy; any other seed is reproducible.
    pub fn random(rows: usize, columns: usize, seed: u64) -> Self {
        let mut rng = if seed == 0 {
            StdRng::from_entropy()
        } else {
            StdRng::seed_from_u64(seed)
        };
        Self::random_with_rng(rows, columns, &mut rng)
    }

    pub fn random_with_rng<R: rand::Rng + ?Sized>(rows: usize, columns: usize, rng: &mut R) -> Self {
        let dist = Uniform::new(0.0_f32, 1.0_f32);
        let data = (0..rows * columns).map(|_| dist.sample(&mut *rng)).collect();
        Self {
            rows,
            columns,
            data,
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.columns)
    }

    #[inline]
    /// Number of elements (`rows * columns`).
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    /// Row-major view of the elements.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    #[inline]
    pub fn get(&self, row: usize, column: usize) -> Option<f32> {
        if row < self.rows && column < self.columns {
            Some(self.data[row * self.columns + column])
        } else {
            None
        }
    }

    #[inline]
    fn with_data(&self, data: Vec<f32>) -> Self {
        Self {
            rows: self.rows,
            columns: self.columns,
            data,
        }
    }

    fn map(&self, f: impl Fn(f32) -> f32) -> Self {
        self.with_data(lanes::map::<LANES>(&self.data, f))
    }

    fn zip(&self, right: &Matrix, op: &str, f: impl Fn(f32, f32) -> f32) -> Result<Self> {
        ensure_shape(self.shape() == right.shape(), || {
            format!(
                "{op}: {}x{} vs {}x{}",
                self.rows, self.columns, right.rows, right.columns
            )
        })?;
        Ok(self.with_data(lanes::zip::<LANES>(&self.data, &right.data, f)))
    }

    fn broadcast_col(&self, col: &Matrix, op: &str, f: impl Fn(f32, f32) -> f32) -> Result<Self> {
        ensure_shape(col.rows == self.rows && col.columns == 1, || {
            format!(
                "{op}: column vector must be {}x1, got {}x{}",
                self.rows, col.rows, col.columns
            )
        })?;
        Ok(self.with_data(lanes::broadcast_col::<LANES>(
            &self.data,
            &col.data,
            self.columns,
            f,
        )))
    }

    pub fn mul_scalar(&self, value: f32) -> Self {
        self.map(|v| v * value)
    }

    pub fn add_scalar(&self, value: f32) -> Self {
        self.map(|v| v + value)
    }

    pub fn sub_scalar(&self, value: f32) -> Self {
        self.map(|v| v - value)
    }

    /// `value - self`, elementwise.
    pub fn rsub_scalar(&self, value: f32) -> Self {
        self.map(|v| value - v)
    }

    pub fn div_scalar(&self, value: f32) -> Self {
        self.map(|v| v / value)
    }

    pub fn add_elements(&self, right: &Matrix) -> Result<Self> {
        self.zip(right, "add", |l, r| l + r)
    }

    pub fn sub_elements(&self, right: &Matrix) -> Result<Self> {
        self.zip(right, "subtract", |l, r| l - r)
    }

    /// Hadamard product.
    pub fn mul_elements(&self, right: &Matrix) -> Result<Self> {
        self.zip(right, "multiply elements", |l, r| l * r)
    }

    pub fn div_elements(&self, right: &Matrix) -> Result<Self> {
        self.zip(right, "divide", |l, r| l / r)
    }

    /// Adds `col[i, 0]` to every element of row `i`.
    pub fn add_col(&self, col: &Matrix) -> Result<Self> {
        self.broadcast_col(col, "add column", |v, c| v + c)
    }

    pub fn sub_col(&self, col: &Matrix) -> Result<Self> {
        self.broadcast_col(col, "subtract column", |v, c| v - c)
    }

    pub fn mul_col(&self, col: &Matrix) -> Result<Self> {
        self.broadcast_col(col, "multiply column", |v, c| v * c)
    }

    /// Matrix product `self * right`.
    ///
    /// Requires `self.columns() == right.rows()`; the result is
    /// `self.rows() x right.columns()`.
    pub fn matmul(&self, right: &Matrix) -> Result<Self> {
        ensure_shape(self.columns == right.rows, || {
            format!(
                "matmul: {}x{} * {}x{}",
                self.rows, self.columns, right.rows, right.columns
            )
        })?;

        let (n, m, p) = (self.rows, self.columns, right.columns);
        let mut data = vec![0.0_f32; n * p];
        matmul::gemm_f32(n, m, p, &self.data, &right.data, &mut data);
        Ok(Self {
            rows: n,
            columns: p,
            data,
        })
    }

    /// Row-wise contraction with transposed indexing on the right operand.
    ///
    /// For every row `i` of `self`, `result[0, i] = sum_j self[i, j] * right[j, i]`.
    /// The result is `1 x right.columns()`; entries past `self.rows()` stay zero.
    /// This is not a matrix product: for `[[1, 2], [3, 4]]` dotted with itself it
    /// yields `[7, 22]`.
    ///
    /// Requires `self.rows() == right.rows()`, and for the indexing to stay in
    /// range `self.rows() <= right.columns()` and `self.columns() <= right.rows()`.
    pub fn dot(&self, right: &Matrix) -> Result<Self> {
        ensure_shape(
            self.rows == right.rows
                && self.rows <= right.columns
                && self.columns <= right.rows,
            || {
                format!(
                    "dot: {}x{} with {}x{}",
                    self.rows, self.columns, right.rows, right.columns
                )
            },
        )?;

        let mut data = vec![0.0_f32; right.columns];
        for (i, out) in data.iter_mut().enumerate().take(self.rows) {
            let row = &self.data[i * self.columns..(i + 1) * self.columns];
            for (j, v) in row.iter().enumerate() {
                *out += v * right.data[j * right.columns + i];
            }
        }
        Ok(Self {
            rows: 1,
            columns: right.columns,
            data,
        })
    }

    pub fn square(&self) -> Self {
        self.map(|v| v * v)
    }

    pub fn transpose(&self) -> Self {
        let (r, c) = (self.rows, self.columns);
        let mut data = vec![0.0_f32; self.data.len()];
        for i in 0..r {
            for j in 0..c {
                data[j * r + i] = self.data[i * c + j];
            }
        }
        Self {
            rows: c,
            columns: r,
            data,
        }
    }

    /// Shorthand for [`Matrix::transpose`].
    #[inline]
    pub fn t(&self) -> Self {
        self.transpose()
    }

    /// Per-row sums as a `rows x 1` column vector.
    pub fn sum_columns(&self) -> Self {
        let data = if self.columns == 0 {
            vec![0.0; self.rows]
        } else {
            self.data
                .chunks_exact(self.columns)
                .map(lanes::sum::<LANES>)
                .collect()
        };
        Self {
            rows: self.rows,
            columns: 1,
            data,
        }
    }

    /// Sum of every element.
    pub fn sum(&self) -> f32 {
        lanes::sum::<LANES>(&self.data)
    }

    /// Applies `activation` elementwise using its lane path.
    pub fn activate(&self, activation: Activation) -> Self {
        self.map(|v| activation.activate_lane(v))
    }

    /// Applies the derivative of `activation` elementwise using its lane path.
    pub fn deactivate(&self, activation: Activation) -> Self {
        self.map(|v| activation.deactivate_lane(v))
    }

    /// True if the shapes match and every element differs by at most `tol`.
    pub fn approx_eq(&self, other: &Matrix, tol: f32) -> bool {
        self.shape() == other.shape()
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(a, b)| (a - b).abs() <= tol)
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f32;

    /// Panics if `row` or `column` is out of range.
    #[inline]
    fn index(&self, (row, column): (usize, usize)) -> &f32 {
        assert!(
            row < self.rows && column < self.columns,
            "index ({row}, {column}) out of range for {}x{} matrix",
            self.rows,
            self.columns
        );
        &self.data[row * self.columns + column]
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{{")?;
        for i in 0..self.rows {
            write!(f, "\t[ ")?;
            for j in 0..self.columns {
                write!(f, "{:6.2}", self.data[i * self.columns + j])?;
                if j + 1 != self.columns {
                    write!(f, ",")?;
                }
                write!(f, " ")?;
            }
            writeln!(f, "]")?;
        }
        writeln!(f, "}}")
    }
}

impl Mul<f32> for &Matrix {
    type Output = Matrix;

    fn mul(self, rhs: f32) -> Matrix {
        self.mul_scalar(rhs)
    }
}

impl Mul<&Matrix> for f32 {
    type Output = Matrix;

    fn mul(self, rhs: &Matrix) -> Matrix {
        rhs.mul_scalar(self)
    }
}

impl Add<f32> for &Matrix {
    type Output = Matrix;

    fn add(self, rhs: f32) -> Matrix {
        self.add_scalar(rhs)
    }
}

impl Add<&Matrix> for f32 {
    type Output = Matrix;

    fn add(self, rhs: &Matrix) -> Matrix {
        rhs.add_scalar(self)
    }
}

impl Sub<f32> for &Matrix {
    type Output = Matrix;

    fn sub(self, rhs: f32) -> Matrix {
        self.sub_scalar(rhs)
    }
}

impl Sub<&Matrix> for f32 {
    type Output = Matrix;

    fn sub(self, rhs: &Matrix) -> Matrix {
        rhs.rsub_scalar(self)
    }
}

impl Div<f32> for &Matrix {
    type Output = Matrix;

    fn div(self, rhs: f32) -> Matrix {
        self.div_scalar(rhs)
    }
}

impl Neg for &Matrix {
    type Output = Matrix;

    fn neg(self) -> Matrix {
        self.map(|v| -v)
    }
}
