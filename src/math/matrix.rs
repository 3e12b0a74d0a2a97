use rand::Rng;
use serde::{Serialize, Deserialize};
use std::f64::consts::PI;

use crate::error::{Result, SoftmaxError};

/// Dense row-major matrix of `f64`.
///
/// Every method takes `&self` and returns a fresh matrix, so caller-owned
/// operands are never modified. Fields are public; `from_rows` is the
/// checked constructor, and `check_layout` verifies a hand-built value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix{
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>
}

impl Matrix{
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix{
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows]
        }
    }

    pub fn zeros_like(other: &Matrix) -> Matrix {
        Matrix::zeros(other.rows, other.cols)
    }

    /// Builds a matrix from row vectors. All rows must have the same length;
    /// an empty vector yields a 0×0 matrix.
    pub fn from_rows(data: Vec<Vec<f64>>) -> Result<Matrix> {
        let cols = data.first().map_or(0, Vec::len);
        if let Some((row, r)) = data.iter().enumerate().find(|(_, r)| r.len() != cols) {
            return Err(SoftmaxError::RaggedRows { row, expected: cols, actual: r.len() });
        }
        Ok(Matrix {
            rows: data.len(),
            cols,
            data
        })
    }

    /// Verifies that `data` really holds `rows` rows of `cols` entries.
    pub fn check_layout(&self) -> Result<()> {
        if self.data.len() != self.rows {
            return Err(SoftmaxError::ShapeMismatch {
                op: "layout",
                left: self.shape(),
                right: (self.data.len(), self.cols),
            });
        }
        if let Some((row, r)) = self.data.iter().enumerate().find(|(_, r)| r.len() != self.cols) {
            return Err(SoftmaxError::RaggedRows { row, expected: self.cols, actual: r.len() });
        }
        Ok(())
    }

    /// Uniform samples in [-1, 1).
    pub fn random_with<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Matrix {
        let mut res = Matrix::zeros(rows, cols);

        for i in 0..rows {
            for j in 0..cols {
                res.data[i][j] = rng.gen::<f64>() * 2.0 - 1.0;
            }

        }

        res
    }

    /// Samples a single value from N(0, 1) using the Box-Muller transform.
    fn sample_standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
        // Both uniforms in (0, 1] to avoid log(0).
        let u1: f64 = 1.0 - rng.gen::<f64>();
        let u2: f64 = 1.0 - rng.gen::<f64>();
        (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
    }

    /// Samples from N(0, std_dev²). A small `std_dev` (e.g. 1e-4) gives the
    /// usual starting point for a linear classifier's weights.
    pub fn gaussian_with<R: Rng + ?Sized>(rows: usize, cols: usize, std_dev: f64, rng: &mut R) -> Matrix {
        let mut res = Matrix::zeros(rows, cols);
        for i in 0..rows {
            for j in 0..cols {
                res.data[i][j] = Matrix::sample_standard_normal(rng) * std_dev;
            }
        }
        res
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i]
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i][j]
    }

    pub fn transpose(&self) -> Matrix {
        let mut res = Matrix::zeros(self.cols, self.rows);

        for i in 0..res.rows {
            for j in 0..res.cols {
                res.data[i][j] = self.data[j][i];
            }
        }

        res
    }

    pub fn map<F>(&self, functor: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data
                .iter()
                .map(|row| row.iter().map(|&x| functor(x)).collect())
                .collect(),
        }
    }

    pub fn scale(&self, k: f64) -> Matrix {
        self.map(|x| x * k)
    }

    pub fn sum(&self) -> f64 {
        self.data.iter().flatten().sum()
    }

    /// Sum of squared entries (squared Frobenius norm).
    pub fn squared_sum(&self) -> f64 {
        self.data.iter().flatten().map(|x| x * x).sum()
    }

    /// Matrix product `self · rhs`.
    pub fn dot(&self, rhs: &Matrix) -> Result<Matrix> {
        if self.cols != rhs.rows {
            return Err(self.mismatch("dot", rhs));
        }

        let mut res = Matrix::zeros(self.rows, rhs.cols);

        for i in 0..res.rows {
            for k in 0..self.cols {
                let a = self.data[i][k];
                for j in 0..res.cols {
                    res.data[i][j] += a * rhs.data[k][j];
                }
            }
        }

        Ok(res)
    }

    pub fn checked_add(&self, rhs: &Matrix) -> Result<Matrix> {
        self.zip_with(rhs, "add", |a, b| a + b)
    }

    pub fn checked_sub(&self, rhs: &Matrix) -> Result<Matrix> {
        self.zip_with(rhs, "sub", |a, b| a - b)
    }

    /// Per-row maximum. Rows with no columns give `-inf`.
    pub fn row_max(&self) -> Vec<f64> {
        self.data
            .iter()
            .map(|row| row.iter().copied().fold(f64::NEG_INFINITY, f64::max))
            .collect()
    }

    pub fn row_sums(&self) -> Vec<f64> {
        self.data.iter().map(|row| row.iter().sum()).collect()
    }

    /// Subtracts `v[i]` from every entry of row `i`.
    pub fn sub_row_vector(&self, v: &[f64]) -> Result<Matrix> {
        self.broadcast_rows(v, "sub_row_vector", |x, s| x - s)
    }

    /// Divides every entry of row `i` by `v[i]`.
    pub fn div_row_vector(&self, v: &[f64]) -> Result<Matrix> {
        self.broadcast_rows(v, "div_row_vector", |x, s| x / s)
    }

    /// Picks `self[i, labels[i]]` for every row.
    pub fn gather(&self, labels: &[usize]) -> Result<Vec<f64>> {
        self.check_labels(labels, "gather")?;
        Ok(self.data.iter().zip(labels).map(|(row, &l)| row[l]).collect())
    }

    /// Returns a copy with `delta` added at `self[i, labels[i]]` for every row.
    pub fn scatter_add(&self, labels: &[usize], delta: f64) -> Result<Matrix> {
        self.check_labels(labels, "scatter_add")?;
        let mut res = self.clone();
        for (row, &l) in res.data.iter_mut().zip(labels) {
            row[l] += delta;
        }
        Ok(res)
    }

    /// Largest absolute element-wise difference.
    pub fn max_abs_diff(&self, rhs: &Matrix) -> Result<f64> {
        let diff = self.checked_sub(rhs)?;
        Ok(diff.data.iter().flatten().fold(0.0, |m, x| m.max(x.abs())))
    }

    fn zip_with<F>(&self, rhs: &Matrix, op: &'static str, f: F) -> Result<Matrix>
    where
        F: Fn(f64, f64) -> f64,
    {
        if self.shape() != rhs.shape() {
            return Err(self.mismatch(op, rhs));
        }
        let data = self.data.iter().zip(rhs.data.iter())
            .map(|(row_a, row_b)| {
                row_a.iter().zip(row_b.iter()).map(|(&a, &b)| f(a, b)).collect()
            })
            .collect();
        Ok(Matrix { rows: self.rows, cols: self.cols, data })
    }

    fn broadcast_rows<F>(&self, v: &[f64], op: &'static str, f: F) -> Result<Matrix>
    where
        F: Fn(f64, f64) -> f64,
    {
        if v.len() != self.rows {
            return Err(SoftmaxError::ShapeMismatch {
                op,
                left: self.shape(),
                right: (v.len(), 1),
            });
        }
        let data = self.data.iter().zip(v)
            .map(|(row, &s)| row.iter().map(|&x| f(x, s)).collect())
            .collect();
        Ok(Matrix { rows: self.rows, cols: self.cols, data })
    }

    fn check_labels(&self, labels: &[usize], op: &'static str) -> Result<()> {
        if labels.len() != self.rows {
            return Err(SoftmaxError::ShapeMismatch {
                op,
                left: self.shape(),
                right: (labels.len(), 1),
            });
        }
        if let Some((index, &label)) = labels.iter().enumerate().find(|(_, &l)| l >= self.cols) {
            return Err(SoftmaxError::LabelOutOfRange { index, label, num_classes: self.cols });
        }
        Ok(())
    }

    fn mismatch(&self, op: &'static str, rhs: &Matrix) -> SoftmaxError {
        SoftmaxError::ShapeMismatch { op, left: self.shape(), right: rhs.shape() }
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix { rows: 0, cols: 0, data: vec![] }
    }
}
