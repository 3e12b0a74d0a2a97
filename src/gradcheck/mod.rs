//! Finite-difference checks for analytic weight gradients.

use rand::Rng;
use tracing::debug;

use crate::error::{Result, SoftmaxError};
use crate::math::matrix::Matrix;

/// One sampled entry of a sparse gradient check.
#[derive(Debug, Clone, PartialEq)]
pub struct GradCheckSample {
    pub row: usize,
    pub col: usize,
    pub numerical: f64,
    pub analytic: f64,
    pub relative_error: f64,
}

/// `|a - b| / (|a| + |b|)`, with the denominator floored to avoid 0/0 when
/// both gradients vanish.
pub fn relative_error(a: f64, b: f64) -> f64 {
    (a - b).abs() / (a.abs() + b.abs()).max(1e-12)
}

/// Centered-difference gradient of `f` at `w` for every entry.
///
/// `f` is evaluated on a private copy of `w`; the caller's matrix is never
/// perturbed.
pub fn numerical_gradient<F>(mut f: F, w: &Matrix, h: f64) -> Result<Matrix>
where
    F: FnMut(&Matrix) -> Result<f64>,
{
    let mut probe = w.clone();
    let mut grad = Matrix::zeros_like(w);
    for i in 0..w.rows {
        for j in 0..w.cols {
            grad.data[i][j] = central_difference(&mut f, &mut probe, i, j, h)?;
        }
    }
    Ok(grad)
}

/// Compares `analytic` against centered differences at `num_checks` randomly
/// chosen entries of `w`.
pub fn grad_check_sparse<F, R>(
    mut f: F,
    w: &Matrix,
    analytic: &Matrix,
    num_checks: usize,
    h: f64,
    rng: &mut R,
) -> Result<Vec<GradCheckSample>>
where
    F: FnMut(&Matrix) -> Result<f64>,
    R: Rng + ?Sized,
{
    if analytic.shape() != w.shape() {
        return Err(SoftmaxError::ShapeMismatch {
            op: "grad_check_sparse",
            left: w.shape(),
            right: analytic.shape(),
        });
    }
    if w.rows == 0 || w.cols == 0 {
        return Ok(Vec::new());
    }

    let mut probe = w.clone();
    let mut samples = Vec::with_capacity(num_checks);
    for _ in 0..num_checks {
        let row = rng.gen_range(0..w.rows);
        let col = rng.gen_range(0..w.cols);
        let numerical = central_difference(&mut f, &mut probe, row, col, h)?;
        let analytic = analytic.data[row][col];
        let sample = GradCheckSample {
            row,
            col,
            numerical,
            analytic,
            relative_error: relative_error(numerical, analytic),
        };
        debug!(row, col, numerical, analytic, rel = sample.relative_error, "grad check");
        samples.push(sample);
    }
    Ok(samples)
}

fn central_difference<F>(f: &mut F, probe: &mut Matrix, i: usize, j: usize, h: f64) -> Result<f64>
where
    F: FnMut(&Matrix) -> Result<f64>,
{
    let old = probe.data[i][j];
    probe.data[i][j] = old + h;
    let plus = f(&*probe);
    probe.data[i][j] = old - h;
    let minus = f(&*probe);
    probe.data[i][j] = old;
    Ok((plus? - minus?) / (2.0 * h))
}
