use tracing::{debug, trace, warn};

use crate::activation::softmax::{softmax_rows_with_log_norm, Stabilization};
use crate::error::Result;
use crate::loss::validate::check_inputs;
use crate::math::matrix::Matrix;

/// Softmax loss and gradient over the whole batch at once.
///
/// Same contract as [`softmax_loss_naive`](crate::loss::softmax_naive::softmax_loss_naive):
/// the score matrix `F = X·W` is built in one product, normalised row-wise,
/// and back-propagated with a single `Xᵀ·G`. No input is modified.
pub fn softmax_loss_vectorized(w: &Matrix, x: &Matrix, y: &[usize], reg: f64) -> Result<(f64, Matrix)> {
    softmax_loss_vectorized_with(w, x, y, reg, Stabilization::MaxShift)
}

/// As [`softmax_loss_vectorized`], with explicit control over score stabilization.
pub fn softmax_loss_vectorized_with(
    w: &Matrix,
    x: &Matrix,
    y: &[usize],
    reg: f64,
    stabilization: Stabilization,
) -> Result<(f64, Matrix)> {
    let (n, d, c) = check_inputs(w, x, y, reg)?;
    debug!(n, d, c, reg, ?stabilization, "softmax loss (vectorized)");

    let scores = x.dot(w)?;
    let (p, log_norm) = softmax_rows_with_log_norm(&scores, stabilization)?;

    // -ln P[i, y[i]] = log_norm[i] - F[i, y[i]]
    let data_loss: f64 = log_norm.iter().zip(scores.gather(y)?).map(|(z, f)| z - f).sum();
    let loss = data_loss / n as f64 + 0.5 * reg * w.squared_sum();

    // dL/dF = P - onehot(y), averaged over the batch.
    let grad = p.scatter_add(y, -1.0)?.scale(1.0 / n as f64);
    let dw = x.transpose().dot(&grad)?.checked_add(&w.scale(reg))?;
    trace!(loss, grad_norm = dw.squared_sum().sqrt(), "vectorized pass done");

    if !loss.is_finite() {
        warn!(loss, ?stabilization, "softmax loss is not finite");
    }

    Ok((loss, dw))
}
