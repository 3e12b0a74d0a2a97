use tracing::{debug, trace, warn};

use crate::activation::softmax::{softmax_with_log_norm, Stabilization};
use crate::error::Result;
use crate::loss::validate::check_inputs;
use crate::math::matrix::Matrix;

/// Softmax loss and gradient, computed one example at a time.
///
/// `w` is D×C, `x` is N×D, `y` holds N labels in `[0, C)`. Returns the mean
/// cross-entropy plus `0.5 * reg * sum(W²)`, and `dW` shaped like `w`.
/// Scores are max-shifted before exponentiation.
pub fn softmax_loss_naive(w: &Matrix, x: &Matrix, y: &[usize], reg: f64) -> Result<(f64, Matrix)> {
    softmax_loss_naive_with(w, x, y, reg, Stabilization::MaxShift)
}

/// As [`softmax_loss_naive`], with explicit control over score stabilization.
pub fn softmax_loss_naive_with(
    w: &Matrix,
    x: &Matrix,
    y: &[usize],
    reg: f64,
    stabilization: Stabilization,
) -> Result<(f64, Matrix)> {
    let (n, d, c) = check_inputs(w, x, y, reg)?;
    debug!(n, d, c, reg, ?stabilization, "softmax loss (naive)");

    let mut loss = 0.0;
    // Per-example gradient w.r.t. the scores, one row per example.
    let mut grad = Matrix::zeros(n, c);

    for i in 0..n {
        let xi = x.row(i);
        let mut scores = vec![0.0; c];
        for (k, &xik) in xi.iter().enumerate() {
            for (j, s) in scores.iter_mut().enumerate() {
                *s += xik * w.data[k][j];
            }
        }

        let (p, log_norm) = softmax_with_log_norm(&scores, stabilization);
        // -ln p[y] without going through p, which may underflow.
        loss += log_norm - scores[y[i]];

        grad.data[i].copy_from_slice(&p);
        grad.data[i][y[i]] -= 1.0;
    }

    loss = loss / n as f64 + 0.5 * reg * w.squared_sum();

    let grad = grad.scale(1.0 / n as f64);
    let dw = x.transpose().dot(&grad)?.checked_add(&w.scale(reg))?;
    trace!(loss, grad_norm = dw.squared_sum().sqrt(), "naive pass done");

    if !loss.is_finite() {
        warn!(loss, ?stabilization, "softmax loss is not finite");
    }

    Ok((loss, dw))
}
