use serde::{Serialize, Deserialize};

use crate::error::Result;
use crate::math::matrix::Matrix;

/// How scores are conditioned before exponentiation.
///
/// - `MaxShift` — subtract the largest score of each row first. The shift
///   cancels in the normalisation, so probabilities are unchanged, but
///   `exp` never sees a positive argument and cannot overflow. Losses are
///   taken from the log-normaliser rather than `ln(p)`, so a vanishing
///   true-class probability still gives a finite loss.
/// - `None`     — exponentiate raw scores. Scores above ~709 overflow to
///   `inf` and the resulting probabilities become `NaN`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stabilization {
    #[default]
    MaxShift,
    None,
}

/// Softmax of a single score vector.
pub fn softmax(scores: &[f64], stabilization: Stabilization) -> Vec<f64> {
    softmax_with_log_norm(scores, stabilization).0
}

/// Softmax of a single score vector together with `ln(Σ exp(scores))`.
///
/// The cross-entropy for class `k` is `log_norm - scores[k]`, which stays
/// finite even when `p[k]` underflows to zero.
pub fn softmax_with_log_norm(scores: &[f64], stabilization: Stabilization) -> (Vec<f64>, f64) {
    let shift = match stabilization {
        Stabilization::MaxShift => scores.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        Stabilization::None => 0.0,
    };
    let exp: Vec<f64> = scores.iter().map(|s| (s - shift).exp()).collect();
    let total: f64 = exp.iter().sum();
    let probs = exp.into_iter().map(|e| e / total).collect();
    (probs, total.ln() + shift)
}

/// Row-wise softmax of a score matrix, computed with whole-matrix operations.
pub fn softmax_rows(scores: &Matrix, stabilization: Stabilization) -> Result<Matrix> {
    Ok(softmax_rows_with_log_norm(scores, stabilization)?.0)
}

/// Row-wise softmax plus the per-row log-normaliser `ln(Σ_j exp(F[i, j]))`.
pub fn softmax_rows_with_log_norm(scores: &Matrix, stabilization: Stabilization) -> Result<(Matrix, Vec<f64>)> {
    let shift = match stabilization {
        Stabilization::MaxShift => scores.row_max(),
        Stabilization::None => vec![0.0; scores.rows],
    };
    let exp = scores.sub_row_vector(&shift)?.map(f64::exp);
    let sums = exp.row_sums();
    let probs = exp.div_row_vector(&sums)?;
    let log_norm = sums.iter().zip(&shift).map(|(s, m)| s.ln() + m).collect();
    Ok((probs, log_norm))
}
