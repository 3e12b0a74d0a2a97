use crate::error::{Result, SoftmaxError};
use crate::math::matrix::Matrix;

/// Class scores `X·W`, shape (N, C).
pub fn scores(w: &Matrix, x: &Matrix) -> Result<Matrix> {
    x.dot(w)
}

/// Highest-scoring class for every example.
pub fn predict(w: &Matrix, x: &Matrix) -> Result<Vec<usize>> {
    Ok(scores(w, x)?.data.iter().map(|row| argmax(row)).collect())
}

/// Fraction of predictions equal to their label. Zero for an empty batch.
pub fn accuracy(predicted: &[usize], labels: &[usize]) -> Result<f64> {
    if predicted.len() != labels.len() {
        return Err(SoftmaxError::LabelCountMismatch { expected: predicted.len(), actual: labels.len() });
    }
    if predicted.is_empty() {
        return Ok(0.0);
    }
    let correct = predicted.iter().zip(labels).filter(|(p, l)| p == l).count();
    Ok(correct as f64 / predicted.len() as f64)
}

/// Index of the maximum element in a slice.
fn argmax(v: &[f64]) -> usize {
    v.iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
        .unwrap_or(0)
}
