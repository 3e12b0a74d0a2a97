use crate::error::{Result, SoftmaxError};
use crate::math::matrix::Matrix;

/// Plain gradient descent on a weight matrix: `W -= learning_rate * dW`.
pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate }
    }

    /// Applies one update to `w` given the gradient returned by a loss call.
    pub fn step(&self, w: &mut Matrix, dw: &Matrix) -> Result<()> {
        if w.shape() != dw.shape() {
            return Err(SoftmaxError::ShapeMismatch { op: "sgd_step", left: w.shape(), right: dw.shape() });
        }
        for (row_w, row_g) in w.data.iter_mut().zip(&dw.data) {
            for (wij, gij) in row_w.iter_mut().zip(row_g) {
                *wij -= self.learning_rate * gij;
            }
        }
        Ok(())
    }
}
