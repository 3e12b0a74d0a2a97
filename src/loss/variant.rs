use serde::{Serialize, Deserialize};

use crate::activation::softmax::Stabilization;
use crate::error::Result;
use crate::loss::softmax_naive::softmax_loss_naive_with;
use crate::loss::softmax_vectorized::softmax_loss_vectorized_with;
use crate::math::matrix::Matrix;

/// Selects which softmax loss implementation a caller runs.
///
/// - `Naive`      — per-example loop; the reference form.
/// - `Vectorized` — whole-batch matrix operations.
///
/// Both return the same loss and gradient up to floating-point rounding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossVariant {
    Naive,
    #[default]
    Vectorized,
}

impl LossVariant {
    pub fn compute(
        &self,
        w: &Matrix,
        x: &Matrix,
        y: &[usize],
        reg: f64,
        stabilization: Stabilization,
    ) -> Result<(f64, Matrix)> {
        match self {
            LossVariant::Naive      => softmax_loss_naive_with(w, x, y, reg, stabilization),
            LossVariant::Vectorized => softmax_loss_vectorized_with(w, x, y, reg, stabilization),
        }
    }
}
