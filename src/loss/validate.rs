use crate::error::{Result, SoftmaxError};
use crate::math::matrix::Matrix;

/// Checks `W` (D×C), `X` (N×D), `y` (N) and `reg` before any arithmetic.
/// Returns `(n, d, c)` on success.
pub(crate) fn check_inputs(w: &Matrix, x: &Matrix, y: &[usize], reg: f64) -> Result<(usize, usize, usize)> {
    w.check_layout()?;
    x.check_layout()?;
    if x.cols != w.rows {
        return Err(SoftmaxError::ShapeMismatch {
            op: "softmax_loss",
            left: x.shape(),
            right: w.shape(),
        });
    }
    if y.len() != x.rows {
        return Err(SoftmaxError::LabelCountMismatch { expected: x.rows, actual: y.len() });
    }
    if x.rows == 0 {
        return Err(SoftmaxError::EmptyBatch);
    }
    check_reg(reg)?;

    let num_classes = w.cols;
    if let Some((index, &label)) = y.iter().enumerate().find(|(_, &l)| l >= num_classes) {
        return Err(SoftmaxError::LabelOutOfRange { index, label, num_classes });
    }

    Ok((x.rows, w.rows, num_classes))
}

pub(crate) fn check_reg(reg: f64) -> Result<()> {
    if !reg.is_finite() || reg < 0.0 {
        return Err(SoftmaxError::InvalidRegularization(reg));
    }
    Ok(())
}
