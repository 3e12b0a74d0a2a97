use serde::{Serialize, Deserialize};
use tracing::debug;

use crate::activation::softmax::Stabilization;
use crate::error::Result;
use crate::loss::validate::check_reg;
use crate::loss::variant::LossVariant;
use crate::math::matrix::Matrix;

/// Settings a caller's optimizer loop hands to the loss on every step.
///
/// # Fields
/// - `variant`       — which implementation to run (`Naive` or `Vectorized`)
/// - `stabilization` — score conditioning before `exp`; defaults to `MaxShift`
/// - `reg`           — L2 regularization strength, finite and non-negative
///
/// Missing fields in a JSON file fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoftmaxConfig {
    pub variant: LossVariant,
    pub stabilization: Stabilization,
    pub reg: f64,
}

impl Default for SoftmaxConfig {
    fn default() -> Self {
        SoftmaxConfig {
            variant: LossVariant::Vectorized,
            stabilization: Stabilization::MaxShift,
            reg: 0.0,
        }
    }
}

impl SoftmaxConfig {
    pub fn new(variant: LossVariant, reg: f64) -> Self {
        SoftmaxConfig { variant, reg, ..SoftmaxConfig::default() }
    }

    /// Runs the configured loss on one batch.
    pub fn compute(&self, w: &Matrix, x: &Matrix, y: &[usize]) -> Result<(f64, Matrix)> {
        self.variant.compute(w, x, y, self.reg, self.stabilization)
    }

    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a `SoftmaxConfig` from a JSON file and validates `reg`.
    pub fn load_json(path: &str) -> Result<SoftmaxConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let config: SoftmaxConfig = serde_json::from_reader(reader)?;
        check_reg(config.reg)?;
        debug!(path, ?config, "loaded softmax config");
        Ok(config)
    }
}
