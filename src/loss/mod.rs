pub mod softmax_naive;
pub mod softmax_vectorized;
pub mod variant;
pub mod config;
pub(crate) mod validate;

pub use softmax_naive::{softmax_loss_naive, softmax_loss_naive_with};
pub use softmax_vectorized::{softmax_loss_vectorized, softmax_loss_vectorized_with};
pub use variant::LossVariant;
pub use config::SoftmaxConfig;
