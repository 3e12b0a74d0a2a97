pub mod error;
pub mod math;
pub mod activation;
pub mod loss;
pub mod linear;
pub mod gradcheck;
pub mod optim;

// Convenience re-exports
pub use error::{Result, SoftmaxError};
pub use math::matrix::Matrix;
pub use activation::softmax::Stabilization;
pub use loss::{
    softmax_loss_naive, softmax_loss_naive_with,
    softmax_loss_vectorized, softmax_loss_vectorized_with,
    LossVariant, SoftmaxConfig,
};
pub use optim::sgd::Sgd;
