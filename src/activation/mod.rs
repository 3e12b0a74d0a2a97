pub mod softmax;

pub use softmax::{
    softmax, softmax_rows, softmax_rows_with_log_norm, softmax_with_log_norm, Stabilization,
};
