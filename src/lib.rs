pub mod activation;
pub mod data;
pub mod error;
pub mod loss;
pub mod math;
pub mod network;
pub mod optim;
pub mod train;

// Convenience re-exports
pub use activation::{sigmoid, sigmoid_derivative};
pub use data::Dataset;
pub use error::{Error, Result};
pub use loss::BceLoss;
pub use math::Matrix;
pub use network::{ForwardCache, Gradients, Network, Parameters, Phase};
pub use optim::Sgd;
pub use train::{evaluate, train_epoch, train_loop, EpochStats, TrainConfig};
