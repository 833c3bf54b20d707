pub mod cache;
pub mod network;
pub mod parameters;

pub use cache::{ForwardCache, Gradients};
pub use network::{Network, Phase, DEFAULT_LEARNING_RATE};
pub use parameters::{Parameters, INIT_SCALE, LAYER_SIZES};
