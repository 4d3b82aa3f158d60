pub mod activation;
pub mod codec;
pub mod config;
pub mod error;
pub mod loss;
pub mod math;
pub mod network;
pub mod patterns;
pub mod train;

// Convenience re-exports
pub use activation::Sigmoid;
pub use config::RunConfig;
pub use error::{MlpError, Result};
pub use math::{Lcg48, Matrix};
pub use network::{ForwardEngine, MultiLayerPerceptron, NetworkConfig, WeightStore};
pub use patterns::Pattern;
pub use train::{BackpropTrainer, SweepStats, TrainConfig};
