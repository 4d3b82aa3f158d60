pub mod config;
pub mod forward;
pub mod perceptron;
pub mod weights;

pub use config::{NetworkConfig, MAX_LAYERS, MAX_NEURONS};
pub use forward::ForwardEngine;
pub use perceptron::MultiLayerPerceptron;
pub use weights::WeightStore;
