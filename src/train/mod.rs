pub mod backprop;
pub mod sweep_stats;
pub mod train_config;

pub use backprop::BackpropTrainer;
pub use sweep_stats::SweepStats;
pub use train_config::{TrainConfig, LEARNING_RATE};
