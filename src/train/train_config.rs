use crate::error::{MlpError, Result};

/// Learning rate used when none is configured.
pub const LEARNING_RATE: f64 = 0.35;

/// Hyperparameters for a [`BackpropTrainer`](crate::train::BackpropTrainer).
///
/// The learning rate is a fixed scalar for the whole run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainConfig {
    pub learning_rate: f64,
}

impl TrainConfig {
    pub fn new(learning_rate: f64) -> Result<Self> {
        if !learning_rate.is_finite() || learning_rate <= 0.0 {
            return Err(MlpError::Config(format!(
                "learning rate must be a positive finite number, got {learning_rate}"
            )));
        }
        Ok(TrainConfig { learning_rate })
    }
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            learning_rate: LEARNING_RATE,
        }
    }
}
