use std::time::Instant;

use log::{debug, info};

use crate::activation::Sigmoid;
use crate::error::{MlpError, Result};
use crate::loss::SquaredError;
use crate::network::forward::ForwardEngine;
use crate::network::weights::WeightStore;
use crate::patterns::Pattern;
use crate::train::sweep_stats::SweepStats;
use crate::train::train_config::TrainConfig;

/// Online gradient-descent trainer: one weight update per pattern.
#[derive(Debug, Clone, Default)]
pub struct BackpropTrainer {
    config: TrainConfig,
}

impl BackpropTrainer {
    pub fn new(config: TrainConfig) -> BackpropTrainer {
        BackpropTrainer { config }
    }

    pub fn config(&self) -> &TrainConfig {
        &self.config
    }

    /// Trains `weights` on a single pattern and returns the pattern's squared
    /// error as measured before the update.
    ///
    /// The forward pass stores every layer's activations; the backward pass
    /// then walks the transitions from the output down. For each transition
    /// the deltas of the layer below are computed first (with the weights as
    /// they were before this step), then the transition's weights are moved.
    pub fn train(&self, weights: &mut WeightStore, pattern: &Pattern) -> Result<f64> {
        let outputs = ForwardEngine::new(weights).forward(&pattern.x)?;
        let predicted = &outputs[outputs.len() - 1];
        if predicted.len() != pattern.y.len() {
            return Err(MlpError::Format(format!(
                "pattern has {} targets but the network has {} outputs",
                pattern.y.len(),
                predicted.len()
            )));
        }

        let error = SquaredError::loss(predicted, &pattern.y);
        let mut deltas = output_deltas(predicted, &pattern.y);

        for t in (0..weights.transitions()).rev() {
            let lower = if t > 0 {
                hidden_deltas(weights, t, &outputs[t], &deltas)?
            } else {
                Vec::new()
            };
            update_transition(weights, t, &outputs[t], &deltas, self.config.learning_rate)?;
            deltas = lower;
        }

        debug!("trained pattern, error before update = {error:.6}");
        Ok(error)
    }

    /// One sweep: `train` on every pattern, in order.
    pub fn train_on_all(&self, weights: &mut WeightStore, patterns: &[Pattern]) -> Result<SweepStats> {
        let t_start = Instant::now();
        let mut total_error = 0.0;

        for pattern in patterns {
            total_error += self.train(weights, pattern)?;
        }

        let mean_error = if patterns.is_empty() {
            0.0
        } else {
            total_error / patterns.len() as f64
        };
        let stats = SweepStats {
            patterns: patterns.len(),
            total_error,
            mean_error,
            elapsed_ms: t_start.elapsed().as_millis() as u64,
        };
        info!(
            "sweep over {} patterns: total error {:.6}, mean {:.6}",
            stats.patterns, stats.total_error, stats.mean_error
        );
        Ok(stats)
    }
}

/// Output-layer deltas: `(target - o) * o * (1 - o)`.
pub fn output_deltas(outputs: &[f64], targets: &[f64]) -> Vec<f64> {
    SquaredError::residuals(outputs, targets)
        .into_iter()
        .zip(outputs.iter())
        .map(|(residual, &o)| residual * Sigmoid::derivative(o))
        .collect()
}

/// Deltas of layer `transition` from the deltas of the layer above it:
/// `o[i] * (1 - o[i]) * sum(w(transition, i + 1, k) * next[k])`.
///
/// The sum starts at `k = 1`; the first neuron of the layer above does not
/// contribute.
pub fn hidden_deltas(
    weights: &WeightStore,
    transition: usize,
    outputs: &[f64],
    next_deltas: &[f64],
) -> Result<Vec<f64>> {
    outputs
        .iter()
        .enumerate()
        .map(|(i, &o)| -> Result<f64> {
            let mut sum = 0.0;
            for (k, delta) in next_deltas.iter().enumerate().skip(1) {
                sum += weights.get(transition, i + 1, k)? * delta;
            }
            Ok(sum * Sigmoid::derivative(o))
        })
        .collect()
}

/// Moves every weight of `transition` by `learning_rate * delta[o] * input[i]`,
/// with a constant input of 1 for the bias row.
pub fn update_transition(
    weights: &mut WeightStore,
    transition: usize,
    inputs: &[f64],
    deltas: &[f64],
    learning_rate: f64,
) -> Result<()> {
    for (o, delta) in deltas.iter().enumerate() {
        let step = learning_rate * delta;
        weights.apply_delta(transition, 0, o, step)?;
        for (i, x) in inputs.iter().enumerate() {
            weights.apply_delta(transition, i + 1, o, step * x)?;
        }
    }
    Ok(())
}
