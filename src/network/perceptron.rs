use std::path::Path;

use log::info;

use crate::codec;
use crate::error::{MlpError, Result};
use crate::network::config::NetworkConfig;
use crate::network::forward::ForwardEngine;
use crate::network::weights::WeightStore;
use crate::patterns::Pattern;
use crate::train::{BackpropTrainer, SweepStats, TrainConfig};

/// A fully connected sigmoid network together with its trainer.
#[derive(Debug, Clone)]
pub struct MultiLayerPerceptron {
    config: NetworkConfig,
    weights: WeightStore,
    trainer: BackpropTrainer,
}

impl MultiLayerPerceptron {
    /// Builds a network with deterministically initialized weights and the
    /// default learning rate.
    pub fn new(config: NetworkConfig) -> MultiLayerPerceptron {
        MultiLayerPerceptron::with_train_config(config, TrainConfig::default())
    }

    pub fn with_train_config(config: NetworkConfig, train_config: TrainConfig) -> MultiLayerPerceptron {
        let weights = WeightStore::new(&config);
        info!(
            "created network {:?} with learning rate {}",
            config.layer_sizes(),
            train_config.learning_rate
        );
        MultiLayerPerceptron {
            config,
            weights,
            trainer: BackpropTrainer::new(train_config),
        }
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn weights(&self) -> &WeightStore {
        &self.weights
    }

    /// One sweep of training over `patterns`, in order.
    pub fn teach(&mut self, patterns: &[Pattern]) -> Result<SweepStats> {
        self.trainer.train_on_all(&mut self.weights, patterns)
    }

    /// Output-layer activations for `x`.
    pub fn predict(&self, x: &[f64]) -> Result<Vec<f64>> {
        ForwardEngine::new(&self.weights).predict(x)
    }

    /// Writes the current weights in the binary weight format.
    pub fn write_weights<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        codec::write_file(path, &self.weights)
    }

    /// Replaces the current weights with those stored at `path`.
    ///
    /// The file must describe the same layer sizes as this network; otherwise
    /// the current weights are kept and a format error is returned.
    pub fn read_weights<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let store = codec::read_file(path)?;
        if store.layer_sizes() != self.config.layer_sizes() {
            return Err(MlpError::Format(format!(
                "weight file describes layers {:?}, network has {:?}",
                store.layer_sizes(),
                self.config.layer_sizes()
            )));
        }
        self.weights = store;
        Ok(())
    }

    /// Per-transition dump of every weight.
    pub fn weights_report(&self) -> String {
        self.weights.to_text()
    }
}
