use rand::Rng;

use crate::error::{MlpError, Result};
use crate::math::{Lcg48, Matrix};
use crate::network::config::NetworkConfig;

/// One weight matrix per layer transition.
///
/// Matrix `t` connects layer `t` to layer `t + 1` and has shape
/// `(layer_sizes[t] + 1) x layer_sizes[t + 1]`. Row 0 holds the bias weights,
/// row `i` the weights leaving input neuron `i - 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightStore {
    layers: Vec<Matrix>,
}

impl WeightStore {
    /// Deterministic initialization.
    ///
    /// Every entry `(i, o)` is the first draw of a generator seeded with
    /// `(i - o) * 1000`, scaled to `[-2, 2)`. The value depends only on the
    /// position inside the matrix, so all transitions share the same pattern.
    pub fn new(config: &NetworkConfig) -> WeightStore {
        WeightStore::with_initializer(config, |i, o| {
            let seed = (i as i64 - o as i64) * 1000;
            4.0 * Lcg48::new(seed).next_double() - 2.0
        })
    }

    /// Same shapes as [`WeightStore::new`], entries drawn uniformly from
    /// `[-2, 2)` using the caller's generator.
    pub fn random<R: Rng + ?Sized>(config: &NetworkConfig, rng: &mut R) -> WeightStore {
        WeightStore::with_initializer(config, |_, _| 4.0 * rng.gen::<f64>() - 2.0)
    }

    fn with_initializer<F>(config: &NetworkConfig, mut init: F) -> WeightStore
    where
        F: FnMut(usize, usize) -> f64,
    {
        let layers = config
            .layer_sizes()
            .windows(2)
            .map(|pair| Matrix::from_fn(pair[0] + 1, pair[1], &mut init))
            .collect();
        WeightStore { layers }
    }

    /// Builds a store from raw matrices, checking that they form a chain:
    /// every matrix has at least a bias row and one column, and its column
    /// count equals the next matrix's number of input rows.
    pub fn from_matrices(layers: Vec<Matrix>) -> Result<WeightStore> {
        for (t, m) in layers.iter().enumerate() {
            if m.rows() == 0 || m.cols() == 0 {
                return Err(MlpError::Format(format!(
                    "transition {t} has an empty {}x{} weight matrix",
                    m.rows(),
                    m.cols()
                )));
            }
        }
        for (t, pair) in layers.windows(2).enumerate() {
            if pair[0].cols() + 1 != pair[1].rows() {
                return Err(MlpError::Format(format!(
                    "transition {t} has {} outputs but transition {} expects {} inputs",
                    pair[0].cols(),
                    t + 1,
                    pair[1].rows() - 1
                )));
            }
        }
        Ok(WeightStore { layers })
    }

    pub fn transitions(&self) -> usize {
        self.layers.len()
    }

    pub fn matrix(&self, transition: usize) -> Option<&Matrix> {
        self.layers.get(transition)
    }

    pub fn matrices(&self) -> &[Matrix] {
        &self.layers
    }

    /// Layer sizes implied by the matrix shapes; empty for an empty store.
    pub fn layer_sizes(&self) -> Vec<usize> {
        let mut sizes: Vec<usize> = self.layers.iter().map(|m| m.rows() - 1).collect();
        if let Some(last) = self.layers.last() {
            sizes.push(last.cols());
        }
        sizes
    }

    pub fn get(&self, transition: usize, input: usize, output: usize) -> Result<f64> {
        self.layers
            .get(transition)
            .and_then(|m| m.get(input, output))
            .ok_or(MlpError::IndexOutOfRange {
                transition,
                input,
                output,
            })
    }

    /// Adds `delta` to the weight at `(transition, input, output)`.
    pub fn apply_delta(
        &mut self,
        transition: usize,
        input: usize,
        output: usize,
        delta: f64,
    ) -> Result<()> {
        let weight = self
            .layers
            .get_mut(transition)
            .and_then(|m| m.get_mut(input, output))
            .ok_or(MlpError::IndexOutOfRange {
                transition,
                input,
                output,
            })?;
        *weight += delta;
        Ok(())
    }

    /// Human-readable dump of every transition, for diagnostics only.
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        for (t, m) in self.layers.iter().enumerate() {
            text.push_str(&format!("\nWeights from layer {} to {}:\n", t + 1, t + 2));
            text.push_str(&m.to_string());
            text.push('\n');
        }
        text
    }
}
