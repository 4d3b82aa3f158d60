use crate::activation::Sigmoid;
use crate::error::{MlpError, Result};
use crate::network::weights::WeightStore;

/// Read-only forward pass over a [`WeightStore`].
pub struct ForwardEngine<'a> {
    weights: &'a WeightStore,
}

impl<'a> ForwardEngine<'a> {
    pub fn new(weights: &'a WeightStore) -> ForwardEngine<'a> {
        ForwardEngine { weights }
    }

    /// Activation of neuron `neuron` in layer `transition + 1`:
    /// `sigmoid(bias + sum(inputs[i] * w[i + 1]))`.
    pub fn neuron_output(&self, inputs: &[f64], transition: usize, neuron: usize) -> Result<f64> {
        self.check_inputs(inputs, transition)?;
        self.activation(inputs, transition, neuron)
    }

    /// Activations of every neuron in layer `transition + 1`.
    pub fn layer_outputs(&self, inputs: &[f64], transition: usize) -> Result<Vec<f64>> {
        self.check_inputs(inputs, transition)?;
        let neurons = self.neurons_after(transition)?;
        (0..neurons)
            .map(|neuron| self.activation(inputs, transition, neuron))
            .collect()
    }

    /// Activations of every layer; element 0 is a copy of `inputs`.
    pub fn forward(&self, inputs: &[f64]) -> Result<Vec<Vec<f64>>> {
        let mut outputs = Vec::with_capacity(self.weights.transitions() + 1);
        outputs.push(inputs.to_vec());
        for t in 0..self.weights.transitions() {
            let next = self.layer_outputs(&outputs[t], t)?;
            outputs.push(next);
        }
        Ok(outputs)
    }

    /// Activations of the output layer only.
    pub fn predict(&self, inputs: &[f64]) -> Result<Vec<f64>> {
        let mut outputs = self.forward(inputs)?;
        Ok(outputs.pop().unwrap_or_default())
    }

    /// Assumes `inputs` already matches the transition's width.
    fn activation(&self, inputs: &[f64], transition: usize, neuron: usize) -> Result<f64> {
        let mut sum = self.weights.get(transition, 0, neuron)?;
        for (i, x) in inputs.iter().enumerate() {
            sum += x * self.weights.get(transition, i + 1, neuron)?;
        }
        Ok(Sigmoid::function(sum))
    }

    fn neurons_after(&self, transition: usize) -> Result<usize> {
        self.weights
            .matrix(transition)
            .map(|m| m.cols())
            .ok_or(MlpError::IndexOutOfRange {
                transition,
                input: 0,
                output: 0,
            })
    }

    fn check_inputs(&self, inputs: &[f64], transition: usize) -> Result<()> {
        let expected = self
            .weights
            .matrix(transition)
            .map(|m| m.rows() - 1)
            .ok_or(MlpError::IndexOutOfRange {
                transition,
                input: 0,
                output: 0,
            })?;
        if inputs.len() != expected {
            return Err(MlpError::Format(format!(
                "transition {transition} expects {expected} inputs, got {}",
                inputs.len()
            )));
        }
        Ok(())
    }
}
