pub struct SquaredError;

impl SquaredError {
    /// Sum of squared residuals: `sum((expected - predicted)²)`.
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        predicted.iter().zip(expected.iter())
            .map(|(p, e)| (e - p).powi(2))
            .sum()
    }

    /// Per-output residual `expected - predicted`, the descent direction for
    /// each output neuron.
    pub fn residuals(predicted: &[f64], expected: &[f64]) -> Vec<f64> {
        predicted.iter().zip(expected.iter())
            .map(|(p, e)| e - p)
            .collect()
    }
}
