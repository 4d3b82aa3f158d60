/// Logistic activation used by every neuron in the network.
pub struct Sigmoid;

impl Sigmoid {
    /// `1 / (1 + e^-x)`
    pub fn function(x: f64) -> f64 {
        1.0 / (1.0 + (-x).exp())
    }

    /// Derivative expressed on the neuron's *output* `o = function(x)`,
    /// i.e. `o * (1 - o)`.
    pub fn derivative(output: f64) -> f64 {
        output * (1.0 - output)
    }
}
