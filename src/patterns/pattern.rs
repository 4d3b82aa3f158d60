use std::fmt;

/// One labeled training example.
#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    /// Input vector, one value per input neuron.
    pub x: Vec<f64>,
    /// Target vector, one value per output neuron.
    pub y: Vec<f64>,
}

impl Pattern {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Pattern {
        Pattern { x, y }
    }
}

/// `X{0.0, 1.0}; Y{1.0}`
impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "X{{{}}}; Y{{{}}}", join(&self.x), join(&self.y))
    }
}

fn join(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| format!("{v:?}"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_lists_both_vectors() {
        let p = Pattern::new(vec![0.0, 1.0, 0.25], vec![1.0]);
        assert_eq!(p.to_string(), "X{0.0, 1.0, 0.25}; Y{1.0}");
    }
}
