use serde::Serialize;

/// Summary of one sweep over a pattern collection.
///
/// The error of each pattern is measured on the forward pass that precedes
/// its own weight update, so it lags the weights by at most one step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepStats {
    /// Number of patterns trained on.
    pub patterns: usize,
    /// Sum over patterns of `sum((target - output)²)`.
    pub total_error: f64,
    /// `total_error / patterns`, or 0 for an empty sweep.
    pub mean_error: f64,
    /// Wall-clock duration of the sweep in milliseconds.
    pub elapsed_ms: u64,
}
