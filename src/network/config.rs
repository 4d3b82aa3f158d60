use serde::{Deserialize, Serialize};

use crate::error::{MlpError, Result};

/// Maximum number of layers, input and output layers included.
pub const MAX_LAYERS: usize = 4;
/// Maximum number of neurons in any single layer.
pub const MAX_NEURONS: usize = 1000;

/// Validated layer-size sequence `(input, hidden..., output)`.
///
/// Serializes as a bare JSON array (`[4, 10, 2]`); deserialization runs the
/// same validation as [`NetworkConfig::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct NetworkConfig {
    layer_sizes: Vec<usize>,
}

impl NetworkConfig {
    pub fn new(layer_sizes: Vec<usize>) -> Result<NetworkConfig> {
        validate(&layer_sizes)?;
        Ok(NetworkConfig { layer_sizes })
    }

    pub fn layer_sizes(&self) -> &[usize] {
        &self.layer_sizes
    }

    /// Number of weight transitions, one less than the number of layers.
    pub fn transitions(&self) -> usize {
        self.layer_sizes.len() - 1
    }

    pub fn input_size(&self) -> usize {
        self.layer_sizes[0]
    }

    pub fn output_size(&self) -> usize {
        self.layer_sizes[self.layer_sizes.len() - 1]
    }

    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes and validates a config written by `save_json`.
    pub fn load_json(path: &str) -> Result<NetworkConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}

/// Rejects sequences that are too short or too long, or that contain a layer
/// with zero neurons or more than `MAX_NEURONS`.
pub fn validate(layer_sizes: &[usize]) -> Result<()> {
    if layer_sizes.len() < 2 {
        return Err(MlpError::Config(format!(
            "need at least 2 layers, got {}",
            layer_sizes.len()
        )));
    }
    if layer_sizes.len() > MAX_LAYERS {
        return Err(MlpError::Config(format!(
            "at most {MAX_LAYERS} layers are supported, got {}",
            layer_sizes.len()
        )));
    }
    if let Some((layer, &size)) = layer_sizes
        .iter()
        .enumerate()
        .find(|&(_, &size)| size < 1 || size > MAX_NEURONS)
    {
        return Err(MlpError::Config(format!(
            "layer {layer} has {size} neurons, expected 1..={MAX_NEURONS}"
        )));
    }
    Ok(())
}

impl TryFrom<Vec<usize>> for NetworkConfig {
    type Error = MlpError;

    fn try_from(layer_sizes: Vec<usize>) -> Result<NetworkConfig> {
        NetworkConfig::new(layer_sizes)
    }
}

impl From<NetworkConfig> for Vec<usize> {
    fn from(config: NetworkConfig) -> Vec<usize> {
        config.layer_sizes
    }
}

impl std::str::FromStr for NetworkConfig {
    type Err = MlpError;

    /// Parses a comma-separated list such as `4,10,10,2`.
    fn from_str(s: &str) -> Result<NetworkConfig> {
        let sizes = s
            .split(',')
            .map(|part| {
                part.trim().parse::<usize>().map_err(|_| {
                    MlpError::Config(format!("'{}' is not a valid layer size", part.trim()))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        NetworkConfig::new(sizes)
    }
}
