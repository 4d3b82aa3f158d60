use std::io::Write;
use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{MlpError, Result};
use crate::network::config::NetworkConfig;
use crate::network::perceptron::MultiLayerPerceptron;
use crate::patterns::read_patterns;
use crate::train::sweep_stats::SweepStats;
use crate::train::train_config::{TrainConfig, LEARNING_RATE};

/// Layer sizes used when none are given on the command line.
pub const DEFAULT_LAYERS: [usize; 4] = [4, 10, 10, 2];

pub const USAGE: &str = "\
usage: mlp-trainer <patterns-file> [options]
       mlp-trainer --config <run.json> [options]

options:
  --layers <sizes>   comma-separated layer sizes (default 4,10,10,2)
  --weights <file>   write the trained weights to <file>
  --rate <lr>        learning rate (default 0.35)
  --sweeps <n>       number of training sweeps (default 1)
  --no-verify        do not read the weight file back after writing it
  --config <file>    load these settings from a JSON file; flags override it";

/// Everything one run of the trainer binary needs.
///
/// Loaded from JSON, built from command-line arguments, or both (flags
/// override the file).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    pub layers: NetworkConfig,
    pub patterns: PathBuf,
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
    /// Where to write the trained weights, if anywhere.
    #[serde(default)]
    pub weights: Option<PathBuf>,
    #[serde(default = "default_sweeps")]
    pub sweeps: usize,
    /// Read the weight file back after writing it and report the result.
    #[serde(default = "default_verify")]
    pub verify_weights: bool,
}

fn default_learning_rate() -> f64 {
    LEARNING_RATE
}

fn default_sweeps() -> usize {
    1
}

fn default_verify() -> bool {
    true
}

impl RunConfig {
    pub fn new(layers: NetworkConfig, patterns: impl Into<PathBuf>) -> RunConfig {
        RunConfig {
            layers,
            patterns: patterns.into(),
            learning_rate: LEARNING_RATE,
            weights: None,
            sweeps: 1,
            verify_weights: true,
        }
    }

    /// Deserializes and validates a run config from a JSON file.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<RunConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let config: RunConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        TrainConfig::new(self.learning_rate)?;
        if self.sweeps == 0 {
            return Err(MlpError::Config("sweeps must be at least 1".into()));
        }
        Ok(())
    }

    pub fn train_config(&self) -> Result<TrainConfig> {
        TrainConfig::new(self.learning_rate)
    }

    /// Builds a run config from command-line arguments (program name
    /// excluded). See [`USAGE`].
    pub fn from_args<I>(args: I) -> Result<RunConfig>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let mut file = None;
        let mut patterns = None;
        let mut layers = None;
        let mut weights = None;
        let mut rate = None;
        let mut sweeps = None;
        let mut verify = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => file = Some(PathBuf::from(value(&mut args, &arg)?)),
                "--layers" => layers = Some(value(&mut args, &arg)?.parse::<NetworkConfig>()?),
                "--weights" => weights = Some(PathBuf::from(value(&mut args, &arg)?)),
                "--rate" => rate = Some(parse_number::<f64>(&value(&mut args, &arg)?, &arg)?),
                "--sweeps" => sweeps = Some(parse_number::<usize>(&value(&mut args, &arg)?, &arg)?),
                "--no-verify" => verify = Some(false),
                flag if flag.starts_with("--") => {
                    return Err(MlpError::Config(format!("unknown option '{flag}'")));
                }
                _ if patterns.is_none() => patterns = Some(PathBuf::from(&arg)),
                _ => return Err(MlpError::Config(format!("unexpected argument '{arg}'"))),
            }
        }

        let mut config = match (file, patterns) {
            (Some(file), patterns) => {
                let mut config = RunConfig::load_json(file)?;
                if let Some(patterns) = patterns {
                    config.patterns = patterns;
                }
                config
            }
            (None, Some(patterns)) => {
                RunConfig::new(NetworkConfig::new(DEFAULT_LAYERS.to_vec())?, patterns)
            }
            (None, None) => return Err(MlpError::Config("missing pattern file".into())),
        };

        if let Some(layers) = layers {
            config.layers = layers;
        }
        if weights.is_some() {
            config.weights = weights;
        }
        if let Some(rate) = rate {
            config.learning_rate = rate;
        }
        if let Some(sweeps) = sweeps {
            config.sweeps = sweeps;
        }
        if let Some(verify) = verify {
            config.verify_weights = verify;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Runs one training session: lists the patterns, trains for
/// `config.sweeps` sweeps, dumps the weights and, when a weight file is
/// configured, writes it and optionally reads it back. Listings and dumps go
/// to `out`.
pub fn run<W: Write>(config: &RunConfig, out: &mut W) -> Result<Vec<SweepStats>> {
    let patterns = read_patterns(&config.patterns)?;
    for (i, pattern) in patterns.iter().enumerate() {
        writeln!(out, "Pattern {}: {};", i + 1, pattern)?;
    }

    let mut mlp = MultiLayerPerceptron::with_train_config(config.layers.clone(), config.train_config()?);
    let mut history = Vec::with_capacity(config.sweeps);
    for sweep in 1..=config.sweeps {
        let stats = mlp.teach(&patterns)?;
        info!("sweep {sweep}/{}: {}", config.sweeps, serde_json::to_string(&stats)?);
        history.push(stats);
    }
    write!(out, "{}", mlp.weights_report())?;

    if let Some(path) = &config.weights {
        mlp.write_weights(path)?;
        if config.verify_weights {
            mlp.read_weights(path)?;
            write!(out, "{}", mlp.weights_report())?;
        }
    }

    Ok(history)
}

fn value<I: Iterator<Item = String>>(args: &mut I, flag: &str) -> Result<String> {
    args.next()
        .ok_or_else(|| MlpError::Config(format!("option '{flag}' needs a value")))
}

fn parse_number<T: std::str::FromStr>(text: &str, flag: &str) -> Result<T> {
    text.parse::<T>()
        .map_err(|_| MlpError::Config(format!("'{text}' is not a valid value for '{flag}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_from_a_bare_pattern_path() {
        let config = RunConfig::from_args(args(&["data/training.dat"])).unwrap();
        assert_eq!(config.layers.layer_sizes(), &DEFAULT_LAYERS);
        assert_eq!(config.patterns, PathBuf::from("data/training.dat"));
        assert_eq!(config.learning_rate, 0.35);
        assert_eq!(config.weights, None);
        assert_eq!(config.sweeps, 1);
        assert!(config.verify_weights);
    }

    #[test]
    fn flags_override_defaults() {
        let config = RunConfig::from_args(args(&[
            "--layers", "2,3,1", "p.dat", "--weights", "w.tnn", "--rate", "0.5", "--sweeps", "10",
            "--no-verify",
        ]))
        .unwrap();
        assert_eq!(config.layers.layer_sizes(), &[2, 3, 1]);
        assert_eq!(config.weights, Some(PathBuf::from("w.tnn")));
        assert_eq!(config.learning_rate, 0.5);
        assert_eq!(config.sweeps, 10);
        assert!(!config.verify_weights);
    }

    #[test]
    fn bad_arguments_are_config_errors() {
        for bad in [
            vec![],
            vec!["--layers", "1"],
            vec!["p.dat", "--layers", "2,0,1"],
            vec!["p.dat", "--rate", "fast"],
            vec!["p.dat", "--rate", "-1"],
            vec!["p.dat", "--sweeps", "0"],
            vec!["p.dat", "--weights"],
            vec!["p.dat", "--bogus"],
            vec!["p.dat", "q.dat"],
        ] {
            let result = RunConfig::from_args(args(&bad));
            assert!(matches!(result, Err(MlpError::Config(_))), "{bad:?}");
        }
    }

    #[test]
    fn json_file_with_flag_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");
        std::fs::write(&path, r#"{"layers": [2, 2, 1], "patterns": "xor.dat", "sweeps": 5}"#)
            .unwrap();

        let loaded = RunConfig::load_json(&path).unwrap();
        assert_eq!(loaded.layers.layer_sizes(), &[2, 2, 1]);
        assert_eq!(loaded.sweeps, 5);
        assert_eq!(loaded.learning_rate, 0.35);
        assert!(loaded.verify_weights);

        let config = RunConfig::from_args(args(&[
            "--config",
            path.to_str().unwrap(),
            "--sweeps",
            "2",
        ]))
        .unwrap();
        assert_eq!(config.patterns, PathBuf::from("xor.dat"));
        assert_eq!(config.sweeps, 2);
    }

    #[test]
    fn invalid_json_layers_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");
        std::fs::write(&path, r#"{"layers": [2], "patterns": "xor.dat"}"#).unwrap();
        assert!(matches!(RunConfig::load_json(&path), Err(MlpError::Format(_))));
    }
}
