use std::path::Path;
use std::sync::mpsc;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::train::epoch_stats::EpochStats;

/// Configuration for a training run.
///
/// # Fields
/// - `epochs`        — full passes over the training data
/// - `learning_rate` — the network's fixed step size `alpha`; `train_loop`
///                     rejects a network built with a different rate
/// - `test_fraction` — share of samples held out for evaluation; `0` disables
/// - `delimiter`     — CSV column separator
/// - `label_offset`  — subtracted from the CSV class column to get 0/1 labels
/// - `seed`          — seeds the shuffle and weight initialization; `None` draws
///                     from entropy
/// - `progress_tx`   — optional channel; one `EpochStats` is sent per epoch. If
///                     the receiver is dropped the loop stops early.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    pub epochs: usize,
    pub learning_rate: f64,
    pub test_fraction: f64,
    pub delimiter: char,
    pub label_offset: f64,
    pub seed: Option<u64>,
    #[serde(skip)]
    pub progress_tx: Option<mpsc::Sender<EpochStats>>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            epochs: 20,
            learning_rate: 0.2,
            test_fraction: 0.3,
            delimiter: ';',
            label_offset: 1.0,
            seed: None,
            progress_tx: None,
        }
    }
}

impl TrainConfig {
    /// Defaults with the given epoch count and learning rate.
    pub fn new(epochs: usize, learning_rate: f64) -> Self {
        TrainConfig {
            epochs,
            learning_rate,
            ..TrainConfig::default()
        }
    }

    /// Reads a JSON config; missing fields take their defaults.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<TrainConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let config: TrainConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(text: &str) -> Result<TrainConfig> {
        let config: TrainConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.epochs == 0 {
            return Err(Error::Config("epochs must be at least 1".into()));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(Error::Config(format!(
                "learning_rate must be a positive finite number, got {}",
                self.learning_rate
            )));
        }
        if !(0.0..1.0).contains(&self.test_fraction) {
            return Err(Error::Config(format!(
                "test_fraction must be in [0, 1), got {}",
                self.test_fraction
            )));
        }
        if !self.label_offset.is_finite() {
            return Err(Error::Config("label_offset must be finite".into()));
        }
        Ok(())
    }
}
