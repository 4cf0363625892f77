//! Learner configuration

use crate::error::{NumlError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for a best-of-trials learning run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearnerConfig {
    /// Share of examples used for training, in (0, 1)
    pub training_percentage: f64,

    /// Number of independent trials per generator (>= 1)
    pub repeat: usize,

    /// Seed for the train/test sampler; `None` uses the process-wide source
    pub seed: Option<u64>,
}

impl Default for LearnerConfig {
    fn default() -> Self {
        Self {
            training_percentage: 0.75,
            repeat: 1,
            seed: None,
        }
    }
}

impl LearnerConfig {
    pub fn new(training_percentage: f64, repeat: usize) -> Self {
        Self {
            training_percentage,
            repeat,
            seed: None,
        }
    }

    pub fn with_training_percentage(mut self, training_percentage: f64) -> Self {
        self.training_percentage = training_percentage;
        self
    }

    pub fn with_repeat(mut self, repeat: usize) -> Self {
        self.repeat = repeat;
        self
    }

    /// Set random seed for reproducible splits
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        let p = self.training_percentage;
        if !(p > 0.0 && p < 1.0) {
            return Err(NumlError::InvalidConfiguration(format!(
                "training_percentage must be in (0, 1), got {}",
                p
            )));
        }
        if self.repeat == 0 {
            return Err(NumlError::InvalidConfiguration(
                "repeat must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Load a configuration from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    /// Save the configuration as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = LearnerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.repeat, 1);
    }

    #[test]
    fn test_validation() {
        for p in [0.0, 1.0, -0.5, 1.5, f64::NAN] {
            let config = LearnerConfig::default().with_training_percentage(p);
            assert!(matches!(config.validate(), Err(NumlError::InvalidConfiguration(_))), "{} accepted", p);
        }
        let config = LearnerConfig::default().with_repeat(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("learner.json");
        let config = LearnerConfig::new(0.8, 5).with_seed(7);
        config.save(&path).unwrap();
        assert_eq!(LearnerConfig::load(&path).unwrap(), config);
    }
}
