use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::dataset::GeneratorConfig;
use crate::weights::WeightStrategy;

/// Booster hyperparameters, an explicit struct instead of a string-keyed
/// parameter dictionary. Passed through unchanged to the `gbdt` engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    pub learning_rate: f32,
    pub max_depth: u32,
    pub num_boost_round: u32,
    /// Loss objective tag understood by the engine; binary log-loss.
    pub loss_type: String,
    pub debug: bool,
    pub training_optimization_level: u8,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            max_depth: 4,
            num_boost_round: 50,
            loss_type: "LogLikelyhood".to_string(),
            debug: false,
            training_optimization_level: 2,
        }
    }
}

/// Full description of one comparison run: dataset, split, booster and the
/// weighting strategies to pit against each other.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    pub generator: GeneratorConfig,
    pub test_fraction: f32,
    pub split_seed: u64,
    pub trainer: TrainerConfig,
    pub strategies: Vec<WeightStrategy>,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            generator: GeneratorConfig::default(),
            test_fraction: 0.33,
            split_seed: 7,
            trainer: TrainerConfig::default(),
            strategies: vec![
                WeightStrategy::Uniform,
                WeightStrategy::ManualClassWeight {
                    neg_weight: 1.0,
                    pos_weight: 5.0,
                },
                WeightStrategy::AutoScalePosWeight,
            ],
        }
    }
}

/// Load an experiment configuration from a JSON file.
pub fn load_experiment_config<P: AsRef<Path>>(path: P) -> Result<ExperimentConfig> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config: {}", path.as_ref().display()))?;
    let config: ExperimentConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.as_ref().display()))?;
    Ok(config)
}
