//! One-shot experiment orchestration.
//!
//! A comparison run generates the dataset once, splits it once, then trains
//! and evaluates one booster per weighting strategy on the shared split. The
//! strategy runs are independent: a failing strategy aborts only its own run
//! and is reported next to the successes.

use anyhow::Result;

use crate::config::{ExperimentConfig, TrainerConfig};
use crate::dataset::{generate, stratified_split, Dataset};
use crate::eval::{threshold, ConfusionMatrix, Metrics, DECISION_THRESHOLD};
use crate::models::classifier_trait::BinaryClassifier;
use crate::models::gbdt::GbdtClassifier;
use crate::weights::WeightStrategy;

/// Evaluation artifacts of a single strategy run on the shared split.
#[derive(Debug, Clone)]
pub struct StrategyReport {
    pub strategy: WeightStrategy,
    /// Effective positive-class multiplier, when the strategy applies one.
    pub scale_pos_weight: Option<f32>,
    /// Test-set probability scores, index-aligned with the test rows.
    pub scores: Vec<f32>,
    pub predicted: Vec<i32>,
    pub confusion: ConfusionMatrix,
    pub metrics: Metrics,
}

/// One strategy's slot in a comparison: the run either produced a report or
/// failed one of its preconditions.
#[derive(Debug)]
pub struct StrategyOutcome {
    pub strategy: WeightStrategy,
    pub result: Result<StrategyReport>,
}

/// All strategy outcomes for one shared dataset/split.
#[derive(Debug)]
pub struct ComparisonReport {
    pub train_positive: usize,
    pub train_negative: usize,
    pub test_positive: usize,
    pub test_negative: usize,
    /// Actual test labels, index-aligned with every run's `scores`.
    pub test_labels: Vec<i32>,
    pub outcomes: Vec<StrategyOutcome>,
}

/// Train and evaluate one weighting strategy on an existing split.
pub fn run_strategy(
    train: &Dataset,
    test: &Dataset,
    strategy: WeightStrategy,
    trainer: &TrainerConfig,
) -> Result<StrategyReport> {
    let resolved = strategy.resolve(&train.y)?;
    if let Some(scale) = resolved.scale_pos_weight {
        log::info!(
            "strategy {}: positive-class weight scale {:.3}",
            strategy.name(),
            scale
        );
    }

    let mut model = GbdtClassifier::new(trainer.clone());
    model.fit(&train.x, &train.y, &resolved.weights)?;

    let scores = model.predict_proba(&test.x)?;
    let predicted = threshold(&scores, DECISION_THRESHOLD);
    let actual: Vec<i32> = test.y.to_vec();

    let confusion = ConfusionMatrix::from_labels(&actual, &predicted)?;
    let metrics = Metrics::from_confusion(&confusion)?;

    Ok(StrategyReport {
        strategy,
        scale_pos_weight: resolved.scale_pos_weight,
        scores,
        predicted,
        confusion,
        metrics,
    })
}

/// Run every configured strategy against one generated dataset and split.
pub fn run_comparison(config: &ExperimentConfig) -> Result<ComparisonReport> {
    let dataset = generate(&config.generator)?;
    dataset.log_summary("dataset");

    let (train, test) = stratified_split(&dataset, config.test_fraction, config.split_seed)?;
    train.log_summary("train");
    test.log_summary("test");

    let outcomes = config
        .strategies
        .iter()
        .map(|&strategy| StrategyOutcome {
            strategy,
            result: run_strategy(&train, &test, strategy, &config.trainer),
        })
        .collect();

    Ok(ComparisonReport {
        train_positive: train.positive_count(),
        train_negative: train.negative_count(),
        test_positive: test.positive_count(),
        test_negative: test.negative_count(),
        test_labels: test.y.to_vec(),
        outcomes,
    })
}
