//! Synthetic imbalanced dataset generation and stratified splitting.
//!
//! The generator draws Gaussian clusters: the first `informative` feature
//! columns carry a class-dependent mean while the remaining columns are pure
//! noise. Everything is deterministic given the configured seed.

use ndarray::{Array1, Array2, Axis};
use rand::distributions::Distribution;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use statrs::distribution::Normal;

use crate::error::ExperimentError;

/// Parameters for the synthetic dataset generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub samples: usize,
    pub features: usize,
    /// Number of leading feature columns that carry class signal.
    pub informative: usize,
    /// Fraction of samples labeled 1 (the minority class in these experiments).
    pub positive_fraction: f32,
    /// Mean offset of the positive class on informative columns.
    pub class_separation: f64,
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            samples: 200,
            features: 10,
            informative: 4,
            positive_fraction: 0.10,
            class_separation: 1.5,
            seed: 42,
        }
    }
}

/// A labeled tabular dataset. Labels are 0 (negative) and 1 (positive).
/// Immutable once generated.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub x: Array2<f32>,
    pub y: Array1<i32>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.x.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn positive_count(&self) -> usize {
        self.y.iter().filter(|&&v| v == 1).count()
    }

    pub fn negative_count(&self) -> usize {
        self.y.iter().filter(|&&v| v == 0).count()
    }

    pub fn positive_fraction(&self) -> f32 {
        if self.is_empty() {
            return 0.0;
        }
        self.positive_count() as f32 / self.len() as f32
    }

    /// Build a new dataset from the rows at `indices`, in the given order.
    pub fn select(&self, indices: &[usize]) -> Dataset {
        Dataset {
            x: self.x.select(Axis(0), indices),
            y: self.y.select(Axis(0), indices),
        }
    }

    pub fn log_summary(&self, name: &str) {
        log::info!(
            "{}: {} samples ({} positive / {} negative, positive fraction {:.3})",
            name,
            self.len(),
            self.positive_count(),
            self.negative_count(),
            self.positive_fraction()
        );
    }
}

/// Generate a synthetic imbalanced dataset, deterministic given the seed.
///
/// The positive count is `round(samples * positive_fraction)`; generation
/// fails if that would leave either class empty.
pub fn generate(config: &GeneratorConfig) -> Result<Dataset, ExperimentError> {
    let n = config.samples;
    let n_pos = (n as f32 * config.positive_fraction).round() as usize;

    if n_pos == 0 {
        return Err(ExperimentError::EmptyClass { class: 1 });
    }
    if n_pos >= n {
        return Err(ExperimentError::EmptyClass { class: 0 });
    }

    let informative = config.informative.min(config.features);
    if informative < config.informative {
        log::warn!(
            "informative ({}) exceeds features ({}); clamping",
            config.informative,
            config.features
        );
    }

    let mut rng = StdRng::seed_from_u64(config.seed);

    let mut labels: Vec<i32> = std::iter::repeat(1)
        .take(n_pos)
        .chain(std::iter::repeat(0).take(n - n_pos))
        .collect();
    labels.shuffle(&mut rng);

    // Unit-variance normal; parameters are constants so construction cannot fail.
    let noise = Normal::new(0.0, 1.0).expect("unit normal");

    let mut data = Vec::with_capacity(n * config.features);
    for &label in &labels {
        for col in 0..config.features {
            let mean = if label == 1 && col < informative {
                config.class_separation
            } else {
                0.0
            };
            data.push((mean + noise.sample(&mut rng)) as f32);
        }
    }

    let x = Array2::from_shape_vec((n, config.features), data)
        .expect("generator buffer matches (samples, features)");
    let y = Array1::from_vec(labels);

    Ok(Dataset { x, y })
}

/// Stratified train/test split: shuffles each class independently and moves
/// `round(class_count * test_fraction)` of it into the test set, so both
/// splits preserve the class proportions within one sample.
///
/// Fails with [`ExperimentError::DegenerateSplit`] if either class would be
/// absent from one side.
pub fn stratified_split(
    dataset: &Dataset,
    test_fraction: f32,
    seed: u64,
) -> Result<(Dataset, Dataset), ExperimentError> {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut train_indices = Vec::new();
    let mut test_indices = Vec::new();

    for class in [0, 1] {
        let mut class_indices: Vec<usize> = dataset
            .y
            .iter()
            .enumerate()
            .filter_map(|(i, &v)| if v == class { Some(i) } else { None })
            .collect();
        class_indices.shuffle(&mut rng);

        let count = class_indices.len();
        let n_test = (count as f32 * test_fraction).round() as usize;
        if n_test == 0 || n_test == count {
            return Err(ExperimentError::DegenerateSplit {
                class,
                train_count: count - n_test,
                test_count: n_test,
            });
        }

        test_indices.extend_from_slice(&class_indices[..n_test]);
        train_indices.extend_from_slice(&class_indices[n_test..]);
    }

    // Restore the original row order within each split.
    train_indices.sort_unstable();
    test_indices.sort_unstable();

    Ok((dataset.select(&train_indices), dataset.select(&test_indices)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_is_deterministic() {
        let config = GeneratorConfig::default();
        let a = generate(&config).unwrap();
        let b = generate(&config).unwrap();
        assert_eq!(a.y, b.y);
        assert_eq!(a.x, b.x);
    }

    #[test]
    fn generate_respects_positive_fraction() {
        let config = GeneratorConfig::default();
        let data = generate(&config).unwrap();
        assert_eq!(data.len(), 200);
        assert_eq!(data.positive_count(), 20);
        assert_eq!(data.negative_count(), 180);
    }

    #[test]
    fn generate_rejects_empty_positive_class() {
        let config = GeneratorConfig {
            samples: 100,
            positive_fraction: 0.001,
            ..GeneratorConfig::default()
        };
        assert!(matches!(
            generate(&config),
            Err(ExperimentError::EmptyClass { class: 1 })
        ));
    }

    #[test]
    fn generate_rejects_empty_negative_class() {
        let config = GeneratorConfig {
            samples: 50,
            positive_fraction: 1.0,
            ..GeneratorConfig::default()
        };
        assert!(matches!(
            generate(&config),
            Err(ExperimentError::EmptyClass { class: 0 })
        ));
    }

    #[test]
    fn split_partitions_without_overlap() {
        let data = generate(&GeneratorConfig::default()).unwrap();
        let (train, test) = stratified_split(&data, 0.33, 7).unwrap();

        assert_eq!(train.len() + test.len(), data.len());
        assert_eq!(
            train.positive_count() + test.positive_count(),
            data.positive_count()
        );
        assert_eq!(
            train.negative_count() + test.negative_count(),
            data.negative_count()
        );
    }

    #[test]
    fn split_preserves_class_proportions() {
        let data = generate(&GeneratorConfig::default()).unwrap();
        let (train, test) = stratified_split(&data, 0.33, 7).unwrap();

        // 20 positives: round(20 * 0.33) = 7 in test, 13 in train.
        assert_eq!(test.positive_count(), 7);
        assert_eq!(train.positive_count(), 13);

        let full = data.positive_fraction();
        let tolerance_train = 1.0 / train.len() as f32;
        let tolerance_test = 1.0 / test.len() as f32;
        assert!((train.positive_fraction() - full).abs() <= tolerance_train);
        assert!((test.positive_fraction() - full).abs() <= tolerance_test);
    }

    #[test]
    fn split_fails_when_a_class_cannot_straddle() {
        // One positive sample cannot appear in both splits.
        let config = GeneratorConfig {
            samples: 20,
            positive_fraction: 0.05,
            ..GeneratorConfig::default()
        };
        let data = generate(&config).unwrap();
        assert_eq!(data.positive_count(), 1);

        let err = stratified_split(&data, 0.5, 1).unwrap_err();
        assert!(matches!(err, ExperimentError::DegenerateSplit { class: 1, .. }));
    }
}
