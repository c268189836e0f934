use anyhow::{bail, Result};
use gbdt::config::Config;
use gbdt::decision_tree::{Data, DataVec};
use gbdt::gradient_boost::GBDT;
use ndarray::{Array1, Array2};

use crate::config::TrainerConfig;
use crate::error::ExperimentError;
use crate::models::classifier_trait::BinaryClassifier;

/// Gradient Boosting Decision Tree (GBDT) classifier.
///
/// Thin wrapper over the `gbdt` engine. Crate labels 0/1 are mapped to the
/// -1/+1 targets the LogLikelyhood loss expects; `predict` then yields the
/// positive-class probability.
pub struct GbdtClassifier {
    model: Option<GBDT>,
    params: TrainerConfig,
}

impl GbdtClassifier {
    pub fn new(params: TrainerConfig) -> Self {
        GbdtClassifier {
            model: None,
            params,
        }
    }
}

fn engine_label(label: i32) -> f32 {
    if label == 1 {
        1.0
    } else {
        -1.0
    }
}

impl BinaryClassifier for GbdtClassifier {
    fn fit(&mut self, x: &Array2<f32>, y: &Array1<i32>, weights: &[f32]) -> Result<()> {
        if y.len() != x.nrows() {
            return Err(ExperimentError::LengthMismatch {
                expected: x.nrows(),
                got: y.len(),
            }
            .into());
        }
        if weights.len() != x.nrows() {
            return Err(ExperimentError::LengthMismatch {
                expected: x.nrows(),
                got: weights.len(),
            }
            .into());
        }

        let mut config = Config::new();
        config.set_feature_size(x.ncols());
        config.set_shrinkage(self.params.learning_rate);
        config.set_max_depth(self.params.max_depth);
        config.set_iterations(self.params.num_boost_round as usize);
        config.set_debug(self.params.debug);
        config.set_training_optimization_level(self.params.training_optimization_level);
        config.set_loss(&self.params.loss_type);

        let mut train_x = DataVec::new();
        for (row, (&label, &weight)) in y.iter().zip(weights).enumerate() {
            train_x.push(Data::new_training_data(
                x.row(row).to_vec(),
                weight,
                engine_label(label),
                None,
            ));
        }

        let mut gbdt = GBDT::new(&config);
        gbdt.fit(&mut train_x);
        self.model = Some(gbdt);

        Ok(())
    }

    fn predict_proba(&self, x: &Array2<f32>) -> Result<Vec<f32>> {
        let model = match &self.model {
            Some(m) => m,
            None => bail!("predict_proba called before fit"),
        };

        let mut test_x = DataVec::new();
        for row in 0..x.nrows() {
            test_x.push(Data::new_test_data(x.row(row).to_vec(), None));
        }

        Ok(model.predict(&test_x))
    }

    fn name(&self) -> &str {
        "gbdt"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_and_predict_separable_data() {
        // Second feature carries the class; first is constant noise.
        let x = Array2::from_shape_vec(
            (10, 2),
            vec![
                1.0, 4.8, 1.0, -5.2, 1.0, 5.1, 1.0, -4.9, 1.0, 5.3, 1.0, -5.0, 1.0, 4.6, 1.0,
                -5.4, 1.0, 5.0, 1.0, -4.7,
            ],
        )
        .unwrap();
        let y = Array1::from_vec(vec![1, 0, 1, 0, 1, 0, 1, 0, 1, 0]);
        let weights = vec![1.0; 10];

        let mut clf = GbdtClassifier::new(TrainerConfig {
            num_boost_round: 10,
            max_depth: 3,
            ..TrainerConfig::default()
        });
        clf.fit(&x, &y, &weights).unwrap();

        let probs = clf.predict_proba(&x).unwrap();
        assert_eq!(probs.len(), 10);
        for &p in &probs {
            assert!((0.0..=1.0).contains(&p), "probability out of range: {}", p);
        }
        // Positive rows must score above negative rows.
        for i in (0..10).step_by(2) {
            assert!(probs[i] > probs[i + 1]);
        }
    }

    #[test]
    fn fit_rejects_misaligned_weights() {
        let x = Array2::from_shape_vec((2, 1), vec![0.0, 1.0]).unwrap();
        let y = Array1::from_vec(vec![0, 1]);
        let mut clf = GbdtClassifier::new(TrainerConfig::default());
        assert!(clf.fit(&x, &y, &[1.0]).is_err());
    }

    #[test]
    fn predict_before_fit_errors() {
        let x = Array2::from_shape_vec((1, 1), vec![0.0]).unwrap();
        let clf = GbdtClassifier::new(TrainerConfig::default());
        assert!(clf.predict_proba(&x).is_err());
    }
}
