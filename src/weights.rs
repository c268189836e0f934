//! Per-sample weighting strategies for imbalanced training.

use std::str::FromStr;

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::error::ExperimentError;

/// How training samples are weighted before they reach the booster.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightStrategy {
    /// Every sample weighs 1. The baseline.
    Uniform,
    /// Caller-supplied per-class constants, no automatic derivation.
    ManualClassWeight { neg_weight: f32, pos_weight: f32 },
    /// Scales every positive sample by negatives/positives in the training
    /// set, the `scale_pos_weight` idiom. Recomputed per training set.
    AutoScalePosWeight,
}

impl WeightStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            WeightStrategy::Uniform => "uniform",
            WeightStrategy::ManualClassWeight { .. } => "manual_class_weight",
            WeightStrategy::AutoScalePosWeight => "auto_scale_pos_weight",
        }
    }

    /// Resolve this strategy against a training label vector.
    ///
    /// Returns the index-aligned weight vector the trainer consumes, plus the
    /// scalar applied to positive samples when one exists.
    pub fn resolve(&self, y: &Array1<i32>) -> Result<ResolvedWeights, ExperimentError> {
        let (neg_weight, pos_weight) = match *self {
            WeightStrategy::Uniform => (1.0, 1.0),
            WeightStrategy::ManualClassWeight {
                neg_weight,
                pos_weight,
            } => (neg_weight, pos_weight),
            WeightStrategy::AutoScalePosWeight => {
                let positives = y.iter().filter(|&&v| v == 1).count();
                if positives == 0 {
                    return Err(ExperimentError::ZeroPositiveTrain);
                }
                let negatives = y.len() - positives;
                (1.0, negatives as f32 / positives as f32)
            }
        };

        for &w in &[neg_weight, pos_weight] {
            if !(w.is_finite() && w > 0.0) {
                return Err(ExperimentError::NonPositiveWeight(w));
            }
        }

        let weights = y
            .iter()
            .map(|&label| if label == 1 { pos_weight } else { neg_weight })
            .collect();

        let scale_pos_weight = match self {
            WeightStrategy::Uniform => None,
            _ => Some(pos_weight / neg_weight),
        };

        Ok(ResolvedWeights {
            weights,
            scale_pos_weight,
        })
    }
}

/// A strategy resolved against a concrete training set. Created fresh per
/// experiment configuration and consumed once by the trainer.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedWeights {
    pub weights: Vec<f32>,
    /// Effective positive-class multiplier, if the strategy applies one.
    pub scale_pos_weight: Option<f32>,
}

impl FromStr for WeightStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "uniform" | "baseline" => Ok(WeightStrategy::Uniform),
            "manual" | "manual_class_weight" => Ok(WeightStrategy::ManualClassWeight {
                neg_weight: 1.0,
                pos_weight: 5.0,
            }),
            "auto" | "auto_scale_pos_weight" => Ok(WeightStrategy::AutoScalePosWeight),
            _ => Err(format!(
                "Unknown weight strategy: {}. Expected 'uniform', 'manual' or 'auto'",
                s
            )),
        }
    }
}
