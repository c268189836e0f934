//! Thresholding, confusion matrices and classification metrics.
//!
//! All experiments share the same fixed decision threshold so their confusion
//! matrices are comparable; a sample is predicted positive iff its score is
//! strictly above the cutoff.

use std::fmt;

use crate::error::ExperimentError;

/// Decision cutoff shared by every experiment run.
pub const DECISION_THRESHOLD: f32 = 0.5;

/// Turn probability scores into 0/1 labels: 1 iff score > cutoff.
pub fn threshold(scores: &[f32], cutoff: f32) -> Vec<i32> {
    scores
        .iter()
        .map(|&s| if s > cutoff { 1 } else { 0 })
        .collect()
}

/// 2x2 cross-tabulation of actual vs. predicted binary labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfusionMatrix {
    pub true_neg: usize,
    pub false_pos: usize,
    pub false_neg: usize,
    pub true_pos: usize,
}

impl ConfusionMatrix {
    /// Count (actual, predicted) pairs. Labels other than 1 count as negative.
    pub fn from_labels(actual: &[i32], predicted: &[i32]) -> Result<Self, ExperimentError> {
        if actual.len() != predicted.len() {
            return Err(ExperimentError::LengthMismatch {
                expected: actual.len(),
                got: predicted.len(),
            });
        }

        let mut cm = ConfusionMatrix {
            true_neg: 0,
            false_pos: 0,
            false_neg: 0,
            true_pos: 0,
        };
        for (&a, &p) in actual.iter().zip(predicted) {
            match (a == 1, p == 1) {
                (false, false) => cm.true_neg += 1,
                (false, true) => cm.false_pos += 1,
                (true, false) => cm.false_neg += 1,
                (true, true) => cm.true_pos += 1,
            }
        }
        Ok(cm)
    }

    /// Row sum: actually-negative samples.
    pub fn actual_neg(&self) -> usize {
        self.true_neg + self.false_pos
    }

    /// Row sum: actually-positive samples.
    pub fn actual_pos(&self) -> usize {
        self.false_neg + self.true_pos
    }

    /// Column sum: samples predicted negative.
    pub fn predicted_neg(&self) -> usize {
        self.true_neg + self.false_neg
    }

    /// Column sum: samples predicted positive.
    pub fn predicted_pos(&self) -> usize {
        self.false_pos + self.true_pos
    }

    /// Grand total: all samples.
    pub fn total(&self) -> usize {
        self.actual_neg() + self.actual_pos()
    }
}

impl fmt::Display for ConfusionMatrix {
    /// Renders the actual-by-predicted cross-tab with "All" margins:
    ///
    /// ```text
    /// Predicted    0    1  All
    /// Actual
    /// 0           59    0   59
    /// 1            4    3    7
    /// All         63    3   66
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{:<10} {:>5} {:>5} {:>5}", "Predicted", "0", "1", "All")?;
        writeln!(f, "Actual")?;
        writeln!(
            f,
            "{:<10} {:>5} {:>5} {:>5}",
            "0",
            self.true_neg,
            self.false_pos,
            self.actual_neg()
        )?;
        writeln!(
            f,
            "{:<10} {:>5} {:>5} {:>5}",
            "1",
            self.false_neg,
            self.true_pos,
            self.actual_pos()
        )?;
        write!(
            f,
            "{:<10} {:>5} {:>5} {:>5}",
            "All",
            self.predicted_neg(),
            self.predicted_pos(),
            self.total()
        )
    }
}

/// Accuracy, precision and recall derived from a confusion matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
}

impl Metrics {
    /// Fails with [`ExperimentError::UndefinedMetric`] when a denominator is
    /// zero instead of producing NaN.
    pub fn from_confusion(cm: &ConfusionMatrix) -> Result<Self, ExperimentError> {
        let total = cm.total();
        if total == 0 {
            return Err(ExperimentError::UndefinedMetric("accuracy"));
        }

        let predicted_pos = cm.predicted_pos();
        if predicted_pos == 0 {
            return Err(ExperimentError::UndefinedMetric("precision"));
        }

        let actual_pos = cm.actual_pos();
        if actual_pos == 0 {
            return Err(ExperimentError::UndefinedMetric("recall"));
        }

        Ok(Metrics {
            accuracy: (cm.true_pos + cm.true_neg) as f64 / total as f64,
            precision: cm.true_pos as f64 / predicted_pos as f64,
            recall: cm.true_pos as f64 / actual_pos as f64,
        })
    }
}

impl fmt::Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "accuracy {:.2}  precision {:.2}  recall {:.2}",
            self.accuracy, self.precision, self.recall
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_strictly_greater() {
        let labels = threshold(&[0.2, 0.5, 0.500001, 0.9], DECISION_THRESHOLD);
        assert_eq!(labels, vec![0, 0, 1, 1]);
    }

    #[test]
    fn confusion_counts_and_margins() {
        let actual = vec![0, 0, 0, 1, 1, 1, 1];
        let predicted = vec![0, 1, 0, 1, 0, 1, 1];
        let cm = ConfusionMatrix::from_labels(&actual, &predicted).unwrap();

        assert_eq!(cm.true_neg, 2);
        assert_eq!(cm.false_pos, 1);
        assert_eq!(cm.false_neg, 1);
        assert_eq!(cm.true_pos, 3);

        // Row sums are per-class actual counts, column sums per-class
        // predicted counts, grand total the sample count.
        assert_eq!(cm.actual_neg(), 3);
        assert_eq!(cm.actual_pos(), 4);
        assert_eq!(cm.predicted_neg(), 3);
        assert_eq!(cm.predicted_pos(), 4);
        assert_eq!(cm.total(), 7);
    }

    #[test]
    fn confusion_rejects_mismatched_lengths() {
        let err = ConfusionMatrix::from_labels(&[0, 1], &[0]).unwrap_err();
        assert_eq!(
            err,
            ExperimentError::LengthMismatch {
                expected: 2,
                got: 1
            }
        );
    }

    #[test]
    fn metrics_from_worked_matrix() {
        // The baseline cell values from the 200-sample worked scenario.
        let cm = ConfusionMatrix {
            true_neg: 59,
            false_pos: 0,
            false_neg: 4,
            true_pos: 3,
        };
        let m = Metrics::from_confusion(&cm).unwrap();
        assert!((m.accuracy - 62.0 / 66.0).abs() < 1e-9);
        assert!((m.precision - 1.0).abs() < 1e-9);
        assert!((m.recall - 3.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn metrics_accuracy_stays_in_unit_interval() {
        let cm = ConfusionMatrix {
            true_neg: 10,
            false_pos: 5,
            false_neg: 3,
            true_pos: 2,
        };
        let m = Metrics::from_confusion(&cm).unwrap();
        assert!((0.0..=1.0).contains(&m.accuracy));
        assert!((0.0..=1.0).contains(&m.precision));
        assert!((0.0..=1.0).contains(&m.recall));
    }

    #[test]
    fn metrics_recall_monotone_in_true_positives() {
        let base = ConfusionMatrix {
            true_neg: 10,
            false_pos: 2,
            false_neg: 4,
            true_pos: 1,
        };
        let more_tp = ConfusionMatrix {
            true_pos: 5,
            ..base
        };
        let a = Metrics::from_confusion(&base).unwrap();
        let b = Metrics::from_confusion(&more_tp).unwrap();
        assert!(b.recall >= a.recall);
    }

    #[test]
    fn metrics_undefined_precision_without_positive_predictions() {
        let cm = ConfusionMatrix {
            true_neg: 5,
            false_pos: 0,
            false_neg: 2,
            true_pos: 0,
        };
        assert_eq!(
            Metrics::from_confusion(&cm),
            Err(ExperimentError::UndefinedMetric("precision"))
        );
    }

    #[test]
    fn metrics_undefined_recall_without_actual_positives() {
        let cm = ConfusionMatrix {
            true_neg: 5,
            false_pos: 2,
            false_neg: 0,
            true_pos: 0,
        };
        assert_eq!(
            Metrics::from_confusion(&cm),
            Err(ExperimentError::UndefinedMetric("recall"))
        );
    }

    #[test]
    fn display_includes_all_margins() {
        let cm = ConfusionMatrix {
            true_neg: 59,
            false_pos: 0,
            false_neg: 4,
            true_pos: 3,
        };
        let rendered = cm.to_string();
        assert!(rendered.contains("Predicted"));
        assert!(rendered.contains("Actual"));
        assert!(rendered.contains("All"));
        assert!(rendered.contains("66"));
    }
}
