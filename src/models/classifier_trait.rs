use anyhow::Result;
use ndarray::{Array1, Array2};

/// Contract between the experiment runner and a boosting engine. The engine
/// is treated as opaque: the runner only supplies index-aligned labels and
/// weights and interprets the returned scores.
pub trait BinaryClassifier {
    /// Fit the model. `y` uses the crate convention (1 positive, 0 negative);
    /// `weights` must be aligned with the rows of `x`.
    fn fit(&mut self, x: &Array2<f32>, y: &Array1<i32>, weights: &[f32]) -> Result<()>;

    /// Predict the positive-class probability (0..1) per row.
    fn predict_proba(&self, x: &Array2<f32>) -> Result<Vec<f32>>;

    /// Optional human readable name for the model
    fn name(&self) -> &str {
        "classifier"
    }
}
