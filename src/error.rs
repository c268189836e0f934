use std::error::Error;
use std::fmt;

/// Custom error type for experiment precondition failures.
///
/// Every variant is a detectable precondition: the pipeline surfaces these as
/// explicit errors before or instead of producing NaN/infinite values.
#[derive(Debug, Clone, PartialEq)]
pub enum ExperimentError {
    /// The stratified split would leave a class empty on one side.
    DegenerateSplit {
        class: i32,
        train_count: usize,
        test_count: usize,
    },
    /// AutoScalePosWeight ratio is undefined: no positive samples in Train.
    ZeroPositiveTrain,
    /// A metric denominator is zero (e.g. precision with no positive predictions).
    UndefinedMetric(&'static str),
    /// Row-aligned inputs have different lengths.
    LengthMismatch { expected: usize, got: usize },
    /// Dataset generation would produce a class with no samples.
    EmptyClass { class: i32 },
    /// A sample weight must be a positive real.
    NonPositiveWeight(f32),
}

impl fmt::Display for ExperimentError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ExperimentError::DegenerateSplit {
                class,
                train_count,
                test_count,
            } => write!(
                f,
                "stratified split leaves class {} degenerate ({} train / {} test)",
                class, train_count, test_count
            ),
            ExperimentError::ZeroPositiveTrain => {
                write!(f, "scale_pos_weight is undefined: no positive samples in the training set")
            }
            ExperimentError::UndefinedMetric(name) => {
                write!(f, "{} is undefined: denominator is zero", name)
            }
            ExperimentError::LengthMismatch { expected, got } => {
                write!(f, "expected {} row-aligned values, got {}", expected, got)
            }
            ExperimentError::EmptyClass { class } => {
                write!(f, "generated dataset would contain no samples of class {}", class)
            }
            ExperimentError::NonPositiveWeight(w) => {
                write!(f, "sample weights must be positive, got {}", w)
            }
        }
    }
}

impl Error for ExperimentError {}
