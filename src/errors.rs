//! Errors
//!
//! Custom error types used throughout the `arbor` crate.
use thiserror::Error;

/// Errors that can occur while building or querying a decision tree.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DecisionTreeError {
    /// Number of rows and number of labels differ.
    #[error("Shape mismatch, {0} rows were provided with {1} labels.")]
    ShapeMismatch(usize, usize),
    /// A training row has no value for one of the candidate features.
    #[error("Feature {0} is missing from row {1}.")]
    MissingFeature(String, usize),
    /// The same feature was listed more than once.
    #[error("Feature {0} was provided more than once.")]
    DuplicateFeature(String),
    /// No rows were provided.
    #[error("Unable to build a tree from an empty dataset.")]
    EmptyInput,
    /// First value is the split feature, second is the value never seen during training.
    #[error("No branch for value {1} of feature {0}, the value was not observed during training.")]
    KeyMissing(String, String),
    /// The example being predicted has no value for a split feature.
    #[error("Feature {0} is required for prediction, but is missing from the example.")]
    MissingExampleFeature(String),
    /// Prediction was requested before the tree was fit.
    #[error("The decision tree has not been fit yet.")]
    NotFitted,
    /// Unable to write model to file.
    #[error("Unable to write model to file: {0}")]
    UnableToWrite(String),
    /// Unable to read model from file.
    #[error("Unable to read model from a file {0}")]
    UnableToRead(String),
    /// First value is the name of the parameter, second is expected, third is what was passed.
    #[error("Invalid parameter value passed for {0}, expected {1} but {2} provided.")]
    InvalidParameter(String, String, String),
}
