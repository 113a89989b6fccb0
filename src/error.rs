//! Error types shared by every module of this crate.

use thiserror::Error;

/// Errors reported while building, loading, or evaluating a tree.
#[derive(Debug, Error)]
pub enum TreeError {
    /// The description of a tree cannot be turned into a valid model.
    /// Raised once, at construction time.
    #[error("Malformed model: {0}")]
    MalformedModel(String),

    /// The feature vector does not have the arity of the model.
    #[error("Invalid feature vector: expected {expected} features, got {got}")]
    InvalidFeatureVector { expected: usize, got: usize },

    /// A split references a feature past the end of the vector.
    #[error("Invalid feature vector: feature index {index} is out of range for {len} features")]
    FeatureIndexOutOfRange { index: usize, len: usize },

    #[error("Unknown model: {0}")]
    UnknownModel(String),

    #[error("Model is already registered: {0}")]
    DuplicateModel(String),

    #[error("A global model registry is already installed")]
    RegistryAlreadyInstalled,

    /// A sample lacks a column the model needs.
    #[error("Missing feature column: {0}")]
    MissingFeature(String),

    /// Two columns of a sample share a name.
    #[error("Duplicate feature column: {0}")]
    DuplicateColumn(String),

    /// A cell of a sample file is not a number,
    /// or a target cell is not a class index.
    #[error("Invalid value {value:?} at row {row}, column {column}")]
    InvalidValue { row: usize, column: usize, value: String },

    /// Scoring needs a sample with a target column.
    #[error("The sample has no target column")]
    MissingTarget,

    #[error("Unknown class {class} at row {row}")]
    UnknownClass { row: usize, class: usize },

    #[error("Got {predicted} predictions for {actual} labels")]
    LabelCountMismatch { actual: usize, predicted: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl TreeError {
    /// Shorthand for [`TreeError::MalformedModel`].
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedModel(message.into())
    }

    /// Returns `true` for the call-time errors caused by a bad feature vector.
    pub fn is_invalid_feature_vector(&self) -> bool {
        matches!(
            self,
            Self::InvalidFeatureVector { .. }
            | Self::FeatureIndexOutOfRange { .. }
        )
    }

    /// Returns `true` for the construction-time error.
    pub fn is_malformed_model(&self) -> bool {
        matches!(self, Self::MalformedModel(_))
    }
}

/// Result type used throughout this crate.
pub type Result<T> = std::result::Result<T, TreeError>;
