//! Error types for blob generation, accuracy scoring and the baseline classifier.

/// Errors raised while generating synthetic blobs.
#[derive(Debug, thiserror::Error)]
pub enum BlobError {
    /// The requested cluster count was zero.
    #[error("cluster count must be greater than zero")]
    ZeroClusters,
    /// The requested feature count was zero.
    #[error("feature count must be greater than zero")]
    ZeroFeatures,
    /// Per-cluster sample counts did not match the number of clusters.
    #[error("per-cluster sample counts length mismatch: expected {expected}, got {actual}")]
    SampleCountMismatch {
        /// Number of clusters.
        expected: usize,
        /// Number of sample counts supplied.
        actual: usize,
    },
    /// Per-cluster spreads did not match the number of clusters.
    #[error("per-cluster spreads length mismatch: expected {expected}, got {actual}")]
    SpreadCountMismatch {
        /// Number of clusters.
        expected: usize,
        /// Number of spreads supplied.
        actual: usize,
    },
    /// A spread was negative or not finite.
    #[error("spread for cluster {cluster} must be finite and non-negative (got {value})")]
    InvalidSpread {
        /// Zero-based cluster index.
        cluster: usize,
        /// Offending value.
        value: f64,
    },
    /// The center box was not a finite, non-empty interval.
    #[error("invalid center box ({low}, {high}); expected finite bounds with low < high")]
    InvalidCenterBox {
        /// Lower bound.
        low: f64,
        /// Upper bound.
        high: f64,
    },
    /// A fixed center contained a non-finite coordinate.
    #[error("center {cluster} contains a non-finite coordinate")]
    NonFiniteCenter {
        /// Zero-based cluster index.
        cluster: usize,
    },
    /// A requested sample count or array size exceeded what ndarray can hold.
    #[error("requested sample count or array size is too large")]
    Overflow,
    /// The normal distribution rejected its parameters.
    #[error("failed to build normal distribution: {0}")]
    Distribution(#[from] rand_distr::NormalError),
}

/// Errors raised while scoring predictions against labels.
#[derive(Debug, thiserror::Error, Eq, PartialEq)]
pub enum AccuracyError {
    /// Predictions and labels had different lengths.
    #[error("label length mismatch: predictions={predictions_len}, labels={labels_len}")]
    LengthMismatch {
        /// Number of predictions.
        predictions_len: usize,
        /// Number of true labels.
        labels_len: usize,
    },
    /// There was nothing to score.
    #[error("cannot compute accuracy of empty label vectors")]
    Empty,
}

/// Errors raised by the nearest-centroid classifier.
#[derive(Debug, thiserror::Error, Eq, PartialEq)]
pub enum ClassifierError {
    /// The training set had no rows.
    #[error("training set must contain at least one point")]
    EmptyTrainingSet,
    /// Point and label counts differed.
    #[error("point/label count mismatch: points={points}, labels={labels}")]
    LengthMismatch {
        /// Number of points.
        points: usize,
        /// Number of labels.
        labels: usize,
    },
    /// Points to classify had a different dimensionality than the training set.
    #[error("feature dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Dimensionality seen during fitting.
        expected: usize,
        /// Dimensionality of the query points.
        actual: usize,
    },
}

/// Any error produced by this crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Blob generation failed.
    #[error(transparent)]
    Blob(#[from] BlobError),
    /// Accuracy scoring failed.
    #[error(transparent)]
    Accuracy(#[from] AccuracyError),
    /// Classification failed.
    #[error(transparent)]
    Classifier(#[from] ClassifierError),
}

/// Convenient result alias for crate-level operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
