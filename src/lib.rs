//! Synthetic classification data and accuracy scoring for ML exercises.
//!
//! A typical exercise generates labeled blobs with [`get_classification_data`]
//! or [`make_blobs`], runs a classifier such as [`NearestCentroid`], then
//! scores its predictions with [`calc_accuracy`].

pub mod accuracy;
pub mod blobs;
pub mod classifier;
pub mod error;
pub mod logging;

pub use accuracy::{accuracy_score, calc_accuracy, AccuracyScore};
pub use blobs::{get_classification_data, make_blobs, BlobConfig, Blobs, Centers, SampleCount, Spread};
pub use classifier::{DistanceMetric, NearestCentroid};
pub use error::{AccuracyError, BlobError, ClassifierError, Error, Result};
