//! Nearest-centroid baseline classifier.

use std::collections::{BTreeMap, BTreeSet};

use ndarray::{Array1, Array2, ArrayBase, Axis, Data, Ix1, Ix2};
use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::error::ClassifierError;

/// Enum representing the distance metric to be used.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DistanceMetric {
    /// Squared Euclidean distance.
    #[default]
    Euclidean,
}

/// Classifier that labels each point with the class of the closest class mean.
#[derive(Clone, Debug, PartialEq)]
pub struct NearestCentroid {
    centroids: Array2<f64>,
    classes: Vec<usize>,
    metric: DistanceMetric,
}

impl NearestCentroid {
    /// Fits one centroid per label present in `labels`.
    ///
    /// # Errors
    /// Returns [`ClassifierError`] when there are no points or the point and
    /// label counts differ.
    #[instrument(level = "debug", err, skip_all, fields(samples = points.nrows()))]
    pub fn fit<S1, S2>(
        points: &ArrayBase<S1, Ix2>,
        labels: &ArrayBase<S2, Ix1>,
    ) -> Result<Self, ClassifierError>
    where
        S1: Data<Elem = f64>,
        S2: Data<Elem = usize>,
    {
        if points.nrows() != labels.len() {
            return Err(ClassifierError::LengthMismatch {
                points: points.nrows(),
                labels: labels.len(),
            });
        }
        if labels.is_empty() {
            return Err(ClassifierError::EmptyTrainingSet);
        }

        // Rows follow ascending label order; absent labels get no centroid.
        let rows: BTreeMap<usize, usize> = labels
            .iter()
            .copied()
            .collect::<BTreeSet<usize>>()
            .into_iter()
            .enumerate()
            .map(|(row, label)| (label, row))
            .collect();
        let classes: Vec<usize> = rows.keys().copied().collect();

        let mut centroids = Array2::<f64>::zeros((classes.len(), points.ncols()));
        let mut counts = vec![0_usize; classes.len()];
        points
            .axis_iter(Axis(0))
            .zip(labels.iter())
            .for_each(|(x, label)| {
                let row = rows[label];
                centroids.row_mut(row).zip_mut_with(&x, |a, &b| *a += b);
                counts[row] += 1;
            });
        centroids
            .axis_iter_mut(Axis(0))
            .zip(&counts)
            .for_each(|(mut c, &count)| {
                let count = count as f64;
                c.mapv_inplace(|v| v / count);
            });

        debug!(classes = classes.len(), "fitted nearest-centroid classifier");
        Ok(Self {
            centroids,
            classes,
            metric: DistanceMetric::default(),
        })
    }

    /// Switches the distance used by [`Self::predict`].
    #[must_use]
    pub fn with_metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = metric;
        self
    }

    /// Distance used by [`Self::predict`].
    #[must_use]
    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    /// Predicts the class of every row in `points`.
    ///
    /// # Errors
    /// Returns [`ClassifierError::DimensionMismatch`] when `points` has a
    /// different number of columns than the training data.
    pub fn predict<S>(&self, points: &ArrayBase<S, Ix2>) -> Result<Array1<usize>, ClassifierError>
    where
        S: Data<Elem = f64> + Sync,
    {
        if points.ncols() != self.centroids.ncols() {
            return Err(ClassifierError::DimensionMismatch {
                expected: self.centroids.ncols(),
                actual: points.ncols(),
            });
        }
        Ok(self
            .assign_centroids(points)
            .mapv(|index| self.classes[index]))
    }

    /// Class means, one row per entry of [`Self::classes`].
    #[must_use]
    pub fn centroids(&self) -> &Array2<f64> {
        &self.centroids
    }

    /// Labels seen during fitting, in ascending order.
    #[must_use]
    pub fn classes(&self) -> &[usize] {
        &self.classes
    }

    /// Assigns each sample the row index of its closest centroid.
    fn assign_centroids<S>(&self, points: &ArrayBase<S, Ix2>) -> Array1<usize>
    where
        S: Data<Elem = f64> + Sync,
    {
        let n_samples = points.nrows();
        let labels: Vec<usize> = (0..n_samples)
            .into_par_iter()
            .map(|i| {
                let x = points.row(i);
                let mut min_dist = f64::INFINITY;
                let mut min_j = 0;
                for (j, c) in self.centroids.axis_iter(Axis(0)).enumerate() {
                    let dist = self.compute_distance(&x, &c);
                    if dist < min_dist {
                        min_dist = dist;
                        min_j = j;
                    }
                }
                min_j
            })
            .collect();

        Array1::from(labels)
    }

    fn compute_distance<S1, S2>(&self, x: &ArrayBase<S1, Ix1>, y: &ArrayBase<S2, Ix1>) -> f64
    where
        S1: Data<Elem = f64>,
        S2: Data<Elem = f64>,
    {
        match self.metric {
            DistanceMetric::Euclidean => (x - y).mapv(|v| v * v).sum(),
        }
    }
}
