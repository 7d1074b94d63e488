//! Synthetic Gaussian blob generation for classification exercises.
//!
//! Points are drawn from one isotropic Gaussian per cluster. Centers are either
//! sampled uniformly from a bounding box or supplied by the caller.

use ndarray::{s, Array1, Array2, Axis};
use ndarray_rand::RandomExt;
use rand::distributions::Uniform;
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;
use tracing::{debug, instrument};

use crate::error::BlobError;

/// How cluster centers are chosen.
#[derive(Clone, Debug, PartialEq)]
pub enum Centers {
    /// Draw this many centers uniformly from the center box.
    Random(usize),
    /// Use these `(clusters, features)` centers as given.
    Fixed(Array2<f64>),
}

/// How many samples each cluster receives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SampleCount {
    /// Split the total as evenly as possible; earlier clusters take the remainder.
    Total(usize),
    /// An explicit count for every cluster.
    PerCluster(Vec<usize>),
}

/// Standard deviation of points around their center.
#[derive(Clone, Debug, PartialEq)]
pub enum Spread {
    /// The same deviation for every cluster.
    Uniform(f64),
    /// One deviation per cluster.
    PerCluster(Vec<f64>),
}

/// Parameters for [`make_blobs`].
#[derive(Clone, Debug, PartialEq)]
pub struct BlobConfig {
    /// Samples per cluster.
    pub samples: SampleCount,
    /// Dimensionality of random centers. Ignored for [`Centers::Fixed`].
    pub features: usize,
    /// Center selection.
    pub centers: Centers,
    /// Per-cluster standard deviation.
    pub spread: Spread,
    /// `(low, high)` bounds for random center coordinates.
    pub center_box: (f64, f64),
    /// Permute rows after generation.
    pub shuffle: bool,
    /// RNG seed; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for BlobConfig {
    fn default() -> Self {
        Self {
            samples: SampleCount::Total(10),
            features: 2,
            centers: Centers::Random(2),
            spread: Spread::Uniform(6.0),
            center_box: (-10.0, 10.0),
            shuffle: true,
            seed: None,
        }
    }
}

impl BlobConfig {
    #[must_use]
    pub fn with_samples(mut self, total: usize) -> Self {
        self.samples = SampleCount::Total(total);
        self
    }

    #[must_use]
    pub fn with_samples_per_cluster(mut self, counts: Vec<usize>) -> Self {
        self.samples = SampleCount::PerCluster(counts);
        self
    }

    #[must_use]
    pub fn with_features(mut self, features: usize) -> Self {
        self.features = features;
        self
    }

    #[must_use]
    pub fn with_clusters(mut self, clusters: usize) -> Self {
        self.centers = Centers::Random(clusters);
        self
    }

    #[must_use]
    pub fn with_centers(mut self, centers: Array2<f64>) -> Self {
        self.centers = Centers::Fixed(centers);
        self
    }

    #[must_use]
    pub fn with_spread(mut self, spread: f64) -> Self {
        self.spread = Spread::Uniform(spread);
        self
    }

    #[must_use]
    pub fn with_cluster_spreads(mut self, spreads: Vec<f64>) -> Self {
        self.spread = Spread::PerCluster(spreads);
        self
    }

    #[must_use]
    pub fn with_center_box(mut self, low: f64, high: f64) -> Self {
        self.center_box = (low, high);
        self
    }

    #[must_use]
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Output of [`make_blobs`].
#[derive(Clone, Debug, PartialEq)]
pub struct Blobs {
    /// `(samples, features)` point matrix.
    pub points: Array2<f64>,
    /// Cluster index of every point.
    pub labels: Array1<usize>,
    /// `(clusters, features)` centers the points were drawn around.
    pub centers: Array2<f64>,
}

/// Generates `cluster_count` Gaussian blobs with standard deviation `spread`.
///
/// Centers are drawn from `[-10, 10)` on each axis and the RNG is seeded from
/// entropy, so repeated calls differ. Use [`make_blobs`] with
/// [`BlobConfig::with_seed`] for reproducible data.
///
/// # Errors
/// Returns [`BlobError`] when a count is zero or `spread` is negative or not
/// finite.
pub fn get_classification_data(
    spread: f64,
    sample_count: usize,
    feature_count: usize,
    cluster_count: usize,
) -> Result<(Array2<f64>, Array1<usize>), BlobError> {
    let config = BlobConfig::default()
        .with_spread(spread)
        .with_samples(sample_count)
        .with_features(feature_count)
        .with_clusters(cluster_count);
    let blobs = make_blobs(&config)?;
    Ok((blobs.points, blobs.labels))
}

/// Generates labeled Gaussian blobs according to `config`.
///
/// Without shuffling, rows are grouped by label in ascending order.
///
/// # Errors
/// Returns [`BlobError`] when the configuration is invalid.
#[instrument(
    level = "debug",
    err,
    skip(config),
    fields(shuffle = config.shuffle, seeded = config.seed.is_some())
)]
pub fn make_blobs(config: &BlobConfig) -> Result<Blobs, BlobError> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let centers = resolve_centers(config, &mut rng)?;
    let n_clusters = centers.nrows();
    let n_features = centers.ncols();
    let counts = samples_per_cluster(&config.samples, n_clusters)?;
    let spreads = spreads_per_cluster(&config.spread, n_clusters)?;
    let n_samples = counts
        .iter()
        .try_fold(0_usize, |acc, &count| acc.checked_add(count))
        .ok_or(BlobError::Overflow)?;
    // ndarray caps the element count at isize::MAX.
    check_element_count(n_samples, n_features)?;

    let mut points = Array2::<f64>::zeros((n_samples, n_features));
    let mut labels = Array1::<usize>::zeros(n_samples);
    let mut start = 0;
    for (label, ((center, &count), &spread)) in centers
        .axis_iter(Axis(0))
        .zip(&counts)
        .zip(&spreads)
        .enumerate()
    {
        let end = start + count;
        let noise = Array2::random_using((count, n_features), Normal::new(0.0, spread)?, &mut rng);
        points.slice_mut(s![start..end, ..]).assign(&(noise + &center));
        labels.slice_mut(s![start..end]).fill(label);
        start = end;
    }

    if config.shuffle {
        let mut order: Vec<usize> = (0..n_samples).collect();
        order.shuffle(&mut rng);
        points = points.select(Axis(0), &order);
        labels = labels.select(Axis(0), &order);
    }

    debug!(
        samples = n_samples,
        features = n_features,
        clusters = n_clusters,
        "generated blobs"
    );
    Ok(Blobs {
        points,
        labels,
        centers,
    })
}

fn resolve_centers(config: &BlobConfig, rng: &mut StdRng) -> Result<Array2<f64>, BlobError> {
    match &config.centers {
        Centers::Random(0) => Err(BlobError::ZeroClusters),
        Centers::Random(clusters) => {
            if config.features == 0 {
                return Err(BlobError::ZeroFeatures);
            }
            check_element_count(*clusters, config.features)?;
            let (low, high) = config.center_box;
            let span_ok = low.is_finite() && high.is_finite() && (high - low).is_finite();
            if !span_ok || low >= high {
                return Err(BlobError::InvalidCenterBox { low, high });
            }
            Ok(Array2::random_using(
                (*clusters, config.features),
                Uniform::new(low, high),
                rng,
            ))
        }
        Centers::Fixed(centers) => {
            if centers.nrows() == 0 {
                return Err(BlobError::ZeroClusters);
            }
            if centers.ncols() == 0 {
                return Err(BlobError::ZeroFeatures);
            }
            if let Some(cluster) = centers
                .axis_iter(Axis(0))
                .position(|row| row.iter().any(|v| !v.is_finite()))
            {
                return Err(BlobError::NonFiniteCenter { cluster });
            }
            Ok(centers.clone())
        }
    }
}

// ndarray caps the element count of an array at isize::MAX.
fn check_element_count(rows: usize, cols: usize) -> Result<(), BlobError> {
    rows.checked_mul(cols)
        .filter(|&elements| isize::try_from(elements).is_ok())
        .map(|_| ())
        .ok_or(BlobError::Overflow)
}

fn samples_per_cluster(samples: &SampleCount, n_clusters: usize) -> Result<Vec<usize>, BlobError> {
    match samples {
        SampleCount::Total(total) => {
            let base = total / n_clusters;
            let remainder = total % n_clusters;
            Ok((0..n_clusters)
                .map(|i| base + usize::from(i < remainder))
                .collect())
        }
        SampleCount::PerCluster(counts) if counts.len() != n_clusters => {
            Err(BlobError::SampleCountMismatch {
                expected: n_clusters,
                actual: counts.len(),
            })
        }
        SampleCount::PerCluster(counts) => Ok(counts.clone()),
    }
}

fn spreads_per_cluster(spread: &Spread, n_clusters: usize) -> Result<Vec<f64>, BlobError> {
    let spreads = match spread {
        Spread::Uniform(value) => vec![*value; n_clusters],
        Spread::PerCluster(values) if values.len() != n_clusters => {
            return Err(BlobError::SpreadCountMismatch {
                expected: n_clusters,
                actual: values.len(),
            });
        }
        Spread::PerCluster(values) => values.clone(),
    };
    if let Some((cluster, &value)) = spreads
        .iter()
        .enumerate()
        .find(|(_, v)| !v.is_finite() || **v < 0.0)
    {
        return Err(BlobError::InvalidSpread { cluster, value });
    }
    Ok(spreads)
}
