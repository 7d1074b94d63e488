//! Demo binary: generate blobs, fit a nearest-centroid classifier on every
//! other sample, and report its accuracy on the rest.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use ndarray::{Array2, Axis};
use tracing::{error, info};

use blobkit::logging::{self, LoggingError};
use blobkit::{accuracy_score, make_blobs, AccuracyScore, BlobConfig, NearestCentroid};

/// Generate synthetic blobs and score a nearest-centroid baseline on them.
#[derive(Debug, Parser)]
#[command(name = "blobkit", version)]
struct Cli {
    /// Standard deviation of each blob.
    #[arg(long, default_value_t = 6.0)]
    spread: f64,
    /// Total number of samples.
    #[arg(long, default_value_t = 100)]
    samples: usize,
    /// Dimensionality of each sample.
    #[arg(long, default_value_t = 2)]
    features: usize,
    /// Number of blobs.
    #[arg(long, default_value_t = 2)]
    clusters: usize,
    /// Seed for reproducible data.
    #[arg(long)]
    seed: Option<u64>,
    /// Keep samples grouped by label.
    #[arg(long)]
    no_shuffle: bool,
}

impl Cli {
    fn blob_config(&self) -> BlobConfig {
        let config = BlobConfig::default()
            .with_spread(self.spread)
            .with_samples(self.samples)
            .with_features(self.features)
            .with_clusters(self.clusters)
            .with_shuffle(!self.no_shuffle);
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}

#[derive(Debug)]
struct Summary {
    train_samples: usize,
    score: AccuracyScore,
    centers: Array2<f64>,
}

fn run(cli: &Cli) -> Result<Summary> {
    let blobs = make_blobs(&cli.blob_config()).context("failed to generate blobs")?;

    // Alternate rows so both halves see every label even when unshuffled.
    let (train, test): (Vec<usize>, Vec<usize>) =
        (0..blobs.labels.len()).partition(|index| index % 2 == 0);

    let model = NearestCentroid::fit(
        &blobs.points.select(Axis(0), &train),
        &blobs.labels.select(Axis(0), &train),
    )
    .context("failed to fit classifier")?;
    let predictions = model
        .predict(&blobs.points.select(Axis(0), &test))
        .context("failed to classify test samples")?;
    let score = accuracy_score(&predictions, &blobs.labels.select(Axis(0), &test))
        .context("failed to score predictions")?;

    info!(
        accuracy = score.percentage,
        correct = score.correct,
        total = score.total,
        "evaluation finished"
    );
    Ok(Summary {
        train_samples: train.len(),
        score,
        centers: blobs.centers,
    })
}

fn render_summary(summary: &Summary, writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer, "train samples: {}", summary.train_samples)?;
    writeln!(
        writer,
        "test accuracy: {:.2}% ({}/{})",
        summary.score.percentage, summary.score.correct, summary.score.total
    )?;
    writeln!(writer, "centers:")?;
    for (cluster, center) in summary.centers.axis_iter(Axis(0)).enumerate() {
        writeln!(writer, "  {cluster}: {center:.3}")?;
    }
    Ok(())
}

fn try_main() -> Result<()> {
    let cli = Cli::parse();
    let summary = run(&cli)?;
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    render_summary(&summary, &mut writer).context("failed to render summary")?;
    writer.flush().context("failed to flush output")?;
    Ok(())
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    if let Err(err) = try_main() {
        let message = format!("{err:#}");
        error!(error = %message, "command execution failed");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialize logging: {err}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("blobkit").chain(args.iter().copied()))
            .expect("valid arguments")
    }

    #[test]
    fn defaults_follow_blob_config() {
        let config = cli(&[]).blob_config();
        assert_eq!(config.seed, None);
        assert!(config.shuffle);
        assert_eq!(config.features, 2);
    }

    #[test]
    fn seeded_run_splits_samples_in_half() {
        let summary = run(&cli(&[
            "--spread", "0.5", "--samples", "60", "--clusters", "3", "--seed", "9",
        ]))
        .expect("run succeeds");
        assert_eq!(summary.train_samples, 30);
        assert_eq!(summary.score.total, 30);
        assert_eq!(summary.centers.nrows(), 3);
    }

    #[test]
    fn single_sample_has_nothing_to_score() {
        assert!(run(&cli(&["--samples", "1", "--seed", "1"])).is_err());
    }

    #[test]
    fn summary_lists_accuracy_and_centers() {
        let summary = Summary {
            train_samples: 4,
            score: AccuracyScore {
                correct: 3,
                total: 4,
                percentage: 75.0,
            },
            centers: array![[1.0, -2.5]],
        };
        let mut out = Vec::new();
        render_summary(&summary, &mut out).expect("write to vec");
        let text = String::from_utf8(out).expect("utf-8 output");
        assert!(text.contains("train samples: 4"));
        assert!(text.contains("test accuracy: 75.00% (3/4)"));
        assert!(text.contains("  0: [1.000, -2.500]"));
    }
}
