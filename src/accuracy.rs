//! Classification accuracy as a percentage of matching labels.

use ndarray::{ArrayBase, Data, Ix1};

use crate::error::AccuracyError;

/// Match counts behind an accuracy percentage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AccuracyScore {
    /// Positions where prediction and label agree.
    pub correct: usize,
    /// Number of positions compared.
    pub total: usize,
    /// `correct / total * 100`, in `[0.0, 100.0]`.
    pub percentage: f64,
}

/// Returns the percentage of positions at which `predictions` equals `labels`.
///
/// The comparison is symmetric, so argument order does not change the result.
///
/// # Errors
/// Returns [`AccuracyError::LengthMismatch`] when the vectors differ in length
/// and [`AccuracyError::Empty`] when both are empty.
pub fn calc_accuracy<A, S1, S2>(
    predictions: &ArrayBase<S1, Ix1>,
    labels: &ArrayBase<S2, Ix1>,
) -> Result<f64, AccuracyError>
where
    A: PartialEq,
    S1: Data<Elem = A>,
    S2: Data<Elem = A>,
{
    accuracy_score(predictions, labels).map(|score| score.percentage)
}

/// Like [`calc_accuracy`], but also returns the underlying counts.
///
/// # Errors
/// See [`calc_accuracy`].
pub fn accuracy_score<A, S1, S2>(
    predictions: &ArrayBase<S1, Ix1>,
    labels: &ArrayBase<S2, Ix1>,
) -> Result<AccuracyScore, AccuracyError>
where
    A: PartialEq,
    S1: Data<Elem = A>,
    S2: Data<Elem = A>,
{
    if predictions.len() != labels.len() {
        return Err(AccuracyError::LengthMismatch {
            predictions_len: predictions.len(),
            labels_len: labels.len(),
        });
    }
    let total = labels.len();
    if total == 0 {
        return Err(AccuracyError::Empty);
    }

    let correct = predictions
        .iter()
        .zip(labels.iter())
        .filter(|(prediction, label)| prediction == label)
        .count();
    // Scale before dividing so whole-number percentages come out exact.
    let percentage = (correct as f64 * 100.0) / total as f64;
    Ok(AccuracyScore {
        correct,
        total,
        percentage,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, aview1, Array1};
    use rstest::rstest;

    #[test]
    fn identical_vectors_score_full_marks() {
        let labels = array![0_usize, 1, 2, 1, 0];
        assert_eq!(calc_accuracy(&labels, &labels.view()), Ok(100.0));
    }

    #[test]
    fn fully_disagreeing_vectors_score_zero() {
        let predictions = array![1_usize, 0, 1, 0];
        let labels = array![0_usize, 1, 0, 1];
        assert_eq!(calc_accuracy(&predictions, &labels), Ok(0.0));
    }

    #[test]
    fn three_misses_out_of_ten_is_seventy_percent() {
        let labels = Array1::from(vec![0_usize, 1, 0, 1, 0, 1, 0, 1, 0, 1]);
        let mut predictions = labels.clone();
        for index in [1, 4, 8] {
            predictions[index] = 1 - predictions[index];
        }
        let score = accuracy_score(&predictions, &labels).expect("equal lengths");
        assert_eq!(score.correct, 7);
        assert_eq!(score.total, 10);
        assert_eq!(score.percentage, 70.0);
    }

    #[rstest]
    #[case(&[1, 2, 3], &[1, 2, 4])]
    #[case(&[0, 0, 1, 1, 2], &[2, 0, 1, 0, 2])]
    #[case(&[7], &[8])]
    fn accuracy_is_symmetric(#[case] left: &[i32], #[case] right: &[i32]) {
        assert_eq!(
            calc_accuracy(&aview1(left), &aview1(right)),
            calc_accuracy(&aview1(right), &aview1(left))
        );
    }

    #[test]
    fn non_integer_labels_compare_by_equality() {
        let predictions = aview1(&["cat", "dog", "dog"]);
        let labels = aview1(&["cat", "cat", "dog"]);
        let percentage = calc_accuracy(&predictions, &labels).expect("equal lengths");
        approx::assert_relative_eq!(percentage, 200.0 / 3.0);
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let err = calc_accuracy(&aview1(&[1, 2, 3]), &aview1(&[1, 2])).expect_err("mismatch");
        assert_eq!(
            err,
            AccuracyError::LengthMismatch {
                predictions_len: 3,
                labels_len: 2,
            }
        );
    }

    #[test]
    fn empty_vectors_are_rejected() {
        let empty: [usize; 0] = [];
        assert_eq!(
            calc_accuracy(&aview1(&empty), &aview1(&empty)),
            Err(AccuracyError::Empty)
        );
    }
}
