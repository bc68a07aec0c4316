//! Roulette-wheel selection.
//!
//! Item `i` is chosen with probability `weights[i] / sum(weights)`.

use tracing::trace;
use crate::{RandomSource, Result, SelectionError};

/// Check that `len` items line up with positive, finite weights and return
/// their sum.
pub(crate) fn validate_weights(len: usize, weights: &[f64]) -> Result<f64> {
    if len == 0 {
        return Err(SelectionError::no_participants());
    }
    if len != weights.len() {
        return Err(SelectionError::LengthMismatch {
            participants: len,
            weights: weights.len(),
        });
    }
    if let Some((index, &weight)) = weights
        .iter()
        .enumerate()
        .find(|(_, w)| !w.is_finite() || **w <= 0.0)
    {
        return Err(SelectionError::NonPositiveWeight { index, weight });
    }
    Ok(weights.iter().sum())
}

/// Index picked by a draw `r` in `[0, total)`.
///
/// Walks the cumulative weights and returns the first index whose running sum
/// exceeds `r`. If rounding keeps the sum from ever exceeding `r`, the last
/// index is returned. `weights` must be non-empty.
pub fn pick_index(weights: &[f64], r: f64) -> usize {
    let mut cumulative = 0.0;
    for (i, weight) in weights.iter().enumerate() {
        cumulative += weight;
        if r < cumulative {
            return i;
        }
    }
    weights.len().saturating_sub(1)
}

/// Deterministic selection for an explicit draw `r`.
pub fn select_at<'a, T>(items: &'a [T], weights: &[f64], r: f64) -> Result<&'a T> {
    validate_weights(items.len(), weights)?;
    Ok(&items[pick_index(weights, r)])
}

/// Weighted random index into `weights`.
pub fn weighted_random_index<R>(weights: &[f64], rng: &mut R) -> Result<usize>
where
    R: RandomSource + ?Sized,
{
    let total = validate_weights(weights.len(), weights)?;
    Ok(draw(weights, total, rng))
}

/// Weighted random selection using the given random source.
pub fn weighted_random_select<'a, T, R>(
    items: &'a [T],
    weights: &[f64],
    rng: &mut R,
) -> Result<&'a T>
where
    R: RandomSource + ?Sized,
{
    let total = validate_weights(items.len(), weights)?;
    Ok(&items[draw(weights, total, rng)])
}

fn draw<R: RandomSource + ?Sized>(weights: &[f64], total: f64, rng: &mut R) -> usize {
    let r = rng.next_unit() * total;
    let index = pick_index(weights, r);
    trace!(r, total, index, "roulette draw");
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SequenceSource;

    #[test]
    fn test_pick_walks_cumulative_weights() {
        let weights = [10.0, 1.0, 1.0];
        assert_eq!(pick_index(&weights, 0.0), 0);
        assert_eq!(pick_index(&weights, 5.0), 0);
        assert_eq!(pick_index(&weights, 9.999), 0);
        assert_eq!(pick_index(&weights, 10.0), 1);
        assert_eq!(pick_index(&weights, 10.5), 1);
        assert_eq!(pick_index(&weights, 11.5), 2);
    }

    #[test]
    fn test_overshoot_falls_back_to_last() {
        let weights = [0.1, 0.2];
        assert_eq!(pick_index(&weights, 0.3000001), 1);
        assert_eq!(pick_index(&weights, 100.0), 1);
    }

    #[test]
    fn test_select_at_is_deterministic() {
        let items = ["a", "b", "c"];
        let weights = [2.0, 3.0, 5.0];
        for _ in 0..10 {
            assert_eq!(select_at(&items, &weights, 4.0).unwrap(), &"b");
        }
    }

    #[test]
    fn test_random_select_scales_unit_draw() {
        let items = ["a", "b", "c"];
        let weights = [10.0, 1.0, 1.0];
        let mut rng = SequenceSource::new(vec![5.0 / 12.0, 10.5 / 12.0, 11.5 / 12.0]);

        assert_eq!(weighted_random_select(&items, &weights, &mut rng).unwrap(), &"a");
        assert_eq!(weighted_random_select(&items, &weights, &mut rng).unwrap(), &"b");
        assert_eq!(weighted_random_select(&items, &weights, &mut rng).unwrap(), &"c");
    }

    #[test]
    fn test_index_and_item_draws_agree() {
        let items = ["a", "b", "c"];
        let weights = [10.0, 1.0, 1.0];
        let draws = vec![0.1, 0.85, 0.95];

        let mut by_index = SequenceSource::new(draws.clone());
        let mut by_item = SequenceSource::new(draws);
        for _ in 0..3 {
            let index = weighted_random_index(&weights, &mut by_index).unwrap();
            let item = weighted_random_select(&items, &weights, &mut by_item).unwrap();
            assert_eq!(&items[index], item);
        }
        assert!(weighted_random_index(&[], &mut by_index).is_err());
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let items: [&str; 0] = [];
        let err = select_at(&items, &[], 0.0).unwrap_err();
        assert_eq!(err, SelectionError::no_participants());
    }

    #[test]
    fn test_mismatched_lengths_are_rejected() {
        let err = select_at(&["a", "b"], &[1.0], 0.0).unwrap_err();
        assert_eq!(err, SelectionError::LengthMismatch { participants: 2, weights: 1 });
    }

    #[test]
    fn test_non_positive_weights_are_rejected() {
        let err = select_at(&["a", "b"], &[1.0, 0.0], 0.0).unwrap_err();
        assert!(matches!(err, SelectionError::NonPositiveWeight { index: 1, .. }));

        let err = select_at(&["a"], &[f64::NAN], 0.0).unwrap_err();
        assert!(matches!(err, SelectionError::NonPositiveWeight { index: 0, .. }));
    }
}
