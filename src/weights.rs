use rand::Rng;
use rand_distr::{Distribution, WeightedIndex};

/// Round half up to `decimals` places (inputs here are never negative).
pub fn round_half_up(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor + 0.5).floor() / factor
}

/// Per-position probability that a character of a `len`-character word is mistyped.
///
/// The first position never is. From the second position onwards the weight ramps
/// linearly from 0.1 to 0.2; the result is normalised and rounded to two decimals,
/// so it sums to roughly (not exactly) 1.
pub fn position_weights(len: usize) -> Vec<f64> {
    match len {
        0 => Vec::new(),
        1 => vec![0.0],
        2 => vec![0.0, 1.0],
        n => {
            let span = (n - 2) as f64;
            let mut weights = Vec::with_capacity(n);
            weights.push(0.0);
            weights.extend((0..n - 1).map(|i| 0.1 + (0.2 - 0.1) * (i as f64 / span)));

            let total: f64 = weights.iter().sum();
            weights
                .into_iter()
                .map(|w| round_half_up(w / total, 2))
                .collect()
        }
    }
}

/// Normalise to sum 1, then round each weight to two decimals.
pub fn normalize_rounded(weights: &[f64]) -> Vec<f64> {
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return vec![0.0; weights.len()];
    }
    weights
        .iter()
        .map(|w| round_half_up(w / total, 2))
        .collect()
}

/// Sample an index proportionally to `weights`.
///
/// Returns `None` when nothing can be sampled (empty, all zero, or a
/// non-finite weight). Sums need not be exactly 1.
pub fn pick_weighted(weights: &[f64], rng: &mut impl Rng) -> Option<usize> {
    WeightedIndex::new(weights)
        .ok()
        .map(|dist| dist.sample(rng))
}
