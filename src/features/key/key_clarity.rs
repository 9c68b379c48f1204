//! Key clarity scoring
//!
//! Estimates how clearly one key stands out from the rest.

/// Compute key clarity from key scores
///
/// # Arguments
///
/// * `scores` - All 24 key scores, in any order
///
/// # Returns
///
/// `(best - second_best) / best` in [0, 1]; 0 when the best score is not positive
/// or fewer than two scores are given
pub fn compute_key_clarity(scores: &[f64]) -> f64 {
    let mut best = f64::NEG_INFINITY;
    let mut second = f64::NEG_INFINITY;
    for &s in scores {
        if s > best {
            second = best;
            best = s;
        } else if s > second {
            second = s;
        }
    }

    if scores.len() < 2 || best <= 0.0 {
        return 0.0;
    }

    ((best - second) / best).clamp(0.0, 1.0)
}
