//! Histogram normalization
//!
//! Histograms are stored unnormalized; callers that need proportions convert
//! weights to fractions of the total here.

use super::histogram::{PitchClassHistogram, NUM_PITCH_CLASSES};

/// Added to the total before dividing so that silent histograms yield zeros
pub const TOTAL_EPSILON: f64 = 1e-9;

/// Fraction of the histogram's total weight held by one pitch class
pub fn pitch_class_fraction(hist: &PitchClassHistogram, pitch_class: usize) -> f64 {
    hist.weight(pitch_class) / (hist.total() + TOTAL_EPSILON)
}

/// All twelve bins as fractions of the total weight
pub fn normalize_to_fractions(hist: &PitchClassHistogram) -> [f64; NUM_PITCH_CLASSES] {
    let total = hist.total() + TOTAL_EPSILON;
    let mut fractions = [0.0; NUM_PITCH_CLASSES];
    for (out, w) in fractions.iter_mut().zip(hist.bins().iter()) {
        *out = w / total;
    }
    fractions
}
