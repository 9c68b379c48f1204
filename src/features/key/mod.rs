//! Key detection modules
//!
//! Detect tonal center and mode using:
//! - Krumhansl-Kessler templates (24 keys)
//! - Template matching by dot product
//! - Natural vs. harmonic minor classification
//! - Key clarity scoring

pub mod detector;
pub mod key_clarity;
pub mod minor_mode;
pub mod templates;

pub use detector::detect_key;
pub use key_clarity::compute_key_clarity;
pub use minor_mode::{classify_minor, is_harmonic_minor};
pub use templates::{KeyTemplates, Tonality};

use crate::analysis::result::{KeyEstimate, PitchClass};

/// Key detection result
#[derive(Debug, Clone)]
pub struct KeyDetectionResult {
    /// Detected key (best match, minor variant resolved)
    pub key: KeyEstimate,

    /// Dot-product score of the winning template
    pub score: f64,

    /// Key clarity (0.0-1.0), margin of the best score over the runner-up
    pub clarity: f64,

    /// All 24 scores in scan order (major C..B, then minor C..B)
    pub all_scores: Vec<(Tonality, PitchClass, f64)>,
}
