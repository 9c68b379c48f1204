//! Key detection algorithm
//!
//! Correlates a pitch-class histogram against the 24 rotated Krumhansl-Kessler
//! profiles and keeps the best match. When a minor profile wins, the key is
//! further classified as natural or harmonic minor.
//!
//! # Reference
//!
//! Krumhansl, C. L., & Kessler, E. J. (1982). Tracing the Dynamic Changes in Perceived
//! Tonal Organization in a Spatial Representation of Musical Keys. *Psychological Review*,
//! 89(4), 334-368.

use super::{
    compute_key_clarity,
    minor_mode::classify_minor,
    templates::{KeyTemplates, Tonality},
    KeyDetectionResult,
};
use crate::analysis::result::{KeyEstimate, Mode, PitchClass};
use crate::config::AnalysisConfig;
use crate::features::chroma::{PitchClassHistogram, NUM_PITCH_CLASSES};

/// Detect tonic and mode from a pitch-class histogram
///
/// Scores are dot products of the histogram with each rotated profile. Candidates
/// are visited major first, then minor, with tonics 0..11 inside each; a later
/// candidate replaces the current best only when its score is strictly greater.
/// An all-zero histogram therefore resolves to C major.
///
/// # Arguments
///
/// * `hist` - Histogram covering the whole analysis window
/// * `templates` - Key profiles
/// * `config` - Supplies the harmonic minor thresholds
///
/// # Example
///
/// ```
/// use harmonic_sidecar::features::chroma::PitchClassHistogram;
/// use harmonic_sidecar::features::key::{detect_key, KeyTemplates};
/// use harmonic_sidecar::analysis::result::Mode;
/// use harmonic_sidecar::AnalysisConfig;
///
/// let mut bins = [0.0; 12];
/// bins[0] = 3.0;
/// bins[4] = 2.0;
/// bins[7] = 2.0;
/// let hist = PitchClassHistogram::from_bins(bins);
/// let result = detect_key(&hist, &KeyTemplates::new(), &AnalysisConfig::default());
/// assert_eq!(result.key.tonic.name(), "C");
/// assert_eq!(result.key.mode, Mode::Major);
/// ```
pub fn detect_key(
    hist: &PitchClassHistogram,
    templates: &KeyTemplates,
    config: &AnalysisConfig,
) -> KeyDetectionResult {
    log::debug!("Detecting key from histogram with total weight {:.1}", hist.total());

    let mut all_scores = Vec::with_capacity(2 * NUM_PITCH_CLASSES);
    let mut best: Option<(Tonality, usize, f64)> = None;

    for tonality in Tonality::SCAN_ORDER {
        for tonic in 0..NUM_PITCH_CLASSES {
            let score = hist.dot(&templates.template(tonality, tonic));
            all_scores.push((tonality, PitchClass::new(tonic), score));
            match best {
                Some((_, _, best_score)) if score <= best_score => {}
                _ => best = Some((tonality, tonic, score)),
            }
        }
    }

    let (tonality, tonic, score) = best.unwrap_or((Tonality::Major, 0, 0.0));
    let tonic = PitchClass::new(tonic);

    let mode = match tonality {
        Tonality::Major => Mode::Major,
        Tonality::Minor => classify_minor(
            hist,
            tonic,
            config.harmonic_minor_margin,
            config.harmonic_minor_floor,
        ),
    };

    let raw_scores: Vec<f64> = all_scores.iter().map(|&(_, _, s)| s).collect();
    let clarity = compute_key_clarity(&raw_scores);

    log::debug!(
        "Best key candidate: {} {:?} (score={:.2}, clarity={:.3})",
        tonic,
        tonality,
        score,
        clarity
    );

    KeyDetectionResult {
        key: KeyEstimate::new(tonic, mode),
        score,
        clarity,
        all_scores,
    }
}
