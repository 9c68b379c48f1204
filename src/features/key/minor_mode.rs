//! Natural vs. harmonic minor classification
//!
//! A minor key is called harmonic when its leading tone (a semitone below the
//! tonic) clearly outweighs the natural minor seventh (a whole tone below).

use crate::analysis::result::{Mode, PitchClass};
use crate::features::chroma::{pitch_class_fraction, PitchClassHistogram};

/// Decide harmonic minor from the two fractional weights
///
/// Harmonic iff `leading_tone > natural_seventh + margin` and
/// `leading_tone > floor`. Both comparisons are strict.
pub fn is_harmonic_minor(leading_tone: f64, natural_seventh: f64, margin: f64, floor: f64) -> bool {
    leading_tone > natural_seventh + margin && leading_tone > floor
}

/// Classify a minor key on `tonic` as natural or harmonic minor
pub fn classify_minor(
    hist: &PitchClassHistogram,
    tonic: PitchClass,
    margin: f64,
    floor: f64,
) -> Mode {
    let leading_tone = pitch_class_fraction(hist, tonic.transpose(11).index());
    let natural_seventh = pitch_class_fraction(hist, tonic.transpose(10).index());

    log::debug!(
        "Minor seventh weights on {}: leading tone {:.4}, natural seventh {:.4}",
        tonic,
        leading_tone,
        natural_seventh
    );

    if is_harmonic_minor(leading_tone, natural_seventh, margin, floor) {
        Mode::MinorHarmonic
    } else {
        Mode::MinorNatural
    }
}
