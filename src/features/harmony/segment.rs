//! Segment harmonization
//!
//! Picks the diatonic triad that covers the most weighted pitch content of a
//! tick segment.

use serde::{Deserialize, Serialize};

use super::theory::{roman_label, triad_pitch_classes, RomanNumeral, NUM_DEGREES};
use crate::analysis::result::KeyEstimate;
use crate::features::chroma::{pitch_class_histogram, PitchClassHistogram};
use crate::preprocessing::intervals::NoteInterval;

/// Best chord for a segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentChord {
    /// Winning roman numeral
    pub roman: RomanNumeral,
    /// Fraction of the segment's weight on the triad's pitch classes (0.0-1.0)
    pub coverage: f64,
}

/// Weight of a histogram on the distinct pitch classes of a triad
pub fn triad_score(hist: &PitchClassHistogram, key: &KeyEstimate, degree: usize) -> f64 {
    let mut seen = [false; 12];
    let mut score = 0.0;
    for pc in triad_pitch_classes(key.tonic, key.mode, degree) {
        if !std::mem::replace(&mut seen[pc.index()], true) {
            score += hist[pc.index()];
        }
    }
    score
}

/// Choose the best diatonic chord for a precomputed histogram
///
/// Degrees are scanned I..VII and a later degree wins only with a strictly
/// higher score, so ties go to the lowest degree. A silent histogram yields
/// degree I with coverage 0.
pub fn best_chord_for_histogram(hist: &PitchClassHistogram, key: &KeyEstimate) -> SegmentChord {
    let total = hist.total();
    if total <= 0.0 {
        return SegmentChord {
            roman: roman_label(key.mode, 0),
            coverage: 0.0,
        };
    }

    let mut best_degree = 0;
    let mut best_score = triad_score(hist, key, 0);
    for degree in 1..NUM_DEGREES {
        let score = triad_score(hist, key, degree);
        if score > best_score {
            best_score = score;
            best_degree = degree;
        }
    }

    SegmentChord {
        roman: roman_label(key.mode, best_degree),
        coverage: best_score / total,
    }
}

/// Choose the best diatonic chord for the notes sounding in `[start_tick, end_tick)`
pub fn best_chord_for_segment(
    notes: &[NoteInterval],
    key: &KeyEstimate,
    start_tick: u64,
    end_tick: u64,
) -> SegmentChord {
    let hist = pitch_class_histogram(notes, start_tick, end_tick);
    let chord = best_chord_for_histogram(&hist, key);
    log::debug!(
        "Segment [{}, {}): {} (coverage {:.3})",
        start_tick,
        end_tick,
        chord.roman,
        chord.coverage
    );
    chord
}
