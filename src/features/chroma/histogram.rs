//! Duration-weighted pitch-class histograms
//!
//! Each bin holds the number of ticks that notes of that pitch class overlap
//! the query range `[start, end)`. Histograms are plain sums: building one is a
//! pure function of the note set and the range, and histograms of adjacent
//! ranges add up to the histogram of their union.

use std::ops::{Add, Index};

use crate::preprocessing::intervals::NoteInterval;

/// Number of pitch classes
pub const NUM_PITCH_CLASSES: usize = 12;

/// Twelve non-negative weights indexed by pitch class (0 = C, ..., 11 = B)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PitchClassHistogram {
    bins: [f64; NUM_PITCH_CLASSES],
}

impl PitchClassHistogram {
    /// Histogram with the given bin weights
    pub fn from_bins(bins: [f64; NUM_PITCH_CLASSES]) -> Self {
        Self { bins }
    }

    /// All bins
    pub fn bins(&self) -> &[f64; NUM_PITCH_CLASSES] {
        &self.bins
    }

    /// Weight of one pitch class (taken modulo 12)
    pub fn weight(&self, pitch_class: usize) -> f64 {
        self.bins[pitch_class % NUM_PITCH_CLASSES]
    }

    /// Sum of all bins
    pub fn total(&self) -> f64 {
        self.bins.iter().sum()
    }

    /// True when no note overlapped the range
    pub fn is_silent(&self) -> bool {
        self.total() <= 0.0
    }

    /// Dot product against a 12-element profile
    pub fn dot(&self, profile: &[f64; NUM_PITCH_CLASSES]) -> f64 {
        self.bins.iter().zip(profile.iter()).map(|(h, p)| h * p).sum()
    }
}

impl Index<usize> for PitchClassHistogram {
    type Output = f64;

    fn index(&self, pitch_class: usize) -> &f64 {
        &self.bins[pitch_class]
    }
}

impl Add for PitchClassHistogram {
    type Output = PitchClassHistogram;

    fn add(mut self, other: PitchClassHistogram) -> PitchClassHistogram {
        for (a, b) in self.bins.iter_mut().zip(other.bins.iter()) {
            *a += b;
        }
        self
    }
}

/// Build the pitch-class histogram of `notes` over `[start_tick, end_tick)`
///
/// A note contributes `min(end, range_end) - max(start, range_start)` ticks to
/// bin `pitch % 12` when it overlaps the range, and nothing otherwise. An empty
/// or inverted range yields an all-zero histogram.
pub fn pitch_class_histogram(
    notes: &[NoteInterval],
    start_tick: u64,
    end_tick: u64,
) -> PitchClassHistogram {
    let mut bins = [0.0f64; NUM_PITCH_CLASSES];
    for note in notes {
        let overlap = note.overlap(start_tick, end_tick);
        if overlap > 0 {
            bins[note.pitch_class()] += overlap as f64;
        }
    }
    PitchClassHistogram { bins }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_notes() -> Vec<NoteInterval> {
        vec![
            NoteInterval::new(0, 960, 60, 0, 80),    // C
            NoteInterval::new(240, 1200, 64, 0, 80), // E
            NoteInterval::new(500, 700, 79, 1, 80),  // G
            NoteInterval::new(900, 3000, 72, 0, 80), // C
            NoteInterval::new(1800, 1900, 71, 2, 80), // B
        ]
    }

    #[test]
    fn test_overlap_weights() {
        let hist = pitch_class_histogram(&sample_notes(), 480, 960);
        assert_eq!(hist[0], 480.0 + 60.0);
        assert_eq!(hist[4], 480.0);
        assert_eq!(hist[7], 200.0);
        assert_eq!(hist[11], 0.0);
        assert_eq!(hist.total(), 1220.0);
    }

    #[test]
    fn test_non_overlapping_range_is_silent() {
        let hist = pitch_class_histogram(&sample_notes(), 5000, 6000);
        assert!(hist.is_silent());
        assert_eq!(hist, PitchClassHistogram::default());

        let inverted = pitch_class_histogram(&sample_notes(), 900, 100);
        assert!(inverted.is_silent());
    }

    #[test]
    fn test_partition_additivity() {
        let notes = sample_notes();
        let whole = pitch_class_histogram(&notes, 0, 3200);
        let cuts = [0u64, 333, 480, 901, 1850, 2500, 3200];
        let summed = cuts
            .windows(2)
            .map(|w| pitch_class_histogram(&notes, w[0], w[1]))
            .fold(PitchClassHistogram::default(), |acc, h| acc + h);
        assert_eq!(summed, whole);
    }

    #[test]
    fn test_order_invariance() {
        let notes = sample_notes();
        let mut reversed = notes.clone();
        reversed.reverse();
        assert_eq!(
            pitch_class_histogram(&notes, 100, 2000),
            pitch_class_histogram(&reversed, 100, 2000)
        );
    }

    #[test]
    fn test_dot() {
        let mut bins = [0.0; 12];
        bins[0] = 2.0;
        bins[7] = 1.0;
        let hist = PitchClassHistogram::from_bins(bins);
        let mut profile = [1.0; 12];
        profile[7] = 3.0;
        assert_eq!(hist.dot(&profile), 5.0);
        assert_eq!(hist.weight(19), 1.0);
    }
}
