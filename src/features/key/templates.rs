//! Krumhansl-Kessler key profiles
//!
//! One probe-tone profile for major and one for minor, each indexed by
//! semitones above the tonic. A profile for tonic `k` is the base profile
//! rotated right by `k`.

use crate::features::chroma::NUM_PITCH_CLASSES;

/// Krumhansl-Kessler major profile (C major)
pub const KS_MAJOR_PROFILE: [f64; NUM_PITCH_CLASSES] = [
    6.35, 2.23, 3.48, 2.33, 4.38, 4.09, 2.52, 5.19, 2.39, 3.66, 2.29, 2.88,
];

/// Krumhansl-Kessler minor profile (C minor)
pub const KS_MINOR_PROFILE: [f64; NUM_PITCH_CLASSES] = [
    6.33, 2.68, 3.52, 5.38, 2.60, 3.53, 2.54, 4.75, 3.98, 2.69, 3.34, 3.17,
];

/// Which reference profile a key candidate was scored against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tonality {
    /// Major profile
    Major,
    /// Minor profile
    Minor,
}

impl Tonality {
    /// Iteration order used when scoring; also the tie-break order
    pub const SCAN_ORDER: [Tonality; 2] = [Tonality::Major, Tonality::Minor];
}

/// Reference profiles for both tonalities
#[derive(Debug, Clone)]
pub struct KeyTemplates {
    /// Major profile, tonic at index 0
    pub major: [f64; NUM_PITCH_CLASSES],

    /// Minor profile, tonic at index 0
    pub minor: [f64; NUM_PITCH_CLASSES],
}

impl KeyTemplates {
    /// Templates with the Krumhansl-Kessler profiles
    pub fn new() -> Self {
        Self {
            major: KS_MAJOR_PROFILE,
            minor: KS_MINOR_PROFILE,
        }
    }

    /// Base profile for a tonality
    pub fn profile(&self, tonality: Tonality) -> &[f64; NUM_PITCH_CLASSES] {
        match tonality {
            Tonality::Major => &self.major,
            Tonality::Minor => &self.minor,
        }
    }

    /// Profile for a tonality with its tonic on `tonic` (0-11)
    pub fn template(&self, tonality: Tonality, tonic: usize) -> [f64; NUM_PITCH_CLASSES] {
        rotate_right(self.profile(tonality), tonic)
    }
}

impl Default for KeyTemplates {
    fn default() -> Self {
        Self::new()
    }
}

/// Rotate right by `k`: the element at `len - k` moves to position 0
pub fn rotate_right(profile: &[f64; NUM_PITCH_CLASSES], k: usize) -> [f64; NUM_PITCH_CLASSES] {
    let mut out = *profile;
    out.rotate_right(k % NUM_PITCH_CLASSES);
    out
}
