//! Analysis result types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::bars::BarAnalysis;
use super::metadata::AnalysisMetadata;
use crate::error::AnalysisError;
use crate::features::harmony::theory::ChordLabel;

/// Sharp-spelled pitch names, indexed by pitch class
pub const NOTE_NAMES_SHARP: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Pitch class (0 = C, 1 = C#, ..., 11 = B)
///
/// Serialized as its sharp-spelled name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PitchClass(u8);

impl PitchClass {
    /// Pitch class of any integer, reduced modulo 12
    pub fn new(value: usize) -> Self {
        PitchClass((value % 12) as u8)
    }

    /// Index 0-11
    pub fn index(&self) -> usize {
        self.0 as usize
    }

    /// Pitch class `semitones` above this one
    pub fn transpose(&self, semitones: usize) -> Self {
        Self::new(self.index() + semitones)
    }

    /// Sharp-spelled name (e.g. "C", "F#")
    ///
    /// # Example
    ///
    /// ```
    /// use harmonic_sidecar::analysis::result::PitchClass;
    ///
    /// assert_eq!(PitchClass::new(0).name(), "C");
    /// assert_eq!(PitchClass::new(10).name(), "A#");
    /// assert_eq!(PitchClass::new(13).name(), "C#");
    /// ```
    pub fn name(&self) -> &'static str {
        NOTE_NAMES_SHARP[self.index()]
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PitchClass {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NOTE_NAMES_SHARP
            .iter()
            .position(|&name| name == s)
            .map(PitchClass::new)
            .ok_or_else(|| AnalysisError::SerializationError(format!("Unknown pitch name '{}'", s)))
    }
}

impl TryFrom<String> for PitchClass {
    type Error = AnalysisError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<PitchClass> for String {
    fn from(pc: PitchClass) -> String {
        pc.name().to_string()
    }
}

/// Estimated mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Major (Ionian)
    Major,
    /// Natural minor (Aeolian)
    MinorNatural,
    /// Harmonic minor (raised seventh)
    MinorHarmonic,
}

impl Mode {
    /// All modes
    pub const ALL: [Mode; 3] = [Mode::Major, Mode::MinorNatural, Mode::MinorHarmonic];

    /// Sidecar tag: "major", "minor_natural" or "minor_harmonic"
    pub fn tag(&self) -> &'static str {
        match self {
            Mode::Major => "major",
            Mode::MinorNatural => "minor_natural",
            Mode::MinorHarmonic => "minor_harmonic",
        }
    }

    /// True for both minor variants
    pub fn is_minor(&self) -> bool {
        !matches!(self, Mode::Major)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Tonal center and mode of an analysis window
///
/// Computed once per run, before any segment is harmonized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyEstimate {
    /// Tonic pitch class
    pub tonic: PitchClass,
    /// Mode
    pub mode: Mode,
}

impl KeyEstimate {
    /// Create a key estimate
    pub fn new(tonic: PitchClass, mode: Mode) -> Self {
        Self { tonic, mode }
    }
}

impl fmt::Display for KeyEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.tonic, self.mode)
    }
}

/// Harmonic summary of the analysis window
///
/// This is the sidecar payload. Field order is the serialized key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Tonic pitch class, serialized by name
    pub key: PitchClass,

    /// Mode tag
    pub mode: Mode,

    /// One chord label per bar, in bar order
    pub bars: Vec<ChordLabel>,
}

impl AnalysisResult {
    /// Sharp-spelled tonic name
    pub fn tonic_name(&self) -> &'static str {
        self.key.name()
    }

    /// Key estimate this result was built from
    pub fn key_estimate(&self) -> KeyEstimate {
        KeyEstimate::new(self.key, self.mode)
    }

    /// Bar labels as sidecar strings (e.g. "I", "ii|V")
    pub fn bar_labels(&self) -> Vec<String> {
        self.bars.iter().map(|b| b.to_string()).collect()
    }
}

/// Complete analysis output: the sidecar result plus diagnostics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Sidecar payload
    pub result: AnalysisResult,

    /// Dot-product score of the winning key template
    pub key_score: f64,

    /// Key clarity (0.0-1.0)
    ///
    /// Relative margin of the best key template over the runner-up:
    /// - High (>0.1): one key clearly dominates
    /// - Low (near 0): several keys fit almost equally well
    pub key_clarity: f64,

    /// Per-bar details, including half-bar coverages
    pub bars: Vec<BarAnalysis>,

    /// Analysis metadata
    pub metadata: AnalysisMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pitch_class_names() {
        assert_eq!(PitchClass::new(0).name(), "C");
        assert_eq!(PitchClass::new(1).name(), "C#");
        assert_eq!(PitchClass::new(6).name(), "F#");
        assert_eq!(PitchClass::new(11).name(), "B");
        assert_eq!(PitchClass::new(9).transpose(11).name(), "G#");
    }

    #[test]
    fn test_pitch_class_parse() {
        for i in 0..12 {
            let pc = PitchClass::new(i);
            assert_eq!(pc.name().parse::<PitchClass>(), Ok(pc));
        }
        assert!("Db".parse::<PitchClass>().is_err());
        assert!("".parse::<PitchClass>().is_err());
    }

    #[test]
    fn test_mode_tags() {
        assert_eq!(Mode::Major.tag(), "major");
        assert_eq!(Mode::MinorNatural.tag(), "minor_natural");
        assert_eq!(Mode::MinorHarmonic.tag(), "minor_harmonic");
        assert!(Mode::MinorHarmonic.is_minor());
        assert!(!Mode::Major.is_minor());
    }

    #[test]
    fn test_key_estimate_display() {
        let key = KeyEstimate::new(PitchClass::new(9), Mode::MinorHarmonic);
        assert_eq!(key.to_string(), "A minor_harmonic");
    }
}
