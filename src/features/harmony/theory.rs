//! Diatonic theory tables
//!
//! Scale degrees, triad qualities and roman-numeral spelling for the three
//! supported modes. All tables are constant data indexed by [`Mode`] and
//! [`TriadQuality`].
//!
//! The harmonic minor III is spelled as a major triad rather than augmented.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::analysis::result::{Mode, PitchClass};
use crate::error::AnalysisError;

/// Number of diatonic degrees
pub const NUM_DEGREES: usize = 7;

/// Marker appended to lowercase numerals of diminished triads
pub const DIMINISHED_MARKER: char = '°';

/// Separator between the two halves of a split bar label
pub const SPLIT_SEPARATOR: char = '|';

const ROMANS: [&str; NUM_DEGREES] = ["I", "II", "III", "IV", "V", "VI", "VII"];

const MAJOR_SCALE: [usize; NUM_DEGREES] = [0, 2, 4, 5, 7, 9, 11];
const NATURAL_MINOR_SCALE: [usize; NUM_DEGREES] = [0, 2, 3, 5, 7, 8, 10];
const HARMONIC_MINOR_SCALE: [usize; NUM_DEGREES] = [0, 2, 3, 5, 7, 8, 11];

const MAJ: TriadQuality = TriadQuality::Major;
const MIN: TriadQuality = TriadQuality::Minor;
const DIM: TriadQuality = TriadQuality::Diminished;

const MAJOR_TRIADS: [TriadQuality; NUM_DEGREES] = [MAJ, MIN, MIN, MAJ, MAJ, MIN, DIM];
const NATURAL_MINOR_TRIADS: [TriadQuality; NUM_DEGREES] = [MIN, DIM, MAJ, MIN, MIN, MAJ, MAJ];
const HARMONIC_MINOR_TRIADS: [TriadQuality; NUM_DEGREES] = [MIN, DIM, MAJ, MIN, MAJ, MAJ, DIM];

/// Quality of a triad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriadQuality {
    /// Root, major third, perfect fifth
    Major,
    /// Root, minor third, perfect fifth
    Minor,
    /// Root, minor third, diminished fifth
    Diminished,
}

impl TriadQuality {
    /// Semitones above the root of the third and fifth
    pub fn intervals(&self) -> [usize; 3] {
        match self {
            TriadQuality::Major => [0, 4, 7],
            TriadQuality::Minor => [0, 3, 7],
            TriadQuality::Diminished => [0, 3, 6],
        }
    }
}

/// Semitone offsets of the seven scale degrees above the tonic
pub fn scale_degree_semitones(mode: Mode) -> &'static [usize; NUM_DEGREES] {
    match mode {
        Mode::Major => &MAJOR_SCALE,
        Mode::MinorNatural => &NATURAL_MINOR_SCALE,
        Mode::MinorHarmonic => &HARMONIC_MINOR_SCALE,
    }
}

/// Quality of the diatonic triad on `degree` (0-based, taken modulo 7)
pub fn triad_quality(mode: Mode, degree: usize) -> TriadQuality {
    let table = match mode {
        Mode::Major => &MAJOR_TRIADS,
        Mode::MinorNatural => &NATURAL_MINOR_TRIADS,
        Mode::MinorHarmonic => &HARMONIC_MINOR_TRIADS,
    };
    table[degree % NUM_DEGREES]
}

/// Pitch classes of the diatonic triad on `degree` in the key `tonic`/`mode`
///
/// # Example
///
/// ```
/// use harmonic_sidecar::analysis::result::{Mode, PitchClass};
/// use harmonic_sidecar::features::harmony::theory::triad_pitch_classes;
///
/// // V in C major is G-B-D
/// let triad = triad_pitch_classes(PitchClass::new(0), Mode::Major, 4);
/// assert_eq!(triad.map(|pc| pc.index()), [7, 11, 2]);
/// ```
pub fn triad_pitch_classes(tonic: PitchClass, mode: Mode, degree: usize) -> [PitchClass; 3] {
    let root = tonic.transpose(scale_degree_semitones(mode)[degree % NUM_DEGREES]);
    triad_quality(mode, degree)
        .intervals()
        .map(|interval| root.transpose(interval))
}

/// Roman numeral of the diatonic triad on `degree`
pub fn roman_label(mode: Mode, degree: usize) -> RomanNumeral {
    RomanNumeral::new(degree % NUM_DEGREES, triad_quality(mode, degree))
}

/// Scale-degree chord name
///
/// Uppercase for major, lowercase for minor, lowercase with `°` for diminished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RomanNumeral {
    /// Scale degree, 0-based (0 = I)
    pub degree: usize,
    /// Triad quality
    pub quality: TriadQuality,
}

impl RomanNumeral {
    /// Create a roman numeral
    pub fn new(degree: usize, quality: TriadQuality) -> Self {
        Self { degree, quality }
    }
}

impl fmt::Display for RomanNumeral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let base = ROMANS[self.degree % NUM_DEGREES];
        match self.quality {
            TriadQuality::Major => f.write_str(base),
            TriadQuality::Minor => f.write_str(&base.to_lowercase()),
            TriadQuality::Diminished => write!(f, "{}{}", base.to_lowercase(), DIMINISHED_MARKER),
        }
    }
}

impl FromStr for RomanNumeral {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid =
            || AnalysisError::SerializationError(format!("Invalid roman numeral '{}'", s));

        let (numeral, diminished) = match s.strip_suffix(DIMINISHED_MARKER) {
            Some(rest) => (rest, true),
            None => (s, false),
        };

        let upper = numeral.to_uppercase();
        let degree = ROMANS.iter().position(|&r| r == upper).ok_or_else(invalid)?;

        let quality = if numeral == upper {
            if diminished {
                return Err(invalid());
            }
            TriadQuality::Major
        } else if numeral == upper.to_lowercase() {
            if diminished {
                TriadQuality::Diminished
            } else {
                TriadQuality::Minor
            }
        } else {
            return Err(invalid());
        };

        Ok(RomanNumeral::new(degree, quality))
    }
}

impl TryFrom<String> for RomanNumeral {
    type Error = AnalysisError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<RomanNumeral> for String {
    fn from(roman: RomanNumeral) -> String {
        roman.to_string()
    }
}

/// Harmony of one bar: a single chord, or one chord per half when they differ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ChordLabel {
    /// Both halves agree
    Single(RomanNumeral),
    /// First half, second half
    Split(RomanNumeral, RomanNumeral),
}

impl ChordLabel {
    /// Merge half-bar chords: identical labels collapse to one
    pub fn from_halves(first: RomanNumeral, second: RomanNumeral) -> Self {
        if first.to_string() == second.to_string() {
            ChordLabel::Single(first)
        } else {
            ChordLabel::Split(first, second)
        }
    }

    /// True when the harmony changes mid-bar
    pub fn is_split(&self) -> bool {
        matches!(self, ChordLabel::Split(..))
    }
}

impl fmt::Display for ChordLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChordLabel::Single(roman) => write!(f, "{}", roman),
            ChordLabel::Split(first, second) => write!(f, "{}{}{}", first, SPLIT_SEPARATOR, second),
        }
    }
}

impl FromStr for ChordLabel {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(SPLIT_SEPARATOR) {
            None => Ok(ChordLabel::Single(s.parse()?)),
            Some((first, second)) => Ok(ChordLabel::Split(first.parse()?, second.parse()?)),
        }
    }
}

impl TryFrom<String> for ChordLabel {
    type Error = AnalysisError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ChordLabel> for String {
    fn from(label: ChordLabel) -> String {
        label.to_string()
    }
}
