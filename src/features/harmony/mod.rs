//! Harmony modules
//!
//! Label segments with diatonic chords:
//! - Scale-degree, triad-quality and roman-numeral tables
//! - Triad-coverage scoring per segment

pub mod segment;
pub mod theory;

pub use segment::{best_chord_for_histogram, best_chord_for_segment, triad_score, SegmentChord};
pub use theory::{
    roman_label, scale_degree_semitones, triad_pitch_classes, triad_quality, ChordLabel,
    RomanNumeral, TriadQuality,
};
