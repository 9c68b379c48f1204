//! Pitch-class histogram modules
//!
//! Aggregate note intervals into a 12-bin pitch-class distribution:
//! - Duration-weighted histogram over a tick range
//! - Normalization to fractions of total weight

pub mod histogram;
pub mod normalization;

pub use histogram::{pitch_class_histogram, PitchClassHistogram, NUM_PITCH_CLASSES};
pub use normalization::{normalize_to_fractions, pitch_class_fraction};
