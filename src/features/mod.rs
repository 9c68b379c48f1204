//! Feature extraction modules
//!
//! This module contains the harmonic analysis algorithms:
//! - Pitch-class histograms (duration weighted)
//! - Key detection
//! - Segment harmonization

pub mod chroma;
pub mod harmony;
pub mod key;
