//! Analysis metadata structures

use std::fmt;

use serde::{Deserialize, Serialize};

/// Non-fatal condition noticed during a run
///
/// Analysis always proceeds over the full window; advisories only tell the
/// caller the result may be less meaningful.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Advisory {
    /// Time signature other than 4/4; bar length still uses `ppq * 4 * num / den`
    UnexpectedMeter {
        /// Time signature numerator
        numerator: u32,
        /// Time signature denominator
        denominator: u32,
    },
    /// Notes end before the window does; trailing bars may be silent
    ShortSource {
        /// Latest note end tick
        last_tick: u64,
        /// End tick of the analysis window
        window_ticks: u64,
    },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::UnexpectedMeter {
                numerator,
                denominator,
            } => write!(
                f,
                "Time signature {}/{} detected (expected 4/4), continuing anyway",
                numerator, denominator
            ),
            Advisory::ShortSource {
                last_tick,
                window_ticks,
            } => write!(
                f,
                "Source looks shorter than the analysis window ({} ticks < {}), \
                 trailing bars may be silent",
                last_tick, window_ticks
            ),
        }
    }
}

/// Analysis metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    /// Number of note intervals analysed
    pub note_count: usize,

    /// Ticks per bar used for segmentation
    pub bar_ticks: u64,

    /// End tick of the analysis window
    pub window_ticks: u64,

    /// Processing time in milliseconds
    pub processing_time_ms: f32,

    /// Algorithm version
    pub algorithm_version: String,

    /// Non-fatal conditions reported during the run
    pub advisories: Vec<Advisory>,
}

impl Default for AnalysisMetadata {
    fn default() -> Self {
        Self {
            note_count: 0,
            bar_ticks: 0,
            window_ticks: 0,
            processing_time_ms: 0.0,
            algorithm_version: env!("CARGO_PKG_VERSION").to_string(),
            advisories: vec![],
        }
    }
}
