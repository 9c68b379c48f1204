//! Bar analysis
//!
//! Splits the analysis window into bars and half-bars, harmonizes each half
//! and merges the two halves into one bar label.
//!
//! # Algorithm
//!
//! 1. Build the histogram of the whole window `[0, bar_ticks * window_bars)`
//! 2. Estimate the key once from that histogram
//! 3. For each bar, pick the best chord of each half (midpoint rounded down)
//! 4. Label the bar with one numeral if the halves agree, `first|second` otherwise

use std::time::Instant;

use serde::{Deserialize, Serialize};

use super::metadata::AnalysisMetadata;
use super::result::{AnalysisReport, AnalysisResult, KeyEstimate};
use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::features::chroma::pitch_class_histogram;
use crate::features::harmony::{best_chord_for_segment, ChordLabel, SegmentChord};
use crate::features::key::{detect_key, KeyTemplates};
use crate::preprocessing::intervals::NoteInterval;
use crate::preprocessing::meter::{window_advisories, Meter};

/// Harmony of one bar with per-half diagnostics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarAnalysis {
    /// Bar index (0-based)
    pub index: usize,
    /// First tick of the bar
    pub start_tick: u64,
    /// Boundary between the two halves
    pub mid_tick: u64,
    /// First tick after the bar
    pub end_tick: u64,
    /// Best chord of `[start_tick, mid_tick)`
    pub first_half: SegmentChord,
    /// Best chord of `[mid_tick, end_tick)`
    pub second_half: SegmentChord,
    /// Merged bar label
    pub label: ChordLabel,
}

/// Harmonize `bar_count` consecutive bars starting at tick 0
///
/// Bar boundaries saturate at `u64::MAX`; [`analyze_window`] rejects windows
/// that would reach it.
pub fn analyze_bars(
    notes: &[NoteInterval],
    key: &KeyEstimate,
    bar_ticks: u64,
    bar_count: u32,
) -> Vec<BarAnalysis> {
    (0..bar_count as usize)
        .map(|index| {
            let start_tick = bar_ticks.saturating_mul(index as u64);
            let end_tick = start_tick.saturating_add(bar_ticks);
            let mid_tick = start_tick.saturating_add(bar_ticks / 2);

            let first_half = best_chord_for_segment(notes, key, start_tick, mid_tick);
            let second_half = best_chord_for_segment(notes, key, mid_tick, end_tick);
            let label = ChordLabel::from_halves(first_half.roman, second_half.roman);

            log::info!("Bar {}: {}", index + 1, label);

            BarAnalysis {
                index,
                start_tick,
                mid_tick,
                end_tick,
                first_half,
                second_half,
                label,
            }
        })
        .collect()
}

/// Run the full analysis of a note set under a meter
///
/// # Errors
///
/// Returns `AnalysisError::InvalidInput` if `notes` is empty, the meter is invalid,
/// or the window end does not fit in a `u64` tick count. Meter and length problems
/// are reported as advisories, not errors.
pub fn analyze_window(
    notes: &[NoteInterval],
    meter: &Meter,
    config: &AnalysisConfig,
) -> Result<AnalysisReport, AnalysisError> {
    let start_time = Instant::now();

    if notes.is_empty() {
        return Err(AnalysisError::InvalidInput(
            "No note intervals found (empty or percussion-only source)".to_string(),
        ));
    }
    if config.window_bars == 0 {
        return Err(AnalysisError::InvalidInput(
            "Analysis window must contain at least one bar".to_string(),
        ));
    }
    let window_ticks = meter.validate_window(config.window_bars)?;
    // Exact: the window is a whole number of bars
    let bar_ticks = window_ticks / config.window_bars as u64;
    log::debug!(
        "Analysing {} notes: {}/{} at {} ppq, {} ticks per bar, window [0, {})",
        notes.len(),
        meter.numerator,
        meter.denominator,
        meter.ticks_per_beat,
        bar_ticks,
        window_ticks
    );

    let advisories = window_advisories(notes, meter, config.window_bars);
    for advisory in &advisories {
        log::warn!("{}", advisory);
    }

    // Key estimation must precede every segment evaluation
    let global = pitch_class_histogram(notes, 0, window_ticks);
    let detection = detect_key(&global, &KeyTemplates::new(), config);
    let key = detection.key;
    log::info!("Estimated key={} mode={}", key.tonic, key.mode);

    let bars = analyze_bars(notes, &key, bar_ticks, config.window_bars);

    let result = AnalysisResult {
        key: key.tonic,
        mode: key.mode,
        bars: bars.iter().map(|b| b.label).collect(),
    };

    Ok(AnalysisReport {
        result,
        key_score: detection.score,
        key_clarity: detection.clarity,
        bars,
        metadata: AnalysisMetadata {
            note_count: notes.len(),
            bar_ticks,
            window_ticks,
            processing_time_ms: start_time.elapsed().as_secs_f32() * 1000.0,
            advisories,
            ..AnalysisMetadata::default()
        },
    })
}
