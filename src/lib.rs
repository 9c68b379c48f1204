//! # Harmonic Sidecar
//!
//! A harmonic analysis engine for short MIDI phrases, producing a compact
//! summary of an eight-bar window: tonal center, mode, and one roman-numeral
//! chord label per bar.
//!
//! ## Features
//!
//! - **Key Detection**: Duration-weighted pitch-class histogram matched against
//!   Krumhansl-Kessler profiles
//! - **Minor Disambiguation**: Natural vs. harmonic minor from leading-tone weight
//! - **Chord Labelling**: Best-covering diatonic triad per half bar, merged per bar
//! - **Sidecar Output**: YAML file with `key`, `mode` and `bars`
//!
//! ## Quick Start
//!
//! ```no_run
//! use harmonic_sidecar::{analyze_midi_file, io::write_sidecar, AnalysisConfig};
//!
//! let report = analyze_midi_file("phrase.mid", &AnalysisConfig::default())?;
//!
//! println!("Key: {} {}", report.result.key, report.result.mode);
//! println!("Bars: {:?}", report.result.bar_labels());
//! write_sidecar("phrase.mid", &report.result)?;
//! # Ok::<(), harmonic_sidecar::AnalysisError>(())
//! ```
//!
//! ## Architecture
//!
//! The analysis pipeline follows this flow:
//!
//! ```text
//! MIDI events → Note intervals → Global histogram → Key estimate
//!             → Half-bar chords → Bar labels
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod features;
pub mod io;
pub mod preprocessing;

use std::path::Path;

// Re-export main types
pub use analysis::bars::BarAnalysis;
pub use analysis::metadata::{Advisory, AnalysisMetadata};
pub use analysis::result::{AnalysisReport, AnalysisResult, KeyEstimate, Mode, PitchClass};
pub use config::AnalysisConfig;
pub use error::AnalysisError;
pub use features::harmony::{ChordLabel, RomanNumeral};
pub use preprocessing::{Meter, NoteInterval};

/// Main analysis function
///
/// Estimates key and mode over the eight-bar window starting at tick 0 and
/// labels every bar. Advisories (meter other than 4/4, source shorter than
/// the window) are logged as warnings; use [`analyze_detailed`] to receive them.
///
/// # Arguments
///
/// * `notes` - Closed note intervals, percussion already excluded
/// * `ticks_per_beat` - Source resolution (PPQ)
/// * `numerator` - Time signature numerator
/// * `denominator` - Time signature denominator
///
/// # Errors
///
/// Returns `AnalysisError::InvalidInput` if `notes` is empty, the meter is invalid,
/// or eight bars of the meter do not fit in a `u64` tick count
///
/// # Example
///
/// ```
/// use harmonic_sidecar::{analyze, NoteInterval};
///
/// // C major triad held for eight bars of 4/4 at 480 ppq
/// let notes: Vec<NoteInterval> = [60, 64, 67]
///     .iter()
///     .map(|&p| NoteInterval::new(0, 480 * 4 * 8, p, 0, 80))
///     .collect();
///
/// let result = analyze(&notes, 480, 4, 4)?;
/// assert_eq!(result.tonic_name(), "C");
/// assert_eq!(result.bar_labels(), vec!["I"; 8]);
/// # Ok::<(), harmonic_sidecar::AnalysisError>(())
/// ```
pub fn analyze(
    notes: &[NoteInterval],
    ticks_per_beat: u32,
    numerator: u32,
    denominator: u32,
) -> Result<AnalysisResult, AnalysisError> {
    let meter = Meter::new(ticks_per_beat, numerator, denominator);
    analyze_detailed(notes, &meter, &AnalysisConfig::default()).map(|report| report.result)
}

/// Analyze a note set and return the result with diagnostics
///
/// The report carries half-bar coverages, key score and clarity, and any
/// advisories raised during the run.
pub fn analyze_detailed(
    notes: &[NoteInterval],
    meter: &Meter,
    config: &AnalysisConfig,
) -> Result<AnalysisReport, AnalysisError> {
    log::debug!("Starting harmonic analysis of {} note intervals", notes.len());
    let report = analysis::bars::analyze_window(notes, meter, config)?;
    log::debug!(
        "Analysis finished in {:.2} ms",
        report.metadata.processing_time_ms
    );
    Ok(report)
}

/// Analyze a Standard MIDI File held in memory
///
/// The meter is taken from the file: header resolution and first time
/// signature, 4/4 if there is none.
pub fn analyze_midi_bytes(
    bytes: &[u8],
    config: &AnalysisConfig,
) -> Result<AnalysisReport, AnalysisError> {
    let source = io::MidiSource::parse(bytes)?;
    let meter = source.meter();
    log::info!(
        "Loaded MIDI (PPQ={}), time signature {}/{}",
        meter.ticks_per_beat,
        meter.numerator,
        meter.denominator
    );
    let notes = source.note_intervals();
    analyze_detailed(&notes, &meter, config)
}

/// Analyze a Standard MIDI File on disk
pub fn analyze_midi_file<P: AsRef<Path>>(
    path: P,
    config: &AnalysisConfig,
) -> Result<AnalysisReport, AnalysisError> {
    let bytes = std::fs::read(path.as_ref())?;
    analyze_midi_bytes(&bytes, config)
}
