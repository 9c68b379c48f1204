//! Meter handling and analysis window checks
//!
//! The window is always `window_bars` bars of `bar_ticks()` each, starting at
//! tick 0. The bar length formula `ppq * 4 * num / den` is only one bar for
//! 4/4; other meters are reported as advisories and analysed with the same
//! formula regardless.

use super::intervals::NoteInterval;
use crate::analysis::metadata::Advisory;
use crate::error::AnalysisError;

/// Prevailing time signature and tick resolution of a source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Meter {
    /// Ticks per quarter note (PPQ)
    pub ticks_per_beat: u32,
    /// Time signature numerator
    pub numerator: u32,
    /// Time signature denominator (note value, e.g. 4 for quarter notes)
    pub denominator: u32,
}

impl Meter {
    /// Create a meter
    pub fn new(ticks_per_beat: u32, numerator: u32, denominator: u32) -> Self {
        Self {
            ticks_per_beat,
            numerator,
            denominator,
        }
    }

    /// 4/4 at the given resolution
    pub fn common_time(ticks_per_beat: u32) -> Self {
        Self::new(ticks_per_beat, 4, 4)
    }

    /// Reject zero resolution or a zero time signature component
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.ticks_per_beat == 0 {
            return Err(AnalysisError::InvalidInput(
                "Ticks per beat must be positive".to_string(),
            ));
        }
        if self.numerator == 0 || self.denominator == 0 {
            return Err(AnalysisError::InvalidInput(format!(
                "Invalid time signature {}/{}",
                self.numerator, self.denominator
            )));
        }
        Ok(())
    }

    /// True for 4/4
    pub fn is_common_time(&self) -> bool {
        self.numerator == 4 && self.denominator == 4
    }

    /// Ticks per bar: `trunc(ppq * 4 * num / den)`
    ///
    /// `None` when the bar does not fit in a `u64` tick count.
    pub fn bar_ticks(&self) -> Option<u64> {
        let ticks =
            self.ticks_per_beat as f64 * 4.0 * (self.numerator as f64 / self.denominator as f64);
        // u64::MAX as f64 rounds up to 2^64, so this bound is exclusive
        if !ticks.is_finite() || ticks >= u64::MAX as f64 {
            return None;
        }
        Some(ticks as u64)
    }

    /// Ticks covered by a window of `bars` bars, `None` on overflow
    pub fn window_ticks(&self, bars: u32) -> Option<u64> {
        self.bar_ticks()?.checked_mul(bars as u64)
    }

    /// Validate the meter and return the end tick of a `bars`-bar window
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidInput` for an invalid meter or a window
    /// whose end does not fit in a `u64` tick count.
    pub fn validate_window(&self, bars: u32) -> Result<u64, AnalysisError> {
        self.validate()?;
        self.window_ticks(bars).ok_or_else(|| {
            AnalysisError::InvalidInput(format!(
                "Analysis window exceeds tick range ({} bars of {}/{} at {} ppq)",
                bars, self.numerator, self.denominator, self.ticks_per_beat
            ))
        })
    }
}

/// Collect the non-fatal conditions for analysing `notes` under `meter`
///
/// Reports a meter other than 4/4 and a source that ends before the window does.
pub fn window_advisories(
    notes: &[NoteInterval],
    meter: &Meter,
    window_bars: u32,
) -> Vec<Advisory> {
    let mut advisories = Vec::new();

    if !meter.is_common_time() {
        advisories.push(Advisory::UnexpectedMeter {
            numerator: meter.numerator,
            denominator: meter.denominator,
        });
    }

    let window_ticks = meter.window_ticks(window_bars).unwrap_or(u64::MAX);
    let last_tick = notes.iter().map(|n| n.end_tick).max().unwrap_or(0);
    if last_tick < window_ticks {
        advisories.push(Advisory::ShortSource {
            last_tick,
            window_ticks,
        });
    }

    advisories
}
