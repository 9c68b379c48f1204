//! Preprocessing modules
//!
//! Turn raw timed events into analysis input:
//! - Note on/off pairing into closed intervals
//! - Meter handling and analysis window checks

pub mod intervals;
pub mod meter;

pub use intervals::{
    collect_note_intervals, EventKind, NoteInterval, TrackEvent, PERCUSSION_CHANNEL,
};
pub use meter::{window_advisories, Meter};
