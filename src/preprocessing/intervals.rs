//! Note interval collection
//!
//! Pairs note-on and note-off events into closed note intervals with absolute
//! tick positions. Each track is processed independently: held-note state is
//! never shared between tracks.
//!
//! Pairing is permissive. Real-world note data commonly contains stray events,
//! so:
//! - a note-on at a key that is already held replaces the earlier one (last wins)
//! - a note-off at a key that is not held is ignored
//! - a note-on left open at the end of its track is dropped
//! - a zero-length note is dropped
//!
//! None of these are errors.

use std::collections::HashMap;

/// General MIDI percussion channel (channel 10 in one-based numbering)
pub const PERCUSSION_CHANNEL: u8 = 9;

/// A closed note with absolute timing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoteInterval {
    /// Start tick (inclusive)
    pub start_tick: u64,
    /// End tick (exclusive), always greater than `start_tick`
    pub end_tick: u64,
    /// MIDI pitch (0-127)
    pub pitch: u8,
    /// MIDI channel (0-15), never the percussion channel
    pub channel: u8,
    /// Note-on velocity (1-127)
    pub velocity: u8,
}

impl NoteInterval {
    /// Create a note interval
    pub fn new(start_tick: u64, end_tick: u64, pitch: u8, channel: u8, velocity: u8) -> Self {
        Self {
            start_tick,
            end_tick,
            pitch,
            channel,
            velocity,
        }
    }

    /// Duration in ticks
    pub fn duration(&self) -> u64 {
        self.end_tick.saturating_sub(self.start_tick)
    }

    /// Pitch class (0 = C, ..., 11 = B)
    pub fn pitch_class(&self) -> usize {
        (self.pitch % 12) as usize
    }

    /// Number of ticks this note overlaps the half-open range `[start, end)`
    pub fn overlap(&self, start: u64, end: u64) -> u64 {
        if self.start_tick >= end || self.end_tick <= start {
            return 0;
        }
        self.end_tick.min(end).saturating_sub(self.start_tick.max(start))
    }
}

/// Kind of a timed track event, reduced to what interval pairing needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Note-on (velocity 0 is treated as note-off)
    NoteOn {
        /// Channel (0-15)
        channel: u8,
        /// Key (0-127)
        key: u8,
        /// Velocity (0-127)
        velocity: u8,
    },
    /// Note-off
    NoteOff {
        /// Channel (0-15)
        channel: u8,
        /// Key (0-127)
        key: u8,
    },
    /// Anything else: meta events, controllers, sysex, ...
    Other,
}

/// A track event with a delta time relative to the previous event of the same track
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackEvent {
    /// Ticks since the previous event in the track
    pub delta: u32,
    /// Event payload
    pub kind: EventKind,
}

impl TrackEvent {
    /// Create a track event
    pub fn new(delta: u32, kind: EventKind) -> Self {
        Self { delta, kind }
    }
}

/// Collect closed note intervals from all tracks
///
/// # Arguments
///
/// * `tracks` - Tracks of delta-timed events, in file order
///
/// # Returns
///
/// Intervals from every track, concatenated. Order carries no meaning.
pub fn collect_note_intervals(tracks: &[Vec<TrackEvent>]) -> Vec<NoteInterval> {
    let mut notes = Vec::new();
    for (track_idx, track) in tracks.iter().enumerate() {
        let before = notes.len();
        collect_track(track, &mut notes);
        log::debug!(
            "Track {}: {} events -> {} note intervals",
            track_idx,
            track.len(),
            notes.len() - before
        );
    }
    notes
}

fn collect_track(track: &[TrackEvent], notes: &mut Vec<NoteInterval>) {
    // (channel, key) -> (start_tick, velocity)
    let mut held: HashMap<(u8, u8), (u64, u8)> = HashMap::new();
    let mut tick: u64 = 0;

    for event in track {
        tick += event.delta as u64;

        let (channel, key, opening) = match event.kind {
            EventKind::NoteOn {
                channel,
                key,
                velocity,
            } => (channel, key, (velocity > 0).then_some(velocity)),
            EventKind::NoteOff { channel, key } => (channel, key, None),
            EventKind::Other => continue,
        };

        if channel == PERCUSSION_CHANNEL {
            continue;
        }

        match opening {
            Some(velocity) => {
                held.insert((channel, key), (tick, velocity));
            }
            None => {
                if let Some((start, velocity)) = held.remove(&(channel, key)) {
                    if tick > start {
                        notes.push(NoteInterval::new(start, tick, key, channel, velocity));
                    }
                }
            }
        }
    }
}
