//! Standard MIDI File event source
//!
//! Parses a Standard MIDI File with `midly` and exposes its tracks as
//! delta-timed [`TrackEvent`]s plus the prevailing [`Meter`].

use std::path::Path;

use midly::{MetaMessage, MidiMessage, Smf, Timing, TrackEventKind};

use crate::error::AnalysisError;
use crate::preprocessing::intervals::{collect_note_intervals, EventKind, NoteInterval, TrackEvent};
use crate::preprocessing::meter::Meter;

/// Events and meter read from a Standard MIDI File
#[derive(Debug, Clone)]
pub struct MidiSource {
    meter: Meter,
    tracks: Vec<Vec<TrackEvent>>,
}

impl MidiSource {
    /// Parse a MIDI file from memory
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::DecodingError` if the bytes are not a valid MIDI file,
    /// if the file uses SMPTE timecode timing, or if a time signature is malformed.
    pub fn parse(bytes: &[u8]) -> Result<Self, AnalysisError> {
        let smf = Smf::parse(bytes)?;

        let ticks_per_beat = match smf.header.timing {
            Timing::Metrical(ppq) => ppq.as_int() as u32,
            Timing::Timecode(fps, subframe) => {
                return Err(AnalysisError::DecodingError(format!(
                    "SMPTE timing ({} fps, {} subframes) has no ticks per beat",
                    fps.as_f32(),
                    subframe
                )));
            }
        };

        let (numerator, denominator) = first_time_signature(&smf)?.unwrap_or((4, 4));
        let meter = Meter::new(ticks_per_beat, numerator, denominator);

        let tracks: Vec<Vec<TrackEvent>> = smf
            .tracks
            .iter()
            .map(|track| track.iter().map(convert_event).collect())
            .collect();

        log::debug!(
            "Parsed MIDI: {} tracks, {} ppq, meter {}/{}",
            tracks.len(),
            ticks_per_beat,
            numerator,
            denominator
        );

        Ok(Self { meter, tracks })
    }

    /// Read and parse a MIDI file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, AnalysisError> {
        let path = path.as_ref();
        log::debug!("Reading MIDI file: {}", path.display());
        let bytes = std::fs::read(path)?;
        Self::parse(&bytes)
    }

    /// Meter from the header resolution and the first time signature (4/4 if none)
    pub fn meter(&self) -> Meter {
        self.meter
    }

    /// Tracks in file order
    pub fn tracks(&self) -> &[Vec<TrackEvent>] {
        &self.tracks
    }

    /// Closed note intervals of all tracks, percussion excluded
    pub fn note_intervals(&self) -> Vec<NoteInterval> {
        collect_note_intervals(&self.tracks)
    }
}

/// First time signature in track order, as (numerator, denominator)
fn first_time_signature(smf: &Smf) -> Result<Option<(u32, u32)>, AnalysisError> {
    for track in &smf.tracks {
        for event in track {
            if let TrackEventKind::Meta(MetaMessage::TimeSignature(
                numerator,
                denominator_pow2,
                _,
                _,
            )) = event.kind
            {
                let denominator = 1u32.checked_shl(denominator_pow2 as u32).ok_or_else(|| {
                    AnalysisError::DecodingError(format!(
                        "Time signature denominator exponent {} out of range",
                        denominator_pow2
                    ))
                })?;
                return Ok(Some((numerator as u32, denominator)));
            }
        }
    }
    Ok(None)
}

fn convert_event(event: &midly::TrackEvent) -> TrackEvent {
    let kind = match event.kind {
        TrackEventKind::Midi { channel, message } => {
            let channel = channel.as_int();
            match message {
                MidiMessage::NoteOn { key, vel } => EventKind::NoteOn {
                    channel,
                    key: key.as_int(),
                    velocity: vel.as_int(),
                },
                MidiMessage::NoteOff { key, .. } => EventKind::NoteOff {
                    channel,
                    key: key.as_int(),
                },
                _ => EventKind::Other,
            }
        }
        _ => EventKind::Other,
    };
    TrackEvent::new(event.delta.as_int(), kind)
}
