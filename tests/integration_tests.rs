//! Integration tests for the harmonic analysis engine

use harmonic_sidecar::io::sidecar::{from_yaml_str, to_yaml_string};
use harmonic_sidecar::io::{read_sidecar, write_sidecar};
use harmonic_sidecar::{
    analyze, analyze_detailed, analyze_midi_bytes, Advisory, AnalysisConfig, AnalysisError, Meter,
    Mode, NoteInterval,
};
use midly::num::{u15, u28, u4, u7};
use midly::{Format, Header, MetaMessage, MidiMessage, Smf, Timing, TrackEventKind};

const PPQ: u64 = 480;
const BAR: u64 = PPQ * 4;
const WINDOW: u64 = BAR * 8;

const C_MAJOR: [u8; 3] = [60, 64, 67];
const G_MAJOR: [u8; 3] = [67, 71, 74];

fn triad(pitches: [u8; 3], start: u64, end: u64) -> Vec<NoteInterval> {
    pitches
        .iter()
        .map(|&p| NoteInterval::new(start, end, p, 0, 80))
        .collect()
}

/// One triad per bar, each held for the whole bar
fn progression(chords: &[[u8; 3]]) -> Vec<NoteInterval> {
    chords
        .iter()
        .enumerate()
        .flat_map(|(i, &chord)| triad(chord, BAR * i as u64, BAR * (i as u64 + 1)))
        .collect()
}

/// Encode note intervals as a format-1 MIDI file, plus a drum track on channel 9
fn encode_midi(notes: &[NoteInterval], time_signature: Option<(u8, u8)>) -> Vec<u8> {
    let mut events: Vec<(u64, TrackEventKind<'static>)> = Vec::new();
    for note in notes {
        let channel = u4::new(note.channel);
        let key = u7::new(note.pitch);
        events.push((
            note.start_tick,
            TrackEventKind::Midi {
                channel,
                message: MidiMessage::NoteOn {
                    key,
                    vel: u7::new(note.velocity),
                },
            },
        ));
        events.push((
            note.end_tick,
            TrackEventKind::Midi {
                channel,
                message: MidiMessage::NoteOff { key, vel: u7::new(0) },
            },
        ));
    }
    // Offs before ons at the same tick so re-struck notes pair correctly
    events.sort_by_key(|(tick, kind)| {
        let is_on = matches!(
            kind,
            TrackEventKind::Midi {
                message: MidiMessage::NoteOn { .. },
                ..
            }
        );
        (*tick, is_on)
    });

    let mut conductor = Vec::new();
    if let Some((num, den_pow2)) = time_signature {
        conductor.push(midly::TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Meta(MetaMessage::TimeSignature(num, den_pow2, 24, 8)),
        });
    }
    conductor.push(midly::TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
    });

    let mut track = Vec::new();
    let mut last = 0u64;
    for (tick, kind) in events {
        track.push(midly::TrackEvent {
            delta: u28::new((tick - last) as u32),
            kind,
        });
        last = tick;
    }
    track.push(midly::TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
    });

    let drum_note = |delta: u32, vel: u8| midly::TrackEvent {
        delta: u28::new(delta),
        kind: TrackEventKind::Midi {
            channel: u4::new(9),
            message: MidiMessage::NoteOn {
                key: u7::new(42),
                vel: u7::new(vel),
            },
        },
    };
    let drums = vec![
        drum_note(0, 110),
        drum_note(WINDOW as u32, 0),
        midly::TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
        },
    ];

    let smf = Smf {
        header: Header::new(Format::Parallel, Timing::Metrical(u15::new(PPQ as u16))),
        tracks: vec![conductor, track, drums],
    };
    let mut bytes = Vec::new();
    smf.write(&mut bytes).expect("MIDI encoding should succeed");
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sustained_c_major_triad() {
        let notes = triad(C_MAJOR, 0, WINDOW);
        let result = analyze(&notes, PPQ as u32, 4, 4).expect("Analysis should succeed");

        assert_eq!(result.tonic_name(), "C");
        assert_eq!(result.mode, Mode::Major);
        assert_eq!(result.bar_labels(), vec!["I"; 8]);
    }

    #[test]
    fn test_mid_bar_change_to_dominant() {
        let mut notes = triad(C_MAJOR, 0, BAR / 2);
        notes.extend(triad(G_MAJOR, BAR / 2, BAR));
        notes.extend(triad(C_MAJOR, BAR, WINDOW));

        let result = analyze(&notes, PPQ as u32, 4, 4).expect("Analysis should succeed");

        assert_eq!(result.tonic_name(), "C");
        assert_eq!(result.mode, Mode::Major);
        let labels = result.bar_labels();
        assert_eq!(labels[0], "I|V");
        assert!(labels[1..].iter().all(|l| l == "I"), "labels: {:?}", labels);
    }

    #[test]
    fn test_empty_input_fails() {
        let result = analyze(&[], PPQ as u32, 4, 4);
        match result {
            Err(AnalysisError::InvalidInput(msg)) => assert!(msg.contains("No note intervals")),
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_meter_beyond_tick_range_fails() {
        let notes = triad(C_MAJOR, 0, BAR);
        match analyze(&notes, u32::MAX, u32::MAX, 1) {
            Err(AnalysisError::InvalidInput(msg)) => assert!(msg.contains("exceeds tick range")),
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_harmonic_minor_progression() {
        let a_minor = [57, 60, 64];
        let d_minor = [62, 65, 69];
        let e_major = [64, 68, 71];
        let notes = progression(&[
            a_minor, d_minor, e_major, a_minor, a_minor, d_minor, e_major, a_minor,
        ]);

        let result = analyze(&notes, PPQ as u32, 4, 4).expect("Analysis should succeed");

        assert_eq!(result.tonic_name(), "A");
        assert_eq!(result.mode, Mode::MinorHarmonic);
        assert_eq!(result.bar_labels(), vec!["i", "iv", "V", "i", "i", "iv", "V", "i"]);
    }

    #[test]
    fn test_cadential_progression_in_g() {
        // G - C - D - G, twice
        let g = [55, 59, 62];
        let c = [60, 64, 67];
        let d = [62, 66, 69];
        let notes = progression(&[g, c, d, g, g, c, d, g]);

        let result = analyze(&notes, PPQ as u32, 4, 4).expect("Analysis should succeed");

        assert_eq!(result.tonic_name(), "G");
        assert_eq!(result.mode, Mode::Major);
        assert_eq!(result.bar_labels(), vec!["I", "IV", "V", "I", "I", "IV", "V", "I"]);
    }

    #[test]
    fn test_note_order_does_not_matter() {
        let mut notes = triad(C_MAJOR, 0, BAR / 2);
        notes.extend(triad(G_MAJOR, BAR / 2, BAR));
        notes.extend(triad(C_MAJOR, BAR, WINDOW));
        let forward = analyze(&notes, PPQ as u32, 4, 4).unwrap();
        notes.reverse();
        let backward = analyze(&notes, PPQ as u32, 4, 4).unwrap();
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_short_source_still_yields_eight_bars() {
        let notes = triad(C_MAJOR, 0, BAR * 2);
        let meter = Meter::common_time(PPQ as u32);
        let report = analyze_detailed(&notes, &meter, &AnalysisConfig::default())
            .expect("Analysis should succeed");

        assert_eq!(report.result.bars.len(), 8);
        assert_eq!(
            report.metadata.advisories,
            vec![Advisory::ShortSource {
                last_tick: BAR * 2,
                window_ticks: WINDOW
            }]
        );
        // Silent trailing bars fall back to I with zero coverage
        for bar in &report.bars[2..] {
            assert_eq!(bar.label.to_string(), "I");
            assert_eq!(bar.first_half.coverage, 0.0);
            assert_eq!(bar.second_half.coverage, 0.0);
        }
        assert!(report.bars[0].first_half.coverage > 0.99);
    }

    #[test]
    fn test_non_common_meter_is_advisory() {
        let notes = triad(C_MAJOR, 0, WINDOW);
        let meter = Meter::new(PPQ as u32, 3, 4);
        let report = analyze_detailed(&notes, &meter, &AnalysisConfig::default())
            .expect("Analysis should succeed");

        assert_eq!(report.metadata.bar_ticks, 1440);
        assert!(report
            .metadata
            .advisories
            .contains(&Advisory::UnexpectedMeter {
                numerator: 3,
                denominator: 4
            }));
        assert_eq!(report.result.bar_labels(), vec!["I"; 8]);
    }

    #[test]
    fn test_midi_bytes_end_to_end() {
        let mut notes = triad(C_MAJOR, 0, BAR / 2);
        notes.extend(triad(G_MAJOR, BAR / 2, BAR));
        notes.extend(triad(C_MAJOR, BAR, WINDOW));
        let bytes = encode_midi(&notes, None);

        let report = analyze_midi_bytes(&bytes, &AnalysisConfig::default())
            .expect("Analysis should succeed");

        assert_eq!(report.metadata.note_count, notes.len());
        assert!(report.metadata.advisories.is_empty());
        assert_eq!(report.result, analyze(&notes, PPQ as u32, 4, 4).unwrap());
    }

    #[test]
    fn test_midi_time_signature_is_read() {
        let notes = triad(C_MAJOR, 0, WINDOW);
        let bytes = encode_midi(&notes, Some((6, 3)));

        let report = analyze_midi_bytes(&bytes, &AnalysisConfig::default())
            .expect("Analysis should succeed");

        assert_eq!(report.metadata.bar_ticks, 1440);
        assert_eq!(
            report.metadata.advisories,
            vec![Advisory::UnexpectedMeter {
                numerator: 6,
                denominator: 8
            }]
        );
    }

    #[test]
    fn test_percussion_only_midi_fails() {
        let bytes = encode_midi(&[], None);
        let result = analyze_midi_bytes(&bytes, &AnalysisConfig::default());
        assert!(matches!(result, Err(AnalysisError::InvalidInput(_))));
    }

    #[test]
    fn test_sidecar_roundtrip() {
        let mut notes = triad(C_MAJOR, 0, BAR / 2);
        notes.extend(triad(G_MAJOR, BAR / 2, BAR));
        notes.extend(triad(C_MAJOR, BAR, WINDOW));
        let result = analyze(&notes, PPQ as u32, 4, 4).unwrap();

        let yaml = to_yaml_string(&result).unwrap();
        assert!(yaml.starts_with("key: C\nmode: major\nbars:\n"), "yaml:\n{}", yaml);
        let parsed = from_yaml_str(&yaml).unwrap();
        assert_eq!(parsed.key, result.key);
        assert_eq!(parsed.mode, result.mode);
        assert_eq!(parsed.bars, result.bars);

        let dir = std::env::temp_dir().join(format!("harmonic_sidecar_it_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = write_sidecar(dir.join("phrase.mid"), &result).unwrap();
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("yml"));
        assert_eq!(read_sidecar(&path).unwrap(), result);
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
