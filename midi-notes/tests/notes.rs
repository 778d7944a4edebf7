use std::io::Cursor;

use midi_notes::{
    events::{replay, Event, EventRecorder},
    io::{
        read_notes, read_track_events, FullRamTrackReader, MIDIFile, MIDILoadError,
        MIDIParseError, TrackDecoder,
    },
    notes::{read_track_notes, Note, NoteCollector},
};
use pretty_assertions::assert_eq;

fn note(key: u8, start: u64, len: u64, velocity: u8, instrument: u8) -> Note<u64> {
    Note {
        key,
        start,
        len,
        velocity,
        instrument,
    }
}

fn track_notes(bytes: &[u8]) -> Result<Vec<Note<u64>>, MIDIParseError> {
    read_track_notes(FullRamTrackReader::new(bytes))
}

fn smf(tracks: &[&[u8]]) -> Vec<u8> {
    let mut file = Vec::new();
    file.extend_from_slice(b"MThd");
    file.extend_from_slice(&6u32.to_be_bytes());
    file.extend_from_slice(&1u16.to_be_bytes());
    file.extend_from_slice(&(tracks.len() as u16).to_be_bytes());
    file.extend_from_slice(&96u16.to_be_bytes());
    for track in tracks {
        file.extend_from_slice(b"MTrk");
        file.extend_from_slice(&(track.len() as u32).to_be_bytes());
        file.extend_from_slice(track);
    }
    file
}

#[test]
fn single_note() {
    let notes = track_notes(&[0x00, 0x90, 0x3C, 0x40, 0x60, 0x80, 0x3C, 0x40]).unwrap();
    assert_eq!(notes, vec![note(0x3C, 0, 96, 0x40, 0)]);
}

#[test]
fn running_status_notes() {
    let notes = track_notes(&[
        0x00, 0x90, 0x3C, 0x40, // on
        0x10, 0x3E, 0x40, // on, running status
        0x10, 0x3C, 0x00, // off
        0x10, 0x3E, 0x00, // off
    ])
    .unwrap();
    assert_eq!(
        notes,
        vec![note(0x3C, 0, 32, 0x40, 0), note(0x3E, 16, 32, 0x40, 0)]
    );
}

#[test]
fn zero_velocity_ends_note() {
    let notes = track_notes(&[0x00, 0x90, 0x3C, 0x40, 0x00, 0x90, 0x3C, 0x00]).unwrap();
    assert_eq!(notes, vec![note(0x3C, 0, 0, 0x40, 0)]);
}

#[test]
fn channels_are_isolated() {
    let notes = track_notes(&[
        0x00, 0xC1, 0x05, // program 5 on channel 1
        0x00, 0x90, 0x3C, 0x40, // channel 0 on
        0x08, 0x91, 0x3C, 0x50, // channel 1 on
        0x08, 0x81, 0x3C, 0x00, // channel 1 off
        0x08, 0x80, 0x3C, 0x00, // channel 0 off
    ])
    .unwrap();
    assert_eq!(
        notes,
        vec![note(0x3C, 8, 8, 0x50, 5), note(0x3C, 0, 24, 0x40, 0)]
    );
}

#[test]
fn overlapping_note_on_closes_previous() {
    let notes = track_notes(&[
        0x00, 0x90, 0x3C, 0x40, //
        0x10, 0x90, 0x3C, 0x50, //
        0x10, 0x80, 0x3C, 0x00, //
    ])
    .unwrap();
    assert_eq!(
        notes,
        vec![note(0x3C, 0, 16, 0x40, 0), note(0x3C, 16, 16, 0x50, 0)]
    );
}

#[test]
fn overrun_emits_no_partial_note() {
    let bytes = [0x00, 0x90, 0x3C, 0x40, 0x10, 0x80, 0x3C, 0x00];
    let mut notes: Vec<Note<u64>> = Vec::new();
    let result = {
        let mut collector = NoteCollector::new(|n| notes.push(n));
        TrackDecoder::new(FullRamTrackReader::with_len(&bytes, 7)).decode(&mut collector)
    };
    assert!(matches!(result, Err(MIDIParseError::TrackOverrun { .. })));
    assert!(notes.is_empty());
}

#[test]
fn meta_and_sysex_do_not_disturb_notes() {
    let notes = track_notes(&[
        0x00, 0x90, 0x3C, 0x40, //
        0x10, 0xFF, 0x51, 0x03, 0x07, 0xA1, 0x20, // tempo
        0x10, 0xF0, 0x02, 0x7E, 0xF7, // sysex
        0x10, 0x80, 0x3C, 0x00, // status must be given again
        0x00, 0xFF, 0x2F, 0x00,
    ])
    .unwrap();
    assert_eq!(notes, vec![note(0x3C, 0, 48, 0x40, 0)]);
}

#[test]
fn data_bytes_after_meta_repeat_the_meta() {
    let bytes = [
        0x00, 0x90, 0x3C, 0x40, //
        0x00, 0xFF, 0x01, 0x00, // empty text
        0x10, 0x3C, 0x00, // a meta of type 0x3C, not a note-off
    ];
    let events = read_track_events(FullRamTrackReader::new(&bytes)).unwrap();
    assert_eq!(events[2].event, Event::new_meta(0x3C, vec![]));
    assert!(track_notes(&bytes).unwrap().is_empty());
}

#[test]
fn time_does_not_overflow_on_long_tracks() {
    let mut bytes = vec![0x00, 0x90, 0x3C, 0x40];
    for _ in 0..17 {
        bytes.extend_from_slice(&[0xFF, 0xFF, 0xFF, 0x7F, 0xFF, 0x01, 0x00]);
    }
    bytes.extend_from_slice(&[0x00, 0x80, 0x3C, 0x00]);
    let expected_len = 17 * 0x0FFF_FFFFu64;

    let notes = track_notes(&bytes).unwrap();
    assert_eq!(notes, vec![note(0x3C, 0, expected_len, 0x40, 0)]);

    let notes: Vec<Note<i64>> = read_track_notes(FullRamTrackReader::new(&bytes)).unwrap();
    assert_eq!(notes[0].len, expected_len as i64);

    let notes: Vec<Note<f64>> = read_track_notes(FullRamTrackReader::new(&bytes)).unwrap();
    assert_eq!(notes[0].len, expected_len as f64);
}

#[test]
fn running_status_does_not_cross_tracks() {
    let first: &[u8] = &[0x00, 0x90, 0x3C, 0x40, 0x10, 0x80, 0x3C, 0x00];
    let second: &[u8] = &[0x00, 0x3E, 0x40];
    let bytes = smf(&[first, second]);

    let mut file = MIDIFile::new(Cursor::new(&bytes)).unwrap();
    let mut recorder = EventRecorder::new();
    assert_eq!(file.next_track(&mut recorder).unwrap(), Some(0));
    let err = file.next_track(&mut recorder).unwrap_err();
    match err {
        MIDILoadError::Track {
            track_number: 1,
            source,
        } => {
            assert!(matches!(source, MIDIParseError::MissingRunningStatus { .. }));
            assert_eq!(source.position(), Some(1));
        }
        other => panic!("unexpected error {:?}", other),
    }
    assert_eq!(recorder.events().len(), 2);
}

#[test]
fn held_notes_do_not_cross_tracks() {
    let first: &[u8] = &[0x00, 0x90, 0x3C, 0x40, 0x10, 0xFF, 0x2F, 0x00];
    let second: &[u8] = &[0x20, 0x80, 0x3C, 0x00, 0x00, 0xFF, 0x2F, 0x00];
    let bytes = smf(&[first, second]);

    let per_track: Vec<Vec<Note<u64>>> = MIDIFile::new(Cursor::new(&bytes))
        .unwrap()
        .read_track_notes_all()
        .unwrap();
    assert_eq!(per_track.len(), 2);
    assert!(per_track.iter().all(|notes| notes.is_empty()));
}

#[test]
fn whole_file() {
    let first: &[u8] = &[
        0x00, 0xFF, 0x51, 0x03, 0x07, 0xA1, 0x20, //
        0x00, 0xFF, 0x2F, 0x00,
    ];
    let second: &[u8] = &[
        0x00, 0xC0, 0x18, //
        0x00, 0x90, 0x40, 0x64, //
        0x60, 0x80, 0x40, 0x00, //
        0x00, 0xFF, 0x2F, 0x00,
    ];
    let third: &[u8] = &[
        0x30, 0x92, 0x24, 0x7F, //
        0x30, 0x92, 0x24, 0x00, //
        0x00, 0xFF, 0x2F, 0x00,
    ];
    let bytes = smf(&[first, second, third]);

    let notes: Vec<Note<u64>> = read_notes(Cursor::new(&bytes)).unwrap();
    assert_eq!(
        notes,
        vec![note(0x40, 0, 96, 0x64, 0x18), note(0x24, 48, 48, 0x7F, 0)]
    );

    let mut file = MIDIFile::new(Cursor::new(&bytes)).unwrap();
    assert_eq!(file.ppq(), Some(96));
    let per_track: Vec<Vec<Note<f64>>> = file.read_track_notes_all().unwrap();
    assert_eq!(per_track.len(), 3);
    assert!(per_track[0].is_empty());
    assert_eq!(per_track[2][0].start, 48.0);
    assert_eq!(file.tracks_read(), 3);
}

#[test]
fn broken_track_is_reported_with_its_number() {
    let good: &[u8] = &[0x00, 0xFF, 0x2F, 0x00];
    let bad: &[u8] = &[0x00, 0x3C, 0x40];
    let bytes = smf(&[good, bad]);

    let result: Result<Vec<Note<u64>>, _> = read_notes(Cursor::new(&bytes));
    match result {
        Err(MIDILoadError::Track {
            track_number,
            source: MIDIParseError::MissingRunningStatus { .. },
        }) => assert_eq!(track_number, 1),
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn recorded_events_replay_to_the_same_notes() {
    let bytes = [
        0x00, 0xC3, 0x09, //
        0x00, 0x93, 0x30, 0x20, //
        0x05, 0xE3, 0x00, 0x40, //
        0x05, 0x83, 0x30, 0x00,
    ];
    let mut recorder = EventRecorder::new();
    TrackDecoder::new(FullRamTrackReader::new(&bytes))
        .decode(&mut recorder)
        .unwrap();
    assert!(matches!(
        recorder.events()[2].event,
        Event::PitchWheelChange(_)
    ));

    let mut notes: Vec<Note<u64>> = Vec::new();
    {
        let mut collector = NoteCollector::new(|n| notes.push(n));
        replay(recorder.events(), &mut collector);
    }
    assert_eq!(notes, track_notes(&bytes).unwrap());
    assert_eq!(notes, vec![note(0x30, 0, 10, 0x20, 9)]);
}
