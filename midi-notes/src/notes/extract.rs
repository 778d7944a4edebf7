use crate::{
    io::{MIDIParseError, TrackDecoder, TrackReader},
    num::MIDINum,
};

use super::{Note, NoteCollector};

/// Decodes one track and passes each completed note to `on_note` as soon as
/// its closing event is decoded.
///
/// On error, notes already handed to `on_note` stay delivered.
pub fn decode_track_notes<T, D, F>(reader: T, on_note: F) -> Result<(), MIDIParseError>
where
    T: TrackReader,
    D: MIDINum,
    F: FnMut(Note<D>),
{
    let mut collector = NoteCollector::new(on_note);
    TrackDecoder::new(reader).decode(&mut collector)
}

/// Decodes one track into its notes, in the order they were closed.
pub fn read_track_notes<T: TrackReader, D: MIDINum>(
    reader: T,
) -> Result<Vec<Note<D>>, MIDIParseError> {
    let mut notes = Vec::new();
    decode_track_notes(reader, |note| notes.push(note))?;
    Ok(notes)
}
