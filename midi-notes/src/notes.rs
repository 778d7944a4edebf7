use std::fmt;

use crate::num::MIDINum;

pub use channel_collector::ChannelNoteCollector;
pub use extract::{decode_track_notes, read_track_notes};
pub use note_collector::NoteCollector;

mod channel_collector;
mod extract;
mod note_collector;

/// Number of note slots per channel.
pub const KEY_COUNT: usize = 128;

/// Number of MIDI channels a track can address.
pub const CHANNEL_COUNT: u8 = 16;

pub trait MIDINote<T: MIDINum> {
    fn start(&self) -> T;
    fn len(&self) -> T;
    fn key(&self) -> u8;
    fn velocity(&self) -> u8;
    fn instrument(&self) -> u8;

    #[inline(always)]
    fn end(&self) -> T {
        self.start() + self.len()
    }
}

/// A note rebuilt from a note-on and the event that closed it.
///
/// `velocity` is the note-on velocity and `instrument` is the program that was
/// active on the channel when the note started.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note<T: MIDINum> {
    pub key: u8,
    pub start: T,
    pub len: T,
    pub velocity: u8,
    pub instrument: u8,
}

impl<T: MIDINum> MIDINote<T> for Note<T> {
    #[inline(always)]
    fn start(&self) -> T {
        self.start
    }

    #[inline(always)]
    fn len(&self) -> T {
        self.len
    }

    #[inline(always)]
    fn key(&self) -> u8 {
        self.key
    }

    #[inline(always)]
    fn velocity(&self) -> u8 {
        self.velocity
    }

    #[inline(always)]
    fn instrument(&self) -> u8 {
        self.instrument
    }
}

impl<T: MIDINum> fmt::Display for Note<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "NOTE(key: {}, start: {}, duration: {}, velocity: {}, instrument: {})",
            self.key, self.start, self.len, self.velocity, self.instrument
        )
    }
}
