use tracing::trace;

use crate::{events::EventReceiver, num::MIDINum};

use super::{Note, KEY_COUNT};

#[derive(Debug, Clone, Copy)]
struct PendingNote<D: MIDINum> {
    start: D,
    velocity: u8,
    instrument: u8,
}

/// Pairs note-ons with their note-offs for a single channel.
///
/// The collector sees the events of every channel, since delta-times are
/// relative to the previous event of the whole track, but only acts on its own.
/// Notes still held when the track ends are never emitted.
pub struct ChannelNoteCollector<D: MIDINum, F: FnMut(Note<D>)> {
    channel: u8,
    time: D,
    instrument: u8,
    pending: [Option<PendingNote<D>>; KEY_COUNT],
    on_note: F,
}

impl<D: MIDINum, F: FnMut(Note<D>)> ChannelNoteCollector<D, F> {
    pub fn new(channel: u8, on_note: F) -> Self {
        Self {
            channel,
            time: D::zero(),
            instrument: 0,
            pending: [None; KEY_COUNT],
            on_note,
        }
    }

    pub fn channel(&self) -> u8 {
        self.channel
    }

    /// The time of the last event seen.
    pub fn time(&self) -> D {
        self.time
    }

    /// The current program of the channel.
    pub fn instrument(&self) -> u8 {
        self.instrument
    }

    /// Number of notes that have started but not ended yet.
    pub fn pending_count(&self) -> usize {
        self.pending.iter().filter(|p| p.is_some()).count()
    }

    #[inline(always)]
    fn advance(&mut self, delta: u64) {
        self.time += D::midi_num_from(delta);
    }

    /// Ends the note held on `key` at the current time. Returns false if there
    /// was none.
    fn close(&mut self, key: u8) -> bool {
        let pending = match self.pending.get_mut(key as usize).and_then(Option::take) {
            Some(pending) => pending,
            None => return false,
        };
        (self.on_note)(Note {
            key,
            start: pending.start,
            len: self.time - pending.start,
            velocity: pending.velocity,
            instrument: pending.instrument,
        });
        true
    }

    fn release(&mut self, key: u8) {
        if !self.close(key) {
            trace!(channel = self.channel, key = key, "note off without a held note");
        }
    }
}

impl<D: MIDINum, F: FnMut(Note<D>)> EventReceiver for ChannelNoteCollector<D, F> {
    fn note_on(&mut self, delta: u64, channel: u8, key: u8, velocity: u8) {
        self.advance(delta);
        if channel != self.channel || key as usize >= KEY_COUNT {
            return;
        }
        if velocity == 0 {
            self.release(key);
            return;
        }
        if self.close(key) {
            trace!(channel = self.channel, key = key, "note on over a held note");
        }
        self.pending[key as usize] = Some(PendingNote {
            start: self.time,
            velocity,
            instrument: self.instrument,
        });
    }

    fn note_off(&mut self, delta: u64, channel: u8, key: u8, _velocity: u8) {
        self.advance(delta);
        if channel == self.channel {
            self.release(key);
        }
    }

    fn polyphonic_key_pressure(&mut self, delta: u64, _channel: u8, _key: u8, _pressure: u8) {
        self.advance(delta);
    }

    fn control_change(&mut self, delta: u64, _channel: u8, _controller: u8, _value: u8) {
        self.advance(delta);
    }

    fn program_change(&mut self, delta: u64, channel: u8, program: u8) {
        self.advance(delta);
        if channel == self.channel {
            self.instrument = program;
        }
    }

    fn channel_pressure(&mut self, delta: u64, _channel: u8, _pressure: u8) {
        self.advance(delta);
    }

    fn pitch_wheel_change(&mut self, delta: u64, _channel: u8, _value: u16) {
        self.advance(delta);
    }

    fn meta(&mut self, delta: u64, _kind: u8, _data: &[u8]) {
        self.advance(delta);
    }

    fn sysex(&mut self, delta: u64, _data: &[u8]) {
        self.advance(delta);
    }
}
