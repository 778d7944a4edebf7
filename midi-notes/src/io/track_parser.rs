use std::io::{self, Read};

use tracing::{debug, trace};

use crate::events::{Delta, Event, EventReceiver, EventRecorder};

use super::{
    errors::MIDIParseError,
    readers::{StreamTrackReader, TrackReader},
};

/// Meta and sysex payloads are copied in blocks of this size.
const PAYLOAD_BLOCK: usize = 4096;

/// Decodes the events of one track payload and hands each one to an
/// [`EventReceiver`].
///
/// Running status lives here, so a decoder is only ever used for one track.
pub struct TrackDecoder<T: TrackReader> {
    reader: T,
    running_status: Option<u8>,
    buffer: Vec<u8>,
    event_count: u64,
}

impl<T: TrackReader> TrackDecoder<T> {
    pub fn new(reader: T) -> Self {
        Self {
            reader,
            running_status: None,
            buffer: Vec::new(),
            event_count: 0,
        }
    }

    /// Reads a variable length value. `first` is a byte already taken from the
    /// reader, as happens when running status repeats a meta or sysex status.
    fn read_var_length(&mut self, mut first: Option<u8>) -> Result<u64, MIDIParseError> {
        let position = self.reader.pos() - first.is_some() as u64;
        let mut n: u64 = 0;
        for _ in 0..4 {
            let byte = match first.take() {
                Some(byte) => byte,
                None => self.reader.read()?,
            };
            n = (n << 7) | (byte & 0x7F) as u64;
            if (byte & 0x80) == 0 {
                return Ok(n);
            }
        }
        Err(MIDIParseError::MalformedVarint { position })
    }

    /// Loads a meta/sysex payload into the decoder's buffer.
    fn read_payload(
        &mut self,
        len: u64,
        truncated: fn(u64, u64) -> MIDIParseError,
    ) -> Result<(), MIDIParseError> {
        let position = self.reader.pos();
        if len > self.reader.remaining() {
            return Err(MIDIParseError::TrackOverrun {
                position,
                needed: len,
                track_len: self.reader.len(),
            });
        }

        // Grows only by bytes actually read, never by the declared length up front.
        self.buffer.clear();
        let mut block = [0u8; PAYLOAD_BLOCK];
        let mut left = len;
        while left > 0 {
            let size = left.min(PAYLOAD_BLOCK as u64) as usize;
            match self.reader.read_into(&mut block[..size]) {
                Ok(()) => self.buffer.extend_from_slice(&block[..size]),
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    return Err(truncated(len, position))
                }
                Err(e) => return Err(e.into()),
            }
            left -= size as u64;
        }
        Ok(())
    }

    /// Decodes a single event. The receiver is only called once the whole event
    /// has been read.
    pub fn decode_event<R: EventReceiver + ?Sized>(
        &mut self,
        receiver: &mut R,
    ) -> Result<(), MIDIParseError> {
        let delta = self.read_var_length(None)?;

        let status_pos = self.reader.pos();
        let first = self.reader.read()?;
        let (status, mut pushback) = if first >= 0x80 {
            self.running_status = Some(first);
            (first, None)
        } else {
            match self.running_status {
                Some(status) => (status, Some(first)),
                None => {
                    return Err(MIDIParseError::MissingRunningStatus {
                        position: status_pos,
                    })
                }
            }
        };

        match status {
            0x80..=0xEF => {
                let channel = status & 0x0F;
                let var1 = match pushback.take() {
                    Some(b) => b,
                    None => self.reader.read()?,
                };
                match status & 0xF0 {
                    0x80 => {
                        let vel = self.reader.read()?;
                        receiver.note_off(delta, channel, var1, vel);
                    }
                    0x90 => {
                        let vel = self.reader.read()?;
                        receiver.note_on(delta, channel, var1, vel);
                    }
                    0xA0 => {
                        let pressure = self.reader.read()?;
                        receiver.polyphonic_key_pressure(delta, channel, var1, pressure);
                    }
                    0xB0 => {
                        let value = self.reader.read()?;
                        receiver.control_change(delta, channel, var1, value);
                    }
                    0xC0 => receiver.program_change(delta, channel, var1),
                    0xD0 => receiver.channel_pressure(delta, channel, var1),
                    // 0xE0, the last channel message
                    _ => {
                        let var2 = self.reader.read()?;
                        let value = ((var2 as u16 & 0x7F) << 7) | (var1 as u16 & 0x7F);
                        receiver.pitch_wheel_change(delta, channel, value);
                    }
                }
            }
            0xFF => {
                let kind = match pushback.take() {
                    Some(b) => b,
                    None => self.reader.read()?,
                };
                let len = self.read_var_length(None)?;
                self.read_payload(len, |expected, position| MIDIParseError::TruncatedMeta {
                    expected,
                    position,
                })?;
                receiver.meta(delta, kind, &self.buffer);
            }
            0xF0 | 0xF7 => {
                let len = self.read_var_length(pushback.take())?;
                self.read_payload(len, |expected, position| {
                    MIDIParseError::TruncatedSysex { expected, position }
                })?;
                receiver.sysex(delta, &self.buffer);
            }
            _ => {
                return Err(MIDIParseError::UnsupportedEventType {
                    status,
                    position: status_pos,
                })
            }
        }

        self.event_count += 1;
        trace!(
            status = status,
            delta = delta,
            position = status_pos,
            "decoded event"
        );
        Ok(())
    }

    /// Decodes events until exactly the declared payload length is consumed.
    pub fn decode<R: EventReceiver + ?Sized>(
        &mut self,
        receiver: &mut R,
    ) -> Result<(), MIDIParseError> {
        debug!(track_len = self.reader.len(), "decoding track");
        while !self.reader.is_finished() {
            self.decode_event(receiver)?;
        }
        debug!(events = self.event_count, "finished track");
        Ok(())
    }
}

/// Decodes a track payload of `payload_length` bytes from `stream`.
pub fn decode_track<S: Read, R: EventReceiver + ?Sized>(
    stream: S,
    payload_length: u64,
    receiver: &mut R,
) -> Result<(), MIDIParseError> {
    TrackDecoder::new(StreamTrackReader::new(stream, payload_length)).decode(receiver)
}

/// Decodes a whole track into owned events.
pub fn read_track_events<T: TrackReader>(
    reader: T,
) -> Result<Vec<Delta<u64, Event>>, MIDIParseError> {
    let mut recorder = EventRecorder::new();
    TrackDecoder::new(reader).decode(&mut recorder)?;
    Ok(recorder.into_events())
}
