use std::io::{self, Read};

use super::errors::MIDIParseError;

/// Byte source for one track payload, bounded by the chunk's declared length.
///
/// `read` never goes past `len()`: asking for a byte at the boundary is a
/// [`MIDIParseError::TrackOverrun`].
pub trait TrackReader {
    fn read(&mut self) -> Result<u8, MIDIParseError>;

    /// Fills `buf` completely. Callers check `remaining()` first, so hitting the
    /// end of the underlying data here means the stream itself is truncated.
    fn read_into(&mut self, buf: &mut [u8]) -> Result<(), io::Error>;

    /// Bytes consumed so far, relative to the payload start.
    fn pos(&self) -> u64;

    /// The declared payload length.
    fn len(&self) -> u64;

    #[inline(always)]
    fn remaining(&self) -> u64 {
        self.len() - self.pos()
    }

    #[inline(always)]
    fn is_finished(&self) -> bool {
        self.pos() == self.len()
    }
}

fn overrun(pos: u64, len: u64, needed: u64) -> MIDIParseError {
    MIDIParseError::TrackOverrun {
        position: pos,
        needed,
        track_len: len,
    }
}

/// Reads a track payload from any [`Read`] positioned at the payload start.
///
/// Wrap unbuffered sources (files, sockets) in a `BufReader`; bytes are pulled
/// one at a time.
#[derive(Debug)]
pub struct StreamTrackReader<R: Read> {
    reader: R,
    pos: u64,
    len: u64,
}

impl<R: Read> StreamTrackReader<R> {
    pub fn new(reader: R, len: u64) -> Self {
        Self {
            reader,
            pos: 0,
            len,
        }
    }
}

impl<R: Read> TrackReader for StreamTrackReader<R> {
    #[inline(always)]
    fn read(&mut self) -> Result<u8, MIDIParseError> {
        if self.pos == self.len {
            return Err(overrun(self.pos, self.len, 1));
        }
        let mut byte = [0u8; 1];
        self.reader.read_exact(&mut byte)?;
        self.pos += 1;
        Ok(byte[0])
    }

    fn read_into(&mut self, buf: &mut [u8]) -> Result<(), io::Error> {
        debug_assert!(buf.len() as u64 <= self.remaining());
        self.reader.read_exact(buf)?;
        self.pos += buf.len() as u64;
        Ok(())
    }

    fn pos(&self) -> u64 {
        self.pos
    }

    fn len(&self) -> u64 {
        self.len
    }
}

/// Reads a track payload that is already in memory.
#[derive(Debug, Clone)]
pub struct FullRamTrackReader<'a> {
    bytes: &'a [u8],
    pos: usize,
    len: u64,
}

impl<'a> FullRamTrackReader<'a> {
    /// The whole slice is the payload.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self::with_len(bytes, bytes.len() as u64)
    }

    /// `len` is the declared payload length, which may disagree with the slice
    /// length in damaged files.
    pub fn with_len(bytes: &'a [u8], len: u64) -> Self {
        Self { bytes, pos: 0, len }
    }
}

impl<'a> TrackReader for FullRamTrackReader<'a> {
    #[inline(always)]
    fn read(&mut self) -> Result<u8, MIDIParseError> {
        if self.pos as u64 == self.len {
            return Err(overrun(self.pos as u64, self.len, 1));
        }
        match self.bytes.get(self.pos) {
            Some(b) => {
                self.pos += 1;
                Ok(*b)
            }
            None => Err(io::Error::from(io::ErrorKind::UnexpectedEof).into()),
        }
    }

    fn read_into(&mut self, buf: &mut [u8]) -> Result<(), io::Error> {
        debug_assert!(buf.len() as u64 <= self.remaining());
        let end = self.pos + buf.len();
        match self.bytes.get(self.pos..end) {
            Some(src) => {
                buf.copy_from_slice(src);
                self.pos = end;
                Ok(())
            }
            None => Err(io::Error::from(io::ErrorKind::UnexpectedEof)),
        }
    }

    fn pos(&self) -> u64 {
        self.pos as u64
    }

    fn len(&self) -> u64 {
        self.len
    }
}
