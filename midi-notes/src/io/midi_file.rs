use std::{
    fs::File,
    io::{self, BufReader, Read},
    path::Path,
};

use tracing::{debug, warn};

use crate::{
    events::EventReceiver,
    notes::{Note, NoteCollector},
    num::MIDINum,
};

use super::{errors::MIDILoadError, readers::StreamTrackReader, track_parser::TrackDecoder};

/// The 8 byte header in front of every chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHeader {
    pub id: [u8; 4],
    pub len: u32,
}

impl ChunkHeader {
    pub const HEADER_ID: [u8; 4] = *b"MThd";
    pub const TRACK_ID: [u8; 4] = *b"MTrk";

    pub fn from_bytes(bytes: [u8; 8]) -> Self {
        let [a, b, c, d, l0, l1, l2, l3] = bytes;
        Self {
            id: [a, b, c, d],
            len: u32::from_be_bytes([l0, l1, l2, l3]),
        }
    }

    pub fn id_str(&self) -> String {
        String::from_utf8_lossy(&self.id).into_owned()
    }

    pub fn is_track(&self) -> bool {
        self.id == Self::TRACK_ID
    }
}

pub fn read_chunk_header<R: Read>(reader: &mut R) -> Result<ChunkHeader, io::Error> {
    let mut bytes = [0u8; 8];
    reader.read_exact(&mut bytes)?;
    Ok(ChunkHeader::from_bytes(bytes))
}

/// Like [`read_chunk_header`], but a stream that ends before the first byte is
/// `None` rather than an error.
fn try_read_chunk_header<R: Read>(reader: &mut R) -> Result<Option<ChunkHeader>, io::Error> {
    let mut bytes = [0u8; 8];
    let mut filled = 0;
    while filled < bytes.len() {
        match reader.read(&mut bytes[filled..]) {
            Ok(0) if filled == 0 => return Ok(None),
            Ok(0) => return Err(io::Error::from(io::ErrorKind::UnexpectedEof)),
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(Some(ChunkHeader::from_bytes(bytes)))
}

fn skip_bytes<R: Read>(reader: &mut R, count: u64) -> Result<(), io::Error> {
    let skipped = io::copy(&mut reader.take(count), &mut io::sink())?;
    if skipped != count {
        return Err(io::Error::from(io::ErrorKind::UnexpectedEof));
    }
    Ok(())
}

/// How delta-time ticks relate to real time. Interpreting it is left to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Division {
    TicksPerQuarterNote(u16),
    Smpte { fps: u8, ticks_per_frame: u8 },
}

impl Division {
    pub fn from_raw(raw: u16) -> Self {
        if raw & 0x8000 == 0 {
            Division::TicksPerQuarterNote(raw)
        } else {
            let [hi, lo] = raw.to_be_bytes();
            Division::Smpte {
                fps: (hi as i8).unsigned_abs(),
                ticks_per_frame: lo,
            }
        }
    }
}

/// Contents of the `MThd` chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MIDIHeader {
    pub format: u16,
    pub track_count: u16,
    pub division: Division,
}

/// Reads the `MThd` chunk, leaving the reader at the first chunk after it.
pub fn read_mthd<R: Read>(reader: &mut R) -> Result<MIDIHeader, MIDILoadError> {
    let header = read_chunk_header(reader)?;
    if header.id != ChunkHeader::HEADER_ID {
        return Err(MIDILoadError::CorruptChunks {
            position: 0,
            reason: "missing MThd chunk",
        });
    }
    if header.len < 6 {
        return Err(MIDILoadError::CorruptChunks {
            position: 4,
            reason: "MThd chunk shorter than 6 bytes",
        });
    }

    let mut data = [0u8; 6];
    reader.read_exact(&mut data)?;
    skip_bytes(reader, header.len as u64 - 6)?;

    Ok(MIDIHeader {
        format: u16::from_be_bytes([data[0], data[1]]),
        track_count: u16::from_be_bytes([data[2], data[3]]),
        division: Division::from_raw(u16::from_be_bytes([data[4], data[5]])),
    })
}

/// A Standard MIDI File read front to back from a stream.
///
/// Tracks are decoded one after the other, each with its own decoder, so no
/// running status or time carries over between them.
#[derive(Debug)]
pub struct MIDIFile<R: Read> {
    reader: R,
    header: MIDIHeader,
    tracks_read: u32,
}

impl<R: Read> MIDIFile<R> {
    pub fn new(mut reader: R) -> Result<Self, MIDILoadError> {
        let header = read_mthd(&mut reader)?;
        debug!(
            format = header.format,
            track_count = header.track_count,
            "read MIDI header"
        );
        Ok(MIDIFile {
            reader,
            header,
            tracks_read: 0,
        })
    }

    pub fn header(&self) -> &MIDIHeader {
        &self.header
    }

    pub fn format(&self) -> u16 {
        self.header.format
    }

    /// Ticks per quarter note, if the file isn't SMPTE timed.
    pub fn ppq(&self) -> Option<u16> {
        match self.header.division {
            Division::TicksPerQuarterNote(ppq) => Some(ppq),
            Division::Smpte { .. } => None,
        }
    }

    /// Number of tracks decoded so far.
    pub fn tracks_read(&self) -> u32 {
        self.tracks_read
    }

    /// Decodes the next `MTrk` chunk into `receiver`, skipping chunks of any
    /// other type. Returns the track number, or `None` once the stream ends.
    pub fn next_track<E: EventReceiver + ?Sized>(
        &mut self,
        receiver: &mut E,
    ) -> Result<Option<u32>, MIDILoadError> {
        loop {
            let chunk = match try_read_chunk_header(&mut self.reader)? {
                Some(chunk) => chunk,
                None => {
                    if self.tracks_read != self.header.track_count as u32 {
                        debug!(
                            declared = self.header.track_count,
                            found = self.tracks_read,
                            "track count mismatch"
                        );
                    }
                    return Ok(None);
                }
            };

            if !chunk.is_track() {
                warn!(id = %chunk.id_str(), len = chunk.len, "skipping unknown chunk");
                skip_bytes(&mut self.reader, chunk.len as u64)?;
                continue;
            }

            let track_number = self.tracks_read;
            debug!(track = track_number, len = chunk.len, "reading track chunk");
            let reader = StreamTrackReader::new(&mut self.reader, chunk.len as u64);
            TrackDecoder::new(reader)
                .decode(receiver)
                .map_err(|source| MIDILoadError::Track {
                    track_number,
                    source,
                })?;
            self.tracks_read += 1;
            return Ok(Some(track_number));
        }
    }

    /// Collects the notes of every remaining track, one list per track.
    pub fn read_track_notes_all<D: MIDINum>(&mut self) -> Result<Vec<Vec<Note<D>>>, MIDILoadError> {
        let mut tracks = Vec::new();
        loop {
            let mut notes = Vec::new();
            let mut collector = NoteCollector::new(|note| notes.push(note));
            let track = self.next_track(&mut collector)?;
            drop(collector);
            match track {
                Some(_) => tracks.push(notes),
                None => return Ok(tracks),
            }
        }
    }

    /// Collects the notes of every remaining track, track after track.
    pub fn read_notes<D: MIDINum>(&mut self) -> Result<Vec<Note<D>>, MIDILoadError> {
        Ok(self
            .read_track_notes_all()?
            .into_iter()
            .flatten()
            .collect())
    }
}

impl MIDIFile<BufReader<File>> {
    pub fn open(filename: impl AsRef<Path>) -> Result<Self, MIDILoadError> {
        let reader = File::open(filename)?;
        MIDIFile::new(BufReader::new(reader))
    }
}

/// Reads a whole Standard MIDI File from `reader` and returns its notes,
/// track after track.
pub fn read_notes<R: Read, D: MIDINum>(reader: R) -> Result<Vec<Note<D>>, MIDILoadError> {
    MIDIFile::new(reader)?.read_notes()
}
