use thiserror::Error;

/// Errors of one track decode pass. Positions are byte offsets from the start
/// of the track payload.
#[derive(Debug, Error)]
pub enum MIDIParseError {
    #[error("Variable length value longer than 4 bytes (position: {position:#06x})")]
    MalformedVarint { position: u64 },
    #[error("Data byte found before any status byte (position: {position:#06x})")]
    MissingRunningStatus { position: u64 },
    #[error("Unsupported event type {status:#04x} (position: {position:#06x})")]
    UnsupportedEventType { status: u8, position: u64 },
    #[error("Meta event declares {expected} bytes but the stream ended (position: {position:#06x})")]
    TruncatedMeta { expected: u64, position: u64 },
    #[error("Sysex event declares {expected} bytes but the stream ended (position: {position:#06x})")]
    TruncatedSysex { expected: u64, position: u64 },
    #[error("Event overruns the track (position: {position:#06x}, needed: {needed} bytes, track length: {track_len})")]
    TrackOverrun {
        position: u64,
        needed: u64,
        track_len: u64,
    },
    #[error("Filesystem error: {0}")]
    FilesystemError(#[from] std::io::Error),
}

impl MIDIParseError {
    /// The payload offset the error was detected at, if it has one.
    pub fn position(&self) -> Option<u64> {
        match self {
            MIDIParseError::MalformedVarint { position }
            | MIDIParseError::MissingRunningStatus { position }
            | MIDIParseError::UnsupportedEventType { position, .. }
            | MIDIParseError::TruncatedMeta { position, .. }
            | MIDIParseError::TruncatedSysex { position, .. }
            | MIDIParseError::TrackOverrun { position, .. } => Some(*position),
            MIDIParseError::FilesystemError(_) => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum MIDILoadError {
    #[error("Corrupt chunks (position: {position:#06x}): {reason}")]
    CorruptChunks { position: u64, reason: &'static str },
    #[error("Filesystem error: {0}")]
    FilesystemError(#[from] std::io::Error),
    #[error("Track {track_number}: {source}")]
    Track {
        track_number: u32,
        #[source]
        source: MIDIParseError,
    },
}
