use super::event::Event;
use super::{Delta, DispatchEvent, EventReceiver, MIDIEvent};
use crate::num::MIDINum;
use derive::ReceiverEvent;

#[derive(Debug, ReceiverEvent, Clone, PartialEq, Eq)]
pub struct NoteOnEvent {
    #[channel]
    pub channel: u8,
    #[key]
    pub key: u8,
    pub velocity: u8,
}

/// The release velocity is kept as decoded, even though note collection ignores it.
#[derive(Debug, ReceiverEvent, Clone, PartialEq, Eq)]
pub struct NoteOffEvent {
    #[channel]
    pub channel: u8,
    #[key]
    pub key: u8,
    pub velocity: u8,
}

#[derive(Debug, ReceiverEvent, Clone, PartialEq, Eq)]
pub struct PolyphonicKeyPressureEvent {
    #[channel]
    pub channel: u8,
    #[key]
    pub key: u8,
    pub pressure: u8,
}

#[derive(Debug, ReceiverEvent, Clone, PartialEq, Eq)]
pub struct ControlChangeEvent {
    #[channel]
    pub channel: u8,
    pub controller: u8,
    pub value: u8,
}

#[derive(Debug, ReceiverEvent, Clone, PartialEq, Eq)]
pub struct ProgramChangeEvent {
    #[channel]
    pub channel: u8,
    pub program: u8,
}

#[derive(Debug, ReceiverEvent, Clone, PartialEq, Eq)]
pub struct ChannelPressureEvent {
    #[channel]
    pub channel: u8,
    pub pressure: u8,
}

/// `value` is the raw 14-bit wheel position, 0x2000 being centered.
#[derive(Debug, ReceiverEvent, Clone, PartialEq, Eq)]
pub struct PitchWheelChangeEvent {
    #[channel]
    pub channel: u8,
    pub value: u16,
}

#[derive(Debug, ReceiverEvent, Clone, PartialEq, Eq)]
pub struct MetaEvent {
    pub kind: u8,
    #[bytes]
    pub data: Vec<u8>,
}

impl MetaEvent {
    pub const END_OF_TRACK: u8 = 0x2F;
    pub const TEMPO: u8 = 0x51;
}

/// Both `F0` and `F7` framed payloads decode to this event; the framing byte
/// itself is not part of `data`.
#[derive(Debug, ReceiverEvent, Clone, PartialEq, Eq)]
pub struct SysexEvent {
    #[bytes]
    pub data: Vec<u8>,
}
