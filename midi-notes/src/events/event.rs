use super::events::*;
use super::{DispatchEvent, EventReceiver, MIDIEvent};

use derive::EventImpl;

/// Owned form of one decoded event. The decoder itself never builds these; they
/// come from [`EventRecorder`](super::EventRecorder) or the `Event::new_*`
/// constructors.
#[derive(EventImpl, Debug, Clone, PartialEq, Eq)]
pub enum Event {
    NoteOn(NoteOnEvent),
    NoteOff(NoteOffEvent),
    PolyphonicKeyPressure(PolyphonicKeyPressureEvent),
    ControlChange(ControlChangeEvent),
    ProgramChange(ProgramChangeEvent),
    ChannelPressure(ChannelPressureEvent),
    PitchWheelChange(PitchWheelChangeEvent),
    Meta(MetaEvent),
    Sysex(SysexEvent),
}
