use crate::{
    events::{DispatchEvent, EventReceiver, MIDIEvent},
    num::MIDINum,
};

/// An event paired with the time elapsed since the previous event of its track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delta<D: MIDINum, E> {
    pub delta: D,
    pub event: E,
}

impl<D: MIDINum, E> Delta<D, E> {
    #[inline(always)]
    pub fn new(delta: D, event: E) -> Self {
        Self { delta, event }
    }
}

impl<D: MIDINum, E: MIDIEvent> MIDIEvent for Delta<D, E> {
    fn key(&self) -> Option<u8> {
        self.event.key()
    }

    fn channel(&self) -> Option<u8> {
        self.event.channel()
    }
}

impl<E: DispatchEvent> Delta<u64, E> {
    /// Calls the receiver callback for the wrapped event, with this delta.
    #[inline(always)]
    pub fn dispatch_to<R: EventReceiver + ?Sized>(&self, receiver: &mut R) {
        self.event.dispatch(self.delta, receiver)
    }
}
