pub use delta::Delta;
pub use event::Event;
pub use events::*;
pub use multicaster::EventMulticaster;
pub use receiver::EventReceiver;
pub use recorder::{replay, EventRecorder};

mod delta;
mod event;
mod events;
mod multicaster;
mod receiver;
mod recorder;

/// Channel and key accessors shared by every owned event type.
pub trait MIDIEvent: std::fmt::Debug {
    fn key(&self) -> Option<u8>;
    fn channel(&self) -> Option<u8>;
}

/// An owned event that can be fed back into any [`EventReceiver`], calling the
/// same callback the decoder would have called for it.
pub trait DispatchEvent {
    fn dispatch<R: EventReceiver + ?Sized>(&self, delta: u64, receiver: &mut R);
}
