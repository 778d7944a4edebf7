//! Decoding of Standard MIDI File track chunks into events, and reconstruction
//! of the notes those events describe.
//!
//! The decoder in [`io`] walks the bytes of a track and reports every event to
//! an [`events::EventReceiver`]. The collectors in [`notes`] are receivers that
//! pair note-ons with their note-offs and hand out finished [`notes::Note`]s.

pub mod events;
pub mod io;
pub mod notes;
pub mod num;
