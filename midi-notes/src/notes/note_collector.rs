use std::{cell::RefCell, marker::PhantomData, rc::Rc};

use derive::DelegateReceiver;

use crate::{
    events::{EventMulticaster, EventReceiver},
    num::MIDINum,
};

use super::{ChannelNoteCollector, Note, CHANNEL_COUNT};

/// Collects the notes of all 16 channels of a track into one callback.
///
/// Notes arrive in the order their closing events appear in the track, so they
/// are not sorted by start time.
#[derive(DelegateReceiver)]
pub struct NoteCollector<'a, D: MIDINum> {
    #[delegate]
    multicaster: EventMulticaster<'a>,
    _time: PhantomData<D>,
}

impl<'a, D: 'a + MIDINum> NoteCollector<'a, D> {
    pub fn new<F: 'a + FnMut(Note<D>)>(on_note: F) -> Self {
        let on_note = Rc::new(RefCell::new(on_note));

        let receivers = (0..CHANNEL_COUNT)
            .map(|channel| {
                let on_note = on_note.clone();
                let collector = ChannelNoteCollector::new(channel, move |note: Note<D>| {
                    let mut on_note = on_note.borrow_mut();
                    (*on_note)(note)
                });
                Box::new(collector) as Box<dyn EventReceiver + 'a>
            })
            .collect();

        Self {
            multicaster: EventMulticaster::new(receivers),
            _time: PhantomData,
        }
    }
}

impl<'a, D: MIDINum> std::fmt::Debug for NoteCollector<'a, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoteCollector")
            .field("multicaster", &self.multicaster)
            .finish()
    }
}
