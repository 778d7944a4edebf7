use super::{Delta, Event, EventReceiver};

/// Receiver that keeps an owned copy of every event it is given.
#[derive(Debug, Default, Clone)]
pub struct EventRecorder {
    events: Vec<Delta<u64, Event>>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[Delta<u64, Event>] {
        &self.events
    }

    pub fn into_events(self) -> Vec<Delta<u64, Event>> {
        self.events
    }
}

impl EventReceiver for EventRecorder {
    fn note_on(&mut self, delta: u64, channel: u8, key: u8, velocity: u8) {
        self.events
            .push(Event::new_delta_note_on(delta, channel, key, velocity));
    }

    fn note_off(&mut self, delta: u64, channel: u8, key: u8, velocity: u8) {
        self.events
            .push(Event::new_delta_note_off(delta, channel, key, velocity));
    }

    fn polyphonic_key_pressure(&mut self, delta: u64, channel: u8, key: u8, pressure: u8) {
        self.events.push(Event::new_delta_polyphonic_key_pressure(
            delta, channel, key, pressure,
        ));
    }

    fn control_change(&mut self, delta: u64, channel: u8, controller: u8, value: u8) {
        self.events.push(Event::new_delta_control_change(
            delta, channel, controller, value,
        ));
    }

    fn program_change(&mut self, delta: u64, channel: u8, program: u8) {
        self.events
            .push(Event::new_delta_program_change(delta, channel, program));
    }

    fn channel_pressure(&mut self, delta: u64, channel: u8, pressure: u8) {
        self.events
            .push(Event::new_delta_channel_pressure(delta, channel, pressure));
    }

    fn pitch_wheel_change(&mut self, delta: u64, channel: u8, value: u16) {
        self.events
            .push(Event::new_delta_pitch_wheel_change(delta, channel, value));
    }

    fn meta(&mut self, delta: u64, kind: u8, data: &[u8]) {
        self.events
            .push(Event::new_delta_meta(delta, kind, data.to_vec()));
    }

    fn sysex(&mut self, delta: u64, data: &[u8]) {
        self.events.push(Event::new_delta_sysex(delta, data.to_vec()));
    }
}

/// Feeds recorded events back into a receiver, in order.
pub fn replay<'a, R, I>(events: I, receiver: &mut R)
where
    R: EventReceiver + ?Sized,
    I: IntoIterator<Item = &'a Delta<u64, Event>>,
{
    for event in events {
        event.dispatch_to(receiver);
    }
}
