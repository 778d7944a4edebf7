use super::EventReceiver;

/// Fans every callback out to a list of receivers, in list order.
///
/// Receivers are called one after the other before the callback returns, so
/// each one sees the full event stream with the original delta-times.
pub struct EventMulticaster<'a> {
    receivers: Vec<Box<dyn EventReceiver + 'a>>,
}

impl<'a> EventMulticaster<'a> {
    pub fn new(receivers: Vec<Box<dyn EventReceiver + 'a>>) -> Self {
        Self { receivers }
    }

    pub fn push(&mut self, receiver: Box<dyn EventReceiver + 'a>) {
        self.receivers.push(receiver);
    }

    pub fn len(&self) -> usize {
        self.receivers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receivers.is_empty()
    }
}

impl<'a> Default for EventMulticaster<'a> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<'a> std::fmt::Debug for EventMulticaster<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventMulticaster")
            .field("receivers", &self.receivers.len())
            .finish()
    }
}

macro_rules! forward {
    ($self:ident . $method:ident ( $($arg:expr),* )) => {
        for receiver in $self.receivers.iter_mut() {
            receiver.$method($($arg),*);
        }
    };
}

impl<'a> EventReceiver for EventMulticaster<'a> {
    fn note_on(&mut self, delta: u64, channel: u8, key: u8, velocity: u8) {
        forward!(self.note_on(delta, channel, key, velocity));
    }

    fn note_off(&mut self, delta: u64, channel: u8, key: u8, velocity: u8) {
        forward!(self.note_off(delta, channel, key, velocity));
    }

    fn polyphonic_key_pressure(&mut self, delta: u64, channel: u8, key: u8, pressure: u8) {
        forward!(self.polyphonic_key_pressure(delta, channel, key, pressure));
    }

    fn control_change(&mut self, delta: u64, channel: u8, controller: u8, value: u8) {
        forward!(self.control_change(delta, channel, controller, value));
    }

    fn program_change(&mut self, delta: u64, channel: u8, program: u8) {
        forward!(self.program_change(delta, channel, program));
    }

    fn channel_pressure(&mut self, delta: u64, channel: u8, pressure: u8) {
        forward!(self.channel_pressure(delta, channel, pressure));
    }

    fn pitch_wheel_change(&mut self, delta: u64, channel: u8, value: u16) {
        forward!(self.pitch_wheel_change(delta, channel, value));
    }

    fn meta(&mut self, delta: u64, kind: u8, data: &[u8]) {
        forward!(self.meta(delta, kind, data));
    }

    fn sysex(&mut self, delta: u64, data: &[u8]) {
        forward!(self.sysex(delta, data));
    }
}
