/// A sink for decoded track events, one callback per event category.
///
/// Every callback receives the delta-time (in ticks) since the previous event of
/// the track, whatever its kind. Meta and sysex payloads are only lent for the
/// duration of the call.
pub trait EventReceiver {
    fn note_on(&mut self, delta: u64, channel: u8, key: u8, velocity: u8);
    fn note_off(&mut self, delta: u64, channel: u8, key: u8, velocity: u8);
    fn polyphonic_key_pressure(&mut self, delta: u64, channel: u8, key: u8, pressure: u8);
    fn control_change(&mut self, delta: u64, channel: u8, controller: u8, value: u8);
    fn program_change(&mut self, delta: u64, channel: u8, program: u8);
    fn channel_pressure(&mut self, delta: u64, channel: u8, pressure: u8);
    fn pitch_wheel_change(&mut self, delta: u64, channel: u8, value: u16);
    fn meta(&mut self, delta: u64, kind: u8, data: &[u8]);
    fn sysex(&mut self, delta: u64, data: &[u8]);
}
