use midi_notes::{
    events::{EventReceiver, MetaEvent},
    io::MIDIFile,
};
use tracing_subscriber::EnvFilter;

/// Prints every event of every track with its absolute tick.
struct Printer {
    time: u64,
}

impl Printer {
    fn line(&mut self, delta: u64, text: String) {
        self.time += delta;
        println!("{:>10} {}", self.time, text);
    }
}

impl EventReceiver for Printer {
    fn note_on(&mut self, delta: u64, channel: u8, key: u8, velocity: u8) {
        self.line(delta, format!("note on  ch {channel} key {key} vel {velocity}"));
    }

    fn note_off(&mut self, delta: u64, channel: u8, key: u8, velocity: u8) {
        self.line(delta, format!("note off ch {channel} key {key} vel {velocity}"));
    }

    fn polyphonic_key_pressure(&mut self, delta: u64, channel: u8, key: u8, pressure: u8) {
        self.line(delta, format!("key pressure ch {channel} key {key} {pressure}"));
    }

    fn control_change(&mut self, delta: u64, channel: u8, controller: u8, value: u8) {
        self.line(delta, format!("cc ch {channel} #{controller} = {value}"));
    }

    fn program_change(&mut self, delta: u64, channel: u8, program: u8) {
        self.line(delta, format!("program ch {channel} {program}"));
    }

    fn channel_pressure(&mut self, delta: u64, channel: u8, pressure: u8) {
        self.line(delta, format!("channel pressure ch {channel} {pressure}"));
    }

    fn pitch_wheel_change(&mut self, delta: u64, channel: u8, value: u16) {
        self.line(delta, format!("pitch wheel ch {channel} {value}"));
    }

    fn meta(&mut self, delta: u64, kind: u8, data: &[u8]) {
        let text = match kind {
            MetaEvent::END_OF_TRACK => "end of track".to_string(),
            MetaEvent::TEMPO if data.len() == 3 => {
                let tempo = (data[0] as u32) << 16 | (data[1] as u32) << 8 | data[2] as u32;
                format!("tempo {tempo} us/quarter")
            }
            0x01..=0x07 => format!("text {:02X} {:?}", kind, String::from_utf8_lossy(data)),
            _ => format!("meta {:02X} {:02X?}", kind, data),
        };
        self.line(delta, text);
    }

    fn sysex(&mut self, delta: u64, data: &[u8]) {
        self.line(delta, format!("sysex {} bytes", data.len()));
    }
}

pub fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let path = match std::env::args().nth(1) {
        Some(path) => path,
        None => {
            eprintln!("usage: dump_events <file.mid>");
            return;
        }
    };

    let mut file = MIDIFile::open(&path).unwrap();
    loop {
        let mut printer = Printer { time: 0 };
        match file.next_track(&mut printer) {
            Ok(Some(track)) => println!("-- end of track {track} --"),
            Ok(None) => break,
            Err(e) => {
                eprintln!("{e}");
                break;
            }
        }
    }
}
