#![no_main]

use libfuzzer_sys::fuzz_target;

use midi_notes::io::MIDIFile;
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    let cursor = Cursor::new(data);
    if let Ok(mut file) = MIDIFile::new(cursor) {
        let _ = file.read_notes::<u64>();
    }
});
