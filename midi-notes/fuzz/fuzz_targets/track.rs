#![no_main]

use libfuzzer_sys::fuzz_target;

use midi_notes::{io::FullRamTrackReader, notes::read_track_notes};

fuzz_target!(|data: &[u8]| {
    if let Ok(notes) = read_track_notes::<_, u64>(FullRamTrackReader::new(data)) {
        for note in notes {
            assert!(note.key < 128);
        }
    }
});
