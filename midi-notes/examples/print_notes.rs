use std::time::Instant;

use midi_notes::{io::MIDIFile, notes::Note};
use tracing_subscriber::EnvFilter;

pub fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let path = match std::env::args().nth(1) {
        Some(path) => path,
        None => {
            eprintln!("usage: print_notes <file.mid>");
            return;
        }
    };

    let now = Instant::now();
    let mut file = MIDIFile::open(&path).unwrap();
    println!("Format {}, {} tracks", file.format(), file.header().track_count);

    let tracks: Vec<Vec<Note<u64>>> = file.read_track_notes_all().unwrap();
    let mut total = 0;
    for (i, notes) in tracks.iter().enumerate() {
        println!("Track {}: {} notes", i, notes.len());
        for note in notes {
            println!("  {}", note);
        }
        total += notes.len();
    }

    println!("Found {} notes in {:?}", total, now.elapsed());
}
