pub use errors::*;
pub use midi_file::*;
pub use readers::*;
pub use track_parser::*;

mod errors;
mod midi_file;
mod readers;
mod track_parser;
