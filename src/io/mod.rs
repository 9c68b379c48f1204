//! I/O modules
//!
//! MIDI event source using midly, and YAML sidecar persistence.

pub mod midi;
pub mod sidecar;

pub use midi::MidiSource;
pub use sidecar::{read_sidecar, sidecar_path, write_sidecar};
