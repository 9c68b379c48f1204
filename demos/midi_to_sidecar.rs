//! Example: Analyze a MIDI phrase and write its YAML sidecar
//!
//! Usage:
//!   cargo run --example midi_to_sidecar -- [--json] <file.mid>
//!
//! The sidecar is written next to the input with a `.yml` extension.

use harmonic_sidecar::{analyze_midi_file, io::write_sidecar, AnalysisConfig};
use std::env;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut json = false;
    let mut path: Option<String> = None;
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--json" => json = true,
            "-h" | "--help" => {
                print_usage();
                return Ok(());
            }
            _ if path.is_none() => path = Some(arg),
            _ => {
                eprintln!("ERROR: Expected a single MIDI file path.");
                print_usage();
                std::process::exit(1);
            }
        }
    }

    let Some(path) = path else {
        eprintln!("ERROR: Provide a MIDI file path. Use --help for usage.");
        std::process::exit(1);
    };

    let config = AnalysisConfig::default();
    let report = analyze_midi_file(&path, &config)?;
    let sidecar = write_sidecar(&path, &report.result)?;

    println!("Key: {} {}", report.result.key, report.result.mode);
    println!("Bars: {}", report.result.bar_labels().join("  "));
    for advisory in &report.metadata.advisories {
        println!("  note: {}", advisory);
    }
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    println!("[OK] {}", sidecar.display());

    Ok(())
}

fn print_usage() {
    eprintln!(
        "Usage: midi_to_sidecar [--json] <file.mid>\n\
         \n\
         Options:\n\
           --json     Also print the detailed report as JSON\n"
    );
}
