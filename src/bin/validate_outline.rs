//! Validate an outline JSON file against the output contract
//!
//! Exit status: 0 when valid, 1 when invalid, 2 on usage errors.
//!
//! Usage:
//!   cargo run --bin validate_outline -- output/report.json

use outline_oxide::output::validate_outline_file;
use std::path::PathBuf;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: validate_outline <jsonfile>");
        std::process::exit(2);
    }

    let path = PathBuf::from(&args[1]);
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| args[1].clone());

    match validate_outline_file(&path) {
        Ok(()) => {
            println!("[VALID] {}: OK", name);
        },
        Err(e) => {
            println!("[INVALID] {}: {}", name, e);
            std::process::exit(1);
        },
    }
}
