//! Extract outlines from line documents
//!
//! Reads every `*.json` line document in the input directory, runs the
//! outline pipeline over all of them in parallel and writes one
//! `<stem>.json` outline per document (plus `<stem>.sections.json` with
//! `--sections`). Set `DEBUG=1` to include debug keys in the outlines.
//!
//! Usage:
//!   cargo run --release --bin extract_outline
//!   cargo run --release --bin extract_outline -- --input-dir in --output-dir out --sections

use outline_oxide::{process_batch, LineDocument, OutlineConfig};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

struct ExtractConfig {
    input_dir: PathBuf,
    output_dir: PathBuf,
    files: Vec<PathBuf>,
    sections: bool,
    verbose: bool,
}

impl ExtractConfig {
    fn from_args() -> Self {
        let args: Vec<String> = std::env::args().collect();
        let mut input_dir = PathBuf::from("input");
        let mut output_dir = PathBuf::from("output");
        let mut files = Vec::new();
        let mut sections = false;
        let mut verbose = false;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--input-dir" => {
                    i += 1;
                    if i < args.len() {
                        input_dir = PathBuf::from(&args[i]);
                    }
                },
                "--output-dir" => {
                    i += 1;
                    if i < args.len() {
                        output_dir = PathBuf::from(&args[i]);
                    }
                },
                "--sections" => {
                    sections = true;
                },
                "--verbose" | "-v" => {
                    verbose = true;
                },
                other if other.to_lowercase().ends_with(".json") => {
                    files.push(PathBuf::from(other));
                },
                _ => {},
            }
            i += 1;
        }

        Self {
            input_dir,
            output_dir,
            files,
            sections,
            verbose,
        }
    }
}

fn discover_documents(dir: &Path) -> Vec<PathBuf> {
    let mut docs: Vec<PathBuf> = match fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_file())
            .filter(|p| {
                p.extension()
                    .and_then(|s| s.to_str())
                    .map(|ext| ext.eq_ignore_ascii_case("json"))
                    .unwrap_or(false)
            })
            .collect(),
        Err(e) => {
            eprintln!("Error reading directory {}: {}", dir.display(), e);
            Vec::new()
        },
    };
    docs.sort();
    docs
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "document".to_string())
}

fn main() {
    env_logger::init();

    let config = ExtractConfig::from_args();
    let outline_config = OutlineConfig::from_env();

    if let Err(e) = fs::create_dir_all(&config.output_dir) {
        eprintln!("Failed to create output directory: {}", e);
        std::process::exit(1);
    }

    let paths = if config.files.is_empty() {
        discover_documents(&config.input_dir)
    } else {
        config.files.clone()
    };
    if paths.is_empty() {
        eprintln!("[INFO] No line documents found in {}", config.input_dir.display());
        return;
    }

    let start_time = Instant::now();
    let mut failed = 0;

    let mut stems = Vec::new();
    let mut docs = Vec::new();
    for path in &paths {
        match LineDocument::from_json_file(path) {
            Ok(doc) => {
                stems.push(file_stem(path));
                docs.push(doc);
            },
            Err(e) => {
                eprintln!("✗ {}: {}", path.display(), e);
                failed += 1;
            },
        }
    }

    let results = process_batch(&docs, &outline_config);

    let mut successful = 0;
    for (stem, (name, result)) in stems.iter().zip(results) {
        let analysis = match result {
            Ok(analysis) => analysis,
            Err(e) => {
                eprintln!("✗ {}: {}", name, e);
                failed += 1;
                continue;
            },
        };

        let outline_path = config.output_dir.join(format!("{}.json", stem));
        if let Err(e) = analysis.outline_document(&outline_config).write_to(&outline_path) {
            eprintln!("✗ {}: {}", outline_path.display(), e);
            failed += 1;
            continue;
        }

        if config.sections {
            let sections_path = config.output_dir.join(format!("{}.sections.json", stem));
            let written = serde_json::to_string_pretty(&analysis.sections)
                .map_err(|e| e.to_string())
                .and_then(|json| fs::write(&sections_path, json).map_err(|e| e.to_string()));
            if let Err(e) = written {
                eprintln!("✗ {}: {}", sections_path.display(), e);
                failed += 1;
                continue;
            }
        }

        if config.verbose {
            println!(
                "✓ {}: {} outline entries, {} sections ({:.1}ms)",
                name,
                analysis.outline.len(),
                analysis.sections.len(),
                analysis.timings.total().as_secs_f64() * 1000.0
            );
        }
        successful += 1;
    }

    println!(
        "[INFO] Processed {} documents ({} ok, {} failed) in {:.2}s (debug={})",
        paths.len(),
        successful,
        failed,
        start_time.elapsed().as_secs_f64(),
        outline_config.include_debug
    );
}
