//! Evaluate predicted outlines against ground truth
//!
//! For every `<stem>.json` in the ground truth directory, compares the
//! outline with `<stem>.json` in the prediction directory and prints strict,
//! lenient and per-level precision/recall/F1, then aggregate figures.
//!
//! Usage:
//!   cargo run --bin evaluate_outlines -- <ground_truth_dir> <pred_dir>

use outline_oxide::eval::{compare, level_breakdown, Comparison, Metrics};
use outline_oxide::OutlineDocument;
use std::fs;
use std::path::{Path, PathBuf};

fn ground_truth_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .map(|e| e.path())
                .filter(|p| p.extension().and_then(|s| s.to_str()) == Some("json"))
                .collect()
        })
        .unwrap_or_default();
    files.sort();
    files
}

fn format_metrics(m: &Metrics) -> String {
    format!(
        "P={} R={} F1={} (TP={} FP={} FN={})",
        m.precision, m.recall, m.f1, m.tp, m.fp, m.fn_
    )
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: evaluate_outlines <ground_truth_dir> <pred_dir>");
        std::process::exit(2);
    }
    let gt_dir = PathBuf::from(&args[1]);
    let pred_dir = PathBuf::from(&args[2]);
    if !gt_dir.is_dir() || !pred_dir.is_dir() {
        eprintln!("Ground truth or prediction dir not found");
        std::process::exit(2);
    }

    let mut total = Comparison::default();
    for gt_path in ground_truth_files(&gt_dir) {
        let stem = gt_path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let pred_path = pred_dir.join(format!("{}.json", stem));
        if !pred_path.exists() {
            println!("[WARN] Missing prediction for {}", stem);
            continue;
        }

        let (gt, pred) = match (
            OutlineDocument::from_json_file(&gt_path),
            OutlineDocument::from_json_file(&pred_path),
        ) {
            (Ok(gt), Ok(pred)) => (gt, pred),
            (Err(e), _) | (_, Err(e)) => {
                println!("[WARN] Skipping {}: {}", stem, e);
                continue;
            },
        };

        let result = compare(&gt.outline, &pred.outline);
        total = Comparison {
            strict: total.strict.accumulate(&result.strict),
            lenient: total.lenient.accumulate(&result.lenient),
        };

        println!("\nFILE: {}", stem);
        println!("  STRICT : {}", format_metrics(&result.strict));
        println!("  LENIENT: {}", format_metrics(&result.lenient));
        println!("  Level breakdown (strict):");
        for (level, m) in level_breakdown(&gt.outline, &pred.outline) {
            println!("    {}: {}", level, format_metrics(&m));
        }
    }

    for (mode, m) in [("STRICT", &total.strict), ("LENIENT", &total.lenient)] {
        println!(
            "\nAGGREGATE {}: P={:.4} R={:.4} F1={:.4} (TP={} FP={} FN={})",
            mode, m.precision, m.recall, m.f1, m.tp, m.fp, m.fn_
        );
    }
}
