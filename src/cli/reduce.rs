//! Reduce command implementation.
//!
//! Strips non-essential chunks from PNG files on disk.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use clap::Args;
use serde::Serialize;

use crate::error::{Result, SwatchError};
use crate::output::{display_path, plural, Printer};
use crate::png::reduce;

/// Strip non-essential chunks from a PNG file
#[derive(Args, Debug)]
pub struct ReduceArgs {
    /// PNG file to reduce
    #[arg(required = true)]
    pub input: PathBuf,

    /// Output path (default: <input stem>.min.png)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Print a machine-readable JSON report
    #[arg(long)]
    pub json: bool,
}

/// Report printed by `reduce --json`.
#[derive(Serialize, Debug)]
struct ReduceReport {
    input: String,
    output: String,
    kept: Vec<String>,
    dropped: Vec<String>,
    bytes_in: u64,
    bytes_out: u64,
}

/// Default output path: `icon.png` → `icon.min.png`.
fn default_output(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("reduced");
    input.with_file_name(format!("{}.min.png", stem))
}

pub fn run(args: ReduceArgs, printer: &Printer) -> Result<()> {
    let input = &args.input;
    let display = display_path(input);

    if !input.exists() {
        return Err(SwatchError::Io {
            path: input.clone(),
            message: format!("File not found: {}", display),
        });
    }

    if input.extension().and_then(|e| e.to_str()) != Some("png") {
        printer.warning(
            "Warning",
            &format!("{} does not have a .png extension", display),
        );
    }

    let output = args.output.clone().unwrap_or_else(|| default_output(input));

    printer.status("Reducing", &display);

    let mut reader = BufReader::new(File::open(input).map_err(|e| SwatchError::Io {
        path: input.clone(),
        message: format!("Failed to open file: {}", e),
    })?);

    // Filter into memory first so a malformed input leaves no file behind.
    let mut reduced = Vec::new();
    let summary = reduce(&mut reader, &mut reduced)?;

    fs::write(&output, &reduced).map_err(|e| SwatchError::Io {
        path: output.clone(),
        message: format!("Failed to write file: {}", e),
    })?;

    let bytes_in = fs::metadata(input).map(|m| m.len()).unwrap_or(0);
    let bytes_out = reduced.len() as u64;

    let dropped = if summary.dropped.is_empty() {
        "nothing".to_string()
    } else {
        summary.dropped.join(", ")
    };
    printer.info(
        "Finished",
        &format!(
            "{} kept, dropped {} ({} to {} bytes)",
            plural(summary.kept.len(), "chunk", "chunks"),
            dropped,
            bytes_in,
            bytes_out
        ),
    );
    printer.success("Created", &display_path(&output));

    if args.json {
        let report = ReduceReport {
            input: display,
            output: display_path(&output),
            kept: summary.kept,
            dropped: summary.dropped,
            bytes_in,
            bytes_out,
        };
        let report = serde_json::to_string_pretty(&report).map_err(|e| SwatchError::Build {
            message: format!("Failed to serialize report: {}", e),
            help: None,
        })?;
        println!("{}", report);
    }

    Ok(())
}
