//! Gen command implementation.
//!
//! Runs the full pipeline: parse the colour expression, encode a 1x1
//! PNG, reduce it to its essential chunks, and print the data URI.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::colour::Colour;
use crate::datauri::{css_url, data_uri};
use crate::error::{Result, SwatchError};
use crate::output::{display_path, Printer};
use crate::png::{encode_pixel, reduce_bytes};

/// Generate a data URI from an rgba() colour expression
#[derive(Args, Debug)]
pub struct GenArgs {
    /// Colour expression, e.g. "rgba(255, 0, 128, 1.0)"
    #[arg(required = true)]
    pub expression: String,

    /// Write the reduced PNG to a file instead of printing a data URI
    #[arg(long, short)]
    pub out: Option<PathBuf>,

    /// Print the bare data URI without the CSS url(...) wrapper
    #[arg(long)]
    pub bare: bool,

    /// Print a machine-readable JSON report
    #[arg(long)]
    pub json: bool,
}

/// Report printed by `gen --json`.
#[derive(Serialize, Debug)]
struct GenReport {
    colour: String,
    bytes: usize,
    uri: String,
    css: String,
}

/// Build the `--json` report for a reduced PNG.
fn json_report(colour: Colour, reduced: &[u8]) -> GenReport {
    GenReport {
        colour: colour.to_string(),
        bytes: reduced.len(),
        uri: data_uri(reduced),
        css: css_url(reduced),
    }
}

pub fn run(args: GenArgs, printer: &Printer) -> Result<()> {
    let colour: Colour = args.expression.parse()?;

    let encoded = encode_pixel(colour)?;
    let reduced = reduce_bytes(&encoded)?;

    printer.status(
        "Reduced",
        &format!("{} to {} bytes ({})", encoded.len(), reduced.len(), colour),
    );

    if let Some(path) = &args.out {
        fs::write(path, &reduced).map_err(|e| SwatchError::Io {
            path: path.clone(),
            message: format!("Failed to write PNG: {}", e),
        })?;
        printer.success("Created", &display_path(path));
        return Ok(());
    }

    if args.json {
        let report = serde_json::to_string_pretty(&json_report(colour, &reduced)).map_err(
            |e| SwatchError::Build {
                message: format!("Failed to serialize report: {}", e),
                help: None,
            },
        )?;
        println!("{}", report);
    } else if args.bare {
        println!("{}", data_uri(&reduced));
    } else {
        println!("{}", css_url(&reduced));
    }

    Ok(())
}
