//! Check command implementation.
//!
//! Validates rgba() expressions without generating anything. Mirrors
//! the parser's contract: every input gets a verdict, nothing panics.

use clap::Args;

use crate::colour::Colour;
use crate::error::{Result, SwatchError};
use crate::output::{plural, Printer};

/// Check rgba() expressions without generating anything
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Expressions to check
    #[arg(required = true)]
    pub expressions: Vec<String>,
}

pub fn run(args: CheckArgs, printer: &Printer) -> Result<()> {
    let mut failures = 0usize;

    for expression in &args.expressions {
        match expression.parse::<Colour>() {
            Ok(colour) => {
                printer.status("Valid", &format!("{} is {}", expression, colour));
            }
            Err(e) => {
                printer.error("Invalid", &format!("{}: {}", expression, e));
                failures += 1;
            }
        }
    }

    if failures > 0 {
        return Err(SwatchError::Validation {
            message: format!(
                "{} of {} failed",
                failures,
                plural(args.expressions.len(), "expression", "expressions")
            ),
            help: Some("Expressions look like rgba(255, 0, 128, 1.0)".to_string()),
        });
    }

    printer.success(
        "Checked",
        &plural(args.expressions.len(), "expression", "expressions"),
    );
    Ok(())
}
