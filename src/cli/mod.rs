pub mod check;
pub mod completions;
pub mod gen;
pub mod reduce;

use clap::{Parser, Subcommand};

/// swatch - Single-pixel PNG data URI generator
#[derive(Parser, Debug)]
#[command(name = "swatch")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a data URI from an rgba() colour expression
    Gen(gen::GenArgs),

    /// Strip non-essential chunks from a PNG file
    Reduce(reduce::ReduceArgs),

    /// Check rgba() expressions without generating anything
    Check(check::CheckArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
