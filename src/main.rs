use clap::Parser;
use miette::Result;
use swatch::cli::{Cli, Commands};
use swatch::output::Printer;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new();

    match cli.command {
        Commands::Gen(args) => swatch::cli::gen::run(args, &printer)?,
        Commands::Reduce(args) => swatch::cli::reduce::run(args, &printer)?,
        Commands::Check(args) => swatch::cli::check::run(args, &printer)?,
        Commands::Completions(args) => swatch::cli::completions::run(args)?,
    }

    Ok(())
}
