//! CLI entry point for the wave function collapse generator

use clap::Parser;
use wavecollapse::io::cli::{Cli, FileProcessor};
use wavecollapse::io::logging::{default_level, init_tracing};

fn main() -> wavecollapse::Result<()> {
    let cli = Cli::parse();
    init_tracing(default_level(cli.quiet));
    let mut processor = FileProcessor::new(cli);
    processor.process()?;
    Ok(())
}
