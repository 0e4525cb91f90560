//! CLI entry point for the brick mosaic converter

use brickmosaic::io::cli::{Cli, FileProcessor};
use brickmosaic::io::logging::{LoggingConfig, init_logging};
use clap::Parser;

fn main() -> brickmosaic::Result<()> {
    let cli = Cli::parse();
    init_logging(LoggingConfig::for_verbosity(cli.verbose, cli.quiet));
    let mut processor = FileProcessor::new(cli);
    processor.process()
}
