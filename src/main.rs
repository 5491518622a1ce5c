use anyhow::Result;
use choreledger::cli::Cli;
use choreledger::logging::init_logging;
use clap::Parser;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _logger = init_logging(cli.verbose)?;
    cli.run()
}
