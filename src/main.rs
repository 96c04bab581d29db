use anyhow::Result;
use clap::Parser;
use teller::cli::Cli;

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    cli.run()
}
