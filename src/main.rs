mod cli;
mod commands;
mod common;
mod extract;
mod pdf;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};
use commands::{run_extract, run_locate};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Extract(args) => {
            run_extract(args)?;
        }
        Commands::Locate(args) => {
            run_locate(args)?;
        }
    }

    Ok(())
}
