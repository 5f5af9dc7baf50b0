//! Command-line interface for searching, saving and ranking job vacancies.

use clap::Parser;

mod cli;

fn main() -> anyhow::Result<()> {
    cli::Cli::parse().run()
}
