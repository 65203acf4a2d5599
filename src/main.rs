mod cli;
mod commands;
mod error;
mod page_range;
mod pdf;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::debug!("command failed: {:?}", err);
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Merge { output, files } => {
            commands::merge::run(&files, &output)?;
        }
        Commands::Rotate {
            input,
            output,
            angle,
            pages,
        } => {
            commands::rotate::run(&input, &output, angle, pages.as_deref())?;
        }
        Commands::Keep {
            input,
            output,
            pages,
        } => {
            commands::keep::run(&input, pages.as_deref(), &output)?;
        }
    }

    Ok(())
}
