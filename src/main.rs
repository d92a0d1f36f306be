//! Debrief CLI entry point.

use clap::Parser;
use debrief::cli::args::{Cli, Commands};
use debrief::cli::output::Output;
use debrief::cli::{list, projects, tasks};
use debrief::config::Config;
use debrief::error::{exit_code, DebriefError};
use debrief::loader::ProjectLoader;
use debrief::vault::DirectoryVault;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::from(exit_code::SUCCESS as u8),
        Err(e) => {
            if !cli.quiet {
                eprintln!("Error: {}", e);
            }
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn run(cli: &Cli) -> Result<(), DebriefError> {
    let config = Config::load()?;

    let vault_path = config.resolve_vault_path(cli.vault.as_deref())?;
    let vault = DirectoryVault::scan(vault_path)?;
    let loader = ProjectLoader::new(vault);

    let output = Output::new(cli.output_format(), cli.quiet);

    match &cli.command {
        Commands::List => list::run(&loader, &output),
        Commands::Projects => projects::run_all(&loader, &output),
        Commands::Project(args) => projects::run_one(&loader, args, &output),
        Commands::Tasks(args) => tasks::run(&loader, args, &output),
    }
}
