//! Main entry point for confdiff CLI

use clap::Parser;
use confdiff::cli::Cli;
use confdiff::commands::execute_command;

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    if let Err(e) = execute_command(cli.command, cli.workspace.as_deref()) {
        eprintln!("{}: {}", e.label(), e);
        std::process::exit(1);
    }
}
