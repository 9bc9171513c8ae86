//! sigwire CLI - SigV4 auth wiring for generated TypeScript service clients

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("sigwire=debug")
    } else {
        EnvFilter::new("sigwire=info")
    };

    // stdout is reserved for command output.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    match cli.command {
        Commands::Plan(args) => commands::plan::execute(args),
        Commands::Generate(args) => commands::generate::execute(args),
        Commands::Explain(args) => commands::explain::execute(args),
        Commands::Verify(args) => commands::verify::execute(args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
