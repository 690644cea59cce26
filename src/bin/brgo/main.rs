//! brgo CLI - write Go with Portuguese keywords

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use brgo::util::Shell;

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
        EnvFilter::new("brgo=debug")
    } else if cli.quiet {
        EnvFilter::new("brgo=error")
    } else {
        EnvFilter::new("brgo=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let shell = Arc::new(Shell::from_flags(cli.quiet, cli.verbose, cli.color));

    // Execute command
    match cli.command {
        Commands::Translate(args) => commands::translate::execute(args, &shell),
        Commands::Build(args) => commands::build::execute(args, &shell),
        Commands::Run(args) => commands::run::execute(args, &shell),
        Commands::Keywords(args) => commands::keywords::execute(args),
        Commands::Toolchain => commands::toolchain::execute(),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
