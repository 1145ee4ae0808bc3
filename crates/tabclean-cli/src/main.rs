//! tabclean CLI - clean tabular data files from the command line.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Clean {
            file,
            output,
            preview,
            load,
            steps,
        } => commands::clean::run(file, output, preview, load, steps),

        Commands::Preview {
            file,
            raw,
            json,
            load,
            steps,
        } => commands::preview::run(file, raw, json, load, steps),

        Commands::Inspect { file, json, load } => commands::inspect::run(file, json, load),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Send library logs to stderr. `RUST_LOG` overrides the `-v` count.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
