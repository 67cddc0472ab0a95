//! overdub CLI entry point

use clap::Parser;
use env_logger::Env;

use overdub::cli::{self, Cli, Commands};

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    match args.command {
        Commands::Probe {
            file,
            read_ahead_limit,
        } => cli::probe(&file, read_ahead_limit)?,
        Commands::Merge {
            inputs,
            output,
            policy,
            gain_during_overlay,
        } => cli::merge(&inputs, &output, policy, gain_during_overlay)?,
    }

    Ok(())
}
