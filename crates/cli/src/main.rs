//! SkillSwap CLI - Command-line interface for the SkillSwap marketplace
//!
//! Usage:
//!   skillswap demo                                    - Walk one exchange end to end
//!   skillswap matches --fixture <file> --user <name>  - Who can teach what a user wants
//!   skillswap stats --fixture <file> --user <name>    - Profile and dashboard numbers
//!   skillswap config                                  - Show the effective configuration

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use cli::commands::{ConfigCommand, DemoCommand, MatchesCommand, StatsCommand};
use cli::Context;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "skillswap")]
#[command(about = "SkillSwap - Peer-to-peer skill exchange marketplace")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (YAML or JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the demo fixture and run a full exchange
    Demo(DemoCommand),
    /// List teachers for the skills a user wants
    Matches(MatchesCommand),
    /// Show a user's stats
    Stats(StatsCommand),
    /// Print the effective configuration
    Config(ConfigCommand),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let ctx = Context::load(cli.config.as_deref(), cli.json)?;

    // RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&ctx.config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Demo(cmd) => cmd.run(&ctx),
        Commands::Matches(cmd) => cmd.run(&ctx),
        Commands::Stats(cmd) => cmd.run(&ctx),
        Commands::Config(cmd) => cmd.run(&ctx),
    }
}
