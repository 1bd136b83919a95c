//! emem CLI - Entry point
//!
//! Usage: emem <command> [options]

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use easy_memory::cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries command output
    let default_level = if cli.global.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let global = cli.global;
    match cli.command {
        Commands::Init(args) => easy_memory::cli::init::run(args, &global),
        Commands::Write(args) => easy_memory::cli::write::run(args, &global),
        Commands::Read(args) => easy_memory::cli::read::run(args, &global),
        Commands::Search(args) => easy_memory::cli::search::run(args, &global),
        Commands::Update(args) => easy_memory::cli::update::run(args, &global),
        Commands::Delete(args) => easy_memory::cli::delete::run(args, &global),
        Commands::Stats(args) => easy_memory::cli::stats::execute(args, &global),
        Commands::Config(args) => easy_memory::cli::config::run(args, &global),
    }
}
