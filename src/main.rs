mod cli;
mod config;
mod service;
mod ui;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 日志输出到 stderr，RUST_LOG 优先
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let command = cli.command.unwrap_or(Commands::Session {
        local: false,
        global: false,
    });

    match command {
        Commands::Init { local } => service::init::initialize(local),
        Commands::Session { local, global } => service::session::session(local, global).await,
        Commands::Medicines {
            json,
            local,
            global,
        } => service::medicines::medicines(json, local, global),
    }
}
