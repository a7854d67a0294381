use anyhow::{Context, Result};
use clap::Parser;
use supalink::SupabaseClient;
use tracing::debug;

use crate::params::{Command, Params};

mod commands;
mod params;

#[tokio::main]
async fn main() -> Result<()> {
    let params = Params::parse();

    let level = if params.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(true)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let config = params.client_config()?;
    debug!("supalink starting with config: {:?}", config);

    // Built once here and passed down; nothing below constructs its own.
    let client = SupabaseClient::new(config).context("building backend client")?;

    match params.command {
        Command::Info => commands::info(&client, params.json),
        Command::Ping => commands::ping(&client, params.json).await,
    }
}
