//! Stitch CLI Application
//!
//! Command-line front end for manufacturing drafts, factory bids and
//! worksheet export.

mod args;
mod cli;
mod handlers;
mod renderer;

use std::time::Duration;

use anyhow::Result;
use args::{Args, Commands};
use clap::Parser;
use handlers::{ApiSettings, Cli};
use log::info;
use renderer::TerminalRenderer;
use stitch_core::DraftAggregatorBuilder;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        session,
        api_url,
        api_token,
        timeout_secs,
        no_color,
        command,
    } = Args::parse();

    let aggregator = DraftAggregatorBuilder::new()
        .with_database_path(database_file)
        .with_session(session)
        .build();

    let api = ApiSettings {
        base_url: api_url.filter(|url| !url.trim().is_empty()),
        token: api_token,
        timeout: Duration::from_secs(timeout_secs),
    };
    let cli = Cli::new(aggregator, api, TerminalRenderer::new(!no_color));

    info!("Stitch started");

    match command {
        Some(Draft { command }) => cli.handle_draft_command(command).await,
        Some(Quotes { command }) => cli.handle_quote_command(command).await,
        Some(Bid { command }) => cli.handle_bid_command(command).await,
        Some(Worksheet { command }) => cli.handle_worksheet_command(command).await,
        None => cli.show_draft(),
    }
}
