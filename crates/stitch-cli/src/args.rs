use std::path::PathBuf;

use clap::{Parser, Subcommand};
use stitch_core::api::DEFAULT_TIMEOUT_SECS;

use crate::cli::{BidCommands, DraftCommands, QuoteCommands, WorksheetCommands};

/// Command-line client for the Stitch garment-order marketplace
///
/// Brands build a manufacturing order step by step in a local draft and
/// submit it; factories list open quote requests and place or edit bids.
/// Orders can also be exported as xlsx worksheets. Drafts are kept in a
/// local SQLite database, everything else goes to the marketplace API.
#[derive(Parser)]
#[command(version, about, name = "stitch")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/stitch/stitch.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Draft session; each session keeps its own draft
    #[arg(long, global = true, default_value = "default")]
    pub session: String,

    /// Base URL of the marketplace API, including its prefix
    #[arg(long, global = true, env = "STITCH_API_URL")]
    pub api_url: Option<String>,

    /// Bearer token sent with every API request
    #[arg(long, global = true, env = "STITCH_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
///
/// - `draft`: build, check and submit the local manufacturing draft
/// - `quotes`: list quote requests visible to the acting factory
/// - `bid`: place or edit the factory's bid on one order
/// - `worksheet`: export order data as an xlsx worksheet
#[derive(Subcommand)]
pub enum Commands {
    /// Build and submit the manufacturing draft
    #[command(alias = "d")]
    Draft {
        #[command(subcommand)]
        command: DraftCommands,
    },
    /// Browse quote requests
    #[command(alias = "q")]
    Quotes {
        #[command(subcommand)]
        command: QuoteCommands,
    },
    /// Place or edit bids
    #[command(alias = "b")]
    Bid {
        #[command(subcommand)]
        command: BidCommands,
    },
    /// Export worksheets
    #[command(alias = "w")]
    Worksheet {
        #[command(subcommand)]
        command: WorksheetCommands,
    },
}
