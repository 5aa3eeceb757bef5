//! Builder for creating and configuring DraftAggregator instances.

use std::path::{Path, PathBuf};

use jiff::civil::Date;
use log::warn;

use super::DraftAggregator;
use crate::{
    error::{MarketError, Result},
    store::{DraftStore, FallbackStore, MemoryDraftStore, SqliteDraftStore},
};

/// Session name used when none is configured.
pub const DEFAULT_SESSION: &str = "default";

/// Builder for creating and configuring DraftAggregator instances.
#[derive(Debug, Clone)]
pub struct DraftAggregatorBuilder {
    database_path: Option<PathBuf>,
    session: String,
    in_memory: bool,
    today: Option<Date>,
}

impl DraftAggregatorBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            database_path: None,
            session: DEFAULT_SESSION.to_string(),
            in_memory: false,
            today: None,
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/stitch/stitch.db` or `~/.local/share/stitch/stitch.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Sets the session whose draft is read and written.
    pub fn with_session(mut self, session: impl Into<String>) -> Self {
        self.session = session.into();
        self
    }

    /// Keeps drafts in process memory only.
    pub fn in_memory(mut self) -> Self {
        self.in_memory = true;
        self
    }

    /// Pins "today" for due-date validation.
    pub fn with_today(mut self, today: Date) -> Self {
        self.today = Some(today);
        self
    }

    /// Builds the configured aggregator.
    ///
    /// Storage problems are never fatal: when the database cannot be opened
    /// the aggregator keeps its draft in memory and a warning is logged.
    pub fn build(self) -> DraftAggregator {
        let store: Box<dyn DraftStore> = if self.in_memory {
            Box::new(MemoryDraftStore::new())
        } else {
            match self.open_sqlite() {
                Ok(store) => Box::new(FallbackStore::new(store)),
                Err(e) => {
                    warn!("Draft storage unavailable, keeping drafts in memory: {e}");
                    Box::new(MemoryDraftStore::new())
                }
            }
        };

        let aggregator = DraftAggregator::new(store);
        match self.today {
            Some(today) => aggregator.with_today(today),
            None => aggregator,
        }
    }

    fn open_sqlite(&self) -> Result<SqliteDraftStore> {
        let path = match &self.database_path {
            Some(path) => path.clone(),
            None => Self::default_database_path()?,
        };
        SqliteDraftStore::open(path, self.session.clone())
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    pub fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("stitch")
            .place_data_file("stitch.db")
            .map_err(|e| MarketError::XdgDirectory(e.to_string()))
    }
}

impl Default for DraftAggregatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
