use std::path::{Path, PathBuf};

use log::debug;

use super::DraftStore;
use crate::{
    db::Database,
    error::{MarketError, Result},
};

/// Draft store backed by a SQLite file, scoped to a named session.
///
/// Each call opens its own connection, so the store can be shared freely
/// and several processes may use the same file.
#[derive(Debug, Clone)]
pub struct SqliteDraftStore {
    path: PathBuf,
    session: String,
}

impl SqliteDraftStore {
    /// Opens (and if needed creates) the database at `path`.
    ///
    /// # Errors
    ///
    /// Returns `MarketError::FileSystem` if the parent directory cannot be
    /// created and `MarketError::Database` if the schema cannot be applied.
    pub fn open<P: AsRef<Path>>(path: P, session: impl Into<String>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| MarketError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        Database::new(&path)?;
        let session = session.into();
        debug!("Opened draft store at {} (session {session})", path.display());
        Ok(Self { path, session })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn session(&self) -> &str {
        &self.session
    }
}

impl DraftStore for SqliteDraftStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Database::new(&self.path)?.get_draft(&self.session, key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        Database::new(&self.path)?.put_draft(&self.session, key, value)
    }

    fn clear(&self, key: &str) -> Result<()> {
        Database::new(&self.path)?
            .delete_draft(&self.session, key)
            .map(|_| ())
    }
}
