//! Draft blob queries.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension};

use crate::error::{DatabaseResultExt, Result};

const SELECT_DRAFT_SQL: &str = "SELECT value FROM drafts WHERE session = ?1 AND draft_key = ?2";
const UPSERT_DRAFT_SQL: &str = "INSERT INTO drafts (session, draft_key, value, updated_at) VALUES (?1, ?2, ?3, ?4) ON CONFLICT(session, draft_key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at";
const DELETE_DRAFT_SQL: &str = "DELETE FROM drafts WHERE session = ?1 AND draft_key = ?2";

impl super::Database {
    /// Reads the raw value stored under `key` for `session`.
    pub fn get_draft(&self, session: &str, key: &str) -> Result<Option<String>> {
        self.connection
            .query_row(SELECT_DRAFT_SQL, params![session, key], |row| row.get(0))
            .optional()
            .db_context("Failed to read draft")
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub fn put_draft(&self, session: &str, key: &str, value: &str) -> Result<()> {
        let now = Timestamp::now().to_string();
        self.connection
            .execute(UPSERT_DRAFT_SQL, params![session, key, value, &now])
            .db_context("Failed to write draft")?;
        Ok(())
    }

    /// Removes the value stored under `key`. Returns whether a row existed.
    pub fn delete_draft(&self, session: &str, key: &str) -> Result<bool> {
        let affected = self
            .connection
            .execute(DELETE_DRAFT_SQL, params![session, key])
            .db_context("Failed to delete draft")?;
        Ok(affected > 0)
    }
}
