//! Database schema initialization and migrations.

use crate::error::{DatabaseResultExt, Result};

const REKEY_BY_SESSION_SQL: &str = "
    ALTER TABLE drafts RENAME TO drafts_legacy;
    CREATE TABLE drafts (
        session TEXT NOT NULL,
        draft_key TEXT NOT NULL,
        value TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        PRIMARY KEY (session, draft_key)
    );
    INSERT INTO drafts (session, draft_key, value, updated_at)
        SELECT 'default', draft_key, value, updated_at FROM drafts_legacy;
    DROP TABLE drafts_legacy;
    CREATE INDEX IF NOT EXISTS idx_drafts_updated_at ON drafts(updated_at);
";

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        self.apply_migrations()?;

        Ok(())
    }

    /// Apply database migrations for existing databases
    fn apply_migrations(&self) -> Result<()> {
        // Early builds keyed drafts by key only; give those rows a session.
        let has_session_column: bool = self
            .connection
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info('drafts') WHERE name = 'session'",
                [],
                |row| row.get(0),
            )
            .map(|count: i64| count > 0)
            .unwrap_or(false);

        if !has_session_column {
            self.connection
                .execute_batch(REKEY_BY_SESSION_SQL)
                .db_context("Failed to migrate drafts table to session keys")?;
        }

        Ok(())
    }
}
