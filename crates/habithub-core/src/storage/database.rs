//! SQLite-based account storage.
//!
//! Provides persistent storage for:
//! - Account credentials (email plus salted password hash)
//! - The JSON user snapshot each account owns
//! - Key-value store for application state (such as the session)
//!
//! The snapshot column is opaque JSON at this layer; decoding it into
//! a [`crate::user::User`] is the account store's job.

use rusqlite::{params, Connection};

use crate::error::StorageError;

use super::data_dir;

/// One row of the users table.
#[derive(Debug, Clone)]
pub struct AccountRow {
    pub password_hash: String,
    pub snapshot: String,
}

/// SQLite database holding accounts and application state.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `~/.config/habithub/habithub.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StorageError> {
        let path = data_dir()?.join("habithub.db");
        let conn = Connection::open(&path).map_err(|source| StorageError::OpenFailed {
            path: path.clone(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database. Used by tests and safe to call from
    /// integration tests outside this crate.
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), StorageError> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS users (
                    email         TEXT PRIMARY KEY,
                    password_hash TEXT NOT NULL,
                    snapshot      TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS kv (
                    key   TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                );",
            )
            .map_err(|e| StorageError::MigrationFailed(e.to_string()))?;
        Ok(())
    }

    /// Insert a brand-new account row.
    ///
    /// # Errors
    /// Returns an error if the email is already present or the insert
    /// fails.
    pub fn insert_account(
        &self,
        email: &str,
        password_hash: &str,
        snapshot: &str,
    ) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT INTO users (email, password_hash, snapshot) VALUES (?1, ?2, ?3)",
            params![email, password_hash, snapshot],
        )?;
        Ok(())
    }

    /// Fetch the credential and snapshot stored for an email.
    pub fn account(&self, email: &str) -> Result<Option<AccountRow>, rusqlite::Error> {
        let mut stmt = self
            .conn
            .prepare("SELECT password_hash, snapshot FROM users WHERE email = ?1")?;
        let result = stmt.query_row(params![email], |row| {
            Ok(AccountRow {
                password_hash: row.get(0)?,
                snapshot: row.get(1)?,
            })
        });
        match result {
            Ok(row) => Ok(Some(row)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Whether an account row exists for the email.
    pub fn account_exists(&self, email: &str) -> Result<bool, rusqlite::Error> {
        let mut stmt = self
            .conn
            .prepare("SELECT 1 FROM users WHERE email = ?1")?;
        let result = stmt.query_row(params![email], |_| Ok(()));
        match result {
            Ok(()) => Ok(true),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Replace the snapshot for an existing account. Returns `false`
    /// if no row matched the email.
    pub fn update_snapshot(&self, email: &str, snapshot: &str) -> Result<bool, rusqlite::Error> {
        let changed = self.conn.execute(
            "UPDATE users SET snapshot = ?2 WHERE email = ?1",
            params![email, snapshot],
        )?;
        Ok(changed > 0)
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Remove a value from the kv store.
    pub fn kv_delete(&self, key: &str) -> Result<(), rusqlite::Error> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_round_trip() {
        let db = Database::open_memory().unwrap();
        assert!(db.account("ada@example.com").unwrap().is_none());
        assert!(!db.account_exists("ada@example.com").unwrap());

        db.insert_account("ada@example.com", "salt$digest", "{}")
            .unwrap();
        let row = db.account("ada@example.com").unwrap().unwrap();
        assert_eq!(row.password_hash, "salt$digest");
        assert_eq!(row.snapshot, "{}");
        assert!(db.account_exists("ada@example.com").unwrap());
    }

    #[test]
    fn test_duplicate_insert_is_rejected() {
        let db = Database::open_memory().unwrap();
        db.insert_account("ada@example.com", "h", "{}").unwrap();
        assert!(db.insert_account("ada@example.com", "h", "{}").is_err());
    }

    #[test]
    fn test_update_snapshot_reports_match() {
        let db = Database::open_memory().unwrap();
        assert!(!db.update_snapshot("ghost@example.com", "{}").unwrap());
        db.insert_account("ada@example.com", "h", "{}").unwrap();
        assert!(db.update_snapshot("ada@example.com", "{\"hp\":4}").unwrap());
        let row = db.account("ada@example.com").unwrap().unwrap();
        assert_eq!(row.snapshot, "{\"hp\":4}");
    }

    #[test]
    fn test_kv_store() {
        let db = Database::open_memory().unwrap();
        assert!(db.kv_get("session").unwrap().is_none());
        db.kv_set("session", "ada@example.com").unwrap();
        assert_eq!(db.kv_get("session").unwrap().unwrap(), "ada@example.com");
        db.kv_delete("session").unwrap();
        assert!(db.kv_get("session").unwrap().is_none());
    }
}
