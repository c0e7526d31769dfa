use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Result as SqlResult};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::store::KeyValueStore;
use crate::error::{GalleryError, Result};

/// The Library is the SQLite catalog backing the gallery's key-value store.
/// It holds photo annotations and the serialized list of local uploads.
pub struct Library {
    conn: Connection,
    db_path: PathBuf,
}

impl Library {
    /// Open the catalog in the user's data directory:
    /// - Linux: ~/.local/share/photo-gallery/gallery.db
    /// - macOS: ~/Library/Application Support/photo-gallery/gallery.db
    /// - Windows: %APPDATA%\photo-gallery\gallery.db
    pub fn new() -> Result<Self> {
        let db_path = Self::get_db_path().ok_or(GalleryError::NoDataDir)?;
        Self::open(db_path)
    }

    /// Open or create the catalog at an explicit path
    pub fn open(db_path: impl Into<PathBuf>) -> Result<Self> {
        let db_path = db_path.into();

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(&db_path)?;
        info!("📁 Catalog opened at: {}", db_path.display());

        let mut library = Library { conn, db_path };
        library.init_schema()?;

        Ok(library)
    }

    /// Catalog that lives only as long as the connection
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut library = Library {
            conn,
            db_path: PathBuf::from(":memory:"),
        };
        library.init_schema()?;
        Ok(library)
    }

    fn get_db_path() -> Option<PathBuf> {
        let mut path = dirs::data_dir().or_else(dirs::home_dir)?;
        path.push("photo-gallery");
        path.push("gallery.db");
        Some(path)
    }

    fn init_schema(&mut self) -> SqlResult<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (
                key             TEXT PRIMARY KEY,
                value           TEXT NOT NULL,
                updated_at      INTEGER NOT NULL
            )",
            [],
        )?;

        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Number of stored keys
    pub fn key_count(&self) -> SqlResult<i64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM kv", [], |row| row.get(0))
    }

    pub fn read(&self, key: &str) -> SqlResult<Option<String>> {
        self.conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()
    }

    /// Insert or overwrite a value
    pub fn write(&self, key: &str, value: &str) -> SqlResult<()> {
        self.conn.execute(
            "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, Utc::now().timestamp()],
        )?;
        Ok(())
    }

    pub fn delete(&self, key: &str) -> SqlResult<()> {
        self.conn.execute("DELETE FROM kv WHERE key = ?1", [key])?;
        Ok(())
    }
}

impl KeyValueStore for Library {
    fn get(&self, key: &str) -> Option<String> {
        self.read(key).unwrap_or_else(|e| {
            warn!("⚠️  Failed to read {}: {}", key, e);
            None
        })
    }

    fn set(&mut self, key: &str, value: &str) {
        if let Err(e) = self.write(key, value) {
            warn!("⚠️  Failed to write {}: {}", key, e);
        }
    }

    fn remove(&mut self, key: &str) {
        if let Err(e) = self.delete(key) {
            warn!("⚠️  Failed to delete {}: {}", key, e);
        }
    }
}

// Implement Debug for better error messages
impl std::fmt::Debug for Library {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Library")
            .field("db_path", &self.db_path)
            .finish()
    }
}
