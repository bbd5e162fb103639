pub mod migrations;
pub mod models;

use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Shared handle to the SQLite connection. rusqlite is synchronous, so the
/// connection lives behind a Mutex and every query from an async handler
/// runs on the blocking pool.
pub type DbPool = Arc<Mutex<Connection>>;

const DB_FILE: &str = "nebula.db";

/// Open (creating if necessary) the database under `data_dir` and bring the
/// schema up to date.
pub fn init_db(data_dir: &str) -> Result<DbPool, Box<dyn std::error::Error>> {
    std::fs::create_dir_all(data_dir)?;
    let db_path = Path::new(data_dir).join(DB_FILE);

    let mut conn = Connection::open(&db_path)?;

    // WAL keeps readers from blocking the writer; foreign keys are off by
    // default in SQLite and the learning_paths table relies on them.
    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.pragma_update(None, "foreign_keys", "ON")?;

    migrations::migrations().to_latest(&mut conn)?;

    tracing::info!(path = %db_path.display(), "Database ready");

    Ok(Arc::new(Mutex::new(conn)))
}
