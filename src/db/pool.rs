//! SQLite connection wrapper (one connection for the whole run).

use rusqlite::{Connection, Result};
use std::path::Path;

pub struct DbPool {
    pub conn: Connection,
    pub path: String,
}

impl DbPool {
    pub fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(Path::new(path))?;
        Ok(Self {
            conn,
            path: path.to_string(),
        })
    }
}
