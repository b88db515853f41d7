use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};

/// Handle the `init` command
///
/// Applies the schema file to the configured database and creates the
/// internal `log` table. Safe to run on a populated database as long as
/// the schema only uses `IF NOT EXISTS` statements.
pub fn handle(cfg: &Config) -> AppResult<()> {
    let pool = DbPool::new(&cfg.database)?;
    apply(&pool, cfg)
}

pub(crate) fn apply(pool: &DbPool, cfg: &Config) -> AppResult<()> {
    info(format!("Schema   : {}", cfg.schema));
    info(format!("Database : {}", pool.path));

    init_db(&pool.conn, &cfg.schema)?;

    success(format!("Database initialized at {}", pool.path));

    if let Err(e) = log::ttlog(
        &pool.conn,
        "init",
        &cfg.schema,
        &format!("Schema applied to {}", pool.path),
    ) {
        warning(format!("Failed to write internal log: {}", e));
    }

    Ok(())
}
