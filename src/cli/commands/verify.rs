use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::verify::VerifyLogic;
use crate::db::initialize::ensure_log_table;
use crate::db::log;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::warning;

/// Handle the `verify` command
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Verify { year, date, json } = cmd {
        let pool = DbPool::new(&cfg.database)?;
        let report = VerifyLogic::run(&pool, cfg, *year, date.as_deref())?;

        if *json {
            let out = serde_json::to_string_pretty(&report)
                .map_err(|e| AppError::Other(e.to_string()))?;
            println!("{}", out);
        } else {
            VerifyLogic::print(&report);
        }

        let outcome = if report.is_ok() {
            "passed".to_string()
        } else {
            format!("{} problem(s)", report.problems.len())
        };
        if let Err(e) = ensure_log_table(&pool.conn).and_then(|_| {
            log::ttlog(
                &pool.conn,
                "verify",
                &report.year.to_string(),
                &format!("{} rows checked, {}", report.total_rows, outcome),
            )
        }) {
            warning(format!("Failed to write internal log: {}", e));
        }

        if !report.is_ok() {
            return Err(AppError::Verification(report.problems.join("; ")));
        }
    }

    Ok(())
}
