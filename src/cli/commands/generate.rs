use crate::cli::commands::init;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::generator::{GenerateLogic, make_rng};
use crate::db::log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{step, success, warning};

/// Handle the `generate` command
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Generate {
        policy,
        seed,
        no_init,
    } = cmd
    {
        let mut cfg = cfg.clone();
        if let Some(p) = policy {
            cfg.policy = *p;
        }
        if seed.is_some() {
            cfg.seed = *seed;
        }
        run(&cfg, !*no_init)?;
    }

    Ok(())
}

/// Optionally apply the schema, then generate rows for every configured day.
pub fn run(cfg: &Config, with_init: bool) -> AppResult<()> {
    let mut pool = DbPool::new(&cfg.database)?;

    if with_init {
        init::apply(&pool, cfg)?;
    }

    step(format!(
        "Generating sessions ({}, years {:?})",
        cfg.policy,
        cfg.sorted_years()
    ));

    if !cfg.policy.uses_seconds() {
        warning(format!(
            "{} stores plain counters in start_time/stop_time, not seconds-of-day",
            cfg.policy
        ));
    }

    let mut rng = make_rng(cfg.seed);
    let report = GenerateLogic::apply(&mut pool, cfg, &mut rng)?;

    let span = match (report.first_date, report.last_date) {
        (Some(f), Some(l)) => format!("{} → {}", f, l),
        _ => "no days".to_string(),
    };
    success(format!(
        "Inserted {} rows over {} days ({})",
        report.rows, report.days, span
    ));

    let seed = report
        .seed
        .map(|s| format!(", seed {}", s))
        .unwrap_or_default();
    if let Err(e) = log::ttlog(
        &pool.conn,
        "generate",
        report.policy.as_str(),
        &format!("{} rows over {} days{}", report.rows, report.days, seed),
    ) {
        warning(format!("Failed to write internal log: {}", e));
    }

    Ok(())
}
