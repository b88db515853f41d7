//! Synthetic row generation for the `activitysessions` table.

use crate::config::{Config, DailyFillConfig, PerActivityConfig};
use crate::db::pool::DbPool;
use crate::db::queries::insert_session;
use crate::errors::AppResult;
use crate::models::policy::Policy;
use crate::models::session::ActivitySession;
use crate::utils::date::calendar_days;
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;

const SECONDS_PER_HOUR: i64 = 3600;

/// Summary of one generation run.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub policy: Policy,
    pub days: usize,
    pub rows: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub seed: Option<u64>,
}

/// Seeded generator when `seed` is set, OS entropy otherwise.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// Fill one day by walking the clock from hour 0.
///
/// Each step draws a label and a duration in `0..=max_step_hours`. The
/// day ends at the first draw that would reach `day_hours`. A zero-hour
/// draw is skipped without emitting a row, so every row satisfies
/// `start < stop`. Times are stored as seconds-of-day.
///
/// Panics if `max_step_hours` is negative; see [`Config::validate`].
pub fn daily_fill<R: Rng + ?Sized>(
    date: NaiveDate,
    activities: &[String],
    cfg: &DailyFillConfig,
    rng: &mut R,
) -> Vec<ActivitySession> {
    let mut out = Vec::new();
    let mut beg = 0;

    while beg < cfg.day_hours {
        let Some(activity) = activities.choose(rng) else {
            break;
        };
        let dur = rng.random_range(0..=cfg.max_step_hours);

        if beg + dur >= cfg.day_hours {
            break;
        }
        if dur == 0 {
            continue;
        }

        out.push(ActivitySession::closed(
            date,
            activity,
            beg * SECONDS_PER_HOUR,
            (beg + dur) * SECONDS_PER_HOUR,
        ));
        beg += dur;
    }

    out
}

/// For every label, emit `min_count..=max_count` rows of
/// `(n, n + 0..=max_span)` with `n` in `0..=max_start`.
///
/// These integers are counters, not times of day.
///
/// Panics on an empty count range or a negative `max_start`/`max_span`;
/// see [`Config::validate`].
pub fn per_activity<R: Rng + ?Sized>(
    date: NaiveDate,
    activities: &[String],
    cfg: &PerActivityConfig,
    rng: &mut R,
) -> Vec<ActivitySession> {
    let mut out = Vec::new();

    for activity in activities {
        let count = rng.random_range(cfg.min_count..=cfg.max_count);
        for _ in 0..count {
            let start = rng.random_range(0..=cfg.max_start);
            let stop = start + rng.random_range(0..=cfg.max_span);
            out.push(ActivitySession::closed(date, activity, start, stop));
        }
    }

    out
}

/// Rows for one day under the configured policy.
pub fn sessions_for_day<R: Rng + ?Sized>(
    date: NaiveDate,
    cfg: &Config,
    rng: &mut R,
) -> Vec<ActivitySession> {
    match cfg.policy {
        Policy::DailyFill => daily_fill(date, &cfg.activities, &cfg.daily, rng),
        Policy::PerActivity => per_activity(date, &cfg.activities, &cfg.per_activity, rng),
    }
}

pub struct GenerateLogic;

impl GenerateLogic {
    /// Generate and insert rows for every calendar day in `cfg`.
    ///
    /// Rows go through one cached INSERT statement inside a single
    /// transaction. On error the transaction is dropped and rolled back.
    /// An invalid `cfg` is rejected before anything is written.
    pub fn apply<R: Rng + ?Sized>(
        pool: &mut DbPool,
        cfg: &Config,
        rng: &mut R,
    ) -> AppResult<GenerationReport> {
        cfg.validate()?;

        let days = calendar_days(&cfg.sorted_years(), cfg.skip_leap_days);

        let tx = pool.conn.transaction()?;
        let mut rows = 0;

        for day in &days {
            for session in sessions_for_day(*day, cfg, rng) {
                insert_session(&tx, &session)?;
                rows += 1;
            }
        }

        tx.commit()?;

        Ok(GenerationReport {
            policy: cfg.policy,
            days: days.len(),
            rows,
            first_date: days.first().copied(),
            last_date: days.last().copied(),
            seed: cfg.seed,
        })
    }
}
