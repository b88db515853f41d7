use chrono::NaiveDate;
use rand::SeedableRng;
use rand::rngs::StdRng;
use sessiongen::config::Config;
use sessiongen::core::generator::{GenerateLogic, daily_fill, per_activity, sessions_for_day};
use sessiongen::db::initialize::init_db;
use sessiongen::db::pool::DbPool;
use sessiongen::db::queries::{count_sessions, monthly_hours};
use sessiongen::errors::AppError;
use sessiongen::models::policy::Policy;

mod common;
use common::{schema_path, temp_file};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn memory_pool() -> DbPool {
    let pool = DbPool::new(":memory:").expect("open in-memory db");
    init_db(&pool.conn, &schema_path()).expect("apply schema");
    pool
}

#[test]
fn test_daily_fill_rows_are_inside_the_day() {
    let cfg = Config::default();

    for seed in 0..200 {
        let mut rng = StdRng::seed_from_u64(seed);
        let rows = daily_fill(day(2021, 3, 14), &cfg.activities, &cfg.daily, &mut rng);

        for r in &rows {
            let stop = r.stop_time.expect("daily fill never leaves sessions open");
            assert!(0 <= r.start_time, "negative start: {:?}", r);
            assert!(r.start_time < stop, "empty or inverted interval: {:?}", r);
            assert!(stop <= 86_400, "stop past midnight: {:?}", r);
            assert_eq!(r.start_time % 3600, 0);
            assert_eq!(stop % 3600, 0);
            assert!(cfg.activities.contains(&r.activity));
            assert_eq!(r.date, day(2021, 3, 14));
        }
    }
}

#[test]
fn test_daily_fill_intervals_are_back_to_back_from_midnight() {
    let cfg = Config::default();
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..50 {
        let rows = daily_fill(day(2022, 6, 1), &cfg.activities, &cfg.daily, &mut rng);
        let mut clock = 0;
        for r in &rows {
            assert_eq!(r.start_time, clock);
            clock = r.stop_time.unwrap();
        }
        assert!(clock < 24 * 3600);
    }
}

#[test]
fn test_per_activity_rows_respect_span() {
    let cfg = Config::default();

    for seed in 0..100 {
        let mut rng = StdRng::seed_from_u64(seed);
        let rows = per_activity(day(2020, 1, 1), &cfg.activities, &cfg.per_activity, &mut rng);

        for r in &rows {
            let stop = r.stop_time.unwrap();
            assert!(r.start_time <= stop, "inverted: {:?}", r);
            assert!(stop <= r.start_time + 25, "span too wide: {:?}", r);
            assert!(r.start_time >= 0);
        }

        for label in &cfg.activities {
            let n = rows.iter().filter(|r| &r.activity == label).count();
            assert!((3..=10).contains(&n), "{} rows for {}", n, label);
        }
    }
}

#[test]
fn test_same_seed_same_rows() {
    let mut cfg = Config::default();

    for policy in [Policy::DailyFill, Policy::PerActivity] {
        cfg.policy = policy;
        let a = sessions_for_day(day(2023, 9, 9), &cfg, &mut StdRng::seed_from_u64(42));
        let b = sessions_for_day(day(2023, 9, 9), &cfg, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }
}

#[test]
fn test_single_activity_label() {
    let cfg = Config::default();
    let labels = vec!["reading".to_string()];
    let mut rng = StdRng::seed_from_u64(3);

    let rows = daily_fill(day(2024, 1, 1), &labels, &cfg.daily, &mut rng);
    assert!(rows.iter().all(|r| r.activity == "reading"));
}

#[test]
fn test_generate_inserts_every_row_of_the_report() {
    let mut pool = memory_pool();
    let cfg = Config {
        seed: Some(1),
        ..Config::default()
    };

    let report = GenerateLogic::apply(&mut pool, &cfg, &mut StdRng::seed_from_u64(1))
        .expect("generate");

    assert_eq!(report.days, 6 * 365);
    assert!(report.rows > 0);
    assert_eq!(count_sessions(&pool.conn).unwrap(), report.rows as i64);
    assert_eq!(report.first_date, Some(day(2020, 1, 1)));
    assert_eq!(report.last_date, Some(day(2025, 12, 31)));

    let (min, max): (String, String) = pool
        .conn
        .query_row(
            "SELECT MIN(date), MAX(date) FROM activitysessions",
            [],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .unwrap();
    assert!(min.as_str() >= "2020-01-01");
    assert!(max.as_str() <= "2025-12-31");
}

#[test]
fn test_generate_skips_leap_days_by_default() {
    let mut pool = memory_pool();
    let cfg = Config {
        years: vec![2020, 2024],
        ..Config::default()
    };

    GenerateLogic::apply(&mut pool, &cfg, &mut StdRng::seed_from_u64(5)).unwrap();

    let leap: i64 = pool
        .conn
        .query_row(
            "SELECT COUNT(*) FROM activitysessions WHERE strftime('%m-%d', date) = '02-29'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(leap, 0);
}

#[test]
fn test_generate_with_leap_days() {
    let mut pool = memory_pool();
    let cfg = Config {
        years: vec![2020],
        skip_leap_days: false,
        policy: Policy::PerActivity,
        ..Config::default()
    };

    let report = GenerateLogic::apply(&mut pool, &cfg, &mut StdRng::seed_from_u64(5)).unwrap();
    assert_eq!(report.days, 366);

    let leap: i64 = pool
        .conn
        .query_row(
            "SELECT COUNT(*) FROM activitysessions WHERE date = '2020-02-29'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    // per-activity always emits at least 3 rows per label
    assert!(leap >= 12);
}

#[test]
fn test_monthly_hours_are_never_negative() {
    let mut pool = memory_pool();
    let cfg = Config::default();
    GenerateLogic::apply(&mut pool, &cfg, &mut StdRng::seed_from_u64(11)).unwrap();

    let rows = monthly_hours(&pool.conn, 2023).unwrap();
    assert!(!rows.is_empty());
    assert!(rows.iter().all(|r| r.hours >= 0.0));
    assert!(rows.iter().all(|r| cfg.activities.contains(&r.activity)));
}

#[test]
fn test_failed_insert_rolls_back_the_whole_run() {
    // stop_time is capped, so the first long session makes the insert fail
    let schema = temp_file(
        "rollback_schema",
        "sql",
        "CREATE TABLE IF NOT EXISTS activitysessions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            date TEXT NOT NULL,
            activity TEXT NOT NULL,
            start_time TIMESTAMP NOT NULL,
            stop_time TIMESTAMP CHECK (stop_time < 36000)
        );",
    );

    let mut pool = DbPool::new(":memory:").unwrap();
    init_db(&pool.conn, &schema).unwrap();

    let cfg = Config::default();
    let res = GenerateLogic::apply(&mut pool, &cfg, &mut StdRng::seed_from_u64(2));

    assert!(res.is_err());
    assert_eq!(count_sessions(&pool.conn).unwrap(), 0);
}

#[test]
fn test_generate_rejects_unvalidated_config() {
    let mut pool = memory_pool();

    let mut cfg = Config {
        policy: Policy::PerActivity,
        years: vec![2020],
        ..Config::default()
    };
    cfg.per_activity.min_count = 11;

    let res = GenerateLogic::apply(&mut pool, &cfg, &mut StdRng::seed_from_u64(1));
    assert!(matches!(res, Err(AppError::Config(_))));

    let mut cfg = Config {
        years: vec![2020],
        ..Config::default()
    };
    cfg.daily.max_step_hours = -1;

    let res = GenerateLogic::apply(&mut pool, &cfg, &mut StdRng::seed_from_u64(1));
    assert!(matches!(res, Err(AppError::Config(_))));

    assert_eq!(count_sessions(&pool.conn).unwrap(), 0);
}
