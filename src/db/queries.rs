use crate::errors::AppResult;
use crate::models::session::ActivitySession;
use rusqlite::{Connection, OptionalExtension, Row, params};
use serde::Serialize;

pub const INSERT_SESSION: &str = "INSERT INTO activitysessions(date, activity, start_time, stop_time)
     VALUES (?1, ?2, ?3, ?4)";

const MONTHLY_HOURS_FOR_YEAR: &str = r#"
    SELECT strftime('%m', date) AS month, activity,
           ROUND(SUM(stop_time - start_time) * 1.0 / 3600, 2) AS hours
    FROM activitysessions
    WHERE stop_time IS NOT NULL AND strftime('%Y', date) = ?1
    GROUP BY month, activity
    ORDER BY month, activity
"#;

const YEARLY_HOURS: &str = r#"
    SELECT strftime('%Y', date) AS year, activity,
           ROUND(SUM(stop_time - start_time) * 1.0 / 3600, 2) AS hours
    FROM activitysessions
    WHERE stop_time IS NOT NULL
    GROUP BY year, activity
    ORDER BY year, activity
"#;

const DAILY_HOURS: &str = r#"
    SELECT activity, ROUND(SUM(stop_time - start_time) * 1.0 / 3600, 2) AS hours
    FROM activitysessions
    WHERE date = ?1 AND stop_time IS NOT NULL
    GROUP BY activity
    ORDER BY activity
"#;

/// One row of an aggregate report: `period` is a month (`01`..`12`), a
/// year or a date depending on the query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoursRow {
    pub period: String,
    pub activity: String,
    pub hours: f64,
}

/// Most recent session with a NULL `stop_time`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenSession {
    pub id: i64,
    pub activity: String,
    pub start_time: i64,
}

pub fn insert_session(conn: &Connection, s: &ActivitySession) -> AppResult<()> {
    let mut stmt = conn.prepare_cached(INSERT_SESSION)?;
    stmt.execute(params![s.date_str(), s.activity, s.start_time, s.stop_time])?;
    Ok(())
}

pub fn count_sessions(conn: &Connection) -> AppResult<i64> {
    let n = conn.query_row("SELECT COUNT(*) FROM activitysessions", [], |row| {
        row.get(0)
    })?;
    Ok(n)
}

/// Oldest and newest `date` values, `None` on an empty table.
pub fn date_range(conn: &Connection) -> AppResult<Option<(String, String)>> {
    let range = conn
        .query_row(
            "SELECT MIN(date), MAX(date) FROM activitysessions",
            [],
            |row| {
                Ok((
                    row.get::<_, Option<String>>(0)?,
                    row.get::<_, Option<String>>(1)?,
                ))
            },
        )
        .optional()?;

    Ok(match range {
        Some((Some(first), Some(last))) => Some((first, last)),
        _ => None,
    })
}

/// Number of rows whose date falls outside `first..=last` (or is not a
/// valid `YYYY-MM-DD` string).
pub fn count_sessions_outside(conn: &Connection, first: &str, last: &str) -> AppResult<i64> {
    let n = conn.query_row(
        "SELECT COUNT(*) FROM activitysessions
         WHERE date < ?1 OR date > ?2 OR date(date) IS NULL",
        params![first, last],
        |row| row.get(0),
    )?;
    Ok(n)
}

/// Rows with `stop_time < start_time`.
pub fn count_inverted_sessions(conn: &Connection) -> AppResult<i64> {
    let n = conn.query_row(
        "SELECT COUNT(*) FROM activitysessions
         WHERE stop_time IS NOT NULL AND stop_time < start_time",
        [],
        |row| row.get(0),
    )?;
    Ok(n)
}

pub fn count_open_sessions(conn: &Connection) -> AppResult<i64> {
    let n = conn.query_row(
        "SELECT COUNT(*) FROM activitysessions WHERE stop_time IS NULL",
        [],
        |row| row.get(0),
    )?;
    Ok(n)
}

pub fn latest_open_session(conn: &Connection) -> AppResult<Option<OpenSession>> {
    let s = conn
        .query_row(
            "SELECT id, activity, start_time FROM activitysessions
             WHERE stop_time IS NULL
             ORDER BY start_time DESC LIMIT 1",
            [],
            |row| {
                Ok(OpenSession {
                    id: row.get(0)?,
                    activity: row.get(1)?,
                    start_time: row.get(2)?,
                })
            },
        )
        .optional()?;
    Ok(s)
}

fn map_hours_row(row: &Row) -> rusqlite::Result<HoursRow> {
    Ok(HoursRow {
        period: row.get(0)?,
        activity: row.get(1)?,
        hours: row.get::<_, Option<f64>>(2)?.unwrap_or(0.0),
    })
}

fn collect_hours(conn: &Connection, sql: &str, arg: Option<&str>) -> AppResult<Vec<HoursRow>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = match arg {
        Some(a) => stmt.query_map([a], map_hours_row)?,
        None => stmt.query_map([], map_hours_row)?,
    };

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Hours per (month, activity) for one year.
pub fn monthly_hours(conn: &Connection, year: i32) -> AppResult<Vec<HoursRow>> {
    collect_hours(conn, MONTHLY_HOURS_FOR_YEAR, Some(&format!("{:04}", year)))
}

/// Hours per (year, activity) over the whole table.
pub fn yearly_hours(conn: &Connection) -> AppResult<Vec<HoursRow>> {
    collect_hours(conn, YEARLY_HOURS, None)
}

/// Hours per activity for one date; `period` is the date itself.
pub fn daily_hours(conn: &Connection, date: &str) -> AppResult<Vec<HoursRow>> {
    let mut stmt = conn.prepare(DAILY_HOURS)?;
    let rows = stmt.query_map([date], |row| {
        Ok(HoursRow {
            period: date.to_string(),
            activity: row.get(0)?,
            hours: row.get::<_, Option<f64>>(1)?.unwrap_or(0.0),
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Log rows as (id, date, operation, target, message), oldest first.
pub fn load_log(conn: &Connection) -> AppResult<Vec<(i64, String, String, String, String)>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, date, operation, COALESCE(target, ''), message FROM log ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get(0)?,
            row.get(1)?,
            row.get(2)?,
            row.get(3)?,
            row.get(4)?,
        ))
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
