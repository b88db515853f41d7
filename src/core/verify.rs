use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::queries::{
    HoursRow, OpenSession, count_inverted_sessions, count_open_sessions, count_sessions,
    count_sessions_outside, daily_hours, date_range, latest_open_session, monthly_hours,
    yearly_hours,
};
use crate::errors::{AppError, AppResult};
use crate::utils::colors::{CYAN, GREEN, GREY, RED, RESET, YELLOW, color_for_hours};
use crate::utils::date::{calendar_bounds, parse_date};
use chrono::Datelike;
use serde::Serialize;

/// Result of running the aggregate queries against a populated table.
#[derive(Debug, Clone, Serialize)]
pub struct VerifyReport {
    pub total_rows: i64,
    pub first_date: Option<String>,
    pub last_date: Option<String>,
    pub open_sessions: i64,
    pub latest_open: Option<OpenSession>,
    pub year: i32,
    pub monthly: Vec<HoursRow>,
    pub yearly: Vec<HoursRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<Vec<HoursRow>>,
    pub problems: Vec<String>,
}

impl VerifyReport {
    pub fn is_ok(&self) -> bool {
        self.problems.is_empty()
    }
}

pub struct VerifyLogic;

impl VerifyLogic {
    /// Run every check and collect the problems found.
    ///
    /// `year` defaults to the year of the newest row. `date` adds a
    /// per-activity breakdown for that day.
    pub fn run(
        pool: &DbPool,
        cfg: &Config,
        year: Option<i32>,
        date: Option<&str>,
    ) -> AppResult<VerifyReport> {
        let conn = &pool.conn;
        let mut problems = Vec::new();

        let total_rows = count_sessions(conn)?;
        if total_rows == 0 {
            problems.push("activitysessions is empty".to_string());
        }

        let range = date_range(conn)?;
        let (first_date, last_date) = match range {
            Some((f, l)) => (Some(f), Some(l)),
            None => (None, None),
        };

        if let Some((lo, hi)) = calendar_bounds(&cfg.years) {
            let lo = lo.format("%Y-%m-%d").to_string();
            let hi = hi.format("%Y-%m-%d").to_string();
            let outside = count_sessions_outside(conn, &lo, &hi)?;
            if outside > 0 {
                problems.push(format!("{} rows dated outside {}..{}", outside, lo, hi));
            }
        }

        let inverted = count_inverted_sessions(conn)?;
        if inverted > 0 {
            problems.push(format!("{} rows with stop_time < start_time", inverted));
        }

        let year = match year {
            Some(y) => y,
            None => last_date
                .as_deref()
                .and_then(parse_date)
                .map(|d| d.year())
                .or_else(|| cfg.years.iter().max().copied())
                .ok_or_else(|| AppError::Other("no year to report on".into()))?,
        };

        let monthly = monthly_hours(conn, year)?;
        for r in monthly.iter().filter(|r| r.hours < 0.0) {
            problems.push(format!(
                "negative hours for {}-{} {}: {}",
                year, r.period, r.activity, r.hours
            ));
        }

        let yearly = yearly_hours(conn)?;
        for r in yearly.iter().filter(|r| r.hours < 0.0) {
            problems.push(format!(
                "negative hours for {} {}: {}",
                r.period, r.activity, r.hours
            ));
        }

        let day = match date {
            Some(d) => {
                if parse_date(d).is_none() {
                    return Err(AppError::Other(format!(
                        "invalid date '{}', expected YYYY-MM-DD",
                        d
                    )));
                }
                Some(daily_hours(conn, d)?)
            }
            None => None,
        };

        Ok(VerifyReport {
            total_rows,
            first_date,
            last_date,
            open_sessions: count_open_sessions(conn)?,
            latest_open: latest_open_session(conn)?,
            year,
            monthly,
            yearly,
            day,
            problems,
        })
    }

    pub fn print(report: &VerifyReport) {
        println!();
        println!(
            "{}• Total rows:{} {}{}{}",
            CYAN, RESET, GREEN, report.total_rows, RESET
        );

        let dash = format!("{GREY}--{RESET}");
        println!("{}• Date range:{}", CYAN, RESET);
        println!(
            "    from: {}",
            report.first_date.as_deref().unwrap_or(dash.as_str())
        );
        println!(
            "    to:   {}",
            report.last_date.as_deref().unwrap_or(dash.as_str())
        );

        println!(
            "{}• Open sessions:{} {}",
            CYAN, RESET, report.open_sessions
        );
        if let Some(open) = &report.latest_open {
            println!(
                "    latest: #{} {} (start {})",
                open.id, open.activity, open.start_time
            );
        }

        println!("{}• Hours by month, {}:{}", CYAN, report.year, RESET);
        Self::print_rows(&report.monthly);

        println!("{}• Hours by year:{}", CYAN, RESET);
        Self::print_rows(&report.yearly);

        if let Some(day) = &report.day {
            println!("{}• Hours by activity for the day:{}", CYAN, RESET);
            Self::print_rows(day);
        }

        println!();
        for p in &report.problems {
            println!("{}✘ {}{}", RED, p, RESET);
        }
        if report.is_ok() {
            println!("{}✔ All checks passed.{}", GREEN, RESET);
        }
    }

    fn print_rows(rows: &[HoursRow]) {
        if rows.is_empty() {
            println!("    {}(no rows){}", YELLOW, RESET);
            return;
        }

        let act_w = rows.iter().map(|r| r.activity.len()).max().unwrap_or(8);

        for r in rows {
            println!(
                "    {:<10} {:<act_w$} {}{:>10.2}{}",
                r.period,
                r.activity,
                color_for_hours(r.hours),
                r.hours,
                RESET,
                act_w = act_w
            );
        }
    }
}
