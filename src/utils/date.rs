use chrono::{Datelike, NaiveDate};

pub fn all_days_of_year(year: i32) -> Vec<NaiveDate> {
    let mut v = Vec::new();

    let Some(mut d) = NaiveDate::from_ymd_opt(year, 1, 1) else {
        return v;
    };
    while d.year() == year {
        v.push(d);
        match d.succ_opt() {
            Some(next) => d = next,
            None => break,
        }
    }

    v
}

pub fn is_leap_day(d: &NaiveDate) -> bool {
    d.month() == 2 && d.day() == 29
}

/// Every day of the given years, in ascending order.
/// With `skip_leap_days` February always has 28 days.
pub fn calendar_days(years: &[i32], skip_leap_days: bool) -> Vec<NaiveDate> {
    years
        .iter()
        .flat_map(|&y| all_days_of_year(y))
        .filter(|d| !(skip_leap_days && is_leap_day(d)))
        .collect()
}

/// First and last day covered by `years` (Jan 1st of the smallest,
/// Dec 31st of the largest).
pub fn calendar_bounds(years: &[i32]) -> Option<(NaiveDate, NaiveDate)> {
    let first = *years.iter().min()?;
    let last = *years.iter().max()?;
    Some((
        NaiveDate::from_ymd_opt(first, 1, 1)?,
        NaiveDate::from_ymd_opt(last, 12, 31)?,
    ))
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}
