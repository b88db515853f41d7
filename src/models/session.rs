use chrono::NaiveDate;
use serde::Serialize;

/// One synthesized row of the `activitysessions` table.
///
/// The meaning of `start_time` / `stop_time` depends on the policy that
/// produced the row: seconds-of-day for [`Policy::DailyFill`], plain
/// counters for [`Policy::PerActivity`].
///
/// [`Policy::DailyFill`]: crate::models::policy::Policy::DailyFill
/// [`Policy::PerActivity`]: crate::models::policy::Policy::PerActivity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivitySession {
    pub date: NaiveDate,        // ⇔ activitysessions.date (TEXT "YYYY-MM-DD")
    pub activity: String,       // ⇔ activitysessions.activity
    pub start_time: i64,        // ⇔ activitysessions.start_time
    pub stop_time: Option<i64>, // ⇔ activitysessions.stop_time (NULL = open session)
}

impl ActivitySession {
    pub fn closed(date: NaiveDate, activity: &str, start_time: i64, stop_time: i64) -> Self {
        Self {
            date,
            activity: activity.to_string(),
            start_time,
            stop_time: Some(stop_time),
        }
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}
