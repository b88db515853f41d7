use crate::errors::{AppError, AppResult};
use crate::models::policy::Policy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_DB_FILE_PATH: &str = "./activitysessions.db";
pub const DEFAULT_SCHEMA_FILE_PATH: &str = "./schema.sql";

/// Generation settings. Every field has a default, so a config file only
/// needs the keys it wants to change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: String,
    pub schema: String,
    pub years: Vec<i32>,
    pub activities: Vec<String>,
    pub policy: Policy,
    pub skip_leap_days: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub daily: DailyFillConfig,
    pub per_activity: PerActivityConfig,
}

/// Parameters of [`Policy::DailyFill`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DailyFillConfig {
    pub day_hours: i64,
    pub max_step_hours: i64,
}

/// Parameters of [`Policy::PerActivity`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PerActivityConfig {
    pub min_count: u32,
    pub max_count: u32,
    pub max_start: i64,
    pub max_span: i64,
}

fn default_years() -> Vec<i32> {
    (2020..=2025).collect()
}

fn default_activities() -> Vec<String> {
    ["programming", "writing", "reading", "volunteering"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DEFAULT_DB_FILE_PATH.to_string(),
            schema: DEFAULT_SCHEMA_FILE_PATH.to_string(),
            years: default_years(),
            activities: default_activities(),
            policy: Policy::default(),
            skip_leap_days: true,
            seed: None,
            daily: DailyFillConfig::default(),
            per_activity: PerActivityConfig::default(),
        }
    }
}

impl Default for DailyFillConfig {
    fn default() -> Self {
        Self {
            day_hours: 24,
            max_step_hours: 2,
        }
    }
}

impl Default for PerActivityConfig {
    fn default() -> Self {
        Self {
            min_count: 3,
            max_count: 10,
            max_start: 100,
            max_span: 25,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file, or return defaults when no
    /// path is given.
    pub fn load(path: Option<&str>) -> AppResult<Self> {
        let cfg = match path {
            Some(p) => {
                let content = fs::read_to_string(Path::new(p))
                    .map_err(|e| AppError::ConfigLoad(format!("{}: {}", p, e)))?;
                Self::from_yaml(&content)?
            }
            None => Config::default(),
        };

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_yaml(content: &str) -> AppResult<Self> {
        serde_yaml::from_str(content).map_err(|e| AppError::ConfigLoad(e.to_string()))
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Reject settings the generator cannot honor.
    pub fn validate(&self) -> AppResult<()> {
        if self.activities.is_empty() {
            return Err(AppError::Config("activities must not be empty".into()));
        }
        if self.activities.iter().any(|a| a.trim().is_empty()) {
            return Err(AppError::Config("activity labels must not be blank".into()));
        }
        if self.years.is_empty() {
            return Err(AppError::Config("years must not be empty".into()));
        }
        if let Some(y) = self.years.iter().find(|y| !(1..=9999).contains(*y)) {
            return Err(AppError::InvalidYear(y.to_string()));
        }
        if !(1..=24).contains(&self.daily.day_hours) {
            return Err(AppError::Config(format!(
                "daily.day_hours must be within 1..=24 (got {})",
                self.daily.day_hours
            )));
        }
        if self.daily.max_step_hours <= 0 {
            return Err(AppError::Config(
                "daily.max_step_hours must be positive".into(),
            ));
        }
        let pa = &self.per_activity;
        if pa.min_count > pa.max_count {
            return Err(AppError::Config(format!(
                "per_activity.min_count ({}) is greater than max_count ({})",
                pa.min_count, pa.max_count
            )));
        }
        if pa.max_start < 0 || pa.max_span < 0 {
            return Err(AppError::Config(
                "per_activity.max_start and max_span must not be negative".into(),
            ));
        }
        Ok(())
    }

    /// Years in ascending order, duplicates removed.
    pub fn sorted_years(&self) -> Vec<i32> {
        let mut years = self.years.clone();
        years.sort_unstable();
        years.dedup();
        years
    }
}
