use crate::errors::{CalendarError, ConfigError};
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, str::FromStr};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATA_PATH: &str = "data/workouts.json";
pub const DEFAULT_WINDOW_SIZE: u8 = 3;
pub const MAX_WINDOW_SIZE: u8 = 12;

/// First column of each calendar week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl FromStr for WeekStart {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sunday" | "sun" => Ok(Self::Sunday),
            "monday" | "mon" => Ok(Self::Monday),
            other => Err(ConfigError::InvalidWeekStart(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarConfig {
    pub window_size: u8,
    pub week_start: WeekStart,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            week_start: WeekStart::Sunday,
        }
    }
}

impl CalendarConfig {
    pub fn new(window_size: u8, week_start: WeekStart) -> Result<Self, CalendarError> {
        if !(1..=MAX_WINDOW_SIZE).contains(&window_size) {
            return Err(CalendarError::InvalidWindowSize(window_size));
        }
        Ok(Self {
            window_size,
            week_start,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    pub calendar: CalendarConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `get` so tests don't touch the process
    /// environment.
    pub fn from_env_with<F>(mut get: F) -> Result<Self, ConfigError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let port = match get("PORT") {
            Some(value) => parse_number("PORT", value)?,
            None => DEFAULT_PORT,
        };
        let data_path = get("APP_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));

        let window_size = match get("CALENDAR_WINDOW_MONTHS") {
            Some(value) => parse_number("CALENDAR_WINDOW_MONTHS", value)?,
            None => DEFAULT_WINDOW_SIZE,
        };
        let week_start = match get("CALENDAR_WEEK_START") {
            Some(value) => value.parse::<WeekStart>()?,
            None => WeekStart::default(),
        };
        let calendar = CalendarConfig::new(window_size, week_start)?;

        Ok(Self {
            port,
            data_path,
            calendar,
        })
    }
}

fn parse_number<T>(name: &'static str, value: String) -> Result<T, ConfigError>
where
    T: FromStr<Err = std::num::ParseIntError>,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|source| ConfigError::InvalidNumber { name, value, source })
}
