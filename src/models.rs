use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A logged workout as held by the store. `date` stays textual; it is
/// validated when the calendar is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutRecord {
    pub id: u64,
    pub workout_type: String,
    pub date: String,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppData {
    pub next_id: u64,
    pub workouts: Vec<WorkoutRecord>,
}

impl Default for AppData {
    fn default() -> Self {
        Self {
            next_id: 1,
            workouts: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct WorkoutCreate {
    pub workout_type: String,
    pub date: String,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct WorkoutUpdate {
    pub workout_type: Option<String>,
    pub date: Option<String>,
    pub duration_minutes: Option<u32>,
    pub notes: Option<String>,
}

/// HTML form body; empty inputs arrive as empty strings.
#[derive(Debug, Deserialize)]
pub struct WorkoutForm {
    pub workout_type: String,
    pub date: String,
    #[serde(default)]
    pub duration_minutes: String,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub skip: Option<usize>,
    pub limit: Option<usize>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CalendarQuery {
    pub today: Option<NaiveDate>,
    pub window: Option<u8>,
    pub week_start: Option<String>,
}
