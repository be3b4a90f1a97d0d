//! Month-grid aggregation for the activity calendar.
//!
//! Records are validated into local calendar dates, resolved per day into at
//! most [`MAX_DISPLAY_ENTRIES`] ranked entries, and laid out as week-aligned
//! grids for a trailing window of months. Everything here is a pure function
//! of its inputs.

use crate::config::{CalendarConfig, MAX_WINDOW_SIZE, WeekStart};
use crate::errors::CalendarError;
use crate::models::WorkoutRecord;
use crate::palette::{self, LegendEntry, Rgb};
use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveDateTime};
use serde::Serialize;
use tracing::debug;

pub const MAX_DISPLAY_ENTRIES: usize = 2;
pub const DAYS_PER_WEEK: usize = 7;

const SUNDAY_FIRST_LABELS: [&str; DAYS_PER_WEEK] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// A workout whose date has already been parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatedWorkout<'a> {
    pub date: NaiveDate,
    pub workout_type: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayEntry {
    pub workout_type: String,
    pub color: Rgb,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayResolution {
    pub entries: Vec<DisplayEntry>,
    pub all_types: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub entries: Vec<DisplayEntry>,
    /// Every type logged that day in collection order, including the ones
    /// cut from `entries`.
    pub all_types: Vec<String>,
    pub is_today: bool,
}

/// How a day cell is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStyle {
    Empty,
    Solid(Rgb),
    /// Split along the diagonal; `upper` fills the top-right triangle.
    Split { upper: Rgb, lower: Rgb },
}

impl DayBucket {
    pub fn cell(&self) -> CellStyle {
        match self.entries.as_slice() {
            [] => CellStyle::Empty,
            [only] => CellStyle::Solid(only.color),
            [first, second, ..] => CellStyle::Split {
                upper: first.color,
                lower: second.color,
            },
        }
    }

    /// Hover text, e.g. `Mar 15 - Yoga, Running, Golf`.
    pub fn detail(&self) -> String {
        let day = self.date.format("%b %-d").to_string();
        if self.all_types.is_empty() {
            day
        } else {
            format!("{day} - {}", self.all_types.join(", "))
        }
    }
}

pub type Week = Vec<Option<DayBucket>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub label: String,
    pub leading_padding: usize,
    pub trailing_padding: usize,
    pub weeks: Vec<Week>,
}

impl MonthGrid {
    pub fn days(&self) -> impl Iterator<Item = &DayBucket> {
        self.weeks.iter().flatten().flatten()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarWindow {
    pub today: NaiveDate,
    pub week_start: WeekStart,
    pub weekday_labels: Vec<&'static str>,
    pub legend: Vec<LegendEntry>,
    pub months: Vec<MonthGrid>,
}

/// Parse a stored workout date into a local calendar date.
///
/// Accepts `YYYY-MM-DD`, an RFC 3339 timestamp (the date is taken in the
/// offset it carries, never converted to UTC) or a naive
/// `YYYY-MM-DDTHH:MM:SS` timestamp.
pub fn parse_workout_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(value) {
        return Some(stamp.date_naive());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|stamp| stamp.date())
}

/// Parse every record date, stopping at the first malformed one.
pub fn validate_records(records: &[WorkoutRecord]) -> Result<Vec<DatedWorkout<'_>>, CalendarError> {
    records
        .iter()
        .map(|record| {
            let date = parse_workout_date(&record.date).ok_or_else(|| CalendarError::MalformedDate {
                id: record.id,
                value: record.date.clone(),
            })?;
            Ok(DatedWorkout {
                date,
                workout_type: &record.workout_type,
            })
        })
        .collect()
}

/// Rank the workouts logged on `date` and keep the top two for display.
///
/// Ties keep their collection order.
pub fn resolve_day(date: NaiveDate, workouts: &[DatedWorkout<'_>]) -> DayResolution {
    let mut ranked = Vec::new();
    let mut all_types = Vec::new();

    for workout in workouts.iter().filter(|workout| workout.date == date) {
        let attrs = palette::lookup(workout.workout_type);
        all_types.push(workout.workout_type.to_string());
        ranked.push((
            attrs.priority,
            DisplayEntry {
                workout_type: workout.workout_type.to_string(),
                color: attrs.color,
            },
        ));
    }

    ranked.sort_by_key(|(priority, _)| *priority);
    let entries = ranked
        .into_iter()
        .take(MAX_DISPLAY_ENTRIES)
        .map(|(_, entry)| entry)
        .collect();

    DayResolution { entries, all_types }
}

pub fn days_in_month(first: NaiveDate) -> Result<u32, CalendarError> {
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .ok_or(CalendarError::DateOutOfRange)?;
    Ok(last.day())
}

fn leading_padding(first: NaiveDate, week_start: WeekStart) -> usize {
    let weekday = first.weekday();
    let index = match week_start {
        WeekStart::Sunday => weekday.num_days_from_sunday(),
        WeekStart::Monday => weekday.num_days_from_monday(),
    };
    index as usize
}

pub fn weekday_labels(week_start: WeekStart) -> Vec<&'static str> {
    let mut labels = SUNDAY_FIRST_LABELS.to_vec();
    if week_start == WeekStart::Monday {
        labels.rotate_left(1);
    }
    labels
}

/// First day of each month in the window, oldest first.
pub fn window_months(today: NaiveDate, window_size: u8) -> Result<Vec<NaiveDate>, CalendarError> {
    let anchor = today.with_day(1).ok_or(CalendarError::DateOutOfRange)?;
    let mut months = (0..u32::from(window_size))
        .map(|offset| {
            anchor
                .checked_sub_months(Months::new(offset))
                .ok_or(CalendarError::DateOutOfRange)
        })
        .collect::<Result<Vec<_>, _>>()?;
    months.reverse();
    Ok(months)
}

fn build_month(
    first: NaiveDate,
    workouts: &[DatedWorkout<'_>],
    today: NaiveDate,
    week_start: WeekStart,
) -> Result<MonthGrid, CalendarError> {
    let day_count = days_in_month(first)?;
    let leading = leading_padding(first, week_start);

    let mut weeks = Vec::new();
    let mut current: Week = vec![None; leading];
    for date in first.iter_days().take(day_count as usize) {
        let resolution = resolve_day(date, workouts);
        current.push(Some(DayBucket {
            date,
            entries: resolution.entries,
            all_types: resolution.all_types,
            is_today: date == today,
        }));
        if current.len() == DAYS_PER_WEEK {
            weeks.push(std::mem::take(&mut current));
        }
    }

    let trailing = if current.is_empty() {
        0
    } else {
        DAYS_PER_WEEK - current.len()
    };
    if !current.is_empty() {
        current.resize(DAYS_PER_WEEK, None);
        weeks.push(current);
    }

    Ok(MonthGrid {
        year: first.year(),
        month: first.month(),
        label: first.format("%B %Y").to_string(),
        leading_padding: leading,
        trailing_padding: trailing,
        weeks,
    })
}

/// Lay out the trailing window of month grids ending at `today`'s month.
pub fn build_window(
    workouts: &[DatedWorkout<'_>],
    today: NaiveDate,
    config: &CalendarConfig,
) -> Result<CalendarWindow, CalendarError> {
    if !(1..=MAX_WINDOW_SIZE).contains(&config.window_size) {
        return Err(CalendarError::InvalidWindowSize(config.window_size));
    }

    let months = window_months(today, config.window_size)?
        .into_iter()
        .map(|first| build_month(first, workouts, today, config.week_start))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CalendarWindow {
        today,
        week_start: config.week_start,
        weekday_labels: weekday_labels(config.week_start),
        legend: palette::legend(),
        months,
    })
}

/// Validate `records` and build the calendar window. Fails on the first
/// record whose date does not parse rather than dropping it.
pub fn aggregate(
    records: &[WorkoutRecord],
    today: NaiveDate,
    config: &CalendarConfig,
) -> Result<CalendarWindow, CalendarError> {
    let workouts = validate_records(records)?;
    debug!(
        records = workouts.len(),
        window = config.window_size,
        %today,
        "building calendar window"
    );
    build_window(&workouts, today, config)
}
