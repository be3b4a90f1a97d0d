use crate::calendar::{CalendarWindow, aggregate, parse_workout_date};
use crate::config::{CalendarConfig, WeekStart};
use crate::errors::{AppError, CalendarError};
use crate::models::{
    CalendarQuery, ListQuery, WorkoutCreate, WorkoutForm, WorkoutRecord, WorkoutUpdate,
};
use crate::palette::{LegendEntry, legend};
use crate::state::AppState;
use crate::storage::persist_data;
use crate::ui::render_index;
use axum::{
    Form, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, Redirect},
};
use chrono::{Local, NaiveDate};
use tracing::info;

const DEFAULT_LIST_LIMIT: usize = 100;
const RECENT_ON_PAGE: usize = 10;

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let today = today();
    let records = snapshot(&state).await;
    let window = aggregate(&records, today, &state.calendar)?;
    let recent: Vec<_> = dated_newest_first(records)?
        .into_iter()
        .take(RECENT_ON_PAGE)
        .map(|(_, record)| record)
        .collect();
    Ok(Html(render_index(&window, &recent)))
}

pub async fn get_calendar(
    State(state): State<AppState>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<CalendarWindow>, AppError> {
    let config = calendar_config(&state.calendar, &query)?;
    let today = query.today.unwrap_or_else(today);
    let records = snapshot(&state).await;
    Ok(Json(aggregate(&records, today, &config)?))
}

pub async fn get_workout_types() -> Json<Vec<LegendEntry>> {
    Json(legend())
}

pub async fn list_workouts(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<WorkoutRecord>>, AppError> {
    let dated = dated_newest_first(snapshot(&state).await)?;
    let page = dated
        .into_iter()
        .filter(|(date, _)| {
            query.start_date.is_none_or(|start| *date >= start)
                && query.end_date.is_none_or(|end| *date <= end)
        })
        .map(|(_, record)| record)
        .skip(query.skip.unwrap_or(0))
        .take(query.limit.unwrap_or(DEFAULT_LIST_LIMIT))
        .collect();
    Ok(Json(page))
}

pub async fn get_workout(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<WorkoutRecord>, AppError> {
    let data = state.data.lock().await;
    data.get(id).cloned().map(Json).ok_or_else(|| missing(id))
}

pub async fn create_workout(
    State(state): State<AppState>,
    Json(payload): Json<WorkoutCreate>,
) -> Result<(StatusCode, Json<WorkoutRecord>), AppError> {
    let record = new_record(payload)?;
    let stored = insert_record(&state, record).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

pub async fn update_workout(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(mut payload): Json<WorkoutUpdate>,
) -> Result<Json<WorkoutRecord>, AppError> {
    if let Some(workout_type) = payload.workout_type.take() {
        payload.workout_type = Some(validate_type(&workout_type)?);
    }
    if let Some(date) = payload.date.take() {
        payload.date = Some(validate_date(&date)?.to_string());
    }

    let mut data = state.data.lock().await;
    let mut next = data.clone();
    let updated = next.update(id, payload).ok_or_else(|| missing(id))?;
    persist_data(&state.data_path, &next).await?;
    *data = next;
    info!(id, "workout updated");
    Ok(Json(updated))
}

pub async fn delete_workout(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, AppError> {
    remove_record(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn submit_workout(
    State(state): State<AppState>,
    Form(form): Form<WorkoutForm>,
) -> Result<Redirect, AppError> {
    let duration = form.duration_minutes.trim();
    let duration_minutes = if duration.is_empty() {
        None
    } else {
        Some(
            duration
                .parse::<u32>()
                .map_err(|_| AppError::bad_request("duration must be a whole number of minutes"))?,
        )
    };
    let notes = form.notes.trim();
    let record = new_record(WorkoutCreate {
        workout_type: form.workout_type,
        date: form.date,
        duration_minutes,
        notes: (!notes.is_empty()).then(|| notes.to_string()),
    })?;
    insert_record(&state, record).await?;
    Ok(Redirect::to("/"))
}

pub async fn submit_delete(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Redirect, AppError> {
    remove_record(&state, id).await?;
    Ok(Redirect::to("/"))
}

async fn insert_record(state: &AppState, record: WorkoutRecord) -> Result<WorkoutRecord, AppError> {
    let mut data = state.data.lock().await;
    let mut next = data.clone();
    let stored = next.insert(record);
    persist_data(&state.data_path, &next).await?;
    *data = next;
    info!(id = stored.id, workout_type = %stored.workout_type, date = %stored.date, "workout logged");
    Ok(stored)
}

async fn remove_record(state: &AppState, id: u64) -> Result<WorkoutRecord, AppError> {
    let mut data = state.data.lock().await;
    let mut next = data.clone();
    let removed = next.remove(id).ok_or_else(|| missing(id))?;
    persist_data(&state.data_path, &next).await?;
    *data = next;
    info!(id, "workout deleted");
    Ok(removed)
}

async fn snapshot(state: &AppState) -> Vec<WorkoutRecord> {
    state.data.lock().await.workouts.clone()
}

fn new_record(payload: WorkoutCreate) -> Result<WorkoutRecord, AppError> {
    Ok(WorkoutRecord {
        id: 0,
        workout_type: validate_type(&payload.workout_type)?,
        date: validate_date(&payload.date)?.to_string(),
        duration_minutes: payload.duration_minutes,
        notes: payload.notes,
        created_at: Some(Local::now().naive_local()),
    })
}

fn validate_type(value: &str) -> Result<String, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::bad_request("workout_type must not be empty"));
    }
    Ok(value.to_string())
}

fn validate_date(value: &str) -> Result<NaiveDate, AppError> {
    parse_workout_date(value)
        .ok_or_else(|| AppError::bad_request(format!("'{}' is not a calendar date", value.trim())))
}

fn record_date(record: &WorkoutRecord) -> Result<NaiveDate, CalendarError> {
    parse_workout_date(&record.date).ok_or_else(|| CalendarError::MalformedDate {
        id: record.id,
        value: record.date.clone(),
    })
}

fn dated_newest_first(
    records: Vec<WorkoutRecord>,
) -> Result<Vec<(NaiveDate, WorkoutRecord)>, CalendarError> {
    let mut dated = records
        .into_iter()
        .map(|record| Ok((record_date(&record)?, record)))
        .collect::<Result<Vec<_>, CalendarError>>()?;
    dated.sort_by(|(a_date, a), (b_date, b)| b_date.cmp(a_date).then(b.id.cmp(&a.id)));
    Ok(dated)
}

fn calendar_config(base: &CalendarConfig, query: &CalendarQuery) -> Result<CalendarConfig, AppError> {
    let week_start = match query.week_start.as_deref() {
        Some(value) => value.parse::<WeekStart>()?,
        None => base.week_start,
    };
    Ok(CalendarConfig::new(query.window.unwrap_or(base.window_size), week_start)?)
}

fn missing(id: u64) -> AppError {
    AppError::not_found(format!("workout {id} not found"))
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
