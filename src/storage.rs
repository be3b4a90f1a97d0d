use crate::errors::AppError;
use crate::models::{AppData, WorkoutRecord, WorkoutUpdate};
use std::{ffi::OsString, path::{Path, PathBuf}};
use tokio::fs;
use tracing::{error, info};

/// Load the store. A file that exists but does not parse is moved aside to
/// `<name>.corrupt` so the next write cannot overwrite it.
pub async fn load_data(path: &Path) -> Result<AppData, std::io::Error> {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice::<AppData>(&bytes) {
            Ok(data) => {
                info!("loaded {} workouts from {}", data.workouts.len(), path.display());
                Ok(data)
            }
            Err(err) => {
                let backup = corrupt_path(path);
                fs::rename(path, &backup).await?;
                error!(
                    "failed to parse data file: {err}; moved it to {}",
                    backup.display()
                );
                Ok(AppData::default())
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(AppData::default()),
        Err(err) => {
            error!("failed to read data file: {err}");
            Err(err)
        }
    }
}

fn corrupt_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".corrupt");
    path.with_file_name(name)
}

pub async fn persist_data(path: &Path, data: &AppData) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(data).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    Ok(())
}

impl AppData {
    /// Store a new record under the next free id and return a copy of it.
    pub fn insert(&mut self, mut record: WorkoutRecord) -> WorkoutRecord {
        let used = self.workouts.iter().map(|w| w.id).max().unwrap_or(0);
        record.id = self.next_id.max(used + 1);
        self.next_id = record.id + 1;
        self.workouts.push(record.clone());
        record
    }

    pub fn get(&self, id: u64) -> Option<&WorkoutRecord> {
        self.workouts.iter().find(|w| w.id == id)
    }

    /// Apply the fields present in `update`; absent fields stay untouched.
    pub fn update(&mut self, id: u64, update: WorkoutUpdate) -> Option<WorkoutRecord> {
        let record = self.workouts.iter_mut().find(|w| w.id == id)?;
        if let Some(workout_type) = update.workout_type {
            record.workout_type = workout_type;
        }
        if let Some(date) = update.date {
            record.date = date;
        }
        if let Some(duration) = update.duration_minutes {
            record.duration_minutes = Some(duration);
        }
        if let Some(notes) = update.notes {
            record.notes = Some(notes);
        }
        Some(record.clone())
    }

    pub fn remove(&mut self, id: u64) -> Option<WorkoutRecord> {
        let index = self.workouts.iter().position(|w| w.id == id)?;
        Some(self.workouts.remove(index))
    }
}
