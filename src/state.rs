use crate::config::CalendarConfig;
use crate::models::AppData;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub calendar: CalendarConfig,
    pub data: Arc<Mutex<AppData>>,
}

impl AppState {
    pub fn new(data_path: PathBuf, calendar: CalendarConfig, data: AppData) -> Self {
        Self {
            data_path,
            calendar,
            data: Arc::new(Mutex::new(data)),
        }
    }
}
