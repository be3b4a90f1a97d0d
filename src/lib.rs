pub mod app;
pub mod calendar;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod palette;
pub mod state;
pub mod storage;
pub mod ui;

pub use app::router;
pub use calendar::{CalendarWindow, aggregate};
pub use config::{CalendarConfig, Config, WeekStart};
pub use errors::CalendarError;
pub use state::AppState;
pub use storage::load_data;
