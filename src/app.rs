use crate::handlers;
use crate::state::AppState;
use axum::{Router, routing::{get, post}};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/workouts", post(handlers::submit_workout))
        .route("/workouts/:id/delete", post(handlers::submit_delete))
        .route(
            "/api/workouts",
            get(handlers::list_workouts).post(handlers::create_workout),
        )
        .route(
            "/api/workouts/:id",
            get(handlers::get_workout)
                .put(handlers::update_workout)
                .delete(handlers::delete_workout),
        )
        .route("/api/calendar", get(handlers::get_calendar))
        .route("/api/workout-types", get(handlers::get_workout_types))
        .with_state(state)
}
