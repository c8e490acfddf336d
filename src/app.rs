use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/days/:day/toggle", post(handlers::toggle_day_form))
        .route("/reset", post(handlers::reset_form))
        .route("/reminder/dismiss", post(handlers::dismiss_reminder_form))
        .route("/api/progress", get(handlers::get_progress))
        .route("/api/days/:day/complete", post(handlers::complete_day))
        .route("/api/days/:day/toggle", post(handlers::toggle_day))
        .route("/api/reset", post(handlers::reset))
        .route("/api/reminder/dismiss", post(handlers::dismiss_reminder))
        .with_state(state)
}
