use crate::errors::AppError;
use crate::models::{ProgressResponse, ResetRequest};
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    Form, Json,
};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let mut session = state.session.lock().await;
    session.page_load();
    Html(render_index(&session.snapshot()))
}

pub async fn get_progress(State(state): State<AppState>) -> Json<ProgressResponse> {
    let session = state.session.lock().await;
    Json(session.snapshot())
}

pub async fn complete_day(
    State(state): State<AppState>,
    Path(day): Path<u32>,
) -> Result<Json<ProgressResponse>, AppError> {
    let mut session = state.session.lock().await;
    session.mark_complete(day)?;
    Ok(Json(session.snapshot()))
}

pub async fn toggle_day(
    State(state): State<AppState>,
    Path(day): Path<u32>,
) -> Result<Json<ProgressResponse>, AppError> {
    let mut session = state.session.lock().await;
    session.toggle_complete(day)?;
    Ok(Json(session.snapshot()))
}

pub async fn reset(
    State(state): State<AppState>,
    Json(payload): Json<ResetRequest>,
) -> Result<Json<ProgressResponse>, AppError> {
    apply_reset(&state, &payload).await?;
    let session = state.session.lock().await;
    Ok(Json(session.snapshot()))
}

pub async fn dismiss_reminder(State(state): State<AppState>) -> Json<ProgressResponse> {
    let mut session = state.session.lock().await;
    session.dismiss_reminder();
    Json(session.snapshot())
}

pub async fn toggle_day_form(
    State(state): State<AppState>,
    Path(day): Path<u32>,
) -> Result<Redirect, AppError> {
    state.session.lock().await.toggle_complete(day)?;
    Ok(Redirect::to("/"))
}

pub async fn reset_form(
    State(state): State<AppState>,
    Form(payload): Form<ResetRequest>,
) -> Result<Redirect, AppError> {
    apply_reset(&state, &payload).await?;
    Ok(Redirect::to("/"))
}

pub async fn dismiss_reminder_form(State(state): State<AppState>) -> Redirect {
    state.session.lock().await.dismiss_reminder();
    Redirect::to("/")
}

async fn apply_reset(state: &AppState, payload: &ResetRequest) -> Result<(), AppError> {
    if !payload.confirm {
        return Err(AppError::bad_request("reset must be confirmed"));
    }
    state.session.lock().await.reset();
    Ok(())
}
