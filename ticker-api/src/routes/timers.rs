use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use ticker::{
    remote::dto::{DeleteTimerRequest, StartTimerRequest, StopTimerRequest},
    Timer, TimerPatch, TimerRemote,
};
use tracing::instrument;

use crate::app_state::AppState;

use super::ApiError;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_timers)
                .post(create_timer)
                .put(update_timer)
                .delete(delete_timer),
        )
        .route("/start", post(start_timer))
        .route("/stop", post(stop_timer))
}

#[instrument(name = "list_timers", skip(app_state))]
async fn list_timers(State(app_state): State<AppState>) -> Result<Json<Vec<Timer>>, ApiError> {
    let timers = app_state.timers.list().await?;
    Ok(Json(timers))
}

#[instrument(name = "create_timer", skip(app_state, body), fields(timer_id = %body.id))]
async fn create_timer(
    State(app_state): State<AppState>,
    Json(body): Json<Timer>,
) -> Result<StatusCode, ApiError> {
    app_state.timers.create(&body).await?;
    Ok(StatusCode::CREATED)
}

#[instrument(name = "update_timer", skip(app_state, body), fields(timer_id = %body.id))]
async fn update_timer(
    State(app_state): State<AppState>,
    Json(body): Json<TimerPatch>,
) -> Result<StatusCode, ApiError> {
    app_state.timers.update(&body).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(name = "delete_timer", skip(app_state, body), fields(timer_id = %body.id))]
async fn delete_timer(
    State(app_state): State<AppState>,
    Json(body): Json<DeleteTimerRequest>,
) -> Result<StatusCode, ApiError> {
    app_state.timers.delete(&body.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(name = "start_timer", skip(app_state, body), fields(timer_id = %body.id))]
async fn start_timer(
    State(app_state): State<AppState>,
    Json(body): Json<StartTimerRequest>,
) -> Result<StatusCode, ApiError> {
    app_state.timers.start(&body.id, body.start).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(name = "stop_timer", skip(app_state, body), fields(timer_id = %body.id))]
async fn stop_timer(
    State(app_state): State<AppState>,
    Json(body): Json<StopTimerRequest>,
) -> Result<StatusCode, ApiError> {
    app_state.timers.stop(&body.id, body.stop).await?;
    Ok(StatusCode::NO_CONTENT)
}
