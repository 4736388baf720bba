//! HTTP endpoint handlers

use std::{str::FromStr, sync::Arc};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::{error, info, warn};

use crate::{
    preferences::PreferencesUpdate,
    state::{AppState, Direction, EngineSnapshot, Field, TimerAction, TimerMode},
    tasks::spawn_hold_repeat,
};
use super::responses::{
    ApiResponse, FieldValue, HealthResponse, ModeSelect, PreferencesResponse, StatusResponse,
};

type ApiResult = Result<Json<ApiResponse>, StatusCode>;

/// Parse a path segment, rejecting unknown values with 400
fn parse_segment<T>(raw: &str) -> Result<T, StatusCode>
where
    T: FromStr<Err = String>,
{
    raw.parse().map_err(|e: String| {
        warn!("Rejected request: {}", e);
        StatusCode::BAD_REQUEST
    })
}

fn parse_action(raw: &str) -> Result<TimerAction, StatusCode> {
    TimerAction::from_name(raw).ok_or_else(|| {
        warn!("Rejected request: unknown action {}", raw);
        StatusCode::BAD_REQUEST
    })
}

/// Wrap an engine result in an ok response, logging failures
fn ok_response(result: Result<EngineSnapshot, String>, message: String) -> ApiResult {
    match result {
        Ok(snapshot) => Ok(Json(ApiResponse::ok(message, snapshot))),
        Err(e) => {
            error!("{}: {}", message, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /timers/:mode/:action - start, stop, toggle or reset one mode
pub async fn timer_action_handler(
    State(state): State<Arc<AppState>>,
    Path((mode, action)): Path<(String, String)>,
) -> ApiResult {
    let mode: TimerMode = parse_segment(&mode)?;
    let action = parse_action(&action)?;
    ok_response(
        state.timer_action(mode, action),
        format!("{} {}", action.name(), mode.label()),
    )
}

/// Handle POST /toggle - start or stop the displayed mode
pub async fn toggle_handler(State(state): State<Arc<AppState>>) -> ApiResult {
    ok_response(state.active_action(TimerAction::Toggle), "Toggled displayed mode".to_string())
}

/// Handle POST /reset - reset the displayed mode
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> ApiResult {
    ok_response(state.active_action(TimerAction::Reset), "Reset displayed mode".to_string())
}

/// Handle POST /mode/next - cycle the displayed mode
pub async fn next_mode_handler(State(state): State<Arc<AppState>>) -> ApiResult {
    ok_response(state.next_mode(), "Switched to next mode".to_string())
}

/// Handle PUT /mode - display a specific mode
pub async fn set_mode_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ModeSelect>,
) -> ApiResult {
    let mode: TimerMode = parse_segment(&body.mode)?;
    ok_response(state.set_mode(mode), format!("Displaying {}", mode.label()))
}

/// Handle PUT /fields/:field - set one field of the displayed mode
pub async fn set_field_handler(
    State(state): State<Arc<AppState>>,
    Path(field): Path<String>,
    Json(body): Json<FieldValue>,
) -> ApiResult {
    let field: Field = parse_segment(&field)?;
    match state.set_field(field, body.value) {
        Ok((true, snapshot)) => Ok(Json(ApiResponse::ok(format!("Set {}", field), snapshot))),
        Ok((false, snapshot)) => {
            info!("Ignored {} edit while running", field);
            Ok(Json(ApiResponse::ignored(
                format!("{} cannot be edited while the timer runs", field),
                snapshot,
            )))
        }
        Err(e) => {
            error!("Failed to set {}: {}", field, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Step one field of the displayed mode up or down
fn step_field(state: &AppState, field: &str, direction: Direction) -> ApiResult {
    let field: Field = parse_segment(field)?;
    match state.adjust_field(field, direction) {
        Ok((Some(value), snapshot)) => Ok(Json(ApiResponse::ok(
            format!("{} is now {}", field, value),
            snapshot,
        ))),
        Ok((None, snapshot)) => Ok(Json(ApiResponse::ignored(
            format!("{} unchanged", field),
            snapshot,
        ))),
        Err(e) => {
            error!("Failed to step {}: {}", field, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /fields/:field/increase
pub async fn increase_field_handler(
    State(state): State<Arc<AppState>>,
    Path(field): Path<String>,
) -> ApiResult {
    step_field(&state, &field, Direction::Increase)
}

/// Handle POST /fields/:field/decrease
pub async fn decrease_field_handler(
    State(state): State<Arc<AppState>>,
    Path(field): Path<String>,
) -> ApiResult {
    step_field(&state, &field, Direction::Decrease)
}

/// Handle POST /fields/:field/press/:direction - step once and start auto-repeat
pub async fn press_field_handler(
    State(state): State<Arc<AppState>>,
    Path((field, direction)): Path<(String, String)>,
) -> ApiResult {
    let field: Field = parse_segment(&field)?;
    let direction: Direction = parse_segment(&direction)?;
    match state.press_field(field, direction) {
        Ok((Some(hold), snapshot)) => {
            spawn_hold_repeat(Arc::clone(&state), field, hold);
            Ok(Json(ApiResponse::ok(format!("Holding {}", field), snapshot)))
        }
        Ok((None, snapshot)) => Ok(Json(ApiResponse::ignored(
            format!("{} cannot be edited while the timer runs", field),
            snapshot,
        ))),
        Err(e) => {
            error!("Failed to press {}: {}", field, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /fields/:field/release - stop auto-repeat
pub async fn release_field_handler(
    State(state): State<Arc<AppState>>,
    Path(field): Path<String>,
) -> ApiResult {
    let field: Field = parse_segment(&field)?;
    ok_response(state.release_field(field), format!("Released {}", field))
}

/// Handle GET /preferences
pub async fn get_preferences_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PreferencesResponse>, StatusCode> {
    match state.get_preferences() {
        Ok(preferences) => Ok(Json(PreferencesResponse::ok("Current preferences".to_string(), preferences))),
        Err(e) => {
            error!("Failed to get preferences: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle PUT /preferences - apply without saving
pub async fn apply_preferences_handler(
    State(state): State<Arc<AppState>>,
    Json(update): Json<PreferencesUpdate>,
) -> Result<Json<PreferencesResponse>, StatusCode> {
    match state.apply_preferences(update) {
        Ok(preferences) => Ok(Json(PreferencesResponse::ok("Preferences applied".to_string(), preferences))),
        Err(e) => {
            error!("Failed to apply preferences: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /preferences/save - apply and write the preferences file
pub async fn save_preferences_handler(
    State(state): State<Arc<AppState>>,
    Json(update): Json<PreferencesUpdate>,
) -> Result<Json<PreferencesResponse>, StatusCode> {
    match state.save_preferences(update) {
        Ok(preferences) => Ok(Json(PreferencesResponse::ok(
            format!("Preferences saved to {}", state.preferences_path.display()),
            preferences,
        ))),
        Err(e) => {
            error!("Failed to save preferences: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /status - Return current engine status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let snapshot = match state.get_snapshot() {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to get engine snapshot: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        snapshot,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
        last_alarm: state.get_last_alarm(),
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
