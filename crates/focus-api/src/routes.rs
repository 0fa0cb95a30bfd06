//! HTTP API for the Focus frontend
//!
//! Response envelopes match what the web client expects: a profile is
//! `{"userInfo", "intervals", "activeInterval"}`, errors are `{"error": msg}`.
//! Completed intervals carry display-formatted timestamps; the active interval
//! keeps RFC 3339 so elapsed time can be computed client-side.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::intervals::{self, Interval};
use crate::store::Store;
use crate::users::NewUser;

/// Application state
pub struct AppState {
    store: Store,
}

impl AppState {
    pub fn new(store: Store) -> Self {
        Self { store }
    }
}

/// Build the API router
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/api/user", post(create_user_handler))
        .route(
            "/api/user/{id}",
            get(get_user_handler).delete(delete_user_handler),
        )
        .route("/api/settings/{id}", put(edit_settings_handler))
        .route("/api/interval", post(start_interval_handler))
        .route("/api/interval/{id}/stop", post(stop_interval_handler))
        .route(
            "/api/interval/{id}",
            put(edit_interval_handler).delete(delete_interval_handler),
        )
        .layer(cors)
        .with_state(Arc::new(state))
}

// =============================================================================
// Error handling
// =============================================================================

/// API error with the JSON envelope the frontend expects
pub enum ApiError {
    NotFound(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        tracing::error!("storage error: {:#}", err);
        ApiError::Internal(err.to_string())
    }
}

// =============================================================================
// Wire types
// =============================================================================

/// Interval as serialized in profile responses
#[derive(Debug, Serialize)]
pub struct IntervalView {
    pub interval_id: i64,
    pub user_id: i64,
    pub project_id: Option<i64>,
    pub name: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

impl IntervalView {
    /// Display-formatted timestamps, for the completed-intervals list
    pub fn display(interval: &Interval) -> Self {
        Self {
            interval_id: interval.id.unwrap_or_default(),
            user_id: interval.user_id,
            project_id: interval.project_id,
            name: interval.name.clone(),
            start_time: Some(intervals::format_display(&interval.start_time)),
            end_time: interval.end_time.as_ref().map(intervals::format_display),
        }
    }

    /// RFC 3339 timestamps, for the active interval
    pub fn raw(interval: &Interval) -> Self {
        Self {
            interval_id: interval.id.unwrap_or_default(),
            user_id: interval.user_id,
            project_id: interval.project_id,
            name: interval.name.clone(),
            start_time: Some(interval.start_time.to_rfc3339()),
            end_time: interval.end_time.map(|e| e.to_rfc3339()),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProfileResponse {
    user_info: crate::users::User,
    intervals: Vec<IntervalView>,
    active_interval: Option<IntervalView>,
}

#[derive(Debug, Deserialize)]
struct EditSettingsRequest {
    timezone: String,
}

#[derive(Debug, Deserialize)]
struct StartIntervalRequest {
    name: String,
    user_id: i64,
    project_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct EditIntervalRequest {
    name: String,
    project_id: Option<i64>,
    start_time: DateTime<Utc>,
    end_time: Option<DateTime<Utc>>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Root endpoint
async fn root_handler() -> Json<serde_json::Value> {
    Json(json!({
        "service": shared::CONFIG.name,
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
    }))
}

/// Health check endpoint
async fn health_handler(State(state): State<Arc<AppState>>) -> Result<Json<serde_json::Value>, ApiError> {
    let stats = state.store.stats().await?;
    Ok(Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
        "users": stats.users,
        "intervals": stats.intervals,
    })))
}

/// Create a user and return its ID
async fn create_user_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<NewUser>,
) -> Result<impl IntoResponse, ApiError> {
    tracing::info!("creating user {}", request.username);
    let id = state.store.create_user(&request).await?;
    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

/// Fetch a user's profile: account info, completed intervals, active interval
async fn get_user_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let user = state
        .store
        .get_user(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No user with id {}", id)))?;

    let finished = state.store.finished_intervals(id).await?;
    let active = state.store.active_interval(id).await?;

    Ok(Json(ProfileResponse {
        user_info: user,
        intervals: finished.iter().map(IntervalView::display).collect(),
        active_interval: active.as_ref().map(IntervalView::raw),
    }))
}

/// Delete a user and their intervals
async fn delete_user_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if !state.store.delete_user(id).await? {
        return Err(ApiError::NotFound(format!("No user with id {}", id)));
    }
    Ok(Json(json!({ "id": id })))
}

/// Change a user's settings (currently only the timezone)
async fn edit_settings_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(request): Json<EditSettingsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if !state.store.set_timezone(id, &request.timezone).await? {
        return Err(ApiError::NotFound(format!("No user with id {}", id)));
    }
    Ok((
        StatusCode::CREATED,
        Json(json!({ "id": id, "timezone": request.timezone })),
    ))
}

/// Start a new interval; the server stamps the start time
async fn start_interval_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<StartIntervalRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let id = state
        .store
        .start_interval(request.user_id, request.project_id, &request.name, Utc::now())
        .await?;
    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

/// Stop a running interval; the server stamps the end time
async fn stop_interval_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let end = Utc::now();
    if !state.store.end_interval(id, end).await? {
        return Err(ApiError::NotFound(format!("No interval with id {}", id)));
    }
    Ok((
        StatusCode::CREATED,
        Json(json!({ "id": id, "endTime": end.to_rfc3339() })),
    ))
}

/// Rewrite an interval's name, project, and times
async fn edit_interval_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(request): Json<EditIntervalRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let interval = Interval {
        id: Some(id),
        // user_id is not editable; the store keys the update on interval_id
        user_id: 0,
        project_id: request.project_id,
        name: request.name,
        start_time: request.start_time,
        end_time: request.end_time,
    };
    if !state.store.edit_interval(id, &interval).await? {
        return Err(ApiError::NotFound(format!("No interval with id {}", id)));
    }
    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

/// Delete an interval
async fn delete_interval_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if !state.store.delete_interval(id).await? {
        return Err(ApiError::NotFound(format!("No interval with id {}", id)));
    }
    Ok(Json(json!({ "id": id })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_interval() -> Interval {
        Interval {
            id: Some(42),
            user_id: 1,
            project_id: Some(3),
            name: "deep work".to_string(),
            start_time: Utc.with_ymd_and_hms(2025, 8, 29, 9, 0, 0).unwrap(),
            end_time: Some(Utc.with_ymd_and_hms(2025, 8, 29, 10, 0, 0).unwrap()),
        }
    }

    #[test]
    fn test_display_view_formats_timestamps() {
        let view = IntervalView::display(&sample_interval());
        assert_eq!(view.interval_id, 42);
        assert_eq!(
            view.start_time.as_deref(),
            Some("Friday 29 August 2025 09:00:00 UTC")
        );
        assert_eq!(
            view.end_time.as_deref(),
            Some("Friday 29 August 2025 10:00:00 UTC")
        );
    }

    #[test]
    fn test_raw_view_keeps_rfc3339() {
        let mut interval = sample_interval();
        interval.end_time = None;
        let view = IntervalView::raw(&interval);
        assert_eq!(view.start_time.as_deref(), Some("2025-08-29T09:00:00+00:00"));
        assert_eq!(view.end_time, None);
    }

    #[test]
    fn test_profile_envelope_uses_camel_case_keys() {
        let profile = ProfileResponse {
            user_info: crate::users::User {
                id: 1,
                username: "dana".to_string(),
                email: "dana@example.com".to_string(),
                timezone: "UTC".to_string(),
            },
            intervals: vec![IntervalView::display(&sample_interval())],
            active_interval: None,
        };

        let value = serde_json::to_value(&profile).unwrap();
        assert!(value.get("userInfo").is_some());
        assert!(value.get("intervals").is_some());
        assert!(value.get("activeInterval").is_some());
        assert_eq!(value["activeInterval"], serde_json::Value::Null);
    }
}
