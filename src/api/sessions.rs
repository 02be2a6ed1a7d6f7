//! Session and attendance boundary endpoints.
//!
//! Thin CRUD surface so sessions exist and RSVPs flow in; the team engine
//! itself lives under `api::teams`.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::models::{
    Attendee, CreateSessionRequest, RecordAttendanceRequest, Session, UpdateAttendanceRequest,
};
use crate::AppState;

const RSVP_STATUSES: [&str; 3] = ["yes", "no", "maybe"];

/// POST /api/sessions - Create a session.
pub async fn create_session(
    State(state): State<AppState>,
    Json(request): Json<CreateSessionRequest>,
) -> ApiResult<Session> {
    if request.title.trim().is_empty() {
        return Err(AppError::Validation("Title is required".to_string()));
    }

    let session = state.repo.create_session(&request).await?;
    success(session)
}

/// GET /api/sessions/{id} - Get session metadata and flags.
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Session> {
    let session = state
        .repo
        .get_session(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Session {} not found", id)))?;
    success(session)
}

/// POST /api/sessions/{id}/attendances - Record an RSVP for a session.
pub async fn record_attendance(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<RecordAttendanceRequest>,
) -> ApiResult<Attendee> {
    if request.display_name.trim().is_empty() {
        return Err(AppError::Validation("Display name is required".to_string()));
    }
    if !RSVP_STATUSES.contains(&request.status.as_str()) {
        return Err(AppError::Validation(format!(
            "Unknown RSVP status '{}'",
            request.status
        )));
    }
    if let Some(skill) = request.skill {
        if !(1..=10).contains(&skill) {
            return Err(AppError::Validation(
                "Skill must be between 1 and 10".to_string(),
            ));
        }
    }

    state
        .repo
        .get_session(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Session {} not found", id)))?;

    let attendee = state.repo.record_attendance(&id, &request).await?;
    success(attendee)
}

/// PUT /api/attendances/{id} - Change an RSVP status.
pub async fn update_attendance(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateAttendanceRequest>,
) -> ApiResult<()> {
    if !RSVP_STATUSES.contains(&request.status.as_str()) {
        return Err(AppError::Validation(format!(
            "Unknown RSVP status '{}'",
            request.status
        )));
    }

    state.repo.set_attendance_status(&id, &request.status).await?;
    success(())
}
