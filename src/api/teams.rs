//! Team formation endpoints: reconcile-on-read, randomize, move, visibility.

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use chrono::Utc;

use super::{success, ApiResult};
use crate::auth;
use crate::engine;
use crate::errors::AppError;
use crate::models::{
    MoveRequest, Partition, RandomizeRequest, Session, StoredPartition, TeamsResponse,
    VisibilityRequest,
};
use crate::AppState;

async fn load_session(state: &AppState, id: &str) -> Result<Session, AppError> {
    state
        .repo
        .get_session(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Session {} not found", id)))
}

/// GET /api/sessions/{id}/teams - Reconciled team view.
///
/// Every read reconciles the stored snapshot against the current confirmed
/// attendees. Unlocked sessions get a fresh draft per read; nothing is
/// persisted until an admin randomizes. Non-admins see no team contents
/// while the session is hidden.
pub async fn get_teams(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> ApiResult<TeamsResponse> {
    let session = load_session(&state, &id).await?;
    let is_admin = auth::is_admin(&headers, state.config.api_psk.as_deref());

    if !session.show_teams && !is_admin {
        return success(TeamsResponse::hidden(session.locked));
    }

    let attendees = state.repo.list_confirmed_attendees(&id).await?;
    let stored = if session.locked {
        state.repo.load_partition(&id).await?
    } else {
        StoredPartition::Absent
    };
    let team_count = engine::default_team_count(attendees.len());

    let teams = {
        let mut rng = rand::thread_rng();
        engine::reconcile(&attendees, &stored, team_count, &mut rng)?
    };

    success(TeamsResponse::visible(
        session.locked,
        session.show_teams,
        teams,
    ))
}

/// POST /api/sessions/{id}/teams/randomize - Draft fresh teams and lock them.
///
/// Allowed on an already-locked session: the snapshot is replaced wholesale
/// and the session stays locked. Also reveals the teams, since an admin who
/// just drew teams expects to see them.
pub async fn randomize_teams(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<RandomizeRequest>,
) -> ApiResult<TeamsResponse> {
    load_session(&state, &id).await?;
    let attendees = state.repo.list_confirmed_attendees(&id).await?;

    let team_count = match request.team_count {
        Some(k) if (2..=engine::MAX_TEAM_COUNT as i64).contains(&k) => k as usize,
        Some(k) => {
            return Err(AppError::InvalidTeamCount(format!(
                "Team count must be between 2 and {}, got {}",
                engine::MAX_TEAM_COUNT,
                k
            )))
        }
        None => engine::default_team_count(attendees.len()),
    };

    let teams = {
        let mut rng = rand::thread_rng();
        engine::snake_draft(&attendees, team_count, &mut rng)?
    };

    let partition = Partition::from_teams(&teams, Utc::now().to_rfc3339());
    state.repo.commit_partition(&id, &partition).await?;
    state.repo.set_visibility(&id, true).await?;

    success(TeamsResponse::visible(true, true, teams))
}

/// POST /api/sessions/{id}/teams/move - Manual override of one placement.
///
/// Only valid on a locked, visible session so what the admin drags matches
/// what is shown. The moved view is re-committed immediately; overrides are
/// never staged.
pub async fn move_attendee(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<MoveRequest>,
) -> ApiResult<TeamsResponse> {
    let session = load_session(&state, &id).await?;
    if !session.locked || !session.show_teams {
        return Err(AppError::Validation(
            "Teams must be locked and visible before manual moves".to_string(),
        ));
    }

    if request.target_team_index < 0 {
        return Err(AppError::InvalidTeamIndex(format!(
            "Team index {} out of range",
            request.target_team_index
        )));
    }

    let attendees = state.repo.list_confirmed_attendees(&id).await?;
    let stored = state.repo.load_partition(&id).await?;
    let team_count = engine::default_team_count(attendees.len());

    let teams = {
        let mut rng = rand::thread_rng();
        let view = engine::reconcile(&attendees, &stored, team_count, &mut rng)?;
        engine::move_attendee(
            view,
            &request.attendee_id,
            request.target_team_index as usize,
            request.target_position_id.as_deref(),
        )?
    };

    let partition = Partition::from_teams(&teams, Utc::now().to_rfc3339());
    state.repo.commit_partition(&id, &partition).await?;

    success(TeamsResponse::visible(true, true, teams))
}

/// PUT /api/sessions/{id}/teams/visibility - Set the show-teams flag.
///
/// Pure flag write, idempotent, independent of lock state.
pub async fn set_visibility(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<VisibilityRequest>,
) -> ApiResult<Session> {
    load_session(&state, &id).await?;
    state.repo.set_visibility(&id, request.show).await?;
    let session = load_session(&state, &id).await?;
    success(session)
}
