//! Database repository for session, attendance and snapshot operations.
//!
//! Uses prepared statements; every engine write goes through here.

use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{
    Attendee, CreateSessionRequest, Partition, RecordAttendanceRequest, Session, StoredPartition,
};

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ==================== SESSION OPERATIONS ====================

    /// Create a new session, unlocked and hidden.
    pub async fn create_session(&self, request: &CreateSessionRequest) -> Result<Session, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO sessions (id, title, starts_at, locked, show_teams, partition_json, created_at) VALUES (?, ?, ?, 0, 0, NULL, ?)"
        )
        .bind(&id)
        .bind(&request.title)
        .bind(&request.starts_at)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(Session {
            id,
            title: request.title.clone(),
            starts_at: request.starts_at.clone(),
            locked: false,
            show_teams: false,
            created_at: now,
        })
    }

    /// Get a session by ID.
    pub async fn get_session(&self, id: &str) -> Result<Option<Session>, AppError> {
        let row = sqlx::query(
            "SELECT id, title, starts_at, locked, show_teams, created_at FROM sessions WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(session_from_row))
    }

    /// Set the visibility flag. Idempotent; does not touch lock state.
    pub async fn set_visibility(&self, id: &str, show: bool) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE sessions SET show_teams = ? WHERE id = ?")
            .bind(show as i32)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Session {} not found", id)));
        }
        Ok(())
    }

    // ==================== SNAPSHOT OPERATIONS ====================

    /// Persist a partition and mark the session locked, in one write.
    ///
    /// This is the only operation that sets the lock flag. Re-committing an
    /// already-locked session replaces the snapshot wholesale. Last writer
    /// wins: two admins racing on the same session silently overwrite each
    /// other (accepted single-admin workflow).
    pub async fn commit_partition(
        &self,
        session_id: &str,
        partition: &Partition,
    ) -> Result<(), AppError> {
        let json = serde_json::to_string(partition)
            .map_err(|e| AppError::Internal(format!("Failed to encode partition: {}", e)))?;

        let result = sqlx::query("UPDATE sessions SET partition_json = ?, locked = 1 WHERE id = ?")
            .bind(&json)
            .bind(session_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Session {} not found",
                session_id
            )));
        }
        Ok(())
    }

    /// Load the stored partition for a session.
    ///
    /// Undecodable or degenerate snapshots come back as `Malformed` so the
    /// reconciler can heal instead of failing the request.
    pub async fn load_partition(&self, session_id: &str) -> Result<StoredPartition, AppError> {
        let row = sqlx::query("SELECT partition_json FROM sessions WHERE id = ?")
            .bind(session_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Session {} not found", session_id)))?;

        let json: Option<String> = row.get("partition_json");
        let Some(json) = json else {
            return Ok(StoredPartition::Absent);
        };

        match serde_json::from_str::<Partition>(&json) {
            Ok(partition) if partition.is_well_formed() => Ok(StoredPartition::Locked(partition)),
            Ok(_) => {
                tracing::warn!(session_id, "Stored partition is degenerate");
                Ok(StoredPartition::Malformed)
            }
            Err(e) => {
                tracing::warn!(session_id, "Stored partition failed to decode: {}", e);
                Ok(StoredPartition::Malformed)
            }
        }
    }

    // ==================== ATTENDANCE OPERATIONS ====================

    /// List confirmed ("yes") attendees for a session, in arrival order.
    ///
    /// Arrival order is what makes round-robin placement of late arrivals
    /// deterministic across reads.
    pub async fn list_confirmed_attendees(
        &self,
        session_id: &str,
    ) -> Result<Vec<Attendee>, AppError> {
        let rows = sqlx::query(
            "SELECT id, user_id, display_name, skill FROM attendances WHERE session_id = ? AND status = 'yes' ORDER BY created_at, id"
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|row| attendee_from_row(&row)).collect())
    }

    /// Record an RSVP.
    pub async fn record_attendance(
        &self,
        session_id: &str,
        request: &RecordAttendanceRequest,
    ) -> Result<Attendee, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO attendances (id, session_id, user_id, display_name, skill, status, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?)"
        )
        .bind(&id)
        .bind(session_id)
        .bind(&request.user_id)
        .bind(&request.display_name)
        .bind(request.skill)
        .bind(&request.status)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(Attendee {
            attendance_id: id,
            user_id: request.user_id.clone(),
            display_name: request.display_name.clone(),
            skill: request.skill,
        })
    }

    /// Change an RSVP status (e.g. a withdrawal after teams were locked).
    pub async fn set_attendance_status(&self, id: &str, status: &str) -> Result<(), AppError> {
        let now = Utc::now().to_rfc3339();
        let result = sqlx::query("UPDATE attendances SET status = ?, updated_at = ? WHERE id = ?")
            .bind(status)
            .bind(&now)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Attendance {} not found", id)));
        }
        Ok(())
    }
}

// Helper functions for row conversion

fn session_from_row(row: &sqlx::sqlite::SqliteRow) -> Session {
    let locked: i32 = row.get("locked");
    let show_teams: i32 = row.get("show_teams");
    Session {
        id: row.get("id"),
        title: row.get("title"),
        starts_at: row.get("starts_at"),
        locked: locked != 0,
        show_teams: show_teams != 0,
        created_at: row.get("created_at"),
    }
}

fn attendee_from_row(row: &sqlx::sqlite::SqliteRow) -> Attendee {
    Attendee {
        attendance_id: row.get("id"),
        user_id: row.get("user_id"),
        display_name: row.get("display_name"),
        skill: row.get("skill"),
    }
}
