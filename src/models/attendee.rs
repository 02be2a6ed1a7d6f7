//! Attendee model: a participant confirmed for a session.

use serde::{Deserialize, Serialize};

/// Skill rating assumed when a player never set one.
pub const DEFAULT_SKILL: i64 = 5;

/// A confirmed ("yes") attendance record for one session.
///
/// `attendance_id` is the stable identity of the RSVP itself; `user_id` points
/// at the underlying account and may be gone if the account was deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Attendee {
    pub attendance_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skill: Option<i64>,
}

impl Attendee {
    /// Skill rating with the 1-10 default applied.
    pub fn skill_or_default(&self) -> i64 {
        self.skill.unwrap_or(DEFAULT_SKILL)
    }

    /// Identity used for snapshot lookups: account id when present,
    /// otherwise the attendance id.
    pub fn identity(&self) -> &str {
        self.user_id.as_deref().unwrap_or(&self.attendance_id)
    }

    /// True if `id` names this attendee by either identity.
    pub fn matches(&self, id: &str) -> bool {
        self.attendance_id == id || self.user_id.as_deref() == Some(id)
    }
}

/// Request body for recording an RSVP.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordAttendanceRequest {
    pub display_name: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub skill: Option<i64>,
    #[serde(default = "default_status")]
    pub status: String,
}

fn default_status() -> String {
    "yes".to_string()
}

/// Request body for changing an RSVP status.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAttendanceRequest {
    pub status: String,
}
