//! Session model: the record owning lock state, visibility and the partition.

use serde::{Deserialize, Serialize};

use super::{team_color, Attendee};

/// A scheduled pickup session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub title: String,
    pub starts_at: String,
    /// Whether an authoritative partition exists and must be respected.
    pub locked: bool,
    /// Whether non-admins may see team contents. Independent of `locked`.
    pub show_teams: bool,
    pub created_at: String,
}

/// Request body for creating a session.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    pub title: String,
    pub starts_at: String,
}

/// Request body for the admin randomize action.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RandomizeRequest {
    /// Explicit team count; derived from attendance size when omitted.
    #[serde(default)]
    pub team_count: Option<i64>,
}

/// Request body for the admin drag/move action.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    pub attendee_id: String,
    pub target_team_index: i64,
    /// Attendee to insert before; appended to the team when omitted.
    #[serde(default)]
    pub target_position_id: Option<String>,
}

/// Request body for setting the visibility flag.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibilityRequest {
    pub show: bool,
}

/// One team in the live view returned to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamView {
    pub index: usize,
    pub color: &'static str,
    pub players: Vec<Attendee>,
}

/// The reconciled team view for a session.
///
/// `teams` is omitted entirely for non-admins while `show_teams` is false.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamsResponse {
    pub locked: bool,
    pub show_teams: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teams: Option<Vec<TeamView>>,
}

impl TeamsResponse {
    /// Wrap reconciled teams with their index and color labels.
    pub fn visible(locked: bool, show_teams: bool, teams: Vec<Vec<Attendee>>) -> Self {
        let teams = teams
            .into_iter()
            .enumerate()
            .map(|(index, players)| TeamView {
                index,
                color: team_color(index),
                players,
            })
            .collect();
        Self {
            locked,
            show_teams,
            teams: Some(teams),
        }
    }

    /// The view a non-admin gets while teams are hidden.
    pub fn hidden(locked: bool) -> Self {
        Self {
            locked,
            show_teams: false,
            teams: None,
        }
    }
}
