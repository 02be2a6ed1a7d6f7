//! Persisted team partition (snapshot) matching the frontend wire format.

use serde::{Deserialize, Serialize};

use super::Attendee;

/// Team colors by team index. Team count is capped at 5.
pub const TEAM_COLORS: [&str; 5] = ["Black", "White", "Red", "Blue", "Yellow"];

/// Color label for a team index.
pub fn team_color(index: usize) -> &'static str {
    TEAM_COLORS.get(index).copied().unwrap_or("Gray")
}

/// One membership record inside a snapshot.
///
/// This is a reference, not a copy: display name and skill are always re-read
/// from the live attendance record, never stored here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub attendance_id: String,
}

impl Membership {
    pub fn of(attendee: &Attendee) -> Self {
        Self {
            user_id: attendee.user_id.clone(),
            attendance_id: attendee.attendance_id.clone(),
        }
    }

    /// Identity used for live-attendee lookups: account id when present,
    /// otherwise the attendance id.
    pub fn identity(&self) -> &str {
        self.user_id.as_deref().unwrap_or(&self.attendance_id)
    }
}

/// The persisted, authoritative record of a lock event.
///
/// Serialized as `{"teams": [...], "numOfTeams": n, "lockedAt": "..."}` for
/// compatibility with the stored format.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Partition {
    pub teams: Vec<Vec<Membership>>,
    pub num_of_teams: i64,
    pub locked_at: String,
}

impl Partition {
    /// Build a snapshot from live teams, stamping the lock time.
    pub fn from_teams(teams: &[Vec<Attendee>], locked_at: String) -> Self {
        Self {
            teams: teams
                .iter()
                .map(|team| team.iter().map(Membership::of).collect())
                .collect(),
            num_of_teams: teams.len() as i64,
            locked_at,
        }
    }

    /// A snapshot is usable only if its declared team count is sane and
    /// matches the stored team lists.
    pub fn is_well_formed(&self) -> bool {
        self.num_of_teams >= 2 && self.teams.len() == self.num_of_teams as usize
    }
}

/// Result of loading a session's stored partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredPartition {
    /// The session has never been locked.
    Absent,
    /// Stored JSON exists but could not be decoded or is degenerate.
    /// Treated as a recoverable condition, never a fatal error.
    Malformed,
    Locked(Partition),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format() {
        let partition = Partition {
            teams: vec![
                vec![Membership {
                    user_id: Some("u1".to_string()),
                    attendance_id: "a1".to_string(),
                }],
                vec![Membership {
                    user_id: None,
                    attendance_id: "a2".to_string(),
                }],
            ],
            num_of_teams: 2,
            locked_at: "2026-03-02T11:20:00+00:00".to_string(),
        };

        let json = serde_json::to_value(&partition).unwrap();
        assert_eq!(json["numOfTeams"], 2);
        assert_eq!(json["lockedAt"], "2026-03-02T11:20:00+00:00");
        assert_eq!(json["teams"][0][0]["userId"], "u1");
        assert_eq!(json["teams"][0][0]["attendanceId"], "a1");
        // userId is omitted entirely for guest attendances
        assert!(json["teams"][1][0].get("userId").is_none());
    }

    #[test]
    fn test_decodes_null_user_id() {
        let raw = r#"{"teams":[[{"userId":null,"attendanceId":"a9"}]],"numOfTeams":2,"lockedAt":"x"}"#;
        let partition: Partition = serde_json::from_str(raw).unwrap();
        assert_eq!(partition.teams[0][0].user_id, None);
        assert_eq!(partition.teams[0][0].identity(), "a9");
    }

    #[test]
    fn test_well_formed() {
        let good = Partition {
            teams: vec![vec![], vec![]],
            num_of_teams: 2,
            locked_at: String::new(),
        };
        assert!(good.is_well_formed());

        let mut bad = good.clone();
        bad.num_of_teams = 1;
        assert!(!bad.is_well_formed());

        let mut mismatched = good;
        mismatched.teams.pop();
        assert!(!mismatched.is_well_formed());
    }
}
