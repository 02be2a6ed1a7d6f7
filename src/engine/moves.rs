//! Manual override handler: a single admin-directed move of one attendee.

use crate::errors::AppError;
use crate::models::Attendee;

/// Move `attendee_id` to `target_team_index`, inserting before
/// `target_position_id` when given, else appending.
///
/// Same-team reordering and cross-team moves share the remove/insert path.
/// Validation failures leave the view untouched; the caller only commits the
/// returned teams.
pub fn move_attendee(
    mut teams: Vec<Vec<Attendee>>,
    attendee_id: &str,
    target_team_index: usize,
    target_position_id: Option<&str>,
) -> Result<Vec<Vec<Attendee>>, AppError> {
    if target_team_index >= teams.len() {
        return Err(AppError::InvalidTeamIndex(format!(
            "Team index {} out of range for {} teams",
            target_team_index,
            teams.len()
        )));
    }

    let located = teams.iter().enumerate().find_map(|(team_index, team)| {
        team.iter()
            .position(|a| a.matches(attendee_id))
            .map(|pos| (team_index, pos))
    });
    let Some((source_team, source_pos)) = located else {
        return Err(AppError::AttendeeNotInPartition(format!(
            "Attendee {} is not in any team",
            attendee_id
        )));
    };

    let moved = teams[source_team].remove(source_pos);

    // Position is resolved after removal so same-team reorders land where
    // the target attendee currently sits.
    let target = &mut teams[target_team_index];
    let insert_at = target_position_id
        .and_then(|id| target.iter().position(|a| a.matches(id)))
        .unwrap_or(target.len());
    target.insert(insert_at, moved);

    Ok(teams)
}
