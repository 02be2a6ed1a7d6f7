//! Snake-draft partitioner.
//!
//! Attendees are grouped by skill tier, each tier is shuffled, and the tiers
//! are drafted from strongest to weakest in alternating (snake) order so no
//! team systematically receives the first pick.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::errors::AppError;
use crate::models::Attendee;

use super::tiering::{tier, TOP_TIER};

/// Maximum supported team count (bounded by the color labels).
pub const MAX_TEAM_COUNT: usize = 5;

/// Default team count for a given number of confirmed attendees, matching
/// the thresholds the frontend has always used.
pub fn default_team_count(attendee_count: usize) -> usize {
    if attendee_count > 28 {
        4
    } else if attendee_count >= 23 {
        3
    } else {
        2
    }
}

/// Group attendees by tier, shuffle within each tier, and concatenate from
/// tier 5 down to tier 1 into the draft order.
pub fn draft_order<R: Rng + ?Sized>(attendees: &[Attendee], rng: &mut R) -> Vec<Attendee> {
    let mut tiers: [Vec<Attendee>; TOP_TIER as usize] = Default::default();
    for attendee in attendees {
        let t = tier(attendee.skill_or_default());
        tiers[(TOP_TIER - t) as usize].push(attendee.clone());
    }

    let mut order = Vec::with_capacity(attendees.len());
    for group in tiers.iter_mut() {
        group.shuffle(rng);
        order.append(group);
    }
    order
}

/// Partition attendees into `team_count` skill-balanced teams.
///
/// Team sizes differ by at most one. Repeated calls reshuffle within tiers,
/// so the result is intentionally non-deterministic unless the caller seeds
/// the RNG.
pub fn snake_draft<R: Rng + ?Sized>(
    attendees: &[Attendee],
    team_count: usize,
    rng: &mut R,
) -> Result<Vec<Vec<Attendee>>, AppError> {
    if team_count < 2 {
        return Err(AppError::InvalidTeamCount(format!(
            "Team count must be at least 2, got {}",
            team_count
        )));
    }

    let mut teams: Vec<Vec<Attendee>> = vec![Vec::new(); team_count];
    for (player_index, attendee) in draft_order(attendees, rng).into_iter().enumerate() {
        let round = player_index / team_count;
        let position_in_round = player_index % team_count;
        let team_index = if round % 2 == 0 {
            position_in_round
        } else {
            team_count - 1 - position_in_round
        };
        teams[team_index].push(attendee);
    }

    Ok(teams)
}
