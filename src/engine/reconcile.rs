//! Reconciler: rebuilds the live team view from a stored snapshot and the
//! current confirmed-attendee list.
//!
//! A locked snapshot must stay stable for everyone already placed, even as
//! attendance keeps fluctuating up to kickoff. Withdrawn attendees are
//! dropped silently and only the newcomers are distributed, round-robin,
//! without reshuffling anyone.

use std::collections::HashMap;

use rand::Rng;

use crate::errors::AppError;
use crate::models::{Attendee, Partition, StoredPartition};

use super::draft::snake_draft;

/// Split attendees into `team_count` teams in list order, sizes as even as
/// possible. Fallback used when a stored snapshot turns out to be unusable.
pub fn split_evenly(attendees: &[Attendee], team_count: usize) -> Vec<Vec<Attendee>> {
    let team_count = team_count.max(2);
    let mut teams: Vec<Vec<Attendee>> = vec![Vec::new(); team_count];
    for (i, attendee) in attendees.iter().enumerate() {
        teams[i % team_count].push(attendee.clone());
    }
    teams
}

/// Rebuild teams from a well-formed snapshot.
///
/// Membership records whose attendee withdrew are dropped; attendees not in
/// the snapshot are appended round-robin starting at team
/// `already_placed % team_count`, in arrival order.
fn rebuild_from_partition(attendees: &[Attendee], partition: &Partition) -> Vec<Vec<Attendee>> {
    let by_identity: HashMap<&str, &Attendee> =
        attendees.iter().map(|a| (a.identity(), a)).collect();

    let mut teams: Vec<Vec<Attendee>> = partition
        .teams
        .iter()
        .map(|team| {
            team.iter()
                .filter_map(|member| {
                    let found = by_identity.get(member.identity());
                    if found.is_none() {
                        tracing::warn!(
                            identity = member.identity(),
                            "Snapshot references a withdrawn attendee; dropping"
                        );
                    }
                    found.map(|a| (*a).clone())
                })
                .collect()
        })
        .collect();

    let placed: Vec<&str> = teams
        .iter()
        .flat_map(|team| team.iter().map(Attendee::identity))
        .collect();
    let new_attendees: Vec<&Attendee> = attendees
        .iter()
        .filter(|a| !placed.contains(&a.identity()))
        .collect();

    let team_count = teams.len();
    let mut next = placed.len();
    for attendee in new_attendees {
        teams[next % team_count].push(attendee.clone());
        next += 1;
    }

    teams
}

/// Produce the live team view for a session.
///
/// - No snapshot: a fresh snake draft (unlocked sessions re-randomize freely).
/// - Malformed snapshot: best-effort even split of the raw list, logged as a
///   recoverable warning.
/// - Locked snapshot: stable rebuild as described above.
pub fn reconcile<R: Rng + ?Sized>(
    attendees: &[Attendee],
    stored: &StoredPartition,
    team_count: usize,
    rng: &mut R,
) -> Result<Vec<Vec<Attendee>>, AppError> {
    match stored {
        StoredPartition::Absent => snake_draft(attendees, team_count, rng),
        StoredPartition::Malformed => {
            tracing::warn!("Stored partition is malformed; splitting attendees evenly");
            Ok(split_evenly(attendees, team_count))
        }
        StoredPartition::Locked(partition) => Ok(rebuild_from_partition(attendees, partition)),
    }
}
