//! Team formation and balancing engine.
//!
//! Pure, synchronous transformations over small in-memory attendee lists:
//! skill tiering, the snake-draft partitioner, snapshot reconciliation and
//! the manual override handler. Persistence lives in `db`, not here.

mod draft;
mod moves;
mod reconcile;
mod tiering;

pub use draft::{default_team_count, snake_draft, MAX_TEAM_COUNT};
pub use moves::move_attendee;
pub use reconcile::reconcile;
pub use tiering::tier;
