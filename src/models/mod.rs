//! Data models for the matchday backend.
//!
//! Wire shapes match the frontend contract exactly, including the persisted
//! partition format.

mod attendee;
mod partition;
mod session;

pub use attendee::*;
pub use partition::*;
pub use session::*;
