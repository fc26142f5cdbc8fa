//! Complaint lifecycle rules.
//!
//! Everything here is pure: who may change what, which status moves are
//! allowed, and what a requested change turns into (the updated complaint and
//! at most one status history entry). The transactional write lives in the
//! storage backend's service implementation.

pub mod authorization;
pub mod planner;
pub mod transition_policy;

pub use authorization::*;
pub use planner::*;
pub use transition_policy::*;
