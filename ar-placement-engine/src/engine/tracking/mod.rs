//! Surface hit-test lifecycle for the current tracking session.
//!
//! ```text
//! Uninitialized ──tick──> Requesting ──space──> Requesting(space) ──source──> Active
//!        ^                     │                        │                       │
//!        └── SessionStarted ───┴──────── SessionEnded(same session) ────────────┴──> Ended
//! ```
//!
//! Completions and end signals carry the session they belong to and are
//! dropped when that session is no longer the tracked one.

/// Tracker state machine.
pub mod hit_test;

/// Systems feeding session messages into the tracker and issuing requests.
pub mod systems;

pub use hit_test::{HitTestTracker, TrackerState};
pub use systems::{apply_session_events, issue_tracker_requests};
