//! Shared tuning values for the AR placement engine.

pub mod lighting;
pub mod path;
pub mod placement;
pub mod reticle;
pub mod session;
