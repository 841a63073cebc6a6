//! Bridge between the host tracking platform and the per-frame tick.
//!
//! The host (WebXR glue on wasm, a test harness on native) never touches
//! engine state directly. Everything it has to say arrives as an
//! [`XrMessage`] pushed into the shared [`XrInbox`]; everything the engine
//! needs from it leaves as an [`XrRequest`] queued on the [`XrOutbox`].
//!
//! ## Message Flow
//!
//! ```text
//! Host callbacks ──push──> XrInbox ──drain (Ingest)──> XrEvent / CurrentXrFrame
//!                                                          │
//!                                              session, lighting, catalog,
//!                                              tracking, placement systems
//!                                                          │
//! Host glue <──drain── XrOutbox <──────── tracker requests ┘
//! ```
//!
//! Completions may be produced on any execution context. They only become
//! visible at the start of the next tick, so no engine state is mutated
//! concurrently with a frame.

/// Inbox/outbox resources and the drain system.
pub mod bridge;

/// Identifiers, frame samples, and message/request types.
pub mod messages;

pub use bridge::{CurrentXrFrame, XrEvent, XrInbox, XrOutbox, drain_xr_inbox};
pub use messages::{
    HitTestResults, HitTestSourceId, LightEstimate, ReferenceSpaceId, SessionId, XrFrame,
    XrMessage, XrRequest,
};
