use bevy::prelude::*;

use super::hit_test::HitTestTracker;
use crate::xr::{XrEvent, XrMessage, XrOutbox};

/// Apply session lifecycle messages and resolution completions in arrival order.
pub fn apply_session_events(
    mut events: EventReader<XrEvent>,
    mut tracker: ResMut<HitTestTracker>,
    mut outbox: ResMut<XrOutbox>,
) {
    for XrEvent(message) in events.read() {
        match message {
            XrMessage::SessionStarted { session } => {
                info!("Tracking session {:?} started", session);
                tracker.begin_session(*session);
            }
            XrMessage::SessionEnded { session } => {
                if tracker.end_session(*session) {
                    info!("Tracking session {:?} ended, hit-test source released", session);
                }
            }
            XrMessage::ReferenceSpaceResolved { session, space } => {
                if let Some(request) = tracker.on_reference_space(*session, *space) {
                    debug!("Viewer space {:?} resolved for {:?}", space, session);
                    outbox.queue(request);
                }
            }
            XrMessage::HitTestSourceResolved { session, source } => {
                if tracker.on_hit_test_source(*session, *source) {
                    info!("Hit-test source {:?} active for {:?}", source, session);
                }
            }
            _ => {}
        }
    }
}

/// Kick off the viewer space request on the first tick of a session.
pub fn issue_tracker_requests(mut tracker: ResMut<HitTestTracker>, mut outbox: ResMut<XrOutbox>) {
    if let Some(request) = tracker.poll_request() {
        debug!("Requesting viewer reference space: {:?}", request);
        outbox.queue(request);
    }
}
