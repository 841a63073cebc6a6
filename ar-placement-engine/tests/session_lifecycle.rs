mod common;

use ar_placement_engine::engine::reticle::Reticle;
use ar_placement_engine::engine::tracking::{HitTestTracker, TrackerState};
use ar_placement_engine::xr::{SessionId, XrMessage, XrOutbox, XrRequest};
use bevy::prelude::*;
use common::{Harness, SESSION, SOURCE, SPACE, item};

#[test]
fn tracker_requests_space_then_source() {
    let mut harness = Harness::new(vec![item("ItemA", 1.0)]);
    harness.send(XrMessage::SessionStarted { session: SESSION });
    harness.tick();
    assert_eq!(
        harness.resource::<XrOutbox>().pending(),
        &[XrRequest::RequestViewerReferenceSpace { session: SESSION }]
    );

    harness.send(XrMessage::ReferenceSpaceResolved {
        session: SESSION,
        space: SPACE,
    });
    harness.tick();
    assert_eq!(
        harness.resource::<XrOutbox>().pending().last(),
        Some(&XrRequest::RequestHitTestSource {
            session: SESSION,
            space: SPACE
        })
    );

    harness.send(XrMessage::HitTestSourceResolved {
        session: SESSION,
        source: SOURCE,
    });
    harness.tick();
    assert_eq!(
        harness.resource::<HitTestTracker>().state(),
        TrackerState::Active { source: SOURCE }
    );
    assert_eq!(harness.resource::<XrOutbox>().pending().len(), 2);
}

#[test]
fn session_end_releases_source_and_hides_reticle() {
    let mut harness = Harness::new(vec![item("ItemA", 1.0)]);
    harness.start_tracking(SESSION);
    harness.send_frame(SESSION, vec![Mat4::from_translation(Vec3::NEG_Z)]);
    harness.tick();
    assert!(harness.resource::<Reticle>().visible());

    harness.send(XrMessage::SessionEnded { session: SESSION });
    harness.tick();

    let tracker = harness.resource::<HitTestTracker>();
    assert_eq!(tracker.state(), TrackerState::Ended);
    assert_eq!(tracker.source(), None);
    assert!(!harness.resource::<Reticle>().visible());

    // Late frames from the ended session produce nothing.
    harness.send_frame(SESSION, vec![Mat4::from_translation(Vec3::NEG_Z)]);
    harness.tick();
    assert!(!harness.resource::<Reticle>().visible());
}

#[test]
fn stale_end_signal_does_not_clear_newer_session() {
    let mut harness = Harness::new(vec![item("ItemA", 1.0)]);
    harness.start_tracking(SESSION);

    let newer = SessionId(2);
    harness.start_tracking(newer);
    harness.send(XrMessage::SessionEnded { session: SESSION });
    harness.tick();

    let tracker = harness.resource::<HitTestTracker>();
    assert_eq!(tracker.session(), Some(newer));
    assert_eq!(tracker.state(), TrackerState::Active { source: SOURCE });
}

#[test]
fn frames_from_another_session_are_not_sampled() {
    let mut harness = Harness::new(vec![item("ItemA", 1.0)]);
    harness.start_tracking(SESSION);
    harness.send_frame(SessionId(42), vec![Mat4::from_translation(Vec3::NEG_Z)]);
    harness.tick();

    assert!(!harness.resource::<Reticle>().visible());
}

#[test]
fn tick_without_frame_keeps_reticle() {
    let mut harness = Harness::new(vec![item("ItemA", 1.0)]);
    harness.start_tracking(SESSION);
    let pose = Mat4::from_translation(Vec3::new(0.3, -1.0, -1.5));
    harness.send_frame(SESSION, vec![pose]);
    harness.tick();
    harness.tick();

    let reticle = harness.resource::<Reticle>();
    assert!(reticle.visible());
    assert_eq!(reticle.transform(), pose);
}

#[test]
fn repeated_start_keeps_the_session_source() {
    let mut harness = Harness::new(vec![item("ItemA", 1.0)]);
    harness.start_tracking(SESSION);
    let requests_before = harness.resource::<XrOutbox>().pending().len();

    harness.send(XrMessage::SessionStarted { session: SESSION });
    harness.tick();
    harness.tick();

    assert_eq!(
        harness.resource::<HitTestTracker>().state(),
        TrackerState::Active { source: SOURCE }
    );
    assert_eq!(
        harness.resource::<XrOutbox>().pending().len(),
        requests_before
    );
}
