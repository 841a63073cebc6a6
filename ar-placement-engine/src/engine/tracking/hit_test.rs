use bevy::prelude::*;

use crate::xr::{HitTestSourceId, ReferenceSpaceId, SessionId, XrFrame, XrRequest};

/// Lifecycle of the hit-test query for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackerState {
    #[default]
    Uninitialized,
    /// Waiting on the viewer space, then on the source bound to it.
    Requesting { space: Option<ReferenceSpaceId> },
    Active { source: HitTestSourceId },
    Ended,
}

/// Owns at most one hit-test source, scoped to the tracked session.
#[derive(Resource, Debug, Default)]
pub struct HitTestTracker {
    session: Option<SessionId>,
    state: TrackerState,
}

impl HitTestTracker {
    pub fn session(&self) -> Option<SessionId> {
        self.session
    }

    pub fn state(&self) -> TrackerState {
        self.state
    }

    pub fn source(&self) -> Option<HitTestSourceId> {
        match self.state {
            TrackerState::Active { source } => Some(source),
            _ => None,
        }
    }

    /// Start tracking `session`, discarding whatever an older session held.
    /// A repeated start for the tracked session keeps its source.
    pub fn begin_session(&mut self, session: SessionId) {
        match self.session {
            Some(current) if current == session => {
                debug!("Ignoring repeated start for session {:?}", session);
                return;
            }
            Some(previous) => {
                info!("Tracking session {:?} replaced by {:?}", previous, session);
            }
            None => {}
        }
        self.session = Some(session);
        self.state = TrackerState::Uninitialized;
    }

    /// Handle an end signal. Returns true only on the transition into `Ended`.
    pub fn end_session(&mut self, session: SessionId) -> bool {
        if self.session != Some(session) {
            debug!("Ignoring end signal from stale session {:?}", session);
            return false;
        }
        if self.state == TrackerState::Ended {
            return false;
        }
        self.state = TrackerState::Ended;
        true
    }

    /// First tick of a session: ask for the viewer reference space.
    pub fn poll_request(&mut self) -> Option<XrRequest> {
        let session = self.session?;
        if self.state != TrackerState::Uninitialized {
            return None;
        }
        self.state = TrackerState::Requesting { space: None };
        Some(XrRequest::RequestViewerReferenceSpace { session })
    }

    /// Viewer space resolved: request a hit-test source bound to it.
    pub fn on_reference_space(
        &mut self,
        session: SessionId,
        space: ReferenceSpaceId,
    ) -> Option<XrRequest> {
        if self.session != Some(session) || self.state != (TrackerState::Requesting { space: None })
        {
            debug!("Discarding stale reference space for {:?}", session);
            return None;
        }
        self.state = TrackerState::Requesting { space: Some(space) };
        Some(XrRequest::RequestHitTestSource { session, space })
    }

    /// Hit-test source resolved. Returns true when the tracker became active.
    pub fn on_hit_test_source(&mut self, session: SessionId, source: HitTestSourceId) -> bool {
        let awaiting_source = matches!(self.state, TrackerState::Requesting { space: Some(_) });
        if self.session != Some(session) || !awaiting_source {
            debug!("Discarding stale hit-test source for {:?}", session);
            return false;
        }
        self.state = TrackerState::Active { source };
        true
    }

    /// Nearest hit in `frame`, as ranked by the platform.
    pub fn sample(&self, frame: &XrFrame) -> Option<Mat4> {
        let source = self.source()?;
        if self.session != Some(frame.session) {
            return None;
        }
        frame.hit_test_results(source).first().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SESSION: SessionId = SessionId(1);
    const SPACE: ReferenceSpaceId = ReferenceSpaceId(10);
    const SOURCE: HitTestSourceId = HitTestSourceId(20);

    fn active_tracker() -> HitTestTracker {
        let mut tracker = HitTestTracker::default();
        tracker.begin_session(SESSION);
        tracker.poll_request();
        tracker.on_reference_space(SESSION, SPACE);
        assert!(tracker.on_hit_test_source(SESSION, SOURCE));
        tracker
    }

    fn frame_with_hits(session: SessionId, poses: Vec<Mat4>) -> XrFrame {
        XrFrame::new(session, Vec2::new(800.0, 600.0)).with_hit_results(SOURCE, poses)
    }

    #[test]
    fn requests_space_then_source_once() {
        let mut tracker = HitTestTracker::default();
        assert_eq!(tracker.poll_request(), None);

        tracker.begin_session(SESSION);
        assert_eq!(
            tracker.poll_request(),
            Some(XrRequest::RequestViewerReferenceSpace { session: SESSION })
        );
        assert_eq!(tracker.poll_request(), None);
        assert_eq!(
            tracker.on_reference_space(SESSION, SPACE),
            Some(XrRequest::RequestHitTestSource {
                session: SESSION,
                space: SPACE
            })
        );
        assert!(tracker.on_hit_test_source(SESSION, SOURCE));
        assert_eq!(tracker.state(), TrackerState::Active { source: SOURCE });
    }

    #[test]
    fn reports_nothing_while_requesting() {
        let mut tracker = HitTestTracker::default();
        tracker.begin_session(SESSION);
        tracker.poll_request();

        let frame = frame_with_hits(SESSION, vec![Mat4::IDENTITY]);
        assert_eq!(tracker.sample(&frame), None);
    }

    #[test]
    fn samples_first_ranked_result() {
        let tracker = active_tracker();
        let nearest = Mat4::from_translation(Vec3::new(0.2, 0.0, -1.0));
        let farther = Mat4::from_translation(Vec3::new(0.2, 0.0, -3.0));

        let frame = frame_with_hits(SESSION, vec![nearest, farther]);
        assert_eq!(tracker.sample(&frame), Some(nearest));
        assert_eq!(tracker.sample(&frame_with_hits(SESSION, Vec::new())), None);
    }

    #[test]
    fn end_is_idempotent_and_discards_source() {
        let mut tracker = active_tracker();

        assert!(tracker.end_session(SESSION));
        assert!(!tracker.end_session(SESSION));
        assert_eq!(tracker.state(), TrackerState::Ended);
        assert_eq!(tracker.source(), None);
        assert_eq!(tracker.sample(&frame_with_hits(SESSION, vec![Mat4::IDENTITY])), None);
    }

    #[test]
    fn stale_end_signal_cannot_clear_newer_session() {
        let mut tracker = active_tracker();
        let newer = SessionId(2);
        tracker.begin_session(newer);
        tracker.poll_request();
        tracker.on_reference_space(newer, SPACE);
        tracker.on_hit_test_source(newer, HitTestSourceId(21));

        assert!(!tracker.end_session(SESSION));
        assert_eq!(
            tracker.state(),
            TrackerState::Active {
                source: HitTestSourceId(21)
            }
        );
    }

    #[test]
    fn completions_after_end_are_discarded() {
        let mut tracker = HitTestTracker::default();
        tracker.begin_session(SESSION);
        tracker.poll_request();
        tracker.end_session(SESSION);

        assert_eq!(tracker.on_reference_space(SESSION, SPACE), None);
        assert!(!tracker.on_hit_test_source(SESSION, SOURCE));
        assert_eq!(tracker.state(), TrackerState::Ended);
    }

    #[test]
    fn completions_for_older_session_are_discarded() {
        let mut tracker = HitTestTracker::default();
        tracker.begin_session(SESSION);
        tracker.poll_request();
        tracker.on_reference_space(SESSION, SPACE);

        tracker.begin_session(SessionId(2));
        assert!(!tracker.on_hit_test_source(SESSION, SOURCE));
        assert_eq!(tracker.state(), TrackerState::Uninitialized);
    }

    #[test]
    fn ignores_frames_from_other_sessions() {
        let tracker = active_tracker();
        let frame = frame_with_hits(SessionId(9), vec![Mat4::IDENTITY]);
        assert_eq!(tracker.sample(&frame), None);
    }

    #[test]
    fn repeated_start_keeps_active_source() {
        let mut tracker = active_tracker();
        tracker.begin_session(SESSION);

        assert_eq!(tracker.state(), TrackerState::Active { source: SOURCE });
        assert_eq!(tracker.poll_request(), None);
    }
}
