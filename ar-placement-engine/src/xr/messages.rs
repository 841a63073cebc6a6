use bevy::prelude::*;
use constants::session::{VIEWER_FAR, VIEWER_FOV_DEGREES, VIEWER_NEAR};

use crate::engine::lighting::EnvironmentMap;

/// Identity of one tracking session. Ids are never reused by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(pub u64);

/// Viewer-anchored reference space resolved for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReferenceSpaceId(pub u64);

/// Hit-test source bound to a viewer reference space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HitTestSourceId(pub u64);

/// Ranked hit poses reported for one source, nearest first.
#[derive(Debug, Clone, PartialEq)]
pub struct HitTestResults {
    pub source: HitTestSourceId,
    pub poses: Vec<Mat4>,
}

/// One tracked frame as delivered by the platform.
#[derive(Debug, Clone, PartialEq)]
pub struct XrFrame {
    pub session: SessionId,
    /// World to view transform of the device camera.
    pub view: Mat4,
    pub projection: Mat4,
    /// Viewport size in pixels.
    pub viewport: Vec2,
    pub hit_results: Vec<HitTestResults>,
}

impl XrFrame {
    /// Frame with the viewer at the origin and the default perspective.
    pub fn new(session: SessionId, viewport: Vec2) -> Self {
        let aspect = if viewport.y > 0.0 {
            viewport.x / viewport.y
        } else {
            1.0
        };
        Self {
            session,
            view: Mat4::IDENTITY,
            projection: Mat4::perspective_rh(
                VIEWER_FOV_DEGREES.to_radians(),
                aspect,
                VIEWER_NEAR,
                VIEWER_FAR,
            ),
            viewport,
            hit_results: Vec::new(),
        }
    }

    pub fn with_hit_results(mut self, source: HitTestSourceId, poses: Vec<Mat4>) -> Self {
        self.hit_results.push(HitTestResults { source, poses });
        self
    }

    /// Ranked poses for `source` in this frame, empty when it reported none.
    pub fn hit_test_results(&self, source: HitTestSourceId) -> &[Mat4] {
        self.hit_results
            .iter()
            .find(|results| results.source == source)
            .map(|results| results.poses.as_slice())
            .unwrap_or(&[])
    }
}

/// Latest light estimate sampled from the camera feed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightEstimate {
    /// Direction the light travels, in world space.
    pub direction: Vec3,
    /// Linear RGB.
    pub colour: [f32; 3],
    pub illuminance: f32,
}

/// Everything the host platform or UI can tell the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum XrMessage {
    SessionStarted {
        session: SessionId,
    },
    SessionEnded {
        session: SessionId,
    },
    ReferenceSpaceResolved {
        session: SessionId,
        space: ReferenceSpaceId,
    },
    HitTestSourceResolved {
        session: SessionId,
        source: HitTestSourceId,
    },
    Frame(XrFrame),
    EstimationStarted {
        environment: Option<EnvironmentMap>,
    },
    EstimationEnded,
    LightEstimate(LightEstimate),
    /// User trigger on the controller, places the selected item.
    Select,
    /// Catalog tile chosen in the UI.
    SelectItem {
        index: usize,
    },
}

/// Asynchronous work the engine asks the host platform to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XrRequest {
    RequestViewerReferenceSpace {
        session: SessionId,
    },
    RequestHitTestSource {
        session: SessionId,
        space: ReferenceSpaceId,
    },
}
