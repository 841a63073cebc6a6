use bevy::prelude::*;

use super::tracking::{HitTestTracker, TrackerState};
use crate::xr::CurrentXrFrame;

/// Placement cursor. Visibility follows the latest hit-test sample only.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct Reticle {
    visible: bool,
    transform: Mat4,
}

impl Default for Reticle {
    fn default() -> Self {
        Self {
            visible: false,
            transform: Mat4::IDENTITY,
        }
    }
}

impl Reticle {
    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn transform(&self) -> Mat4 {
        self.transform
    }

    /// Reduce one sample. A miss hides the cursor but keeps its last pose.
    pub fn apply_sample(&mut self, pose: Option<Mat4>) {
        match pose {
            Some(pose) => {
                self.visible = true;
                self.transform = pose;
            }
            None => self.visible = false,
        }
    }
}

/// Feed this tick's hit-test sample into the reticle.
pub fn update_reticle(
    tracker: Res<HitTestTracker>,
    frame: Res<CurrentXrFrame>,
    mut reticle: ResMut<Reticle>,
) {
    if !matches!(tracker.state(), TrackerState::Active { .. }) {
        // No source: tracking is unavailable and the cursor stays hidden.
        if reticle.visible {
            reticle.apply_sample(None);
        }
        return;
    }

    // No frame this tick means no sample; the reticle keeps its state.
    let Some(frame) = frame.0.as_ref() else {
        return;
    };
    reticle.apply_sample(tracker.sample(frame));
}
