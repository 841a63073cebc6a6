//! Render-side view of the core state: the reticle ring, the viewer camera,
//! image-based lighting, and on-screen annotation labels.
//!
//! Nothing here feeds back into the tick; these systems only mirror
//! resources and components the core plugin owns.

/// Environment cubemap applied to the viewer camera.
pub mod environment;

/// Absolutely positioned UI text for annotation overlays (native only).
pub mod overlay_labels;

/// Ring mesh that follows the reticle.
pub mod reticle_mesh;

/// Camera driven by the platform's viewer pose.
pub mod viewer_camera;

use bevy::prelude::*;

use crate::engine::core::tick::ArTickSet;

use environment::sync_environment_map;
use reticle_mesh::{spawn_reticle_mesh, sync_reticle_mesh};
use viewer_camera::{spawn_viewer_camera, sync_viewer_camera};

pub struct ArScenePlugin;

impl Plugin for ArScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (spawn_viewer_camera, spawn_reticle_mesh))
            .add_systems(
                Update,
                (sync_viewer_camera, sync_reticle_mesh, sync_environment_map)
                    .in_set(ArTickSet::Present),
            );

        // Web builds hand overlays to the DOM through RPC instead.
        #[cfg(not(target_arch = "wasm32"))]
        {
            app.add_systems(
                Update,
                overlay_labels::attach_overlay_labels.in_set(ArTickSet::Present),
            );
        }
    }
}
