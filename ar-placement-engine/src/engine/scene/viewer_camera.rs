use bevy::prelude::*;
use constants::session::{VIEWER_FAR, VIEWER_FOV_DEGREES, VIEWER_NEAR};

use crate::engine::projection::ViewerCamera;

pub fn spawn_viewer_camera(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Camera {
            // Passthrough shows through the transparent canvas.
            clear_color: ClearColorConfig::Custom(Color::NONE),
            ..default()
        },
        Projection::Perspective(PerspectiveProjection {
            fov: VIEWER_FOV_DEGREES.to_radians(),
            near: VIEWER_NEAR,
            far: VIEWER_FAR,
            ..default()
        }),
        Transform::IDENTITY,
        Name::new("ViewerCamera"),
    ));
}

/// Place the render camera at the tracked viewer pose.
pub fn sync_viewer_camera(
    viewer: Res<ViewerCamera>,
    mut cameras: Query<&mut Transform, With<Camera3d>>,
) {
    if !viewer.is_changed() {
        return;
    }
    for mut transform in &mut cameras {
        *transform = Transform::from_matrix(viewer.view.inverse());
    }
}
