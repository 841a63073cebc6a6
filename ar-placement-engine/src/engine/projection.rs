use bevy::prelude::*;
use constants::session::VIEWER_DEFAULT_VIEWPORT;

use crate::xr::{CurrentXrFrame, SessionId, XrFrame};

/// Project a world-space point to pixel coordinates, origin top-left.
///
/// No clamping or culling: points outside the frustum still map to a
/// (possibly off-screen) coordinate.
pub fn project_to_screen(
    world_position: Vec3,
    view: Mat4,
    projection: Mat4,
    viewport_width: f32,
    viewport_height: f32,
) -> Vec2 {
    let ndc = projection.project_point3(view.transform_point3(world_position));
    let half_width = viewport_width * 0.5;
    let half_height = viewport_height * 0.5;
    Vec2::new(
        ndc.x * half_width + half_width,
        -ndc.y * half_height + half_height,
    )
}

/// Most recent viewer pose reported by the platform.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct ViewerCamera {
    pub view: Mat4,
    pub projection: Mat4,
    pub viewport: Vec2,
}

impl Default for ViewerCamera {
    fn default() -> Self {
        let viewport = Vec2::from_array(VIEWER_DEFAULT_VIEWPORT);
        Self::from_frame(&XrFrame::new(SessionId(0), viewport))
    }
}

impl ViewerCamera {
    pub fn from_frame(frame: &XrFrame) -> Self {
        Self {
            view: frame.view,
            projection: frame.projection,
            viewport: frame.viewport,
        }
    }

    pub fn project(&self, world_position: Vec3) -> Vec2 {
        project_to_screen(
            world_position,
            self.view,
            self.projection,
            self.viewport.x,
            self.viewport.y,
        )
    }
}

pub fn update_viewer_camera(frame: Res<CurrentXrFrame>, mut viewer: ResMut<ViewerCamera>) {
    if let Some(frame) = frame.0.as_ref() {
        *viewer = ViewerCamera::from_frame(frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-3;

    #[test]
    fn point_ahead_of_camera_lands_in_viewport_centre() {
        // At depth 2 this perspective maps one world unit to one NDC unit in X and Y.
        let fov = 2.0 * (0.5_f32).atan();
        let projection = Mat4::perspective_rh(fov, 1.0, 0.01, 20.0);

        let pixel = project_to_screen(
            Vec3::new(0.0, 0.0, -2.0),
            Mat4::IDENTITY,
            projection,
            800.0,
            600.0,
        );
        assert!((pixel - Vec2::new(400.0, 300.0)).length() < EPSILON, "{pixel}");
    }

    #[test]
    fn up_right_maps_to_top_right_quadrant() {
        let fov = 2.0 * (0.5_f32).atan();
        let projection = Mat4::perspective_rh(fov, 1.0, 0.01, 20.0);

        let pixel = project_to_screen(
            Vec3::new(0.5, 0.5, -2.0),
            Mat4::IDENTITY,
            projection,
            800.0,
            600.0,
        );
        assert!((pixel - Vec2::new(600.0, 150.0)).length() < EPSILON, "{pixel}");
    }

    #[test]
    fn points_outside_frustum_are_not_clamped() {
        let pixel = project_to_screen(
            Vec3::new(3.0, -2.0, 0.0),
            Mat4::IDENTITY,
            Mat4::IDENTITY,
            800.0,
            600.0,
        );
        assert!((pixel - Vec2::new(1600.0, 900.0)).length() < EPSILON, "{pixel}");
    }

    #[test]
    fn view_matrix_moves_the_camera() {
        // Camera sits one unit to the right, so a point at the origin appears left of centre.
        let view = Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0)).inverse();
        let pixel = project_to_screen(
            Vec3::new(0.0, 0.0, 0.0),
            view,
            Mat4::IDENTITY,
            800.0,
            600.0,
        );
        assert!((pixel - Vec2::new(0.0, 300.0)).length() < EPSILON, "{pixel}");
    }
}
