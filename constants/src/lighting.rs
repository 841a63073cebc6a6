use bevy::math::Vec3;

/// Position the static sky light shines from, towards the origin.
pub const STATIC_LIGHT_POSITION: Vec3 = Vec3::new(0.5, 1.0, 0.25);
pub const STATIC_LIGHT_COLOUR: [f32; 3] = [1.0, 1.0, 1.0];
pub const STATIC_LIGHT_ILLUMINANCE: f32 = 2_000.0;

/// Estimated light starts dark until the first estimate arrives.
pub const ESTIMATED_LIGHT_INITIAL_ILLUMINANCE: f32 = 0.0;
pub const ESTIMATED_LIGHT_INITIAL_DIRECTION: Vec3 = Vec3::new(0.0, -1.0, 0.0);

/// Intensity applied to estimated environment cubemaps.
pub const ENVIRONMENT_MAP_INTENSITY: f32 = 1_000.0;
