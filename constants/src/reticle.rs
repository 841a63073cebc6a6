// Flat ring cursor, laid on the tracked surface.
pub const RETICLE_INNER_RADIUS: f32 = 0.15;
pub const RETICLE_OUTER_RADIUS: f32 = 0.2;
pub const RETICLE_SEGMENTS: u32 = 32;

/// Linear RGB of the ring material.
pub const RETICLE_COLOUR: [f32; 3] = [1.0, 1.0, 1.0];
