/// Features the host must grant before a tracking session can start.
pub const REQUIRED_FEATURES: &[&str] = &["hit-test"];
pub const OPTIONAL_FEATURES: &[&str] = &["dom-overlay", "light-estimation"];
pub const DOM_OVERLAY_ROOT: &str = "body";

// Viewer camera used until the platform reports its own projection.
pub const VIEWER_FOV_DEGREES: f32 = 70.0;
pub const VIEWER_NEAR: f32 = 0.01;
pub const VIEWER_FAR: f32 = 20.0;
pub const VIEWER_DEFAULT_VIEWPORT: [f32; 2] = [800.0, 600.0];
