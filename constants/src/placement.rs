/// Lifetime of the annotation label shown next to a freshly placed item.
pub const DEFAULT_OVERLAY_TTL_SECS: f32 = 5.0;

/// Glb scene index instanced for every catalog item.
pub const TEMPLATE_SCENE_INDEX: usize = 0;

/// Catalog selected before the UI picks anything.
pub const DEFAULT_SELECTED_INDEX: usize = 0;
