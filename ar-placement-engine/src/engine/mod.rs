/// Furniture catalog, selection, and template preparation.
pub mod catalog;
pub mod core;
/// Static and estimated light switching.
pub mod lighting;
pub mod overlay;
/// Turning a select into a placed instance.
pub mod placement;
pub mod projection;
pub mod reticle;
pub mod scene;
/// Hit-test source lifecycle and per-frame sampling.
pub mod tracking;
