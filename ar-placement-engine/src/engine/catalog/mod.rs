//! Placeable furniture definitions and their render templates.
//!
//! The item list comes from a JSON manifest and never changes once
//! installed. Each item owns a template slot that starts `Pending` and is
//! filled when its glTF scene finishes loading, independently of what the
//! user has selected or placed. Selection is a validated index into the list.
//!
//! ## Loading Flow
//!
//! ```text
//! CatalogManifest (JSON asset)
//!   └─> validated, installed as PlacementCatalog + PlacementSettings
//!         └─> one scene load per item (TemplateLoads)
//!               └─> TemplatePrepared event ──> slot becomes Ready
//! ```

/// Manifest asset, validation, and installation systems.
pub mod manifest;

/// Catalog resource, items, and template slots.
pub mod state;

/// Template preparation and the tick-side slot updates.
pub mod templates;

pub use manifest::{
    CatalogLoader, CatalogManifest, ManifestError, install_catalog_when_loaded, start_catalog_loading,
};
pub use state::{
    CatalogError, CatalogItem, ItemInfo, PlacementCatalog, PlacementSettings, TemplateSlot,
};
pub use templates::{
    SelectionChanged, TemplateLoads, TemplatePrepared, apply_catalog_events, poll_template_loads,
};
