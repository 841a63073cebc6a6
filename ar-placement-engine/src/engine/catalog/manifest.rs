use std::time::Duration;

use bevy::prelude::*;
use constants::path::CATALOG_MANIFEST_PATH;
use constants::placement::DEFAULT_OVERLAY_TTL_SECS;
use serde::Deserialize;
use thiserror::Error;

use super::state::{CatalogItem, PlacementCatalog, PlacementSettings};
use super::templates::start_template_loads;
use crate::engine::core::app_state::AppState;

/// Catalog configuration as shipped next to the models.
#[derive(Asset, TypePath, Debug, Clone, Deserialize)]
pub struct CatalogManifest {
    #[serde(default)]
    pub overlay_ttl_secs: Option<f32>,
    pub items: Vec<CatalogItem>,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ManifestError {
    #[error("catalog manifest lists no items")]
    Empty,
    #[error("item {index} has invalid scale {scale}")]
    InvalidScale { index: usize, scale: f32 },
    #[error("overlay ttl {0} is not a positive number of seconds")]
    InvalidOverlayTtl(f32),
}

impl CatalogManifest {
    pub fn validate(&self) -> Result<(), ManifestError> {
        if self.items.is_empty() {
            return Err(ManifestError::Empty);
        }
        if let Some((index, item)) = self
            .items
            .iter()
            .enumerate()
            .find(|(_, item)| !item.scale.is_finite() || item.scale <= 0.0)
        {
            return Err(ManifestError::InvalidScale {
                index,
                scale: item.scale,
            });
        }
        if let Some(ttl) = self.overlay_ttl_secs {
            if ttl <= 0.0 || Duration::try_from_secs_f32(ttl).is_err() {
                return Err(ManifestError::InvalidOverlayTtl(ttl));
            }
        }
        Ok(())
    }

    pub fn settings(&self) -> PlacementSettings {
        PlacementSettings {
            overlay_ttl: self
                .overlay_ttl_secs
                .and_then(|secs| Duration::try_from_secs_f32(secs).ok())
                .unwrap_or(Duration::from_secs_f32(DEFAULT_OVERLAY_TTL_SECS)),
        }
    }
}

#[derive(Resource, Default)]
pub struct CatalogLoader {
    handle: Option<Handle<CatalogManifest>>,
}

// Start the loading process
pub fn start_catalog_loading(mut loader: ResMut<CatalogLoader>, asset_server: Res<AssetServer>) {
    info!("Loading catalog manifest from {}", CATALOG_MANIFEST_PATH);
    loader.handle = Some(asset_server.load(CATALOG_MANIFEST_PATH));
}

/// Install the catalog once its manifest is available, then start preparing templates.
pub fn install_catalog_when_loaded(
    loader: Res<CatalogLoader>,
    manifests: Res<Assets<CatalogManifest>>,
    asset_server: Res<AssetServer>,
    mut commands: Commands,
    mut next_state: ResMut<NextState<AppState>>,
) {
    let Some(manifest) = loader.handle.as_ref().and_then(|h| manifests.get(h)) else {
        return;
    };

    if let Err(error) = manifest.validate() {
        error!("Rejecting catalog manifest: {}", error);
        next_state.set(AppState::CatalogRejected);
        return;
    }

    let catalog = PlacementCatalog::new(manifest.items.clone());
    info!("✓ Catalog installed with {} items", catalog.len());

    commands.insert_resource(start_template_loads(&catalog, &asset_server));
    commands.insert_resource(catalog);
    commands.insert_resource(manifest.settings());
    next_state.set(AppState::Running);
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"{
        "overlay_ttl_secs": 3.5,
        "items": [
            { "model": "./armchair.glb", "scale": 0.01,
              "info": { "name": "Kursi Santai", "price": "Rp 1.500.000", "material": "Kayu dan Kain" } },
            { "model": "./marble_coffee_table.glb", "scale": 0.01,
              "info": { "name": "Meja Kopi Marmer", "price": "Rp 3.500.000", "material": "Marmer dan Logam" } }
        ]
    }"#;

    #[test]
    fn parses_items_and_ttl() {
        let manifest: CatalogManifest = serde_json::from_str(MANIFEST).unwrap();
        assert_eq!(manifest.validate(), Ok(()));
        assert_eq!(manifest.items.len(), 2);
        assert_eq!(manifest.items[1].info.name, "Meja Kopi Marmer");
        assert_eq!(manifest.settings().overlay_ttl, Duration::from_secs_f32(3.5));
    }

    #[test]
    fn ttl_defaults_when_omitted() {
        let manifest: CatalogManifest = serde_json::from_str(
            r#"{ "items": [ { "model": "a.glb", "scale": 1.0,
                 "info": { "name": "A", "price": "1", "material": "m" } } ] }"#,
        )
        .unwrap();
        assert_eq!(
            manifest.settings().overlay_ttl,
            Duration::from_secs_f32(DEFAULT_OVERLAY_TTL_SECS)
        );
    }

    #[test]
    fn rejects_empty_and_non_positive_scale() {
        let mut manifest: CatalogManifest = serde_json::from_str(MANIFEST).unwrap();
        manifest.items[1].scale = 0.0;
        assert_eq!(
            manifest.validate(),
            Err(ManifestError::InvalidScale {
                index: 1,
                scale: 0.0
            })
        );

        manifest.items.clear();
        assert_eq!(manifest.validate(), Err(ManifestError::Empty));
    }

    #[test]
    fn rejects_negative_ttl() {
        let mut manifest: CatalogManifest = serde_json::from_str(MANIFEST).unwrap();
        manifest.overlay_ttl_secs = Some(-1.0);
        assert_eq!(
            manifest.validate(),
            Err(ManifestError::InvalidOverlayTtl(-1.0))
        );
    }

    #[test]
    fn rejects_ttl_too_large_for_a_duration() {
        let mut manifest: CatalogManifest = serde_json::from_str(MANIFEST).unwrap();
        manifest.overlay_ttl_secs = Some(1e20);
        assert_eq!(
            manifest.validate(),
            Err(ManifestError::InvalidOverlayTtl(1e20))
        );

        manifest.overlay_ttl_secs = Some(f32::NAN);
        assert!(matches!(
            manifest.validate(),
            Err(ManifestError::InvalidOverlayTtl(_))
        ));
    }
}
