use bevy::asset::LoadState;
use bevy::gltf::GltfAssetLabel;
use bevy::prelude::*;
use constants::placement::TEMPLATE_SCENE_INDEX;

use super::state::PlacementCatalog;
use crate::xr::{XrEvent, XrMessage};

/// A template finished preparing and can fill its catalog slot.
#[derive(Event, Debug, Clone)]
pub struct TemplatePrepared {
    pub index: usize,
    pub template: Handle<Scene>,
}

/// Selection moved to a new catalog index.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionChanged {
    pub index: usize,
}

/// Scene loads still in flight, keyed by catalog index.
#[derive(Resource, Default)]
pub struct TemplateLoads {
    pending: Vec<(usize, Handle<Scene>)>,
}

/// Start one scene load per catalog item.
pub fn start_template_loads(catalog: &PlacementCatalog, asset_server: &AssetServer) -> TemplateLoads {
    let pending = catalog
        .items()
        .enumerate()
        .map(|(index, item)| {
            let handle = asset_server
                .load(GltfAssetLabel::Scene(TEMPLATE_SCENE_INDEX).from_asset(item.model.clone()));
            (index, handle)
        })
        .collect();
    TemplateLoads { pending }
}

/// Report templates whose scene and dependencies have loaded.
pub fn poll_template_loads(
    mut loads: ResMut<TemplateLoads>,
    asset_server: Res<AssetServer>,
    mut prepared: EventWriter<TemplatePrepared>,
) {
    if loads.pending.is_empty() {
        return;
    }

    loads.pending.retain(|(index, handle)| {
        if asset_server.is_loaded_with_dependencies(handle) {
            prepared.write(TemplatePrepared {
                index: *index,
                template: handle.clone(),
            });
            return false;
        }
        if let LoadState::Failed(error) = asset_server.load_state(handle) {
            // Slot stays pending; placement reports the item as not ready.
            warn!("Template for catalog item {} failed to load: {}", index, error);
            return false;
        }
        true
    });
}

/// Fill catalog slots and apply selection requests on the tick thread.
pub fn apply_catalog_events(
    mut prepared: EventReader<TemplatePrepared>,
    mut events: EventReader<XrEvent>,
    mut catalog: ResMut<PlacementCatalog>,
    mut selection_changed: EventWriter<SelectionChanged>,
) {
    for TemplatePrepared { index, template } in prepared.read() {
        match catalog.fill_template(*index, template.clone()) {
            Ok(()) => info!("Template ready for catalog item {}", index),
            Err(error) => warn!("Dropping prepared template: {}", error),
        }
    }

    for XrEvent(message) in events.read() {
        let XrMessage::SelectItem { index } = message else {
            continue;
        };
        match catalog.select(*index) {
            Ok(index) => {
                debug!("Catalog selection set to {}", index);
                selection_changed.write(SelectionChanged { index });
            }
            Err(error) => warn!("Rejected catalog selection: {}", error),
        }
    }
}
