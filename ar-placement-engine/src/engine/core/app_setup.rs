use bevy::asset::AssetMetaCheck;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;

use crate::engine::catalog::{
    CatalogLoader, CatalogManifest, install_catalog_when_loaded, poll_template_loads,
    start_catalog_loading,
};
use crate::engine::core::app_state::AppState;
use crate::engine::core::tick::{ArCorePlugin, ArTickSet};
use crate::engine::core::window_config::create_window_config;
use crate::engine::scene::ArScenePlugin;
use crate::rpc::web_rpc::WebRpcPlugin;
use crate::xr::drain_xr_inbox;

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        .add_plugins(JsonAssetPlugin::<CatalogManifest>::new(&["json"]))
        .add_plugins(ArCorePlugin)
        .add_plugins(ArScenePlugin)
        .add_plugins(WebRpcPlugin)
        .init_resource::<CatalogLoader>()
        .add_systems(Startup, start_catalog_loading)
        .add_systems(
            Update,
            install_catalog_when_loaded.run_if(in_state(AppState::Loading)),
        )
        // Completions join the tick alongside host messages.
        .add_systems(
            Update,
            poll_template_loads
                .in_set(ArTickSet::Ingest)
                .after(drain_xr_inbox)
                .run_if(in_state(AppState::Running)),
        );

    app
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
