use bevy::prelude::*;

use crate::engine::catalog::{
    PlacementCatalog, PlacementSettings, SelectionChanged, TemplateLoads, TemplatePrepared,
    apply_catalog_events,
};
use crate::engine::lighting::{
    LightingAdapter, LightingChanged, SceneEnvironment, apply_lighting_events, spawn_light_rig,
};
use crate::engine::overlay::{OverlayCreated, expire_overlays};
use crate::engine::placement::{PlacementResult, handle_placement_triggers};
use crate::engine::projection::{ViewerCamera, update_viewer_camera};
use crate::engine::reticle::{Reticle, update_reticle};
use crate::engine::tracking::{HitTestTracker, apply_session_events, issue_tracker_requests};
use crate::xr::{CurrentXrFrame, XrEvent, XrInbox, XrOutbox, drain_xr_inbox};

/// Phases of one frame tick, run in this order inside `Update`.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArTickSet {
    /// Host messages and completions are merged onto the tick thread.
    Ingest,
    /// Session, lighting, and catalog state updated from those messages.
    Apply,
    /// Hit-test requests, sampling, and the reticle.
    Track,
    /// User placement triggers.
    Place,
    /// Overlay expiry and outward notifications.
    Present,
}

/// Tracking, placement, and lighting state machine without any rendering.
pub struct ArCorePlugin;

impl Plugin for ArCorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<XrInbox>()
            .init_resource::<XrOutbox>()
            .init_resource::<CurrentXrFrame>()
            .init_resource::<HitTestTracker>()
            .init_resource::<Reticle>()
            .init_resource::<PlacementCatalog>()
            .init_resource::<PlacementSettings>()
            .init_resource::<TemplateLoads>()
            .init_resource::<ViewerCamera>()
            .init_resource::<LightingAdapter>()
            .init_resource::<SceneEnvironment>()
            .add_event::<XrEvent>()
            .add_event::<TemplatePrepared>()
            .add_event::<SelectionChanged>()
            .add_event::<PlacementResult>()
            .add_event::<OverlayCreated>()
            .add_event::<LightingChanged>()
            .configure_sets(
                Update,
                (
                    ArTickSet::Ingest,
                    ArTickSet::Apply,
                    ArTickSet::Track,
                    ArTickSet::Place,
                    ArTickSet::Present,
                )
                    .chain(),
            )
            .add_systems(Startup, spawn_light_rig)
            .add_systems(
                Update,
                (
                    drain_xr_inbox.in_set(ArTickSet::Ingest),
                    (
                        apply_session_events,
                        apply_lighting_events,
                        apply_catalog_events,
                    )
                        .chain()
                        .in_set(ArTickSet::Apply),
                    (issue_tracker_requests, update_viewer_camera, update_reticle)
                        .chain()
                        .in_set(ArTickSet::Track),
                    handle_placement_triggers.in_set(ArTickSet::Place),
                    expire_overlays.in_set(ArTickSet::Present),
                ),
            );
    }
}
