use std::time::Duration;

use bevy::prelude::*;

use super::catalog::{PlacementCatalog, PlacementSettings, TemplateSlot};
use super::overlay::{AnnotationOverlay, OverlayCreated, spawn_annotation};
use super::projection::ViewerCamera;
use super::reticle::Reticle;
use crate::xr::{XrEvent, XrMessage};

/// Placed furniture. The transform is fixed at creation; the entity's
/// `Transform` is only a render copy of it.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct PlacedInstance {
    world_transform: Transform,
    item: usize,
    created_at: Duration,
}

impl PlacedInstance {
    pub fn world_transform(&self) -> Transform {
        self.world_transform
    }

    /// Catalog index the instance was placed from.
    pub fn item(&self) -> usize {
        self.item
    }

    pub fn created_at(&self) -> Duration {
        self.created_at
    }
}

/// What a placement trigger did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementOutcome {
    Placed { instance: Entity, item: usize },
    /// Reticle hidden: not aimed at a tracked surface.
    NoSurface,
    /// Selected item's template is still loading.
    TemplateNotReady { item: usize },
    CatalogEmpty,
}

impl PlacementOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Placed { .. } => "placed",
            Self::NoSurface => "no_surface",
            Self::TemplateNotReady { .. } => "template_not_ready",
            Self::CatalogEmpty => "catalog_empty",
        }
    }

    pub fn item(&self) -> Option<usize> {
        match self {
            Self::Placed { item, .. } | Self::TemplateNotReady { item } => Some(*item),
            Self::NoSurface | Self::CatalogEmpty => None,
        }
    }
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementResult(pub PlacementOutcome);

/// Position and rotation from the tracked pose; scale from the catalog.
pub fn placement_transform(pose: Mat4, uniform_scale: f32) -> Transform {
    let (_, rotation, translation) = pose.to_scale_rotation_translation();
    Transform {
        translation,
        rotation,
        scale: Vec3::splat(uniform_scale),
    }
}

/// Everything a placement reads, borrowed for one trigger.
pub struct PlacementContext<'a> {
    pub reticle: &'a Reticle,
    pub catalog: &'a PlacementCatalog,
    pub viewer: &'a ViewerCamera,
    pub settings: &'a PlacementSettings,
    pub now: Duration,
}

/// Instance the selected template at the reticle and attach its annotation.
pub fn place_selected(
    commands: &mut Commands,
    context: &PlacementContext<'_>,
) -> (PlacementOutcome, Option<OverlayCreated>) {
    if !context.reticle.visible() {
        return (PlacementOutcome::NoSurface, None);
    }

    let index = context.catalog.selected_index();
    let Some(item) = context.catalog.selected_item() else {
        return (PlacementOutcome::CatalogEmpty, None);
    };
    let TemplateSlot::Ready(template) = context.catalog.template(index) else {
        return (PlacementOutcome::TemplateNotReady { item: index }, None);
    };

    let transform = placement_transform(context.reticle.transform(), item.scale);
    let instance = commands
        .spawn((
            SceneRoot(template.clone()),
            transform,
            PlacedInstance {
                world_transform: transform,
                item: index,
                created_at: context.now,
            },
            Name::new(format!("{}_instance", item.info.name)),
        ))
        .id();

    let text = item.summary();
    let position = context.viewer.project(transform.translation);
    let ttl = context.settings.overlay_ttl;
    let overlay = spawn_annotation(
        commands,
        AnnotationOverlay::new(text.clone(), position, instance, context.now, ttl),
    );

    (
        PlacementOutcome::Placed {
            instance,
            item: index,
        },
        Some(OverlayCreated {
            overlay,
            instance,
            text,
            position,
            ttl,
        }),
    )
}

/// Run a placement for every select trigger received this tick.
pub fn handle_placement_triggers(
    mut events: EventReader<XrEvent>,
    mut commands: Commands,
    reticle: Res<Reticle>,
    catalog: Res<PlacementCatalog>,
    viewer: Res<ViewerCamera>,
    settings: Res<PlacementSettings>,
    time: Res<Time>,
    mut results: EventWriter<PlacementResult>,
    mut overlays: EventWriter<OverlayCreated>,
) {
    let context = PlacementContext {
        reticle: &reticle,
        catalog: &catalog,
        viewer: &viewer,
        settings: &settings,
        now: time.elapsed(),
    };

    for XrEvent(message) in events.read() {
        if !matches!(message, XrMessage::Select) {
            continue;
        }

        let (outcome, overlay) = place_selected(&mut commands, &context);
        match outcome {
            PlacementOutcome::Placed { instance, item } => {
                info!("Placed catalog item {} as {:?}", item, instance);
            }
            PlacementOutcome::TemplateNotReady { item } => {
                info!("Catalog item {} is still loading, nothing placed", item);
            }
            PlacementOutcome::NoSurface => debug!("Select ignored: no tracked surface"),
            PlacementOutcome::CatalogEmpty => warn!("Select ignored: catalog is empty"),
        }

        results.write(PlacementResult(outcome));
        if let Some(overlay) = overlay {
            overlays.write(overlay);
        }
    }
}
