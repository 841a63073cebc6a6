use std::time::Duration;

use bevy::prelude::*;

/// Transient label bound to one placed instance.
///
/// The screen position is computed once at placement; instances never move,
/// so it is not re-projected on later ticks.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct AnnotationOverlay {
    text: String,
    screen_position: Vec2,
    instance: Entity,
    expires_at: Duration,
}

impl AnnotationOverlay {
    pub fn new(
        text: String,
        screen_position: Vec2,
        instance: Entity,
        created_at: Duration,
        ttl: Duration,
    ) -> Self {
        Self {
            text,
            screen_position,
            instance,
            expires_at: created_at + ttl,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn screen_position(&self) -> Vec2 {
        self.screen_position
    }

    pub fn instance(&self) -> Entity {
        self.instance
    }

    pub fn expires_at(&self) -> Duration {
        self.expires_at
    }

    pub fn is_expired(&self, now: Duration) -> bool {
        now >= self.expires_at
    }
}

/// Overlay creation request handed to the UI layer.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct OverlayCreated {
    pub overlay: Entity,
    pub instance: Entity,
    pub text: String,
    pub position: Vec2,
    pub ttl: Duration,
}

pub fn spawn_annotation(commands: &mut Commands, overlay: AnnotationOverlay) -> Entity {
    commands
        .spawn((Name::new("AnnotationOverlay"), overlay))
        .id()
}

/// Remove overlays whose deadline has passed.
pub fn expire_overlays(
    mut commands: Commands,
    time: Res<Time>,
    overlays: Query<(Entity, &AnnotationOverlay)>,
) {
    let now = time.elapsed();
    for (entity, overlay) in &overlays {
        if overlay.is_expired(now) {
            debug!("Annotation for {:?} expired", overlay.instance());
            commands.entity(entity).despawn();
        }
    }
}
