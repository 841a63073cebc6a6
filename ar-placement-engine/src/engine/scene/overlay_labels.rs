use bevy::prelude::*;

use crate::engine::overlay::AnnotationOverlay;

/// Give new overlays an on-screen label; it despawns with the overlay.
pub fn attach_overlay_labels(
    mut commands: Commands,
    overlays: Query<(Entity, &AnnotationOverlay), Added<AnnotationOverlay>>,
) {
    for (entity, overlay) in &overlays {
        let position = overlay.screen_position();
        commands.entity(entity).insert((
            Text::new(overlay.text()),
            TextFont {
                font_size: 16.0,
                ..default()
            },
            TextColor(Color::WHITE),
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(position.x),
                top: Val::Px(position.y),
                padding: UiRect::all(Val::Px(8.0)),
                ..default()
            },
        ));
    }
}
