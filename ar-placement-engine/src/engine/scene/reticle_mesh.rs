use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;
use constants::reticle::{
    RETICLE_COLOUR, RETICLE_INNER_RADIUS, RETICLE_OUTER_RADIUS, RETICLE_SEGMENTS,
};

use crate::engine::reticle::Reticle;

#[derive(Component)]
pub struct ReticleMesh;

pub fn spawn_reticle_mesh(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // Annulus is built in the XY plane; lay it flat on the surface.
    let ring = Mesh::from(
        Annulus::new(RETICLE_INNER_RADIUS, RETICLE_OUTER_RADIUS)
            .mesh()
            .resolution(RETICLE_SEGMENTS),
    )
    .rotated_by(Quat::from_rotation_x(-FRAC_PI_2));

    commands.spawn((
        Mesh3d(meshes.add(ring)),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::linear_rgb(RETICLE_COLOUR[0], RETICLE_COLOUR[1], RETICLE_COLOUR[2]),
            unlit: true,
            cull_mode: None,
            ..default()
        })),
        Transform::IDENTITY,
        Visibility::Hidden,
        ReticleMesh,
        Name::new("Reticle"),
    ));
}

pub fn sync_reticle_mesh(
    reticle: Res<Reticle>,
    mut query: Query<(&mut Transform, &mut Visibility), With<ReticleMesh>>,
) {
    if !reticle.is_changed() {
        return;
    }
    let Ok((mut transform, mut visibility)) = query.single_mut() else {
        return;
    };

    *visibility = if reticle.visible() {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };
    if reticle.visible() {
        *transform = Transform::from_matrix(reticle.transform());
    }
}
