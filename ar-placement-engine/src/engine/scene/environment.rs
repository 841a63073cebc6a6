use bevy::prelude::*;

use crate::engine::lighting::SceneEnvironment;

pub fn sync_environment_map(
    environment: Res<SceneEnvironment>,
    cameras: Query<Entity, With<Camera3d>>,
    mut commands: Commands,
) {
    if !environment.is_changed() {
        return;
    }

    for camera in &cameras {
        match &environment.map {
            Some(map) => {
                commands.entity(camera).insert(EnvironmentMapLight {
                    diffuse_map: map.diffuse.clone(),
                    specular_map: map.specular.clone(),
                    intensity: map.intensity,
                    ..default()
                });
            }
            None => {
                commands.entity(camera).remove::<EnvironmentMapLight>();
            }
        }
    }
}
