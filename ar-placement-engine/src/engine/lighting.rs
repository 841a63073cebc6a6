//! Ambient light switching between the static default and the platform's
//! estimated light.
//!
//! | From        | Signal               | Light change             | Environment                         |
//! |-------------|----------------------|--------------------------|-------------------------------------|
//! | `Static`    | estimation started   | static off, estimated on | snapshot current, adopt map if any  |
//! | `Estimated` | estimation ended     | estimated off, static on | restore snapshot if one was taken   |
//! | same mode   | repeated signal      | none                     | none                                |
//!
//! Both light entities live for the whole app so the static light coming
//! back is the same entity that left.

use bevy::prelude::*;
use constants::lighting::{
    ESTIMATED_LIGHT_INITIAL_DIRECTION, ESTIMATED_LIGHT_INITIAL_ILLUMINANCE,
    STATIC_LIGHT_COLOUR, STATIC_LIGHT_ILLUMINANCE, STATIC_LIGHT_POSITION,
};

use crate::xr::{LightEstimate, XrEvent, XrMessage};

/// Environment cubemap supplied by light estimation.
#[derive(Debug, Clone, PartialEq)]
pub struct EnvironmentMap {
    pub diffuse: Handle<Image>,
    pub specular: Handle<Image>,
    pub intensity: f32,
}

/// Image-based lighting currently applied to the scene.
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct SceneEnvironment {
    pub map: Option<EnvironmentMap>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LightingMode {
    #[default]
    Static,
    Estimated,
}

/// Which of the two ambient sources a light entity is.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmbientLightSource {
    Static,
    Estimated,
}

/// Marks the single light source currently lighting the scene.
#[derive(Component, Debug)]
pub struct ActiveLight;

/// Scene change implied by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightSwitch {
    pub deactivate: AmbientLightSource,
    pub activate: AmbientLightSource,
}

/// Lighting mode announced to the UI.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightingChanged {
    pub mode: LightingMode,
}

#[derive(Resource, Debug, Default)]
pub struct LightingAdapter {
    mode: LightingMode,
    // Outer Some: estimation replaced the environment and this is what it replaced.
    replaced_environment: Option<Option<EnvironmentMap>>,
}

impl LightingAdapter {
    pub fn mode(&self) -> LightingMode {
        self.mode
    }

    pub fn estimation_started(
        &mut self,
        environment: Option<EnvironmentMap>,
        scene: &mut SceneEnvironment,
    ) -> Option<LightSwitch> {
        if self.mode == LightingMode::Estimated {
            return None;
        }
        self.mode = LightingMode::Estimated;
        self.replaced_environment = environment.map(|map| scene.map.replace(map));
        Some(LightSwitch {
            deactivate: AmbientLightSource::Static,
            activate: AmbientLightSource::Estimated,
        })
    }

    pub fn estimation_ended(&mut self, scene: &mut SceneEnvironment) -> Option<LightSwitch> {
        if self.mode == LightingMode::Static {
            return None;
        }
        self.mode = LightingMode::Static;
        if let Some(previous) = self.replaced_environment.take() {
            scene.map = previous;
        }
        Some(LightSwitch {
            deactivate: AmbientLightSource::Estimated,
            activate: AmbientLightSource::Static,
        })
    }
}

/// Entities of the two ambient light sources.
#[derive(Resource, Debug, Clone, Copy)]
pub struct LightRig {
    pub static_light: Entity,
    pub estimated_light: Entity,
}

impl LightRig {
    pub fn entity(&self, source: AmbientLightSource) -> Entity {
        match source {
            AmbientLightSource::Static => self.static_light,
            AmbientLightSource::Estimated => self.estimated_light,
        }
    }
}

fn linear_colour(rgb: [f32; 3]) -> Color {
    Color::linear_rgb(rgb[0], rgb[1], rgb[2])
}

pub fn spawn_light_rig(mut commands: Commands) {
    let static_light = commands
        .spawn((
            DirectionalLight {
                color: linear_colour(STATIC_LIGHT_COLOUR),
                illuminance: STATIC_LIGHT_ILLUMINANCE,
                shadows_enabled: false,
                ..default()
            },
            Transform::from_translation(STATIC_LIGHT_POSITION).looking_at(Vec3::ZERO, Vec3::Y),
            Visibility::Inherited,
            AmbientLightSource::Static,
            ActiveLight,
            Name::new("StaticLight"),
        ))
        .id();

    let estimated_light = commands
        .spawn((
            DirectionalLight {
                illuminance: ESTIMATED_LIGHT_INITIAL_ILLUMINANCE,
                shadows_enabled: false,
                ..default()
            },
            Transform::default().looking_to(ESTIMATED_LIGHT_INITIAL_DIRECTION, Vec3::Z),
            Visibility::Hidden,
            AmbientLightSource::Estimated,
            Name::new("EstimatedLight"),
        ))
        .id();

    commands.insert_resource(LightRig {
        static_light,
        estimated_light,
    });
}

fn apply_switch(commands: &mut Commands, rig: &LightRig, switch: LightSwitch) {
    commands
        .entity(rig.entity(switch.deactivate))
        .remove::<ActiveLight>()
        .insert(Visibility::Hidden);
    commands
        .entity(rig.entity(switch.activate))
        .insert((ActiveLight, Visibility::Inherited));
}

/// Apply estimation start/end signals and light estimates in arrival order.
pub fn apply_lighting_events(
    mut events: EventReader<XrEvent>,
    mut adapter: ResMut<LightingAdapter>,
    mut environment: ResMut<SceneEnvironment>,
    rig: Option<Res<LightRig>>,
    mut lights: Query<(&mut DirectionalLight, &mut Transform)>,
    mut commands: Commands,
    mut changed: EventWriter<LightingChanged>,
) {
    let Some(rig) = rig else {
        return;
    };

    for XrEvent(message) in events.read() {
        let switch = match message {
            XrMessage::EstimationStarted { environment: map } => {
                adapter.estimation_started(map.clone(), &mut environment)
            }
            XrMessage::EstimationEnded => adapter.estimation_ended(&mut environment),
            XrMessage::LightEstimate(estimate) => {
                if adapter.mode() == LightingMode::Estimated {
                    if let Ok((mut light, mut transform)) = lights.get_mut(rig.estimated_light) {
                        apply_estimate(&mut light, &mut transform, estimate);
                    }
                }
                None
            }
            _ => None,
        };

        if let Some(switch) = switch {
            info!("Light source switched to {:?}", switch.activate);
            apply_switch(&mut commands, &rig, switch);
            changed.write(LightingChanged {
                mode: adapter.mode(),
            });
        }
    }
}

fn apply_estimate(light: &mut DirectionalLight, transform: &mut Transform, estimate: &LightEstimate) {
    light.color = linear_colour(estimate.colour);
    light.illuminance = estimate.illuminance;
    if estimate.direction.length_squared() > f32::EPSILON {
        let up = if estimate.direction.normalize().y.abs() > 0.99 {
            Vec3::Z
        } else {
            Vec3::Y
        };
        transform.look_to(estimate.direction, up);
    }
}
