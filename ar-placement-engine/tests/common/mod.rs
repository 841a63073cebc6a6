#![allow(dead_code)]

use std::time::Duration;

use ar_placement_engine::engine::catalog::{CatalogItem, ItemInfo, PlacementCatalog};
use ar_placement_engine::engine::core::tick::ArCorePlugin;
use ar_placement_engine::xr::{
    HitTestSourceId, ReferenceSpaceId, SessionId, XrFrame, XrInbox, XrMessage,
};
use bevy::prelude::*;

pub const SESSION: SessionId = SessionId(1);
pub const SPACE: ReferenceSpaceId = ReferenceSpaceId(7);
pub const SOURCE: HitTestSourceId = HitTestSourceId(9);
pub const VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);

pub fn item(name: &str, scale: f32) -> CatalogItem {
    CatalogItem::new(
        format!("models/{name}.glb"),
        scale,
        ItemInfo {
            name: name.to_string(),
            price: "Rp 1.000.000".to_string(),
            material: "Kayu".to_string(),
        },
    )
}

/// Headless engine: core plugin only, time driven by hand.
pub struct Harness {
    pub app: App,
    inbox: XrInbox,
}

impl Harness {
    pub fn new(items: Vec<CatalogItem>) -> Self {
        let mut app = App::new();
        app.init_resource::<Time>()
            .add_plugins(ArCorePlugin)
            .insert_resource(PlacementCatalog::new(items));
        // Startup spawns the light rig.
        app.update();

        let inbox = app.world().resource::<XrInbox>().clone();
        Self { app, inbox }
    }

    pub fn send(&mut self, message: XrMessage) {
        self.inbox.push(message);
    }

    pub fn tick(&mut self) {
        self.app.update();
    }

    pub fn advance(&mut self, by: Duration) {
        self.app.world_mut().resource_mut::<Time>().advance_by(by);
    }

    pub fn fill_template(&mut self, index: usize) {
        self.app
            .world_mut()
            .resource_mut::<PlacementCatalog>()
            .fill_template(index, Handle::default())
            .unwrap();
    }

    /// Session start through an active hit-test source, one resolution per tick.
    pub fn start_tracking(&mut self, session: SessionId) {
        self.send(XrMessage::SessionStarted { session });
        self.tick();
        self.send(XrMessage::ReferenceSpaceResolved {
            session,
            space: SPACE,
        });
        self.tick();
        self.send(XrMessage::HitTestSourceResolved {
            session,
            source: SOURCE,
        });
        self.tick();
    }

    pub fn send_frame(&mut self, session: SessionId, poses: Vec<Mat4>) {
        self.send(XrMessage::Frame(
            XrFrame::new(session, VIEWPORT).with_hit_results(SOURCE, poses),
        ));
    }

    pub fn resource<R: Resource>(&self) -> &R {
        self.app.world().resource::<R>()
    }

    pub fn collect<C: Component + Clone>(&mut self) -> Vec<C> {
        let world = self.app.world_mut();
        world.query::<&C>().iter(world).cloned().collect()
    }

    pub fn count<C: Component>(&mut self) -> usize {
        let world = self.app.world_mut();
        world.query::<&C>().iter(world).count()
    }
}
