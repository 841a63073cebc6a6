use std::sync::{Arc, Mutex};

use bevy::prelude::*;

use super::messages::{XrFrame, XrMessage, XrRequest};

/// Shared queue the host pushes platform messages into.
///
/// Cloning hands out another producer for the same queue; the engine is the
/// only consumer and empties it once per tick.
#[derive(Resource, Clone, Default)]
pub struct XrInbox(Arc<Mutex<Vec<XrMessage>>>);

impl XrInbox {
    pub fn push(&self, message: XrMessage) {
        if let Ok(mut queue) = self.0.lock() {
            queue.push(message);
        }
    }

    fn take(&self) -> Vec<XrMessage> {
        self.0
            .lock()
            .map(|mut queue| std::mem::take(&mut *queue))
            .unwrap_or_default()
    }
}

/// Requests waiting for the host to pick them up.
#[derive(Resource, Default, Debug)]
pub struct XrOutbox {
    requests: Vec<XrRequest>,
}

impl XrOutbox {
    pub fn queue(&mut self, request: XrRequest) {
        self.requests.push(request);
    }

    pub fn pending(&self) -> &[XrRequest] {
        &self.requests
    }

    pub fn drain(&mut self) -> Vec<XrRequest> {
        std::mem::take(&mut self.requests)
    }
}

/// Frame delivered during the current tick. Hit results are consumed once,
/// so a tick without a new frame carries no sample.
#[derive(Resource, Default, Debug)]
pub struct CurrentXrFrame(pub Option<XrFrame>);

/// Platform message replayed on the tick thread, in arrival order.
#[derive(Event, Debug, Clone)]
pub struct XrEvent(pub XrMessage);

/// Empty the inbox at the start of the tick.
pub fn drain_xr_inbox(
    inbox: Option<Res<XrInbox>>,
    mut current_frame: ResMut<CurrentXrFrame>,
    mut events: EventWriter<XrEvent>,
) {
    current_frame.0 = None;

    let Some(inbox) = inbox else {
        return;
    };

    for message in inbox.take() {
        match message {
            // Latest frame wins if the host delivered more than one.
            XrMessage::Frame(frame) => current_frame.0 = Some(frame),
            other => {
                events.write(XrEvent(other));
            }
        }
    }
}
