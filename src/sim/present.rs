//! Presentation seam
//!
//! The simulation never touches a rendering surface. It reports geometry and
//! lifecycle changes through this trait and the host decides what to draw.

use super::avatar::SwingState;
use super::body::{BodyId, KinematicBody};
use super::obstacle::ObstaclePair;

/// Receives every visible change the simulation makes
pub trait Presenter {
    /// Reflect a body's size and position; called after every move
    fn render(&mut self, id: BodyId, body: &KinematicBody);

    /// Avatar wing frame changed
    fn render_swing(&mut self, _swing: SwingState) {}

    /// A pipe pair entered the stream; create its two elements
    fn pair_created(&mut self, _pair: &ObstaclePair) {}

    /// A pipe pair left the stream; drop its two elements
    fn pair_removed(&mut self, _pair: &ObstaclePair) {}

    /// Show or hide the start/restart affordance
    fn set_restart_visible(&mut self, _visible: bool) {}

    /// Start was requested after game over; re-initialize everything
    fn request_reload(&mut self) {}
}

/// Presenter that draws nothing (headless runs)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn render(&mut self, _id: BodyId, _body: &KinematicBody) {}
}

/// Presenter that records every call, for assertions
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    pub renders: Vec<BodyId>,
    pub swings: Vec<SwingState>,
    pub created: Vec<u32>,
    pub removed: Vec<u32>,
    pub restart_visible: Option<bool>,
    pub reloads: u32,
}

#[cfg(test)]
impl Presenter for RecordingPresenter {
    fn render(&mut self, id: BodyId, _body: &KinematicBody) {
        self.renders.push(id);
    }

    fn render_swing(&mut self, swing: SwingState) {
        self.swings.push(swing);
    }

    fn pair_created(&mut self, pair: &ObstaclePair) {
        self.created.push(pair.id);
    }

    fn pair_removed(&mut self, pair: &ObstaclePair) {
        self.removed.push(pair.id);
    }

    fn set_restart_visible(&mut self, visible: bool) {
        self.restart_visible = Some(visible);
    }

    fn request_reload(&mut self) {
        self.reloads += 1;
    }
}
