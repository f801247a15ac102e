//! The bird: a kinematic body with gravity, a jump impulse and wing frames

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{BodyId, KinematicBody};
use super::present::Presenter;
use crate::layout::Layout;
use crate::tuning::Tuning;

/// Wing animation frame (1, 2 or 3); purely cosmetic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwingState(u8);

impl SwingState {
    pub const FIRST: SwingState = SwingState(1);
    pub const FRAMES: u8 = 3;

    /// Frame number for sprite selection
    pub fn frame(&self) -> u8 {
        self.0
    }

    /// Next frame in the 1 → 2 → 3 → 1 cycle
    pub fn next(self) -> Self {
        if self.0 >= Self::FRAMES {
            Self::FIRST
        } else {
            SwingState(self.0 + 1)
        }
    }
}

impl Default for SwingState {
    fn default() -> Self {
        Self::FIRST
    }
}

/// The player's bird
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Avatar {
    pub body: KinematicBody,
    /// Downward acceleration (pixels/s²)
    pub gravity: f32,
    /// Vertical speed a jump sets
    pub jump_speed: f32,
    /// Ground contact position for `top`
    max_top: f32,
    pub swing: SwingState,
}

impl Avatar {
    pub fn new(layout: &Layout, tuning: &Tuning) -> Self {
        let max_top = layout.avatar_max_top();
        let body = KinematicBody::placed(
            BodyId::Avatar,
            layout.avatar,
            layout.avatar_start,
            Vec2::ZERO,
            layout,
        );
        Self {
            body,
            gravity: tuning.gravity,
            jump_speed: tuning.jump_speed,
            max_top,
            swing: SwingState::default(),
        }
    }

    #[inline]
    pub fn max_top(&self) -> f32 {
        self.max_top
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.body.top()
    }

    #[inline]
    pub fn y_speed(&self) -> f32 {
        self.body.vel.y
    }

    /// Whether the bird rests on the ground line
    pub fn on_ground(&self) -> bool {
        // Clamp snaps top to exactly max_top; >= also covers an unclamped body
        self.body.top() >= self.max_top
    }

    /// Displace, clamp and render, then let gravity act on the vertical speed.
    ///
    /// Gravity is applied after displacement, so a jump's full speed is used
    /// for the first tick.
    pub fn advance(&mut self, dt: f32, presenter: &mut dyn Presenter) {
        self.body.advance(dt, presenter);
        self.body.vel.y += self.gravity * dt;
    }

    /// Replace the vertical speed with the jump impulse
    pub fn jump(&mut self) {
        self.body.vel.y = self.jump_speed;
    }

    /// Step the wing animation
    pub fn advance_swing(&mut self, presenter: &mut dyn Presenter) {
        self.swing = self.swing.next();
        presenter.render_swing(self.swing);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::present::{NullPresenter, RecordingPresenter};
    use proptest::prelude::*;

    fn avatar() -> Avatar {
        Avatar::new(&Layout::default(), &Tuning::default())
    }

    #[test]
    fn test_jump_then_one_tick() {
        let mut bird = avatar();
        let t0 = bird.top();
        assert_eq!(bird.y_speed(), 0.0);

        bird.jump();
        assert_eq!(bird.y_speed(), -200.0);

        bird.advance(SIM_DT, &mut NullPresenter);
        assert!((bird.top() - (t0 - 3.2)).abs() < 1e-3);
        assert!((bird.y_speed() - (-192.0)).abs() < 1e-3);
    }

    #[test]
    fn test_jump_overrides_not_adds() {
        let mut bird = avatar();
        bird.body.vel.y = 350.0;
        bird.jump();
        assert_eq!(bird.y_speed(), bird.jump_speed);
        bird.body.vel.y = -500.0;
        bird.jump();
        assert_eq!(bird.y_speed(), bird.jump_speed);
    }

    #[test]
    fn test_gravity_applied_after_move() {
        let mut bird = avatar();
        let t0 = bird.top();
        bird.advance(SIM_DT, &mut NullPresenter);
        // First tick from rest does not move
        assert_eq!(bird.top(), t0);
        assert!((bird.y_speed() - 500.0 * SIM_DT).abs() < 1e-4);
    }

    #[test]
    fn test_falls_to_ground_and_keeps_accelerating() {
        let mut bird = avatar();
        for _ in 0..500 {
            bird.advance(SIM_DT, &mut NullPresenter);
        }
        assert_eq!(bird.top(), bird.max_top());
        assert!(bird.on_ground());
        // Speed keeps accumulating while clamped
        assert!((bird.y_speed() - 500.0 * SIM_DT * 500.0).abs() < 1.0);
    }

    #[test]
    fn test_ceiling_clamp() {
        let mut bird = avatar();
        for _ in 0..60 {
            bird.jump();
            bird.advance(SIM_DT, &mut NullPresenter);
        }
        assert_eq!(bird.top(), 0.0);
        assert!(bird.y_speed() < 0.0);
    }

    #[test]
    fn test_swing_cycles() {
        let mut bird = avatar();
        let mut presenter = RecordingPresenter::default();
        assert_eq!(bird.swing.frame(), 1);
        for _ in 0..4 {
            bird.advance_swing(&mut presenter);
        }
        let frames: Vec<u8> = presenter.swings.iter().map(|s| s.frame()).collect();
        assert_eq!(frames, vec![2, 3, 1, 2]);
    }

    proptest! {
        #[test]
        fn prop_top_stays_in_bounds(jumps in proptest::collection::vec(any::<bool>(), 1..400)) {
            let mut bird = avatar();
            for jump in jumps {
                if jump {
                    bird.jump();
                }
                bird.advance(SIM_DT, &mut NullPresenter);
                prop_assert!(bird.top() >= 0.0);
                prop_assert!(bird.top() <= bird.max_top());
            }
        }
    }
}
