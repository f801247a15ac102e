//! Kinematic bodies: moving axis-aligned rectangles
//!
//! Every visible thing (sky, land, bird, pipe segments) is a `KinematicBody`.
//! Specialized behavior comes from the body's `PostMove` strategy, applied
//! right after displacement and before the body is rendered.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::present::Presenter;
use crate::layout::Layout;

/// Which pipe of a pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Segment {
    Upper,
    Lower,
}

/// Capability tag of a body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyKind {
    Sky,
    Land,
    Avatar,
    PipeSegment,
}

/// Stable identity of a body, used by presenters to find its element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyId {
    Sky,
    Land,
    Avatar,
    Pipe { pair: u32, segment: Segment },
}

impl BodyId {
    pub fn kind(&self) -> BodyKind {
        match self {
            BodyId::Sky => BodyKind::Sky,
            BodyId::Land => BodyKind::Land,
            BodyId::Avatar => BodyKind::Avatar,
            BodyId::Pipe { .. } => BodyKind::PipeSegment,
        }
    }
}

impl BodyKind {
    /// Boundary policy every body of this kind moves under
    pub fn default_post_move(self, layout: &Layout) -> Option<PostMove> {
        match self {
            BodyKind::Sky | BodyKind::Land => Some(PostMove::WrapHalfWidth),
            BodyKind::Avatar => Some(PostMove::ClampTop {
                max_top: layout.avatar_max_top(),
            }),
            BodyKind::PipeSegment => None,
        }
    }
}

/// Boundary policy applied after each displacement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PostMove {
    /// Jump back to `left = 0` once half the body has scrolled past the left
    /// edge. The layer's artwork must tile at half its width.
    WrapHalfWidth,
    /// Keep `top` within `[0, max_top]` without touching velocity
    ClampTop { max_top: f32 },
}

impl PostMove {
    pub fn apply(&self, body: &mut KinematicBody) {
        match *self {
            PostMove::WrapHalfWidth => {
                if body.pos.x <= -body.size.x / 2.0 {
                    body.pos.x = 0.0;
                }
            }
            PostMove::ClampTop { max_top } => {
                if body.pos.y <= 0.0 {
                    body.pos.y = 0.0;
                } else if body.pos.y > max_top {
                    body.pos.y = max_top;
                }
            }
        }
    }
}

/// A moving rectangle
///
/// `pos` is (left, top) and `vel` is (x speed, y speed) in pixels/second;
/// +x is rightward, +y is downward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KinematicBody {
    pub id: BodyId,
    size: Vec2,
    /// Written by `advance` during play; hosts and tests may place a body
    /// before the first tick, nothing else should move it
    pub pos: Vec2,
    /// Read on every `advance`; gravity and jumps change `vel.y`
    pub vel: Vec2,
    pub post_move: Option<PostMove>,
}

impl KinematicBody {
    pub fn new(id: BodyId, size: Vec2, pos: Vec2, vel: Vec2) -> Self {
        Self {
            id,
            size,
            pos,
            vel,
            post_move: None,
        }
    }

    /// Attach a boundary policy
    pub fn with_post_move(mut self, post_move: PostMove) -> Self {
        self.post_move = Some(post_move);
        self
    }

    /// Body carrying the boundary policy of its kind
    pub fn placed(id: BodyId, size: Vec2, pos: Vec2, vel: Vec2, layout: &Layout) -> Self {
        let mut body = Self::new(id, size, pos, vel);
        body.post_move = id.kind().default_post_move(layout);
        body
    }

    /// Scrolling sky layer
    pub fn sky(layout: &Layout, speed: f32) -> Self {
        Self::placed(BodyId::Sky, layout.sky, Vec2::ZERO, Vec2::new(speed, 0.0), layout)
    }

    /// Scrolling land layer, starting at the ground line
    pub fn land(layout: &Layout, speed: f32) -> Self {
        Self::placed(
            BodyId::Land,
            layout.land,
            Vec2::new(0.0, layout.land_top),
            Vec2::new(speed, 0.0),
            layout,
        )
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Center point of the rectangle
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Move by velocity × `dt` seconds, apply the boundary policy, then render
    pub fn advance(&mut self, dt: f32, presenter: &mut dyn Presenter) {
        self.pos += self.vel * dt;
        if let Some(post_move) = self.post_move {
            post_move.apply(self);
        }
        presenter.render(self.id, self);
    }
}
