//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (creation order for pipe pairs)
//! - No rendering or platform dependencies; output goes through `Presenter`

pub mod avatar;
pub mod body;
pub mod collision;
pub mod obstacle;
pub mod present;
pub mod state;
pub mod tick;
pub mod timer;

pub use avatar::{Avatar, SwingState};
pub use body::{BodyId, BodyKind, KinematicBody, PostMove, Segment};
pub use collision::{hit_pipe, is_game_over, is_hit};
pub use obstacle::{GapRange, ObstaclePair, ObstacleStream, PairTemplate};
pub use present::{NullPresenter, Presenter};
pub use state::{Action, Game, GamePhase, Timers};
pub use tick::{TimerKind, spawn_tick, swing_tick, tick, update};
pub use timer::PeriodicTimer;
