//! Flappy Pipes - A side-scrolling bird-through-pipes arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bodies, obstacles, collisions, game loop)
//! - `platform`: Input mapping and the browser DOM presenter
//! - `tuning`: Data-driven gameplay constants
//! - `layout`: Page geometry read once at startup

pub mod layout;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use layout::Layout;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Physics tick period (ms)
    pub const TICK_MS: u32 = 16;
    /// Nominal duration of one physics tick (seconds), independent of wall time
    pub const SIM_DT: f32 = TICK_MS as f32 / 1000.0;
    /// Pipe pair spawn period (ms)
    pub const SPAWN_INTERVAL_MS: u32 = 1500;
    /// Avatar wing swing period (ms)
    pub const SWING_INTERVAL_MS: u32 = 200;
    /// Largest frame delta the host forwards to the simulation (ms)
    pub const MAX_FRAME_MS: f64 = 100.0;

    /// Avatar gravity (pixels/s², positive is downward)
    pub const GRAVITY: f32 = 500.0;
    /// Vertical speed set by a jump (pixels/s, negative is upward)
    pub const JUMP_SPEED: f32 = -200.0;

    /// Sky layer scroll speed (pixels/s)
    pub const SKY_SPEED: f32 = -50.0;
    /// Land layer scroll speed (pixels/s), matches the pipes
    pub const LAND_SPEED: f32 = -100.0;

    /// Pipe defaults
    pub const PIPE_SPEED: f32 = -100.0;
    pub const PIPE_WIDTH: f32 = 52.0;
    /// Vertical clearance between the upper and lower pipe
    pub const GAP_HEIGHT: f32 = 150.0;
    /// Shortest allowed pipe segment
    pub const MIN_PIPE_HEIGHT: f32 = 80.0;
}
