//! Game state and phase transitions
//!
//! `Game` owns every body plus the three timers. Phase changes (start, stop,
//! toggle, game over) live here; per-timer work lives in `tick`.

use super::avatar::Avatar;
use super::body::KinematicBody;
use super::obstacle::{ObstacleStream, PairTemplate};
use super::present::Presenter;
use super::timer::PeriodicTimer;
use crate::layout::{ConfigError, Layout};
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Not started yet, or paused by the player
    Idle,
    /// Timers running
    Running,
    /// The bird crashed; only a full reload continues
    Over,
}

/// Discrete player inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Flap upward
    Jump,
    /// Pause when running, start (or reload after a crash) otherwise
    ToggleRun,
}

/// The three periodic tasks of a running game
#[derive(Debug, Clone, PartialEq)]
pub struct Timers {
    /// Obstacle spawn + prune
    pub spawn: PeriodicTimer,
    /// Avatar wing frames
    pub swing: PeriodicTimer,
    /// Fixed-step physics
    pub physics: PeriodicTimer,
}

impl Timers {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            spawn: PeriodicTimer::new(tuning.spawn_interval_ms),
            swing: PeriodicTimer::new(tuning.swing_interval_ms),
            physics: PeriodicTimer::new(tuning.tick_ms),
        }
    }

    pub fn start_all(&mut self) {
        self.spawn.start();
        self.swing.start();
        self.physics.start();
    }

    pub fn stop_all(&mut self) {
        self.spawn.stop();
        self.swing.stop();
        self.physics.stop();
    }

    pub fn any_running(&self) -> bool {
        self.spawn.is_running() || self.swing.is_running() || self.physics.is_running()
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct Game {
    /// Seed of the pipe stream, for reproducible runs
    pub seed: u64,
    pub tuning: Tuning,
    pub layout: Layout,
    pub phase: GamePhase,
    pub sky: KinematicBody,
    pub land: KinematicBody,
    pub avatar: Avatar,
    pub obstacles: ObstacleStream,
    pub timers: Timers,
    /// Physics ticks run so far
    pub time_ticks: u64,
}

impl Game {
    /// Build a fresh idle game, rejecting geometry the pipes can't fit into
    pub fn new(layout: Layout, tuning: Tuning, seed: u64) -> Result<Self, ConfigError> {
        layout.validate()?;
        tuning.validate()?;
        let template = PairTemplate::new(&layout, &tuning)?;

        Ok(Self {
            seed,
            sky: KinematicBody::sky(&layout, tuning.sky_speed),
            land: KinematicBody::land(&layout, tuning.land_speed),
            avatar: Avatar::new(&layout, &tuning),
            obstacles: ObstacleStream::new(template, seed),
            timers: Timers::new(&tuning),
            phase: GamePhase::Idle,
            time_ticks: 0,
            tuning,
            layout,
        })
    }

    /// Re-initialize in place (hosts without a page to reload). Active pairs
    /// are reported as removed so the presenter can drop their elements.
    pub fn restart(&mut self, seed: u64, presenter: &mut dyn Presenter) {
        for pair in self.obstacles.pairs() {
            presenter.pair_removed(pair);
        }
        let template = *self.obstacles.template();
        self.seed = seed;
        self.sky = KinematicBody::sky(&self.layout, self.tuning.sky_speed);
        self.land = KinematicBody::land(&self.layout, self.tuning.land_speed);
        self.avatar = Avatar::new(&self.layout, &self.tuning);
        self.obstacles = ObstacleStream::new(template, seed);
        self.timers = Timers::new(&self.tuning);
        self.phase = GamePhase::Idle;
        self.time_ticks = 0;
        log::info!("Game re-initialized with seed: {}", seed);
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::Over
    }

    /// Push the current geometry of every body to the presenter
    pub fn render_all(&self, presenter: &mut dyn Presenter) {
        presenter.render(self.sky.id, &self.sky);
        presenter.render(self.land.id, &self.land);
        presenter.render(self.avatar.body.id, &self.avatar.body);
        presenter.render_swing(self.avatar.swing);
        for pair in self.obstacles.pairs() {
            for segment in pair.segments() {
                presenter.render(segment.id, segment);
            }
        }
    }

    /// Begin or resume play
    ///
    /// After a crash this asks the presenter for a full reload instead of
    /// resuming.
    pub fn start(&mut self, presenter: &mut dyn Presenter) {
        match self.phase {
            GamePhase::Running => {}
            GamePhase::Over => {
                log::info!("Start after game over; requesting reload");
                presenter.request_reload();
            }
            GamePhase::Idle => {
                self.timers.start_all();
                self.phase = GamePhase::Running;
                log::info!("Game running (tick {})", self.time_ticks);
            }
        }
    }

    /// Pause a running game and show the affordance
    pub fn stop(&mut self, presenter: &mut dyn Presenter) {
        if self.phase != GamePhase::Running {
            return;
        }
        self.timers.stop_all();
        self.phase = GamePhase::Idle;
        presenter.set_restart_visible(true);
        log::info!("Game paused (tick {})", self.time_ticks);
    }

    /// Player toggle: a manual pause keeps the affordance hidden
    pub fn toggle(&mut self, presenter: &mut dyn Presenter) {
        if self.is_running() {
            self.stop(presenter);
            presenter.set_restart_visible(false);
        } else {
            self.start(presenter);
        }
    }

    /// Flap, only while running
    pub fn jump(&mut self) {
        if self.is_running() {
            self.avatar.jump();
        } else {
            log::trace!("Jump ignored in {:?}", self.phase);
        }
    }

    pub fn handle_action(&mut self, action: Action, presenter: &mut dyn Presenter) {
        match action {
            Action::Jump => self.jump(),
            Action::ToggleRun => self.toggle(presenter),
        }
    }

    /// Crash: halt every timer and offer a restart
    pub(crate) fn end(&mut self, presenter: &mut dyn Presenter) {
        self.timers.stop_all();
        self.phase = GamePhase::Over;
        presenter.set_restart_visible(true);
        log::info!(
            "Game over after {} ticks ({} pipe pairs on screen)",
            self.time_ticks,
            self.obstacles.len()
        );
    }
}
