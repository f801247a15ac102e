//! Timer callbacks and the clock that dispatches them
//!
//! Physics always advances by the nominal tick duration, regardless of how
//! much wall time actually passed between callbacks.

use super::collision::is_game_over;
use super::present::Presenter;
use super::state::{Game, GamePhase};

/// Which periodic task fired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    Spawn,
    Swing,
    Physics,
}

/// Advance the world by one fixed physics step, then check for a crash
pub fn tick(game: &mut Game, presenter: &mut dyn Presenter) {
    if game.phase != GamePhase::Running {
        return;
    }
    let dt = game.tuning.tick_seconds();

    game.sky.advance(dt, presenter);
    game.land.advance(dt, presenter);
    game.avatar.advance(dt, presenter);
    game.obstacles.advance_all(dt, presenter);
    game.time_ticks += 1;

    // Clamp has already snapped the avatar this tick, so ground contact is exact
    if is_game_over(&game.avatar, game.obstacles.pairs()) {
        game.end(presenter);
    }
}

/// Spawn timer: one new pipe pair, then drop pairs that left the screen
pub fn spawn_tick(game: &mut Game, presenter: &mut dyn Presenter) {
    if game.phase != GamePhase::Running {
        return;
    }
    game.obstacles.on_spawn_timer(presenter);
}

/// Swing timer: next wing frame
pub fn swing_tick(game: &mut Game, presenter: &mut dyn Presenter) {
    if game.phase != GamePhase::Running {
        return;
    }
    game.avatar.advance_swing(presenter);
}

/// Earliest due timer; ties fire in start order (spawn, swing, physics)
fn next_due(game: &Game) -> Option<(TimerKind, f64)> {
    let candidates = [
        (TimerKind::Spawn, game.timers.spawn.due_in()),
        (TimerKind::Swing, game.timers.swing.due_in()),
        (TimerKind::Physics, game.timers.physics.due_in()),
    ];
    candidates
        .into_iter()
        .filter_map(|(kind, due)| due.map(|due| (kind, due)))
        .fold(None, |best, (kind, due)| match best {
            Some((_, earliest)) if earliest <= due => best,
            _ => Some((kind, due)),
        })
}

/// Let `elapsed_ms` of wall time pass, firing every timer that comes due in
/// chronological order. Stops dispatching as soon as a callback halts the
/// game. Returns the number of physics ticks run.
pub fn update(game: &mut Game, elapsed_ms: f64, presenter: &mut dyn Presenter) -> u32 {
    let mut remaining = elapsed_ms.max(0.0);
    let mut physics_ticks = 0;

    while let Some((kind, due)) = next_due(game) {
        let due = due.max(0.0);
        if due > remaining {
            elapse_all(game, remaining);
            break;
        }
        elapse_all(game, due);
        remaining -= due;

        match kind {
            TimerKind::Spawn => {
                game.timers.spawn.fire();
                spawn_tick(game, presenter);
            }
            TimerKind::Swing => {
                game.timers.swing.fire();
                swing_tick(game, presenter);
            }
            TimerKind::Physics => {
                game.timers.physics.fire();
                tick(game, presenter);
                physics_ticks += 1;
            }
        }
    }

    physics_ticks
}

fn elapse_all(game: &mut Game, ms: f64) {
    game.timers.spawn.elapse(ms);
    game.timers.swing.elapse(ms);
    game.timers.physics.elapse(ms);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::layout::Layout;
    use crate::sim::obstacle::ObstaclePair;
    use crate::sim::present::{NullPresenter, RecordingPresenter};
    use crate::tuning::Tuning;

    fn running_game() -> Game {
        let mut game = Game::new(Layout::default(), Tuning::default(), 4242).unwrap();
        game.start(&mut NullPresenter);
        game
    }

    #[test]
    fn test_tick_moves_every_body() {
        let mut game = running_game();
        game.obstacles.spawn(&mut NullPresenter);
        let sky0 = game.sky.left();
        let land0 = game.land.left();
        let pipe0 = game.obstacles.pairs()[0].upper.left();

        let mut presenter = RecordingPresenter::default();
        tick(&mut game, &mut presenter);

        assert!((game.sky.left() - (sky0 - 50.0 * SIM_DT)).abs() < 1e-4);
        assert!((game.land.left() - (land0 - 100.0 * SIM_DT)).abs() < 1e-4);
        assert!((game.obstacles.pairs()[0].upper.left() - (pipe0 - 1.6)).abs() < 1e-3);
        // sky, land, avatar, upper, lower
        assert_eq!(presenter.renders.len(), 5);
        assert_eq!(game.time_ticks, 1);
    }

    #[test]
    fn test_tick_ignored_when_idle() {
        let mut game = Game::new(Layout::default(), Tuning::default(), 1).unwrap();
        let sky0 = game.sky.left();
        tick(&mut game, &mut NullPresenter);
        assert_eq!(game.sky.left(), sky0);
        assert_eq!(game.time_ticks, 0);
    }

    #[test]
    fn test_falling_bird_ends_game_on_ground() {
        let mut game = running_game();
        let mut presenter = RecordingPresenter::default();
        let mut ticks = 0;
        while game.is_running() && ticks < 10_000 {
            tick(&mut game, &mut presenter);
            ticks += 1;
        }
        assert!(game.is_over());
        assert_eq!(game.avatar.top(), game.avatar.max_top());
        assert!(!game.timers.any_running());
        assert_eq!(presenter.restart_visible, Some(true));
    }

    #[test]
    fn test_pipe_collision_ends_game() {
        let mut game = running_game();
        let template = *game.obstacles.template();
        let mut pair = ObstaclePair::with_offset(1, &template, 250.0);
        // Upper pipe covers the bird (top 150, inside 0..250)
        pair.upper.pos.x = game.avatar.body.left();
        pair.lower.pos.x = game.avatar.body.left();
        pair.upper.vel.x = 0.0;
        pair.lower.vel.x = 0.0;
        game.obstacles.push(pair);

        tick(&mut game, &mut NullPresenter);
        assert!(game.is_over());
    }

    #[test]
    fn test_update_fires_timers_on_schedule() {
        let mut game = running_game();
        let mut presenter = RecordingPresenter::default();
        game.avatar.jump();

        // 1500ms: 93 physics ticks, 7 swings, 1 spawn
        let ticks = update(&mut game, 1500.0, &mut presenter);
        assert_eq!(ticks, 93);
        assert_eq!(presenter.swings.len(), 7);
        assert_eq!(presenter.created, vec![1]);
        assert_eq!(game.obstacles.len(), 1);
    }

    #[test]
    fn test_update_accumulates_across_calls() {
        let mut game = running_game();
        let mut total = 0;
        for _ in 0..10 {
            total += update(&mut game, 8.0, &mut NullPresenter);
        }
        assert_eq!(total, 5);
    }

    #[test]
    fn test_spawn_lands_between_physics_ticks() {
        let mut game = running_game();
        // Keep the bird airborne by removing gravity
        game.avatar.gravity = 0.0;
        let mut presenter = RecordingPresenter::default();

        update(&mut game, 1499.0, &mut presenter);
        assert!(presenter.created.is_empty());
        let ticks_before = game.time_ticks;

        update(&mut game, 2.0, &mut presenter);
        assert_eq!(presenter.created, vec![1]);
        // The 1500ms spawn sits between tick 93 (1488) and tick 94 (1504)
        assert_eq!(game.time_ticks, ticks_before);
        let pair_left = game.obstacles.pairs()[0].upper.left();
        assert_eq!(pair_left, game.layout.playfield.x);
    }

    #[test]
    fn test_spawn_fires_before_physics_on_same_millisecond() {
        let tuning = Tuning {
            tick_ms: 10,
            ..Tuning::default()
        };
        let mut game = Game::new(Layout::default(), tuning, 77).unwrap();
        game.start(&mut NullPresenter);
        game.avatar.gravity = 0.0;
        let mut presenter = RecordingPresenter::default();

        update(&mut game, 1499.0, &mut presenter);
        assert_eq!(game.time_ticks, 149);
        assert!(presenter.created.is_empty());

        // Spawn and tick 150 are both due at 1500ms; the new pair moves once
        update(&mut game, 1.0, &mut presenter);
        assert_eq!(presenter.created, vec![1]);
        assert_eq!(game.time_ticks, 150);
        let pair_left = game.obstacles.pairs()[0].upper.left();
        assert!((pair_left - (game.layout.playfield.x - 1.0)).abs() < 1e-3);
    }

    #[test]
    fn test_no_callbacks_after_game_over() {
        let mut game = running_game();
        let mut presenter = RecordingPresenter::default();
        // Plenty of time to hit the ground, then keep going
        update(&mut game, 60_000.0, &mut presenter);
        assert!(game.is_over());
        let ticks = game.time_ticks;
        let swings = presenter.swings.len();
        let created = presenter.created.len();

        let ran = update(&mut game, 60_000.0, &mut presenter);
        assert_eq!(ran, 0);
        assert_eq!(game.time_ticks, ticks);
        assert_eq!(presenter.swings.len(), swings);
        assert_eq!(presenter.created.len(), created);
    }

    #[test]
    fn test_update_when_idle_runs_nothing() {
        let mut game = Game::new(Layout::default(), Tuning::default(), 3).unwrap();
        assert_eq!(update(&mut game, 1000.0, &mut NullPresenter), 0);
    }
}
