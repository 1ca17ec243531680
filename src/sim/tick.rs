//! Simulation tick
//!
//! Core game loop step. Order within a tick:
//! debug toggles → invulnerability timer → phase commands → runner movement →
//! collision → progression → scoring → elevators.

use super::collision;
use super::player::Direction;
use super::progression::Transition;
use super::score::ScoreUpdate;
use super::state::{DebugFlags, GameEvent, GamePhase, GameState};

/// Edge-triggered inputs for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Run left (just pressed)
    pub left: bool,
    /// Run right (just pressed)
    pub right: bool,
    /// Leave the title screen, or restart after game over
    pub start: bool,
    /// Restart the run
    pub restart: bool,
    /// Pause toggle
    pub pause: bool,
    /// Debug: collisions on/off
    pub toggle_collisions: bool,
    /// Debug: hitbox overlay
    pub toggle_hitboxes: bool,
    /// Debug: elevator cable overlay
    pub toggle_tethers: bool,
}

impl TickInput {
    /// Directional edge for this tick; left wins a same-tick tie
    pub fn direction(&self) -> Option<Direction> {
        if self.left {
            Some(Direction::Left)
        } else if self.right {
            Some(Direction::Right)
        } else {
            None
        }
    }
}

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
    state.time_ticks += 1;
    state.elapsed += f64::from(dt);

    apply_debug_toggles(state, input);
    state.tick_invulnerability(dt);

    let phase = state.phase;
    match phase {
        GamePhase::Idle => {
            if input.start {
                state.start();
            }
        }
        GamePhase::GameOver => {
            if input.start || input.restart {
                state.reset();
            }
        }
        _ if input.restart => state.reset(),
        GamePhase::Playing if input.pause => {
            state.phase = GamePhase::Paused;
            state.emit(GameEvent::PauseChanged { paused: true });
        }
        GamePhase::Paused if input.pause => {
            state.phase = GamePhase::Playing;
            state.emit(GameEvent::PauseChanged { paused: false });
        }
        _ => {}
    }

    match state.phase {
        GamePhase::Playing => step_playing(state, input, dt),
        GamePhase::Transitioning => step_transition(state, dt),
        _ => {}
    }

    // Elevators run in every phase
    advance_elevators(state);
}

fn apply_debug_toggles(state: &mut GameState, input: &TickInput) {
    let mut flags: DebugFlags = state.debug;
    flags.ignore_collisions ^= input.toggle_collisions;
    flags.show_hitboxes ^= input.toggle_hitboxes;
    flags.show_tethers ^= input.toggle_tethers;
    state.set_debug(flags);
}

/// Handle a directional edge: commit the runner and track the clean run
pub fn apply_direction(state: &mut GameState, direction: Direction) {
    if state.phase != GamePhase::Playing {
        return;
    }
    state.score.record_direction(direction, state.player.moving);
    state.player.commit(direction);
    log::debug!("Running {:?} (clean run: {})", direction, !state.score.bonus_streak_broken);
}

fn step_playing(state: &mut GameState, input: &TickInput, dt: f32) {
    if let Some(direction) = input.direction() {
        apply_direction(state, direction);
    }

    if !state.player.moving {
        return;
    }

    let width = state.settings.arena.width;
    let moved = state.player.step(state.settings.player.speed, dt, width);
    let pos = state.player.pos;
    state.emit(GameEvent::PlayerMoved { x: pos.x, y: pos.y });

    // Distance points
    let earned = state.score.accrue_distance(moved, &state.settings.scoring);
    if earned > 0 {
        let new_high = state.score.update_high_score();
        let score = state.score.score;
        state.emit_score(ScoreUpdate { score, new_high });
    }

    if let Some(elevator) = collision::check(
        &state.player,
        state.elevators.as_slice(),
        state.leniency(),
        state.collision_gate(),
    ) {
        game_over(state, elevator);
        return;
    }

    if state.progression.edge_reached(&state.player, width) {
        cross_floor(state);
    }
}

fn game_over(state: &mut GameState, elevator: u32) {
    state.phase = GamePhase::GameOver;
    state.player.stop();
    log::info!(
        "Game over: hit elevator {} on level {} floor {} with {} points",
        elevator,
        state.progression.level,
        state.progression.display_floor(),
        state.score.score
    );
    state.emit(GameEvent::GameOver { elevator });
}

/// Award the floor, move the counters on and start the floor transition
fn cross_floor(state: &mut GameState) {
    state.player.stop();

    let level = state.progression.level;
    let floor = state.progression.display_floor();
    if let Some(bonus) = state.score.clean_run_bonus(&state.settings.scoring, level, floor) {
        state.award(bonus);
        let pos = state.player.pos;
        state.emit(GameEvent::BonusAwarded { amount: bonus, x: pos.x, y: pos.y });
    }

    let cross = state.progression.advance();
    let scoring = &state.settings.scoring;
    let points = if cross.level_up {
        scoring.floor_points + scoring.level_bonus
    } else {
        scoring.floor_points
    };
    state.award(points);

    if cross.level_up {
        state.elevators = state.generate_elevators();
        log::info!("Level {} complete, entering level {}", cross.level, state.progression.level);
        state.emit(GameEvent::LevelChanged { level: state.progression.level });
    } else {
        log::debug!("Floor {} of level {} crossed", cross.floor, cross.level);
    }
    state.emit(GameEvent::FloorChanged {
        floor: state.progression.display_floor(),
        total: state.progression.floors_per_level,
    });
    state.score.reset_floor_tracking();

    let target = state.floor_start_position();
    state.player.facing = state.progression.crossing_direction;
    state.progression.begin_transition(Transition::new(
        state.player.pos,
        target,
        state.settings.timing.transition,
    ));
    state.phase = GamePhase::Transitioning;
}

fn step_transition(state: &mut GameState, dt: f32) {
    let Some((pos, done)) = state.progression.step_transition(dt) else {
        state.phase = GamePhase::Playing;
        return;
    };

    state.player.pos = pos;
    state.emit(GameEvent::PlayerMoved { x: pos.x, y: pos.y });

    if done {
        state.player.stop();
        state.score.distance_accumulator = 0.0;
        state.score.reset_floor_tracking();
        state.activate_invulnerability();
        state.phase = GamePhase::Playing;
    }
}

fn advance_elevators(state: &mut GameState) {
    state.elevators.advance(state.elapsed);
    let moved: Vec<GameEvent> = state
        .elevators
        .iter()
        .map(|e| GameEvent::ElevatorMoved { id: e.id, y: e.y })
        .collect();
    for event in moved {
        state.emit(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::settings::Settings;
    use crate::sim::elevator::{Elevator, ElevatorSet};
    use glam::Vec2;

    /// Session in play with the elevators parked far above the floors
    fn playing_state() -> GameState {
        let mut state = GameState::new(Settings::default(), 12345, 0);
        park_elevators(&mut state);
        tick(&mut state, &TickInput { start: true, ..Default::default() }, 0.0);
        state.drain_events();
        state
    }

    fn park_elevators(state: &mut GameState) {
        let parked: Vec<Elevator> = state
            .elevators
            .iter()
            .map(|e| Elevator {
                baseline_y: -1000.0,
                amplitude: 0.0,
                y: -1000.0,
                ..e.clone()
            })
            .collect();
        state.elevators = ElevatorSet::from_elevators(parked);
    }

    fn press(direction: Direction) -> TickInput {
        match direction {
            Direction::Left => TickInput { left: true, ..Default::default() },
            Direction::Right => TickInput { right: true, ..Default::default() },
        }
    }

    /// Tick until the runner leaves the Playing phase (or give up)
    fn run_until_not_playing(state: &mut GameState) {
        for _ in 0..1000 {
            tick(state, &TickInput::default(), SIM_DT);
            if state.phase != GamePhase::Playing {
                return;
            }
        }
        panic!("runner never finished the floor");
    }

    fn finish_transition(state: &mut GameState) {
        for _ in 0..100 {
            if state.phase != GamePhase::Transitioning {
                return;
            }
            tick(state, &TickInput::default(), SIM_DT);
        }
    }

    /// Teleport next to the goal edge and cross with a single clean press
    fn cross_cleanly(state: &mut GameState) {
        let dir = state.crossing_direction();
        state.player.pos.x = match dir {
            Direction::Right => 760.0,
            Direction::Left => 40.0,
        };
        tick(state, &press(dir), SIM_DT);
        run_until_not_playing(state);
        finish_transition(state);
    }

    #[test]
    fn test_idle_to_playing() {
        let mut state = GameState::new(Settings::default(), 1, 0);
        tick(&mut state, &press(Direction::Right), SIM_DT);
        assert_eq!(state.phase, GamePhase::Idle);
        assert!(!state.player.moving);

        tick(&mut state, &TickInput { start: true, ..Default::default() }, SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_elevators_move_in_every_phase() {
        let mut state = GameState::new(Settings::default(), 1, 0);
        let before: Vec<f32> = state.elevators.iter().map(|e| e.y).collect();
        tick(&mut state, &TickInput::default(), 0.5);
        let after: Vec<f32> = state.elevators.iter().map(|e| e.y).collect();
        assert_eq!(state.phase, GamePhase::Idle);
        assert_ne!(before, after);
        assert_eq!(
            state
                .events()
                .iter()
                .filter(|e| matches!(e, GameEvent::ElevatorMoved { .. }))
                .count(),
            6
        );
    }

    #[test]
    fn test_runner_moves_and_scores_distance() {
        let mut state = playing_state();
        tick(&mut state, &press(Direction::Right), 0.5);
        // 200 px/s * 0.5 s = 100 px = 10 points
        assert!((state.player.pos.x - 130.0).abs() < 1e-3);
        assert_eq!(state.score.score, 10);
        assert!(state.drain_events().contains(&GameEvent::ScoreChanged { score: 10 }));
    }

    #[test]
    fn test_distance_split_across_ticks_matches_single_tick() {
        let mut split = playing_state();
        tick(&mut split, &press(Direction::Right), 0.125);
        tick(&mut split, &TickInput::default(), 0.125);

        let mut single = playing_state();
        tick(&mut single, &press(Direction::Right), 0.25);

        assert_eq!(split.score.score, single.score.score);
        assert_eq!(split.score.score, 5);
    }

    #[test]
    fn test_clean_cross_first_floor() {
        let mut state = playing_state();
        cross_cleanly(&mut state);

        assert_eq!(state.progression.floor, 1);
        assert_eq!(state.hud().floor_text(), "Floor: 2 / 6");
        assert_eq!(state.crossing_direction(), Direction::Left);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.player.invulnerable);
        assert_eq!(state.player.pos, Vec2::new(770.0, 480.0));
    }

    #[test]
    fn test_clean_cross_awards_150() {
        let mut state = playing_state();
        state.player.pos.x = 770.0;
        // Already on the edge: one tick commits and crosses with no distance points
        tick(&mut state, &press(Direction::Right), SIM_DT);

        assert_eq!(state.score.score, 150);
        assert_eq!(state.phase, GamePhase::Transitioning);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::BonusAwarded { amount: 100, x: 770.0, y: 580.0 }));
        assert!(events.contains(&GameEvent::FloorChanged { floor: 2, total: 6 }));
        assert!(events.contains(&GameEvent::HighScoreChanged { high_score: 150 }));
    }

    #[test]
    fn test_reversal_forfeits_clean_run() {
        let mut state = playing_state();
        state.player.pos.x = 700.0;
        tick(&mut state, &press(Direction::Right), 0.0);
        tick(&mut state, &press(Direction::Left), 0.0);
        assert!(state.score.bonus_streak_broken);
        // Runner turned around
        assert_eq!(state.player.committed_direction, Some(Direction::Left));

        state.player.pos.x = 770.0;
        let before = state.score.score;
        tick(&mut state, &press(Direction::Right), 0.0);
        assert_eq!(state.phase, GamePhase::Transitioning);
        assert_eq!(state.score.score - before, 50);
        assert!(!state
            .drain_events()
            .iter()
            .any(|e| matches!(e, GameEvent::BonusAwarded { .. })));
    }

    #[test]
    fn test_wrong_edge_only_clamps() {
        let mut state = playing_state();
        tick(&mut state, &press(Direction::Left), 1.0);
        assert_eq!(state.player.pos.x, 30.0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.progression.floor, 0);

        tick(&mut state, &TickInput::default(), 1.0);
        assert_eq!(state.player.pos.x, 30.0);
        assert_eq!(state.progression.floor, 0);
    }

    #[test]
    fn test_transition_clears_distance_remainder() {
        let mut state = playing_state();
        state.player.pos.x = 700.0;
        // 7 px: below one award
        tick(&mut state, &press(Direction::Right), 0.035);
        assert_eq!(state.score.score, 0);
        assert!(state.score.distance_accumulator > 6.9);

        state.player.pos.x = 770.0;
        tick(&mut state, &TickInput::default(), 0.0);
        assert_eq!(state.phase, GamePhase::Transitioning);
        assert!(state.score.distance_accumulator > 6.9);

        finish_transition(&mut state);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score.distance_accumulator, 0.0);

        // Another 7 px earns nothing: the old remainder is gone
        let before = state.score.score;
        tick(&mut state, &press(Direction::Left), 0.035);
        assert_eq!(state.score.score, before);
        assert!(state.score.distance_accumulator < 7.1);
    }

    #[test]
    fn test_long_session_keeps_elevators_moving() {
        let mut state = GameState::new(Settings::default(), 1, 0);
        state.elapsed = 8_640_000.0;
        tick(&mut state, &TickInput::default(), SIM_DT);
        let before: Vec<f32> = state.elevators.iter().map(|e| e.y).collect();
        tick(&mut state, &TickInput::default(), SIM_DT);
        let after: Vec<f32> = state.elevators.iter().map(|e| e.y).collect();
        assert!((state.elapsed - 8_640_000.0 - 2.0 * f64::from(SIM_DT)).abs() < 1e-6);
        assert_ne!(before, after);
    }

    #[test]
    fn test_input_ignored_while_transitioning() {
        let mut state = playing_state();
        state.player.pos.x = 770.0;
        tick(&mut state, &press(Direction::Right), SIM_DT);
        assert_eq!(state.phase, GamePhase::Transitioning);

        tick(&mut state, &press(Direction::Left), SIM_DT);
        assert!(!state.player.moving);
        assert!(state.score.initial_direction_this_floor.is_none());
    }

    #[test]
    fn test_level_up_on_last_floor() {
        let mut state = playing_state();
        for _ in 0..5 {
            cross_cleanly(&mut state);
        }
        assert_eq!(state.progression.floor, 5);
        let before = state.score.score;
        let old_speeds: Vec<f32> = state.elevators.iter().map(|e| e.angular_speed).collect();

        // Last floor, crossed with a broken streak so only the flat awards count
        state.player.pos.x = 40.0;
        tick(&mut state, &press(Direction::Right), 0.0);
        tick(&mut state, &press(Direction::Left), 0.0);
        state.player.pos.x = 30.0;
        tick(&mut state, &TickInput::default(), 0.0);

        assert_eq!(state.phase, GamePhase::Transitioning);
        assert_eq!(state.score.score - before, 150);
        assert_eq!(state.progression.level, 2);
        assert_eq!(state.progression.floor, 0);
        assert_eq!(state.crossing_direction(), Direction::Right);
        assert!(state.drain_events().contains(&GameEvent::LevelChanged { level: 2 }));

        let new_speeds: Vec<f32> = state.elevators.iter().map(|e| e.angular_speed).collect();
        assert_ne!(old_speeds, new_speeds);
        for (i, speed) in new_speeds.iter().enumerate() {
            let min = (80.0 + 2.0 * 20.0 + 5.0 * i as f32) / 100.0;
            assert!(*speed >= min - 1e-4);
        }

        finish_transition(&mut state);
        assert_eq!(state.player.pos, Vec2::new(30.0, 580.0));
    }

    #[test]
    fn test_collision_ends_run_and_elevators_keep_moving() {
        let mut state = playing_state();
        let car = state.elevators.as_slice()[0].clone();
        state.elevators = ElevatorSet::from_elevators(vec![Elevator {
            x: 100.0,
            y: 580.0,
            baseline_y: 580.0,
            amplitude: 0.0,
            ..car
        }]);
        state.player.pos.x = 60.0;
        tick(&mut state, &press(Direction::Right), SIM_DT);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(!state.player.moving);
        assert!(state.player.committed_direction.is_none());
        assert!(state.drain_events().contains(&GameEvent::GameOver { elevator: 0 }));

        // Frozen runner, no further input
        let x = state.player.pos.x;
        tick(&mut state, &press(Direction::Right), SIM_DT);
        assert_eq!(state.player.pos.x, x);
        assert!(state
            .events()
            .iter()
            .any(|e| matches!(e, GameEvent::ElevatorMoved { .. })));
    }

    #[test]
    fn test_invulnerability_blocks_collisions() {
        let mut state = playing_state();
        let car = state.elevators.as_slice()[0].clone();
        state.elevators = ElevatorSet::from_elevators(vec![Elevator {
            x: 100.0,
            y: 580.0,
            baseline_y: 580.0,
            amplitude: 0.0,
            ..car
        }]);
        state.activate_invulnerability();
        state.player.pos.x = 60.0;
        tick(&mut state, &press(Direction::Right), SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);

        // Window expires, next tick collides
        for _ in 0..30 {
            tick(&mut state, &TickInput::default(), SIM_DT);
            if state.phase == GamePhase::GameOver {
                break;
            }
        }
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_ignore_collisions_toggle() {
        let mut state = playing_state();
        tick(&mut state, &TickInput { toggle_collisions: true, ..Default::default() }, 0.0);
        assert!(state.debug.ignore_collisions);

        let car = state.elevators.as_slice()[0].clone();
        state.elevators = ElevatorSet::from_elevators(vec![Elevator {
            x: 100.0,
            y: 580.0,
            baseline_y: 580.0,
            amplitude: 0.0,
            ..car
        }]);
        state.player.pos.x = 60.0;
        tick(&mut state, &press(Direction::Right), SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_overlay_toggles_are_pass_through() {
        let mut state = playing_state();
        let input = TickInput {
            toggle_hitboxes: true,
            toggle_tethers: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert!(state.debug.show_hitboxes && state.debug.show_tethers);
        assert_eq!(state.phase, GamePhase::Playing);

        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.debug, DebugFlags::default());
    }

    #[test]
    fn test_pause_freezes_runner() {
        let mut state = playing_state();
        tick(&mut state, &press(Direction::Right), SIM_DT);
        tick(&mut state, &TickInput { pause: true, ..Default::default() }, SIM_DT);
        assert_eq!(state.phase, GamePhase::Paused);

        let x = state.player.pos.x;
        tick(&mut state, &TickInput::default(), 0.5);
        assert_eq!(state.player.pos.x, x);

        tick(&mut state, &TickInput { pause: true, ..Default::default() }, 0.0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.player.moving);
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut state = playing_state();
        cross_cleanly(&mut state);
        state.phase = GamePhase::GameOver;
        let high = state.score.high_score;

        tick(&mut state, &TickInput { restart: true, ..Default::default() }, SIM_DT);

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.progression.level, 1);
        assert_eq!(state.progression.floor, 0);
        assert_eq!(state.hud().floor_text(), "Floor: 1 / 6");
        assert_eq!(state.score.score, 0);
        assert_eq!(state.score.high_score, high);
        assert_eq!(state.crossing_direction(), Direction::Right);
        assert!(state.player.invulnerable);
        assert_eq!(state.player.pos, Vec2::new(30.0, 580.0));
        // Fresh cars were generated, replacing the parked ones
        assert!(state.elevators.iter().all(|e| e.amplitude > 0.0));

        let events = state.drain_events();
        assert!(events.contains(&GameEvent::GameReset));
        assert!(events.contains(&GameEvent::InvulnerabilityChanged { invulnerable: true }));
    }

    #[test]
    fn test_restart_mid_transition_abandons_it() {
        let mut state = playing_state();
        state.player.pos.x = 770.0;
        tick(&mut state, &press(Direction::Right), SIM_DT);
        assert_eq!(state.phase, GamePhase::Transitioning);

        tick(&mut state, &TickInput { restart: true, ..Default::default() }, SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(!state.progression.transitioning());
        assert_eq!(state.player.pos, Vec2::new(30.0, 580.0));
        assert_eq!(state.score.score, 0);
    }

    #[test]
    fn test_high_score_not_retriggered_on_equal() {
        let mut state = GameState::new(Settings::default(), 5, 10);
        park_elevators(&mut state);
        tick(&mut state, &TickInput { start: true, ..Default::default() }, 0.0);
        // 100 px = 10 points: equal to the stored high, not above it
        tick(&mut state, &press(Direction::Right), 0.5);
        assert_eq!(state.score.score, 10);
        assert_eq!(state.score.high_score, 10);
        assert!(!state
            .drain_events()
            .iter()
            .any(|e| matches!(e, GameEvent::HighScoreChanged { .. })));
    }

    #[test]
    fn test_determinism() {
        let inputs = [
            TickInput { start: true, ..Default::default() },
            press(Direction::Right),
            TickInput::default(),
            press(Direction::Left),
            TickInput::default(),
        ];

        let mut a = GameState::new(Settings::default(), 99999, 0);
        let mut b = GameState::new(Settings::default(), 99999, 0);
        for input in &inputs {
            tick(&mut a, input, SIM_DT);
            tick(&mut b, input, SIM_DT);
        }

        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.player.pos, b.player.pos);
        assert_eq!(a.drain_events(), b.drain_events());
    }
}
