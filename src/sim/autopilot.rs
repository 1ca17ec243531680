//! Demo mode - the game plays itself
//!
//! Elevator motion is a pure function of time, so the autopilot can look
//! ahead exactly: it only sets off when the whole run to the far edge is
//! clear of every car.

use super::elevator::Elevator;
use super::player::Direction;
use super::state::{GamePhase, GameState};
use super::tick::TickInput;

/// Lookahead sampling step (seconds)
const SAMPLE_DT: f32 = 1.0 / 120.0;
/// Extra vertical clearance demanded on top of the real hitbox (pixels)
const SAFETY_MARGIN: f32 = 12.0;
/// Longest stretch of a run the lookahead samples (seconds)
const MAX_LOOKAHEAD: f32 = 10.0;

/// Input the demo player would give this tick
pub fn autopilot_input(state: &GameState) -> TickInput {
    match state.phase {
        GamePhase::Idle => TickInput { start: true, ..Default::default() },
        GamePhase::GameOver => TickInput { restart: true, ..Default::default() },
        GamePhase::Paused => TickInput { pause: true, ..Default::default() },
        GamePhase::Playing if !state.player.moving && run_is_clear(state) => {
            let mut input = TickInput::default();
            match state.crossing_direction() {
                Direction::Left => input.left = true,
                Direction::Right => input.right = true,
            }
            input
        }
        _ => TickInput::default(),
    }
}

/// Whether running to the goal edge right now avoids every car
pub fn run_is_clear(state: &GameState) -> bool {
    let player = &state.player;
    let direction = state.crossing_direction();
    let speed = state.settings.player.speed;
    if speed <= 0.0 {
        return false;
    }

    let width = state.settings.arena.width;
    let half = player.half_width();
    let goal_x = match direction {
        Direction::Left => half,
        Direction::Right => width - half,
    };
    let run_time = ((goal_x - player.pos.x).abs() / speed).min(MAX_LOOKAHEAD);

    let leniency = state.leniency();
    let hit_half_width = (player.size.x - leniency.x).max(0.0) / 2.0;
    let hit_half_height = (player.size.y - leniency.y).max(0.0) / 2.0 + SAFETY_MARGIN;

    state.elevators.iter().all(|elevator| {
        !hits_during_run(
            elevator,
            player.pos.x,
            player.pos.y,
            direction.sign() * speed,
            state.elapsed,
            run_time,
            hit_half_width,
            hit_half_height,
        )
    })
}

#[allow(clippy::too_many_arguments)]
fn hits_during_run(
    elevator: &Elevator,
    start_x: f32,
    y: f32,
    velocity: f32,
    t0: f64,
    run_time: f32,
    hit_half_width: f32,
    hit_half_height: f32,
) -> bool {
    let reach_x = hit_half_width + elevator.width / 2.0;
    let reach_y = hit_half_height + elevator.height / 2.0;

    let mut t = 0.0;
    while t <= run_time + SAMPLE_DT {
        let x = start_x + velocity * t;
        if (x - elevator.x).abs() <= reach_x && (elevator.y_at(t0 + f64::from(t)) - y).abs() <= reach_y {
            return true;
        }
        t += SAMPLE_DT;
    }
    false
}
