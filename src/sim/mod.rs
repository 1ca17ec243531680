//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only enters through `tick`'s `dt`
//! - Seeded RNG only
//! - Stable iteration order (by elevator ID)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod elevator;
pub mod player;
pub mod progression;
pub mod rect;
pub mod score;
pub mod state;
pub mod tick;

pub use autopilot::autopilot_input;
pub use collision::{CollisionGate, check as check_collision};
pub use elevator::{Elevator, ElevatorSet, speed_for};
pub use player::{Direction, Player};
pub use progression::{Cross, Progression, Transition};
pub use rect::Rect;
pub use score::{Score, ScoreUpdate, clean_run_amount};
pub use state::{DebugFlags, GameEvent, GamePhase, GameState, Hitboxes, Hud, Tether, push_event};
pub use tick::{TickInput, apply_direction, tick};
