//! Game session state and events
//!
//! `GameState` owns everything a run needs. The presentation layer never
//! mutates it; it reads snapshots and drains the emitted events.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::CollisionGate;
use super::elevator::ElevatorSet;
use super::player::{Direction, Player};
use super::progression::Progression;
use super::rect::Rect;
use super::score::{Score, ScoreUpdate};
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for start
    Idle,
    /// Active gameplay
    Playing,
    /// Player frozen, elevators keep running
    Paused,
    /// Runner animating to the next floor; input and collisions suspended
    Transitioning,
    /// Run ended
    GameOver,
}

/// Developer toggles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebugFlags {
    pub ignore_collisions: bool,
    pub show_hitboxes: bool,
    pub show_tethers: bool,
}

/// State changes for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    Started,
    PlayerMoved { x: f32, y: f32 },
    ElevatorMoved { id: u32, y: f32 },
    ScoreChanged { score: u64 },
    /// Persist this value
    HighScoreChanged { high_score: u64 },
    /// 1-based floor
    FloorChanged { floor: u32, total: u32 },
    LevelChanged { level: u32 },
    BonusAwarded { amount: u64, x: f32, y: f32 },
    InvulnerabilityChanged { invulnerable: bool },
    PauseChanged { paused: bool },
    DebugChanged { flags: DebugFlags },
    GameOver { elevator: u32 },
    GameReset,
}

impl GameEvent {
    /// Whether `self` makes an earlier pending `other` obsolete
    pub fn supersedes(&self, other: &GameEvent) -> bool {
        match (self, other) {
            (GameEvent::PlayerMoved { .. }, GameEvent::PlayerMoved { .. }) => true,
            (GameEvent::ElevatorMoved { id: a, .. }, GameEvent::ElevatorMoved { id: b, .. }) => a == b,
            _ => false,
        }
    }
}

/// Queue an event, dropping a pending position it replaces
pub fn push_event(events: &mut Vec<GameEvent>, event: GameEvent) {
    events.retain(|pending| !event.supersedes(pending));
    events.push(event);
}

/// HUD snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hud {
    pub level: u32,
    /// 1-based
    pub floor: u32,
    pub floors_per_level: u32,
    pub score: u64,
    pub high_score: u64,
}

impl Hud {
    pub fn level_text(&self) -> String {
        format!("Level: {}", self.level)
    }

    pub fn floor_text(&self) -> String {
        format!("Floor: {} / {}", self.floor, self.floors_per_level)
    }

    pub fn score_text(&self) -> String {
        format!("Score: {}", self.score)
    }

    pub fn high_score_text(&self) -> String {
        format!("High Score: {}", self.high_score)
    }
}

/// Boxes for the debug hitbox overlay
#[derive(Debug, Clone, PartialEq)]
pub struct Hitboxes {
    pub player: Rect,
    /// Player box after leniency
    pub player_effective: Rect,
    pub elevators: Vec<Rect>,
}

/// Cable from the HUD band down to an elevator car
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tether {
    pub elevator: u32,
    pub top: Vec2,
    pub bottom: Vec2,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub phase: GamePhase,
    /// Seconds of simulated time (drives the elevators)
    pub elapsed: f64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    pub elevators: ElevatorSet,
    pub progression: Progression,
    pub score: Score,
    pub debug: DebugFlags,
    /// Seconds of invulnerability left
    pub invulnerable_for: f32,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a session on the title screen
    pub fn new(settings: Settings, seed: u64, high_score: u64) -> Self {
        let settings = settings.normalized();
        let mut rng = Pcg32::seed_from_u64(seed);
        let progression = Progression::new(settings.arena.floors_per_level);
        let mut elevators = ElevatorSet::generate(&settings.arena, &settings.elevators, 1, &mut rng);
        elevators.advance(0.0);

        let start = Self::floor_start(&settings, &progression);
        let player = Player::new(&settings.player, start);

        log::info!("New session (seed {}, high score {})", seed, high_score);

        Self {
            settings,
            seed,
            rng,
            phase: GamePhase::Idle,
            elapsed: 0.0,
            time_ticks: 0,
            player,
            elevators,
            progression,
            score: Score::new(high_score),
            debug: DebugFlags::default(),
            invulnerable_for: 0.0,
            events: Vec::new(),
        }
    }

    /// Runner position at the start of the current floor
    fn floor_start(settings: &Settings, progression: &Progression) -> Vec2 {
        let half_width = settings.player.width / 2.0;
        Vec2::new(
            settings.arena.start_x(progression.crossing_direction, half_width),
            settings.arena.floor_y(progression.floor),
        )
    }

    /// Where the runner should stand for the current floor
    pub fn floor_start_position(&self) -> Vec2 {
        Self::floor_start(&self.settings, &self.progression)
    }

    /// Leave the title screen
    pub fn start(&mut self) {
        if self.phase != GamePhase::Idle {
            return;
        }
        self.phase = GamePhase::Playing;
        log::info!("Run started");
        self.emit(GameEvent::Started);
    }

    /// Throw away the current run and start a fresh one.
    /// Safe at any point, including mid-transition.
    pub fn reset(&mut self) {
        let total = self.progression.floors_per_level;
        self.progression = Progression::new(total);
        self.score.reset();
        self.elevators = self.generate_elevators();

        let start = self.floor_start_position();
        self.player = Player::new(&self.settings.player, start);
        self.invulnerable_for = 0.0;
        self.phase = GamePhase::Playing;

        log::info!("Run reset (high score {})", self.score.high_score);
        self.emit(GameEvent::GameReset);
        self.emit(GameEvent::ScoreChanged { score: 0 });
        self.emit(GameEvent::LevelChanged { level: 1 });
        self.emit(GameEvent::FloorChanged { floor: 1, total });
        self.emit(GameEvent::PlayerMoved { x: start.x, y: start.y });
        self.activate_invulnerability();
    }

    /// Fresh elevators for the current level, positioned at the current time
    pub(crate) fn generate_elevators(&mut self) -> ElevatorSet {
        let mut elevators = ElevatorSet::generate(
            &self.settings.arena,
            &self.settings.elevators,
            self.progression.level,
            &mut self.rng,
        );
        elevators.advance(self.elapsed);
        elevators
    }

    /// Start (or restart) the invulnerability window
    pub(crate) fn activate_invulnerability(&mut self) {
        self.invulnerable_for = self.settings.timing.invulnerability;
        if !self.player.invulnerable {
            self.player.invulnerable = true;
            self.emit(GameEvent::InvulnerabilityChanged { invulnerable: true });
        }
    }

    /// Count down the invulnerability window
    pub(crate) fn tick_invulnerability(&mut self, dt: f32) {
        if !self.player.invulnerable {
            return;
        }
        self.invulnerable_for -= dt;
        if self.invulnerable_for <= 0.0 {
            self.invulnerable_for = 0.0;
            self.player.invulnerable = false;
            self.emit(GameEvent::InvulnerabilityChanged { invulnerable: false });
        }
    }

    /// Add points and emit the resulting score events
    pub(crate) fn award(&mut self, points: u64) -> ScoreUpdate {
        let update = self.score.award(points);
        self.emit_score(update);
        update
    }

    pub(crate) fn emit_score(&mut self, update: ScoreUpdate) {
        self.emit(GameEvent::ScoreChanged { score: update.score });
        if let Some(high_score) = update.new_high {
            log::info!("New high score: {}", high_score);
            self.emit(GameEvent::HighScoreChanged { high_score });
        }
    }

    /// Wipe the stored high score
    pub fn clear_high_score(&mut self) {
        self.score.high_score = 0;
        log::info!("High score cleared");
        self.emit(GameEvent::HighScoreChanged { high_score: 0 });
    }

    pub(crate) fn set_debug(&mut self, flags: DebugFlags) {
        if flags != self.debug {
            self.debug = flags;
            log::debug!("Debug flags: {:?}", flags);
            self.emit(GameEvent::DebugChanged { flags });
        }
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        push_event(&mut self.events, event);
    }

    /// Which collision sources are currently suppressed
    pub fn collision_gate(&self) -> CollisionGate {
        CollisionGate {
            invulnerable: self.player.invulnerable,
            paused: self.phase == GamePhase::Paused,
            ignore_collisions: self.debug.ignore_collisions,
        }
    }

    /// Pending events, oldest first. Positional events are coalesced, so an
    /// undrained queue holds at most one per elevator plus one for the runner.
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Direction the current floor must be crossed in
    pub fn crossing_direction(&self) -> Direction {
        self.progression.crossing_direction
    }

    /// Collision leniency as a per-axis inset
    pub fn leniency(&self) -> Vec2 {
        Vec2::new(
            self.settings.player.leniency_horizontal,
            self.settings.player.leniency_vertical,
        )
    }

    pub fn hud(&self) -> Hud {
        Hud {
            level: self.progression.level,
            floor: self.progression.display_floor(),
            floors_per_level: self.progression.floors_per_level,
            score: self.score.score,
            high_score: self.score.high_score,
        }
    }

    pub fn hitboxes(&self) -> Hitboxes {
        Hitboxes {
            player: self.player.bounds(),
            player_effective: self.player.hitbox(self.leniency()),
            elevators: self.elevators.iter().map(|e| e.bounds()).collect(),
        }
    }

    pub fn tethers(&self) -> Vec<Tether> {
        let hud = self.settings.arena.hud_height;
        self.elevators
            .iter()
            .map(|e| Tether {
                elevator: e.id,
                top: Vec2::new(e.x, hud),
                bottom: Vec2::new(e.x, e.top()),
            })
            .collect()
    }
}
