//! High score persistence
//!
//! A single integer under a fixed key. Read once when a session starts,
//! written whenever the simulation reports a new high.

use crate::persistence::KeyValueStore;
use crate::sim::GameEvent;

/// Parse a stored high score. Missing or malformed values read as zero;
/// trailing junk after the leading digits is ignored.
pub fn parse_high_score(raw: Option<&str>) -> u64 {
    let Some(raw) = raw else {
        return 0;
    };
    let trimmed = raw.trim();
    let digits_end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    trimmed[..digits_end].parse().unwrap_or(0)
}

/// Keeps the persisted high score in sync with session events
#[derive(Debug)]
pub struct HighScoreStore<S: KeyValueStore> {
    store: S,
    best: u64,
}

impl<S: KeyValueStore> HighScoreStore<S> {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "spysReturnHighScore";

    /// Load the high score from `store`
    pub fn open(store: S) -> Self {
        let best = parse_high_score(store.get(Self::STORAGE_KEY).as_deref());
        log::info!("Loaded high score: {}", best);
        Self { store, best }
    }

    /// The high score as last loaded or saved
    pub fn best(&self) -> u64 {
        self.best
    }

    /// Persist a new value
    pub fn save(&mut self, high_score: u64) {
        self.best = high_score;
        if self.store.set(Self::STORAGE_KEY, &high_score.to_string()) {
            log::debug!("High score saved: {}", high_score);
        }
    }

    /// React to a session event; only high-score changes are persisted
    pub fn observe(&mut self, event: &GameEvent) {
        if let GameEvent::HighScoreChanged { high_score } = *event {
            self.save(high_score);
        }
    }

    pub fn observe_all<'a>(&mut self, events: impl IntoIterator<Item = &'a GameEvent>) {
        for event in events {
            self.observe(event);
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }
}
