//! Key-value persistence backends
//!
//! The game persists two things: the high score and the settings JSON.
//! Both go through [`KeyValueStore`] so the simulation never touches a
//! concrete storage API.
//!
//! Backends:
//! - [`MemoryStore`]: in-process map (tests, headless runs)
//! - [`JsonFileStore`]: single JSON object on disk (native)
//! - [`LocalStorage`]: browser LocalStorage (wasm32)

mod memory;
#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(target_arch = "wasm32")]
mod local;

pub use memory::MemoryStore;
#[cfg(not(target_arch = "wasm32"))]
pub use file::JsonFileStore;
#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;

/// String key-value storage
///
/// Failures are not fatal to the game: backends log them and report
/// `None`/`false`.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    /// Store a value, returns whether it was written
    fn set(&mut self, key: &str, value: &str) -> bool;

    fn remove(&mut self, key: &str);
}
