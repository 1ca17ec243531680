//! Browser LocalStorage backend

use super::KeyValueStore;

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> bool {
        match Self::storage() {
            Some(storage) => {
                if storage.set_item(key, value).is_ok() {
                    true
                } else {
                    log::warn!("LocalStorage rejected write to {}", key);
                    false
                }
            }
            None => {
                log::warn!("LocalStorage unavailable");
                false
            }
        }
    }

    fn remove(&mut self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}
