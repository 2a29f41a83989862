//! User-supplied catalog API key

use common::LocalStorage;
use tracing::info;

/// Storage key of the API key override
pub const API_KEY_STORAGE_KEY: &str = "tmdb_api_key";

/// Value shipped in sample configuration files; never a usable key
const PLACEHOLDER_KEY: &str = "your_tmdb_api_key_here";

/// Stores an API key entered by the user, which wins over configuration
#[derive(Debug, Clone)]
pub struct ApiKeyStore {
    storage: LocalStorage,
}

impl ApiKeyStore {
    pub fn new(storage: LocalStorage) -> Self {
        Self { storage }
    }

    /// The stored override, if a non-blank one exists
    pub fn get(&self) -> Option<String> {
        usable(self.storage.read::<Option<String>>(API_KEY_STORAGE_KEY, None))
    }

    /// Store an override. A blank key removes it.
    pub fn save(&self, key: &str) {
        let key = key.trim();
        if key.is_empty() {
            info!("Removing stored catalog API key");
            self.storage.remove(API_KEY_STORAGE_KEY);
        } else {
            info!("Storing catalog API key override");
            self.storage.write(API_KEY_STORAGE_KEY, key);
        }
    }

    /// Stored override first, then the configured key
    pub fn resolve(&self, configured: Option<&str>) -> Option<String> {
        self.get()
            .or_else(|| usable(configured.map(str::to_string)))
    }
}

fn usable(key: Option<String>) -> Option<String> {
    key.map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty() && k != PLACEHOLDER_KEY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_wins_over_configured_key() {
        let store = ApiKeyStore::new(LocalStorage::in_memory());
        assert_eq!(store.resolve(Some("configured")), Some("configured".to_string()));

        store.save("  override \n");
        assert_eq!(store.get(), Some("override".to_string()));
        assert_eq!(store.resolve(Some("configured")), Some("override".to_string()));
    }

    #[test]
    fn test_blank_save_clears_override() {
        let store = ApiKeyStore::new(LocalStorage::in_memory());
        store.save("override");
        store.save("   ");
        assert_eq!(store.get(), None);
        assert_eq!(store.resolve(None), None);
    }

    #[test]
    fn test_placeholder_key_is_not_usable() {
        let store = ApiKeyStore::new(LocalStorage::in_memory());
        assert_eq!(store.resolve(Some(PLACEHOLDER_KEY)), None);
        assert_eq!(store.resolve(Some("")), None);
    }
}
