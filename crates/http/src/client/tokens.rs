//! Stored bearer token pair and its storage backends

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Mutex;

/// Storage key for the access token
pub const ACCESS_TOKEN_KEY: &str = "access_token";
/// Storage key for the refresh token
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// Access/refresh bearer token pair
///
/// Both halves are opaque strings; absence of either means "no session".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Persisted token storage
///
/// Implementations do not validate token contents. `save` and `clear` are
/// best-effort: when the backing storage is unavailable they do nothing and
/// `get` returns `None`.
pub trait TokenStore: Send + Sync {
    /// Read the stored pair, if both halves are present
    fn get(&self) -> Option<TokenPair>;

    /// Persist the pair, replacing any previous one
    fn save(&self, tokens: &TokenPair);

    /// Remove any stored pair
    fn clear(&self);
}

/// In-process token store
#[derive(Default)]
pub struct MemoryTokenStore {
    tokens: Mutex<Option<TokenPair>>,
}

impl MemoryTokenStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store preloaded with a pair
    pub fn with_tokens(tokens: TokenPair) -> Self {
        Self {
            tokens: Mutex::new(Some(tokens)),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<TokenPair> {
        self.tokens.lock().expect("token store lock poisoned").clone()
    }

    fn save(&self, tokens: &TokenPair) {
        *self.tokens.lock().expect("token store lock poisoned") = Some(tokens.clone());
    }

    fn clear(&self) {
        *self.tokens.lock().expect("token store lock poisoned") = None;
    }
}

/// File-backed token store
///
/// Persists the two values as a JSON object keyed by [`ACCESS_TOKEN_KEY`]
/// and [`REFRESH_TOKEN_KEY`].
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Option<TokenPair> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        let values: BTreeMap<String, String> = serde_json::from_str(&raw).ok()?;
        let access = values.get(ACCESS_TOKEN_KEY)?;
        let refresh = values.get(REFRESH_TOKEN_KEY)?;
        Some(TokenPair {
            access: access.clone(),
            refresh: refresh.clone(),
        })
    }

    fn save(&self, tokens: &TokenPair) {
        let mut values = BTreeMap::new();
        values.insert(ACCESS_TOKEN_KEY.to_string(), tokens.access.clone());
        values.insert(REFRESH_TOKEN_KEY.to_string(), tokens.refresh.clone());

        if let Some(parent) = self.path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                tracing::warn!("Token storage unavailable: {}", e);
                return;
            }
        }
        match serde_json::to_string(&values) {
            Ok(serialized) => {
                if let Err(e) = std::fs::write(&self.path, serialized) {
                    tracing::warn!("Failed to persist tokens: {}", e);
                }
            }
            Err(e) => tracing::warn!("Failed to serialize tokens: {}", e),
        }
    }

    fn clear(&self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!("Failed to clear stored tokens: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(access: &str, refresh: &str) -> TokenPair {
        TokenPair {
            access: access.to_string(),
            refresh: refresh.to_string(),
        }
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryTokenStore::new();
        assert!(store.get().is_none());

        store.save(&pair("a", "r"));
        assert_eq!(store.get(), Some(pair("a", "r")));

        store.clear();
        assert!(store.get().is_none());
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("tokens.json"));
        assert!(store.get().is_none());

        store.save(&pair("a", "r"));
        assert_eq!(store.get(), Some(pair("a", "r")));

        store.clear();
        assert!(store.get().is_none());
        // Clearing twice is fine
        store.clear();
    }

    #[test]
    fn test_file_store_uses_fixed_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.json");
        let store = FileTokenStore::new(&path);
        store.save(&pair("a", "r"));

        let raw = std::fs::read_to_string(&path).unwrap();
        let values: BTreeMap<String, String> = serde_json::from_str(&raw).unwrap();
        assert_eq!(values.get(ACCESS_TOKEN_KEY).map(String::as_str), Some("a"));
        assert_eq!(values.get(REFRESH_TOKEN_KEY).map(String::as_str), Some("r"));
    }

    #[test]
    fn test_file_store_partial_content_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.json");
        std::fs::write(&path, r#"{"access_token": "a"}"#).unwrap();

        let store = FileTokenStore::new(&path);
        assert!(store.get().is_none());
    }
}
