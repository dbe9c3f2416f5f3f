use std::collections::HashMap;
use std::fmt::Display;
use std::sync::{Arc, RwLock};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Details(u64),
    Trailer(u64),
    Trending,
}

impl Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheKey::Details(id) => write!(f, "details:{}", id),
            CacheKey::Trailer(id) => write!(f, "trailer:{}", id),
            CacheKey::Trending => write!(f, "trending:week"),
        }
    }
}

/// Process-lifetime memoization cache for metadata lookups
///
/// Source data is immutable per process run, so entries never expire and
/// there is no eviction. Values are stored as JSON so repeated hits return
/// bit-identical payloads.
#[derive(Clone, Default)]
pub struct Cache {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl Cache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Retrieves and deserializes a cached value, `None` on miss
    ///
    /// A value that fails to deserialize is treated as a miss and logged;
    /// the caller will recompute and overwrite it.
    pub fn get<T: serde::de::DeserializeOwned>(&self, key: &CacheKey) -> Option<T> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        let json = entries.get(&key.to_string())?;
        match serde_json::from_str(json) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::error!(key = %key, error = %e, "Cache deserialization error");
                None
            }
        }
    }

    /// Serializes and stores a value under the key
    pub fn insert<T: serde::Serialize>(&self, key: &CacheKey, value: &T) {
        let json = match serde_json::to_string(value) {
            Ok(j) => j,
            Err(e) => {
                tracing::error!(key = %key, error = %e, "Cache serialization error");
                return;
            }
        };

        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), json);
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
