//! In-memory cache for directory list queries.
//!
//! Entries never expire on their own. A successful mutation marks the
//! affected key stale and the next read re-fetches.
//!
//! Every invalidation also bumps a generation counter. A fetch that started
//! before an invalidation stores its result as stale, so the mutation is
//! never masked by a list read from before it.

use std::collections::HashMap;
use std::sync::Arc;

use crate::models::user::UserRecord;

/// Query key of the user directory list.
pub const USERS_KEY: &str = "users";

#[derive(Debug, Clone)]
struct CacheEntry {
    users: Arc<Vec<UserRecord>>,
    stale: bool,
}

/// List cache keyed by query key.
#[derive(Debug, Default)]
pub struct UserListCache {
    entries: HashMap<String, CacheEntry>,
    generation: u64,
}

impl UserListCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the cached list if present and not stale.
    pub fn get(&self, key: &str) -> Option<Arc<Vec<UserRecord>>> {
        self.entries
            .get(key)
            .filter(|entry| !entry.stale)
            .map(|entry| Arc::clone(&entry.users))
    }

    /// Last fetched list, even if stale.
    pub fn peek(&self, key: &str) -> Option<Arc<Vec<UserRecord>>> {
        self.entries.get(key).map(|entry| Arc::clone(&entry.users))
    }

    /// Store a freshly fetched list and return the shared handle.
    pub fn set(&mut self, key: &str, users: Vec<UserRecord>) -> Arc<Vec<UserRecord>> {
        self.store(key, users, self.generation)
    }

    /// Current generation. Take it before fetching and hand it to
    /// [`store`](Self::store).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Store a list fetched at `generation`. Fresh only if nothing was
    /// invalidated since. An outdated list never replaces an existing entry.
    pub fn store(
        &mut self,
        key: &str,
        users: Vec<UserRecord>,
        generation: u64,
    ) -> Arc<Vec<UserRecord>> {
        let users = Arc::new(users);
        let current = generation == self.generation;
        if current || !self.entries.contains_key(key) {
            self.entries.insert(
                key.to_string(),
                CacheEntry {
                    users: Arc::clone(&users),
                    stale: !current,
                },
            );
        }
        users
    }

    /// Mark an entry stale. The data stays available through [`peek`](Self::peek).
    /// The generation moves on even when no entry exists yet.
    pub fn invalidate(&mut self, key: &str) {
        self.generation += 1;
        if let Some(entry) = self.entries.get_mut(key) {
            entry.stale = true;
        }
    }

    pub fn is_stale(&self, key: &str) -> bool {
        self.entries.get(key).is_none_or(|entry| entry.stale)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_returns_none_for_missing_key() {
        let cache = UserListCache::new();
        assert!(cache.get(USERS_KEY).is_none());
        assert!(cache.is_stale(USERS_KEY));
    }

    #[test]
    fn set_returns_the_cached_allocation() {
        let mut cache = UserListCache::new();
        let stored = cache.set(USERS_KEY, Vec::new());
        let read = cache.get(USERS_KEY).unwrap();
        assert!(Arc::ptr_eq(&stored, &read));
    }

    #[test]
    fn invalidate_hides_entry_but_keeps_it_peekable() {
        let mut cache = UserListCache::new();
        cache.set(USERS_KEY, Vec::new());
        cache.invalidate(USERS_KEY);
        assert!(cache.get(USERS_KEY).is_none());
        assert!(cache.peek(USERS_KEY).is_some());
        assert!(cache.is_stale(USERS_KEY));
    }

    #[test]
    fn set_after_invalidate_is_fresh_again() {
        let mut cache = UserListCache::new();
        cache.set(USERS_KEY, Vec::new());
        cache.invalidate(USERS_KEY);
        cache.set(USERS_KEY, Vec::new());
        assert!(cache.get(USERS_KEY).is_some());
    }

    #[test]
    fn store_from_older_generation_stays_stale() {
        let mut cache = UserListCache::new();
        let generation = cache.generation();
        cache.invalidate(USERS_KEY);

        cache.store(USERS_KEY, Vec::new(), generation);
        assert!(cache.get(USERS_KEY).is_none());
        assert!(cache.peek(USERS_KEY).is_some());

        let generation = cache.generation();
        cache.store(USERS_KEY, Vec::new(), generation);
        assert!(cache.get(USERS_KEY).is_some());
    }

    #[test]
    fn clear_removes_all_entries() {
        let mut cache = UserListCache::new();
        cache.set(USERS_KEY, Vec::new());
        cache.clear();
        assert!(cache.peek(USERS_KEY).is_none());
    }
}
