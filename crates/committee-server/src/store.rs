//! Bounded, expiring store of solutions keyed by job id.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::config::StoreConfig;

struct Entry<V> {
    value: V,
    inserted: Instant,
}

/// Session map with a capacity and a time to live.
///
/// `put` refreshes the age of an existing entry. When a new key arrives at
/// capacity the entry with the oldest insertion time is evicted. Expired
/// entries are purged on every access.
pub struct SessionStore<V> {
    entries: RwLock<HashMap<Uuid, Entry<V>>>,
    capacity: usize,
    time_to_live: Duration,
}

impl<V: Clone> SessionStore<V> {
    pub fn new(capacity: usize, time_to_live: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            capacity: capacity.max(1),
            time_to_live,
        }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(config.capacity, config.time_to_live())
    }

    /// Inserts or replaces the value stored under `id`.
    pub fn put(&self, id: Uuid, value: V) {
        let mut entries = self.entries.write();
        self.purge_expired(&mut entries);

        if !entries.contains_key(&id) && entries.len() >= self.capacity {
            let oldest = entries
                .iter()
                .min_by_key(|(_, entry)| entry.inserted)
                .map(|(key, _)| *key);
            if let Some(oldest) = oldest {
                entries.remove(&oldest);
                debug!(event = "session_evicted", id = %oldest);
            }
        }
        entries.insert(
            id,
            Entry {
                value,
                inserted: Instant::now(),
            },
        );
    }

    /// Replaces the value under `id` only if a live entry is still there.
    ///
    /// Returns false when the entry was evicted, expired or removed.
    pub fn replace(&self, id: Uuid, value: V) -> bool {
        let mut entries = self.entries.write();
        self.purge_expired(&mut entries);
        match entries.get_mut(&id) {
            Some(entry) => {
                entry.value = value;
                entry.inserted = Instant::now();
                true
            }
            None => false,
        }
    }

    /// Returns a clone of the value under `id` unless absent or expired.
    pub fn get(&self, id: &Uuid) -> Option<V> {
        let mut entries = self.entries.write();
        self.purge_expired(&mut entries);
        entries.get(id).map(|entry| entry.value.clone())
    }

    pub fn remove(&self, id: &Uuid) -> Option<V> {
        self.entries.write().remove(id).map(|entry| entry.value)
    }

    pub fn contains(&self, id: &Uuid) -> bool {
        self.get(id).is_some()
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        let mut entries = self.entries.write();
        self.purge_expired(&mut entries);
        entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn purge_expired(&self, entries: &mut HashMap<Uuid, Entry<V>>) {
        let ttl = self.time_to_live;
        entries.retain(|id, entry| {
            let live = entry.inserted.elapsed() < ttl;
            if !live {
                debug!(event = "session_expired", id = %id);
            }
            live
        });
    }
}
