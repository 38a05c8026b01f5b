//! In-Memory Repository Implementations
//!
//! Simple in-memory implementations of the repository traits, used by the
//! CLI and by the application-layer tests.
//!
//! Each table is an `Arc<RwLock<..>>`, so cloning a repository hands out
//! another view of the same rows. Rows remember their insertion order to
//! keep listings stable when timestamps tie.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use skillswap_domain::RepositoryError;

mod account;
mod exchange;
mod notification;
mod offer;

pub use account::{
    InMemoryRatingRepository, InMemorySkillCatalog, InMemorySkillWantedRepository,
    InMemoryUserRepository, InMemoryUserSkillRepository,
};
pub use exchange::{
    InMemoryExchangeRequestRepository, InMemoryFeedbackRepository, InMemorySessionRepository,
};
pub use notification::InMemoryNotificationRepository;
pub use offer::{InMemoryBookingRepository, InMemoryOfferRepository};

/// Rows keyed by id, plus their insertion sequence
#[derive(Debug)]
pub(crate) struct Rows<K, V> {
    next_seq: u64,
    rows: HashMap<K, (u64, V)>,
}

impl<K: Eq + Hash, V> Rows<K, V> {
    pub(crate) fn insert(&mut self, key: K, value: V) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.rows.insert(key, (seq, value));
    }

    /// Overwrite an existing row in place. Returns false if it is missing.
    pub(crate) fn replace(&mut self, key: &K, value: V) -> bool {
        match self.rows.get_mut(key) {
            Some(slot) => {
                slot.1 = value;
                true
            }
            None => false,
        }
    }

    pub(crate) fn remove(&mut self, key: &K) -> Option<V> {
        self.rows.remove(key).map(|(_, value)| value)
    }

    pub(crate) fn get(&self, key: &K) -> Option<&V> {
        self.rows.get(key).map(|(_, value)| value)
    }

    pub(crate) fn contains_key(&self, key: &K) -> bool {
        self.rows.contains_key(key)
    }

    pub(crate) fn values(&self) -> impl Iterator<Item = &V> {
        self.rows.values().map(|(_, value)| value)
    }

    /// First row matching `pred`, cloned out of the table
    pub(crate) fn find(&self, pred: impl Fn(&V) -> bool) -> Option<V>
    where
        V: Clone,
    {
        self.values().find(|v| pred(v)).cloned()
    }

    /// Values matching `keep`, oldest insert first
    pub(crate) fn select(&self, keep: impl Fn(&V) -> bool) -> Vec<V>
    where
        V: Clone,
    {
        let mut hits: Vec<&(u64, V)> = self.rows.values().filter(|(_, v)| keep(v)).collect();
        hits.sort_by_key(|(seq, _)| *seq);
        hits.into_iter().map(|(_, v)| v.clone()).collect()
    }
}

/// A shared, lock-guarded table
#[derive(Debug)]
pub(crate) struct Table<K, V> {
    inner: Arc<RwLock<Rows<K, V>>>,
}

impl<K, V> Clone for Table<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> Default for Table<K, V> {
    fn default() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Rows {
                next_seq: 0,
                rows: HashMap::new(),
            })),
        }
    }
}

impl<K, V> Table<K, V> {
    pub(crate) fn read(&self) -> Result<RwLockReadGuard<'_, Rows<K, V>>, RepositoryError> {
        self.inner.read().map_err(|_| RepositoryError::Persistence {
            message: "Failed to acquire read lock".to_string(),
        })
    }

    pub(crate) fn write(&self) -> Result<RwLockWriteGuard<'_, Rows<K, V>>, RepositoryError> {
        self.inner.write().map_err(|_| RepositoryError::Persistence {
            message: "Failed to acquire write lock".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_keeps_insertion_order() {
        let table: Table<u32, &str> = Table::default();
        {
            let mut rows = table.write().unwrap();
            rows.insert(30, "c");
            rows.insert(10, "a");
            rows.insert(20, "b");
        }

        let rows = table.read().unwrap();
        assert_eq!(rows.select(|_| true), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_replace_missing_row() {
        let table: Table<u32, &str> = Table::default();
        let mut rows = table.write().unwrap();
        assert!(!rows.replace(&1, "x"));
        rows.insert(1, "x");
        assert!(rows.replace(&1, "y"));
        assert_eq!(rows.get(&1), Some(&"y"));
    }

    #[test]
    fn test_find_clones_first_match() {
        let table: Table<u32, String> = Table::default();
        {
            let mut rows = table.write().unwrap();
            rows.insert(1, "guitar".to_string());
            rows.insert(2, "piano".to_string());
        }

        let found = table.read().unwrap().find(|v| v.starts_with('p'));
        assert_eq!(found.as_deref(), Some("piano"));
        assert_eq!(table.read().unwrap().find(|v| v.is_empty()), None);
    }

    #[test]
    fn test_clones_share_rows() {
        let table: Table<u32, &str> = Table::default();
        let view = table.clone();
        table.write().unwrap().insert(1, "x");
        assert!(view.read().unwrap().contains_key(&1));
    }
}
