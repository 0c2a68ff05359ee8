//! Document store for cueup records.
//!
//! The store exposes four operations per collection: `insert` (atomic
//! uniqueness check on declared unique fields), `find_by_id`,
//! `delete_by_id`, and `find_matching` — one conjunctive predicate plus
//! page parameters in, matching page plus total count out. Handlers never
//! filter result sets themselves; every list query is a single
//! `find_matching` call.
//!
//! `MemoryStore` is the in-process implementation: insertion-ordered
//! collections behind async RwLocks, with a unique index on user email.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::RwLock;

use cueup_core::{Pageable, Routine, Score, User};

// ============================================================================
// ERRORS
// ============================================================================

/// Storage layer errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("duplicate value for unique field {field}")]
    Duplicate { field: &'static str },
}

// ============================================================================
// RECORDS
// ============================================================================

/// A storable record: anything with a stable string id.
pub trait Record: Clone + Send + Sync + 'static {
    fn id(&self) -> &str;
}

impl Record for User {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Routine {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Score {
    fn id(&self) -> &str {
        &self.id
    }
}

// ============================================================================
// COLLECTION
// ============================================================================

/// One insertion-ordered collection of records.
pub struct MemoryCollection<T: Record> {
    name: &'static str,
    /// Unique index: field name plus key extractor, checked inside the
    /// write lock so concurrent duplicate inserts cannot both succeed.
    unique: Option<(&'static str, fn(&T) -> &str)>,
    records: RwLock<Vec<T>>,
}

impl<T: Record> MemoryCollection<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            unique: None,
            records: RwLock::new(Vec::new()),
        }
    }

    pub fn with_unique_index(name: &'static str, field: &'static str, key: fn(&T) -> &str) -> Self {
        Self {
            name,
            unique: Some((field, key)),
            records: RwLock::new(Vec::new()),
        }
    }

    /// Insert a record, enforcing the collection's unique index.
    pub async fn insert(&self, record: T) -> Result<T, StoreError> {
        let mut records = self.records.write().await;
        if let Some((field, key)) = self.unique {
            if records.iter().any(|existing| key(existing) == key(&record)) {
                return Err(StoreError::Duplicate { field });
            }
        }
        tracing::debug!(collection = self.name, id = record.id(), "insert");
        records.push(record.clone());
        Ok(record)
    }

    pub async fn find_by_id(&self, id: &str) -> Option<T> {
        let records = self.records.read().await;
        records.iter().find(|record| record.id() == id).cloned()
    }

    /// Look up a single record by an arbitrary predicate (e.g. email).
    pub async fn find_one(&self, matches: impl Fn(&T) -> bool) -> Option<T> {
        let records = self.records.read().await;
        records.iter().find(|record| matches(record)).cloned()
    }

    /// Apply one conjunctive predicate and page window in a single call.
    /// Returns the requested page in the collection's native order plus the
    /// total matching count.
    pub async fn find_matching(
        &self,
        matches: impl Fn(&T) -> bool,
        pageable: Pageable,
    ) -> (Vec<T>, u64) {
        let records = self.records.read().await;
        let matching: Vec<&T> = records.iter().filter(|record| matches(record)).collect();
        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(pageable.offset())
            .take(pageable.page_size as usize)
            .cloned()
            .collect();
        (items, total)
    }

    /// Delete by id. Idempotent; returns whether a record was removed.
    pub async fn delete_by_id(&self, id: &str) -> bool {
        self.delete_if(id, |_| true).await
    }

    /// Delete by id, but only when the record also satisfies `allowed` —
    /// the owner-conditional variant used for score deletion.
    pub async fn delete_if(&self, id: &str, allowed: impl Fn(&T) -> bool) -> bool {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|record| !(record.id() == id && allowed(record)));
        let removed = records.len() != before;
        if removed {
            tracing::debug!(collection = self.name, id, "delete");
        }
        removed
    }
}

// ============================================================================
// STORE
// ============================================================================

/// The full document store: one collection per record type.
pub struct MemoryStore {
    pub users: MemoryCollection<User>,
    pub routines: MemoryCollection<Routine>,
    pub scores: MemoryCollection<Score>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            users: MemoryCollection::with_unique_index("users", "email", |user: &User| {
                &user.email
            }),
            routines: MemoryCollection::new("routines"),
            scores: MemoryCollection::new("scores"),
        }
    }

    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str, email: &str) -> User {
        User {
            id: id.to_string(),
            first_name: "Mark".to_string(),
            last_name: "Williams".to_string(),
            email: email.to_string(),
            password_hash: String::new(),
            is_admin: false,
        }
    }

    fn score(id: &str, value: i32) -> Score {
        Score {
            id: id.to_string(),
            value,
            routine_id: "r1".to_string(),
            user_id: "u1".to_string(),
            date_time: cueup_core::now_to_minute(),
            cushion_limit: None,
            colours: None,
            num_balls: None,
            looped: false,
        }
    }

    #[tokio::test]
    async fn test_insert_and_find_by_id() {
        let store = MemoryStore::new();
        store.users.insert(user("u1", "a@example.com")).await.unwrap();

        let found = store.users.find_by_id("u1").await.unwrap();
        assert_eq!(found.email, "a@example.com");
        assert!(store.users.find_by_id("missing").await.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let store = MemoryStore::new();
        store.users.insert(user("u1", "a@example.com")).await.unwrap();

        let err = store
            .users
            .insert(user("u2", "a@example.com"))
            .await
            .unwrap_err();
        assert_eq!(err, StoreError::Duplicate { field: "email" });

        // The losing insert must not have been applied.
        assert!(store.users.find_by_id("u2").await.is_none());
    }

    #[tokio::test]
    async fn test_concurrent_duplicate_inserts_one_winner() {
        let store = Arc::new(MemoryStore::new());
        let mut handles = Vec::new();
        for i in 0..8 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .users
                    .insert(user(&format!("u{}", i), "same@example.com"))
                    .await
            }));
        }

        let mut wins = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                wins += 1;
            }
        }
        assert_eq!(wins, 1);
    }

    #[tokio::test]
    async fn test_find_matching_pages_in_insertion_order() {
        let store = MemoryStore::new();
        for i in 0..3 {
            store.scores.insert(score(&format!("s{}", i), i)).await.unwrap();
        }

        let (page0, total) = store
            .scores
            .find_matching(|_| true, Pageable::new(0, 2))
            .await;
        assert_eq!(total, 3);
        assert_eq!(
            page0.iter().map(|s| s.id.as_str()).collect::<Vec<_>>(),
            ["s0", "s1"]
        );

        let (page1, total) = store
            .scores
            .find_matching(|_| true, Pageable::new(1, 2))
            .await;
        assert_eq!(total, 3);
        assert_eq!(
            page1.iter().map(|s| s.id.as_str()).collect::<Vec<_>>(),
            ["s2"]
        );
    }

    #[tokio::test]
    async fn test_find_matching_counts_all_matches_not_just_page() {
        let store = MemoryStore::new();
        for i in 0..5 {
            store.scores.insert(score(&format!("s{}", i), i)).await.unwrap();
        }

        let (items, total) = store
            .scores
            .find_matching(|s| s.value >= 1, Pageable::new(0, 2))
            .await;
        assert_eq!(items.len(), 2);
        assert_eq!(total, 4);
    }

    #[tokio::test]
    async fn test_delete_if_respects_condition() {
        let store = MemoryStore::new();
        store.scores.insert(score("s1", 10)).await.unwrap();

        assert!(!store.scores.delete_if("s1", |s| s.user_id == "u2").await);
        assert!(store.scores.find_by_id("s1").await.is_some());

        assert!(store.scores.delete_if("s1", |s| s.user_id == "u1").await);
        assert!(store.scores.find_by_id("s1").await.is_none());

        // Deleting again is a quiet no-op.
        assert!(!store.scores.delete_by_id("s1").await);
    }
}
