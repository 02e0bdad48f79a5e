//! Process-local counter store.
//!
//! Backed by a concurrent map; an increment mutates the entry under its
//! shard lock, so concurrent increments against the same entity cannot
//! lose updates. Counts reset on restart, which is acceptable for dev
//! and tests but not for a multi-instance deployment.

use async_trait::async_trait;
use dashmap::DashMap;

use crate::store::{CounterKind, CounterStore, EntityKind, StoreError};

#[derive(Debug, Default)]
struct Counters {
    views: u64,
    applicants: u64,
    participants: u64,
}

impl Counters {
    fn slot_mut(&mut self, counter: CounterKind) -> &mut u64 {
        match counter {
            CounterKind::Views => &mut self.views,
            CounterKind::Applicants => &mut self.applicants,
            CounterKind::Participants => &mut self.participants,
        }
    }

    fn slot(&self, counter: CounterKind) -> u64 {
        match counter {
            CounterKind::Views => self.views,
            CounterKind::Applicants => self.applicants,
            CounterKind::Participants => self.participants,
        }
    }
}

/// In-memory counter store, seedable for tests and local runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entities: DashMap<(EntityKind, String), Counters>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a job with starting counter values.
    pub fn insert_job(&self, id: &str, views: u64, applicants: u64) {
        self.entities.insert(
            (EntityKind::Job, id.to_string()),
            Counters {
                views,
                applicants,
                participants: 0,
            },
        );
    }

    /// Register an exam with a starting participant count.
    pub fn insert_exam(&self, id: &str, participants: u64) {
        self.entities.insert(
            (EntityKind::Exam, id.to_string()),
            Counters {
                views: 0,
                applicants: 0,
                participants,
            },
        );
    }
}

#[async_trait]
impl CounterStore for MemoryStore {
    async fn increment(
        &self,
        kind: EntityKind,
        id: &str,
        counter: CounterKind,
    ) -> Result<u64, StoreError> {
        match self.entities.get_mut(&(kind, id.to_string())) {
            Some(mut entry) => {
                let slot = entry.slot_mut(counter);
                *slot += 1;
                Ok(*slot)
            }
            None => Err(StoreError::NotFound),
        }
    }

    async fn fetch(
        &self,
        kind: EntityKind,
        id: &str,
        counter: CounterKind,
    ) -> Result<u64, StoreError> {
        self.entities
            .get(&(kind, id.to_string()))
            .map(|entry| entry.slot(counter))
            .ok_or(StoreError::NotFound)
    }
}
