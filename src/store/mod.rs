//! Counter storage subsystem.
//!
//! # Data Flow
//! ```text
//! tracking service
//!     → CounterStore trait (atomic increment / fetch)
//!         → memory.rs (DashMap, single instance, dev & tests)
//!         → redis.rs  (shared hash per entity, HINCRBY, multi-instance)
//! ```
//!
//! # Design Decisions
//! - Increments are atomic in the backend; a fetch-then-set pair would
//!   silently lose updates when two requests race on the same entity
//! - Incrementing a missing entity is an error, not an implicit create;
//!   rows are owned by the job-board proper, this service only counts

pub mod memory;
pub mod redis;

use async_trait::async_trait;
use thiserror::Error;

/// Kind of parent entity a counter lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Job,
    Exam,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Job => "job",
            EntityKind::Exam => "exam",
        }
    }
}

/// Which cumulative counter on the entity to touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterKind {
    Views,
    Applicants,
    Participants,
}

impl CounterKind {
    /// Field name, used for storage fields and metric labels.
    pub fn field(self) -> &'static str {
        match self {
            CounterKind::Views => "views",
            CounterKind::Applicants => "applicants",
            CounterKind::Participants => "participants",
        }
    }
}

/// Errors surfaced by a counter store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("entity not found")]
    NotFound,

    #[error("storage backend error: {0}")]
    Backend(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Storage seam for cumulative counters.
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Atomically add one to a counter and return the new value.
    ///
    /// Fails with [`StoreError::NotFound`] (and writes nothing) when the
    /// entity does not exist.
    async fn increment(
        &self,
        kind: EntityKind,
        id: &str,
        counter: CounterKind,
    ) -> Result<u64, StoreError>;

    /// Read a counter's current value.
    async fn fetch(
        &self,
        kind: EntityKind,
        id: &str,
        counter: CounterKind,
    ) -> Result<u64, StoreError>;
}
