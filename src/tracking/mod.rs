//! Counter update service.
//!
//! Thin typed layer over the counter store: each operation names the
//! entity kind and counter it touches, so handlers cannot mix them up.
//! The store increment is atomic, so the value returned here is exact
//! even when calls race on the same entity.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error};

use crate::observability::metrics;
use crate::store::{CounterKind, CounterStore, EntityKind, StoreError};

/// Applicant count snapshot for a job, as served by `GET /job-stats`.
#[derive(Debug, Serialize)]
pub struct JobStats {
    pub applicants: u64,
}

/// Applies tracking increments against the configured store.
#[derive(Clone)]
pub struct TrackingService {
    store: Arc<dyn CounterStore>,
}

impl TrackingService {
    pub fn new(store: Arc<dyn CounterStore>) -> Self {
        Self { store }
    }

    /// Count one view of a job listing. Returns the new view count.
    pub async fn record_job_view(&self, job_id: &str) -> Result<u64, StoreError> {
        self.bump(EntityKind::Job, job_id, CounterKind::Views).await
    }

    /// Count one application to a job. Returns the new applicant count.
    pub async fn record_application(&self, job_id: &str) -> Result<u64, StoreError> {
        self.bump(EntityKind::Job, job_id, CounterKind::Applicants)
            .await
    }

    /// Count one view of an exam. Returns the new participant count.
    pub async fn record_exam_view(&self, exam_id: &str) -> Result<u64, StoreError> {
        self.bump(EntityKind::Exam, exam_id, CounterKind::Participants)
            .await
    }

    /// Current applicant count for a job.
    pub async fn job_stats(&self, job_id: &str) -> Result<JobStats, StoreError> {
        let applicants = self
            .store
            .fetch(EntityKind::Job, job_id, CounterKind::Applicants)
            .await?;
        Ok(JobStats { applicants })
    }

    async fn bump(
        &self,
        kind: EntityKind,
        id: &str,
        counter: CounterKind,
    ) -> Result<u64, StoreError> {
        match self.store.increment(kind, id, counter).await {
            Ok(value) => {
                debug!(
                    entity = %id,
                    kind = kind.as_str(),
                    counter = counter.field(),
                    value,
                    "Counter incremented"
                );
                metrics::record_increment(counter.field());
                Ok(value)
            }
            Err(StoreError::NotFound) => Err(StoreError::NotFound),
            Err(e) => {
                error!(
                    entity = %id,
                    kind = kind.as_str(),
                    counter = counter.field(),
                    error = %e,
                    "Counter update failed"
                );
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;

    fn service_with_seed() -> (TrackingService, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        store.insert_job("job-1", 10, 4);
        store.insert_exam("exam-1", 0);
        let dyn_store: Arc<dyn CounterStore> = store.clone();
        (TrackingService::new(dyn_store), store)
    }

    #[tokio::test]
    async fn job_view_increments_views_only() {
        let (service, store) = service_with_seed();

        assert_eq!(service.record_job_view("job-1").await.unwrap(), 11);
        assert_eq!(
            store
                .fetch(EntityKind::Job, "job-1", CounterKind::Applicants)
                .await
                .unwrap(),
            4
        );
    }

    #[tokio::test]
    async fn application_feeds_job_stats() {
        let (service, _store) = service_with_seed();

        assert_eq!(service.record_application("job-1").await.unwrap(), 5);
        let stats = service.job_stats("job-1").await.unwrap();
        assert_eq!(stats.applicants, 5);
    }

    #[tokio::test]
    async fn exam_view_touches_participants() {
        let (service, _store) = service_with_seed();
        assert_eq!(service.record_exam_view("exam-1").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn unknown_entity_is_not_found() {
        let (service, _store) = service_with_seed();
        assert!(matches!(
            service.record_application("ghost").await,
            Err(StoreError::NotFound)
        ));
        assert!(matches!(
            service.job_stats("ghost").await,
            Err(StoreError::NotFound)
        ));
    }
}
