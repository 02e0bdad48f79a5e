//! Shared Redis counter store.
//!
//! One Redis hash per entity (`job:{id}`, `exam:{id}`) with a field per
//! counter. Increments go through `HINCRBY`, which the server applies
//! atomically, so concurrent instances never lose an update. The
//! existence check and the increment are two round trips; a row created
//! in between is simply counted.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::{AsyncCommands, Client};
use tracing::info;

use crate::store::{CounterKind, CounterStore, EntityKind, StoreError};

/// Counter store backed by a shared Redis instance.
#[derive(Clone)]
pub struct RedisStore {
    connection: ConnectionManager,
}

impl RedisStore {
    /// Connect with bounded retries and a short connect timeout.
    pub async fn connect(redis_url: &str) -> Result<Self, StoreError> {
        let config = ConnectionManagerConfig::new()
            .set_number_of_retries(2)
            .set_connection_timeout(Duration::from_millis(500));

        let client = Client::open(redis_url).map_err(|e| StoreError::Backend(Box::new(e)))?;
        let connection = client
            .get_connection_manager_with_config(config)
            .await
            .map_err(|e| StoreError::Backend(Box::new(e)))?;

        info!("Connected to Redis counter store");
        Ok(Self { connection })
    }

    fn entity_key(kind: EntityKind, id: &str) -> String {
        format!("{}:{}", kind.as_str(), id)
    }
}

#[async_trait]
impl CounterStore for RedisStore {
    async fn increment(
        &self,
        kind: EntityKind,
        id: &str,
        counter: CounterKind,
    ) -> Result<u64, StoreError> {
        let key = Self::entity_key(kind, id);
        let mut connection = self.connection.clone();

        let exists: bool = connection
            .exists(&key)
            .await
            .map_err(|e| StoreError::Backend(Box::new(e)))?;
        if !exists {
            return Err(StoreError::NotFound);
        }

        let value: i64 = connection
            .hincr(&key, counter.field(), 1)
            .await
            .map_err(|e| StoreError::Backend(Box::new(e)))?;
        Ok(value.max(0) as u64)
    }

    async fn fetch(
        &self,
        kind: EntityKind,
        id: &str,
        counter: CounterKind,
    ) -> Result<u64, StoreError> {
        let key = Self::entity_key(kind, id);
        let mut connection = self.connection.clone();

        let exists: bool = connection
            .exists(&key)
            .await
            .map_err(|e| StoreError::Backend(Box::new(e)))?;
        if !exists {
            return Err(StoreError::NotFound);
        }

        let value: Option<i64> = connection
            .hget(&key, counter.field())
            .await
            .map_err(|e| StoreError::Backend(Box::new(e)))?;
        Ok(value.unwrap_or(0).max(0) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_keys_are_namespaced_by_kind() {
        assert_eq!(RedisStore::entity_key(EntityKind::Job, "42"), "job:42");
        assert_eq!(RedisStore::entity_key(EntityKind::Exam, "42"), "exam:42");
    }
}
