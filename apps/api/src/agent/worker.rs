//! Bounded offload for blocking vendor calls.
//!
//! Adapters perform their HTTP round-trip with a blocking client. Running that
//! on an executor thread would stall every other request, so each call is
//! handed to `spawn_blocking` behind a semaphore that caps how many run at once.
//! Dropping the awaiting future does not interrupt a worker already running.

use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::agent::error::AgentError;
use crate::agent::providers::Vendor;

pub const DEFAULT_WORKER_LIMIT: usize = 8;

#[derive(Debug, Clone)]
pub struct WorkerPool {
    permits: Arc<Semaphore>,
    limit: usize,
}

impl WorkerPool {
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            permits: Arc::new(Semaphore::new(limit)),
            limit,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Runs `job` on the blocking pool once a permit is free.
    /// The permit is held by the worker, so it is released only when the job ends.
    pub async fn run<T, F>(&self, vendor: Vendor, job: F) -> Result<T, AgentError>
    where
        F: FnOnce() -> Result<T, AgentError> + Send + 'static,
        T: Send + 'static,
    {
        let permit = self
            .permits
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| AgentError::provider(vendor, "worker pool is closed"))?;

        tokio::task::spawn_blocking(move || {
            let _permit = permit;
            job()
        })
        .await
        .map_err(|e| AgentError::provider(vendor, format!("worker task failed: {e}")))?
    }
}

impl Default for WorkerPool {
    fn default() -> Self {
        Self::new(DEFAULT_WORKER_LIMIT)
    }
}
