//! Bounded worker pool with a hard per-job deadline.
//!
//! Jobs run on spawned tokio tasks, at most `workers` at a time. The
//! deadline covers both waiting for a free worker and running the job.
//! When it elapses the caller gets [`ServiceError::WorkerTimeout`]; the
//! job itself is not cancelled and keeps its worker until it finishes.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;

use crate::error::{Result, ServiceError};

/// A fixed-size pool of query workers.
#[derive(Clone)]
pub struct WorkerPool {
    permits: Arc<Semaphore>,
    timeout: Duration,
}

impl WorkerPool {
    pub fn new(workers: usize, timeout: Duration) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(workers)),
            timeout,
        }
    }

    /// Workers not currently running a job.
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }

    /// Run `job` on a pooled worker and wait for its output.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::WorkerTimeout`] if the deadline passes, or
    /// [`ServiceError::WorkerFailed`] if the job panics.
    pub async fn run<F, T>(&self, job: F) -> Result<T>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let permits = Arc::clone(&self.permits);
        let dispatch = async move {
            let permit = permits
                .acquire_owned()
                .await
                .map_err(|e| ServiceError::WorkerFailed(format!("worker pool closed: {e}")))?;
            let handle = tokio::spawn(async move {
                let _permit = permit;
                job.await
            });
            handle
                .await
                .map_err(|e| ServiceError::WorkerFailed(e.to_string()))
        };

        match tokio::time::timeout(self.timeout, dispatch).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(timeout_secs = self.timeout.as_secs(), "worker job timed out");
                Err(ServiceError::WorkerTimeout(self.timeout.as_secs()))
            }
        }
    }
}
