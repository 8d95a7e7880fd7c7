//! Deadline for store units of work
//!
//! Dropping a timed-out future drops any open transaction with it, which rolls
//! it back, so a timeout never leaves a partial write behind.

use std::future::Future;
use std::time::Duration;

use chatstream_core::{DomainError, RepoResult};
use tracing::warn;

use super::error::{ServiceError, ServiceResult};

/// Run one store operation under `deadline`
pub async fn with_deadline<T, F>(deadline: Duration, operation: &'static str, fut: F) -> ServiceResult<T>
where
    F: Future<Output = RepoResult<T>>,
{
    match tokio::time::timeout(deadline, fut).await {
        Ok(result) => result.map_err(ServiceError::from),
        Err(_) => {
            warn!(
                operation,
                kind = DomainError::StoreTimeout.code(),
                deadline_ms = deadline.as_millis() as u64,
                "Store unit of work exceeded deadline"
            );
            Err(DomainError::StoreTimeout.into())
        }
    }
}
