//! Outbound collaborator that receives compiled registration statements.

mod factory;
mod sqlite;

pub use factory::create_repository;
pub use sqlite::{SqliteJobRepository, SubmittedStatement};

use crate::error::RepositoryError;
use async_trait::async_trait;

/// Accepts a compiled statement and acknowledges it.
///
/// Called once per compiled job; implementations own any retry policy.
#[async_trait]
pub trait JobRepository: Send + Sync {
    fn name(&self) -> &str;

    /// Returns the number of records written.
    async fn submit(&self, statement: &str) -> Result<u64, RepositoryError>;
}

/// Acknowledges every statement without storing it.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopJobRepository;

#[async_trait]
impl JobRepository for NoopJobRepository {
    fn name(&self) -> &str {
        "none"
    }

    async fn submit(&self, statement: &str) -> Result<u64, RepositoryError> {
        tracing::debug!(bytes = statement.len(), "statement discarded by no-op repository");
        Ok(1)
    }
}
