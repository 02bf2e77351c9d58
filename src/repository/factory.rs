use super::{JobRepository, NoopJobRepository, SqliteJobRepository};
use crate::config::{Config, RepositoryBackend};
use crate::error::RepositoryError;
use std::sync::Arc;

/// Build the repository selected by `[repository] backend`.
pub async fn create_repository(config: &Config) -> Result<Arc<dyn JobRepository>, RepositoryError> {
    match config.repository.backend {
        RepositoryBackend::None => Ok(Arc::new(NoopJobRepository)),
        RepositoryBackend::Sqlite => {
            let path = config.outbox_path();
            let repository = SqliteJobRepository::open(&path).await?;
            tracing::info!(path = %path.display(), "statement outbox ready");
            Ok(Arc::new(repository))
        }
    }
}
