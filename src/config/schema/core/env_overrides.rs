use super::Config;
use crate::config::RepositoryBackend;

impl Config {
    pub fn apply_env_overrides(&mut self) {
        if let Ok(port_str) =
            std::env::var("PURGECRON_GATEWAY_PORT").or_else(|_| std::env::var("PORT"))
            && let Ok(port) = port_str.parse::<u16>()
        {
            self.gateway.port = port;
        }

        if let Ok(host) =
            std::env::var("PURGECRON_GATEWAY_HOST").or_else(|_| std::env::var("HOST"))
            && !host.is_empty()
        {
            self.gateway.host = host;
        }

        if let Ok(days_str) = std::env::var("PURGECRON_MIN_DAYS")
            && let Ok(days) = days_str.parse::<i64>()
        {
            self.retention.min_days = days;
        }

        if let Ok(limit_str) = std::env::var("PURGECRON_MIN_LIMIT")
            && let Ok(limit) = limit_str.parse::<i64>()
        {
            self.retention.min_limit = limit;
        }

        if let Ok(backend) = std::env::var("PURGECRON_REPOSITORY") {
            match RepositoryBackend::from_name(&backend) {
                Some(backend) => self.repository.backend = backend,
                None => tracing::warn!(backend, "ignoring unknown PURGECRON_REPOSITORY"),
            }
        }
    }
}
