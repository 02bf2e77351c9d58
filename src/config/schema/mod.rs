mod core;
mod gateway;
mod repository;

pub use self::core::Config;
pub use gateway::GatewayConfig;
pub use repository::{RepositoryBackend, RepositoryConfig};
