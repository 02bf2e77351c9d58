//! Axum-based HTTP gateway for compiling and submitting cleanup jobs.
//!
//! - Request body size limits (64KB max)
//! - Request timeouts (30s)
//! - Loopback-only bind unless `allow_public_bind` is set

mod handlers;
mod server;

pub use server::{build_app, run_gateway, run_gateway_with_listener};

use crate::compiler::{Adjustment, JobCompiler};
use crate::repository::JobRepository;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub use handlers::{handle_create_job, handle_health, handle_lookup, handle_preview};

/// Maximum request body size (64KB), bounds memory per request
pub const MAX_BODY_SIZE: usize = 65_536;
/// Request timeout (30s), drops slow clients
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Shared state for all axum handlers
#[derive(Clone)]
pub struct AppState {
    pub compiler: Arc<JobCompiler>,
    pub repository: Arc<dyn JobRepository>,
}

impl AppState {
    pub fn new(compiler: JobCompiler, repository: Arc<dyn JobRepository>) -> Self {
        Self {
            compiler: Arc::new(compiler),
            repository,
        }
    }
}

/// `GET /jobs` query params
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupQuery {
    pub job_name: String,
    pub database_name: String,
}

/// `POST /jobs` response body
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobResponse {
    pub query: String,
    pub registered_name: String,
    pub adjustments: Vec<Adjustment>,
    pub acknowledgement: u64,
}
