#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::return_self_not_must_use
)]

pub mod app;
pub mod cli;
pub mod compiler;
pub mod config;
pub mod error;
pub mod gateway;
pub mod repository;

pub use compiler::{CompiledJob, JobCompiler, JobDefinition, RetentionFilter};
pub use config::Config;
pub use error::{CompileError, PurgeError, RepositoryError};
