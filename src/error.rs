use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `purgecron`.
///
/// The compiler and repository define their own error enums so callers can
/// decide how to respond (the gateway maps them onto HTTP status codes);
/// binary-side code keeps using `anyhow::Result` for ad-hoc context chains.
#[derive(Debug, Error)]
pub enum PurgeError {
    // ── Compiler ─────────────────────────────────────────────────────────
    #[error("compile: {0}")]
    Compile(#[from] CompileError),

    // ── Repository ───────────────────────────────────────────────────────
    #[error("repository: {0}")]
    Repository(#[from] RepositoryError),

    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Compiler errors ─────────────────────────────────────────────────────────

/// Input-validation failures raised while compiling a cleanup job.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("invalid cron expression '{expression}': {reason}")]
    InvalidCronFormat { expression: String, reason: String },

    #[error("at least one retention filter is required")]
    MissingFilters,

    #[error("invalid {field} '{value}': {reason}")]
    InvalidIdentifier {
        field: String,
        value: String,
        reason: String,
    },
}

impl CompileError {
    /// Stable machine-readable code, used in HTTP error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidCronFormat { .. } => "invalid_cron_format",
            Self::MissingFilters => "missing_filters",
            Self::InvalidIdentifier { .. } => "invalid_identifier",
        }
    }

    pub(crate) fn invalid_cron(expression: &str, reason: impl Into<String>) -> Self {
        Self::InvalidCronFormat {
            expression: expression.to_string(),
            reason: reason.into(),
        }
    }
}

// ─── Repository errors ───────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("connect failed: {0}")]
    Connect(String),

    #[error("schema setup failed: {0}")]
    Schema(String),

    #[error("submit failed: {0}")]
    Submit(String),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("validation failed: {0}")]
    Validation(String),
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, PurgeError>;
