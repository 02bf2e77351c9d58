use serde::{Deserialize, Serialize};

use super::schedule::CronSchedule;
use crate::error::CompileError;

/// A single "delete rows older than N days" predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetentionFilter {
    pub column: String,
    pub days: i64,
}

impl RetentionFilter {
    pub fn new(column: impl Into<String>, days: i64) -> Self {
        Self {
            column: column.into(),
            days,
        }
    }
}

/// Validated input to the compiler. Built once, compiled, then discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDefinition {
    pub job_name: String,
    pub cron_expression: String,
    pub database_name: String,
    pub schema: String,
    pub table: String,
    pub limit: Option<i64>,
    pub filters: Vec<RetentionFilter>,
}

/// Wire shape of a cleanup-job request (HTTP body or `compile --file`).
///
/// Either `cronExpression` or the structured `schedule` must be present; the
/// expression wins when both are supplied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobRequest {
    #[serde(default)]
    pub job_name: String,
    #[serde(default)]
    pub cron_expression: Option<String>,
    #[serde(default)]
    pub schedule: Option<CronSchedule>,
    #[serde(default)]
    pub database_name: String,
    #[serde(default)]
    pub schema: String,
    #[serde(default)]
    pub table: String,
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub filters: Option<Vec<RetentionFilter>>,
}

impl CreateJobRequest {
    pub fn into_definition(self) -> Result<JobDefinition, CompileError> {
        let cron_expression = match (self.cron_expression, self.schedule) {
            (Some(expression), _) => expression,
            (None, Some(schedule)) => {
                let include_seconds = schedule.second.is_some();
                schedule.to_expression(include_seconds)?
            }
            (None, None) => {
                return Err(CompileError::invalid_cron(
                    "",
                    "either cronExpression or schedule is required",
                ));
            }
        };

        Ok(JobDefinition {
            job_name: self.job_name,
            cron_expression,
            database_name: self.database_name,
            schema: self.schema,
            table: self.table,
            limit: self.limit,
            filters: self.filters.unwrap_or_default(),
        })
    }
}

/// A numeric input the compiler raised to its configured minimum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Adjustment {
    pub field: String,
    /// `None` when the caller omitted the value entirely.
    pub requested: Option<i64>,
    pub applied: i64,
}

/// Output of [`super::JobCompiler::compile`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledJob {
    pub query: String,
    pub registered_name: String,
    pub cron_expression: String,
    pub adjustments: Vec<Adjustment>,
}
