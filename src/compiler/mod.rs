//! Job schedule query compiler.
//!
//! Turns a [`JobDefinition`] into a single `SELECT cron.schedule(...)`
//! statement that registers a batched purge with the database-side
//! scheduler. Compilation is pure: the same definition and thresholds always
//! produce the same text.

pub mod filters;
pub mod identifier;
pub mod query;
pub mod schedule;
pub mod thresholds;
pub mod types;

pub use filters::{FilterClauseBuilder, WhereClause};
pub use query::{QueryTemplate, registered_name};
pub use schedule::CronSchedule;
pub use thresholds::{Clamped, DEFAULT_MIN_DAYS, DEFAULT_MIN_LIMIT, Thresholds, clamp};
pub use types::{Adjustment, CompiledJob, CreateJobRequest, JobDefinition, RetentionFilter};

use crate::error::CompileError;
use identifier::{literal_name, sql_identifier};

#[derive(Debug, Clone, Default)]
pub struct JobCompiler {
    thresholds: Thresholds,
    template: QueryTemplate,
}

impl JobCompiler {
    pub fn new(thresholds: Thresholds) -> Self {
        Self {
            thresholds,
            template: QueryTemplate::default(),
        }
    }

    pub fn with_template(mut self, template: QueryTemplate) -> Self {
        self.template = template;
        self
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    pub fn compile(&self, job: &JobDefinition) -> Result<CompiledJob, CompileError> {
        if job.filters.is_empty() {
            return Err(CompileError::MissingFilters);
        }

        let job_name = literal_name("jobName", &job.job_name)?;
        let database_name = literal_name("databaseName", &job.database_name)?;
        let schema = sql_identifier("schema", &job.schema)?;
        let table = sql_identifier("table", &job.table)?;
        let cron_expression = schedule::normalize(&job.cron_expression)?;

        let limit = self.thresholds.limit(job.limit);
        let mut adjustments = Vec::new();
        if limit.was_raised() {
            adjustments.push(Adjustment {
                field: "limit".into(),
                requested: limit.requested,
                applied: limit.applied,
            });
        }

        let where_clause =
            FilterClauseBuilder::new(&self.template, self.thresholds).build(&job.filters)?;
        adjustments.extend(where_clause.adjustments);

        let purge_query =
            self.template
                .purge_query(schema, table, &where_clause.sql, limit.applied);
        let query = self.template.schedule_statement(
            database_name,
            job_name,
            &cron_expression,
            &purge_query,
        );

        for adjustment in &adjustments {
            tracing::warn!(
                job = job_name,
                field = %adjustment.field,
                requested = ?adjustment.requested,
                applied = adjustment.applied,
                "raised below-minimum value"
            );
        }
        tracing::debug!(job = job_name, database = database_name, "compiled cleanup job");

        Ok(CompiledJob {
            query,
            registered_name: registered_name(database_name, job_name),
            cron_expression,
            adjustments,
        })
    }
}
