//! SQL text assembly: the batched purge query and the scheduler registration
//! statement that wraps it.

/// Fixed naming conventions of the generated SQL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTemplate {
    /// Table alias used in the purge query.
    pub alias: String,
    /// Name of the CTE selecting the batch of ids to delete.
    pub cte: String,
    /// Primary-key column of purged tables.
    pub id_column: String,
    /// Time zone applied to both sides of the retention comparison.
    pub time_zone: String,
    /// Scheduler-extension registration function.
    pub schedule_function: String,
    /// Dollar-quote delimiter around the purge query argument.
    pub dollar_quote: String,
}

impl Default for QueryTemplate {
    fn default() -> Self {
        Self {
            alias: "om".into(),
            cte: "om_cte".into(),
            id_column: "Id".into(),
            time_zone: "UTC".into(),
            schedule_function: "cron.schedule".into(),
            dollar_quote: "$$".into(),
        }
    }
}

/// Name the job is registered under in the scheduler extension.
pub fn registered_name(database_name: &str, job_name: &str) -> String {
    format!("{database_name}-{job_name}-job")
}

impl QueryTemplate {
    /// One retention predicate: rows whose `column` is older than `days`.
    pub fn retention_clause(&self, column: &str, days: i64) -> String {
        let Self {
            alias, time_zone, ..
        } = self;
        format!(
            "{alias}.\"{column}\" AT TIME ZONE '{time_zone}' < NOW() AT TIME ZONE '{time_zone}' - INTERVAL '{days} days'"
        )
    }

    /// Batched delete, dollar-quoted so it travels as one scheduler argument.
    pub fn purge_query(&self, schema: &str, table: &str, where_clause: &str, limit: i64) -> String {
        let Self {
            alias,
            cte,
            id_column: id,
            dollar_quote: quote,
            ..
        } = self;
        format!(
            "{quote} with {cte} as (select {alias}.\"{id}\" from {schema}.\"{table}\" {alias} WHERE {where_clause} LIMIT {limit}) \
             delete from {schema}.\"{table}\" {alias} where {alias}.\"{id}\" in (select \"{id}\" from {cte});{quote}"
        )
    }

    /// `SELECT cron.schedule(...)` registering `purge_query` under the
    /// derived job name.
    pub fn schedule_statement(
        &self,
        database_name: &str,
        job_name: &str,
        cron_expression: &str,
        purge_query: &str,
    ) -> String {
        format!(
            "SELECT {function}('{name}', '{cron_expression}', {purge_query}, '{database_name}');",
            function = self.schedule_function,
            name = registered_name(database_name, job_name),
        )
    }
}
