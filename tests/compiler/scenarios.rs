use purgecron::compiler::{JobCompiler, JobDefinition, RetentionFilter};
use purgecron::error::CompileError;

fn outbox_job() -> JobDefinition {
    JobDefinition {
        job_name: "expurgo".to_string(),
        cron_expression: "*/5 * * * *".to_string(),
        database_name: "internal_core".to_string(),
        schema: "dbo".to_string(),
        table: "message_outbox".to_string(),
        limit: Some(110),
        filters: vec![RetentionFilter::new("coluna_1", 95)],
    }
}

#[test]
fn outbox_job_compiles_to_reference_statement() {
    let compiled = JobCompiler::default().compile(&outbox_job()).unwrap();

    assert_eq!(
        compiled.query,
        "SELECT cron.schedule('internal_core-expurgo-job', '*/5 * * * *', $$ with om_cte as (select om.\"Id\" from dbo.\"message_outbox\" om WHERE om.\"coluna_1\" AT TIME ZONE 'UTC' < NOW() AT TIME ZONE 'UTC' - INTERVAL '95 days' LIMIT 110) delete from dbo.\"message_outbox\" om where om.\"Id\" in (select \"Id\" from om_cte);$$, 'internal_core');"
    );
    assert!(compiled.adjustments.is_empty());
}

#[test]
fn short_retention_window_is_raised_to_minimum() {
    let mut job = outbox_job();
    job.filters = vec![RetentionFilter::new("coluna_1", 10)];

    let compiled = JobCompiler::default().compile(&job).unwrap();

    assert!(compiled.query.contains("INTERVAL '60 days'"));
    assert!(!compiled.query.contains("INTERVAL '10 days'"));
}

#[test]
fn small_batch_limit_is_raised_to_minimum() {
    let mut job = outbox_job();
    job.limit = Some(5);

    let compiled = JobCompiler::default().compile(&job).unwrap();

    assert!(compiled.query.contains("LIMIT 100)"));
    assert!(!compiled.query.contains("LIMIT 5)"));
}

#[test]
fn two_filters_are_joined_with_and() {
    let mut job = outbox_job();
    job.filters = vec![
        RetentionFilter::new("CreatedAt", 90),
        RetentionFilter::new("SentAt", 70),
    ];

    let compiled = JobCompiler::default().compile(&job).unwrap();

    assert!(compiled.query.contains(
        "WHERE om.\"CreatedAt\" AT TIME ZONE 'UTC' < NOW() AT TIME ZONE 'UTC' - INTERVAL '90 days' \
         AND om.\"SentAt\" AT TIME ZONE 'UTC' < NOW() AT TIME ZONE 'UTC' - INTERVAL '70 days' LIMIT 110)"
    ));
}

#[test]
fn empty_filter_list_is_missing_filters() {
    let mut job = outbox_job();
    job.filters = Vec::new();

    assert_eq!(
        JobCompiler::default().compile(&job).unwrap_err(),
        CompileError::MissingFilters
    );
}

#[test]
fn four_and_seven_field_expressions_are_rejected() {
    for expression in ["*/5 * * *", "0 */5 * * * * 2030"] {
        let mut job = outbox_job();
        job.cron_expression = expression.to_string();

        let err = JobCompiler::default().compile(&job).unwrap_err();
        assert!(
            matches!(err, CompileError::InvalidCronFormat { .. }),
            "{expression}: {err}"
        );
    }
}
