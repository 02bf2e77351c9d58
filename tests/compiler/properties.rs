use purgecron::compiler::schedule::{format, parse};
use purgecron::compiler::{JobCompiler, JobDefinition, RetentionFilter, clamp};

const MINUTES: [&str; 4] = ["0", "*/5", "15", "0-30/10"];
const HOURS: [&str; 3] = ["*", "3", "1,13"];
const DAYS_OF_MONTH: [&str; 2] = ["*", "1"];
const MONTHS: [&str; 2] = ["*", "1-6"];
const DAYS_OF_WEEK: [&str; 3] = ["*", "1-5", "0"];

fn expressions() -> Vec<String> {
    let mut out = Vec::new();
    for minute in MINUTES {
        for hour in HOURS {
            for dom in DAYS_OF_MONTH {
                for month in MONTHS {
                    for dow in DAYS_OF_WEEK {
                        out.push(format!("{minute} {hour} {dom} {month} {dow}"));
                        out.push(format!("30 {minute} {hour} {dom} {month} {dow}"));
                    }
                }
            }
        }
    }
    out
}

#[test]
fn parse_then_format_preserves_every_field() {
    for expression in expressions() {
        let schedule = parse(&expression).unwrap_or_else(|e| panic!("{expression}: {e}"));
        let formatted = format(&schedule, schedule.second.is_some()).unwrap();
        assert_eq!(formatted, expression);
    }
}

#[test]
fn clamp_is_monotone_and_identity_above_minimum() {
    for minimum in [1, 60, 100] {
        for value in -200..=200 {
            let clamped = clamp(value, minimum);
            assert!(clamped >= minimum);
            if value >= minimum {
                assert_eq!(clamped, value);
            }
        }
    }
}

#[test]
fn compilation_is_deterministic() {
    let job = JobDefinition {
        job_name: "cleanup".to_string(),
        cron_expression: "0 4 * * 0".to_string(),
        database_name: "core".to_string(),
        schema: "public".to_string(),
        table: "events".to_string(),
        limit: None,
        filters: vec![
            RetentionFilter::new("CreatedAt", 30),
            RetentionFilter::new("ProcessedAt", 365),
            RetentionFilter::new("ArchivedAt", 61),
        ],
    };

    let compiler = JobCompiler::default();
    let first = compiler.compile(&job).unwrap();
    for _ in 0..10 {
        assert_eq!(compiler.compile(&job).unwrap().query, first.query);
    }
    assert_eq!(first.query.matches(" AND ").count(), 2);
}
