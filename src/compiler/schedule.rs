//! Structural cron handling: split an expression into named fields and join
//! them back, with grammar validation delegated to the `cron` crate.

use ::cron::Schedule;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CompileError;

const WILDCARD: &str = "*";
const DEFAULT_SECOND: &str = "0";

/// The six positional fields of a cron expression. Absent fields fall back
/// to `*` (and `0` for seconds) when formatted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CronSchedule {
    #[serde(default)]
    pub second: Option<String>,
    #[serde(default)]
    pub minute: Option<String>,
    #[serde(default)]
    pub hour: Option<String>,
    #[serde(default)]
    pub day_of_month: Option<String>,
    #[serde(default)]
    pub month: Option<String>,
    #[serde(default)]
    pub day_of_week: Option<String>,
}

impl CronSchedule {
    /// Parse a 5-field (crontab) or 6-field (leading seconds) expression.
    ///
    /// The expression is checked against the cron grammar before fields are
    /// assigned. A 5-field input leaves `second` unset.
    pub fn parse(expression: &str) -> Result<Self, CompileError> {
        let fields: Vec<&str> = expression.split_whitespace().collect();
        validate_fields(expression, &fields)?;

        let schedule = match fields.as_slice() {
            [minute, hour, day_of_month, month, day_of_week] => Self {
                second: None,
                minute: Some((*minute).to_string()),
                hour: Some((*hour).to_string()),
                day_of_month: Some((*day_of_month).to_string()),
                month: Some((*month).to_string()),
                day_of_week: Some((*day_of_week).to_string()),
            },
            [second, minute, hour, day_of_month, month, day_of_week] => Self {
                second: Some((*second).to_string()),
                minute: Some((*minute).to_string()),
                hour: Some((*hour).to_string()),
                day_of_month: Some((*day_of_month).to_string()),
                month: Some((*month).to_string()),
                day_of_week: Some((*day_of_week).to_string()),
            },
            _ => return Err(field_count_error(expression, fields.len())),
        };
        Ok(schedule)
    }

    /// Seconds field, defaulting to `0`.
    pub fn second(&self) -> &str {
        field_or(self.second.as_deref(), DEFAULT_SECOND)
    }

    /// Join the fields into an expression and re-validate the result.
    ///
    /// A failure here names the produced string. A field value with inner
    /// whitespace would shift every later field, so the joined output must
    /// split back into exactly the requested number of fields.
    pub fn to_expression(&self, include_seconds: bool) -> Result<String, CompileError> {
        let expression = self.to_expression_unchecked(include_seconds);
        let fields: Vec<&str> = expression.split_whitespace().collect();
        let expected = if include_seconds { 6 } else { 5 };
        if fields.len() != expected {
            return Err(CompileError::invalid_cron(
                &expression,
                format!(
                    "expected {expected} fields, got {}: field values must not contain whitespace",
                    fields.len()
                ),
            ));
        }
        validate_fields(&expression, &fields)?;
        Ok(expression)
    }

    /// Join the fields without consulting the grammar validator.
    pub fn to_expression_unchecked(&self, include_seconds: bool) -> String {
        let mut parts = Vec::with_capacity(6);
        if include_seconds {
            parts.push(self.second());
        }
        parts.extend([
            field_or(self.minute.as_deref(), WILDCARD),
            field_or(self.hour.as_deref(), WILDCARD),
            field_or(self.day_of_month.as_deref(), WILDCARD),
            field_or(self.month.as_deref(), WILDCARD),
            field_or(self.day_of_week.as_deref(), WILDCARD),
        ]);
        parts.join(" ")
    }
}

impl FromStr for CronSchedule {
    type Err = CompileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for CronSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_expression_unchecked(self.second.is_some()))
    }
}

/// Parse `expression` into a [`CronSchedule`].
pub fn parse(expression: &str) -> Result<CronSchedule, CompileError> {
    CronSchedule::parse(expression)
}

/// Format `schedule` back into an expression, validating the output.
pub fn format(schedule: &CronSchedule, include_seconds: bool) -> Result<String, CompileError> {
    schedule.to_expression(include_seconds)
}

/// Re-emit `expression` in canonical single-space form, keeping its field count.
pub fn normalize(expression: &str) -> Result<String, CompileError> {
    let schedule = parse(expression)?;
    format(&schedule, schedule.second.is_some())
}

fn field_or<'a>(value: Option<&'a str>, fallback: &'a str) -> &'a str {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(fallback)
}

fn field_count_error(expression: &str, count: usize) -> CompileError {
    CompileError::invalid_cron(
        expression,
        format!("expected 5 or 6 fields, got {count}"),
    )
}

fn validate_fields(expression: &str, fields: &[&str]) -> Result<(), CompileError> {
    let grammar_form = match fields {
        // crontab: minute hour day month weekday
        [rest @ .., day_of_week] if fields.len() == 5 => {
            format!("0 {} {}", rest.join(" "), crate_day_of_week(day_of_week))
        }
        [rest @ .., day_of_week] if fields.len() == 6 => {
            format!("{} {}", rest.join(" "), crate_day_of_week(day_of_week))
        }
        _ => return Err(field_count_error(expression, fields.len())),
    };

    Schedule::from_str(&grammar_form)
        .map(|_| ())
        .map_err(|error| CompileError::invalid_cron(expression, error.to_string()))
}

/// Translate crontab weekday numbers (0-7, Sunday = 0 or 7) into the
/// `cron` crate's numbering (1-7, Sunday = 1). Only used for validation.
fn crate_day_of_week(field: &str) -> String {
    field
        .split(',')
        .map(|item| {
            let (base, step) = match item.split_once('/') {
                Some((base, step)) => (base, Some(step)),
                None => (item, None),
            };
            let shifted = match base.split_once('-') {
                Some((start, end)) => shift_range(start, end),
                None => shift_day(base),
            };
            match step {
                Some(step) => format!("{shifted}/{step}"),
                None => shifted,
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}

fn shift_range(start: &str, end: &str) -> String {
    // 7 closes a range on Sunday, which the crate numbers 1.
    if end == "7" {
        let start = shift_day(start);
        if start == "1" {
            return "1-7".to_string();
        }
        return format!("{start}-7,1");
    }
    format!("{}-{}", shift_day(start), shift_day(end))
}

fn shift_day(token: &str) -> String {
    match token.parse::<u8>() {
        Ok(0 | 7) => "1".to_string(),
        Ok(day @ 1..=6) => (day + 1).to_string(),
        _ => token.to_string(),
    }
}
