use super::identifier::sql_identifier;
use super::query::QueryTemplate;
use super::thresholds::Thresholds;
use super::types::{Adjustment, RetentionFilter};
use crate::error::CompileError;

/// Conjunction of retention predicates, plus any days that were raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhereClause {
    pub sql: String,
    pub adjustments: Vec<Adjustment>,
}

/// Turns an ordered list of retention filters into a SQL predicate.
pub struct FilterClauseBuilder<'a> {
    template: &'a QueryTemplate,
    thresholds: Thresholds,
}

impl<'a> FilterClauseBuilder<'a> {
    pub fn new(template: &'a QueryTemplate, thresholds: Thresholds) -> Self {
        Self {
            template,
            thresholds,
        }
    }

    /// Every clause is joined to its neighbour with `AND`; each filter's days
    /// are clamped on their own.
    pub fn build(&self, filters: &[RetentionFilter]) -> Result<WhereClause, CompileError> {
        if filters.is_empty() {
            return Err(CompileError::MissingFilters);
        }

        let mut clauses = Vec::with_capacity(filters.len());
        let mut adjustments = Vec::new();
        for (index, filter) in filters.iter().enumerate() {
            let column = sql_identifier(&format!("filters[{index}].column"), &filter.column)?;
            let days = self.thresholds.days(filter.days);
            if days.was_raised() {
                adjustments.push(Adjustment {
                    field: format!("filters[{index}].days"),
                    requested: days.requested,
                    applied: days.applied,
                });
            }
            clauses.push(self.template.retention_clause(column, days.applied));
        }

        Ok(WhereClause {
            sql: clauses.join(" AND "),
            adjustments,
        })
    }
}
