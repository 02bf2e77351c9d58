use crate::error::CompileError;

/// Postgres truncates identifiers beyond this many bytes.
pub const MAX_IDENTIFIER_LEN: usize = 63;

/// Validate a name interpolated as a SQL identifier (schema, table, column).
///
/// Accepts `[A-Za-z_][A-Za-z0-9_]*`, so the quoted form `"name"` can never be
/// broken out of.
pub fn sql_identifier<'a>(field: &str, value: &'a str) -> Result<&'a str, CompileError> {
    check_length(field, value)?;
    let mut chars = value.chars();
    if let Some(first) = chars.next()
        && !(first.is_ascii_alphabetic() || first == '_')
    {
        return Err(invalid(
            field,
            value,
            format!("must start with a letter or underscore, found '{first}'"),
        ));
    }
    if let Some(bad) = chars.find(|c| !(c.is_ascii_alphanumeric() || *c == '_')) {
        return Err(invalid(
            field,
            value,
            format!("contains disallowed character '{bad}'"),
        ));
    }
    Ok(value)
}

/// Validate a name interpolated inside a single-quoted literal (job name,
/// database name). Accepts `[A-Za-z0-9_-]+`.
pub fn literal_name<'a>(field: &str, value: &'a str) -> Result<&'a str, CompileError> {
    check_length(field, value)?;
    if let Some(bad) = value
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
    {
        return Err(invalid(
            field,
            value,
            format!("contains disallowed character '{bad}'"),
        ));
    }
    Ok(value)
}

fn check_length(field: &str, value: &str) -> Result<(), CompileError> {
    if value.is_empty() {
        return Err(invalid(field, value, "must not be empty".to_string()));
    }
    if value.len() > MAX_IDENTIFIER_LEN {
        return Err(invalid(
            field,
            value,
            format!("longer than {MAX_IDENTIFIER_LEN} bytes"),
        ));
    }
    Ok(())
}

fn invalid(field: &str, value: &str, reason: String) -> CompileError {
    CompileError::InvalidIdentifier {
        field: field.to_string(),
        value: value.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sql_identifier_accepts_plain_names() {
        for name in ["dbo", "message_outbox", "SentAt", "_private", "coluna_1"] {
            assert_eq!(sql_identifier("table", name).unwrap(), name);
        }
    }

    #[test]
    fn sql_identifier_rejects_injection_attempts() {
        for name in [
            "",
            "1table",
            "users\"; drop table x; --",
            "a b",
            "tbl'",
            "schema.table",
            "çà",
        ] {
            let err = sql_identifier("table", name).unwrap_err();
            assert!(
                matches!(err, CompileError::InvalidIdentifier { ref field, .. }
                    if field == "table"),
                "{name}: {err}"
            );
        }
    }

    #[test]
    fn sql_identifier_enforces_length() {
        let long = "a".repeat(MAX_IDENTIFIER_LEN + 1);
        assert!(sql_identifier("column", &long).is_err());
        assert!(sql_identifier("column", &long[..MAX_IDENTIFIER_LEN]).is_ok());
    }

    #[test]
    fn literal_name_allows_hyphens_and_leading_digits() {
        for name in ["expurgo-account", "internal_core", "2024-cleanup"] {
            assert!(literal_name("jobName", name).is_ok(), "{name}");
        }
    }

    #[test]
    fn literal_name_rejects_quotes() {
        let err = literal_name("databaseName", "core', 'other").unwrap_err();
        assert!(err.to_string().contains("disallowed character '''"));
    }
}
