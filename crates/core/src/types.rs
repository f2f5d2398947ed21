use crate::error::CoreError;

/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Reject identifiers that cannot name a BIGSERIAL row.
///
/// Ids arriving from outside (path segments, body references) must be
/// strictly positive; anything else is a malformed request rather than a
/// missing resource.
pub fn validate_id(field: &str, id: DbId) -> Result<(), CoreError> {
    if id < 1 {
        return Err(CoreError::Validation(format!(
            "{field} must be a positive integer, got {id}"
        )));
    }
    Ok(())
}

/// Parse a raw identifier string, e.g. a path segment.
pub fn parse_id(field: &str, raw: &str) -> Result<DbId, CoreError> {
    let id = raw.trim().parse::<DbId>().map_err(|_| {
        CoreError::Validation(format!("{field} must be a positive integer, got '{raw}'"))
    })?;
    validate_id(field, id)?;
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn positive_ids_accepted() {
        assert!(validate_id("id", 1).is_ok());
        assert_eq!(parse_id("id", "42").unwrap(), 42);
    }

    #[test]
    fn zero_and_negative_ids_rejected() {
        assert_matches!(validate_id("id", 0), Err(CoreError::Validation(_)));
        assert_matches!(parse_id("id", "-3"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn non_numeric_ids_rejected() {
        let err = parse_id("campaign_id", "abc").unwrap_err();
        assert!(err.to_string().contains("campaign_id"));
        assert_matches!(parse_id("id", "1.5"), Err(CoreError::Validation(_)));
        assert_matches!(parse_id("id", ""), Err(CoreError::Validation(_)));
    }
}
