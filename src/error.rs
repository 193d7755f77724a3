use thiserror::Error;

/// Errors raised while extracting records from the succession table.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtractionError {
    /// The configured biographical column is absent from the table header.
    /// Indicates the source format changed incompatibly.
    #[error("column {0:?} not found in any table header")]
    MissingColumn(String),

    /// A cell had no opening parenthesis separating name from life dates.
    #[error("no opening parenthesis in {0:?}")]
    MalformedEntry(String),

    /// Neither the birth–death range nor the `b. <year>` marker matched.
    #[error("no year pattern in {0:?}")]
    NoYearFound(String),

    /// Captured digits failed integer conversion.
    #[error("invalid year {0:?}")]
    BadYear(String),
}

impl ExtractionError {
    /// Structural errors abort the run in both modes; content errors are
    /// recovered per row unless strict mode is on.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ExtractionError::MissingColumn(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_missing_column_is_fatal() {
        assert!(ExtractionError::MissingColumn("x".into()).is_fatal());
        assert!(!ExtractionError::MalformedEntry("x".into()).is_fatal());
        assert!(!ExtractionError::NoYearFound("x".into()).is_fatal());
        assert!(!ExtractionError::BadYear("x".into()).is_fatal());
    }
}
