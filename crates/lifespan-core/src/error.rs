//! Error types for Lifespan.

use thiserror::Error;

/// Top-level result type for Lifespan operations.
pub type Result<T> = std::result::Result<T, LifespanError>;

/// Top-level error type for Lifespan.
#[derive(Debug, Error)]
pub enum LifespanError {
    #[error("temporal error: {0}")]
    Temporal(#[from] TemporalError),

    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Invalid-argument conditions raised by the temporal engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemporalError {
    #[error("invalid precision '{0}': expected one of year, month, day")]
    InvalidPrecision(String),

    #[error("invalid date: year {year}, month {month:?}, day {day:?} ({reason})")]
    InvalidDate {
        year: i32,
        month: Option<u32>,
        day: Option<u32>,
        reason: &'static str,
    },

    #[error("invalid date literal '{0}': expected YYYY, YYYY-MM or YYYY-MM-DD")]
    InvalidDateLiteral(String),

    #[error("record has no start year")]
    MissingStartYear,

    #[error("end date ({end}) cannot be before start date ({start})")]
    EndBeforeStart { start: String, end: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_display_human_readable_messages() {
        let err = TemporalError::InvalidPrecision("invalid".to_string());
        let msg = err.to_string();
        assert!(msg.contains("invalid"));
        assert!(msg.contains("year, month, day"));

        let err = TemporalError::EndBeforeStart {
            start: "2001".to_string(),
            end: "2000".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("2001"));
        assert!(msg.contains("2000"));
    }

    #[test]
    fn temporal_errors_convert_into_top_level_error() {
        let err: LifespanError = TemporalError::MissingStartYear.into();
        assert!(matches!(
            err,
            LifespanError::Temporal(TemporalError::MissingStartYear)
        ));
        assert!(err.to_string().starts_with("temporal error"));
    }
}
