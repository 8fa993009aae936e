//! Date precision and the rules governing how it may change.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::TemporalError;

/// Granularity at which a date is known.
///
/// Ordered from least to most specific: `Year < Month < Day`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
    Year,
    Month,
    Day,
}

impl Precision {
    /// The lowercase name used in records and on the command line.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Precision::Year => "year",
            Precision::Month => "month",
            Precision::Day => "day",
        }
    }

    /// True if `self` pins a date down more tightly than `other`.
    #[must_use]
    pub fn is_more_specific_than(self, other: Precision) -> bool {
        self > other
    }

    /// The coarser of two precisions.
    #[must_use]
    pub fn coarsest(self, other: Precision) -> Precision {
        self.min(other)
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Precision {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "year" => Ok(Precision::Year),
            "month" => Ok(Precision::Month),
            "day" => Ok(Precision::Day),
            _ => Err(TemporalError::InvalidPrecision(s.to_string())),
        }
    }
}

/// Stateless checks over raw precision values.
///
/// Every operation parses its inputs first, so an unrecognised precision is
/// reported as [`TemporalError::InvalidPrecision`] instead of a `false`.
pub struct PrecisionValidator;

impl PrecisionValidator {
    /// Whether a field may move from `previous` to `new` precision.
    ///
    /// A first-time set (`previous` is `None`) is always allowed. Start dates
    /// may change freely. End dates may keep their precision or become
    /// coarser, never finer.
    ///
    /// # Errors
    ///
    /// Returns [`TemporalError::InvalidPrecision`] if either value is not
    /// `year`, `month` or `day`.
    pub fn validate_precision_transition(
        previous: Option<&str>,
        new: &str,
        is_end_date: bool,
    ) -> Result<bool, TemporalError> {
        let new: Precision = new.parse()?;
        let previous = previous.map(str::parse::<Precision>).transpose()?;
        Ok(Self::transition_allowed(previous, new, is_end_date))
    }

    /// Typed form of [`Self::validate_precision_transition`].
    #[must_use]
    pub fn transition_allowed(
        previous: Option<Precision>,
        new: Precision,
        is_end_date: bool,
    ) -> bool {
        match previous {
            None => true,
            Some(_) if !is_end_date => true,
            Some(previous) => !new.is_more_specific_than(previous),
        }
    }

    /// Whether an end date of `end` precision may pair with a start date of
    /// `start` precision. An open end (`None`) always pairs.
    ///
    /// # Errors
    ///
    /// Returns [`TemporalError::InvalidPrecision`] on an unrecognised value.
    pub fn validate_span_precisions(start: &str, end: Option<&str>) -> Result<bool, TemporalError> {
        let start: Precision = start.parse()?;
        let end = end.map(str::parse::<Precision>).transpose()?;
        Ok(Self::span_precisions_allowed(start, end))
    }

    /// Typed form of [`Self::validate_span_precisions`].
    #[must_use]
    pub fn span_precisions_allowed(start: Precision, end: Option<Precision>) -> bool {
        end.is_none_or(|end| !end.is_more_specific_than(start))
    }

    /// The less specific of two precisions, for comparing at a shared
    /// granularity.
    ///
    /// # Errors
    ///
    /// Returns [`TemporalError::InvalidPrecision`] on an unrecognised value.
    pub fn get_common_precision(a: &str, b: &str) -> Result<Precision, TemporalError> {
        let a: Precision = a.parse()?;
        let b: Precision = b.parse()?;
        Ok(a.coarsest(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precision_ordering_runs_coarse_to_fine() {
        assert!(Precision::Year < Precision::Month);
        assert!(Precision::Month < Precision::Day);
        assert!(Precision::Day.is_more_specific_than(Precision::Year));
        assert!(!Precision::Month.is_more_specific_than(Precision::Month));
    }

    #[test]
    fn precision_parses_case_insensitively() {
        assert_eq!("YEAR".parse::<Precision>().unwrap(), Precision::Year);
        assert_eq!(" month ".parse::<Precision>().unwrap(), Precision::Month);
        assert_eq!("day".parse::<Precision>().unwrap(), Precision::Day);
    }

    #[test]
    fn precision_serializes_lowercase() {
        let json = serde_json::to_string(&Precision::Month).expect("serialize");
        assert_eq!(json, "\"month\"");
        assert_eq!(Precision::Day.to_string(), "day");
    }

    // === validatePrecisionTransition ===

    #[test]
    fn end_date_precision_may_only_become_coarser() {
        assert!(PrecisionValidator::validate_precision_transition(Some("day"), "month", true).unwrap());
        assert!(PrecisionValidator::validate_precision_transition(Some("day"), "year", true).unwrap());
        assert!(PrecisionValidator::validate_precision_transition(Some("month"), "year", true).unwrap());
        assert!(PrecisionValidator::validate_precision_transition(Some("month"), "month", true).unwrap());

        assert!(!PrecisionValidator::validate_precision_transition(Some("month"), "day", true).unwrap());
        assert!(!PrecisionValidator::validate_precision_transition(Some("year"), "month", true).unwrap());
        assert!(!PrecisionValidator::validate_precision_transition(Some("year"), "day", true).unwrap());
    }

    #[test]
    fn start_date_precision_may_change_freely() {
        assert!(PrecisionValidator::validate_precision_transition(Some("year"), "day", false).unwrap());
        assert!(PrecisionValidator::validate_precision_transition(Some("day"), "year", false).unwrap());
    }

    #[test]
    fn first_time_set_is_always_valid() {
        for p in ["year", "month", "day"] {
            assert!(PrecisionValidator::validate_precision_transition(None, p, true).unwrap());
            assert!(PrecisionValidator::validate_precision_transition(None, p, false).unwrap());
        }
    }

    // === validateSpanPrecisions ===

    #[test]
    fn end_precision_cannot_exceed_start_precision() {
        assert!(!PrecisionValidator::validate_span_precisions("year", Some("month")).unwrap());
        assert!(PrecisionValidator::validate_span_precisions("month", Some("year")).unwrap());
        assert!(PrecisionValidator::validate_span_precisions("day", Some("day")).unwrap());
    }

    #[test]
    fn open_end_pairs_with_any_start() {
        assert!(PrecisionValidator::validate_span_precisions("day", None).unwrap());
        assert!(PrecisionValidator::validate_span_precisions("year", None).unwrap());
    }

    // === getCommonPrecision ===

    #[test]
    fn common_precision_is_the_coarser() {
        assert_eq!(PrecisionValidator::get_common_precision("year", "month").unwrap(), Precision::Year);
        assert_eq!(PrecisionValidator::get_common_precision("month", "month").unwrap(), Precision::Month);
        assert_eq!(PrecisionValidator::get_common_precision("month", "day").unwrap(), Precision::Month);
        assert_eq!(PrecisionValidator::get_common_precision("day", "year").unwrap(), Precision::Year);
    }

    #[test]
    fn invalid_precision_is_an_error_not_false() {
        let err = PrecisionValidator::validate_precision_transition(Some("invalid"), "day", true)
            .unwrap_err();
        assert_eq!(err, TemporalError::InvalidPrecision("invalid".to_string()));

        assert!(PrecisionValidator::validate_precision_transition(None, "invalid", false).is_err());
        assert!(PrecisionValidator::validate_span_precisions("invalid", None).is_err());
        assert!(PrecisionValidator::validate_span_precisions("year", Some("invalid")).is_err());
        assert!(PrecisionValidator::get_common_precision("year", "invalid").is_err());
    }
}
