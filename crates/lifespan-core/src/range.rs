//! Date intervals built from two [`TemporalPoint`]s.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::TemporalError;
use crate::point::TemporalPoint;
use crate::record::{Boundary, DateRecord};

/// An interval from `start` to `end`, or ongoing when `end` is `None`.
///
/// Invariant: `end.to_date()` is never before `start.to_date()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TemporalRange {
    start: TemporalPoint,
    end: Option<TemporalPoint>,
}

impl TemporalRange {
    /// # Errors
    ///
    /// Returns [`TemporalError::EndBeforeStart`] if `end` resolves to a date
    /// before `start`.
    pub fn from_points(start: TemporalPoint, end: Option<TemporalPoint>) -> Result<Self, TemporalError> {
        if let Some(end) = end {
            if end.is_before(&start) {
                return Err(TemporalError::EndBeforeStart {
                    start: start.to_string(),
                    end: end.to_string(),
                });
            }
        }
        Ok(Self { start, end })
    }

    /// Build from a record's six raw date fields.
    ///
    /// # Errors
    ///
    /// Propagates [`TemporalPoint::from_record`] failures and returns
    /// [`TemporalError::EndBeforeStart`] for an inverted record.
    pub fn from_record(record: &DateRecord) -> Result<Self, TemporalError> {
        let start = TemporalPoint::from_record(record, Boundary::Start)?
            .ok_or(TemporalError::MissingStartYear)?;
        let end = TemporalPoint::from_record(record, Boundary::End)?;
        Self::from_points(start, end)
    }

    #[must_use]
    pub fn start(&self) -> &TemporalPoint {
        &self.start
    }

    #[must_use]
    pub fn end(&self) -> Option<&TemporalPoint> {
        self.end.as_ref()
    }

    #[must_use]
    pub fn is_open_ended(&self) -> bool {
        self.end.is_none()
    }

    /// First day covered by the range.
    #[must_use]
    pub fn first_day(&self) -> NaiveDate {
        self.start.to_date()
    }

    /// Last day covered by the range, `None` if ongoing.
    #[must_use]
    pub fn last_day(&self) -> Option<NaiveDate> {
        self.end.map(|end| end.to_end_date())
    }

    /// Whether the two ranges share at least one day.
    ///
    /// Two ongoing ranges overlap only when their start points are identical,
    /// precision included.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        match (self.last_day(), other.last_day()) {
            (None, None) => self.start == other.start,
            (Some(last), None) => last >= other.first_day(),
            (None, Some(other_last)) => other_last >= self.first_day(),
            (Some(last), Some(other_last)) => {
                self.first_day().max(other.first_day()) <= last.min(other_last)
            }
        }
    }

    /// Whether the ranges do not overlap and one ends the day before the
    /// other begins, in either order.
    #[must_use]
    pub fn is_adjacent(&self, other: &Self) -> bool {
        if self.overlaps(other) {
            return false;
        }
        Self::ends_right_before(self, other) || Self::ends_right_before(other, self)
    }

    fn ends_right_before(earlier: &Self, later: &Self) -> bool {
        earlier
            .last_day()
            .and_then(|last| last.succ_opt())
            .is_some_and(|next| next == later.first_day())
    }
}
