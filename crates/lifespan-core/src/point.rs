//! A calendar date known to year, month or day precision.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::TemporalError;
use crate::precision::Precision;
use crate::record::{Boundary, DateRecord};

/// An immutable date with an explicit precision.
///
/// Parts below the precision are `None`. Both resolved boundaries are
/// computed at construction, so a point that exists is always resolvable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TemporalPoint {
    year: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    month: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    day: Option<u32>,
    precision: Precision,
    #[serde(skip)]
    start: NaiveDate,
    #[serde(skip)]
    end: NaiveDate,
}

impl TemporalPoint {
    /// Build a point from its parts. Precision is `Day` if a day is given,
    /// `Month` if only a month is given, `Year` otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`TemporalError::InvalidDate`] if a day is given without a
    /// month, the month is outside 1-12, the day does not exist in that
    /// month, or the year is outside the supported calendar range.
    pub fn new(year: i32, month: Option<u32>, day: Option<u32>) -> Result<Self, TemporalError> {
        let invalid = |reason| TemporalError::InvalidDate {
            year,
            month,
            day,
            reason,
        };

        let (precision, start, end) = match (month, day) {
            (None, Some(_)) => return Err(invalid("day given without month")),
            (None, None) => {
                let start = NaiveDate::from_ymd_opt(year, 1, 1)
                    .ok_or_else(|| invalid("year out of range"))?;
                let end = NaiveDate::from_ymd_opt(year, 12, 31)
                    .ok_or_else(|| invalid("year out of range"))?;
                (Precision::Year, start, end)
            }
            (Some(m), None) => {
                if !(1..=12).contains(&m) {
                    return Err(invalid("month must be 1-12"));
                }
                let start = NaiveDate::from_ymd_opt(year, m, 1)
                    .ok_or_else(|| invalid("year out of range"))?;
                let end = last_day_of_month(year, m).ok_or_else(|| invalid("year out of range"))?;
                (Precision::Month, start, end)
            }
            (Some(m), Some(d)) => {
                if !(1..=12).contains(&m) {
                    return Err(invalid("month must be 1-12"));
                }
                let date = NaiveDate::from_ymd_opt(year, m, d)
                    .ok_or_else(|| invalid("day does not exist in month"))?;
                (Precision::Day, date, date)
            }
        };

        Ok(Self {
            year,
            month,
            day,
            precision,
            start,
            end,
        })
    }

    /// Year-precision point.
    ///
    /// # Errors
    ///
    /// See [`Self::new`].
    pub fn year_only(year: i32) -> Result<Self, TemporalError> {
        Self::new(year, None, None)
    }

    /// Month-precision point.
    ///
    /// # Errors
    ///
    /// See [`Self::new`].
    pub fn year_month(year: i32, month: u32) -> Result<Self, TemporalError> {
        Self::new(year, Some(month), None)
    }

    /// Day-precision point.
    ///
    /// # Errors
    ///
    /// See [`Self::new`].
    pub fn ymd(year: i32, month: u32, day: u32) -> Result<Self, TemporalError> {
        Self::new(year, Some(month), Some(day))
    }

    /// Read one boundary of a stored record.
    ///
    /// Zero or absent month/day count as unspecified; a day whose month is
    /// unspecified is dropped. An absent end year means the record is
    /// open-ended and yields `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`TemporalError::MissingStartYear`] if the start year is absent,
    /// or [`TemporalError::InvalidDate`] if the stored parts are malformed.
    pub fn from_record(record: &DateRecord, boundary: Boundary) -> Result<Option<Self>, TemporalError> {
        let (year, month, day) = record.parts(boundary);

        let Some(year) = year else {
            return match boundary {
                Boundary::Start => Err(TemporalError::MissingStartYear),
                Boundary::End => Ok(None),
            };
        };

        let month = month.filter(|&m| m != 0);
        let day = month.and(day).filter(|&d| d != 0);

        Self::new(year, month, day).map(Some)
    }

    #[must_use]
    pub fn year(&self) -> i32 {
        self.year
    }

    #[must_use]
    pub fn month(&self) -> Option<u32> {
        self.month
    }

    #[must_use]
    pub fn day(&self) -> Option<u32> {
        self.day
    }

    #[must_use]
    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// Earliest calendar date consistent with this point.
    #[must_use]
    pub fn to_date(&self) -> NaiveDate {
        self.start
    }

    /// Latest calendar date consistent with this point: Dec 31 for a year,
    /// the last day of the month (leap-aware) for a month, the day itself
    /// for a day.
    #[must_use]
    pub fn to_end_date(&self) -> NaiveDate {
        self.end
    }

    /// Compare by resolved start date, ignoring precision.
    #[must_use]
    pub fn cmp_date(&self, other: &Self) -> Ordering {
        self.start.cmp(&other.start)
    }

    #[must_use]
    pub fn is_before(&self, other: &Self) -> bool {
        self.cmp_date(other) == Ordering::Less
    }

    #[must_use]
    pub fn is_after(&self, other: &Self) -> bool {
        self.cmp_date(other) == Ordering::Greater
    }
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    if month == 12 {
        return NaiveDate::from_ymd_opt(year, 12, 31);
    }
    NaiveDate::from_ymd_opt(year, month + 1, 1)?.pred_opt()
}

impl fmt::Display for TemporalPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.year < 0 {
            write!(f, "-{:04}", self.year.unsigned_abs())?;
        } else {
            write!(f, "{:04}", self.year)?;
        }
        if let Some(month) = self.month {
            write!(f, "-{month:02}")?;
        }
        if let Some(day) = self.day {
            write!(f, "-{day:02}")?;
        }
        Ok(())
    }
}

impl FromStr for TemporalPoint {
    type Err = TemporalError;

    /// Parse `YYYY`, `YYYY-MM` or `YYYY-MM-DD`; a leading `-` negates the year.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let literal = || TemporalError::InvalidDateLiteral(s.to_string());
        let trimmed = s.trim();

        let (negative, body) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let fields: Vec<&str> = body.split('-').collect();
        if fields.len() > 3 || fields.iter().any(|f| f.is_empty() || !f.bytes().all(|b| b.is_ascii_digit())) {
            return Err(literal());
        }

        let year: i32 = fields[0].parse().map_err(|_| literal())?;
        let year = if negative { -year } else { year };
        let month = fields
            .get(1)
            .map(|m| m.parse::<u32>())
            .transpose()
            .map_err(|_| literal())?;
        let day = fields
            .get(2)
            .map(|d| d.parse::<u32>())
            .transpose()
            .map_err(|_| literal())?;

        Self::new(year, month, day)
    }
}
