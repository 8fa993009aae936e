//! Entry point for connection workflows that need date checks.
//!
//! The service holds no mutable state. Callers fetch existing connections
//! from their own storage and pass them in; acting on the answer inside a
//! transaction is the caller's responsibility.

use chrono::NaiveDate;

use crate::constraint::{ConflictScope, ConstraintTable};
use crate::error::TemporalError;
use crate::point::TemporalPoint;
use crate::precision::PrecisionValidator;
use crate::range::TemporalRange;
use crate::record::{Boundary, ConnectionRecord, DateRecord};

/// Pure computation façade over points, ranges and precision rules.
#[derive(Debug, Clone, Default)]
pub struct TemporalService {
    constraints: ConstraintTable,
}

impl TemporalService {
    #[must_use]
    pub fn new(constraints: ConstraintTable) -> Self {
        Self { constraints }
    }

    /// The scope a candidate of `kind` is checked in.
    #[must_use]
    pub fn scope_for(&self, kind: &str) -> ConflictScope {
        self.constraints.scope_for(kind)
    }

    /// Existing connections whose dates overlap the candidate's, in input
    /// order.
    ///
    /// Only connections of the same kind within the kind's
    /// [`ConflictScope`] are compared. Existing connections sharing the
    /// candidate's id, or lacking a start year, are skipped.
    ///
    /// # Errors
    ///
    /// Returns a [`TemporalError`] if the candidate's dates do not form a
    /// valid range, or if an existing connection's dates are malformed.
    pub fn find_conflicts<'a>(
        &self,
        candidate: &ConnectionRecord,
        existing: &'a [ConnectionRecord],
    ) -> Result<Vec<&'a ConnectionRecord>, TemporalError> {
        let range = TemporalRange::from_record(&candidate.dates)?;
        let scope = self.scope_for(&candidate.kind);
        let mut conflicts = Vec::new();

        for other in existing {
            if !scope.covers(&candidate.subject, &candidate.object, &candidate.kind, other) {
                continue;
            }
            if candidate.id.is_some() && other.id == candidate.id {
                continue;
            }
            let other_range = match TemporalRange::from_record(&other.dates) {
                Ok(r) => r,
                Err(TemporalError::MissingStartYear) => {
                    tracing::debug!(id = ?other.id, "skipping undated connection");
                    continue;
                }
                Err(e) => return Err(e),
            };

            tracing::trace!(id = ?other.id, "comparing connection ranges");
            if range.overlaps(&other_range) {
                tracing::debug!(
                    id = ?other.id,
                    kind = %candidate.kind,
                    subject = %candidate.subject,
                    %scope,
                    "connection dates overlap"
                );
                conflicts.push(other);
            }
        }

        Ok(conflicts)
    }

    /// Whether a new connection of `kind` from `subject` to `object` over
    /// `candidate` dates would overlap any of `existing`.
    ///
    /// # Errors
    ///
    /// See [`Self::find_conflicts`].
    pub fn would_overlap(
        &self,
        subject: &str,
        object: &str,
        kind: &str,
        candidate: &DateRecord,
        existing: &[ConnectionRecord],
    ) -> Result<bool, TemporalError> {
        let candidate = ConnectionRecord {
            id: None,
            subject: subject.to_string(),
            object: object.to_string(),
            kind: kind.to_string(),
            dates: candidate.clone(),
        };
        Ok(!self.find_conflicts(&candidate, existing)?.is_empty())
    }

    /// Whether the two records' ranges meet with no gap and no overlap.
    ///
    /// # Errors
    ///
    /// Returns a [`TemporalError`] if either record is not a valid range.
    pub fn are_adjacent(&self, a: &DateRecord, b: &DateRecord) -> Result<bool, TemporalError> {
        let a = TemporalRange::from_record(a)?;
        let b = TemporalRange::from_record(b)?;
        Ok(a.is_adjacent(&b))
    }

    /// Whether the record's own dates form a valid range. Never fails; an
    /// invalid record is reported as `false`.
    #[must_use]
    pub fn validate_span_dates(&self, record: &DateRecord) -> bool {
        match TemporalRange::from_record(record) {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!(error = %e, "span dates rejected");
                false
            }
        }
    }

    /// Whether the record's end precision is no finer than its start
    /// precision. `false` if the record has no valid start.
    #[must_use]
    pub fn validate_span_precisions(&self, record: &DateRecord) -> bool {
        let Ok(Some(start)) = TemporalPoint::from_record(record, Boundary::Start) else {
            return false;
        };
        let Ok(end) = TemporalPoint::from_record(record, Boundary::End) else {
            return false;
        };
        PrecisionValidator::span_precisions_allowed(
            start.precision(),
            end.map(|e| e.precision()),
        )
    }

    /// Whether editing a record from `previous` to `updated` changes date
    /// precision legally: start dates freely, end dates only toward coarser.
    ///
    /// # Errors
    ///
    /// Returns a [`TemporalError`] if either record holds malformed parts.
    pub fn validate_date_edit(
        &self,
        previous: &DateRecord,
        updated: &DateRecord,
    ) -> Result<bool, TemporalError> {
        let precision_of = |record: &DateRecord, boundary| -> Result<_, TemporalError> {
            match TemporalPoint::from_record(record, boundary) {
                Ok(p) => Ok(p.map(|p| p.precision())),
                Err(TemporalError::MissingStartYear) => Ok(None),
                Err(e) => Err(e),
            }
        };

        let start_ok = match precision_of(updated, Boundary::Start)? {
            Some(new) => PrecisionValidator::transition_allowed(
                precision_of(previous, Boundary::Start)?,
                new,
                false,
            ),
            None => true,
        };
        let end_ok = match precision_of(updated, Boundary::End)? {
            Some(new) => PrecisionValidator::transition_allowed(
                precision_of(previous, Boundary::End)?,
                new,
                true,
            ),
            None => true,
        };

        Ok(start_ok && end_ok)
    }

    /// Earliest concrete date of the record's start.
    ///
    /// # Errors
    ///
    /// Returns [`TemporalError::MissingStartYear`] or
    /// [`TemporalError::InvalidDate`] for unusable start fields.
    pub fn normalized_start_date(&self, record: &DateRecord) -> Result<NaiveDate, TemporalError> {
        TemporalPoint::from_record(record, Boundary::Start)?
            .map(|p| p.to_date())
            .ok_or(TemporalError::MissingStartYear)
    }

    /// Latest concrete date of the record's end, `None` if open-ended.
    ///
    /// # Errors
    ///
    /// Returns [`TemporalError::InvalidDate`] for malformed end fields.
    pub fn normalized_end_date(&self, record: &DateRecord) -> Result<Option<NaiveDate>, TemporalError> {
        Ok(TemporalPoint::from_record(record, Boundary::End)?.map(|p| p.to_end_date()))
    }
}
