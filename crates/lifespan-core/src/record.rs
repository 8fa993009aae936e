//! Plain input records handed to the engine by the surrounding application.

use serde::{Deserialize, Serialize};

use crate::point::TemporalPoint;

/// Which side of a record's extent to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    Start,
    End,
}

/// The six raw date fields stored on a span.
///
/// Month and day may be absent or zero; both mean "not specified".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_month: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_day: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_month: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_day: Option<u32>,
}

impl DateRecord {
    /// Build a record from already-constructed points.
    #[must_use]
    pub fn from_points(start: &TemporalPoint, end: Option<&TemporalPoint>) -> Self {
        Self {
            start_year: Some(start.year()),
            start_month: start.month(),
            start_day: start.day(),
            end_year: end.map(TemporalPoint::year),
            end_month: end.and_then(TemporalPoint::month),
            end_day: end.and_then(TemporalPoint::day),
        }
    }

    /// Raw `(year, month, day)` fields for one boundary.
    #[must_use]
    pub fn parts(&self, boundary: Boundary) -> (Option<i32>, Option<u32>, Option<u32>) {
        match boundary {
            Boundary::Start => (self.start_year, self.start_month, self.start_day),
            Boundary::End => (self.end_year, self.end_month, self.end_day),
        }
    }
}

/// A typed relationship between two spans, carrying its own dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub subject: String,
    pub object: String,
    /// Relationship type (e.g., "employment", "residence").
    pub kind: String,
    #[serde(flatten)]
    pub dates: DateRecord,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_record_reads_flat_date_fields() {
        let json = r#"{
            "id": "c1",
            "subject": "people/p",
            "object": "orgs/o",
            "kind": "employment",
            "start_year": 2000,
            "start_month": 0,
            "end_year": 2005
        }"#;

        let record: ConnectionRecord = serde_json::from_str(json).expect("deserialize");
        assert_eq!(record.id.as_deref(), Some("c1"));
        assert_eq!(record.dates.start_year, Some(2000));
        assert_eq!(record.dates.start_month, Some(0));
        assert_eq!(record.dates.end_year, Some(2005));
        assert_eq!(record.dates.end_day, None);
    }

    #[test]
    fn parts_selects_the_requested_boundary() {
        let record = DateRecord {
            start_year: Some(1990),
            start_month: Some(4),
            end_year: Some(1995),
            end_day: Some(3),
            ..DateRecord::default()
        };
        assert_eq!(record.parts(Boundary::Start), (Some(1990), Some(4), None));
        assert_eq!(record.parts(Boundary::End), (Some(1995), None, Some(3)));
    }
}
