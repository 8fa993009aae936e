//! Which existing connections a new connection must not overlap.
//!
//! Built once at startup and passed by reference into the service.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::record::ConnectionRecord;

/// The set of existing connections a candidate is checked against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictScope {
    /// Same kind, same subject and same object.
    #[default]
    Pair,
    /// Same kind and same subject, any object.
    Subject,
}

impl ConflictScope {
    /// Whether `existing` falls in the comparison set for a connection of
    /// `kind` from `subject` to `object`.
    #[must_use]
    pub fn covers(self, subject: &str, object: &str, kind: &str, existing: &ConnectionRecord) -> bool {
        if existing.kind != kind || existing.subject != subject {
            return false;
        }
        match self {
            ConflictScope::Pair => existing.object == object,
            ConflictScope::Subject => true,
        }
    }
}

impl fmt::Display for ConflictScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConflictScope::Pair => f.write_str("pair"),
            ConflictScope::Subject => f.write_str("subject"),
        }
    }
}

/// Immutable lookup from connection kind to [`ConflictScope`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintTable {
    #[serde(default)]
    pub default_scope: ConflictScope,
    #[serde(default)]
    pub connection_kinds: HashMap<String, ConflictScope>,
}

impl ConstraintTable {
    /// A table where every kind uses `default_scope`.
    #[must_use]
    pub fn uniform(default_scope: ConflictScope) -> Self {
        Self {
            default_scope,
            connection_kinds: HashMap::new(),
        }
    }

    /// Override the scope for one kind.
    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>, scope: ConflictScope) -> Self {
        self.connection_kinds.insert(kind.into(), scope);
        self
    }

    #[must_use]
    pub fn scope_for(&self, kind: &str) -> ConflictScope {
        self.connection_kinds
            .get(kind)
            .copied()
            .unwrap_or(self.default_scope)
    }
}

impl Default for ConstraintTable {
    /// A person holds one job and one home at a time; everything else is
    /// checked per subject/object pair.
    fn default() -> Self {
        Self::uniform(ConflictScope::Pair)
            .with_kind("employment", ConflictScope::Subject)
            .with_kind("residence", ConflictScope::Subject)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::DateRecord;

    fn connection(subject: &str, object: &str, kind: &str) -> ConnectionRecord {
        ConnectionRecord {
            id: None,
            subject: subject.to_string(),
            object: object.to_string(),
            kind: kind.to_string(),
            dates: DateRecord::default(),
        }
    }

    #[test]
    fn default_table_scopes_employment_to_subject() {
        let table = ConstraintTable::default();
        assert_eq!(table.scope_for("employment"), ConflictScope::Subject);
        assert_eq!(table.scope_for("residence"), ConflictScope::Subject);
        assert_eq!(table.scope_for("membership"), ConflictScope::Pair);
    }

    #[test]
    fn pair_scope_requires_same_object() {
        let existing = connection("p", "o1", "membership");
        assert!(ConflictScope::Pair.covers("p", "o1", "membership", &existing));
        assert!(!ConflictScope::Pair.covers("p", "o2", "membership", &existing));
    }

    #[test]
    fn subject_scope_ignores_object() {
        let existing = connection("p", "o1", "employment");
        assert!(ConflictScope::Subject.covers("p", "o2", "employment", &existing));
        assert!(!ConflictScope::Subject.covers("q", "o1", "employment", &existing));
        assert!(!ConflictScope::Subject.covers("p", "o1", "residence", &existing));
    }
}
