//! # lifespan-core
//!
//! Temporal precision and date-range engine for Lifespan.
//!
//! Dates in Lifespan are often known only to the year or month. This crate
//! models such dates and answers the questions connection workflows ask
//! before persisting a relationship:
//! - [`Precision`] and [`PrecisionValidator`]: rules for how precision may change
//! - [`TemporalPoint`]: a date at year, month or day precision
//! - [`TemporalRange`]: an interval with overlap and adjacency checks
//! - [`TemporalService`]: the façade callers use with plain records
//! - [`ConstraintTable`]: which existing connections a new one is checked against
//! - Error hierarchy ([`LifespanError`], [`TemporalError`])

pub mod config;
pub mod constraint;
pub mod error;
pub mod point;
pub mod precision;
pub mod range;
pub mod record;
pub mod service;

pub use config::Config;
pub use constraint::{ConflictScope, ConstraintTable};
pub use error::{LifespanError, Result, TemporalError};
pub use point::TemporalPoint;
pub use precision::{Precision, PrecisionValidator};
pub use range::TemporalRange;
pub use record::{Boundary, ConnectionRecord, DateRecord};
pub use service::TemporalService;
