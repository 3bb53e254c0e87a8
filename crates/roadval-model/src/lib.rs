//! Core data model for road-infrastructure survey validation.
//!
//! Tables arrive as typed [`Record`]s, are checked against an immutable
//! [`TableSchema`], and produce one [`ErrorReport`] each.

#![deny(unsafe_code)]

pub mod columns;
pub mod error;
pub mod finding;
pub mod record;
pub mod schema;
pub mod value;

pub use error::{ModelError, Result};
pub use finding::{
    DegradedRule, ErrorReport, Finding, Ordinal, ReportOutcome, RunSummary, TableCount,
};
pub use record::{Record, Table};
pub use schema::{EmptyCheck, FieldDefinition, FieldKind, TablePolicy, TableSchema};
pub use value::{Value, format_numeric};
