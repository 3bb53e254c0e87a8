//! Validation engine for road-infrastructure survey tables.
//!
//! Each table is checked against its [`TableSchema`](roadval_model::TableSchema)
//! by a [`TableValidator`] built from the schema's policy switches:
//!
//! - **Required values**: required columns must be filled on every record
//! - **Field types**: text, numeric ranges, Yes/No values, survey years
//! - **Link references**: Link_No must exist in the Link table
//! - **Link number format**: 12 digits prefixed by the province code
//! - **GPS**: coordinate triples must not be all zero
//! - **Unique Link_No**: one record per link
//! - **Chainage continuity**: grouped, sorted, gap-free chainage
//! - **Link length**: last alignment chainage against the official length
//!
//! # Example
//!
//! ```ignore
//! use roadval_validate::{RunOptions, validate_run};
//!
//! let result = validate_run(&tables, &registry, &RunOptions::default());
//! for report in &result.reports {
//!     println!("{}: {} findings", report.table, report.finding_count());
//! }
//! ```

pub mod context;
pub mod engine;
pub mod error;
pub mod field;
pub mod rules;
pub mod validator;

pub use context::{LinkLengths, LinkReference, RuleContext};
pub use engine::{
    RunOptions, RunResult, TableFailure, validate_loaded, validate_run, validate_table,
};
pub use error::{RuleError, RuleResult};
pub use field::{FieldCheck, check};
pub use rules::{RecordHit, RecordRule, RulePhase, TableRule};
pub use validator::{TableValidator, disabled_report};
