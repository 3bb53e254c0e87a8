//! Pluggable validation rules.
//!
//! A [`RecordRule`] looks at one record at a time and contributes messages to
//! that record's aggregated finding. A [`TableRule`] sees the whole table and
//! reports separate findings against specific records.
//!
//! # Implementing a rule
//!
//! ```ignore
//! struct NoBlankNames;
//!
//! impl RecordRule for NoBlankNames {
//!     fn name(&self) -> &'static str {
//!         "no_blank_names"
//!     }
//!
//!     fn check(&self, record: &Record, _table: &Table, _ctx: &RuleContext<'_>,
//!         messages: &mut Vec<String>) -> RuleResult<()> {
//!         if record.get("Link_Name").is_empty() {
//!             messages.push("Link_Name is blank".to_string());
//!         }
//!         Ok(())
//!     }
//! }
//! ```

pub mod continuity;
pub mod duplicate;
pub mod field_type;
pub mod gps;
pub mod link_format;
pub mod link_length;
pub mod link_reference;
pub mod required;

use roadval_model::{Record, Table};

use crate::context::RuleContext;
use crate::error::RuleResult;

pub use continuity::ChainageContinuityRule;
pub use duplicate::UniqueLinkNoRule;
pub use field_type::FieldTypeRule;
pub use gps::GpsNonZeroRule;
pub use link_format::LinkNoFormatRule;
pub use link_length::{FirstTwoDigitsRule, OfficialLengthRule};
pub use link_reference::LinkExistsRule;
pub use required::RequiredValuesRule;

/// Rule evaluated once per record.
pub trait RecordRule: Send + Sync {
    fn name(&self) -> &'static str;

    /// Appends zero or more messages for `record`.
    fn check(
        &self,
        record: &Record,
        table: &Table,
        ctx: &RuleContext<'_>,
        messages: &mut Vec<String>,
    ) -> RuleResult<()>;
}

/// When a [`TableRule`] runs relative to the record scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RulePhase {
    BeforeRecords,
    AfterRecords,
}

/// A finding a table rule attaches to one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordHit {
    /// 1-based.
    pub ordinal: usize,
    pub message: String,
}

impl RecordHit {
    pub fn new(ordinal: usize, message: impl Into<String>) -> Self {
        Self {
            ordinal,
            message: message.into(),
        }
    }
}

/// Rule evaluated over the whole table.
pub trait TableRule: Send + Sync {
    fn name(&self) -> &'static str;

    fn phase(&self) -> RulePhase {
        RulePhase::AfterRecords
    }

    fn check(&self, table: &Table, ctx: &RuleContext<'_>) -> RuleResult<Vec<RecordHit>>;
}
