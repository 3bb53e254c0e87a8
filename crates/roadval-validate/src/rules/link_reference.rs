//! Link_No existence in the reference table.

use roadval_model::columns::{LINK_NO, REFERENCE_TABLE};
use roadval_model::{Record, Table};

use super::RecordRule;
use crate::context::RuleContext;
use crate::error::{RuleError, RuleResult};

pub struct LinkExistsRule;

impl RecordRule for LinkExistsRule {
    fn name(&self) -> &'static str {
        "link_reference"
    }

    fn check(
        &self,
        record: &Record,
        table: &Table,
        ctx: &RuleContext<'_>,
        messages: &mut Vec<String>,
    ) -> RuleResult<()> {
        if !table.has_column(LINK_NO) {
            return Ok(());
        }
        let reference = ctx.reference.ok_or(RuleError::MissingReference {
            table: REFERENCE_TABLE,
        })?;
        let link_no = record.get(LINK_NO).canonical();
        if !link_no.is_empty() && !reference.contains(&link_no) {
            messages.push(format!(
                "Link_No '{link_no}' does not exist in {REFERENCE_TABLE} table"
            ));
        }
        Ok(())
    }
}
