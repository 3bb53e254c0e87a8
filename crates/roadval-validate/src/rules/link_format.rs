//! Link number format: 12 digits, prefixed by the province code.

use roadval_model::columns::{LINK_NO, PROVINCE_CODE};
use roadval_model::{Record, Table};

use super::RecordRule;
use crate::context::RuleContext;
use crate::error::RuleResult;

pub const LINK_NO_LENGTH: usize = 12;

pub struct LinkNoFormatRule;

impl RecordRule for LinkNoFormatRule {
    fn name(&self) -> &'static str {
        "link_no_format"
    }

    fn check(
        &self,
        record: &Record,
        table: &Table,
        _ctx: &RuleContext<'_>,
        messages: &mut Vec<String>,
    ) -> RuleResult<()> {
        if !table.has_column(LINK_NO) {
            return Ok(());
        }
        let link_no = record.get(LINK_NO).canonical();
        if link_no.is_empty() {
            return Ok(());
        }
        let province = record.get(PROVINCE_CODE).canonical();

        let problem = if !link_no.chars().all(|c| c.is_ascii_digit()) {
            Some("invalid format")
        } else if link_no.len() != LINK_NO_LENGTH {
            Some("invalid length")
        } else if !link_no.starts_with(&province) {
            Some("does not start with province code")
        } else {
            None
        };
        if let Some(problem) = problem {
            messages.push(format!("{LINK_NO}: {problem}"));
        }
        Ok(())
    }
}
