//! One record per Link_No.

use std::collections::HashMap;

use roadval_model::Table;
use roadval_model::columns::LINK_NO;

use super::{RecordHit, RulePhase, TableRule};
use crate::context::RuleContext;
use crate::error::RuleResult;

/// Every record whose Link_No occurs more than once gets its own finding.
pub struct UniqueLinkNoRule;

impl TableRule for UniqueLinkNoRule {
    fn name(&self) -> &'static str {
        "unique_link_no"
    }

    fn phase(&self) -> RulePhase {
        RulePhase::BeforeRecords
    }

    fn check(&self, table: &Table, _ctx: &RuleContext<'_>) -> RuleResult<Vec<RecordHit>> {
        if !table.has_column(LINK_NO) {
            return Ok(Vec::new());
        }
        let link_nos: Vec<String> = table
            .rows
            .iter()
            .map(|r| r.get(LINK_NO).canonical())
            .collect();

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for link_no in link_nos.iter().filter(|l| !l.is_empty()) {
            *counts.entry(link_no).or_default() += 1;
        }

        Ok(link_nos
            .iter()
            .enumerate()
            .filter(|(_, l)| counts.get(l.as_str()).is_some_and(|n| *n > 1))
            .map(|(idx, link_no)| {
                RecordHit::new(
                    idx + 1,
                    format!(
                        "Link_No '{link_no}' is duplicated - only one record per link is allowed"
                    ),
                )
            })
            .collect())
    }
}
