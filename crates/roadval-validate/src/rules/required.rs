//! Required-value check.

use roadval_model::{Record, Table};

use super::RecordRule;
use crate::context::RuleContext;
use crate::error::RuleResult;

/// Every required column must be filled on every record.
pub struct RequiredValuesRule {
    columns: Vec<String>,
}

impl RequiredValuesRule {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }
}

impl RecordRule for RequiredValuesRule {
    fn name(&self) -> &'static str {
        "required_values"
    }

    fn check(
        &self,
        record: &Record,
        table: &Table,
        _ctx: &RuleContext<'_>,
        messages: &mut Vec<String>,
    ) -> RuleResult<()> {
        for column in &self.columns {
            if table.has_column(column) && record.get(column).is_empty() {
                messages.push(format!("{column} is required"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roadval_model::Value;

    #[test]
    fn reports_each_empty_required_column() {
        let table = Table::from_rows(
            "Link",
            vec!["Link_No".to_string(), "Link_Name".to_string()],
            vec![vec![Value::text(" "), Value::Null]],
        )
        .unwrap();
        let rule = RequiredValuesRule::new(vec![
            "Link_No".to_string(),
            "Link_Name".to_string(),
            "Link_Code".to_string(),
        ]);
        let mut messages = Vec::new();
        rule.check(&table.rows[0], &table, &RuleContext::new(2024), &mut messages)
            .unwrap();
        assert_eq!(messages, vec!["Link_No is required", "Link_Name is required"]);
    }
}
