//! Declared field types applied per record.

use roadval_model::{FieldDefinition, Record, Table};

use super::RecordRule;
use crate::context::RuleContext;
use crate::error::RuleResult;
use crate::field::{FieldCheck, check};

/// Runs the field checker over every declared field the table carries.
pub struct FieldTypeRule {
    fields: Vec<FieldDefinition>,
}

impl FieldTypeRule {
    pub fn new(fields: Vec<FieldDefinition>) -> Self {
        Self { fields }
    }
}

impl RecordRule for FieldTypeRule {
    fn name(&self) -> &'static str {
        "field_type"
    }

    fn check(
        &self,
        record: &Record,
        table: &Table,
        ctx: &RuleContext<'_>,
        messages: &mut Vec<String>,
    ) -> RuleResult<()> {
        for field in &self.fields {
            if !table.has_column(&field.name) {
                continue;
            }
            if let FieldCheck::Invalid(message) =
                check(record.get(&field.name), field, ctx.current_year)
            {
                messages.push(format!("{}: {message}", field.name));
            }
        }
        Ok(())
    }
}
