//! GPS degree/minute/second triples must not be all zero.

use roadval_model::columns::{GPS_EAST, GPS_NORTH};
use roadval_model::{Record, Table};

use super::RecordRule;
use crate::context::RuleContext;
use crate::error::RuleResult;

pub struct GpsNonZeroRule;

impl RecordRule for GpsNonZeroRule {
    fn name(&self) -> &'static str {
        "gps_nonzero"
    }

    fn check(
        &self,
        record: &Record,
        table: &Table,
        _ctx: &RuleContext<'_>,
        messages: &mut Vec<String>,
    ) -> RuleResult<()> {
        for (axis, columns) in [("North", GPS_NORTH), ("East", GPS_EAST)] {
            if !columns.iter().all(|c| table.has_column(c)) {
                continue;
            }
            match components(record, &columns) {
                Some(parts) if parts.iter().all(|p| *p == 0.0) => {
                    messages.push(format!("GPS {axis} coordinates cannot all be zero"));
                }
                Some(_) => {}
                None => messages.push(format!("Invalid GPS {axis} coordinates")),
            }
        }
        Ok(())
    }
}

/// Empty components count as zero; `None` if any is non-numeric.
fn components(record: &Record, columns: &[&str; 3]) -> Option<[f64; 3]> {
    let mut parts = [0.0; 3];
    for (slot, column) in parts.iter_mut().zip(columns) {
        let value = record.get(column);
        if !value.is_empty() {
            *slot = value.as_number()?;
        }
    }
    Some(parts)
}
