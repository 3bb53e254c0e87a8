//! Alignment chainage against the lengths declared in the Link table.

use std::collections::HashMap;

use roadval_model::columns::{CHAINAGE_RB, LINK_NO, REFERENCE_TABLE};
use roadval_model::{Table, format_numeric};

use super::{RecordHit, TableRule};
use crate::context::{LinkReference, RuleContext};
use crate::error::{RuleError, RuleResult};

/// Links at or below this official length (km) are not compared.
pub const SHORT_LINK_KM: f64 = 1.5;
/// Allowed gap between last chainage and official length, in metres.
pub const LENGTH_TOLERANCE_M: f64 = 1500.0;

/// Record holding the largest Chainage_RB for one link.
struct LastChainage {
    link_no: String,
    ordinal: usize,
    chainage: f64,
}

/// Max Chainage_RB per Link_No, links in first-seen order. The first record
/// holding the max wins ties; non-numeric chainage is ignored.
fn last_chainage_per_link(table: &Table) -> Vec<LastChainage> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut out: Vec<LastChainage> = Vec::new();
    for (ordinal, record) in table.numbered() {
        let link_no = record.get(LINK_NO).canonical();
        if link_no.is_empty() {
            continue;
        }
        let Some(chainage) = record.get(CHAINAGE_RB).as_number() else {
            continue;
        };
        match index.get(&link_no) {
            Some(&slot) => {
                if chainage > out[slot].chainage {
                    out[slot].chainage = chainage;
                    out[slot].ordinal = ordinal;
                }
            }
            None => {
                index.insert(link_no.clone(), out.len());
                out.push(LastChainage {
                    link_no,
                    ordinal,
                    chainage,
                });
            }
        }
    }
    out
}

fn require_inputs<'a>(table: &Table, ctx: &RuleContext<'a>) -> RuleResult<&'a LinkReference> {
    for column in [LINK_NO, CHAINAGE_RB] {
        if !table.has_column(column) {
            return Err(RuleError::MissingColumn {
                column: column.to_string(),
            });
        }
    }
    ctx.reference.ok_or(RuleError::MissingReference {
        table: REFERENCE_TABLE,
    })
}

/// Last Chainage_RB must be within 1500 m of Link_Length_Official.
pub struct OfficialLengthRule;

impl TableRule for OfficialLengthRule {
    fn name(&self) -> &'static str {
        "official_length"
    }

    fn check(&self, table: &Table, ctx: &RuleContext<'_>) -> RuleResult<Vec<RecordHit>> {
        let reference = require_inputs(table, ctx)?;
        let mut hits = Vec::new();
        for last in last_chainage_per_link(table) {
            let Some(official_km) = reference
                .lengths(&last.link_no)
                .and_then(|lengths| lengths.official)
            else {
                continue;
            };
            if official_km <= SHORT_LINK_KM {
                continue;
            }
            let official_m = official_km * 1000.0;
            let delta = (last.chainage - official_m).abs();
            if delta > LENGTH_TOLERANCE_M {
                hits.push(RecordHit::new(
                    last.ordinal,
                    format!(
                        "Last Chainage_RB ({} m) does not match Link_Length_Official \
                         ({} km = {official_m:.0} m) within tolerance of {} m for \
                         Link_No {} (difference {} m)",
                        format_numeric(last.chainage),
                        format_numeric(official_km),
                        format_numeric(LENGTH_TOLERANCE_M),
                        last.link_no,
                        format_numeric(delta),
                    ),
                ));
            }
        }
        Ok(hits)
    }
}

/// Leading two digits of the integer part, trailing zeros dropped.
pub fn leading_digits(value: f64) -> String {
    let integer = format!("{}", value.trunc().abs());
    let trimmed = integer.trim_end_matches('0');
    let base = if trimmed.is_empty() { "0" } else { trimmed };
    base.chars().take(2).collect()
}

/// First two digits of last Chainage_RB must match those of Link_Length_Actual.
pub struct FirstTwoDigitsRule;

impl TableRule for FirstTwoDigitsRule {
    fn name(&self) -> &'static str {
        "first_two_digits"
    }

    fn check(&self, table: &Table, ctx: &RuleContext<'_>) -> RuleResult<Vec<RecordHit>> {
        let reference = require_inputs(table, ctx)?;
        let mut hits = Vec::new();
        for last in last_chainage_per_link(table) {
            let Some(actual) = reference
                .lengths(&last.link_no)
                .and_then(|lengths| lengths.actual)
            else {
                continue;
            };
            let chainage_digits = leading_digits(last.chainage);
            let actual_digits = leading_digits(actual);
            if chainage_digits != actual_digits {
                hits.push(RecordHit::new(
                    last.ordinal,
                    format!(
                        "First two digits of last Chainage_RB ({chainage_digits}) do not match \
                         first two digits of Link_Length_Actual ({actual_digits}) for Link_No {}",
                        last.link_no
                    ),
                ));
            }
        }
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roadval_model::Value;

    const LINK: &str = "110512345678";

    fn reference(official: &str, actual: &str) -> LinkReference {
        let link = Table::from_rows(
            "Link",
            vec![
                "Link_No".to_string(),
                "Link_Length_Official".to_string(),
                "Link_Length_Actual".to_string(),
            ],
            vec![vec![
                Value::text(LINK),
                Value::text(official),
                Value::text(actual),
            ]],
        )
        .unwrap();
        LinkReference::from_table(&link).unwrap()
    }

    fn alignment(chainages: &[&str]) -> Table {
        Table::from_rows(
            "Alignment",
            vec!["Link_No".to_string(), "Chainage_RB".to_string()],
            chainages
                .iter()
                .map(|c| vec![Value::text(LINK), Value::text(*c)])
                .collect(),
        )
        .unwrap()
    }

    fn official_hits(official: &str, chainages: &[&str]) -> Vec<RecordHit> {
        let reference = reference(official, "");
        let ctx = RuleContext::new(2024).with_reference(&reference);
        OfficialLengthRule.check(&alignment(chainages), &ctx).unwrap()
    }

    #[test]
    fn flags_max_chainage_record_beyond_tolerance() {
        let hits = official_hits("2.0", &["0", "3600", "1800"]);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].ordinal, 2);
        assert_eq!(
            hits[0].message,
            "Last Chainage_RB (3600 m) does not match Link_Length_Official (2 km = 2000 m) \
             within tolerance of 1500 m for Link_No 110512345678 (difference 1600 m)"
        );
    }

    #[test]
    fn tolerance_is_inclusive() {
        assert!(official_hits("2.0", &["3500"]).is_empty());
        assert!(official_hits("2.0", &["500"]).is_empty());
        assert_eq!(official_hits("2.0", &["3500.01"]).len(), 1);
    }

    #[test]
    fn short_links_are_exempt() {
        assert!(official_hits("1.5", &["9000"]).is_empty());
        assert!(official_hits("0.4", &["0"]).is_empty());
    }

    #[test]
    fn ties_annotate_first_record() {
        let hits = official_hits("2.0", &["4000", "4000"]);
        assert_eq!(hits[0].ordinal, 1);
    }

    #[test]
    fn unknown_or_unmeasured_links_are_skipped() {
        assert!(official_hits("", &["9000"]).is_empty());
        let reference = reference("2.0", "");
        let ctx = RuleContext::new(2024).with_reference(&reference);
        let other = Table::from_rows(
            "Alignment",
            vec!["Link_No".to_string(), "Chainage_RB".to_string()],
            vec![vec![Value::text("999"), Value::text("9000")]],
        )
        .unwrap();
        assert!(OfficialLengthRule.check(&other, &ctx).unwrap().is_empty());
    }

    #[test]
    fn requires_reference() {
        let err = OfficialLengthRule
            .check(&alignment(&["1"]), &RuleContext::new(2024))
            .unwrap_err();
        assert!(matches!(err, RuleError::MissingReference { .. }));
    }

    #[test]
    fn leading_digits_normalization() {
        assert_eq!(leading_digits(12345.9), "12");
        assert_eq!(leading_digits(1200.0), "12");
        assert_eq!(leading_digits(12.3), "12");
        assert_eq!(leading_digits(100.0), "1");
        assert_eq!(leading_digits(0.4), "0");
    }

    #[test]
    fn first_two_digits_compares_against_actual_length() {
        let reference = reference("2.0", "12.3");
        let ctx = RuleContext::new(2024).with_reference(&reference);
        assert!(FirstTwoDigitsRule
            .check(&alignment(&["0", "12250"]), &ctx)
            .unwrap()
            .is_empty());
        let hits = FirstTwoDigitsRule
            .check(&alignment(&["0", "9800"]), &ctx)
            .unwrap();
        assert_eq!(
            hits[0].message,
            "First two digits of last Chainage_RB (98) do not match first two digits \
             of Link_Length_Actual (12) for Link_No 110512345678"
        );
    }
}
