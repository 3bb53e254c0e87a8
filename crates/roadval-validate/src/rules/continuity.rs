//! Chainage continuity within (Province_Code, Kabupaten_Code, Year) groups.
//!
//! Records are sorted by Link_No then ChainageFrom. The first record of each
//! group must start at 0; consecutive records of the same link must join
//! exactly. A change of Link_No resets the chain.

use std::collections::BTreeMap;

use roadval_model::columns::{CHAINAGE_FROM, CHAINAGE_TO, CONTINUITY_GROUP, LINK_NO};
use roadval_model::{Table, format_numeric};

use super::{RecordHit, TableRule};
use crate::context::RuleContext;
use crate::error::{RuleError, RuleResult};

pub struct ChainageContinuityRule;

struct Segment {
    ordinal: usize,
    link_no: String,
    from: f64,
    to: f64,
}

impl TableRule for ChainageContinuityRule {
    fn name(&self) -> &'static str {
        "chainage_continuity"
    }

    fn check(&self, table: &Table, _ctx: &RuleContext<'_>) -> RuleResult<Vec<RecordHit>> {
        for column in CONTINUITY_GROUP
            .iter()
            .chain([LINK_NO, CHAINAGE_FROM, CHAINAGE_TO].iter())
        {
            if !table.has_column(column) {
                return Err(RuleError::MissingColumn {
                    column: (*column).to_string(),
                });
            }
        }

        // Null group components stay in the key as empty text.
        let mut groups: BTreeMap<[String; 3], Vec<Segment>> = BTreeMap::new();
        for (ordinal, record) in table.numbered() {
            let key = CONTINUITY_GROUP.map(|c| record.get(c).canonical());
            let (Some(from), Some(to)) = (
                record.get(CHAINAGE_FROM).as_number(),
                record.get(CHAINAGE_TO).as_number(),
            ) else {
                continue;
            };
            groups.entry(key).or_default().push(Segment {
                ordinal,
                link_no: record.get(LINK_NO).canonical(),
                from,
                to,
            });
        }

        let mut hits = Vec::new();
        for (key, mut segments) in groups {
            segments.sort_by(|a, b| {
                a.link_no
                    .cmp(&b.link_no)
                    .then_with(|| a.from.total_cmp(&b.from))
            });

            if let Some(first) = segments.first() {
                if first.from != 0.0 {
                    hits.push(RecordHit::new(
                        first.ordinal,
                        format!(
                            "ChainageFrom must start at 0 for the group {}",
                            describe_group(&key)
                        ),
                    ));
                }
            }

            for pair in segments.windows(2) {
                let (prev, current) = (&pair[0], &pair[1]);
                if current.link_no == prev.link_no && current.from != prev.to {
                    hits.push(RecordHit::new(
                        current.ordinal,
                        format!(
                            "ChainageFrom ({}) must equal previous ChainageTo ({}) \
                             for continuous chainage within the same link",
                            format_numeric(current.from),
                            format_numeric(prev.to)
                        ),
                    ));
                }
            }
        }
        Ok(hits)
    }
}

fn describe_group(key: &[String; 3]) -> String {
    CONTINUITY_GROUP
        .iter()
        .zip(key)
        .map(|(column, value)| format!("{column}={value}"))
        .collect::<Vec<_>>()
        .join(", ")
}
