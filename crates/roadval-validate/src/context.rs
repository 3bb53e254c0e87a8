//! Read-only inputs shared by every table validator in a run.

use std::collections::{HashMap, HashSet};

use roadval_model::Table;
use roadval_model::columns::{LINK_LENGTH_ACTUAL, LINK_LENGTH_OFFICIAL, LINK_NO};

/// Lengths declared for one link in the reference table.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LinkLengths {
    /// Kilometres.
    pub official: Option<f64>,
    pub actual: Option<f64>,
}

/// Link_No lookup built once from the Link table.
///
/// Keys are canonical text so `"110512345678"` and `110512345678.0` match.
#[derive(Debug, Clone, Default)]
pub struct LinkReference {
    link_nos: HashSet<String>,
    lengths: HashMap<String, LinkLengths>,
}

impl LinkReference {
    /// `None` when the table has no Link_No column.
    pub fn from_table(table: &Table) -> Option<Self> {
        if !table.has_column(LINK_NO) {
            return None;
        }
        let mut reference = Self::default();
        for record in &table.rows {
            let link_no = record.get(LINK_NO).canonical();
            if link_no.is_empty() {
                continue;
            }
            reference.link_nos.insert(link_no.clone());
            reference.lengths.entry(link_no).or_insert(LinkLengths {
                official: record.get(LINK_LENGTH_OFFICIAL).as_number(),
                actual: record.get(LINK_LENGTH_ACTUAL).as_number(),
            });
        }
        Some(reference)
    }

    pub fn contains(&self, link_no: &str) -> bool {
        self.link_nos.contains(link_no)
    }

    /// First record's lengths when a Link_No appears more than once.
    pub fn lengths(&self, link_no: &str) -> Option<LinkLengths> {
        self.lengths.get(link_no).copied()
    }

    pub fn len(&self) -> usize {
        self.link_nos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.link_nos.is_empty()
    }
}

/// Per-run inputs handed to every rule.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub reference: Option<&'a LinkReference>,
    pub current_year: i32,
}

impl<'a> RuleContext<'a> {
    pub fn new(current_year: i32) -> Self {
        Self {
            reference: None,
            current_year,
        }
    }

    #[must_use]
    pub fn with_reference(mut self, reference: &'a LinkReference) -> Self {
        self.reference = Some(reference);
        self
    }
}
