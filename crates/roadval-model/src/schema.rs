//! Declarative table schemas and per-table rule switches.

use serde::{Deserialize, Serialize};

/// Declared type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Number,
    /// Yes/No, True/False, or 0/1.
    YesNo,
    /// [`FieldKind::YesNo`] that also accepts y/n and on/off.
    LenientYesNo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDefinition {
    pub name: String,
    pub kind: FieldKind,
    /// Inclusive numeric bounds; either bound may be infinite.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<[f64; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_values: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    /// Year window 1900..=current year instead of the declared range.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub calendar_year: bool,
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            range: None,
            valid_values: None,
            max_length: None,
            calendar_year: false,
        }
    }

    #[must_use]
    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.range = Some([min, max]);
        self
    }

    #[must_use]
    pub fn with_valid_values(mut self, values: &[&str]) -> Self {
        self.valid_values = Some(values.iter().map(|v| (*v).to_string()).collect());
        self
    }

    #[must_use]
    pub fn with_max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    #[must_use]
    pub fn calendar_year(mut self) -> Self {
        self.calendar_year = true;
        self
    }
}

/// Sentinel emitted when an empty-table check fires.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyCheck {
    #[default]
    Off,
    EmptyDb,
    EmptyTable,
}

/// Rule switches for one table. Everything defaults to off except `enabled`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TablePolicy {
    pub enabled: bool,
    pub empty_check: EmptyCheck,
    /// Link_No must exist in the reference table.
    pub link_reference: bool,
    /// At most one record per Link_No.
    pub unique_link_no: bool,
    /// Link_No is 12 digits prefixed by Province_Code.
    pub link_no_format: bool,
    pub gps_nonzero: bool,
    pub official_length_check: bool,
    pub first_two_digits_check: bool,
    pub chainage_continuity: bool,
}

impl Default for TablePolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            empty_check: EmptyCheck::Off,
            link_reference: false,
            unique_link_no: false,
            link_no_format: false,
            gps_nonzero: false,
            official_length_check: false,
            first_two_digits_check: false,
            chainage_continuity: false,
        }
    }
}

impl TablePolicy {
    /// Names of the switches that are on, for listings.
    pub fn active_rules(&self) -> Vec<&'static str> {
        [
            (self.link_reference, "link_reference"),
            (self.unique_link_no, "unique_link_no"),
            (self.link_no_format, "link_no_format"),
            (self.gps_nonzero, "gps_nonzero"),
            (self.official_length_check, "official_length_check"),
            (self.first_two_digits_check, "first_two_digits_check"),
            (self.chainage_continuity, "chainage_continuity"),
        ]
        .into_iter()
        .filter_map(|(on, name)| on.then_some(name))
        .collect()
    }
}

/// Schema for one table. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableSchema {
    pub name: String,
    pub required: Vec<String>,
    #[serde(default, rename = "field")]
    pub fields: Vec<FieldDefinition>,
    #[serde(default)]
    pub policy: TablePolicy,
}

impl TableSchema {
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Every column the schema mentions: required first, then typed fields.
    pub fn known_columns(&self) -> Vec<&str> {
        let mut columns: Vec<&str> = self.required.iter().map(String::as_str).collect();
        for field in &self.fields {
            if !columns.contains(&field.name.as_str()) {
                columns.push(&field.name);
            }
        }
        columns
    }
}
