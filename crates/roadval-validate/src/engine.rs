//! Validation runs across every registered table.

use std::fmt;
use std::time::Instant;

use chrono::Datelike;
use roadval_model::columns::REFERENCE_TABLE;
use roadval_model::{ErrorReport, RunSummary, Table};
use roadval_standards::SchemaRegistry;
use tracing::{debug, info, info_span, warn};

use crate::context::{LinkReference, RuleContext};
use crate::validator::{TableValidator, disabled_report};

/// Options for one run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Upper bound for calendar-year fields.
    pub current_year: i32,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            current_year: chrono::Local::now().year(),
        }
    }
}

impl RunOptions {
    #[must_use]
    pub fn with_current_year(mut self, year: i32) -> Self {
        self.current_year = year;
        self
    }
}

/// A table that could not be validated normally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableFailure {
    /// Registered but absent from the input.
    NotSupplied { table: String },
    /// Supplied but no schema is registered for it.
    Unregistered { table: String },
    /// Required columns missing; the table was not scanned.
    Schema { table: String, missing: Vec<String> },
    /// Supplied but its source could not be read.
    Unreadable { table: String, reason: String },
}

impl TableFailure {
    pub fn table(&self) -> &str {
        match self {
            Self::NotSupplied { table }
            | Self::Unregistered { table }
            | Self::Schema { table, .. }
            | Self::Unreadable { table, .. } => table,
        }
    }
}

impl fmt::Display for TableFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotSupplied { table } => write!(f, "{table}: table not supplied"),
            Self::Unregistered { table } => write!(f, "{table}: no schema registered"),
            Self::Schema { table, missing } => {
                write!(f, "{table}: required columns missing: {}", missing.join(", "))
            }
            Self::Unreadable { table, reason } => write!(f, "{table}: unreadable: {reason}"),
        }
    }
}

/// Reports for every validated table plus what went wrong at table level.
#[derive(Debug, Clone)]
pub struct RunResult {
    /// In registry order.
    pub reports: Vec<ErrorReport>,
    pub summary: RunSummary,
    pub failures: Vec<TableFailure>,
}

impl RunResult {
    pub fn report(&self, table: &str) -> Option<&ErrorReport> {
        self.reports.iter().find(|r| r.table == table)
    }

    /// True when any table failed at schema level or was not supplied.
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn total_findings(&self) -> usize {
        self.summary.total()
    }
}

/// Validates one table against its schema.
pub fn validate_table(
    table: &Table,
    registry: &SchemaRegistry,
    ctx: &RuleContext<'_>,
) -> Option<ErrorReport> {
    registry
        .get(&table.name)
        .map(|schema| TableValidator::from_schema(schema).validate(table, ctx))
}

/// Validates every registered table found in `tables`.
///
/// The Link table, when present with a Link_No column, becomes the shared
/// reference for every cross-table rule in the run.
pub fn validate_run(tables: &[Table], registry: &SchemaRegistry, options: &RunOptions) -> RunResult {
    validate_loaded(tables, &[], registry, options)
}

/// Like [`validate_run`], with `(table, reason)` pairs for tables whose
/// source failed to load. Those become [`TableFailure::Unreadable`] while
/// every other table is still validated.
pub fn validate_loaded(
    tables: &[Table],
    unreadable: &[(String, String)],
    registry: &SchemaRegistry,
    options: &RunOptions,
) -> RunResult {
    let span = info_span!("validation_run", tables = tables.len(), schemas = registry.len());
    let _guard = span.enter();
    let started = Instant::now();

    let reference = tables
        .iter()
        .find(|t| t.name == REFERENCE_TABLE)
        .and_then(LinkReference::from_table);
    match &reference {
        Some(reference) => info!(links = reference.len(), "loaded link reference"),
        None => warn!("no usable {REFERENCE_TABLE} table; cross-table rules will be skipped"),
    }
    let mut ctx = RuleContext::new(options.current_year);
    if let Some(reference) = &reference {
        ctx = ctx.with_reference(reference);
    }

    let mut reports = Vec::new();
    let mut failures = Vec::new();
    for schema in registry.tables() {
        let Some(table) = tables.iter().find(|t| t.name == schema.name) else {
            if !schema.policy.enabled {
                debug!(table = %schema.name, "disabled table not supplied");
                reports.push(disabled_report(schema, schema.required.clone(), 0));
            } else if let Some((_, reason)) = unreadable.iter().find(|(t, _)| *t == schema.name) {
                failures.push(TableFailure::Unreadable {
                    table: schema.name.clone(),
                    reason: reason.clone(),
                });
            } else {
                warn!(table = %schema.name, "table not supplied");
                failures.push(TableFailure::NotSupplied {
                    table: schema.name.clone(),
                });
            }
            continue;
        };
        let report = TableValidator::from_schema(schema).validate(table, &ctx);
        if report.is_schema_failure() {
            failures.push(TableFailure::Schema {
                table: schema.name.clone(),
                missing: table
                    .missing_columns(&schema.required)
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
            });
        }
        reports.push(report);
    }

    for table in tables {
        if registry.get(&table.name).is_none() {
            warn!(table = %table.name, "no schema registered, skipping");
            failures.push(TableFailure::Unregistered {
                table: table.name.clone(),
            });
        }
    }

    let summary = RunSummary::from_reports(&reports);
    info!(
        reports = reports.len(),
        findings = summary.total(),
        failures = failures.len(),
        duration_ms = started.elapsed().as_millis(),
        "validation run finished"
    );
    RunResult {
        reports,
        summary,
        failures,
    }
}
