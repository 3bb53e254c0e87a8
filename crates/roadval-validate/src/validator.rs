//! Generic table validator.
//!
//! One validator per schema: missing-column check, optional empty check,
//! then table rules before the record scan, the record scan itself, and
//! table rules after it. Findings keep that order.

use std::time::Instant;

use roadval_model::{
    DegradedRule, EmptyCheck, ErrorReport, Finding, Ordinal, ReportOutcome, Table, TableSchema,
};
use tracing::{debug, info, info_span, warn};

use crate::context::RuleContext;
use crate::error::RuleError;
use crate::rules::{
    ChainageContinuityRule, FieldTypeRule, FirstTwoDigitsRule, GpsNonZeroRule, LinkExistsRule,
    LinkNoFormatRule, OfficialLengthRule, RecordHit, RecordRule, RequiredValuesRule, RulePhase,
    TableRule, UniqueLinkNoRule,
};

/// The success sentinel for a table whose validation is switched off.
pub fn disabled_report(schema: &TableSchema, columns: Vec<String>, records: usize) -> ErrorReport {
    let width = columns.len();
    ErrorReport {
        table: schema.name.clone(),
        columns,
        records,
        outcome: ReportOutcome::Disabled,
        findings: vec![Finding::table_level(
            Ordinal::NoErrors,
            width,
            format!(
                "SUCCESS: {} validation disabled - empty table and column validation skipped",
                schema.name
            ),
        )],
        degraded_rules: Vec::new(),
    }
}

/// Validates tables of one schema with an ordered set of rules.
pub struct TableValidator {
    schema: TableSchema,
    record_rules: Vec<Box<dyn RecordRule>>,
    table_rules: Vec<Box<dyn TableRule>>,
}

impl TableValidator {
    /// A validator with no rules. Missing-column and empty checks still apply.
    pub fn new(schema: TableSchema) -> Self {
        Self {
            schema,
            record_rules: Vec::new(),
            table_rules: Vec::new(),
        }
    }

    /// Rules selected by the schema's policy switches.
    pub fn from_schema(schema: &TableSchema) -> Self {
        let policy = &schema.policy;
        let mut validator = Self::new(schema.clone())
            .with_record_rule(RequiredValuesRule::new(schema.required.clone()))
            .with_record_rule(FieldTypeRule::new(schema.fields.clone()));

        if policy.link_reference {
            validator = validator.with_record_rule(LinkExistsRule);
        }
        if policy.link_no_format {
            validator = validator.with_record_rule(LinkNoFormatRule);
        }
        if policy.gps_nonzero {
            validator = validator.with_record_rule(GpsNonZeroRule);
        }
        if policy.unique_link_no {
            validator = validator.with_table_rule(UniqueLinkNoRule);
        }
        if policy.chainage_continuity {
            validator = validator.with_table_rule(ChainageContinuityRule);
        }
        if policy.official_length_check {
            validator = validator.with_table_rule(OfficialLengthRule);
        }
        if policy.first_two_digits_check {
            validator = validator.with_table_rule(FirstTwoDigitsRule);
        }
        validator
    }

    #[must_use]
    pub fn with_record_rule(mut self, rule: impl RecordRule + 'static) -> Self {
        self.record_rules.push(Box::new(rule));
        self
    }

    #[must_use]
    pub fn with_table_rule(mut self, rule: impl TableRule + 'static) -> Self {
        self.table_rules.push(Box::new(rule));
        self
    }

    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.record_rules
            .iter()
            .map(|r| r.name())
            .chain(self.table_rules.iter().map(|r| r.name()))
            .collect()
    }

    pub fn validate(&self, table: &Table, ctx: &RuleContext<'_>) -> ErrorReport {
        let name = self.schema.name.as_str();
        let span = info_span!(
            "table",
            table = name,
            rows = table.len(),
            columns = table.columns.len()
        );
        let _guard = span.enter();
        let started = Instant::now();

        let report = self.run(table, ctx);

        info!(
            outcome = ?report.outcome,
            findings = report.finding_count(),
            degraded = report.degraded_rules.len(),
            duration_ms = started.elapsed().as_millis(),
            "table validated"
        );
        report
    }

    fn run(&self, table: &Table, ctx: &RuleContext<'_>) -> ErrorReport {
        let name = self.schema.name.as_str();
        let mut report = ErrorReport {
            table: name.to_string(),
            columns: table.columns.clone(),
            records: table.len(),
            outcome: ReportOutcome::Findings,
            findings: Vec::new(),
            degraded_rules: Vec::new(),
        };
        let width = table.columns.len();

        if !self.schema.policy.enabled {
            warn!("validation disabled for table");
            return disabled_report(&self.schema, report.columns, report.records);
        }

        let missing = table.missing_columns(&self.schema.required);
        if !missing.is_empty() {
            warn!(missing = ?missing, "required columns missing");
            report.outcome = ReportOutcome::SchemaFailure;
            report.findings.push(Finding::table_level(
                Ordinal::NotApplicable,
                width,
                format!("Required columns missing: {}", missing.join(", ")),
            ));
            return report;
        }

        if table.is_empty() {
            let sentinel = match self.schema.policy.empty_check {
                EmptyCheck::Off => None,
                EmptyCheck::EmptyDb => Some(Ordinal::EmptyDb),
                EmptyCheck::EmptyTable => Some(Ordinal::EmptyTable),
            };
            if let Some(ordinal) = sentinel {
                warn!("table is empty");
                report.outcome = ReportOutcome::Empty;
                report.findings.push(Finding::table_level(
                    ordinal,
                    width,
                    format!("WARNING: {name} table is completely empty - no data found"),
                ));
                return report;
            }
        }

        self.apply_table_rules(RulePhase::BeforeRecords, table, ctx, &mut report);
        self.scan_records(table, ctx, &mut report);
        self.apply_table_rules(RulePhase::AfterRecords, table, ctx, &mut report);

        if report.findings.is_empty() {
            report.outcome = ReportOutcome::Clean;
            report.findings.push(Finding::table_level(
                Ordinal::NoErrors,
                width,
                format!("SUCCESS: No validation errors found in {name} table"),
            ));
        }
        report
    }

    fn scan_records(&self, table: &Table, ctx: &RuleContext<'_>, report: &mut ErrorReport) {
        let mut failed: Vec<bool> = vec![false; self.record_rules.len()];
        let mut messages = Vec::new();
        for (ordinal, record) in table.numbered() {
            messages.clear();
            for (idx, rule) in self.record_rules.iter().enumerate() {
                if failed[idx] {
                    continue;
                }
                if let Err(err) = rule.check(record, table, ctx, &mut messages) {
                    failed[idx] = true;
                    degrade(report, rule.name(), &err);
                }
            }
            if !messages.is_empty() {
                report.findings.push(Finding::new(
                    Ordinal::Record(ordinal),
                    record.values_for(&table.columns),
                    messages.join("; "),
                ));
            }
        }
    }

    fn apply_table_rules(
        &self,
        phase: RulePhase,
        table: &Table,
        ctx: &RuleContext<'_>,
        report: &mut ErrorReport,
    ) {
        for rule in self.table_rules.iter().filter(|r| r.phase() == phase) {
            let hits = match rule.check(table, ctx).and_then(|hits| in_range(hits, table)) {
                Ok(hits) => hits,
                Err(err) => {
                    degrade(report, rule.name(), &err);
                    continue;
                }
            };
            debug!(rule = rule.name(), hits = hits.len(), "table rule finished");
            for hit in hits {
                let record = &table.rows[hit.ordinal - 1];
                report.findings.push(Finding::new(
                    Ordinal::Record(hit.ordinal),
                    record.values_for(&table.columns),
                    hit.message,
                ));
            }
        }
    }
}

fn in_range(hits: Vec<RecordHit>, table: &Table) -> Result<Vec<RecordHit>, RuleError> {
    if let Some(bad) = hits
        .iter()
        .find(|h| h.ordinal == 0 || h.ordinal > table.len())
    {
        return Err(RuleError::OrdinalOutOfRange {
            ordinal: bad.ordinal,
            rows: table.len(),
        });
    }
    Ok(hits)
}

fn degrade(report: &mut ErrorReport, rule: &str, err: &RuleError) {
    warn!(rule, error = %err, "rule failed, continuing without it");
    report.degraded_rules.push(DegradedRule {
        rule: rule.to_string(),
        reason: err.to_string(),
    });
}
