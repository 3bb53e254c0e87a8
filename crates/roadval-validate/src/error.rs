use thiserror::Error;

/// Failure inside a single rule. The table keeps validating without it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RuleError {
    #[error("no {table} reference table available")]
    MissingReference { table: &'static str },

    #[error("column {column} is not present")]
    MissingColumn { column: String },

    #[error("rule reported record {ordinal}, table has {rows} records")]
    OrdinalOutOfRange { ordinal: usize, rows: usize },
}

pub type RuleResult<T> = std::result::Result<T, RuleError>;
