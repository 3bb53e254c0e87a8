use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("table {table} declares column {column} more than once")]
    DuplicateColumn { table: String, column: String },

    #[error("record {ordinal} in table {table} has {actual} values, expected {expected}")]
    RowWidth {
        table: String,
        ordinal: usize,
        expected: usize,
        actual: usize,
    },

    #[error("invalid record ordinal: {0:?}")]
    InvalidOrdinal(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
