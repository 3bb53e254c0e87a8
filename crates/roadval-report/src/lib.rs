//! Report output.
//!
//! Each [`ErrorReport`](roadval_model::ErrorReport) becomes a table of
//! `Record_No`, the original columns, and `Validation_Message`, written as
//! one CSV per table. A run-level JSON document summarizes everything.

pub mod error;
pub mod frame;
pub mod json;
pub mod writer;

pub use error::{ReportError, Result};
pub use frame::{MESSAGE_COLUMN, RECORD_COLUMN, report_to_dataframe};
pub use json::{
    FailedTable, REPORT_FILE_NAME, REPORT_SCHEMA, REPORT_SCHEMA_VERSION, RunPayload, TableEntry,
    run_payload, write_run_json,
};
pub use writer::{render_report_csv, report_file_name, write_report_csv, write_reports_csv};
