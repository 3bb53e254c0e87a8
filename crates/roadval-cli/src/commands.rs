use anyhow::{Context, Result};
use roadval_cli::pipeline::{ReportFormat, ValidationOutcome, ValidationRequest, run_validation};
use roadval_standards::SchemaRegistry;

use crate::cli::{ReportFormatArg, TablesArgs, ValidateArgs};
use crate::summary::print_schemas;

pub fn run_validate(args: &ValidateArgs) -> Result<ValidationOutcome> {
    let request = ValidationRequest {
        input_dir: args.input_dir.clone(),
        output_dir: args.output_dir.clone(),
        format: match args.format {
            ReportFormatArg::Csv => ReportFormat::Csv,
            ReportFormatArg::Json => ReportFormat::Json,
            ReportFormatArg::Both => ReportFormat::Both,
        },
        dry_run: args.dry_run,
        schemas: args.schemas.path.clone(),
        current_year: args.current_year,
    };
    run_validation(&request)
}

pub fn run_tables(args: &TablesArgs) -> Result<()> {
    let registry = SchemaRegistry::resolve(args.schemas.path.as_deref()).context("load schemas")?;
    println!("Schemas: {} (sha256 {})", registry.source(), registry.sha256());
    print_schemas(registry.tables());
    Ok(())
}
