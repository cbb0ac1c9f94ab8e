use cdr_core::entities::{AuditResult, ContextAnswers, ExportView};
use schemars::schema_for;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{SchemaArgs, SchemaType};

/// Handle `cdr schema`. Always JSON: a schema has no table form.
pub fn handle(args: &SchemaArgs, _flags: &GlobalFlags) -> anyhow::Result<()> {
    let schema = match args.type_name {
        SchemaType::AuditResult => schema_for!(AuditResult),
        SchemaType::ExportView => schema_for!(ExportView),
        SchemaType::ContextAnswers => schema_for!(ContextAnswers),
    };
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
