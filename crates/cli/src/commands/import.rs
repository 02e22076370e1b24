use std::path::Path;
use std::process;

use kinfolk_core::{
    import_from, FamilyTreeResult, FileSource, ImportError, ImportOptions, ImportReport,
};

use super::{ensure_interchange_file, report_diagnostics};
use crate::{report_import_error, OutputFormat};

pub(crate) fn cmd_import(file: &Path, options: &ImportOptions, output: OutputFormat, quiet: bool) {
    match run_import(file, options) {
        Ok(report) => {
            report_diagnostics(&report.diagnostics, output, quiet);
            match output {
                OutputFormat::Json => {
                    let pretty = serde_json::to_string_pretty(&report.tree)
                        .unwrap_or_else(|e| format!("serialization error: {}", e));
                    println!("{}", pretty);
                }
                OutputFormat::Text => print_summary(&report.tree),
            }
        }
        Err(e) => {
            report_import_error(&e, output, quiet);
            process::exit(1);
        }
    }
}

fn run_import(file: &Path, options: &ImportOptions) -> Result<ImportReport, ImportError> {
    ensure_interchange_file(file)?;
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(import_from(&FileSource::new(file), options))
}

fn print_summary(tree: &FamilyTreeResult) {
    println!("{}", tree.tree_name);
    println!(
        "  {} people, {} relationships ({} spouse, {} parent)",
        tree.people.len(),
        tree.relationships.len(),
        tree.spouse_edges().count(),
        tree.parent_edges().count(),
    );
    for person in &tree.people {
        println!(
            "  {:<6} {} ({})",
            person.source_ref,
            person.display_name(),
            person.lifespan_label()
        );
    }
}
