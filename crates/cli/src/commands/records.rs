use std::path::Path;
use std::process;

use kinfolk_core::{parse_document, ImportOptions, RawDocument};

use super::{read_document, report_diagnostics};
use crate::{report_import_error, OutputFormat};

pub(crate) fn cmd_records(file: &Path, options: &ImportOptions, output: OutputFormat, quiet: bool) {
    let text = match read_document(file) {
        Ok(t) => t,
        Err(e) => {
            report_import_error(&e, output, quiet);
            process::exit(1);
        }
    };

    let (document, diagnostics) = parse_document(&text, options);
    report_diagnostics(&diagnostics, output, quiet);

    match output {
        OutputFormat::Json => {
            let pretty = serde_json::to_string_pretty(&document)
                .unwrap_or_else(|e| format!("serialization error: {}", e));
            println!("{}", pretty);
        }
        OutputFormat::Text => print_records(&document),
    }
}

fn print_records(document: &RawDocument) {
    println!(
        "{} individuals, {} families",
        document.individuals.len(),
        document.families.len()
    );
    for i in &document.individuals {
        println!("  {:<6} {} [{:?}]", i.id, i.name, i.sex);
    }
    for f in &document.families {
        println!(
            "  {:<6} {} + {} -> {}",
            f.id,
            f.husband.as_deref().unwrap_or("?"),
            f.wife.as_deref().unwrap_or("?"),
            if f.children.is_empty() {
                "no children".to_string()
            } else {
                f.children.join(", ")
            }
        );
    }
}
