pub(crate) mod import;
pub(crate) mod records;

use std::path::Path;

use kinfolk_core::source::has_interchange_extension;
use kinfolk_core::{Diagnostic, DocumentSource, FileSource, ImportError};

use crate::OutputFormat;

/// Reject anything that is not a `.ged` / `.gedcom` file before reading it.
pub(crate) fn ensure_interchange_file(file: &Path) -> Result<(), ImportError> {
    if has_interchange_extension(file) {
        Ok(())
    } else {
        Err(ImportError::InputType {
            path: file.display().to_string(),
        })
    }
}

/// Read the whole document on a throwaway runtime.
pub(crate) fn read_document(file: &Path) -> Result<String, ImportError> {
    ensure_interchange_file(file)?;
    let runtime = tokio::runtime::Runtime::new()?;
    let source = FileSource::new(file);
    Ok(runtime.block_on(source.read_text())?)
}

/// Print strict-mode diagnostics to stderr.
pub(crate) fn report_diagnostics(diagnostics: &[Diagnostic], output: OutputFormat, quiet: bool) {
    if diagnostics.is_empty() {
        return;
    }
    match output {
        OutputFormat::Json => {
            let json = serde_json::json!({ "diagnostics": diagnostics });
            let pretty = serde_json::to_string_pretty(&json)
                .unwrap_or_else(|e| format!("serialization error: {}", e));
            eprintln!("{}", pretty);
        }
        OutputFormat::Text => {
            if !quiet {
                for d in diagnostics {
                    eprintln!("warning: {}", d);
                }
            }
        }
    }
}
