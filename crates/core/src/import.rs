//! Import pipeline: text -> records -> drafts -> tree.
//!
//! This is a thin orchestrator over the lexer, assembler and transformer.
//! Each call owns its own assembler and diagnostic sink; nothing is shared
//! between calls.

use serde::Serialize;

use crate::assemble::Assembler;
use crate::ast::RawDocument;
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::error::ImportError;
use crate::lexer;
use crate::model::FamilyTreeResult;
use crate::options::ImportOptions;
use crate::source::DocumentSource;
use crate::transform;

/// The tree plus whatever strict mode had to say about the input.
#[derive(Debug, Clone, Serialize)]
pub struct ImportReport {
    pub tree: FamilyTreeResult,
    pub diagnostics: Vec<Diagnostic>,
}

/// Assemble `text` into raw drafts, with pointer lists linked.
pub fn parse_document(text: &str, options: &ImportOptions) -> (RawDocument, Vec<Diagnostic>) {
    let (document, sink) = assemble_text(text, options);
    (document, sink.into_diagnostics())
}

/// Import a document that is already in memory as text.
pub fn import_text(text: &str, options: &ImportOptions) -> ImportReport {
    let (document, mut sink) = assemble_text(text, options);
    let tree = transform::transform(&document, options, &mut sink);
    ImportReport {
        tree,
        diagnostics: sink.into_diagnostics(),
    }
}

/// Import raw bytes; fails only when they are not UTF-8 text.
pub fn import_bytes(bytes: &[u8], options: &ImportOptions) -> Result<ImportReport, ImportError> {
    let text = std::str::from_utf8(bytes).map_err(|e| {
        ImportError::processing(format!("document is not valid UTF-8 text: {}", e))
    })?;
    Ok(import_text(text, options))
}

/// Read a document from `source` and import it.
pub async fn import_from(
    source: &dyn DocumentSource,
    options: &ImportOptions,
) -> Result<ImportReport, ImportError> {
    tracing::info!(source = %source.describe(), "reading genealogy document");
    let text = source.read_text().await.map_err(|e| {
        tracing::error!(source = %source.describe(), error = %e, "could not read document");
        ImportError::from(e)
    })?;
    Ok(import_text(&text, options))
}

fn assemble_text(text: &str, options: &ImportOptions) -> (RawDocument, DiagnosticSink) {
    let mut assembler = Assembler::new(options.strictness);
    for scanned in lexer::scan(text) {
        assembler.feed_scanned(scanned);
    }
    let (mut document, sink) = assembler.finish();
    transform::link_families(&mut document);

    tracing::info!(
        individuals = document.individuals.len(),
        families = document.families.len(),
        "assembled genealogy document"
    );
    (document, sink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::InMemorySource;

    #[test]
    fn import_text_counts() {
        let report = import_text(
            "0 @I1@ INDI\n1 NAME A /B/\n0 @I2@ INDI\n0 @F1@ FAM\n1 HUSB @I1@\n1 WIFE @I2@\n",
            &ImportOptions::default(),
        );
        assert_eq!(report.tree.people.len(), 2);
        assert_eq!(report.tree.relationships.len(), 1);
        assert!(report.diagnostics.is_empty());
    }

    #[test]
    fn parse_document_links_pointers() {
        let (doc, diags) = parse_document(
            "0 @I1@ INDI\n0 @I2@ INDI\n0 @F1@ FAM\n1 WIFE @I1@\n1 CHIL @I2@\n",
            &ImportOptions::default(),
        );
        assert_eq!(doc.individuals[1].parents, vec!["@I1@"]);
        assert!(diags.is_empty());
    }

    #[test]
    fn import_bytes_rejects_non_text() {
        let err = import_bytes(&[0xc3, 0x28], &ImportOptions::default()).unwrap_err();
        assert_eq!(err.kind(), "processing");
        assert!(err.to_string().contains("UTF-8"));
    }

    #[tokio::test]
    async fn import_from_in_memory_source() {
        let source = InMemorySource::new("mem.ged", "0 @I1@ INDI\n1 NAME Cher\n");
        let report = import_from(&source, &ImportOptions::default())
            .await
            .unwrap();
        assert_eq!(report.tree.tree_name, "Cher Family Tree");
    }

    #[tokio::test]
    async fn import_from_surfaces_read_failures() {
        let source = InMemorySource::new("bad.ged", vec![0xff]);
        let err = import_from(&source, &ImportOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ImportError::Processing { .. }));
    }
}
