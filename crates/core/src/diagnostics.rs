//! Strict-mode diagnostics.
//!
//! The importer never fails on odd input. In strict mode it records what it
//! skipped or could not resolve so the caller can show it to the user.

use serde::{Deserialize, Serialize};

use crate::options::Strictness;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Non-blank line with fewer than two tokens or a non-numeric level.
    MalformedLine,
    /// Tag that the importer does not recognize at that position.
    UnknownTag,
    /// `DATE` / `PLAC` line with no open birth, death or marriage event.
    OrphanEventDetail,
    /// A record pointer already used earlier in the document.
    DuplicatePointer,
    /// A date that could not be normalized to `YYYY-MM-DD`.
    UnparseableDate,
    /// A family member pointer that names no individual.
    UnresolvedReference,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// 1-based source line, when the problem maps to a single line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    pub message: String,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.line {
            Some(line) => write!(f, "line {}: {}", line, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Collector threaded through one import. Drops everything in lenient mode.
#[derive(Debug)]
pub struct DiagnosticSink {
    strictness: Strictness,
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticSink {
    pub fn new(strictness: Strictness) -> Self {
        DiagnosticSink {
            strictness,
            diagnostics: Vec::new(),
        }
    }

    pub fn is_strict(&self) -> bool {
        self.strictness == Strictness::Strict
    }

    pub fn report(&mut self, kind: DiagnosticKind, line: Option<u32>, message: impl Into<String>) {
        if !self.is_strict() {
            return;
        }
        let diagnostic = Diagnostic {
            kind,
            line,
            message: message.into(),
        };
        tracing::debug!(kind = ?diagnostic.kind, "{}", diagnostic);
        self.diagnostics.push(diagnostic);
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lenient_sink_drops_reports() {
        let mut sink = DiagnosticSink::new(Strictness::Lenient);
        sink.report(DiagnosticKind::UnknownTag, Some(3), "unknown tag 'NOTE'");
        assert!(sink.is_empty());
    }

    #[test]
    fn strict_sink_keeps_reports_in_order() {
        let mut sink = DiagnosticSink::new(Strictness::Strict);
        sink.report(DiagnosticKind::MalformedLine, Some(1), "first");
        sink.report(DiagnosticKind::UnresolvedReference, None, "second");
        let diags = sink.into_diagnostics();
        assert_eq!(diags.len(), 2);
        assert_eq!(diags[0].to_string(), "line 1: first");
        assert_eq!(diags[1].to_string(), "second");
    }

    #[test]
    fn line_is_omitted_from_json_when_absent() {
        let d = Diagnostic {
            kind: DiagnosticKind::UnresolvedReference,
            line: None,
            message: "x".into(),
        };
        let v = serde_json::to_value(&d).unwrap();
        assert_eq!(v["kind"], "unresolved_reference");
        assert!(v.get("line").is_none());
    }
}
