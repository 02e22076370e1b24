//! kinfolk-core: genealogy interchange (GEDCOM) import library.
//!
//! Turns a line-oriented interchange document into people, relationships
//! and tree metadata ready for storage.
//!
//! # Public API
//!
//! Key types are re-exported at the crate root for convenience:
//!
//! - [`import_text()`] / [`import_from()`] -- run the full pipeline
//! - [`ImportOptions`] -- strictness and relationship endpoint mode
//! - [`ImportError`] -- the error type of the top-level entry points
//! - Output types: [`FamilyTreeResult`], [`Person`], [`Relationship`]
//! - Raw types: [`RawDocument`], [`RawIndividual`], [`RawFamilyUnit`],
//!   [`RawEvent`]
//!
//! The stages (`lexer`, `assemble`, `transform`, `normalize`) are public
//! for callers that need only part of the pipeline.

pub mod assemble;
pub mod ast;
pub mod diagnostics;
pub mod error;
pub mod import;
pub mod lexer;
pub mod model;
pub mod normalize;
pub mod options;
pub mod source;
pub mod transform;

// ── Convenience re-exports: key types ────────────────────────────────

pub use ast::{RawDocument, RawEvent, RawFamilyUnit, RawIndividual, Sex};
pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use error::ImportError;
pub use model::{FamilyTreeResult, Gender, Person, Relationship, RelationshipType};
pub use options::{EndpointMode, ImportOptions, Strictness};
pub use source::{DocumentSource, FileSource, InMemorySource};

// ── Convenience re-exports: pipeline entry points ────────────────────

pub use import::{import_bytes, import_from, import_text, parse_document, ImportReport};
pub use normalize::{normalize_date, split_name};
