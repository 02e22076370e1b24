//! Import options.
//!
//! Options are plain serde values so callers can load them from a config
//! file (the CLI reads the `[import]` table of `kinfolk.toml`).

use serde::{Deserialize, Serialize};

/// Tree name used when the document contains no individuals.
pub const DEFAULT_TREE_NAME: &str = "Imported Family Tree";
/// Description attached to every imported tree unless overridden.
pub const DEFAULT_DESCRIPTION: &str = "Imported from GEDCOM file";

/// How unrecognized input is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strictness {
    /// Ignore anything unrecognized without a trace in the result.
    #[default]
    Lenient,
    /// Still import everything possible, but collect a diagnostic for every
    /// malformed line, unknown tag and unresolved pointer.
    Strict,
}

/// What relationship endpoints refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndpointMode {
    /// Endpoints keep the document pointer (`@I1@`). Callers join them
    /// against `Person::source_ref`.
    #[default]
    SourcePointer,
    /// Endpoints are rewritten to the generated `Person::id`. Pointers that
    /// name no individual are left as they are.
    PersonId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportOptions {
    pub strictness: Strictness,
    pub endpoints: EndpointMode,
    /// Name given to a tree with no people in it.
    pub default_tree_name: String,
    pub description: String,
}

impl Default for ImportOptions {
    fn default() -> Self {
        ImportOptions {
            strictness: Strictness::default(),
            endpoints: EndpointMode::default(),
            default_tree_name: DEFAULT_TREE_NAME.to_owned(),
            description: DEFAULT_DESCRIPTION.to_owned(),
        }
    }
}

impl ImportOptions {
    pub fn strict() -> Self {
        ImportOptions {
            strictness: Strictness::Strict,
            ..Self::default()
        }
    }

    pub fn with_endpoints(mut self, endpoints: EndpointMode) -> Self {
        self.endpoints = endpoints;
        self
    }
}
