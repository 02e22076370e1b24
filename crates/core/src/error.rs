/// Message used when a processing failure carries no message of its own.
pub const FALLBACK_MESSAGE: &str = "failed to process the genealogy document";

/// All errors that can be returned while importing a genealogy document.
///
/// Malformed lines, unknown tags and dangling pointers are not errors; the
/// importer tolerates them (see [`crate::diagnostics`]). Only the top-level
/// entry points in [`crate::import`] produce an `ImportError`.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// The caller handed over a file that is not a `.ged` / `.gedcom` document.
    /// Raised by callers (the CLI), never by the parser itself.
    #[error("unsupported file type: {path} (expected a .ged or .gedcom file)")]
    InputType { path: String },

    /// Reading, decoding or assembling the document failed.
    #[error("{message}")]
    Processing { message: String },

    /// A configuration file could not be read or parsed.
    #[error("invalid configuration '{path}': {message}")]
    Config { path: String, message: String },
}

impl ImportError {
    /// Build a processing error, keeping the original message when there is one.
    pub fn processing(message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            FALLBACK_MESSAGE.to_owned()
        } else {
            message
        };
        ImportError::Processing { message }
    }

    /// Short machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ImportError::InputType { .. } => "input_type",
            ImportError::Processing { .. } => "processing",
            ImportError::Config { .. } => "config",
        }
    }

    /// Serialize to the JSON shape printed by `--output json`.
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "error":   self.kind(),
            "message": self.to_string(),
        })
    }
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::processing(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn processing_keeps_original_message() {
        let err = ImportError::processing("stream closed");
        assert_eq!(err.to_string(), "stream closed");
    }

    #[test]
    fn processing_falls_back_on_empty_message() {
        let err = ImportError::processing("   ");
        assert_eq!(err.to_string(), FALLBACK_MESSAGE);
    }

    #[test]
    fn io_errors_become_processing_errors() {
        let io = std::io::Error::new(std::io::ErrorKind::InvalidData, "not utf-8");
        let err: ImportError = io.into();
        assert_eq!(err.kind(), "processing");
        assert_eq!(err.to_string(), "not utf-8");
    }

    #[test]
    fn json_shape_has_kind_and_message() {
        let err = ImportError::InputType {
            path: "tree.txt".to_string(),
        };
        let v = err.to_json_value();
        assert_eq!(v["error"], "input_type");
        assert!(v["message"].as_str().unwrap().contains("tree.txt"));
    }
}
