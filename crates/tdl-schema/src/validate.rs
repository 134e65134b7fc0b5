//! # Structural Validation
//!
//! [`TdlValidator`] runs a parsed document against the schema for its
//! type and turns every violation into a located message of the form
//! `[<path>] <description>`.
//!
//! ## Paths
//!
//! `<path>` is the instance location from the document root, one segment
//! per mapping key or sequence index, joined with ` -> ` (for example
//! `sequence -> steps -> 0 -> id`). For a missing required property the
//! property name is the last segment, so the path points at what is
//! absent; this holds at the top level too, where a document without
//! `engine` is reported at `[engine]`. `root` marks only violations on the
//! document value itself, such as a scalar where a mapping is expected.
//!
//! ## Failure classes
//!
//! Type detection failure and a missing schema each produce a single
//! descriptive error, distinct from structural violations, so callers can
//! tell "the document is wrong" from "the document could not be checked".

use std::path::{Path, PathBuf};

use jsonschema::error::ValidationErrorKind;
use jsonschema::ValidationError;
use serde_json::Value;

use crate::document::{detect_document_type, load_document, DocumentType};
use crate::error::SchemaStoreError;
use crate::result::{ValidationResult, DATA_LABEL};
use crate::store::{resolve_schema_dir, SchemaStore};

/// Error recorded when no type can be inferred from a document.
pub const UNDETECTED_TYPE_MESSAGE: &str =
    "Could not detect TDL file type. Expected 'model', 'sequence', or 'engine' key.";

/// Validates TDL documents against a [`SchemaStore`].
#[derive(Debug)]
pub struct TdlValidator {
    store: SchemaStore,
}

impl TdlValidator {
    /// Create a validator bound to a schema directory.
    ///
    /// `None` falls back to `TDL_SCHEMA_DIR` and then to the bundled
    /// schemas; see [`resolve_schema_dir`].
    ///
    /// # Errors
    ///
    /// Returns [`SchemaStoreError`] if a schema file exists but is unusable.
    pub fn new<P: AsRef<Path>>(schema_dir: Option<P>) -> Result<Self, SchemaStoreError> {
        let explicit: Option<&Path> = schema_dir.as_ref().map(|p| p.as_ref());
        let dir = resolve_schema_dir(explicit);
        Ok(Self::with_store(SchemaStore::new(dir)?))
    }

    /// Wrap an already built store.
    pub fn with_store(store: SchemaStore) -> Self {
        Self { store }
    }

    /// The schema store backing this validator.
    pub fn store(&self) -> &SchemaStore {
        &self.store
    }

    /// Validate an in-memory document.
    ///
    /// When `doc_type` is `None` the type is detected from the document's
    /// top-level keys. The result is labelled `<data>`.
    pub fn validate_data(
        &self,
        document: &Value,
        doc_type: Option<DocumentType>,
    ) -> ValidationResult {
        let Some(doc_type) = doc_type.or_else(|| detect_document_type(document)) else {
            return ValidationResult::failure(DATA_LABEL, None, UNDETECTED_TYPE_MESSAGE);
        };

        let Some(schema) = self.store.get(doc_type) else {
            return ValidationResult::failure(
                DATA_LABEL,
                Some(doc_type),
                format!("Schema not found for type: {doc_type}"),
            );
        };

        let errors: Vec<String> = schema
            .validator()
            .iter_errors(document)
            .map(|err| format_error(&err))
            .collect();

        tracing::debug!(
            doc_type = %doc_type,
            error_count = errors.len(),
            "validated document"
        );

        ValidationResult::new(DATA_LABEL, Some(doc_type), errors)
    }

    /// Validate a YAML document on disk.
    ///
    /// A missing file, unreadable file, or YAML syntax error is reported as
    /// a single-error result for that path.
    pub fn validate_file(
        &self,
        path: impl AsRef<Path>,
        doc_type: Option<DocumentType>,
    ) -> ValidationResult {
        let path = path.as_ref();
        let label = path.display().to_string();

        if !path.exists() {
            let message = format!("File not found: {}", path.display());
            return ValidationResult::failure(label, None, message);
        }

        let document = match load_document(path) {
            Ok(document) => document,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = ?e, "failed to load document");
                return ValidationResult::failure(label, None, e.to_message());
            }
        };

        self.validate_data(&document, doc_type).with_file_path(label)
    }

    /// Validate every `*.yaml` and `*.yml` document under `dir`.
    ///
    /// See [`crate::discovery::find_documents`] for the discovery rules. A
    /// directory that does not exist yields a single failed result.
    pub fn validate_directory(
        &self,
        dir: impl AsRef<Path>,
        recursive: bool,
    ) -> Vec<ValidationResult> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return vec![ValidationResult::failure(
                dir.display().to_string(),
                None,
                format!("Directory not found: {}", dir.display()),
            )];
        }

        let documents: Vec<PathBuf> = crate::discovery::find_documents(dir, recursive);
        tracing::debug!(
            dir = %dir.display(),
            recursive,
            count = documents.len(),
            "discovered documents"
        );
        documents
            .iter()
            .map(|path| self.validate_file(path, None))
            .collect()
    }
}

/// Render a schema violation as `[<path>] <description>`.
fn format_error(err: &ValidationError<'_>) -> String {
    let mut segments = pointer_segments(&err.instance_path.to_string());
    if let ValidationErrorKind::Required { property } = &err.kind {
        match property {
            Value::String(name) => segments.push(name.clone()),
            other => segments.push(other.to_string()),
        }
    }
    let path = if segments.is_empty() {
        "root".to_string()
    } else {
        segments.join(" -> ")
    };
    format!("[{path}] {err}")
}

/// Split a JSON Pointer into its unescaped reference tokens.
fn pointer_segments(pointer: &str) -> Vec<String> {
    if pointer.is_empty() {
        return Vec::new();
    }
    pointer
        .trim_start_matches('/')
        .split('/')
        .map(|token| token.replace("~1", "/").replace("~0", "~"))
        .collect()
}
