//! # Validation Results
//!
//! [`ValidationResult`] is the unit of output: one per document. A result
//! is valid if and only if its error list is empty; warnings never affect
//! validity. [`ValidationSummary`] reduces a batch of results to counts and
//! an overall pass/fail.

use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::document::DocumentType;

/// Identifier used for documents validated from in-memory data.
pub const DATA_LABEL: &str = "<data>";

/// Outcome of validating a single document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    /// True if and only if `errors` is empty.
    pub is_valid: bool,
    /// Path of the document, or `<data>` for in-memory input.
    pub file_path: String,
    /// Detected or requested type; absent when detection failed.
    pub file_type: Option<DocumentType>,
    /// Located error messages, in validator enumeration order.
    pub errors: Vec<String>,
    /// Non-fatal findings.
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Build a result from its parts, deriving validity from `errors`.
    pub fn new(
        file_path: impl Into<String>,
        file_type: Option<DocumentType>,
        errors: Vec<String>,
    ) -> Self {
        Self {
            is_valid: errors.is_empty(),
            file_path: file_path.into(),
            file_type,
            errors,
            warnings: Vec::new(),
        }
    }

    /// A failed result carrying a single error.
    pub fn failure(
        file_path: impl Into<String>,
        file_type: Option<DocumentType>,
        error: impl Into<String>,
    ) -> Self {
        Self::new(file_path, file_type, vec![error.into()])
    }

    /// Replace the document identifier.
    pub fn with_file_path(mut self, file_path: impl Into<String>) -> Self {
        self.file_path = file_path.into();
        self
    }

    /// Append a warning. Validity is unchanged.
    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    /// Append an error, which makes the result invalid.
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.errors.push(error.into());
        self.is_valid = false;
        self
    }

    /// Combine a sequence result with the result for the model it extends.
    ///
    /// A valid model leaves the sequence result untouched. An invalid model
    /// adds one warning naming `model_path` and copies every model error,
    /// prefixed with `[model]`, into the combined error list.
    pub fn merge_model(self, model: &ValidationResult, model_path: &Path) -> ValidationResult {
        if model.is_valid {
            return self;
        }
        let mut merged = self.with_warning(format!(
            "Referenced model has errors: {}",
            model_path.display()
        ));
        merged
            .errors
            .extend(model.errors.iter().map(|e| format!("[model] {e}")));
        merged.is_valid = merged.errors.is_empty();
        merged
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid {
            match self.file_type {
                Some(t) => write!(f, "✓ {} is valid ({t})", self.file_path),
                None => write!(f, "✓ {} is valid", self.file_path),
            }
        } else {
            write!(
                f,
                "✗ {} has {} error(s):",
                self.file_path,
                self.errors.len()
            )?;
            for error in &self.errors {
                write!(f, "\n  - {error}")?;
            }
            Ok(())
        }
    }
}

/// Pass/fail counts over a batch of results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ValidationSummary {
    /// Number of documents processed.
    pub total: usize,
    /// Number of valid documents.
    pub valid: usize,
    /// Number of invalid documents.
    pub invalid: usize,
}

impl ValidationSummary {
    /// Count valid and invalid results.
    pub fn from_results(results: &[ValidationResult]) -> Self {
        let valid = results.iter().filter(|r| r.is_valid).count();
        Self {
            total: results.len(),
            valid,
            invalid: results.len() - valid,
        }
    }

    /// True when no result is invalid.
    pub fn is_success(&self) -> bool {
        self.invalid == 0
    }
}

impl fmt::Display for ValidationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Summary: {} valid, {} invalid", self.valid, self.invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_sequence() -> ValidationResult {
        ValidationResult::new("seq.yaml", Some(DocumentType::LearningSequence), vec![])
    }

    #[test]
    fn validity_tracks_error_list() {
        assert!(valid_sequence().is_valid);
        let failed = ValidationResult::failure("x.yaml", None, "boom");
        assert!(!failed.is_valid);
        assert_eq!(failed.errors, vec!["boom"]);
    }

    #[test]
    fn warnings_do_not_affect_validity() {
        let result = valid_sequence().with_warning("heads up");
        assert!(result.is_valid);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn with_error_invalidates() {
        let result = valid_sequence().with_error("[root] bad");
        assert!(!result.is_valid);
    }

    #[test]
    fn merge_with_valid_model_is_identity() {
        let model = ValidationResult::new("m.yaml", Some(DocumentType::InstructionalModel), vec![]);
        let merged = valid_sequence().merge_model(&model, Path::new("m.yaml"));
        assert_eq!(merged, valid_sequence());
    }

    #[test]
    fn merge_with_invalid_model_prefixes_errors() {
        let model = ValidationResult::new(
            "m.yaml",
            Some(DocumentType::InstructionalModel),
            vec!["[model] \"id\" is a required property".into(), "[root] x".into()],
        );
        let merged = valid_sequence().merge_model(&model, Path::new("dir/m.yaml"));

        assert!(!merged.is_valid);
        assert_eq!(merged.file_path, "seq.yaml");
        assert_eq!(
            merged.errors,
            vec![
                "[model] [model] \"id\" is a required property".to_string(),
                "[model] [root] x".to_string(),
            ]
        );
        assert_eq!(
            merged.warnings,
            vec!["Referenced model has errors: dir/m.yaml".to_string()]
        );
    }

    #[test]
    fn display_valid_and_invalid() {
        assert_eq!(
            valid_sequence().to_string(),
            "✓ seq.yaml is valid (learning_sequence)"
        );
        let failed = ValidationResult::new("e.yaml", None, vec!["a".into(), "b".into()]);
        assert_eq!(failed.to_string(), "✗ e.yaml has 2 error(s):\n  - a\n  - b");
    }

    #[test]
    fn summary_counts() {
        let results = vec![
            valid_sequence(),
            ValidationResult::failure("bad.yaml", None, "nope"),
            valid_sequence(),
        ];
        let summary = ValidationSummary::from_results(&results);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.valid, 2);
        assert_eq!(summary.invalid, 1);
        assert!(!summary.is_success());
        assert_eq!(summary.to_string(), "Summary: 2 valid, 1 invalid");
    }

    #[test]
    fn empty_summary_is_success() {
        let summary = ValidationSummary::from_results(&[]);
        assert_eq!(summary, ValidationSummary::default());
        assert!(summary.is_success());
    }

    #[test]
    fn result_serializes_type_as_snake_case() {
        let value = serde_json::to_value(valid_sequence()).unwrap();
        assert_eq!(value["file_type"], "learning_sequence");
        assert_eq!(value["is_valid"], true);
    }
}
