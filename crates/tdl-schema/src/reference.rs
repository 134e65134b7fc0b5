//! # Sequence → Model References
//!
//! A learning sequence may declare `sequence.extends: <path>` pointing at
//! the instructional model it builds on. The path is resolved relative to
//! the directory of the sequence file. The reference is soft: a missing
//! model is a warning, while a model that exists but fails validation makes
//! the sequence invalid too.
//!
//! The sequence and the model are read in two separate steps without any
//! locking; each result reflects the file contents at the time it was read.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::document::{load_document, DocumentType};
use crate::result::ValidationResult;
use crate::validate::TdlValidator;

/// The `sequence.extends` value of a learning sequence, if it is a string.
pub fn extends_reference(sequence: &Value) -> Option<&str> {
    sequence.get("sequence")?.get("extends")?.as_str()
}

impl TdlValidator {
    /// Validate a learning sequence together with the model it extends.
    ///
    /// The sequence is validated first; if it fails, its result is returned
    /// as is. Otherwise the model is taken from `model_path` or, when that
    /// is `None`, from `sequence.extends` relative to the sequence's
    /// directory. An invalid model adds a warning and its errors prefixed
    /// with `[model]`.
    ///
    /// A model that cannot be found only adds a warning, and only when the
    /// sequence declares `extends`; the warning names the `extends` value.
    /// An explicit `model_path` that does not exist on a sequence without
    /// `extends` leaves the result untouched.
    pub fn validate_sequence_with_model(
        &self,
        sequence_path: impl AsRef<Path>,
        model_path: Option<&Path>,
    ) -> ValidationResult {
        let sequence_path = sequence_path.as_ref();
        let sequence_result =
            self.validate_file(sequence_path, Some(DocumentType::LearningSequence));
        if !sequence_result.is_valid {
            return sequence_result;
        }

        let sequence = match load_document(sequence_path) {
            Ok(doc) => doc,
            Err(e) => return sequence_result.with_error(e.to_message()),
        };
        let extends = extends_reference(&sequence).filter(|s| !s.is_empty());

        let model_path: PathBuf = match (model_path, extends) {
            (Some(explicit), _) => explicit.to_path_buf(),
            (None, Some(reference)) => sequence_path
                .parent()
                .unwrap_or_else(|| Path::new(""))
                .join(reference),
            (None, None) => return sequence_result,
        };

        if !model_path.is_file() {
            tracing::debug!(
                sequence = %sequence_path.display(),
                model = %model_path.display(),
                "referenced model not found"
            );
            return match extends {
                Some(reference) => sequence_result
                    .with_warning(format!("Referenced model not found: {reference}")),
                None => sequence_result,
            };
        }

        let model_result =
            self.validate_file(&model_path, Some(DocumentType::InstructionalModel));
        sequence_result.merge_model(&model_result, &model_path)
    }
}
