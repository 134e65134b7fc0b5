//! # Documents and Type Detection
//!
//! A TDL document is decoded from YAML into a [`serde_json::Value`] tree so
//! it can be handed to the JSON Schema validator without a conversion
//! step. Its type is inferred from the top-level keys alone.
//!
//! ## Detection order
//!
//! `model` is checked before `sequence`, which is checked before `engine`.
//! A document carrying both `model` and `sequence` is an instructional
//! model. The order is fixed so ambiguous documents always classify the
//! same way.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The TDL document families known to the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// A reusable tutoring behavior template (`model:` root key).
    InstructionalModel,
    /// A concrete ordered instructional flow (`sequence:` root key).
    LearningSequence,
    /// Runtime/engine-level settings (`engine:` root key).
    Engine,
}

impl DocumentType {
    /// All known types, in detection order.
    pub const ALL: [DocumentType; 3] = [
        DocumentType::InstructionalModel,
        DocumentType::LearningSequence,
        DocumentType::Engine,
    ];

    /// Canonical snake_case name, as used in messages and on the CLI.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InstructionalModel => "instructional_model",
            Self::LearningSequence => "learning_sequence",
            Self::Engine => "engine",
        }
    }

    /// Filename of the schema for this type inside a schema directory.
    pub fn schema_filename(self) -> &'static str {
        match self {
            Self::InstructionalModel => "instructional_model.schema.json",
            Self::LearningSequence => "learning_sequence.schema.json",
            Self::Engine => "engine.schema.json",
        }
    }

    /// Top-level key that marks a document of this type.
    pub fn root_key(self) -> &'static str {
        match self {
            Self::InstructionalModel => "model",
            Self::LearningSequence => "sequence",
            Self::Engine => "engine",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown document type name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDocumentType(pub String);

impl fmt::Display for UnknownDocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown TDL document type: {}", self.0)
    }
}

impl std::error::Error for UnknownDocumentType {}

impl FromStr for DocumentType {
    type Err = UnknownDocumentType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownDocumentType(s.to_string()))
    }
}

/// Infer the type of a parsed document from its top-level keys.
///
/// Returns `None` when the document is not a mapping or carries none of
/// the `model`, `sequence`, or `engine` keys.
pub fn detect_document_type(document: &Value) -> Option<DocumentType> {
    let map = document.as_object()?;
    DocumentType::ALL
        .into_iter()
        .find(|t| map.contains_key(t.root_key()))
}

/// Why a document could not be loaded from disk.
#[derive(Debug)]
pub(crate) enum LoadError {
    Io(std::io::Error),
    Yaml(serde_yaml::Error),
}

impl LoadError {
    /// Render the error the way it appears in a result's error list.
    pub(crate) fn to_message(&self) -> String {
        match self {
            Self::Io(e) => format!("Error reading file: {e}"),
            Self::Yaml(e) => format!("YAML parsing error: {e}"),
        }
    }
}

/// Read and decode a YAML (or JSON) document.
///
/// `<<` merge keys are expanded before the document is handed to the
/// schema validator.
pub(crate) fn load_document(path: &Path) -> Result<Value, LoadError> {
    let content = std::fs::read_to_string(path).map_err(LoadError::Io)?;
    let mut yaml: serde_yaml::Value = serde_yaml::from_str(&content).map_err(LoadError::Yaml)?;
    yaml.apply_merge().map_err(LoadError::Yaml)?;
    serde_yaml::from_value(yaml).map_err(LoadError::Yaml)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn detects_each_root_key() {
        assert_eq!(
            detect_document_type(&json!({"model": {}})),
            Some(DocumentType::InstructionalModel)
        );
        assert_eq!(
            detect_document_type(&json!({"sequence": {}})),
            Some(DocumentType::LearningSequence)
        );
        assert_eq!(
            detect_document_type(&json!({"engine": {"name": "x"}})),
            Some(DocumentType::Engine)
        );
    }

    #[test]
    fn model_wins_over_sequence_and_engine() {
        let doc = json!({"engine": 1, "sequence": 2, "model": 3});
        assert_eq!(
            detect_document_type(&doc),
            Some(DocumentType::InstructionalModel)
        );
    }

    #[test]
    fn sequence_wins_over_engine() {
        let doc = json!({"engine": {}, "sequence": {}});
        assert_eq!(
            detect_document_type(&doc),
            Some(DocumentType::LearningSequence)
        );
    }

    #[test]
    fn unknown_keys_are_undetectable() {
        assert_eq!(detect_document_type(&json!({"title": "x"})), None);
        assert_eq!(detect_document_type(&json!({})), None);
    }

    #[test]
    fn non_mapping_documents_are_undetectable() {
        assert_eq!(detect_document_type(&Value::Null), None);
        assert_eq!(detect_document_type(&json!(["model"])), None);
        assert_eq!(detect_document_type(&json!("model")), None);
    }

    #[test]
    fn type_names_round_trip_through_from_str() {
        for t in DocumentType::ALL {
            assert_eq!(t.as_str().parse::<DocumentType>(), Ok(t));
        }
        assert!("auto".parse::<DocumentType>().is_err());
    }

    #[test]
    fn serializes_as_snake_case() {
        let v = serde_json::to_value(DocumentType::LearningSequence).unwrap();
        assert_eq!(v, json!("learning_sequence"));
    }

    #[test]
    fn load_document_reports_yaml_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.yaml");
        std::fs::write(&path, "model: [unclosed\n").unwrap();
        let err = load_document(&path).unwrap_err();
        assert!(err.to_message().starts_with("YAML parsing error:"));
    }

    #[test]
    fn load_document_reads_yaml_mapping() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.yaml");
        std::fs::write(&path, "engine:\n  name: tutor\n  version: \"1.0\"\n").unwrap();
        let doc = load_document(&path).unwrap();
        assert_eq!(doc["engine"]["name"], "tutor");
        assert_eq!(doc["engine"]["version"], "1.0");
    }

    #[test]
    fn load_document_expands_merge_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.yaml");
        std::fs::write(
            &path,
            "base: &b {name: tutor, version: \"1.0\"}\nengine:\n  <<: *b\n  version: \"2.0\"\n",
        )
        .unwrap();
        let doc = load_document(&path).unwrap();
        assert_eq!(doc["engine"], json!({"name": "tutor", "version": "2.0"}));
    }

    proptest! {
        #[test]
        fn any_document_with_model_key_is_instructional_model(
            extra in proptest::collection::btree_map("[a-z_]{1,12}", any::<i64>(), 0..8)
        ) {
            let mut map = serde_json::Map::new();
            for (k, v) in extra {
                map.insert(k, json!(v));
            }
            map.insert("model".to_string(), json!({}));
            prop_assert_eq!(
                detect_document_type(&Value::Object(map)),
                Some(DocumentType::InstructionalModel)
            );
        }

        #[test]
        fn documents_without_root_keys_are_undetectable(
            extra in proptest::collection::btree_map("[a-z_]{1,12}", any::<bool>(), 0..8)
        ) {
            let map: serde_json::Map<String, Value> = extra
                .into_iter()
                .filter(|(k, _)| !matches!(k.as_str(), "model" | "sequence" | "engine"))
                .map(|(k, v)| (k, json!(v)))
                .collect();
            prop_assert_eq!(detect_document_type(&Value::Object(map)), None);
        }
    }
}
