//! # Schema Store
//!
//! Loads the JSON Schema for each [`DocumentType`] from a schema directory,
//! compiles it once (Draft 2020-12), and keeps the raw body and the
//! compiled validator side by side for the lifetime of the store.
//!
//! ## Missing schemas
//!
//! A schema file that does not exist is skipped: that type simply has no
//! schema, and validating a document of that type reports it. A file that
//! exists but cannot be read, parsed, or compiled is a construction error,
//! because the store would otherwise silently validate against nothing.
//!
//! ## Schema resolution
//!
//! `$ref`s between the loaded schemas are resolved locally by a retriever
//! keyed by each schema's `$id` and by its filename. Unknown URIs fail to
//! resolve instead of reaching out to the network.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use jsonschema::Validator;
use serde_json::Value;

use crate::document::DocumentType;
use crate::error::SchemaStoreError;

/// Environment variable that overrides the default schema directory.
pub const SCHEMA_DIR_ENV: &str = "TDL_SCHEMA_DIR";

/// Schemas bundled with this repository.
pub const DEFAULT_SCHEMA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../spec/schemas");

/// Base URI jsonschema assigns to a schema without an `$id`.
const DEFAULT_BASE_URI: &str = "json-schema:///";

/// Pick the schema directory to load from.
///
/// An explicit directory wins, then `TDL_SCHEMA_DIR`, then the bundled
/// `spec/schemas` directory.
pub fn resolve_schema_dir(explicit: Option<&Path>) -> PathBuf {
    if let Some(dir) = explicit {
        return dir.to_path_buf();
    }
    match std::env::var_os(SCHEMA_DIR_ENV) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => PathBuf::from(DEFAULT_SCHEMA_DIR),
    }
}

/// Resolves `$ref` URIs against the schemas loaded from the schema directory.
struct LocalSchemaRetriever {
    schemas: HashMap<String, Value>,
}

impl jsonschema::Retrieve for LocalSchemaRetriever {
    fn retrieve(
        &self,
        uri: &jsonschema::Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let uri_str = uri.as_str();
        if let Some(schema) = self.schemas.get(uri_str) {
            return Ok(schema.clone());
        }
        let filename = uri_str.rsplit('/').next().unwrap_or(uri_str);
        self.schemas
            .get(filename)
            .cloned()
            .ok_or_else(|| format!("schema not found for URI: {uri_str}").into())
    }
}

/// A loaded schema: the raw body plus its compiled validator.
pub struct LoadedSchema {
    path: PathBuf,
    body: Value,
    validator: Validator,
}

impl LoadedSchema {
    /// Path the schema was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The schema document as authored.
    pub fn body(&self) -> &Value {
        &self.body
    }

    /// The compiled validator.
    pub fn validator(&self) -> &Validator {
        &self.validator
    }
}

impl std::fmt::Debug for LoadedSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedSchema")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// Read-only map from [`DocumentType`] to its compiled schema.
///
/// Built once and never mutated, so a store can be shared across threads
/// validating independent documents.
pub struct SchemaStore {
    schema_dir: PathBuf,
    schemas: HashMap<DocumentType, LoadedSchema>,
}

impl std::fmt::Debug for SchemaStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaStore")
            .field("schema_dir", &self.schema_dir)
            .field("available", &self.available_types())
            .finish()
    }
}

impl SchemaStore {
    /// Load the schemas for every known document type from `schema_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaStoreError`] if a schema file exists but cannot be
    /// read, is not valid JSON, or fails to compile.
    pub fn new(schema_dir: impl Into<PathBuf>) -> Result<Self, SchemaStoreError> {
        let schema_dir = schema_dir.into();

        let mut bodies: Vec<(DocumentType, PathBuf, Value)> = Vec::new();
        for doc_type in DocumentType::ALL {
            let path = schema_dir.join(doc_type.schema_filename());
            if !path.is_file() {
                tracing::debug!(
                    schema = %path.display(),
                    doc_type = %doc_type,
                    "schema file not present; type unavailable"
                );
                continue;
            }

            let content = std::fs::read_to_string(&path).map_err(|e| SchemaStoreError::Read {
                path: path.display().to_string(),
                source: e,
            })?;
            let body: Value =
                serde_json::from_str(&content).map_err(|e| SchemaStoreError::Parse {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                })?;
            bodies.push((doc_type, path, body));
        }

        let uri_map = Self::uri_map(&bodies);

        let mut schemas = HashMap::new();
        for (doc_type, path, body) in bodies {
            let retriever = LocalSchemaRetriever {
                schemas: uri_map.clone(),
            };
            let validator = jsonschema::options()
                .with_draft(jsonschema::Draft::Draft202012)
                .with_retriever(retriever)
                .build(&body)
                .map_err(|e| SchemaStoreError::Compile {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                })?;
            schemas.insert(
                doc_type,
                LoadedSchema {
                    path,
                    body,
                    validator,
                },
            );
        }

        tracing::debug!(
            schema_dir = %schema_dir.display(),
            loaded = schemas.len(),
            "schema store initialized"
        );

        Ok(Self {
            schema_dir,
            schemas,
        })
    }

    /// Returns the directory the schemas were loaded from.
    pub fn schema_dir(&self) -> &Path {
        &self.schema_dir
    }

    /// Look up the schema for a document type.
    pub fn get(&self, doc_type: DocumentType) -> Option<&LoadedSchema> {
        self.schemas.get(&doc_type)
    }

    /// Whether a schema is loaded for `doc_type`.
    pub fn contains(&self, doc_type: DocumentType) -> bool {
        self.schemas.contains_key(&doc_type)
    }

    /// Types that have a schema, in detection order.
    pub fn available_types(&self) -> Vec<DocumentType> {
        DocumentType::ALL
            .into_iter()
            .filter(|t| self.schemas.contains_key(t))
            .collect()
    }

    /// Number of loaded schemas.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Returns true if no schema was found.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Index every loaded body under its `$id`, its filename, and the
    /// default base URI, so sibling `$ref`s resolve without network access.
    fn uri_map(bodies: &[(DocumentType, PathBuf, Value)]) -> HashMap<String, Value> {
        let mut map = HashMap::new();
        for (doc_type, _, body) in bodies {
            let filename = doc_type.schema_filename();
            if let Some(id) = body.get("$id").and_then(|v| v.as_str()) {
                map.insert(id.to_string(), body.clone());
            }
            map.insert(format!("{DEFAULT_BASE_URI}{filename}"), body.clone());
            map.insert(filename.to_string(), body.clone());
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn write_schema(dir: &Path, doc_type: DocumentType, schema: &Value) {
        std::fs::write(
            dir.join(doc_type.schema_filename()),
            serde_json::to_string_pretty(schema).unwrap(),
        )
        .unwrap();
    }

    #[test]
    fn missing_directory_yields_empty_store() {
        let store = SchemaStore::new("/tmp/tdl-schema-test-no-such-dir").unwrap();
        assert!(store.is_empty());
        assert!(store.get(DocumentType::Engine).is_none());
    }

    #[test]
    fn missing_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write_schema(dir.path(), DocumentType::Engine, &json!({"type": "object"}));

        let store = SchemaStore::new(dir.path()).unwrap();
        assert_eq!(store.len(), 1);
        assert!(store.contains(DocumentType::Engine));
        assert!(!store.contains(DocumentType::InstructionalModel));
        assert_eq!(store.available_types(), vec![DocumentType::Engine]);
    }

    #[test]
    fn unrelated_files_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("other.schema.json"), "not json").unwrap();
        let store = SchemaStore::new(dir.path()).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn malformed_schema_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(DocumentType::Engine.schema_filename()),
            "{ not json",
        )
        .unwrap();

        let err = SchemaStore::new(dir.path()).unwrap_err();
        assert!(matches!(err, SchemaStoreError::Parse { .. }), "got: {err}");
    }

    #[test]
    fn uncompilable_schema_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write_schema(dir.path(), DocumentType::Engine, &json!({"type": 42}));

        let err = SchemaStore::new(dir.path()).unwrap_err();
        assert!(matches!(err, SchemaStoreError::Compile { .. }), "got: {err}");
    }

    #[test]
    fn loaded_schema_exposes_body_and_path() {
        let dir = tempfile::tempdir().unwrap();
        let schema = json!({"type": "object", "required": ["engine"]});
        write_schema(dir.path(), DocumentType::Engine, &schema);

        let store = SchemaStore::new(dir.path()).unwrap();
        let loaded = store.get(DocumentType::Engine).unwrap();
        assert_eq!(loaded.body(), &schema);
        assert!(loaded.path().ends_with("engine.schema.json"));
        assert!(loaded.validator().is_valid(&json!({"engine": {}})));
        assert!(!loaded.validator().is_valid(&json!({})));
    }

    #[test]
    fn sibling_refs_resolve_locally() {
        let dir = tempfile::tempdir().unwrap();
        write_schema(
            dir.path(),
            DocumentType::InstructionalModel,
            &json!({
                "$id": "https://tdl.local/schemas/instructional_model.schema.json",
                "$defs": {"name": {"type": "string", "minLength": 1}},
                "type": "object"
            }),
        );
        write_schema(
            dir.path(),
            DocumentType::LearningSequence,
            &json!({
                "$id": "https://tdl.local/schemas/learning_sequence.schema.json",
                "type": "object",
                "properties": {
                    "title": {"$ref": "instructional_model.schema.json#/$defs/name"}
                }
            }),
        );

        let store = SchemaStore::new(dir.path()).unwrap();
        let seq = store.get(DocumentType::LearningSequence).unwrap();
        assert!(seq.validator().is_valid(&json!({"title": "Fractions"})));
        assert!(!seq.validator().is_valid(&json!({"title": ""})));
    }

    #[test]
    fn explicit_schema_dir_wins() {
        let dir = PathBuf::from("/opt/tdl/schemas");
        assert_eq!(resolve_schema_dir(Some(dir.as_path())), dir);
    }

    #[test]
    fn bundled_schemas_load() {
        let store = SchemaStore::new(DEFAULT_SCHEMA_DIR).unwrap();
        assert_eq!(store.available_types(), DocumentType::ALL.to_vec());
    }

    #[test]
    fn store_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SchemaStore>();
    }
}
