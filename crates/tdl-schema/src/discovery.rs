//! # Document Discovery
//!
//! Finds TDL documents in a directory: every `*.yaml` file, then every
//! `*.yml` file, each group sorted by path. Files whose name contains
//! `.schema.` are schema definitions, not documents, and are skipped at
//! any depth. Symlinked directories are not descended into, so a link
//! back up the tree cannot repeat documents.

use std::path::{Path, PathBuf};

/// Document extensions, in the order their files are returned.
const DOCUMENT_EXTENSIONS: [&str; 2] = ["yaml", "yml"];

/// Collect the documents under `dir`, descending into subdirectories when
/// `recursive` is set.
pub fn find_documents(dir: &Path, recursive: bool) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    walk_for_documents(dir, recursive, &mut candidates);

    let mut documents = Vec::with_capacity(candidates.len());
    for ext in DOCUMENT_EXTENSIONS {
        let mut group: Vec<PathBuf> = candidates
            .iter()
            .filter(|p| p.extension().and_then(|e| e.to_str()) == Some(ext))
            .cloned()
            .collect();
        group.sort();
        documents.extend(group);
    }
    documents
}

/// Whether a file name marks a schema definition rather than a document.
pub fn is_schema_file(name: &str) -> bool {
    name.contains(".schema.")
}

fn walk_for_documents(dir: &Path, recursive: bool, acc: &mut Vec<PathBuf>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) => {
            tracing::warn!(
                dir = %dir.display(),
                error = %e,
                "failed to read directory during document scan"
            );
            return;
        }
    };
    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "failed to read directory entry");
                continue;
            }
        };
        let path = entry.path();
        let is_dir = match entry.file_type() {
            Ok(ft) => ft.is_dir(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to read file type");
                continue;
            }
        };
        if is_dir {
            if recursive {
                walk_for_documents(&path, recursive, acc);
            }
            continue;
        }
        let Some(name) = path.file_name().and_then(|f| f.to_str()) else {
            continue;
        };
        if is_schema_file(name) {
            continue;
        }
        let is_document = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| DOCUMENT_EXTENSIONS.contains(&ext));
        if is_document {
            acc.push(path);
        }
    }
}
