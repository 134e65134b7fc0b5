//! # tdl-schema — TDL Document Validation
//!
//! Validates TDL (Tutor Description Language) documents written in YAML
//! against the versioned JSON Schemas for each document family, and
//! reports every violation with its location in the document.
//!
//! ## Responsibilities
//!
//! - **Type detection:** classify a parsed document as an instructional
//!   model, a learning sequence, or an engine configuration from its
//!   top-level keys ([`document`]).
//! - **Schema store:** load and compile the three schemas once from a
//!   schema directory ([`store`]).
//! - **Structural validation:** run a document against its schema and
//!   collect located error messages ([`validate`]).
//! - **Cross-references:** validate a learning sequence together with the
//!   instructional model it `extends` ([`reference`]).
//! - **Aggregation:** reduce a batch of results to a pass/fail summary
//!   ([`result`]).
//!
//! ## Error model
//!
//! Only schema store construction can fail with a Rust error
//! ([`SchemaStoreError`]). Every per-document problem, from a missing file
//! to a structural violation, is reported as data on a
//! [`ValidationResult`] so a batch run never stops early.
//!
//! ```no_run
//! use tdl_schema::TdlValidator;
//!
//! let validator = TdlValidator::new(None::<&str>)?;
//! let result = validator.validate_file("my_sequence.yaml", None);
//! if !result.is_valid {
//!     for error in &result.errors {
//!         eprintln!("Error: {error}");
//!     }
//! }
//! # Ok::<(), tdl_schema::SchemaStoreError>(())
//! ```

pub mod discovery;
pub mod document;
pub mod error;
pub mod reference;
pub mod result;
pub mod store;
pub mod validate;

// Re-export primary types.
pub use document::{detect_document_type, DocumentType};
pub use error::SchemaStoreError;
pub use result::{ValidationResult, ValidationSummary};
pub use store::{resolve_schema_dir, SchemaStore, DEFAULT_SCHEMA_DIR, SCHEMA_DIR_ENV};
pub use validate::TdlValidator;
