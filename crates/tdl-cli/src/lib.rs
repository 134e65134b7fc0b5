//! # tdl-cli — Command-Line Validator for TDL Documents
//!
//! Provides the `tdl-validate` command. Argument parsing and report
//! rendering live here; all validation logic is in `tdl-schema`.
//!
//! ```bash
//! tdl-validate model.yaml sequence.yaml
//! tdl-validate -t learning_sequence -m models/socratic.yaml sequence.yaml
//! tdl-validate -r -q content/
//! ```
//!
//! ## Exit codes
//!
//! - `0` — every document is valid.
//! - `1` — at least one document is invalid.
//! - `2` — the validator could not be initialized (unusable schema).

pub mod output;
pub mod validate;

/// Exit code when every document validated.
pub const EXIT_OK: u8 = 0;
/// Exit code when at least one document is invalid.
pub const EXIT_INVALID: u8 = 1;
/// Exit code when the validator itself could not start.
pub const EXIT_ENVIRONMENT: u8 = 2;
