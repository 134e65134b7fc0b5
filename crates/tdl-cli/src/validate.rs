//! # Validate Command
//!
//! Turns the command-line inputs into validation calls: directories are
//! scanned, files are validated on their own or together with a model,
//! and paths that do not exist become failed results. The report is then
//! rendered in the requested format.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Args, ValueEnum};

use tdl_schema::{DocumentType, TdlValidator, ValidationResult, ValidationSummary};

use crate::output::{write_json_report, write_text_report, OutputFormat, TextOptions};
use crate::{EXIT_ENVIRONMENT, EXIT_INVALID, EXIT_OK};

/// Document type selected on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum TypeArg {
    /// Detect the type from the document's top-level keys.
    #[default]
    Auto,
    #[value(name = "instructional_model")]
    InstructionalModel,
    #[value(name = "learning_sequence")]
    LearningSequence,
    Engine,
}

impl TypeArg {
    /// The explicit type, or `None` for auto-detection.
    pub fn document_type(self) -> Option<DocumentType> {
        match self {
            Self::Auto => None,
            Self::InstructionalModel => Some(DocumentType::InstructionalModel),
            Self::LearningSequence => Some(DocumentType::LearningSequence),
            Self::Engine => Some(DocumentType::Engine),
        }
    }
}

/// Arguments for `tdl-validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// TDL file(s) or directories to validate (YAML format).
    #[arg(value_name = "FILES", required = true)]
    pub files: Vec<PathBuf>,

    /// Type of TDL file.
    #[arg(short = 't', long = "type", value_enum, default_value_t = TypeArg::Auto)]
    pub doc_type: TypeArg,

    /// Instructional model to validate learning sequences against.
    #[arg(short, long, value_name = "PATH")]
    pub model: Option<PathBuf>,

    /// Directory containing schema files (default: TDL_SCHEMA_DIR, then bundled schemas).
    #[arg(short, long, value_name = "DIR")]
    pub schema_dir: Option<PathBuf>,

    /// Search directories recursively.
    #[arg(short, long)]
    pub recursive: bool,

    /// Only output errors, no success messages.
    #[arg(short, long)]
    pub quiet: bool,

    /// Show detected types and warnings.
    #[arg(short, long)]
    pub verbose: bool,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Execute the validate command, writing the report to `out` and
/// initialization errors to `err`.
///
/// Returns exit code: 0 when all documents are valid, 1 when any is
/// invalid, 2 when the validator could not be initialized.
pub fn run_validate(
    args: &ValidateArgs,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<u8> {
    let validator = match TdlValidator::new(args.schema_dir.as_deref()) {
        Ok(v) => v,
        Err(e) => {
            tracing::error!(error = %e, "validator initialization failed");
            writeln!(err, "Error initializing validator: {e}")?;
            return Ok(EXIT_ENVIRONMENT);
        }
    };

    tracing::info!(
        schema_dir = %validator.store().schema_dir().display(),
        schema_count = validator.store().len(),
        "loaded schema store"
    );

    let results = collect_results(&validator, args);

    match args.format {
        OutputFormat::Text => write_text_report(
            out,
            &results,
            TextOptions {
                quiet: args.quiet,
                verbose: args.verbose,
            },
        )?,
        OutputFormat::Json => write_json_report(out, &results)?,
    }

    if ValidationSummary::from_results(&results).is_success() {
        Ok(EXIT_OK)
    } else {
        Ok(EXIT_INVALID)
    }
}

/// Validate every input in command-line order.
pub fn collect_results(validator: &TdlValidator, args: &ValidateArgs) -> Vec<ValidationResult> {
    let doc_type = args.doc_type.document_type();
    let mut results = Vec::new();

    for path in &args.files {
        if path.is_dir() {
            results.extend(validator.validate_directory(path, args.recursive));
        } else if path.is_file() {
            let model = args.model.as_deref();
            results.push(validate_single(validator, path, doc_type, model));
        } else {
            results.push(ValidationResult::failure(
                path.display().to_string(),
                None,
                format!("Path not found: {}", path.display()),
            ));
        }
    }
    results
}

fn validate_single(
    validator: &TdlValidator,
    path: &Path,
    doc_type: Option<DocumentType>,
    model: Option<&Path>,
) -> ValidationResult {
    match (model, doc_type) {
        (Some(model), None | Some(DocumentType::LearningSequence)) => {
            validator.validate_sequence_with_model(path, Some(model))
        }
        _ => validator.validate_file(path, doc_type),
    }
}
