//! # Report Rendering
//!
//! Line-oriented text output (`✓ <path>` / `✗ <path>` with indented
//! `ERROR:` and `WARNING:` lines) and a JSON report for tooling.

use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

use tdl_schema::{ValidationResult, ValidationSummary};

/// Output format for the validation report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// A single JSON document with every result and the summary.
    Json,
}

/// Controls which lines the text report prints.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextOptions {
    /// Suppress success lines and the summary.
    pub quiet: bool,
    /// Show the detected type of valid documents and all warnings.
    pub verbose: bool,
}

/// Print one result.
pub fn write_result(
    out: &mut impl Write,
    result: &ValidationResult,
    opts: TextOptions,
) -> io::Result<()> {
    if result.is_valid {
        if !opts.quiet {
            writeln!(out, "✓ {}", result.file_path)?;
            if let (true, Some(doc_type)) = (opts.verbose, result.file_type) {
                writeln!(out, "  Type: {doc_type}")?;
            }
        }
    } else {
        writeln!(out, "✗ {}", result.file_path)?;
        for error in &result.errors {
            writeln!(out, "  ERROR: {error}")?;
        }
    }

    if opts.verbose {
        for warning in &result.warnings {
            writeln!(out, "  WARNING: {warning}")?;
        }
    }
    Ok(())
}

/// Print every result, followed by a summary when more than one document
/// was processed.
pub fn write_text_report(
    out: &mut impl Write,
    results: &[ValidationResult],
    opts: TextOptions,
) -> io::Result<()> {
    for result in results {
        write_result(out, result, opts)?;
    }

    if results.len() > 1 && !opts.quiet {
        writeln!(out)?;
        writeln!(out, "{}", ValidationSummary::from_results(results))?;
    }
    Ok(())
}

#[derive(Serialize)]
struct JsonReport<'a> {
    results: &'a [ValidationResult],
    summary: ValidationSummary,
}

/// Print all results and the summary as pretty JSON.
pub fn write_json_report(
    out: &mut impl Write,
    results: &[ValidationResult],
) -> anyhow::Result<()> {
    let report = JsonReport {
        results,
        summary: ValidationSummary::from_results(results),
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}
