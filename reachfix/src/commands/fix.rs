//! Unreachable code fix command.

use crate::cst::SyntaxTree;
use crate::fix::{AppliedFix, Diagnostic, RemoveUnreachableCodeFix, SkippedFix};
use crate::output;

use anyhow::{bail, Context, Result};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Options for the fix command
#[derive(Debug, Default, Clone, Copy)]
pub struct FixOptions {
    /// Write fixed files back instead of printing them
    pub in_place: bool,
    /// Output a JSON report
    pub json: bool,
}

/// Result of fixing one file
#[derive(Debug, Serialize)]
pub struct FileReport {
    /// File that was processed
    pub file: PathBuf,
    /// Diagnostics that were applied
    pub applied: Vec<AppliedFix>,
    /// Diagnostics that were skipped
    pub skipped: Vec<SkippedFix>,
    /// Fixed text, unless written back
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Why the file could not be processed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Serialize)]
struct FixReport<'a> {
    files: &'a [FileReport],
    total_applied: usize,
    total_skipped: usize,
}

/// Read a JSON diagnostics file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a JSON array of
/// diagnostics.
pub fn load_diagnostics(path: &Path) -> Result<Vec<Diagnostic>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read diagnostics file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("invalid diagnostics file {}", path.display()))
}

/// Group diagnostics by the file they belong to.
///
/// Diagnostics without a file are attributed to `default_file`.
///
/// # Errors
///
/// Returns an error if a diagnostic names no file and there is no default.
pub fn group_by_file(
    diagnostics: Vec<Diagnostic>,
    default_file: Option<&Path>,
) -> Result<BTreeMap<PathBuf, Vec<Diagnostic>>> {
    let mut by_file: BTreeMap<PathBuf, Vec<Diagnostic>> = BTreeMap::new();
    for mut diagnostic in diagnostics {
        let file = match (diagnostic.file.clone(), default_file) {
            (Some(file), _) => file,
            (None, Some(default)) => default.to_path_buf(),
            (None, None) => bail!(
                "diagnostic {} at {} names no file; pass the source file as an argument",
                diagnostic.id,
                diagnostic.span
            ),
        };
        diagnostic.file = Some(file.clone());
        by_file.entry(file).or_default().push(diagnostic);
    }
    Ok(by_file)
}

/// Fix every file in parallel and report the results.
///
/// Returns the exit code: 1 if any file could not be processed.
///
/// # Errors
///
/// Returns an error if writing the report fails.
pub fn run_fix<W: Write>(
    by_file: BTreeMap<PathBuf, Vec<Diagnostic>>,
    fix: &RemoveUnreachableCodeFix,
    options: FixOptions,
    mut writer: W,
) -> Result<i32> {
    let jobs: Vec<(PathBuf, Vec<Diagnostic>)> = by_file.into_iter().collect();
    let reports: Vec<FileReport> = jobs
        .par_iter()
        .map(|(path, diagnostics)| fix_file(path, diagnostics, fix, options.in_place))
        .collect();

    let failed = reports.iter().any(|report| report.error.is_some());

    if options.json {
        let report = FixReport {
            files: &reports,
            total_applied: reports.iter().map(|r| r.applied.len()).sum(),
            total_skipped: reports.iter().map(|r| r.skipped.len()).sum(),
        };
        serde_json::to_writer_pretty(&mut writer, &report)?;
        writeln!(writer)?;
    } else {
        let with_headers = reports.len() > 1;
        let mut stderr = std::io::stderr();
        for report in &reports {
            if options.in_place {
                output::print_fix_summary(&mut writer, report)?;
                continue;
            }
            output::print_fix_summary(&mut stderr, report)?;
            if let Some(text) = &report.output {
                if with_headers {
                    output::print_file_header(&mut writer, report)?;
                }
                write!(writer, "{text}")?;
            }
        }
    }

    Ok(i32::from(failed))
}

fn fix_file(
    path: &Path,
    diagnostics: &[Diagnostic],
    fix: &RemoveUnreachableCodeFix,
    in_place: bool,
) -> FileReport {
    let mut report = FileReport {
        file: path.to_path_buf(),
        applied: Vec::new(),
        skipped: Vec::new(),
        output: None,
        error: None,
    };
    if let Err(error) = fix_file_inner(path, diagnostics, fix, in_place, &mut report) {
        tracing::debug!(file = %path.display(), "fix failed: {error:#}");
        report.error = Some(format!("{error:#}"));
    }
    report
}

fn fix_file_inner(
    path: &Path,
    diagnostics: &[Diagnostic],
    fix: &RemoveUnreachableCodeFix,
    in_place: bool,
    report: &mut FileReport,
) -> Result<()> {
    let source =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let tree = SyntaxTree::parse(&source)
        .with_context(|| format!("failed to parse {}", path.display()))?;

    let outcome = fix.fix_all(&tree, diagnostics);
    let fixed = outcome.tree.text();
    tracing::debug!(
        file = %path.display(),
        applied = outcome.applied.len(),
        skipped = outcome.skipped.len(),
        "fixed file"
    );

    if in_place {
        if outcome.changed() {
            fs::write(path, &fixed)
                .with_context(|| format!("failed to write {}", path.display()))?;
        }
    } else {
        report.output = Some(fixed);
    }
    report.applied = outcome.applied;
    report.skipped = outcome.skipped;
    Ok(())
}
