//! Colored terminal output for the CLI.

use crate::commands::{Explanation, FileReport};
use colored::Colorize;
use std::io::Write;

/// Print an error line.
pub fn print_error(writer: &mut impl Write, message: &str) -> std::io::Result<()> {
    writeln!(writer, "{} {message}", "error:".red().bold())
}

/// Print a header naming the file whose fixed text follows.
pub fn print_file_header(writer: &mut impl Write, report: &FileReport) -> std::io::Result<()> {
    writeln!(
        writer,
        "{}",
        format!("==> {} <==", report.file.display()).cyan().bold()
    )
}

/// Print what was applied and skipped for one file.
pub fn print_fix_summary(writer: &mut impl Write, report: &FileReport) -> std::io::Result<()> {
    if let Some(error) = &report.error {
        return print_error(writer, &format!("{}: {error}", report.file.display()));
    }

    let applied = report.applied.len();
    let status = if applied == 0 {
        "no changes".dimmed()
    } else if applied == 1 {
        "1 fix applied".green()
    } else {
        format!("{applied} fixes applied").green()
    };
    writeln!(writer, "{}: {status}", report.file.display().to_string().bold())?;

    for fix in &report.applied {
        writeln!(
            writer,
            "  {} {} {} ({})",
            "-".green(),
            fix.diagnostic.id,
            fix.target,
            fix.strategy
        )?;
    }
    for skipped in &report.skipped {
        writeln!(
            writer,
            "  {} {} {}: {}",
            "skipped".yellow(),
            skipped.diagnostic.id,
            skipped.diagnostic.span,
            skipped.reason
        )?;
    }
    Ok(())
}

/// Print how the code at a span would be removed.
pub fn print_explanation(writer: &mut impl Write, explanation: &Explanation) -> std::io::Result<()> {
    writeln!(
        writer,
        "{} {} at {}",
        "node:".bold(),
        explanation.node.kind,
        explanation.node.range
    )?;
    writeln!(writer, "  {}", explanation.node.text.dimmed())?;

    if let Some(root) = &explanation.expression_root {
        writeln!(
            writer,
            "{} {} at {}",
            "expression root:".bold(),
            root.kind,
            root.range
        )?;
    }

    match (&explanation.strategy, &explanation.target) {
        (Some(strategy), Some(target)) => {
            writeln!(writer, "{} {}", "strategy:".bold(), strategy.to_string().green())?;
            writeln!(
                writer,
                "{} {} at {}",
                "target:".bold(),
                target.kind,
                target.range
            )?;
            writeln!(writer, "  {}", target.text.dimmed())?;
        }
        _ => {
            let reason = explanation.error.as_deref().unwrap_or("no removal strategy");
            writeln!(writer, "{} {}", "strategy:".bold(), reason.red())?;
        }
    }
    Ok(())
}
