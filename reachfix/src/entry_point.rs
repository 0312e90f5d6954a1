use crate::cli::{Cli, Commands};
use crate::commands::{group_by_file, load_diagnostics, run_explain, run_fix, run_tree, FixOptions};
use crate::config::Config;
use crate::constants::UNREACHABLE_CODE_ID;
use crate::fix::{Diagnostic, RemoveUnreachableCodeFix};
use anyhow::Result;
use clap::Parser;
use std::path::Path;

/// Runs reachfix with the given arguments.
///
/// # Errors
///
/// Returns an error if configuration loading or command execution fails.
pub fn run_with_args(args: Vec<String>) -> Result<i32> {
    run_with_args_to(args, &mut std::io::stdout())
}

/// Run reachfix with the given arguments, writing output to the specified writer.
///
/// This is the testable version of `run_with_args` that allows output capture.
///
/// # Errors
///
/// Returns an error if configuration loading or command execution fails.
pub fn run_with_args_to<W: std::io::Write>(args: Vec<String>, writer: &mut W) -> Result<i32> {
    let mut program_args = vec!["reachfix".to_owned()];
    program_args.extend(args);
    let cli_var = match Cli::try_parse_from(program_args) {
        Ok(c) => c,
        Err(e) => match e.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                write!(writer, "{e}")?;
                writer.flush()?;
                return Ok(0);
            }
            _ => {
                eprint!("{e}");
                return Ok(2);
            }
        },
    };

    match cli_var.command {
        Commands::Fix {
            file,
            spans,
            diagnostics,
            in_place,
            no_verify,
            json,
        } => {
            for path in file.iter().chain(diagnostics.iter()) {
                if !path.exists() {
                    eprintln!("Error: The file '{}' does not exist.", path.display());
                    return Ok(1);
                }
            }
            if !spans.spans.is_empty() && file.is_none() {
                eprintln!("Error: --span needs the source file as an argument.");
                return Ok(1);
            }

            let config_path = file
                .as_deref()
                .or(diagnostics.as_deref())
                .unwrap_or_else(|| Path::new("."));
            let mut config = Config::try_load_from_path(config_path)?.reachfix;
            if no_verify {
                config.verify = false;
            }
            tracing::debug!(
                fixable_ids = ?config.fixable_ids,
                verify = config.verify,
                "loaded configuration"
            );

            let id = spans
                .id
                .or_else(|| config.fixable_ids.first().cloned())
                .unwrap_or_else(|| UNREACHABLE_CODE_ID.to_owned());
            let mut all: Vec<Diagnostic> = spans
                .spans
                .iter()
                .map(|&span| Diagnostic::new(id.clone(), span))
                .collect();
            if let Some(path) = &diagnostics {
                all.extend(load_diagnostics(path)?);
            }
            if all.is_empty() {
                eprintln!("Error: Nothing to fix; pass --span or --diagnostics.");
                return Ok(1);
            }

            let by_file = group_by_file(all, file.as_deref())?;
            let fix = RemoveUnreachableCodeFix::from_config(&config);
            let options = FixOptions {
                in_place: in_place || config.in_place,
                json,
            };
            run_fix(by_file, &fix, options, writer)
        }
        Commands::Explain { file, span, json } => {
            if !file.exists() {
                eprintln!("Error: The file '{}' does not exist.", file.display());
                return Ok(1);
            }
            run_explain(&file, span, json, writer)
        }
        Commands::Tree { file } => {
            if !file.exists() {
                eprintln!("Error: The file '{}' does not exist.", file.display());
                return Ok(1);
            }
            run_tree(&file, writer)
        }
    }
}
