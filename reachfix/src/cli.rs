use crate::cst::TextRange;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Help text for configuration file options, shown at the bottom of --help.
const CONFIG_HELP: &str = "\
CONFIGURATION FILE (.reachfix.toml):
  Looked up from the target file's directory upwards.

  [reachfix]
  fixable_ids = [\"CS0162\"]   # Diagnostic ids the fix accepts
  verify = true              # Decline fixes whose output does not parse
  in_place = false           # Rewrite files instead of printing them

DIAGNOSTICS FILE (--diagnostics):
  A JSON array of reported diagnostics:

  [{ \"id\": \"CS0162\", \"file\": \"src/Program.cs\",
     \"span\": { \"start\": 40, \"end\": 52 }, \"message\": \"...\" }]
";

/// Command line arguments for reachfix.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Remove code flagged as unreachable from C# sources",
    after_help = CONFIG_HELP
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by commands that resolve spans.
#[derive(Args, Debug, Default, Clone)]
pub struct SpanArgs {
    /// Flagged byte range `START..END` (repeatable).
    #[arg(long = "span", value_name = "START..END")]
    pub spans: Vec<TextRange>,

    /// Diagnostic id attached to `--span` ranges.
    #[arg(long, value_name = "ID")]
    pub id: Option<String>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Remove unreachable code and print (or write back) the result.
    Fix {
        /// Source file. Optional when every diagnostic in
        /// `--diagnostics` names its file.
        file: Option<PathBuf>,

        /// Flagged spans.
        #[command(flatten)]
        spans: SpanArgs,

        /// JSON file with reported diagnostics.
        #[arg(long, value_name = "FILE")]
        diagnostics: Option<PathBuf>,

        /// Write fixed files back instead of printing them.
        #[arg(long, short = 'w')]
        in_place: bool,

        /// Keep fixes even if the rewritten code no longer parses.
        #[arg(long)]
        no_verify: bool,

        /// Output a JSON report.
        #[arg(long)]
        json: bool,
    },

    /// Show how the code at a span would be removed, without rewriting.
    Explain {
        /// Source file.
        file: PathBuf,

        /// Flagged byte range `START..END`.
        #[arg(long, value_name = "START..END")]
        span: TextRange,

        /// Output JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print the syntax tree of a file with byte ranges.
    Tree {
        /// Source file.
        file: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fix_spans() {
        let cli = Cli::try_parse_from([
            "reachfix", "fix", "a.cs", "--span", "3..7", "--span", "10..12", "--json",
        ])
        .unwrap();
        let Commands::Fix { file, spans, json, .. } = cli.command else {
            panic!("expected fix");
        };
        assert_eq!(file, Some(PathBuf::from("a.cs")));
        assert_eq!(spans.spans, vec![TextRange::new(3, 7), TextRange::new(10, 12)]);
        assert!(json);
    }

    #[test]
    fn test_rejects_bad_span() {
        assert!(Cli::try_parse_from(["reachfix", "explain", "a.cs", "--span", "7"]).is_err());
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
