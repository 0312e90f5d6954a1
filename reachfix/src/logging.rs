//! Diagnostic logging for the command-line tool.
//!
//! Output format is selected by `REACHFIX_LOG_FORMAT`:
//!
//! - `text` (default): flat `tracing-subscriber` lines
//! - `json`: one JSON object per event
//!
//! ```bash
//! REACHFIX_LOG=debug reachfix fix Program.cs --span 40..52
//! REACHFIX_LOG=reachfix::fix=debug REACHFIX_LOG_FORMAT=json reachfix fix ...
//! ```
//!
//! The subscriber is only installed when `REACHFIX_LOG` (or `RUST_LOG`) is
//! set. Everything goes to stderr, so fixed code on stdout stays clean.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter, Registry};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Flat text lines (default).
    Text,
    /// Newline-delimited JSON objects.
    Json,
}

impl LogFormat {
    /// Parse a `REACHFIX_LOG_FORMAT` value; anything unknown is text.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Text
        }
    }

    fn from_env() -> Self {
        Self::parse(&std::env::var("REACHFIX_LOG_FORMAT").unwrap_or_default())
    }
}

/// `REACHFIX_LOG` wins over `RUST_LOG`; both use the `RUST_LOG` syntax
fn build_filter() -> EnvFilter {
    if let Ok(value) = std::env::var("REACHFIX_LOG") {
        EnvFilter::builder().parse_lossy(value)
    } else {
        EnvFilter::from_default_env()
    }
}

/// Install the global subscriber if logging was requested.
///
/// A second call, or a subscriber installed by an embedding host, is left
/// in place.
pub fn init_tracing() {
    if std::env::var_os("REACHFIX_LOG").is_none() && std::env::var_os("RUST_LOG").is_none() {
        return;
    }

    let filter = build_filter();
    let installed = match LogFormat::from_env() {
        LogFormat::Json => Registry::default()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
            .is_ok(),
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
            .is_ok(),
    };
    if !installed {
        tracing::debug!("keeping the existing tracing subscriber");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parse() {
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
        assert_eq!(LogFormat::parse("JSON"), LogFormat::Json);
        assert_eq!(LogFormat::parse("tree"), LogFormat::Text);
        assert_eq!(LogFormat::parse(""), LogFormat::Text);
    }
}
