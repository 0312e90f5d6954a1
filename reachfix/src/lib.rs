//! Removal of unreachable code from C# syntax trees.
//!
//! A prior analysis flags a location as unreachable; this crate decides
//! which syntactic unit has to go so the tree stays valid, and produces a
//! new tree without it:
//!
//! ```
//! use reachfix::cst::{SyntaxTree, TextRange};
//! use reachfix::fix::remove_unreachable_code_at;
//!
//! let tree = SyntaxTree::parse("while (false) DoWork();").unwrap();
//! let fixed = remove_unreachable_code_at(&tree, TextRange::new(14, 23)).unwrap();
//! assert_eq!(fixed.text(), "while (false) { }");
//! ```

#![allow(clippy::module_name_repetitions, clippy::items_after_statements)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

/// Module containing the lossless syntax tree and the C# parser.
pub mod cst;

/// Module containing the removal logic and the diagnostic-driven code fix.
pub mod fix;

/// Module for loading configuration.
pub mod config;

/// Module containing shared constants.
pub mod constants;

/// Module defining the command-line interface arguments and structs.
pub mod cli;

/// Module for handling CLI commands and their execution logic.
pub mod commands;

/// Module defining the entry point logic.
pub mod entry_point;

/// Module for colored CLI output.
pub mod output;

/// Module for opt-in diagnostic logging.
pub mod logging;

/// Module containing test utilities.
#[doc(hidden)]
pub mod test_utils;
