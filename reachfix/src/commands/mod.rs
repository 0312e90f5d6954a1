//! Commands module - CLI subcommand implementations.

mod explain;
mod fix;

// Re-export all public items
pub use explain::{explain, run_explain, run_tree, Explanation, NodeInfo};
pub use fix::{group_by_file, load_diagnostics, run_fix, FileReport, FixOptions};
