//! Main binary entry point for `reachfix`.
//!
//! This binary simply delegates to the shared `entry_point::run_with_args()` function.

use anyhow::Result;

fn main() -> Result<()> {
    reachfix::logging::init_tracing();
    let code = reachfix::entry_point::run_with_args(std::env::args().skip(1).collect())?;
    std::process::exit(code);
}
