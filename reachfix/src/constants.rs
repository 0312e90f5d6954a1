use rustc_hash::FxHashSet;
use std::sync::OnceLock;

/// Name of the configuration file looked up from the target path upwards.
pub const CONFIG_FILENAME: &str = ".reachfix.toml";

/// Compiler diagnostic id for unreachable code.
pub const UNREACHABLE_CODE_ID: &str = "CS0162";

/// Deepest node nesting the parser accepts.
///
/// Dropping and printing a rowan tree recurse once per level.
pub const MAX_NESTING_DEPTH: usize = 1000;

/// Title of the offered code action.
pub const FIX_TITLE: &str = "Remove unreachable code";

/// Diagnostic ids handled when no configuration says otherwise.
pub fn default_fixable_ids() -> &'static FxHashSet<String> {
    static IDS: OnceLock<FxHashSet<String>> = OnceLock::new();
    IDS.get_or_init(|| std::iter::once(UNREACHABLE_CODE_ID.to_owned()).collect())
}
