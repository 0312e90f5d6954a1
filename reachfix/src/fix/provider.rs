//! Diagnostic-driven code fix.
//!
//! Hosts report unreachable code as diagnostics: an id plus a source
//! range. [`RemoveUnreachableCodeFix`] turns one diagnostic into a
//! [`CodeAction`], or a batch of them into one rewritten tree.

use super::classify::{classify, StrategyKind};
use super::edit::TextEdit;
use super::error::FixError;
use crate::config::FixConfig;
use crate::constants::{default_fixable_ids, FIX_TITLE};
use crate::cst::{SyntaxNodeExt, SyntaxTree, TextRange};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A reported diagnostic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Diagnostic id, e.g. `CS0162`
    pub id: String,
    /// File the diagnostic belongs to, when read from a diagnostics file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Flagged source range
    pub span: TextRange,
    /// Optional message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Diagnostic {
    /// A diagnostic with no file or message
    #[must_use]
    pub fn new(id: impl Into<String>, span: TextRange) -> Self {
        Self {
            id: id.into(),
            file: None,
            span,
            message: None,
        }
    }
}

/// A fix offered for one diagnostic
#[derive(Debug, Clone)]
pub struct CodeAction {
    /// Title shown to the user
    pub title: &'static str,
    /// The diagnostic being fixed
    pub diagnostic: Diagnostic,
    /// How the code is removed
    pub strategy: StrategyKind,
    /// Range of the removed or replaced node in the original text
    pub target: TextRange,
    /// The rewritten tree
    pub tree: SyntaxTree,
    /// The same change as a text edit against the original text
    pub edit: TextEdit,
}

/// A diagnostic that `fix_all` applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedFix {
    /// The diagnostic
    pub diagnostic: Diagnostic,
    /// How the code was removed
    pub strategy: StrategyKind,
    /// Range of the removed or replaced node in the original text
    pub target: TextRange,
}

/// Why `fix_all` left a diagnostic alone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    /// The id is not one this fix handles
    #[error("diagnostic id is not fixable")]
    NotFixable,
    /// The removal is already covered by another diagnostic's removal
    #[error("covered by the fix for the diagnostic at {covered_by}")]
    Covered {
        /// Span of the diagnostic whose removal covers this one
        covered_by: TextRange,
    },
    /// Classification or rewriting failed
    #[error("{message}")]
    Failed {
        /// The error, rendered
        message: String,
    },
    /// The rewritten text no longer parses
    #[error("rewritten code does not parse: {message}")]
    InvalidResult {
        /// The parse error, rendered
        message: String,
    },
}

impl From<FixError> for SkipReason {
    fn from(error: FixError) -> Self {
        Self::Failed {
            message: error.to_string(),
        }
    }
}

/// A diagnostic that `fix_all` did not apply
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFix {
    /// The diagnostic
    pub diagnostic: Diagnostic,
    /// Why it was skipped
    #[serde(flatten)]
    pub reason: SkipReason,
}

/// Result of fixing every diagnostic of one tree
#[derive(Debug, Clone)]
pub struct FixAllOutcome {
    /// The final tree
    pub tree: SyntaxTree,
    /// Applied diagnostics, in source order
    pub applied: Vec<AppliedFix>,
    /// Skipped diagnostics, in input order
    pub skipped: Vec<SkippedFix>,
}

impl FixAllOutcome {
    /// Whether anything was rewritten
    #[must_use]
    pub fn changed(&self) -> bool {
        !self.applied.is_empty()
    }
}

/// The "remove unreachable code" fix
#[derive(Debug, Clone)]
pub struct RemoveUnreachableCodeFix {
    fixable_ids: FxHashSet<String>,
    verify: bool,
}

impl Default for RemoveUnreachableCodeFix {
    fn default() -> Self {
        Self {
            fixable_ids: default_fixable_ids().clone(),
            verify: true,
        }
    }
}

/// A diagnostic resolved against the tree it was reported for
struct Planned {
    diagnostic: Diagnostic,
    strategy: StrategyKind,
    target: TextRange,
}

impl RemoveUnreachableCodeFix {
    /// Create a fix for the given diagnostic ids
    #[must_use]
    pub fn new<I, S>(fixable_ids: I, verify: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fixable_ids: fixable_ids.into_iter().map(Into::into).collect(),
            verify,
        }
    }

    /// Create a fix from the `[reachfix]` config section
    #[must_use]
    pub fn from_config(config: &FixConfig) -> Self {
        Self::new(config.fixable_ids.iter().cloned(), config.verify)
    }

    /// Title of the offered code action
    #[must_use]
    pub const fn title(&self) -> &'static str {
        FIX_TITLE
    }

    /// Ids this fix handles, sorted
    #[must_use]
    pub fn fixable_diagnostic_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.fixable_ids.iter().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Whether the diagnostic's id is handled by this fix
    #[must_use]
    pub fn can_fix(&self, diagnostic: &Diagnostic) -> bool {
        self.fixable_ids.contains(&diagnostic.id)
    }

    /// Offer a fix for one diagnostic.
    ///
    /// Returns `None` when the id is not handled, the span resolves to no
    /// node, no removal strategy applies, or (with verification on) the
    /// result would not parse.
    #[must_use]
    pub fn compute_fix(&self, tree: &SyntaxTree, diagnostic: &Diagnostic) -> Option<CodeAction> {
        if !self.can_fix(diagnostic) {
            tracing::debug!(id = %diagnostic.id, "diagnostic id not fixable");
            return None;
        }
        match self.try_fix(tree, diagnostic) {
            Ok((planned, fixed)) => {
                let edit = TextEdit::between(&tree.text(), &fixed.text());
                tracing::debug!(
                    span = %diagnostic.span,
                    strategy = %planned.strategy,
                    "offering fix"
                );
                Some(CodeAction {
                    title: FIX_TITLE,
                    diagnostic: planned.diagnostic,
                    strategy: planned.strategy,
                    target: planned.target,
                    tree: fixed,
                    edit,
                })
            }
            Err(reason) => {
                tracing::debug!(span = %diagnostic.span, %reason, "declining fix");
                None
            }
        }
    }

    /// Apply every fixable diagnostic to `tree`.
    ///
    /// Each diagnostic is classified against `tree`. A diagnostic whose
    /// removal target lies inside one already kept is skipped, since its
    /// code goes away with the outer removal. The rest are applied one
    /// after another, last target first, each against the tree produced by
    /// the previous step; text before a removal keeps its offsets, so every
    /// remaining span still designates the same code.
    #[must_use]
    pub fn fix_all(&self, tree: &SyntaxTree, diagnostics: &[Diagnostic]) -> FixAllOutcome {
        let mut skipped = Vec::new();
        let mut planned = Vec::new();

        for diagnostic in diagnostics {
            if !self.can_fix(diagnostic) {
                skipped.push(SkippedFix {
                    diagnostic: diagnostic.clone(),
                    reason: SkipReason::NotFixable,
                });
                continue;
            }
            match plan(tree, diagnostic) {
                Ok(plan) => planned.push(plan),
                Err(error) => skipped.push(SkippedFix {
                    diagnostic: diagnostic.clone(),
                    reason: error.into(),
                }),
            }
        }

        // Outer targets first, so nested ones meet their cover
        planned.sort_by(|a, b| {
            a.target
                .start
                .cmp(&b.target.start)
                .then(b.target.end.cmp(&a.target.end))
        });
        let mut kept: Vec<Planned> = Vec::with_capacity(planned.len());
        for plan in planned {
            match kept.last() {
                Some(cover) if cover.target.contains_range(plan.target) => {
                    skipped.push(SkippedFix {
                        diagnostic: plan.diagnostic,
                        reason: SkipReason::Covered {
                            covered_by: cover.diagnostic.span,
                        },
                    });
                }
                _ => kept.push(plan),
            }
        }

        let mut current = tree.clone();
        let mut applied = Vec::with_capacity(kept.len());
        for plan in kept.into_iter().rev() {
            match self.try_fix(&current, &plan.diagnostic) {
                Ok((replanned, fixed)) => {
                    tracing::debug!(
                        span = %plan.diagnostic.span,
                        strategy = %replanned.strategy,
                        "applied fix"
                    );
                    current = fixed;
                    applied.push(AppliedFix {
                        diagnostic: plan.diagnostic,
                        strategy: plan.strategy,
                        target: plan.target,
                    });
                }
                Err(reason) => {
                    tracing::debug!(span = %plan.diagnostic.span, %reason, "skipped fix");
                    skipped.push(SkippedFix {
                        diagnostic: plan.diagnostic,
                        reason,
                    });
                }
            }
        }
        applied.reverse();

        FixAllOutcome {
            tree: current,
            applied,
            skipped,
        }
    }

    /// Classify, rewrite and (optionally) verify one diagnostic
    fn try_fix(
        &self,
        tree: &SyntaxTree,
        diagnostic: &Diagnostic,
    ) -> Result<(Planned, SyntaxTree), SkipReason> {
        let node = tree.find_node(diagnostic.span).ok_or(FixError::NodeNotFound {
            range: diagnostic.span,
        })?;
        let strategy = classify(&node)?;
        let fixed = strategy.apply(tree)?;
        if self.verify {
            if let Err(error) = SyntaxTree::parse(&fixed.text()) {
                return Err(SkipReason::InvalidResult {
                    message: error.to_string(),
                });
            }
        }
        let planned = Planned {
            diagnostic: diagnostic.clone(),
            strategy: strategy.kind(),
            target: strategy.target().span(),
        };
        Ok((planned, fixed))
    }
}

/// Resolve and classify without rewriting
fn plan(tree: &SyntaxTree, diagnostic: &Diagnostic) -> Result<Planned, FixError> {
    let node = tree.find_node(diagnostic.span).ok_or(FixError::NodeNotFound {
        range: diagnostic.span,
    })?;
    let strategy = classify(&node)?;
    Ok(Planned {
        diagnostic: diagnostic.clone(),
        strategy: strategy.kind(),
        target: strategy.target().span(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::span_of;

    fn diagnostic(source: &str, needle: &str) -> Diagnostic {
        Diagnostic::new("CS0162", span_of(source, needle))
    }

    #[test]
    fn test_compute_fix_produces_edit() {
        let source = "{ A(); B(); }";
        let tree = SyntaxTree::parse(source).unwrap();
        let action = RemoveUnreachableCodeFix::default()
            .compute_fix(&tree, &diagnostic(source, "B();"))
            .unwrap();
        assert_eq!(action.title, "Remove unreachable code");
        assert_eq!(action.strategy, StrategyKind::RemoveStatement);
        assert_eq!(action.tree.text(), "{ A(); }");
        assert_eq!(action.edit.apply(source).unwrap(), "{ A(); }");
    }

    #[test]
    fn test_compute_fix_declines_other_ids() {
        let source = "{ A(); B(); }";
        let tree = SyntaxTree::parse(source).unwrap();
        let other = Diagnostic::new("CS0168", span_of(source, "B();"));
        assert!(RemoveUnreachableCodeFix::default()
            .compute_fix(&tree, &other)
            .is_none());
    }

    #[test]
    fn test_compute_fix_declines_unsupported() {
        let source = "if (x) A();";
        let tree = SyntaxTree::parse(source).unwrap();
        assert!(RemoveUnreachableCodeFix::default()
            .compute_fix(&tree, &diagnostic(source, "x"))
            .is_none());
    }

    #[test]
    fn test_custom_ids() {
        let fix = RemoveUnreachableCodeFix::new(["X1", "X0"], false);
        assert_eq!(fix.fixable_diagnostic_ids(), vec!["X0", "X1"]);
        assert!(!fix.can_fix(&Diagnostic::new("CS0162", TextRange::new(0, 1))));
    }

    #[test]
    fn test_fix_all_skips_covered() {
        let source = "{ return; a.B(); int y = 5; }";
        let tree = SyntaxTree::parse(source).unwrap();
        let diagnostics = vec![
            diagnostic(source, "a.B();"),
            diagnostic(source, "a"),
            diagnostic(source, "int y = 5;"),
        ];
        let outcome = RemoveUnreachableCodeFix::default().fix_all(&tree, &diagnostics);
        assert_eq!(outcome.tree.text(), "{ return; }");
        assert_eq!(outcome.applied.len(), 2);
        assert_eq!(outcome.skipped.len(), 1);
        assert!(matches!(
            outcome.skipped[0].reason,
            SkipReason::Covered { .. }
        ));
    }
}
