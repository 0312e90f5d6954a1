//! Tests for the diagnostic-driven code fix.
#![allow(clippy::unwrap_used)]

use reachfix::cst::{SyntaxTree, TextRange};
use reachfix::fix::{
    remove_unreachable_code_at, Diagnostic, FixError, RemoveUnreachableCodeFix, SkipReason,
    StrategyKind,
};
use reachfix::test_utils::span_of;

const METHOD_BODY: &str = "{
    Start();
    return;
    Cleanup();
    int code = Compute(1);
    logger.Sink.Flush();
    if (code > 0) Warn(); else Quit();
}
";

fn cs0162(source: &str, needle: &str) -> Diagnostic {
    Diagnostic::new("CS0162", span_of(source, needle))
}

#[test]
fn test_fix_all_removes_every_flagged_statement() {
    let tree = SyntaxTree::parse(METHOD_BODY).unwrap();
    let diagnostics = vec![
        cs0162(METHOD_BODY, "Cleanup();"),
        cs0162(METHOD_BODY, "Compute(1)"),
        cs0162(METHOD_BODY, "Sink"),
        cs0162(METHOD_BODY, "if (code > 0) Warn(); else Quit();"),
    ];
    let outcome = RemoveUnreachableCodeFix::default().fix_all(&tree, &diagnostics);

    assert_eq!(outcome.tree.text(), "{\n    Start();\n    return;\n}\n");
    assert!(outcome.skipped.is_empty(), "{:?}", outcome.skipped);
    let strategies: Vec<StrategyKind> = outcome.applied.iter().map(|fix| fix.strategy).collect();
    assert_eq!(
        strategies,
        vec![
            StrategyKind::RemoveStatement,
            StrategyKind::RemoveDeclaration,
            StrategyKind::RemoveExpressionStatement,
            StrategyKind::RemoveStatement,
        ]
    );
}

#[test]
fn test_fix_all_is_order_independent() {
    let tree = SyntaxTree::parse(METHOD_BODY).unwrap();
    let mut diagnostics = vec![
        cs0162(METHOD_BODY, "Cleanup();"),
        cs0162(METHOD_BODY, "Flush"),
        cs0162(METHOD_BODY, "Quit();"),
    ];
    let fix = RemoveUnreachableCodeFix::default();
    let forward = fix.fix_all(&tree, &diagnostics);
    diagnostics.reverse();
    let backward = fix.fix_all(&tree, &diagnostics);

    assert_eq!(forward.tree, backward.tree);
    assert_eq!(
        forward.tree.text(),
        "{\n    Start();\n    return;\n    int code = Compute(1);\n    if (code > 0) Warn(); }\n"
    );
}

#[test]
fn test_fix_all_skips_nested_diagnostics() {
    let tree = SyntaxTree::parse(METHOD_BODY).unwrap();
    let diagnostics = vec![
        cs0162(METHOD_BODY, "Quit"),
        cs0162(METHOD_BODY, "if (code > 0) Warn(); else Quit();"),
        cs0162(METHOD_BODY, "Warn();"),
    ];
    let outcome = RemoveUnreachableCodeFix::default().fix_all(&tree, &diagnostics);

    assert_eq!(outcome.applied.len(), 1);
    assert_eq!(outcome.skipped.len(), 2);
    for skipped in &outcome.skipped {
        assert_eq!(
            skipped.reason,
            SkipReason::Covered {
                covered_by: span_of(METHOD_BODY, "if (code > 0) Warn(); else Quit();")
            }
        );
    }
}

#[test]
fn test_fix_all_reports_unfixable_diagnostics() {
    let tree = SyntaxTree::parse(METHOD_BODY).unwrap();
    let diagnostics = vec![
        Diagnostic::new("CS0168", span_of(METHOD_BODY, "code")),
        cs0162(METHOD_BODY, "code > 0"),
        Diagnostic::new("CS0162", TextRange::new(500, 510)),
    ];
    let outcome = RemoveUnreachableCodeFix::default().fix_all(&tree, &diagnostics);

    assert!(!outcome.changed());
    assert_eq!(outcome.tree, tree);
    assert_eq!(outcome.skipped[0].reason, SkipReason::NotFixable);
    assert!(matches!(
        &outcome.skipped[1].reason,
        SkipReason::Failed { message } if message.contains("unsupported context")
    ));
    assert!(matches!(
        &outcome.skipped[2].reason,
        SkipReason::Failed { message } if message.contains("no syntax node")
    ));
}

#[test]
fn test_compute_fix_edit_matches_tree() {
    let tree = SyntaxTree::parse(METHOD_BODY).unwrap();
    let action = RemoveUnreachableCodeFix::default()
        .compute_fix(&tree, &cs0162(METHOD_BODY, "Cleanup();"))
        .unwrap();
    assert_eq!(action.title, "Remove unreachable code");
    assert_eq!(action.target, span_of(METHOD_BODY, "Cleanup();"));
    assert_eq!(action.edit.apply(METHOD_BODY).unwrap(), action.tree.text());
    assert!(action.edit.replacement.is_empty());
}

#[test]
fn test_remove_at_range() {
    let source = "while (false) DoWork();";
    let tree = SyntaxTree::parse(source).unwrap();
    let fixed = remove_unreachable_code_at(&tree, span_of(source, "DoWork();")).unwrap();
    assert_eq!(fixed.text(), "while (false) { }");

    let missing = TextRange::new(40, 41);
    assert_eq!(
        remove_unreachable_code_at(&tree, missing),
        Err(FixError::NodeNotFound { range: missing })
    );
}

#[test]
fn test_trees_are_shared_across_threads() {
    let tree = SyntaxTree::parse(METHOD_BODY).unwrap();
    let fix = RemoveUnreachableCodeFix::default();
    let results: Vec<String> = std::thread::scope(|scope| {
        let handles: Vec<_> = ["Cleanup();", "Flush", "Quit();"]
            .into_iter()
            .map(|needle| {
                let tree = &tree;
                let fix = &fix;
                scope.spawn(move || {
                    fix.compute_fix(tree, &cs0162(METHOD_BODY, needle))
                        .unwrap()
                        .tree
                        .text()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(results.len(), 3);
    assert!(results.iter().all(|text| text != METHOD_BODY));
    assert_eq!(tree.text(), METHOD_BODY);
}
