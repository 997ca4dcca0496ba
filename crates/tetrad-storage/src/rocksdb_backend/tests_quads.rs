//! Statement operation tests for the RocksDB backend.
//!
//! All tests run against real stores in temp directories; nothing is
//! mocked.

use tempfile::TempDir;

use super::core::QuadStore;
use crate::keys::IndexOrder;
use tetrad_core::{Statement, StatementPattern, Term};

// =========================================================================
// Helper Functions
// =========================================================================

pub(crate) fn create_temp_store() -> (TempDir, QuadStore) {
    let tmp = TempDir::new().expect("failed to create temp dir");
    let store = QuadStore::open(tmp.path().join("graph")).expect("failed to open store");
    (tmp, store)
}

pub(crate) fn iri(suffix: &str) -> Term {
    Term::iri(format!("http://example.org/{suffix}"))
}

pub(crate) fn statement(s: &str, p: &str, o: &str) -> Statement {
    Statement::new(iri(s), iri(p), iri(o))
}

fn collect(store: &QuadStore, pattern: &StatementPattern) -> Vec<Statement> {
    let mut found = Vec::new();
    store
        .get_statements(pattern, |statement| found.push(statement))
        .expect("get_statements failed");
    found
}

// =========================================================================
// Add + Scan
// =========================================================================

#[test]
fn test_add_and_scan_roundtrip() {
    let (_tmp, store) = create_temp_store();
    let stmt = statement("alice", "knows", "bob");

    let added = store
        .add_statements(vec![stmt.clone()])
        .expect("add failed");
    assert_eq!(added, 1);

    let found = collect(&store, &StatementPattern::any());
    assert_eq!(found, vec![stmt]);
}

#[test]
fn test_fully_specified_pattern_returns_exactly_that_statement() {
    let (_tmp, store) = create_temp_store();
    let wanted = statement("alice", "knows", "bob");
    store
        .add_statements(vec![wanted.clone(), statement("alice", "knows", "carol")])
        .expect("add failed");

    let found = collect(&store, &StatementPattern::from(&wanted));
    assert_eq!(found, vec![wanted]);
}

#[test]
fn test_subject_pattern_selects_matching_statements() {
    let (_tmp, store) = create_temp_store();
    store
        .add_statements(vec![
            statement("alice", "knows", "bob"),
            statement("alice", "knows", "carol"),
            statement("bob", "knows", "carol"),
        ])
        .expect("add failed");

    let found = collect(&store, &StatementPattern::any().with_subject(iri("alice")));
    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|s| s.subject == iri("alice")));
}

#[test]
fn test_subject_and_predicate_pattern() {
    let (_tmp, store) = create_temp_store();
    store
        .add_statements(vec![
            statement("alice", "knows", "bob"),
            statement("alice", "likes", "carol"),
        ])
        .expect("add failed");

    let pattern = StatementPattern::any()
        .with_subject(iri("alice"))
        .with_predicate(iri("likes"));
    let found = collect(&store, &pattern);
    assert_eq!(found, vec![statement("alice", "likes", "carol")]);
}

#[test]
fn test_object_pattern_finds_statements() {
    let (_tmp, store) = create_temp_store();
    store
        .add_statements(vec![
            statement("alice", "knows", "bob"),
            statement("carol", "knows", "bob"),
            statement("carol", "knows", "dave"),
        ])
        .expect("add failed");

    let found = collect(&store, &StatementPattern::any().with_object(iri("bob")));
    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|s| s.object == iri("bob")));
}

#[test]
fn test_unconstrained_pattern_returns_everything() {
    let (_tmp, store) = create_temp_store();
    let statements = vec![
        statement("a", "p", "x"),
        statement("b", "p", "y"),
        statement("c", "q", "z"),
    ];
    store.add_statements(statements.clone()).expect("add failed");

    let found = collect(&store, &StatementPattern::any());
    assert_eq!(found.len(), statements.len());
    for stmt in &statements {
        assert!(found.contains(stmt), "missing {stmt:?}");
    }
}

#[test]
fn test_pattern_with_no_matches_visits_nothing() {
    let (_tmp, store) = create_temp_store();
    store
        .add_statements(vec![statement("alice", "knows", "bob")])
        .expect("add failed");

    let found = collect(&store, &StatementPattern::any().with_subject(iri("nobody")));
    assert!(found.is_empty());
}

// =========================================================================
// Index redundancy
// =========================================================================

#[test]
fn test_all_four_indexes_hold_every_statement() {
    let (_tmp, store) = create_temp_store();
    let statements = vec![
        statement("alice", "knows", "bob"),
        statement("bob", "likes", "carol"),
    ];
    store.add_statements(statements.clone()).expect("add failed");

    for order in IndexOrder::ALL {
        let found: Vec<Statement> = store
            .scan_index(&StatementPattern::any(), order)
            .collect::<Result<_, _>>()
            .expect("scan failed");
        assert_eq!(found.len(), statements.len(), "store {order:?} incomplete");
        for stmt in &statements {
            assert!(found.contains(stmt), "{order:?} is missing {stmt:?}");
        }
    }
}

#[test]
fn test_forced_index_never_changes_results() {
    let (_tmp, store) = create_temp_store();
    store
        .add_statements(vec![
            statement("alice", "knows", "bob"),
            statement("alice", "likes", "carol"),
            statement("dave", "knows", "bob"),
        ])
        .expect("add failed");

    let pattern = StatementPattern::any().with_subject(iri("alice"));
    let planned = collect(&store, &pattern);
    assert_eq!(planned.len(), 2);

    // A layout with no usable prefix for this pattern degrades to a wider
    // scan but must return the same statements.
    for order in IndexOrder::ALL {
        let forced: Vec<Statement> = store
            .scan_index(&pattern, order)
            .collect::<Result<_, _>>()
            .expect("scan failed");
        assert_eq!(forced.len(), planned.len(), "{order:?} changed the result");
        for stmt in &planned {
            assert!(forced.contains(stmt), "{order:?} lost {stmt:?}");
        }
    }
}

#[test]
fn test_duplicate_add_overwrites_in_place() {
    let (_tmp, store) = create_temp_store();
    let stmt = statement("alice", "knows", "bob");

    assert_eq!(
        store.add_statements(vec![stmt.clone()]).expect("add failed"),
        1
    );
    assert_eq!(
        store.add_statements(vec![stmt.clone()]).expect("add failed"),
        1
    );

    for order in IndexOrder::ALL {
        let found: Vec<Statement> = store
            .scan_index(&StatementPattern::any(), order)
            .collect::<Result<_, _>>()
            .expect("scan failed");
        assert_eq!(found, vec![stmt.clone()], "duplicate visible in {order:?}");
    }
}

// =========================================================================
// Remove
// =========================================================================

#[test]
fn test_remove_clears_every_index() {
    let (_tmp, store) = create_temp_store();
    let keep = statement("alice", "knows", "bob");
    let drop = statement("bob", "likes", "carol");
    store
        .add_statements(vec![keep.clone(), drop.clone()])
        .expect("add failed");

    let removed = store
        .remove_statements(&StatementPattern::any().with_subject(iri("bob")))
        .expect("remove failed");
    assert_eq!(removed, 1);

    for order in IndexOrder::ALL {
        let found: Vec<Statement> = store
            .scan_index(&StatementPattern::any(), order)
            .collect::<Result<_, _>>()
            .expect("scan failed");
        assert_eq!(found, vec![keep.clone()], "stale entry in {order:?}");
    }
}

#[test]
fn test_remove_with_no_matches_returns_zero() {
    let (_tmp, store) = create_temp_store();
    store
        .add_statements(vec![statement("alice", "knows", "bob")])
        .expect("add failed");

    let removed = store
        .remove_statements(&StatementPattern::any().with_subject(iri("nobody")))
        .expect("remove failed");
    assert_eq!(removed, 0);
    assert_eq!(collect(&store, &StatementPattern::any()).len(), 1);
}

#[test]
fn test_remove_everything_with_wildcard() {
    let (_tmp, store) = create_temp_store();
    store
        .add_statements(vec![
            statement("a", "p", "x"),
            statement("b", "q", "y"),
            statement("c", "r", "z"),
        ])
        .expect("add failed");

    let removed = store
        .remove_statements(&StatementPattern::any())
        .expect("remove failed");
    assert_eq!(removed, 3);
    assert!(collect(&store, &StatementPattern::any()).is_empty());
}

// =========================================================================
// Contexts
// =========================================================================

#[test]
fn test_named_context_and_default_graph_are_distinct() {
    let (_tmp, store) = create_temp_store();
    let in_default = statement("alice", "knows", "bob");
    let in_named = Statement::with_context(iri("alice"), iri("knows"), iri("carol"), iri("people"));
    store
        .add_statements(vec![in_default.clone(), in_named.clone()])
        .expect("add failed");

    // Wildcard context spans both graphs.
    assert_eq!(collect(&store, &StatementPattern::any()).len(), 2);

    // A bound context selects one graph, and the default graph sentinel is
    // a bound context like any other.
    let named_only = collect(&store, &StatementPattern::any().with_context(iri("people")));
    assert_eq!(named_only, vec![in_named]);

    let default_only = collect(
        &store,
        &StatementPattern::any().with_context(Term::DefaultGraph),
    );
    assert_eq!(default_only, vec![in_default]);
}

#[test]
fn test_subject_and_context_pattern() {
    let (_tmp, store) = create_temp_store();
    let wanted = Statement::with_context(iri("alice"), iri("knows"), iri("bob"), iri("people"));
    store
        .add_statements(vec![
            wanted.clone(),
            Statement::with_context(iri("alice"), iri("knows"), iri("bob"), iri("work")),
            Statement::with_context(iri("dave"), iri("knows"), iri("bob"), iri("people")),
        ])
        .expect("add failed");

    let pattern = StatementPattern::any()
        .with_subject(iri("alice"))
        .with_context(iri("people"));
    assert_eq!(collect(&store, &pattern), vec![wanted]);
}

// =========================================================================
// Post-scan filtering
// =========================================================================

#[test]
fn test_non_contiguous_pattern_is_filtered_after_the_scan() {
    let (_tmp, store) = create_temp_store();
    let wanted = statement("alice", "likes", "carol");
    store
        .add_statements(vec![statement("alice", "knows", "bob"), wanted.clone()])
        .expect("add failed");

    // Subject and object bound with the predicate between them free: the
    // object constraint cannot extend the key prefix, so matching has to
    // reject the other alice statement after the scan.
    let pattern = StatementPattern::any()
        .with_subject(iri("alice"))
        .with_object(iri("carol"));
    assert_eq!(collect(&store, &pattern), vec![wanted]);
}

#[test]
fn test_literal_and_blank_node_terms_roundtrip() {
    let (_tmp, store) = create_temp_store();
    let stmt = Statement::new(
        Term::blank_node("b0"),
        iri("label"),
        Term::lang_literal("café", "fr"),
    );
    store.add_statements(vec![stmt.clone()]).expect("add failed");

    let by_object = collect(
        &store,
        &StatementPattern::any().with_object(Term::lang_literal("café", "fr")),
    );
    assert_eq!(by_object, vec![stmt.clone()]);

    // Same literal value with a different language tag is a different term.
    let other_lang = collect(
        &store,
        &StatementPattern::any().with_object(Term::lang_literal("café", "de")),
    );
    assert!(other_lang.is_empty());
}

#[test]
fn test_empty_add_is_a_noop() {
    let (_tmp, store) = create_temp_store();
    let added = store.add_statements(Vec::new()).expect("add failed");
    assert_eq!(added, 0);
    assert!(collect(&store, &StatementPattern::any()).is_empty());
}
