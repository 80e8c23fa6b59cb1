//! Tests for node status updates and tree growth.

mod common;

use std::collections::BTreeSet;

use common::*;
use nullsafe_analysis::facts::{MethodRecord, MethodRegistry};
use nullsafe_analysis::graph::Node;

fn hierarchy(base_nullable: bool) -> MethodRegistry {
    let mut base = MethodRecord::new(1, "Base", "get()");
    base.has_nullable_return = base_nullable;
    MethodRegistry::from_records([base, MethodRecord::new(2, "Sub", "get()").with_parent(1)])
}

// ═══════════════════════════════════════════════════════════════════════════
// INHERITANCE CORRECTION
// ═══════════════════════════════════════════════════════════════════════════

/// When the super method is annotated by another tree in the same build,
/// the override error this node would cause is hidden and must be added back.
#[test]
fn super_method_annotated_by_batch_adds_one() {
    let sub = method_fix("Sub", "get()");
    let base = method_fix("Base", "get()");
    let mut node = Node::new(sub.clone());
    let batch = BTreeSet::from([sub, base]);

    node.update_status(-1, &batch, Vec::new(), BTreeSet::new(), &hierarchy(false));
    assert_eq!(node.effect, 0);
}

#[test]
fn super_method_in_own_tree_needs_no_correction() {
    let sub = method_fix("Sub", "get()");
    let base = method_fix("Base", "get()");
    let mut node = Node::with_tree(sub.clone(), BTreeSet::from([base.clone()]));
    let batch = BTreeSet::from([sub, base]);

    node.update_status(-1, &batch, Vec::new(), BTreeSet::new(), &hierarchy(false));
    assert_eq!(node.effect, -1);
}

#[test]
fn already_nullable_super_needs_no_correction() {
    let sub = method_fix("Sub", "get()");
    let base = method_fix("Base", "get()");
    let mut node = Node::new(sub.clone());
    let batch = BTreeSet::from([sub, base]);

    node.update_status(-1, &batch, Vec::new(), BTreeSet::new(), &hierarchy(true));
    assert_eq!(node.effect, -1);
}

#[test]
fn super_method_outside_batch_needs_no_correction() {
    let sub = method_fix("Sub", "get()");
    let mut node = Node::new(sub.clone());
    let batch = BTreeSet::from([sub]);

    node.update_status(2, &batch, Vec::new(), BTreeSet::new(), &hierarchy(false));
    assert_eq!(node.effect, 2);
}

// ═══════════════════════════════════════════════════════════════════════════
// TREE GROWTH
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn merge_adds_resolving_candidates_once() {
    let root = method_fix("A", "f()");
    let param = param_fix("B", "take(Object)", 0);
    let downstream_driven = method_fix("A", "g()").with_source_in_target(false);
    let mut node = Node::new(root.clone());
    node.triggered_errors = vec![error("B", "take(Object)", "null passed", &[param.clone()])];
    node.triggered_fixes_from_downstream = BTreeSet::from([downstream_driven.clone()]);

    assert!(node.merge_triggered());
    assert_eq!(node.tree, BTreeSet::from([root, param, downstream_driven.clone()]));
    assert!(node.tree.iter().all(|f| f.source_in_target));

    assert!(!node.merge_triggered());
    assert!(!node.changed);
}

#[test]
fn unresolvable_triggered_errors_do_not_grow_the_tree() {
    let root = method_fix("A", "f()");
    let mut node = Node::new(root.clone());
    node.triggered_errors = vec![error("B", "use()", "dereference", &[])];

    assert!(!node.merge_triggered());
    assert_eq!(node.tree, BTreeSet::from([root]));
}
