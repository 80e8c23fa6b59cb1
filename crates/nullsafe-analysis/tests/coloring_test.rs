//! Tests for conflict-graph grouping.

mod common;

use std::collections::BTreeSet;

use common::*;
use nullsafe_analysis::cache::ErrorStore;
use nullsafe_analysis::facts::{MethodRecord, MethodRegistry, ModuleInfo};
use nullsafe_analysis::graph::{ConflictGraph, Node};
use nullsafe_analysis::model::Region;
use proptest::prelude::*;

fn node_with_regions(i: usize, regions: &BTreeSet<usize>) -> Node {
    let mut node = Node::new(method_fix(&format!("C{i}"), "m()"));
    node.regions = regions
        .iter()
        .map(|r| Region::new("R", format!("r{r}()")))
        .collect();
    node
}

fn graph_of(region_sets: &[BTreeSet<usize>]) -> ConflictGraph {
    let mut graph = ConflictGraph::new();
    for (i, regions) in region_sets.iter().enumerate() {
        graph.insert(node_with_regions(i, regions));
    }
    graph
}

// ═══════════════════════════════════════════════════════════════════════════
// GROUPING
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn disjoint_nodes_form_one_group() {
    let sets = vec![BTreeSet::from([1]), BTreeSet::from([2]), BTreeSet::from([3])];
    assert_eq!(graph_of(&sets).find_groups(), vec![vec![0, 1, 2]]);
}

#[test]
fn shared_region_separates_nodes() {
    let sets = vec![BTreeSet::from([1, 2]), BTreeSet::from([2]), BTreeSet::from([3])];
    let groups = graph_of(&sets).find_groups();
    assert_eq!(groups, vec![vec![0, 2], vec![1]]);
}

#[test]
fn empty_graph_has_no_groups() {
    assert!(ConflictGraph::new().find_groups().is_empty());
}

#[test]
fn duplicate_roots_keep_the_first_node() {
    let mut graph = ConflictGraph::new();
    let first = graph.add_node(method_fix("A", "f()"));
    let second = graph.add_node(method_fix("A", "f()"));
    assert_eq!(first, second);
    assert_eq!(graph.len(), 1);
}

/// An overriding method and its super method must not share a build: the
/// overriding method's impacted regions include the super method's body.
#[test]
fn override_pair_is_never_batched() {
    let methods = MethodRegistry::from_records([
        MethodRecord::new(1, "Base", "get()"),
        MethodRecord::new(2, "Sub", "get()").with_parent(1),
    ]);
    let module = ModuleInfo::new("target", methods);
    let mut store = ErrorStore::new();
    store.set_baseline(Vec::new());

    let mut graph = ConflictGraph::new();
    graph.add_node(method_fix("Base", "get()"));
    graph.add_node(method_fix("Sub", "get()"));
    graph.refresh_regions(&store, &module).unwrap();

    assert_eq!(graph.find_groups().len(), 2);
}

#[test]
fn grouping_is_deterministic() {
    let sets: Vec<BTreeSet<usize>> = (0..20).map(|i| BTreeSet::from([i % 7, (i * 3) % 11])).collect();
    let graph = graph_of(&sets);
    assert_eq!(graph.find_groups(), graph.find_groups());
    assert_eq!(graph_of(&sets).find_groups(), graph.find_groups());
}

// ═══════════════════════════════════════════════════════════════════════════
// PROPERTIES
// ═══════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn groups_are_sound_and_cover_every_node(
        sets in prop::collection::vec(prop::collection::btree_set(0usize..12, 0..4), 0..16)
    ) {
        let graph = graph_of(&sets);
        let groups = graph.find_groups();

        let mut seen = BTreeSet::new();
        for group in &groups {
            for (k, &a) in group.iter().enumerate() {
                prop_assert!(seen.insert(a), "node {} scheduled twice", a);
                for &b in &group[k + 1..] {
                    prop_assert!(
                        sets[a].is_disjoint(&sets[b]),
                        "nodes {} and {} share a region but were batched", a, b
                    );
                }
            }
            prop_assert!(group.windows(2).all(|w| w[0] < w[1]));
        }
        prop_assert_eq!(seen.len(), sets.len());
    }
}
