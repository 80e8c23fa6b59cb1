//! Conflict graph benchmarks: region refresh plus grouping.
//!
//! Run with: cargo bench -p nullsafe-analysis --bench conflict_graph_bench

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use nullsafe_analysis::cache::ErrorStore;
use nullsafe_analysis::facts::{MethodRecord, MethodRegistry, ModuleInfo, UsageRecord};
use nullsafe_analysis::graph::ConflictGraph;
use nullsafe_analysis::model::{Fix, Location, Region};

/// `count` methods spread over classes of ten, each called from two of
/// `count / 4` caller regions.
fn synthetic_module(count: usize) -> ModuleInfo {
    let records = (0..count).map(|i| MethodRecord::new(i as u32 + 1, format!("C{}", i / 10), format!("m{i}()")));
    let mut module = ModuleInfo::new("bench", MethodRegistry::from_records(records));
    let callers = (count / 4).max(1);
    for i in 0..count {
        for caller in [i % callers, (i * 7 + 3) % callers] {
            module.method_usages.push(UsageRecord {
                region: Region::new("Client", format!("call{caller}()")),
                used_member: format!("m{i}()"),
                used_class: format!("C{}", i / 10),
                source_type: "SOURCE".to_string(),
            });
        }
    }
    module
}

fn group_nodes(c: &mut Criterion) {
    let mut group = c.benchmark_group("conflict_graph");
    group.sample_size(20);

    for size in [100, 500, 2000] {
        let module = synthetic_module(size);
        let mut store = ErrorStore::new();
        store.set_baseline(Vec::new());
        let roots: Vec<Fix> = (0..size)
            .map(|i| Fix::new(Location::method(format!("C{}", i / 10), format!("m{i}()")), "Nullable"))
            .collect();

        group.bench_with_input(BenchmarkId::new("find_groups", size), &size, |b, _| {
            b.iter(|| {
                let mut graph = ConflictGraph::new();
                for root in &roots {
                    graph.add_node(root.clone());
                }
                graph.refresh_regions(&store, &module).unwrap();
                graph.find_groups()
            });
        });
    }
    group.finish();
}

criterion_group!(benches, group_nodes);
criterion_main!(benches);
