//! Greedy sequential graph coloring.

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

/// Colors vertices in index order, giving each the lowest color unused by
/// its already-colored neighbors. Returns one color per vertex.
///
/// Not minimal; the order is fixed so results are reproducible.
pub fn greedy_coloring<N, E>(graph: &UnGraph<N, E>) -> Vec<usize> {
    let mut colors: Vec<Option<usize>> = vec![None; graph.node_count()];
    for vertex in graph.node_indices() {
        let mut taken: Vec<usize> = graph
            .edges(vertex)
            .map(|edge| other_end(edge.source(), edge.target(), vertex))
            .filter_map(|neighbor| colors[neighbor.index()])
            .collect();
        taken.sort_unstable();
        taken.dedup();
        let mut color = 0;
        for used in taken {
            if used == color {
                color += 1;
            } else if used > color {
                break;
            }
        }
        colors[vertex.index()] = Some(color);
    }
    colors.into_iter().map(|c| c.unwrap_or(0)).collect()
}

fn other_end(source: NodeIndex, target: NodeIndex, vertex: NodeIndex) -> NodeIndex {
    if source == vertex {
        target
    } else {
        source
    }
}

/// Buckets vertex indices by color, in color order; vertices keep index
/// order within a bucket.
pub fn color_classes(colors: &[usize]) -> Vec<Vec<usize>> {
    let count = colors.iter().copied().max().map_or(0, |max| max + 1);
    let mut classes = vec![Vec::new(); count];
    for (vertex, &color) in colors.iter().enumerate() {
        classes[color].push(vertex);
    }
    classes
}
