//! Conflict graph over candidate trees and its coloring.

pub mod coloring;
pub mod conflict_graph;
pub mod node;

pub use conflict_graph::ConflictGraph;
pub use node::Node;
