//! Evolution DAG validation.
//!
//! Provides the `EvolutionDag` type, a directed graph of species where an
//! edge runs from a species to each of its evolutions. It is used while
//! building a [`SpeciesGraph`](crate::SpeciesGraph) to reject data whose
//! devolution links loop back on themselves, and to count evolution trees.

use crate::error::GraphError;
use crate::ids::SpeciesId;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::{HashMap, HashSet};

/// Directed graph of species, edges pointing from devolution to evolution.
///
/// # Examples
///
/// ```rust
/// use ivdex::graph::EvolutionDag;
/// use ivdex::SpeciesId;
///
/// let mut dag = EvolutionDag::new();
/// dag.add_edge(SpeciesId(10), SpeciesId(11));
/// dag.add_edge(SpeciesId(11), SpeciesId(12));
///
/// assert!(dag.detect_cycles().is_ok());
/// assert_eq!(dag.roots(), vec![SpeciesId(10)]);
/// ```
pub struct EvolutionDag {
    graph: DiGraph<SpeciesId, ()>,
    node_map: HashMap<SpeciesId, NodeIndex>,
}

impl EvolutionDag {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            node_map: HashMap::new(),
        }
    }

    /// Add a species if it isn't present yet and return its node index.
    pub fn add_node(&mut self, species: SpeciesId) -> NodeIndex {
        if let Some(&idx) = self.node_map.get(&species) {
            idx
        } else {
            let idx = self.graph.add_node(species);
            self.node_map.insert(species, idx);
            idx
        }
    }

    /// Record that `evolution` evolves from `devolution`.
    ///
    /// Both species are added if they don't exist.
    pub fn add_edge(&mut self, devolution: SpeciesId, evolution: SpeciesId) {
        let from = self.add_node(devolution);
        let to = self.add_node(evolution);
        self.graph.add_edge(from, to, ());
    }

    /// Detect evolution cycles.
    ///
    /// # Returns
    ///
    /// * `Ok(())` if the graph is acyclic
    /// * `Err(GraphError::Cycle)` with a closed path if it isn't
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ivdex::graph::EvolutionDag;
    /// use ivdex::{GraphError, SpeciesId};
    ///
    /// let mut dag = EvolutionDag::new();
    /// dag.add_edge(SpeciesId(1), SpeciesId(2));
    /// dag.add_edge(SpeciesId(2), SpeciesId(1));
    ///
    /// assert!(matches!(dag.detect_cycles(), Err(GraphError::Cycle { .. })));
    /// ```
    pub fn detect_cycles(&self) -> Result<(), GraphError> {
        let mut visited = HashSet::new();
        let mut rec_stack = HashSet::new();

        for node_idx in self.graph.node_indices() {
            if !visited.contains(&node_idx) {
                let mut path = Vec::new();
                if let Some(cycle) =
                    self.dfs_cycle_detect(node_idx, &mut visited, &mut rec_stack, &mut path)
                {
                    return Err(cycle);
                }
            }
        }

        Ok(())
    }

    fn dfs_cycle_detect(
        &self,
        node: NodeIndex,
        visited: &mut HashSet<NodeIndex>,
        rec_stack: &mut HashSet<NodeIndex>,
        path: &mut Vec<SpeciesId>,
    ) -> Option<GraphError> {
        visited.insert(node);
        rec_stack.insert(node);
        path.push(self.graph[node]);

        for neighbor in self.graph.neighbors_directed(node, Direction::Outgoing) {
            if !visited.contains(&neighbor) {
                if let Some(cycle) = self.dfs_cycle_detect(neighbor, visited, rec_stack, path) {
                    return Some(cycle);
                }
            } else if rec_stack.contains(&neighbor) {
                let neighbor_species = self.graph[neighbor];
                // Keep only the looping part of the path and close it.
                let start = path
                    .iter()
                    .position(|&species| species == neighbor_species)
                    .unwrap_or(0);
                let mut cycle = path[start..].to_vec();
                cycle.push(neighbor_species);
                return Some(GraphError::Cycle { path: cycle });
            }
        }

        rec_stack.remove(&node);
        path.pop();
        None
    }

    /// Species with no devolution, in insertion order.
    pub fn roots(&self) -> Vec<SpeciesId> {
        self.graph
            .node_indices()
            .filter(|&idx| {
                self.graph
                    .neighbors_directed(idx, Direction::Incoming)
                    .next()
                    .is_none()
            })
            .map(|idx| self.graph[idx])
            .collect()
    }

    /// Number of evolution edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

impl Default for EvolutionDag {
    fn default() -> Self {
        Self::new()
    }
}
