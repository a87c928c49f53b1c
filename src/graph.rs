//! Rating dependency graph.
//!
//! Rating formulas may read other ratings (for example a custom
//! `block_value` built on `armor`). `FormulaGraph` orders them so every
//! rating is evaluated after the ratings it reads, and rejects cycles.

use crate::error::CombatError;
use crate::stat_id::StatId;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::{HashMap, HashSet};

/// A directed graph of rating dependencies.
///
/// An edge `b -> a` means rating `a` reads rating `b`, so `b` must be
/// evaluated first.
///
/// # Examples
///
/// ```rust
/// use skirmish::graph::FormulaGraph;
/// use skirmish::StatId;
///
/// let mut graph = FormulaGraph::new();
/// let armor = StatId::from_str("armor");
/// let block = StatId::from_str("block_value");
///
/// // block_value reads armor
/// graph.add_dependency(block.clone(), armor.clone());
///
/// let order = graph.evaluation_order().unwrap();
/// assert_eq!(order, vec![armor, block]);
/// ```
#[derive(Debug, Default)]
pub struct FormulaGraph {
    graph: DiGraph<StatId, ()>,
    node_map: HashMap<StatId, NodeIndex>,
}

impl FormulaGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rating if it isn't already present and return its index.
    pub fn add_node(&mut self, id: StatId) -> NodeIndex {
        if let Some(&idx) = self.node_map.get(&id) {
            return idx;
        }
        let idx = self.graph.add_node(id.clone());
        self.node_map.insert(id, idx);
        idx
    }

    /// Record that `dependent` reads `dependency`.
    pub fn add_dependency(&mut self, dependent: StatId, dependency: StatId) {
        let from = self.add_node(dependency);
        let to = self.add_node(dependent);
        self.graph.add_edge(from, to, ());
    }

    pub fn contains(&self, id: &StatId) -> bool {
        self.node_map.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Find a dependency cycle, reporting the full path.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use skirmish::graph::FormulaGraph;
    /// use skirmish::StatId;
    ///
    /// let mut graph = FormulaGraph::new();
    /// let a = StatId::from_str("a");
    /// let b = StatId::from_str("b");
    ///
    /// graph.add_dependency(a.clone(), b.clone());
    /// assert!(graph.detect_cycles().is_ok());
    ///
    /// graph.add_dependency(b.clone(), a.clone());
    /// assert!(graph.detect_cycles().is_err());
    /// ```
    pub fn detect_cycles(&self) -> Result<(), CombatError> {
        let mut visited = HashSet::new();
        let mut on_stack = HashSet::new();
        let mut path = Vec::new();

        for node in self.graph.node_indices() {
            if visited.contains(&node) {
                continue;
            }
            if let Some(cycle) = self.find_cycle(node, &mut visited, &mut on_stack, &mut path) {
                return Err(CombatError::Cycle { path: cycle });
            }
        }
        Ok(())
    }

    fn find_cycle(
        &self,
        node: NodeIndex,
        visited: &mut HashSet<NodeIndex>,
        on_stack: &mut HashSet<NodeIndex>,
        path: &mut Vec<StatId>,
    ) -> Option<Vec<StatId>> {
        visited.insert(node);
        on_stack.insert(node);
        path.push(self.graph[node].clone());

        for next in self.graph.neighbors_directed(node, Direction::Outgoing) {
            if !visited.contains(&next) {
                if let Some(cycle) = self.find_cycle(next, visited, on_stack, path) {
                    return Some(cycle);
                }
            } else if on_stack.contains(&next) {
                let closing = self.graph[next].clone();
                let start = path.iter().position(|id| id == &closing).unwrap_or(0);
                let mut cycle = path[start..].to_vec();
                cycle.push(closing);
                return Some(cycle);
            }
        }

        on_stack.remove(&node);
        path.pop();
        None
    }

    /// Ratings in evaluation order (dependencies first).
    pub fn evaluation_order(&self) -> Result<Vec<StatId>, CombatError> {
        self.detect_cycles()?;

        toposort(&self.graph, None)
            .map(|indices| {
                indices
                    .into_iter()
                    .map(|idx| self.graph[idx].clone())
                    .collect()
            })
            .map_err(|cycle| CombatError::Cycle {
                path: vec![self.graph[cycle.node_id()].clone()],
            })
    }
}
