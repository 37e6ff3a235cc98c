//! Greedy elimination heuristics.
//!
//! A heuristic only decides which vertex goes next ([`EliminationHeuristic::next`])
//! and keeps its bookkeeping in sync when that vertex is removed
//! ([`EliminationHeuristic::eliminate`]). Everything else, such as producing a
//! whole ordering or a width bound, is written once in the free functions of
//! this module and works for any heuristic.

use crate::graph::{BaseGraph, MutableGraph};
use crate::tree_decomposition::TreeDecomposition;
use fxhash::FxHashSet;
use log::{debug, trace};
use std::cmp::max;
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

mod max_cardinality;
mod min_degree;
mod min_fill;

pub use max_cardinality::MaxCardinality;
pub use min_degree::MinDegree;
pub use min_fill::MinFill;

/// Outcome of a single [`EliminationHeuristic::next`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EliminationResult {
    /// Eliminate `vertex` and append it to the tail of the ordering.
    VertexAppend { vertex: usize, degree: usize },
    /// Eliminate `vertex` and put it in front of everything chosen so far.
    VertexPrepend { vertex: usize, degree: usize },
    /// The remaining graph is complete; its vertices close the ordering.
    FinalAppend(Vec<usize>),
    /// Nothing is left to eliminate.
    Empty,
}

pub trait EliminationHeuristic<G: MutableGraph> {
    /// Builds the bookkeeping for exactly one run on `graph`.
    fn with_graph(graph: &G) -> Self
    where
        Self: Sized;

    /// Chooses the next step. Does not touch the graph.
    fn next(&mut self, graph: &G) -> EliminationResult;

    /// Removes `vertex` from `graph` and updates the heuristic's own state.
    fn eliminate(&mut self, graph: &mut G, vertex: usize);
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OrderingError {
    #[error("Unknown Vertex: {0}")]
    UnknownVertex(usize),
    #[error("Duplicate Vertex: {0}")]
    DuplicateVertex(usize),
    #[error("Missing Vertex: {0}")]
    MissingVertex(usize),
}

/// Checks that `order` is a permutation of the vertex set of `graph`.
pub fn check_ordering<G: BaseGraph>(graph: &G, order: &[usize]) -> Result<(), OrderingError> {
    let mut seen: FxHashSet<usize> =
        FxHashSet::with_capacity_and_hasher(order.len(), Default::default());
    for v in order.iter().copied() {
        if !graph.has_vertex(v) {
            return Err(OrderingError::UnknownVertex(v));
        }
        if !seen.insert(v) {
            return Err(OrderingError::DuplicateVertex(v));
        }
    }
    if seen.len() < graph.order() {
        let mut missing: Vec<usize> = graph.vertices().filter(|v| !seen.contains(v)).collect();
        missing.sort_unstable();
        return Err(OrderingError::MissingVertex(missing[0]));
    }
    Ok(())
}

/// Runs `heuristic` on a copy of `graph` and returns the full elimination
/// ordering, earliest-eliminated vertex first.
pub fn elimination_order<G, H>(mut heuristic: H, graph: &G) -> Vec<usize>
where
    G: MutableGraph,
    H: EliminationHeuristic<G>,
{
    let mut remaining = graph.clone();
    let mut order: VecDeque<usize> = VecDeque::with_capacity(graph.order());
    loop {
        match heuristic.next(&remaining) {
            EliminationResult::VertexAppend { vertex, degree } => {
                trace!("append {} (degree {})", vertex, degree);
                order.push_back(vertex);
                heuristic.eliminate(&mut remaining, vertex);
            }
            EliminationResult::VertexPrepend { vertex, degree } => {
                trace!("prepend {} (degree {})", vertex, degree);
                order.push_front(vertex);
                heuristic.eliminate(&mut remaining, vertex);
            }
            EliminationResult::FinalAppend(vertices) => {
                debug_assert!(remaining.is_clique(&vertices));
                debug_assert_eq!(vertices.len(), remaining.order());
                trace!("final clique of {} vertices", vertices.len());
                order.extend(vertices);
                break;
            }
            EliminationResult::Empty => break,
        }
    }
    debug!("computed elimination ordering of {} vertices", order.len());
    order.into_iter().collect()
}

/// Runs `heuristic` on a copy of `graph` and returns the width of the
/// ordering it produces, without materializing any bags.
pub fn treewidth<G, H>(mut heuristic: H, graph: &G) -> usize
where
    G: MutableGraph,
    H: EliminationHeuristic<G>,
{
    let mut remaining = graph.clone();
    let mut width = 0;
    loop {
        match heuristic.next(&remaining) {
            EliminationResult::VertexAppend { vertex, degree }
            | EliminationResult::VertexPrepend { vertex, degree } => {
                width = max(width, degree);
                heuristic.eliminate(&mut remaining, vertex);
            }
            EliminationResult::FinalAppend(vertices) => {
                debug_assert!(remaining.is_clique(&vertices));
                width = max(width, vertices.len().saturating_sub(1));
                break;
            }
            EliminationResult::Empty => break,
        }
    }
    debug!("heuristic width on {} vertices: {}", graph.order(), width);
    width
}

/// Replays `order` on a copy of `graph` and returns the largest degree seen
/// at elimination time.
pub fn treewidth_of_order<G: MutableGraph>(graph: &G, order: &[usize]) -> Result<usize, OrderingError> {
    check_ordering(graph, order)?;
    let mut remaining = graph.clone();
    let width = order
        .iter()
        .map(|v| {
            let neighbors = remaining.neighbors(*v);
            let degree = neighbors.len();
            remaining.eliminate_vertex_with(*v, &neighbors);
            degree
        })
        .max()
        .unwrap_or(0);
    Ok(width)
}

/// Selects one of the built-in heuristics by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeuristicType {
    MinFill,
    MinDegree,
    MaxCardinality,
}

impl HeuristicType {
    pub const ALL: [HeuristicType; 3] = [
        HeuristicType::MinDegree,
        HeuristicType::MinFill,
        HeuristicType::MaxCardinality,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            HeuristicType::MinFill => "minfill",
            HeuristicType::MinDegree => "mindeg",
            HeuristicType::MaxCardinality => "maxcard",
        }
    }

    pub fn elimination_order<G: MutableGraph>(&self, graph: &G) -> Vec<usize> {
        match self {
            HeuristicType::MinFill => elimination_order(MinFill::with_graph(graph), graph),
            HeuristicType::MinDegree => elimination_order(MinDegree::with_graph(graph), graph),
            HeuristicType::MaxCardinality => {
                elimination_order(MaxCardinality::with_graph(graph), graph)
            }
        }
    }

    pub fn treewidth<G: MutableGraph>(&self, graph: &G) -> usize {
        match self {
            HeuristicType::MinFill => treewidth(MinFill::with_graph(graph), graph),
            HeuristicType::MinDegree => treewidth(MinDegree::with_graph(graph), graph),
            HeuristicType::MaxCardinality => treewidth(MaxCardinality::with_graph(graph), graph),
        }
    }

    pub fn tree_decomposition<G: MutableGraph>(&self, graph: &G) -> TreeDecomposition {
        match self {
            HeuristicType::MinFill => {
                TreeDecomposition::from_heuristic(MinFill::with_graph(graph), graph)
            }
            HeuristicType::MinDegree => {
                TreeDecomposition::from_heuristic(MinDegree::with_graph(graph), graph)
            }
            HeuristicType::MaxCardinality => {
                TreeDecomposition::from_heuristic(MaxCardinality::with_graph(graph), graph)
            }
        }
    }
}

impl fmt::Display for HeuristicType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown Heuristic: {0} (expected one of minfill, mindeg, maxcard)")]
pub struct UnknownHeuristic(pub String);

impl FromStr for HeuristicType {
    type Err = UnknownHeuristic;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HeuristicType::ALL
            .iter()
            .copied()
            .find(|h| h.name() == s)
            .ok_or_else(|| UnknownHeuristic(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::HashMapGraph;

    fn graph_from(edges: &[(usize, usize)]) -> HashMapGraph {
        let mut graph = HashMapGraph::new();
        for (u, v) in edges {
            graph.add_edge(*u, *v);
        }
        graph
    }

    fn path() -> HashMapGraph {
        graph_from(&[(1, 2), (2, 3), (3, 4), (4, 5)])
    }

    fn sorted(mut order: Vec<usize>) -> Vec<usize> {
        order.sort_unstable();
        order
    }

    #[test]
    fn path_has_width_one() {
        let graph = path();
        for heuristic in HeuristicType::ALL.iter() {
            assert_eq!(heuristic.treewidth(&graph), 1, "{}", heuristic);
            let order = heuristic.elimination_order(&graph);
            assert_eq!(sorted(order.clone()), vec![1, 2, 3, 4, 5]);
            assert_eq!(treewidth_of_order(&graph, &order), Ok(1));
        }
    }

    #[test]
    fn triangle_has_width_two() {
        let graph = graph_from(&[(1, 2), (2, 3), (1, 3)]);
        for heuristic in HeuristicType::ALL.iter() {
            assert_eq!(heuristic.treewidth(&graph), 2, "{}", heuristic);
            assert_eq!(sorted(heuristic.elimination_order(&graph)), vec![1, 2, 3]);
        }
    }

    #[test]
    fn empty_graph() {
        let graph = HashMapGraph::new();
        for heuristic in HeuristicType::ALL.iter() {
            assert!(heuristic.elimination_order(&graph).is_empty());
            assert_eq!(heuristic.treewidth(&graph), 0);
        }
        assert_eq!(MinFill::with_graph(&graph).next(&graph), EliminationResult::Empty);
        assert_eq!(MinDegree::with_graph(&graph).next(&graph), EliminationResult::Empty);
        assert_eq!(
            MaxCardinality::with_graph(&graph).next(&graph),
            EliminationResult::Empty
        );
        assert_eq!(treewidth_of_order(&graph, &[]), Ok(0));
    }

    #[test]
    fn cycle_has_width_two() {
        let graph = graph_from(&[(1, 2), (2, 3), (3, 4), (4, 1)]);
        for heuristic in HeuristicType::ALL.iter() {
            assert_eq!(heuristic.treewidth(&graph), 2, "{}", heuristic);
        }
    }

    #[test]
    fn run_does_not_mutate_input() {
        let graph = graph_from(&[(0, 1), (1, 2), (2, 3), (3, 0), (0, 2), (4, 5)]);
        let before = graph.clone();
        for heuristic in HeuristicType::ALL.iter() {
            heuristic.elimination_order(&graph);
            heuristic.treewidth(&graph);
        }
        assert_eq!(graph, before);
    }

    #[test]
    fn replayed_width() {
        let graph = graph_from(&[(0, 1), (0, 2), (0, 3), (0, 4)]);
        assert_eq!(treewidth_of_order(&graph, &[1, 2, 3, 4, 0]), Ok(1));
        assert_eq!(treewidth_of_order(&graph, &[0, 1, 2, 3, 4]), Ok(4));
    }

    #[test]
    fn rejects_invalid_orderings() {
        let graph = path();
        assert_eq!(
            treewidth_of_order(&graph, &[1, 2, 3, 4, 9]),
            Err(OrderingError::UnknownVertex(9))
        );
        assert_eq!(
            treewidth_of_order(&graph, &[1, 2, 2, 4, 5]),
            Err(OrderingError::DuplicateVertex(2))
        );
        assert_eq!(
            treewidth_of_order(&graph, &[5, 1, 2]),
            Err(OrderingError::MissingVertex(3))
        );
    }

    #[test]
    fn dispatch_builds_decompositions() {
        let graph = graph_from(&[(0, 1), (1, 2), (2, 0), (2, 3)]);
        for heuristic in HeuristicType::ALL.iter() {
            let td = heuristic.tree_decomposition(&graph);
            assert_eq!(td.width(), heuristic.treewidth(&graph), "{}", heuristic);
            assert!(td.verify(&graph).is_ok());
        }
    }

    #[test]
    fn heuristic_names() {
        for heuristic in HeuristicType::ALL.iter() {
            assert_eq!(heuristic.name().parse::<HeuristicType>(), Ok(*heuristic));
        }
        assert!("minwidth".parse::<HeuristicType>().is_err());
    }
}
