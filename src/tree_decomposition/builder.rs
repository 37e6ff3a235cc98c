use crate::elimination::{check_ordering, EliminationHeuristic, EliminationResult, OrderingError};
use crate::graph::MutableGraph;
use crate::tree_decomposition::TreeDecomposition;
use fxhash::FxHashSet;
use log::{debug, info};
use std::collections::VecDeque;

/// A vertex together with the neighbors it had right before it was
/// eliminated, i.e. its neighbors that come later in the ordering.
type Eliminated = (usize, Vec<usize>);

impl TreeDecomposition {
    /// Drives `heuristic` on a copy of `graph` and builds a decomposition
    /// from the ordering it produces.
    pub fn from_heuristic<G, H>(mut heuristic: H, graph: &G) -> Self
    where
        G: MutableGraph,
        H: EliminationHeuristic<G>,
    {
        info!("building tree decomposition from heuristic on {} vertices", graph.order());
        let mut remaining = graph.clone();
        let mut stack: VecDeque<Eliminated> = VecDeque::with_capacity(graph.order());
        loop {
            match heuristic.next(&remaining) {
                EliminationResult::VertexAppend { vertex, .. } => {
                    stack.push_back((vertex, remaining.neighbors(vertex)));
                    heuristic.eliminate(&mut remaining, vertex);
                }
                EliminationResult::VertexPrepend { vertex, .. } => {
                    // everything removed so far ends up behind `vertex`
                    let later: Vec<usize> = graph
                        .neighbors(vertex)
                        .into_iter()
                        .filter(|u| !remaining.has_vertex(*u))
                        .collect();
                    stack.push_front((vertex, later));
                    heuristic.eliminate(&mut remaining, vertex);
                }
                EliminationResult::FinalAppend(vertices) => {
                    debug_assert!(remaining.is_clique(&vertices));
                    for vertex in vertices {
                        stack.push_back((vertex, remaining.neighbors(vertex)));
                        heuristic.eliminate(&mut remaining, vertex);
                    }
                    break;
                }
                EliminationResult::Empty => break,
            }
        }
        Self::assemble(stack)
    }

    /// Builds a decomposition by eliminating the vertices of `graph` in the
    /// given order. `order` has to be a permutation of the vertex set.
    pub fn from_ordering<G: MutableGraph>(graph: &G, order: &[usize]) -> Result<Self, OrderingError> {
        check_ordering(graph, order)?;
        info!("building tree decomposition from ordering of {} vertices", order.len());
        let mut remaining = graph.clone();
        let mut stack: VecDeque<Eliminated> = VecDeque::with_capacity(order.len());
        for vertex in order.iter().copied() {
            let neighbors = remaining.neighbors(vertex);
            remaining.eliminate_vertex_with(vertex, &neighbors);
            stack.push_back((vertex, neighbors));
        }
        Ok(Self::assemble(stack))
    }

    /// Creates one bag per eliminated vertex, last eliminated first. Each new
    /// bag hangs below some earlier bag containing all of its later neighbors,
    /// or below the root if there is none.
    fn assemble(mut stack: VecDeque<Eliminated>) -> Self {
        let mut td = TreeDecomposition::with_capacity(stack.len());
        let mut next_name = 0usize;
        while let Some((vertex, neighbors)) = stack.pop_back() {
            let parent = td
                .bags
                .iter()
                .find(|bag| bag.contains_all(&neighbors))
                .map(|bag| bag.id)
                .or(td.root);

            let mut vertex_set: FxHashSet<usize> = neighbors.into_iter().collect();
            vertex_set.insert(vertex);
            let id = td.add_bag(format!("N{}", next_name), vertex_set);
            next_name += 1;
            if let Some(parent) = parent {
                td.add_edge(parent, id);
            }
        }
        debug!(
            "assembled {} bags, width {}",
            td.bags.len(),
            td.width()
        );
        td
    }
}
