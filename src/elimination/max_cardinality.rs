use crate::datastructures::BinaryQueue;
use crate::elimination::{EliminationHeuristic, EliminationResult};
use crate::graph::MutableGraph;
use fxhash::FxHashMap;

/// Maximum cardinality search.
///
/// Builds the ordering back to front: the vertex with the most already
/// removed neighbors is put in front of everything chosen so far. The key of
/// a vertex is `current degree - original degree`, i.e. minus the number of
/// removed neighbors, so the minimum of the queue is the vertex we want.
///
/// Vertices are removed without filling in their neighborhoods. On a chordal
/// graph the result is a perfect elimination ordering. The degree reported
/// for a step is the number of removed neighbors, which are exactly the
/// neighbors that follow the vertex in the final ordering.
pub struct MaxCardinality {
    queue: BinaryQueue,
    original_degrees: FxHashMap<usize, usize>,
}

impl MaxCardinality {
    fn key<G: MutableGraph>(&self, graph: &G, v: usize) -> i64 {
        graph.degree(v) as i64 - self.original_degrees[&v] as i64
    }
}

impl<G: MutableGraph> EliminationHeuristic<G> for MaxCardinality {
    fn with_graph(graph: &G) -> Self {
        let original_degrees: FxHashMap<usize, usize> =
            graph.vertices().map(|v| (v, graph.degree(v))).collect();
        let mut queue = BinaryQueue::with_capacity(graph.order());
        for v in graph.vertices() {
            queue.insert(v, 0);
        }
        Self {
            queue,
            original_degrees,
        }
    }

    fn next(&mut self, graph: &G) -> EliminationResult {
        if graph.order() == 0 {
            return EliminationResult::Empty;
        }
        match self.queue.pop_min() {
            Some((v, key)) => EliminationResult::VertexPrepend {
                vertex: v,
                degree: (-key) as usize,
            },
            None => EliminationResult::Empty,
        }
    }

    fn eliminate(&mut self, graph: &mut G, vertex: usize) {
        let neighbors = graph.neighbors(vertex);
        self.original_degrees.remove(&vertex);
        graph.remove_vertex(vertex);
        for u in neighbors {
            if self.queue.contains(u) {
                let key = self.key(graph, u);
                self.queue.insert(u, key);
            }
        }
    }
}
