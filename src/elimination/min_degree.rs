use crate::datastructures::BinaryQueue;
use crate::elimination::{EliminationHeuristic, EliminationResult};
use crate::graph::MutableGraph;

/// Repeatedly eliminates a vertex of minimum current degree.
///
/// Only the neighbors of an eliminated vertex change degree, so their keys
/// are refreshed in place after every step and every key in the queue is
/// always the current degree.
pub struct MinDegree {
    queue: BinaryQueue,
}

impl<G: MutableGraph> EliminationHeuristic<G> for MinDegree {
    fn with_graph(graph: &G) -> Self {
        let mut queue = BinaryQueue::with_capacity(graph.order());
        for v in graph.vertices() {
            queue.insert(v, graph.degree(v) as i64);
        }
        Self { queue }
    }

    fn next(&mut self, graph: &G) -> EliminationResult {
        if graph.order() == 0 {
            return EliminationResult::Empty;
        }
        match self.queue.pop_min() {
            Some((v, degree)) => {
                let degree = degree as usize;
                // the minimum degree is n - 1, so every vertex sees every other one
                if degree + 1 == graph.order() && !self.queue.is_empty() {
                    self.queue.clear();
                    let mut vertices: Vec<usize> = graph.vertices().collect();
                    vertices.sort_unstable();
                    EliminationResult::FinalAppend(vertices)
                } else {
                    EliminationResult::VertexAppend { vertex: v, degree }
                }
            }
            None => EliminationResult::Empty,
        }
    }

    fn eliminate(&mut self, graph: &mut G, vertex: usize) {
        let neighbors = graph.neighbors(vertex);
        graph.eliminate_vertex_with(vertex, &neighbors);
        for u in neighbors {
            if self.queue.contains(u) {
                self.queue.insert(u, graph.degree(u) as i64);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::elimination::{EliminationHeuristic, EliminationResult, MinDegree};
    use crate::graph::{BaseGraph, HashMapGraph, MutableGraph};

    fn star(leaves: usize) -> HashMapGraph {
        let mut graph = HashMapGraph::new();
        for i in 1..=leaves {
            graph.add_edge(0, i);
        }
        graph
    }

    #[test]
    fn picks_minimum_degree_first() {
        let mut graph = star(4);
        graph.add_edge(1, 2);
        let mut heuristic = MinDegree::with_graph(&graph);
        match heuristic.next(&graph) {
            EliminationResult::VertexAppend { vertex, degree } => {
                assert!(vertex == 3 || vertex == 4);
                assert_eq!(degree, 1);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn reported_degree_is_current() {
        let mut graph = star(4);
        let mut heuristic = MinDegree::with_graph(&graph);
        let mut eliminated = vec![];
        loop {
            match heuristic.next(&graph) {
                EliminationResult::VertexAppend { vertex, degree } => {
                    assert_eq!(degree, graph.degree(vertex));
                    eliminated.push(vertex);
                    heuristic.eliminate(&mut graph, vertex);
                }
                EliminationResult::FinalAppend(rest) => {
                    assert_eq!(rest.len(), 2);
                    assert!(rest.contains(&0));
                    break;
                }
                other => panic!("unexpected {:?}", other),
            }
        }
        assert_eq!(eliminated.len(), 3);
        assert!(!eliminated.contains(&0));
    }

    #[test]
    fn degree_drop_is_seen() {
        // eliminating 4 removes the only edge of 5 besides 3
        let mut graph = HashMapGraph::new();
        graph.make_clique(&[0, 1, 2, 3]);
        graph.add_edge(3, 4);
        graph.add_edge(4, 5);
        graph.add_edge(3, 5);
        let mut heuristic = MinDegree::with_graph(&graph);
        let first = match heuristic.next(&graph) {
            EliminationResult::VertexAppend { vertex, degree } => {
                assert_eq!(degree, 2);
                vertex
            }
            other => panic!("unexpected {:?}", other),
        };
        assert!(first == 4 || first == 5);
        heuristic.eliminate(&mut graph, first);
        assert_eq!(
            heuristic.next(&graph),
            EliminationResult::VertexAppend {
                vertex: 9 - first,
                degree: 1
            }
        );
    }

    #[test]
    fn clique_is_emitted_at_once() {
        let mut graph = HashMapGraph::new();
        graph.make_clique(&[3, 4, 5, 6]);
        let mut heuristic = MinDegree::with_graph(&graph);
        assert_eq!(
            heuristic.next(&graph),
            EliminationResult::FinalAppend(vec![3, 4, 5, 6])
        );
    }

    #[test]
    fn last_vertex_is_appended() {
        let mut graph = HashMapGraph::new();
        graph.add_vertex(7);
        let mut heuristic = MinDegree::with_graph(&graph);
        assert_eq!(
            heuristic.next(&graph),
            EliminationResult::VertexAppend {
                vertex: 7,
                degree: 0
            }
        );
        heuristic.eliminate(&mut graph, 7);
        assert_eq!(heuristic.next(&graph), EliminationResult::Empty);
    }
}
