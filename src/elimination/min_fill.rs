use crate::elimination::{EliminationHeuristic, EliminationResult};
use crate::graph::MutableGraph;
use fxhash::{FxHashMap, FxHashSet};

/// Repeatedly eliminates a vertex whose elimination adds the fewest edges.
///
/// Neighbor sets and fill-in counts are cached per vertex. A cached
/// neighbor set is patched when a neighbor is eliminated; a fill-in count is
/// dropped whenever the neighborhood it was computed from may have changed.
#[derive(Default)]
pub struct MinFill {
    neighbors: FxHashMap<usize, FxHashSet<usize>>,
    fill_in: FxHashMap<usize, usize>,
}

impl MinFill {
    fn neighbors<G: MutableGraph>(&mut self, graph: &G, v: usize) -> &FxHashSet<usize> {
        self.neighbors
            .entry(v)
            .or_insert_with(|| graph.neighborhood(v).collect())
    }

    fn fill_in_count<G: MutableGraph>(&mut self, graph: &G, v: usize) -> usize {
        if let Some(count) = self.fill_in.get(&v) {
            return *count;
        }
        let nb: Vec<usize> = self.neighbors(graph, v).iter().copied().collect();
        let mut count = 0;
        for (i, x) in nb.iter().enumerate() {
            for y in nb.iter().skip(i + 1) {
                if !self.neighbors(graph, *x).contains(y) {
                    count += 1;
                }
            }
        }
        self.fill_in.insert(v, count);
        count
    }
}

impl<G: MutableGraph> EliminationHeuristic<G> for MinFill {
    fn with_graph(_graph: &G) -> Self {
        Self::default()
    }

    fn next(&mut self, graph: &G) -> EliminationResult {
        let order = graph.order();
        let mut best: Option<(usize, usize, usize)> = None;
        let vertices: Vec<usize> = graph.vertices().collect();
        for v in vertices {
            let degree = self.neighbors(graph, v).len();
            let fill_in = self.fill_in_count(graph, v);
            // adjacent to everything and no fill-in: the remainder is complete
            if degree + 1 == order && fill_in == 0 {
                let mut vertices: Vec<usize> = graph.vertices().collect();
                vertices.sort_unstable();
                return EliminationResult::FinalAppend(vertices);
            }
            if best.map_or(true, |(_, _, min)| fill_in < min) {
                best = Some((v, degree, fill_in));
                if fill_in == 0 {
                    break;
                }
            }
        }
        match best {
            Some((vertex, degree, _)) => EliminationResult::VertexAppend { vertex, degree },
            None => EliminationResult::Empty,
        }
    }

    fn eliminate(&mut self, graph: &mut G, vertex: usize) {
        let former: Vec<usize> = self.neighbors(&*graph, vertex).iter().copied().collect();
        for u in former.iter().copied() {
            self.fill_in.remove(&u);
            self.neighbors(&*graph, u);
            let nb = self.neighbors.get_mut(&u).unwrap();
            nb.remove(&vertex);
            nb.extend(former.iter().copied().filter(|w| *w != u));
            for w in nb.iter() {
                self.fill_in.remove(w);
            }
        }
        self.neighbors.remove(&vertex);
        self.fill_in.remove(&vertex);
        graph.eliminate_vertex_with(vertex, &former);
    }
}
