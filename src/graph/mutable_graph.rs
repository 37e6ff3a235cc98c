use crate::graph::base_graph::BaseGraph;

pub trait MutableGraph: BaseGraph {
    fn add_vertex(&mut self, u: usize);
    fn remove_vertex(&mut self, u: usize);
    fn add_edge(&mut self, u: usize, v: usize);
    fn new() -> Self;
    fn with_capacity(capacity: usize) -> Self;

    /// Elimination-game step: removes `u` and turns its former neighborhood
    /// into a clique.
    fn eliminate_vertex(&mut self, u: usize) {
        let neighbors = self.neighbors(u);
        self.eliminate_vertex_with(u, &neighbors);
    }

    /// Same as [`MutableGraph::eliminate_vertex`] with the neighborhood of `u`
    /// already captured by the caller.
    fn eliminate_vertex_with(&mut self, u: usize, neighbors: &[usize]) {
        self.remove_vertex(u);
        self.make_clique(neighbors);
    }

    fn make_clique(&mut self, vertices: &[usize]) {
        for (i, v) in vertices.iter().enumerate() {
            for u in vertices.iter().skip(i + 1) {
                if !self.has_edge(*u, *v) {
                    self.add_edge(*u, *v);
                }
            }
        }
    }
}
