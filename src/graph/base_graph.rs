use std::fmt::Debug;

/// Read-only view of a simple undirected graph over `usize` vertex ids.
pub trait BaseGraph: Clone + Debug {
    fn degree(&self, u: usize) -> usize;
    fn order(&self) -> usize;
    fn edge_count(&self) -> usize;
    fn has_vertex(&self, u: usize) -> bool;
    fn has_edge(&self, u: usize, v: usize) -> bool;
    fn is_clique(&self, vertices: &[usize]) -> bool;
    fn vertices(&self) -> Box<dyn Iterator<Item = usize> + '_>;
    fn neighborhood(&self, u: usize) -> Box<dyn Iterator<Item = usize> + '_>;
    fn fill_in_count(&self, u: usize) -> usize;

    /// Snapshot of the neighbors of `u` in ascending order.
    fn neighbors(&self, u: usize) -> Vec<usize> {
        let mut neighbors: Vec<usize> = self.neighborhood(u).collect();
        neighbors.sort_unstable();
        neighbors
    }

    /// Every edge exactly once as `(u, v)` with `u < v`, in ascending order.
    fn edges(&self) -> Vec<(usize, usize)> {
        let mut edges: Vec<(usize, usize)> = self
            .vertices()
            .flat_map(|u| self.neighborhood(u).filter(move |v| u < *v).map(move |v| (u, v)))
            .collect();
        edges.sort_unstable();
        edges
    }
}
