use crate::graph::base_graph::BaseGraph;
use crate::graph::mutable_graph::MutableGraph;
use fxhash::{FxHashMap, FxHashSet};

/// Adjacency-set graph. Cloning yields a fully independent copy, which is how
/// every destructive run keeps the caller's graph untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HashMapGraph {
    data: FxHashMap<usize, FxHashSet<usize>>,
}

impl HashMapGraph {
    pub fn neighborhood_set(&self, u: usize) -> &FxHashSet<usize> {
        self.data.get(&u).unwrap()
    }
}

impl MutableGraph for HashMapGraph {
    fn add_vertex(&mut self, u: usize) {
        self.data.entry(u).or_insert_with(FxHashSet::default);
    }

    fn remove_vertex(&mut self, u: usize) {
        if let Some(neighbors) = self.data.remove(&u) {
            for i in neighbors.iter() {
                self.data.get_mut(i).unwrap().remove(&u);
            }
        }
    }

    fn add_edge(&mut self, u: usize, v: usize) {
        assert_ne!(u, v);
        let first = self.data.entry(u).or_insert_with(FxHashSet::default);
        first.insert(v);
        let second = self.data.entry(v).or_insert_with(FxHashSet::default);
        second.insert(u);
    }

    fn new() -> Self {
        HashMapGraph {
            data: FxHashMap::default(),
        }
    }

    fn with_capacity(capacity: usize) -> Self {
        HashMapGraph {
            data: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }
}

impl BaseGraph for HashMapGraph {
    fn degree(&self, u: usize) -> usize {
        assert!(self.data.contains_key(&u));
        self.data[&u].len()
    }

    fn order(&self) -> usize {
        self.data.len()
    }

    fn edge_count(&self) -> usize {
        self.data.values().map(|nb| nb.len()).sum::<usize>() / 2
    }

    fn has_vertex(&self, u: usize) -> bool {
        self.data.contains_key(&u)
    }

    fn has_edge(&self, u: usize, v: usize) -> bool {
        self.data.get(&u).map_or(false, |nb| nb.contains(&v))
    }

    fn is_clique(&self, vertices: &[usize]) -> bool {
        for (i, v) in vertices.iter().enumerate() {
            for u in vertices.iter().skip(i + 1) {
                if !self.has_edge(*u, *v) {
                    return false;
                }
            }
        }
        true
    }

    fn vertices(&self) -> Box<dyn Iterator<Item = usize> + '_> {
        Box::new(self.data.keys().copied())
    }

    fn neighborhood(&self, u: usize) -> Box<dyn Iterator<Item = usize> + '_> {
        Box::new(self.data[&u].iter().copied())
    }

    fn fill_in_count(&self, u: usize) -> usize {
        let nb = self.neighborhood_set(u);
        let mut count = 0;
        for x in nb {
            for y in nb {
                if x < y && !self.has_edge(*x, *y) {
                    count += 1;
                }
            }
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::base_graph::BaseGraph;
    use crate::graph::hash_map_graph::HashMapGraph;
    use crate::graph::mutable_graph::MutableGraph;

    fn cycle(n: usize) -> HashMapGraph {
        let mut graph = HashMapGraph::new();
        for i in 0..n {
            graph.add_edge(i, (i + 1) % n);
        }
        graph
    }

    #[test]
    fn test_order() {
        let mut graph = HashMapGraph::new();
        assert_eq!(graph.order(), 0);

        graph.add_vertex(0);
        graph.add_vertex(0);
        assert_eq!(graph.order(), 1);
        graph.remove_vertex(0);
        assert_eq!(graph.order(), 0);
    }

    #[test]
    fn test_degree() {
        let mut graph = HashMapGraph::new();
        graph.add_edge(0, 1);

        assert_eq!(graph.degree(0), 1);
        assert_eq!(graph.degree(1), 1);
        assert_eq!(graph.order(), 2);

        graph.add_edge(0, 1);

        assert_eq!(graph.degree(0), 1);
        assert_eq!(graph.degree(1), 1);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn remove_vertex_drops_incident_edges() {
        let mut graph = cycle(4);
        graph.remove_vertex(0);
        assert_eq!(graph.order(), 3);
        assert_eq!(graph.edges(), vec![(1, 2), (2, 3)]);
        assert!(!graph.has_edge(1, 0));
        assert!(!graph.has_vertex(0));
    }

    #[test]
    fn eliminate_vertex_connects_neighbors() {
        let mut graph = cycle(4);
        graph.eliminate_vertex(0);
        assert_eq!(graph.order(), 3);
        assert!(graph.has_edge(1, 3));
        assert!(graph.is_clique(&[1, 2, 3]));
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn eliminate_vertex_keeps_existing_edges() {
        let mut graph = HashMapGraph::new();
        graph.add_edge(0, 1);
        graph.add_edge(0, 2);
        graph.add_edge(1, 2);
        graph.add_edge(2, 3);
        let neighbors = graph.neighbors(0);
        assert_eq!(neighbors, vec![1, 2]);
        graph.eliminate_vertex_with(0, &neighbors);
        assert_eq!(graph.edges(), vec![(1, 2), (2, 3)]);
    }

    #[test]
    fn fill_in_count() {
        let graph = cycle(4);
        for v in 0..4 {
            assert_eq!(graph.fill_in_count(v), 1);
        }
        let mut star = HashMapGraph::new();
        for i in 1..5 {
            star.add_edge(0, i);
        }
        assert_eq!(star.fill_in_count(0), 6);
        assert_eq!(star.fill_in_count(1), 0);
    }

    #[test]
    fn clone_is_independent() {
        let graph = cycle(5);
        let mut copy = graph.clone();
        copy.eliminate_vertex(2);
        assert_eq!(graph.order(), 5);
        assert_eq!(graph.edge_count(), 5);
        assert_ne!(graph, copy);
    }
}
