use fxhash::FxHashSet;
use std::cmp::max;

mod builder;
mod verify;

pub use verify::ValidationError;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Bag {
    pub id: usize,
    /// Opaque label, unique within one decomposition.
    pub name: String,
    pub vertex_set: FxHashSet<usize>,
    pub neighbors: FxHashSet<usize>,
}

impl Bag {
    pub fn contains_all<'a, I: IntoIterator<Item = &'a usize>>(&self, vertices: I) -> bool {
        vertices.into_iter().all(|v| self.vertex_set.contains(v))
    }

    /// Members in ascending order.
    pub fn sorted_vertices(&self) -> Vec<usize> {
        let mut vertices: Vec<usize> = self.vertex_set.iter().copied().collect();
        vertices.sort_unstable();
        vertices
    }
}

/// Graph of bags. Bags are addressed by their index in `bags`, which is also
/// their `id`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeDecomposition {
    pub bags: Vec<Bag>,
    pub root: Option<usize>,
    pub max_bag_size: usize,
}

impl TreeDecomposition {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bags: Vec::with_capacity(capacity),
            root: None,
            max_bag_size: 0,
        }
    }

    /// Adds a bag without any decomposition edge. The first bag added
    /// becomes the root.
    pub fn add_bag(&mut self, name: String, vertex_set: FxHashSet<usize>) -> usize {
        let id = self.bags.len();
        if id == 0 {
            self.root = Some(id);
        }
        self.max_bag_size = max(self.max_bag_size, vertex_set.len());
        self.bags.push(Bag {
            id,
            name,
            vertex_set,
            neighbors: FxHashSet::default(),
        });
        id
    }

    pub fn add_edge(&mut self, b1: usize, b2: usize) {
        assert!(b1 < self.bags.len());
        assert!(b2 < self.bags.len());
        assert_ne!(b1, b2);
        self.bags[b1].neighbors.insert(b2);
        self.bags[b2].neighbors.insert(b1);
    }

    pub fn bags(&self) -> &[Bag] {
        &self.bags
    }

    /// Every decomposition edge exactly once, as `(a, b)` with `a < b`.
    pub fn edges(&self) -> Vec<(usize, usize)> {
        let mut edges: Vec<(usize, usize)> = self
            .bags
            .iter()
            .flat_map(|b| {
                b.neighbors
                    .iter()
                    .copied()
                    .filter(move |n| b.id < *n)
                    .map(move |n| (b.id, n))
            })
            .collect();
        edges.sort_unstable();
        edges
    }

    /// Largest bag size minus one; zero for an empty decomposition.
    pub fn width(&self) -> usize {
        self.max_bag_size.saturating_sub(1)
    }
}
