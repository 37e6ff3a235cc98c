use crate::datastructures::BitSet;
use crate::graph::BaseGraph;
use crate::tree_decomposition::TreeDecomposition;
use log::debug;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Has Cycle: bag {0} can be reached twice")]
    HasCycle(String),
    #[error("Missing Vertex: {0} is not contained in any bag")]
    MissingVertex(usize),
    #[error("Missing Edge: {0:?} is not contained in any bag")]
    MissingEdge((usize, usize)),
    #[error("Not Inducing Subtree: bags containing {0} are not connected")]
    NotInducingSubtree(usize),
}

impl TreeDecomposition {
    /// Checks that this is a tree decomposition of `graph`.
    ///
    /// The checks run in a fixed order and the first violation is returned:
    /// acyclicity of every component, vertex coverage, edge coverage and
    /// finally the connected subtree property for every vertex. A forest is
    /// accepted as long as every vertex induces a connected subtree.
    pub fn verify<G: BaseGraph>(&self, graph: &G) -> Result<(), ValidationError> {
        if let Some(bag) = self.find_cycle() {
            return Err(ValidationError::HasCycle(self.bags[bag].name.clone()));
        }

        let mut vertices: Vec<usize> = graph.vertices().collect();
        vertices.sort_unstable();

        if let Some(v) = vertices
            .iter()
            .copied()
            .find(|v| !self.bags.iter().any(|b| b.vertex_set.contains(v)))
        {
            return Err(ValidationError::MissingVertex(v));
        }

        if let Some(edge) = self.get_missing_edge(graph) {
            return Err(ValidationError::MissingEdge(edge));
        }

        if let Some(v) = vertices
            .iter()
            .copied()
            .find(|v| !self.induces_subtree(*v))
        {
            return Err(ValidationError::NotInducingSubtree(v));
        }

        debug!(
            "verified decomposition with {} bags of width {}",
            self.bags.len(),
            self.width()
        );
        Ok(())
    }

    /// Returns a bag that is reached a second time by a traversal that never
    /// walks back over the edge it came from.
    fn find_cycle(&self) -> Option<usize> {
        let mut visited = BitSet::new(self.bags.len());
        for start in 0..self.bags.len() {
            if visited[start] {
                continue;
            }
            visited.set_bit(start);
            let mut stack: Vec<(usize, Option<usize>)> = vec![(start, None)];
            while let Some((current, parent)) = stack.pop() {
                for n in self.bags[current].neighbors.iter().copied() {
                    if Some(n) == parent {
                        continue;
                    }
                    if visited.set_bit(n) {
                        return Some(n);
                    }
                    stack.push((n, Some(current)));
                }
            }
        }
        None
    }

    fn get_missing_edge<G: BaseGraph>(&self, graph: &G) -> Option<(usize, usize)> {
        graph.edges().into_iter().find(|(u, v)| {
            !self
                .bags
                .iter()
                .any(|b| b.vertex_set.contains(u) && b.vertex_set.contains(v))
        })
    }

    fn induces_subtree(&self, v: usize) -> bool {
        let containing: Vec<usize> = self
            .bags
            .iter()
            .filter(|b| b.vertex_set.contains(&v))
            .map(|b| b.id)
            .collect();
        let first = match containing.first() {
            Some(first) => *first,
            None => return true,
        };

        let mut visited = BitSet::new(self.bags.len());
        visited.set_bit(first);
        let mut stack = vec![first];
        while let Some(current) = stack.pop() {
            for n in self.bags[current].neighbors.iter().copied() {
                if self.bags[n].vertex_set.contains(&v) && !visited.set_bit(n) {
                    stack.push(n);
                }
            }
        }
        visited.cardinality() == containing.len()
    }
}
