use crate::graph::{HashMapGraph, MutableGraph};
use crate::io::LabeledGraph;
use log::info;
use rand::prelude::StdRng;
use rand::{Rng, SeedableRng};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("{0} is not a directory")]
    NotADirectory(PathBuf),
    #[error("{0} is not empty")]
    NotEmpty(PathBuf),
    #[error("Invalid Probability: {0}")]
    InvalidProbability(f64),
}

/// G(n, p): each of the `n * (n - 1) / 2` possible edges over the vertices
/// `0..n` is present independently with probability `p`.
pub fn gnp<R: Rng>(n: usize, p: f64, rng: &mut R) -> HashMapGraph {
    let mut graph = HashMapGraph::with_capacity(n);
    for u in 0..n {
        graph.add_vertex(u);
    }
    for u in 0..n {
        for v in (u + 1)..n {
            if rng.gen_bool(p) {
                graph.add_edge(u, v);
            }
        }
    }
    graph
}

/// Batch of random graphs: `count` instances for every combination of
/// vertex count and edge probability, numbered from `start`.
#[derive(Debug, Clone)]
pub struct GeneratorSettings {
    pub vertex_counts: Vec<usize>,
    pub probabilities: Vec<f64>,
    pub count: usize,
    pub start: usize,
    pub seed: Option<u64>,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            vertex_counts: vec![],
            probabilities: vec![],
            count: 1,
            start: 1,
            seed: None,
        }
    }
}

impl GeneratorSettings {
    pub fn new() -> Self {
        Self::default()
    }

    impl_setter!(self, vertex_counts, Vec<usize>);
    impl_setter!(self, probabilities, Vec<f64>);
    impl_setter!(self, count, usize);
    impl_setter!(self, start, usize);
    impl_setter!(self, seed, Option<u64>);

    /// `graph_n{n}_p{ppp}_{i}.csv`, with `n` and `i` zero padded so that the
    /// names of one batch sort the same way as their numbers.
    pub fn file_name(&self, n: usize, p: f64, i: usize) -> String {
        let width_n = self
            .vertex_counts
            .iter()
            .map(|n| n.to_string().len())
            .max()
            .unwrap_or(1);
        let last = (self.start + self.count).saturating_sub(1);
        let width_i = last.to_string().len();
        format!(
            "graph_n{:0wn$}_p{:03}_{:0wi$}.csv",
            n,
            (p * 1000.0).round() as u64,
            i,
            wn = width_n,
            wi = width_i
        )
    }

    /// Every `(n, p, i)` combination in generation order.
    pub fn instances(&self) -> Vec<(usize, f64, usize)> {
        let mut instances =
            Vec::with_capacity(self.vertex_counts.len() * self.probabilities.len() * self.count);
        for n in self.vertex_counts.iter().copied() {
            for p in self.probabilities.iter().copied() {
                for i in self.start..self.start + self.count {
                    instances.push((n, p, i));
                }
            }
        }
        instances
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => SeedableRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Generates the whole batch in memory, paired with the file names.
    pub fn generate(&self) -> Result<Vec<(String, HashMapGraph)>, GeneratorError> {
        if let Some(p) = self
            .probabilities
            .iter()
            .copied()
            .find(|p| !(0.0..=1.0).contains(p))
        {
            return Err(GeneratorError::InvalidProbability(p));
        }
        let mut rng = self.rng();
        Ok(self
            .instances()
            .into_iter()
            .map(|(n, p, i)| (self.file_name(n, p, i), gnp(n, p, &mut rng)))
            .collect())
    }

    /// Writes the batch into `dir`, which must be empty or not exist yet.
    /// Returns the paths of the written files.
    pub fn write_to(&self, dir: &Path) -> Result<Vec<PathBuf>, GeneratorError> {
        if dir.exists() {
            if !dir.is_dir() {
                return Err(GeneratorError::NotADirectory(dir.to_path_buf()));
            }
            if fs::read_dir(dir)?.next().is_some() {
                return Err(GeneratorError::NotEmpty(dir.to_path_buf()));
            }
        } else {
            fs::create_dir_all(dir)?;
        }
        let mut written = vec![];
        for (name, graph) in self.generate()? {
            let path = dir.join(name);
            fs::write(&path, LabeledGraph::from(graph).encode())?;
            info!("created {}", path.display());
            written.push(path);
        }
        Ok(written)
    }
}
