use crate::elimination::{treewidth_of_order, HeuristicType};
use crate::graph::{BaseGraph, MutableGraph};
use crate::io::{read_graph, InputError, LabeledGraph};
use crate::tree_decomposition::TreeDecomposition;
use log::{debug, info, warn};
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EvaluationError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("{0} is not a directory")]
    NotADirectory(PathBuf),
    #[error("{0} is empty")]
    EmptyDirectory(PathBuf),
}

pub fn mean(values: &[usize]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<usize>() as f64 / values.len() as f64)
}

pub fn median(values: &[usize]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let half = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[half - 1] + sorted[half]) as f64 / 2.0)
    } else {
        Some(sorted[half] as f64)
    }
}

/// Finds the first `<sep><key><digits>` in `name`, where `<sep>` is any
/// character that is not alphanumeric.
fn number_after(name: &str, key: char) -> Option<u64> {
    let chars: Vec<char> = name.chars().collect();
    for i in 1..chars.len() {
        if chars[i] != key || chars[i - 1].is_alphanumeric() {
            continue;
        }
        let digits: String = chars[i + 1..]
            .iter()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        if let Ok(value) = digits.parse() {
            return Some(value);
        }
    }
    None
}

/// Vertex count encoded in a generated file name, e.g. `graph_n010_p250_1.csv`.
pub fn parse_vertex_count(name: &str) -> Option<u64> {
    number_after(name, 'n')
}

/// Edge probability encoded in a generated file name, in thousandths.
pub fn parse_probability(name: &str) -> Option<f64> {
    number_after(name, 'p').map(|p| p as f64 / 1000.0)
}

/// One output line: instance metadata followed by one value per heuristic.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub n: Option<u64>,
    pub p: Option<f64>,
    pub edges: usize,
    pub instance: String,
    pub values: Vec<usize>,
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.n {
            Some(n) => write!(f, "{},", n)?,
            None => write!(f, "-1,")?,
        }
        write!(f, "{:.3},{},{}", self.p.unwrap_or(-1.0), self.edges, self.instance)?;
        for value in &self.values {
            write!(f, ",{}", value)?;
        }
        Ok(())
    }
}

/// A heuristic passes when the decomposition built from its ordering
/// verifies and has exactly the width of the replayed ordering.
pub fn validate_heuristic<G: MutableGraph>(heuristic: HeuristicType, graph: &G) -> bool {
    let order = heuristic.elimination_order(graph);
    let width = match treewidth_of_order(graph, &order) {
        Ok(width) => width,
        Err(e) => {
            warn!("{} produced an invalid ordering: {}", heuristic, e);
            return false;
        }
    };
    let td = match TreeDecomposition::from_ordering(graph, &order) {
        Ok(td) => td,
        Err(e) => {
            warn!("{} produced an invalid ordering: {}", heuristic, e);
            return false;
        }
    };
    match td.verify(graph) {
        Ok(()) => td.width() == width,
        Err(e) => {
            warn!("{}: {}", heuristic, e);
            false
        }
    }
}

fn write_summary<W: Write>(
    out: &mut W,
    label: &str,
    columns: &[Vec<usize>],
    stat: fn(&[usize]) -> Option<f64>,
) -> std::io::Result<()> {
    write!(out, "-1,-1,-1,{}", label)?;
    for column in columns {
        write!(out, ",{:.3}", stat(column).unwrap_or(-1.0))?;
    }
    writeln!(out)
}

#[derive(Debug, Clone)]
pub struct EvaluationSettings {
    pub heuristics: Vec<HeuristicType>,
    pub prefix: String,
}

impl Default for EvaluationSettings {
    fn default() -> Self {
        Self {
            heuristics: HeuristicType::ALL.to_vec(),
            prefix: String::new(),
        }
    }
}

impl EvaluationSettings {
    pub fn new() -> Self {
        Self::default()
    }

    impl_setter!(self, heuristics, Vec<HeuristicType>);
    impl_setter!(self, prefix, String);

    pub fn header(&self) -> String {
        let mut header = String::from("n,p,e,i");
        for heuristic in &self.heuristics {
            header.push(',');
            header.push_str(heuristic.name());
        }
        header
    }

    /// `.csv` files in `dir` whose name starts with the prefix, sorted by name.
    pub fn instance_files(&self, dir: &Path) -> Result<Vec<PathBuf>, EvaluationError> {
        if !dir.is_dir() {
            return Err(EvaluationError::NotADirectory(dir.to_path_buf()));
        }
        let mut names = vec![];
        for entry in fs::read_dir(dir)? {
            names.push(entry?.file_name().to_string_lossy().into_owned());
        }
        if names.is_empty() {
            return Err(EvaluationError::EmptyDirectory(dir.to_path_buf()));
        }
        names.retain(|name| name.starts_with(&self.prefix) && name.ends_with(".csv"));
        names.sort();
        if names.is_empty() {
            warn!("{} contains no graphs matching \"{}\"", dir.display(), self.prefix);
        }
        Ok(names.into_iter().map(|name| dir.join(name)).collect())
    }

    fn row(&self, file_name: &str, graph: &LabeledGraph, values: Vec<usize>) -> Row {
        let instance = file_name
            .strip_prefix(self.prefix.as_str())
            .unwrap_or(file_name)
            .trim_end_matches(".csv")
            .to_string();
        Row {
            n: parse_vertex_count(file_name),
            p: parse_probability(file_name),
            edges: graph.graph().edge_count(),
            instance,
            values,
        }
    }

    pub fn evaluate_graph(&self, file_name: &str, graph: &LabeledGraph) -> Row {
        let values = self
            .heuristics
            .iter()
            .map(|h| h.treewidth(graph.graph()))
            .collect();
        self.row(file_name, graph, values)
    }

    pub fn validate_graph(&self, file_name: &str, graph: &LabeledGraph) -> Row {
        let values = self
            .heuristics
            .iter()
            .map(|h| validate_heuristic(*h, graph.graph()) as usize)
            .collect();
        self.row(file_name, graph, values)
    }

    /// Writes the header, one row of treewidth bounds per instance and
    /// finally the mean and median of every column.
    pub fn evaluate<W: Write>(&self, dir: &Path, out: &mut W) -> Result<Vec<Row>, EvaluationError> {
        let rows = self.run(dir, out, Self::evaluate_graph)?;
        if rows.is_empty() {
            return Ok(rows);
        }
        let columns: Vec<Vec<usize>> = (0..self.heuristics.len())
            .map(|c| rows.iter().map(|r| r.values[c]).collect())
            .collect();
        write_summary(out, "mean", &columns, mean)?;
        write_summary(out, "median", &columns, median)?;
        Ok(rows)
    }

    /// Writes the header and one row per instance with 1 for every heuristic
    /// that passes [`validate_heuristic`] and 0 otherwise.
    pub fn validate<W: Write>(&self, dir: &Path, out: &mut W) -> Result<Vec<Row>, EvaluationError> {
        self.run(dir, out, Self::validate_graph)
    }

    fn run<W, F>(&self, dir: &Path, out: &mut W, per_graph: F) -> Result<Vec<Row>, EvaluationError>
    where
        W: Write,
        F: Fn(&Self, &str, &LabeledGraph) -> Row,
    {
        let files = self.instance_files(dir)?;
        info!("processing {} instances in {}", files.len(), dir.display());
        writeln!(out, "{}", self.header())?;
        let mut rows = Vec::with_capacity(files.len());
        for path in files {
            #[cfg(feature = "handle-ctrlc")]
            {
                if crate::signals::received_ctrl_c() {
                    warn!("received Ctrl-C, skipping remaining instances");
                    break;
                }
            }
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            let graph = read_graph(&path)?;
            debug!(
                "{}: {} vertices, {} edges",
                file_name,
                graph.graph().order(),
                graph.graph().edge_count()
            );
            let row = per_graph(self, &file_name, &graph);
            writeln!(out, "{}", row)?;
            rows.push(row);
        }
        Ok(rows)
    }
}
