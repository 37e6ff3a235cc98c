use crate::graph::{BaseGraph, HashMapGraph, MutableGraph};
use crate::tree_decomposition::TreeDecomposition;
use fxhash::FxHashMap;
use std::convert::TryFrom;
use std::fs::File;
use std::io;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("Unknown Vertex: {0}")]
    UnknownVertex(String),
    #[error("Unlabeled Vertex: id {0} does not belong to this graph")]
    UnlabeledVertex(usize),
    #[error("Unknown Bag: {0}")]
    UnknownBag(String),
    #[error("Duplicate Bag: {0}")]
    DuplicateBag(String),
    #[error("Malformed Line {line}: {content}")]
    MalformedLine { line: usize, content: String },
}

/// A graph whose vertices carry textual names.
///
/// Vertices read from text are numbered in order of first appearance.
#[derive(Debug, Clone, Default)]
pub struct LabeledGraph {
    graph: HashMapGraph,
    labels: FxHashMap<usize, String>,
    ids: FxHashMap<String, usize>,
    next_id: usize,
}

impl LabeledGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn graph(&self) -> &HashMapGraph {
        &self.graph
    }

    /// Returns the id of `label`, adding a new vertex if it is not known yet.
    pub fn intern(&mut self, label: &str) -> usize {
        if let Some(id) = self.ids.get(label) {
            return *id;
        }
        let id = self.next_id;
        self.next_id += 1;
        self.labels.insert(id, label.to_string());
        self.ids.insert(label.to_string(), id);
        self.graph.add_vertex(id);
        id
    }

    pub fn id(&self, label: &str) -> Option<usize> {
        self.ids.get(label).copied()
    }

    pub fn label(&self, id: usize) -> Option<&str> {
        self.labels.get(&id).map(String::as_str)
    }

    fn labeled(&self, id: usize) -> Result<&str, InputError> {
        self.label(id).ok_or(InputError::UnlabeledVertex(id))
    }

    /// Reads whitespace separated labels into vertex ids. Whether the
    /// result is a permutation of the vertex set is not checked here.
    pub fn parse_ordering(&self, text: &str) -> Result<Vec<usize>, InputError> {
        text.split_whitespace()
            .map(|label| {
                self.id(label)
                    .ok_or_else(|| InputError::UnknownVertex(label.to_string()))
            })
            .collect()
    }

    pub fn format_ordering(&self, order: &[usize]) -> Result<String, InputError> {
        let labels = order
            .iter()
            .map(|v| self.labeled(*v))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(labels.join(" "))
    }

    /// Every edge as `a,b,` followed by every isolated vertex as `a,,`.
    pub fn encode(&self) -> String {
        // every vertex of the inner graph was added together with its label
        let label = |v: usize| self.labels[&v].as_str();
        let mut out = String::new();
        for (u, v) in self.graph.edges() {
            out.push_str(&format!("{},{},\n", label(u), label(v)));
        }
        let mut isolated: Vec<usize> = self
            .graph
            .vertices()
            .filter(|v| self.graph.degree(*v) == 0)
            .collect();
        isolated.sort_unstable();
        for v in isolated {
            out.push_str(&format!("{},,\n", label(v)));
        }
        out
    }

    /// Every decomposition edge as `N0,N1,` followed by every bag as
    /// `Nk,,a;b;c`. Fails on a bag vertex that is not a vertex of this graph.
    pub fn encode_decomposition(&self, td: &TreeDecomposition) -> Result<String, InputError> {
        let mut out = String::new();
        for (a, b) in td.edges() {
            out.push_str(&format!("{},{},\n", td.bags[a].name, td.bags[b].name));
        }
        for bag in td.bags() {
            let members = bag
                .sorted_vertices()
                .into_iter()
                .map(|v| self.labeled(v))
                .collect::<Result<Vec<_>, _>>()?;
            out.push_str(&format!("{},,{}\n", bag.name, members.join(";")));
        }
        Ok(out)
    }

    /// Reads a decomposition in the format written by
    /// [`LabeledGraph::encode_decomposition`]. Bags keep the order in which
    /// they are defined, edges may name bags defined further down.
    pub fn parse_decomposition<R: BufRead>(&self, reader: R) -> Result<TreeDecomposition, InputError> {
        let mut td = TreeDecomposition::default();
        let mut bag_ids: FxHashMap<String, usize> = FxHashMap::default();
        let mut edges: Vec<(String, String)> = vec![];

        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let malformed = || InputError::MalformedLine {
                line: i + 1,
                content: line.to_string(),
            };
            let fields: Vec<&str> = line.splitn(3, ',').map(str::trim).collect();
            if fields.len() < 2 || fields[0].is_empty() {
                return Err(malformed());
            }
            if fields[1].is_empty() {
                let name = fields[0];
                if bag_ids.contains_key(name) {
                    return Err(InputError::DuplicateBag(name.to_string()));
                }
                let members = fields.get(2).copied().unwrap_or("");
                let vertex_set = members
                    .split(';')
                    .map(str::trim)
                    .filter(|m| !m.is_empty())
                    .map(|m| self.id(m).ok_or_else(|| InputError::UnknownVertex(m.to_string())))
                    .collect::<Result<_, _>>()?;
                let id = td.add_bag(name.to_string(), vertex_set);
                bag_ids.insert(name.to_string(), id);
            } else {
                if fields[0] == fields[1] {
                    return Err(malformed());
                }
                edges.push((fields[0].to_string(), fields[1].to_string()));
            }
        }

        for (a, b) in edges {
            let a = *bag_ids.get(&a).ok_or(InputError::UnknownBag(a))?;
            let b = *bag_ids.get(&b).ok_or(InputError::UnknownBag(b))?;
            td.add_edge(a, b);
        }
        Ok(td)
    }
}

impl From<HashMapGraph> for LabeledGraph {
    /// Labels every vertex with its id.
    fn from(graph: HashMapGraph) -> Self {
        let labels: FxHashMap<usize, String> = graph.vertices().map(|v| (v, v.to_string())).collect();
        let ids = labels.iter().map(|(v, l)| (l.clone(), *v)).collect();
        let next_id = graph.vertices().max().map_or(0, |v| v + 1);
        Self {
            graph,
            labels,
            ids,
            next_id,
        }
    }
}

pub struct CsvRead<T: BufRead>(pub T);

impl<T: BufRead> TryFrom<CsvRead<T>> for LabeledGraph {
    type Error = InputError;

    /// One record per line, fields separated by `,` or `>`. `A,B` adds an
    /// edge, `A,,` declares an isolated vertex. Lines with a single field
    /// are ignored.
    fn try_from(reader: CsvRead<T>) -> Result<Self, Self::Error> {
        let reader = reader.0;
        let mut graph = LabeledGraph::new();
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let fields: Vec<&str> = line
                .splitn(3, |c: char| c == ',' || c == '>')
                .map(str::trim)
                .collect();
            if fields.len() < 2 {
                continue;
            }
            if fields[0].is_empty() {
                return Err(InputError::MalformedLine {
                    line: i + 1,
                    content: line.to_string(),
                });
            }
            let u = graph.intern(fields[0]);
            if fields[1].is_empty() {
                continue;
            }
            let v = graph.intern(fields[1]);
            if u != v {
                graph.graph.add_edge(u, v);
            }
        }
        Ok(graph)
    }
}

pub fn read_graph<P: AsRef<Path>>(path: P) -> Result<LabeledGraph, InputError> {
    let file = File::open(path)?;
    LabeledGraph::try_from(CsvRead(BufReader::new(file)))
}

#[cfg(test)]
mod tests {
    use crate::elimination::{EliminationHeuristic, HeuristicType, MinFill};
    use crate::graph::{BaseGraph, HashMapGraph, MutableGraph};
    use crate::io::{CsvRead, InputError, LabeledGraph};
    use crate::tree_decomposition::{TreeDecomposition, ValidationError};
    use std::convert::TryFrom;

    fn parse(text: &str) -> LabeledGraph {
        LabeledGraph::try_from(CsvRead(text.as_bytes())).unwrap()
    }

    #[test]
    fn parse_graph() {
        let graph = parse("a,b,\n  b>c\n\nd,,\ne,e\nlonely\n");
        assert_eq!(graph.graph().order(), 5);
        assert_eq!(graph.graph().edge_count(), 2);
        assert_eq!(graph.id("a"), Some(0));
        assert_eq!(graph.id("e"), Some(4));
        assert_eq!(graph.id("lonely"), None);
        assert_eq!(graph.graph().degree(graph.id("d").unwrap()), 0);
        assert_eq!(graph.graph().degree(graph.id("e").unwrap()), 0);
        assert!(graph.graph().has_edge(1, 2));
    }

    #[test]
    fn third_field_is_ignored() {
        let graph = parse("a,b,whatever,else\n");
        assert_eq!(graph.graph().order(), 2);
        assert_eq!(graph.graph().edges(), vec![(0, 1)]);
    }

    #[test]
    fn empty_first_field() {
        match LabeledGraph::try_from(CsvRead(",b\n".as_bytes())) {
            Err(InputError::MalformedLine { line, .. }) => assert_eq!(line, 1),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn encode_graph() {
        let graph = parse("x,y\ny,z\nw,,\n");
        assert_eq!(graph.encode(), "x,y,\ny,z,\nw,,\n");
        let again = parse(&graph.encode());
        assert_eq!(again.graph(), graph.graph());
    }

    #[test]
    fn orderings() {
        let graph = parse("x,y\ny,z\n");
        let order = graph.parse_ordering(" z  x\ny ").unwrap();
        assert_eq!(order, vec![2, 0, 1]);
        assert_eq!(graph.format_ordering(&order).unwrap(), "z x y");
        match graph.parse_ordering("x q") {
            Err(InputError::UnknownVertex(label)) => assert_eq!(label, "q"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn encode_decomposition() {
        let graph = parse("a,b\nb,c\n");
        let order = graph.parse_ordering("a b c").unwrap();
        let td = TreeDecomposition::from_ordering(graph.graph(), &order).unwrap();
        assert_eq!(td.bags.len(), 3);
        assert_eq!(
            graph.encode_decomposition(&td).unwrap(),
            "N0,N1,\nN1,N2,\nN0,,c\nN1,,b;c\nN2,,a;b\n"
        );
    }

    #[test]
    fn read_back_decomposition() {
        let graph = parse("1,2\n2,3\n3,4\n4,1\n1,3\n5,,\n");
        let td = TreeDecomposition::from_heuristic(
            MinFill::with_graph(graph.graph()),
            graph.graph(),
        );
        let text = graph.encode_decomposition(&td).unwrap();
        let parsed = graph.parse_decomposition(text.as_bytes()).unwrap();
        assert_eq!(parsed.bags.len(), td.bags.len());
        assert_eq!(parsed.edges(), td.edges());
        assert_eq!(parsed.width(), td.width());
        assert!(parsed.verify(graph.graph()).is_ok());
    }

    #[test]
    fn edges_before_bags() {
        let graph = parse("a,b\nb,c\n");
        let td = graph
            .parse_decomposition("X,Y,\nX,,a;b\nY,,b;c\n".as_bytes())
            .unwrap();
        assert_eq!(td.edges(), vec![(0, 1)]);
        assert!(td.verify(graph.graph()).is_ok());

        let td = graph.parse_decomposition("X,,a;b\nY,,c\n".as_bytes()).unwrap();
        assert_eq!(
            td.verify(graph.graph()),
            Err(ValidationError::MissingEdge((1, 2)))
        );
    }

    #[test]
    fn rejects_bad_decompositions() {
        let graph = parse("a,b\n");
        assert!(matches!(
            graph.parse_decomposition("X,Y,\nX,,a;b\n".as_bytes()),
            Err(InputError::UnknownBag(name)) if name == "Y"
        ));
        assert!(matches!(
            graph.parse_decomposition("X,,a\nX,,b\n".as_bytes()),
            Err(InputError::DuplicateBag(name)) if name == "X"
        ));
        assert!(matches!(
            graph.parse_decomposition("X,,a;q\n".as_bytes()),
            Err(InputError::UnknownVertex(label)) if label == "q"
        ));
        assert!(matches!(
            graph.parse_decomposition("X,X,\nX,,a;b\n".as_bytes()),
            Err(InputError::MalformedLine { line: 1, .. })
        ));
        assert!(matches!(
            graph.parse_decomposition("X\n".as_bytes()),
            Err(InputError::MalformedLine { line: 1, .. })
        ));
    }

    #[test]
    fn foreign_ids_are_rejected() {
        let graph = parse("a,b\n");
        assert!(matches!(
            graph.format_ordering(&[1, 7, 0]),
            Err(InputError::UnlabeledVertex(7))
        ));

        let mut other = HashMapGraph::new();
        other.add_edge(0, 5);
        let td = TreeDecomposition::from_ordering(&other, &[0, 5]).unwrap();
        assert!(matches!(
            graph.encode_decomposition(&td),
            Err(InputError::UnlabeledVertex(5))
        ));
    }

    #[test]
    fn labels_from_ids() {
        let mut inner = HashMapGraph::new();
        inner.add_edge(3, 8);
        inner.add_vertex(5);
        let graph = LabeledGraph::from(inner);
        assert_eq!(graph.label(8), Some("8"));
        assert_eq!(graph.label(4), None);
        assert_eq!(graph.clone().intern("new"), 9);
        assert_eq!(graph.encode(), "3,8,\n5,,\n");
        let order = graph.parse_ordering("5 8 3").unwrap();
        let width = crate::elimination::treewidth_of_order(graph.graph(), &order).unwrap();
        assert_eq!(width, 1);
        assert_eq!(HeuristicType::MinDegree.treewidth(graph.graph()), 1);
    }
}
