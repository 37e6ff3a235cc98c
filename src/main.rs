use log::{info, warn};
use std::fs::File;
use std::io;
use std::io::{stdin, BufReader, Read, Write};
use std::path::PathBuf;
use std::process;
use structopt::StructOpt;
use treewidth_heuristics::elimination::{treewidth_of_order, HeuristicType};
use treewidth_heuristics::error::Result;
use treewidth_heuristics::evaluation::EvaluationSettings;
use treewidth_heuristics::generator::GeneratorSettings;
use treewidth_heuristics::io::{read_graph, LabeledGraph};
use treewidth_heuristics::log::{build_logger_for_level, level_for_verbosity};
use treewidth_heuristics::tree_decomposition::TreeDecomposition;

#[cfg(not(target_env = "msvc"))]
use jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "treewidth-cli",
    about = "Treewidth upper bounds and tree decompositions from greedy elimination orderings."
)]
struct Opt {
    /// Verbosity, repeat for more output. Warnings only by default.
    #[structopt(short, long, parse(from_occurrences), global = true)]
    verbose: u8,

    #[structopt(subcommand)]
    command: Command,
}

#[derive(Debug, StructOpt)]
enum Command {
    /// Prints a heuristic elimination ordering.
    Order {
        /// Input graph in CSV format.
        #[structopt(parse(from_os_str))]
        graph: PathBuf,
        /// One of minfill, mindeg, maxcard.
        #[structopt(short = "r", long)]
        heuristic: HeuristicType,
    },
    /// Prints the treewidth bound of a heuristic or of a given ordering.
    Width {
        #[structopt(parse(from_os_str))]
        graph: PathBuf,
        #[structopt(short = "r", long, default_value = "minfill")]
        heuristic: HeuristicType,
        /// Space separated elimination ordering, `-` for stdin. Replaces the heuristic.
        #[structopt(long)]
        ordering: Option<String>,
    },
    /// Prints a tree decomposition built from an elimination ordering.
    Decomp {
        #[structopt(parse(from_os_str))]
        graph: PathBuf,
        /// Space separated elimination ordering, `-` for stdin.
        ordering: String,
        /// Verify the decomposition before printing it.
        #[structopt(short = "y", long)]
        verify: bool,
    },
    /// Prints a tree decomposition built while running a heuristic.
    HeuristicDecomp {
        #[structopt(parse(from_os_str))]
        graph: PathBuf,
        #[structopt(short = "r", long)]
        heuristic: HeuristicType,
        #[structopt(short = "y", long)]
        verify: bool,
    },
    /// Checks a tree decomposition against its graph.
    Verify {
        #[structopt(parse(from_os_str))]
        graph: PathBuf,
        #[structopt(parse(from_os_str))]
        decomposition: PathBuf,
    },
    /// Writes a series of G(n, p) graphs into an empty directory.
    Gen {
        #[structopt(parse(from_os_str))]
        dir: PathBuf,
        #[structopt(short = "n", required = true, min_values = 1)]
        vertex_counts: Vec<usize>,
        #[structopt(short = "p", required = true, min_values = 1)]
        probabilities: Vec<f64>,
        /// Graphs per combination of n and p.
        #[structopt(short = "c", long)]
        count: usize,
        /// Number of the first graph of every combination.
        #[structopt(long, default_value = "1")]
        start: usize,
        #[structopt(long)]
        seed: Option<u64>,
    },
    /// Prints the treewidth bound of every heuristic for every graph in a directory.
    Eval {
        #[structopt(parse(from_os_str))]
        dir: PathBuf,
        /// Only files starting with this prefix are processed.
        #[structopt(short = "p", long, default_value = "")]
        prefix: String,
    },
    /// Checks the decomposition of every heuristic for every graph in a directory.
    Validate {
        #[structopt(parse(from_os_str))]
        dir: PathBuf,
        #[structopt(short = "p", long, default_value = "")]
        prefix: String,
    },
}

fn read_ordering(graph: &LabeledGraph, source: &str) -> Result<Vec<usize>> {
    let mut text = String::new();
    if source == "-" {
        stdin().read_to_string(&mut text)?;
    } else {
        File::open(source)?.read_to_string(&mut text)?;
    }
    Ok(graph.parse_ordering(&text)?)
}

/// Prints `td` unless `verify` is set and it fails verification.
fn output_decomposition(graph: &LabeledGraph, td: &TreeDecomposition, verify: bool) -> Result<i32> {
    if verify {
        if let Err(e) = td.verify(graph.graph()) {
            eprintln!("{}", e);
            return Ok(1);
        }
        info!("decomposition of width {} verified", td.width());
    }
    print!("{}", graph.encode_decomposition(td)?);
    Ok(0)
}

fn run(command: Command) -> Result<i32> {
    match command {
        Command::Order { graph, heuristic } => {
            let graph = read_graph(&graph)?;
            let order = heuristic.elimination_order(graph.graph());
            println!("{}", graph.format_ordering(&order)?);
        }
        Command::Width {
            graph,
            heuristic,
            ordering,
        } => {
            let graph = read_graph(&graph)?;
            let width = match ordering {
                Some(source) => {
                    let order = read_ordering(&graph, &source)?;
                    treewidth_of_order(graph.graph(), &order)?
                }
                None => heuristic.treewidth(graph.graph()),
            };
            println!("{}", width);
        }
        Command::Decomp {
            graph,
            ordering,
            verify,
        } => {
            let graph = read_graph(&graph)?;
            let order = read_ordering(&graph, &ordering)?;
            let td = TreeDecomposition::from_ordering(graph.graph(), &order)?;
            return output_decomposition(&graph, &td, verify);
        }
        Command::HeuristicDecomp {
            graph,
            heuristic,
            verify,
        } => {
            let graph = read_graph(&graph)?;
            let td = heuristic.tree_decomposition(graph.graph());
            return output_decomposition(&graph, &td, verify);
        }
        Command::Verify {
            graph,
            decomposition,
        } => {
            let graph = read_graph(&graph)?;
            let reader = BufReader::new(File::open(&decomposition)?);
            let td = graph.parse_decomposition(reader)?;
            if let Err(e) = td.verify(graph.graph()) {
                eprintln!("{}", e);
                return Ok(1);
            }
            println!("valid tree decomposition of width {}", td.width());
        }
        Command::Gen {
            dir,
            vertex_counts,
            probabilities,
            count,
            start,
            seed,
        } => {
            let written = GeneratorSettings::new()
                .vertex_counts(vertex_counts)
                .probabilities(probabilities)
                .count(count)
                .start(start)
                .seed(seed)
                .write_to(&dir)?;
            for path in written {
                println!("Created: {}", path.display());
            }
        }
        Command::Eval { dir, prefix } => {
            let stdout = io::stdout();
            EvaluationSettings::new()
                .prefix(prefix)
                .evaluate(&dir, &mut stdout.lock())?;
        }
        Command::Validate { dir, prefix } => {
            let stdout = io::stdout();
            EvaluationSettings::new()
                .prefix(prefix)
                .validate(&dir, &mut stdout.lock())?;
        }
    }
    Ok(0)
}

fn main() {
    let opt = Opt::from_args();
    build_logger_for_level(level_for_verbosity(opt.verbose));

    #[cfg(feature = "handle-ctrlc")]
    {
        if let Err(e) = treewidth_heuristics::signals::initialize() {
            warn!("could not install Ctrl-C handler: {}", e);
        }
    }

    let code = match run(opt.command) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}", e);
            1
        }
    };
    if let Err(e) = io::stdout().flush() {
        warn!("could not flush stdout: {}", e);
    }
    process::exit(code);
}
