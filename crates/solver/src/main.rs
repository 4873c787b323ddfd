use clap::Parser;
use cluster_editing::{Graph, Solution, Solver, SolverConfig, StopToken};
use common::io::{read_pace2021, read_pace2021_file, write_clustering, write_edit_list};
use signal_hook::consts::{SIGINT, SIGTERM};
use std::error::Error;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, Level};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::FmtSubscriber;

/// Heuristic cluster editing.
///
/// Reads a graph in the PACE 2021 format, improves a clustering until SIGINT or
/// SIGTERM is received and prints the edge edits of the best clustering.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// Read the graph from this file instead of standard input.
    #[arg(long)]
    input: Option<PathBuf>,
    /// Write the edits to this file instead of standard output.
    #[arg(long)]
    output: Option<PathBuf>,
    /// Also write the final clustering to this file.
    #[arg(long)]
    clustering: Option<PathBuf>,
    /// Write a json record with the result and the running time to this file.
    #[arg(long)]
    stats: Option<PathBuf>,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Stop after this many rounds.
    #[arg(long)]
    max_rounds: Option<usize>,
    /// Stop after this many seconds.
    #[arg(long)]
    time_limit: Option<f64>,
    #[arg(long)]
    log_level: Option<Level>,
}

/// Quotes `s` as a json string.
fn json_string(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('"');
    for c in s.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            c if (c as u32) < 0x20 => quoted.push_str(&format!("\\u{:04x}", c as u32)),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

fn write_stats(
    path: &Path,
    input: Option<&Path>,
    graph: &Graph,
    solution: &Solution,
    time: Duration,
) -> Result<(), Box<dyn Error>> {
    let mut out = BufWriter::new(File::create(path)?);
    let input = input.and_then(Path::file_name).map_or("-".into(), |name| name.to_string_lossy());
    writeln!(
        out,
        "{{\"input\": {}, \"n\": {}, \"m\": {}, \"cost\": {}, \"rounds\": {}, \"best_round\": {}, \"time\": {}}}",
        json_string(&input),
        graph.node_count(),
        graph.edge_count(),
        solution.cost,
        solution.rounds,
        solution.best_round,
        time.as_secs_f64()
    )?;
    out.flush()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if let Some(level) = cli.log_level {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(level)
            .with_span_events(FmtSpan::CLOSE)
            .with_writer(std::io::stderr)
            .finish();

        subscriber.init();
    };

    let stop = Arc::new(AtomicBool::new(false));
    signal_hook::flag::register(SIGTERM, Arc::clone(&stop))?;
    signal_hook::flag::register(SIGINT, Arc::clone(&stop))?;
    if let Some(seconds) = cli.time_limit {
        let limit = Duration::try_from_secs_f64(seconds)?;
        let stop = Arc::clone(&stop);
        std::thread::spawn(move || {
            std::thread::sleep(limit);
            stop.store(true, Ordering::Relaxed);
        });
    }

    let graph = match &cli.input {
        Some(path) => read_pace2021_file(path)?,
        None => read_pace2021(std::io::stdin().lock())?,
    };
    let graph = Graph::from(&graph);
    info!(n = graph.node_count(), m = graph.edge_count(), "read graph");

    let config = SolverConfig { seed: cli.seed, max_rounds: cli.max_rounds };
    let start = Instant::now();
    let solution = Solver::new(&graph, &config).solve(&StopToken::from(stop));
    let time = start.elapsed();

    let edits = solution.clustering.edits(&graph);
    match &cli.output {
        Some(path) => write_edit_list(&mut BufWriter::new(File::create(path)?), &edits)?,
        None => write_edit_list(&mut BufWriter::new(std::io::stdout().lock()), &edits)?,
    }
    if let Some(path) = &cli.clustering {
        write_clustering(&mut BufWriter::new(File::create(path)?), &solution.clustering)?;
    }
    if let Some(path) = &cli.stats {
        write_stats(path, cli.input.as_deref(), &graph, &solution, time)?;
    }
    Ok(())
}
