use petgraph::graph::{NodeIndex, UnGraph};
use std::fs::File;
use std::io;
use std::io::BufRead;
use std::num::ParseIntError;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Pace2021Error {
    #[error("missing header (edge before 'p cep (n) (m)')")]
    MissingHeader,
    #[error("invalid header (expected 'p cep (n) (m)', got {0})")]
    InvalidHeader(String),
    #[error("invalid line (expected '(u) (v)', got {0})")]
    InvalidLine(String),
    #[error("found zero index (indices must be at least 1)")]
    ZeroIndex,
    #[error("node {node} out of range (n = {n})")]
    NodeOutOfRange { node: usize, n: usize },
    #[error("found self loop")]
    SelfLoop(usize),
    #[error("parse int error")]
    ParseInt(#[from] ParseIntError),
    #[error("io error")]
    IoError(#[from] io::Error),
}

/// Reads a graph in the format of the PACE 2021 challenge (cluster editing).
///
/// Lines starting with `c` are comments. The problem line `p cep (n) (m)` sets
/// the number of nodes; every later problem line starts over with an empty
/// graph. All other non-empty lines contain one edge `(u) (v)` with indices
/// starting at 1.
///
/// Parallel edges are kept. Input without a problem line is the empty graph.
pub fn read_pace2021<R: BufRead>(reader: R) -> Result<UnGraph<(), ()>, Pace2021Error> {
    let mut graph: Option<UnGraph<(), ()>> = None;
    for line in reader.lines() {
        let line = line?;
        if line.starts_with('c') {
            continue;
        }
        if line.starts_with('p') {
            graph = Some(read_header(&line)?);
            continue;
        }

        let mut tokens = line.split_ascii_whitespace();
        let Some(a) = tokens.next() else {
            continue;
        };
        let graph = graph.as_mut().ok_or(Pace2021Error::MissingHeader)?;
        let Some(b) = tokens.next() else {
            return Err(Pace2021Error::InvalidLine(line));
        };
        if tokens.next().is_some() {
            return Err(Pace2021Error::InvalidLine(line));
        }

        let n = graph.node_count();
        let u: usize = a.parse()?;
        let v: usize = b.parse()?;
        for node in [u, v] {
            if node == 0 {
                return Err(Pace2021Error::ZeroIndex);
            }
            if node > n {
                return Err(Pace2021Error::NodeOutOfRange { node, n });
            }
        }
        if u == v {
            return Err(Pace2021Error::SelfLoop(u));
        }
        graph.add_edge(NodeIndex::new(u - 1), NodeIndex::new(v - 1), ());
    }
    Ok(graph.unwrap_or_default())
}

pub fn read_pace2021_file<P>(path: P) -> Result<UnGraph<(), ()>, Pace2021Error>
where
    P: AsRef<Path>,
{
    let file = File::open(path)?;
    read_pace2021(io::BufReader::new(file))
}

fn read_header(line: &str) -> Result<UnGraph<(), ()>, Pace2021Error> {
    let err = || Pace2021Error::InvalidHeader(line.to_string());
    let mut iter = line.split_ascii_whitespace();
    if iter.next() != Some("p") || iter.next().is_none() {
        return Err(err());
    }
    let n: usize = iter.next().ok_or_else(err)?.parse().map_err(|_| err())?;
    let m: usize = iter.next().ok_or_else(err)?.parse().map_err(|_| err())?;
    if iter.next().is_some() {
        return Err(err());
    }

    let mut graph = UnGraph::with_capacity(n, m);
    for _ in 0..n {
        graph.add_node(());
    }
    Ok(graph)
}

#[cfg(test)]
mod test {
    use super::{read_pace2021, read_pace2021_file, Pace2021Error};
    use petgraph::visit::EdgeRef;

    fn edges(input: &str) -> Vec<(usize, usize)> {
        let graph = read_pace2021(input.as_bytes()).unwrap();
        graph.edge_references().map(|e| (e.source().index(), e.target().index())).collect()
    }

    #[test]
    fn small_graph() {
        let input = "c a 4-cycle with one chord\np cep 4 5\n1 2\n2 3\n3 4\n4 1\nc chord\n1 3\n";
        let graph = read_pace2021(input.as_bytes()).unwrap();
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 5);
        assert_eq!(edges(input), [(0, 1), (1, 2), (2, 3), (3, 0), (0, 2)]);
    }

    #[test]
    fn isolated_nodes_and_empty_lines() {
        let graph = read_pace2021("p cep 5 1\n\n2 5\n\n".as_bytes()).unwrap();
        assert_eq!(graph.node_count(), 5);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn second_header_starts_over() {
        let input = "p cep 3 2\n1 2\n2 3\np cep 2 1\n1 2\n";
        let graph = read_pace2021(input.as_bytes()).unwrap();
        assert_eq!(graph.node_count(), 2);
        assert_eq!(edges(input), [(0, 1)]);
    }

    #[test]
    fn no_header_is_empty() {
        let graph = read_pace2021("c nothing here\n".as_bytes()).unwrap();
        assert_eq!(graph.node_count(), 0);
    }

    #[test]
    fn errors() {
        let read = |input: &str| read_pace2021(input.as_bytes()).unwrap_err();
        assert!(matches!(read("1 2\n"), Pace2021Error::MissingHeader));
        assert!(matches!(read("p cep 3\n"), Pace2021Error::InvalidHeader(_)));
        assert!(matches!(read("p cep three 2\n"), Pace2021Error::InvalidHeader(_)));
        assert!(matches!(read("p cep 3 2 1\n"), Pace2021Error::InvalidHeader(_)));
        assert!(matches!(read("p cep 3 1\n1\n"), Pace2021Error::InvalidLine(_)));
        assert!(matches!(read("p cep 3 1\n1 2 3\n"), Pace2021Error::InvalidLine(_)));
        assert!(matches!(read("p cep 3 1\n0 2\n"), Pace2021Error::ZeroIndex));
        assert!(matches!(read("p cep 3 1\n1 4\n"), Pace2021Error::NodeOutOfRange { node: 4, n: 3 }));
        assert!(matches!(read("p cep 3 1\n2 2\n"), Pace2021Error::SelfLoop(2)));
        assert!(matches!(read("p cep 3 1\n1 x\n"), Pace2021Error::ParseInt(_)));
    }

    #[test]
    fn missing_file() {
        let err = read_pace2021_file("does/not/exist.gr").unwrap_err();
        assert!(matches!(err, Pace2021Error::IoError(_)));
    }

    #[test]
    fn error_messages() {
        let err = read_pace2021("p cep 3\n".as_bytes()).unwrap_err();
        assert_eq!(err.to_string(), "invalid header (expected 'p cep (n) (m)', got p cep 3)");
        let err = read_pace2021("p cep 3 1\n1 4\n".as_bytes()).unwrap_err();
        assert_eq!(err.to_string(), "node 4 out of range (n = 3)");
    }
}
