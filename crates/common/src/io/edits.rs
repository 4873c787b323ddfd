use cluster_editing::{Clustering, NodeIndex};
use std::io::Write;

/// Writes one edit `(u) (v)` per line with indices starting at 1.
pub fn write_edit_list<W: Write>(out: &mut W, edits: &[(NodeIndex, NodeIndex)]) -> std::io::Result<()> {
    for (u, v) in edits {
        writeln!(out, "{} {}", u.index() + 1, v.index() + 1)?;
    }
    out.flush()?;
    Ok(())
}

/// Writes one line `(u) (cluster)` per node. Nodes and clusters are numbered
/// from 1, clusters in the order of their smallest node.
pub fn write_clustering<W: Write>(out: &mut W, clustering: &Clustering) -> std::io::Result<()> {
    let mut cluster_of = vec![0; clustering.node_count()];
    for (i, cluster) in clustering.clusters().iter().enumerate() {
        for u in cluster {
            cluster_of[u.index()] = i + 1;
        }
    }
    for (u, cluster) in cluster_of.iter().enumerate() {
        writeln!(out, "{} {}", u + 1, cluster)?;
    }
    out.flush()?;
    Ok(())
}
