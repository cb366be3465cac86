use std::path::PathBuf;

use thiserror::Error;

use crate::color::VertexId;

/** errors raised while reading or building an instance.
Line numbers are 1-based, vertex ids are reported as written in the file (1-based)
for parsing errors and 0-based for errors raised from an edge list.
*/
#[derive(Debug, Error)]
pub enum InstanceError {
    /// the instance file could not be read
    #[error("unable to read {}: {}", .path.display(), .source)]
    Io {
        /// file that was requested
        path: PathBuf,
        /// underlying error
        source: std::io::Error,
    },
    /// no `p <name> <n> <m>` line in the file
    #[error("missing problem line (p <name> <nb_vertices> <nb_edges>)")]
    MissingHeader,
    /// a second `p` line was found
    #[error("line {line}: duplicate problem line")]
    DuplicateHeader {
        /// line number
        line: usize,
    },
    /// an edge was given before the problem line
    #[error("line {line}: edge found before the problem line")]
    EdgeBeforeHeader {
        /// line number
        line: usize,
    },
    /// a `p` or `e` line that does not follow the format
    #[error("line {line}: malformed line {content:?}")]
    MalformedLine {
        /// line number
        line: usize,
        /// line content
        content: String,
    },
    /// an edge references a vertex outside the graph
    #[error("line {line}: vertex {vertex} out of range (nb vertices: {nb_vertices})")]
    VertexOutOfRange {
        /// line number (0 if the edge does not come from a file)
        line: usize,
        /// offending vertex
        vertex: VertexId,
        /// number of vertices of the graph
        nb_vertices: usize,
    },
    /// an edge joins a vertex to itself
    #[error("line {line}: self-loop on vertex {vertex}")]
    SelfLoop {
        /// line number (0 if the edge does not come from a file)
        line: usize,
        /// offending vertex
        vertex: VertexId,
    },
}
