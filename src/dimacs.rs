use std::fs;
use std::path::Path;

use nom::IResult;
use nom::bytes::complete::{tag, take_till1};
use nom::character::complete::{digit1, space0, space1};
use nom::combinator::{all_consuming, map_res};
use tracing::warn;

use crate::color::{ColoringInstance, VertexId};
use crate::compact_instance::CompactInstance;
use crate::error::InstanceError;


/** content of a DIMACS file: problem line and edges (vertex ids start at 1, as in the file) */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimacsGraph {
    /// problem name (second token of the `p` line)
    pub name: String,
    /// number of vertices announced
    pub n: usize,
    /// number of edges announced
    pub m: usize,
    /// (line number, u, v) for each `e u v` line
    pub edges: Vec<(usize, VertexId, VertexId)>,
}

impl DimacsGraph {

    /** builds the coloring instance (vertex ids become 0-based).
    Duplicate edges collapse: when the announced number of edges does not match the
    number of distinct edges, a warning is emitted.
    */
    pub fn to_instance(&self) -> Result<CompactInstance, InstanceError> {
        let inst = CompactInstance::from_numbered_edges(
            self.n,
            // id 0 wraps around and is reported out of range
            self.edges.iter().map(|(line,a,b)| (*line, a.wrapping_sub(1), b.wrapping_sub(1)))
        )?;
        let nb_edges = inst.nb_edges();
        // some generators count each edge twice in the problem line
        if nb_edges != self.m && 2*nb_edges != self.m {
            warn!(
                problem = self.name.as_str(),
                announced = self.m,
                read = self.edges.len(),
                distinct = nb_edges,
                "edge count does not match the problem line"
            );
        }
        Ok(inst)
    }
}


/// reads an instance from a DIMACS file
pub fn read_from_file<P:AsRef<Path>>(filename:P) -> Result<CompactInstance, InstanceError> {
    let path = filename.as_ref();
    let content = fs::read_to_string(path)
        .map_err(|source| InstanceError::Io { path: path.to_path_buf(), source })?;
    parse_dimacs(&content)?.to_instance()
}

/** parses the content of a DIMACS file.
 - lines starting with 'c' are comments
 - exactly one `p <name> <n> <m>` line, before any edge
 - `e <u> <v>` lines (1 <= u,v <= n, u != v)
 - blank lines and lines starting with other letters are ignored
*/
pub fn parse_dimacs(s:&str) -> Result<DimacsGraph, InstanceError> {
    let mut header:Option<(String, usize, usize)> = None;
    let mut edges = Vec::new();
    for (i, raw_line) in s.lines().enumerate() {
        let line_number = i+1;
        let line = raw_line.trim();
        let malformed = || InstanceError::MalformedLine { line: line_number, content: line.to_string() };
        match line.chars().next() {
            Some('p') => {
                if header.is_some() {
                    return Err(InstanceError::DuplicateHeader { line: line_number });
                }
                let (_, (name, n, m)) = all_consuming(read_header)(line).map_err(|_| malformed())?;
                header = Some((name.to_string(), n, m));
            },
            Some('e') => {
                let n = match &header {
                    None => return Err(InstanceError::EdgeBeforeHeader { line: line_number }),
                    Some((_, n, _)) => *n,
                };
                let (_, (a,b)) = all_consuming(read_edge)(line).map_err(|_| malformed())?;
                for v in [a, b].iter() {
                    if *v == 0 || *v > n {
                        return Err(InstanceError::VertexOutOfRange {
                            line: line_number, vertex: *v, nb_vertices: n
                        });
                    }
                }
                if a == b {
                    return Err(InstanceError::SelfLoop { line: line_number, vertex: a });
                }
                edges.push((line_number, a, b));
            },
            _ => {}, // comments, blank lines & unsupported descriptors
        }
    }
    match header {
        None => Err(InstanceError::MissingHeader),
        Some((name, n, m)) => Ok(DimacsGraph { name, n, m, edges }),
    }
}

/// reads a non-negative integer
fn integer(s:&str) -> IResult<&str, usize> {
    map_res(digit1, |d:&str| d.parse::<usize>())(s)
}

/// reads two integers separated by spaces (trailing spaces allowed)
fn read_two_integers(s:&str) -> IResult<&str, (usize,usize)> {
    let (s, n1) = integer(s)?;
    let (s, _) = space1(s)?;
    let (s, n2) = integer(s)?;
    let (s, _) = space0(s)?;
    Ok((s, (n1,n2)))
}

/// reads the problem line `p <name> <n> <m>`
pub fn read_header(s:&str) -> IResult<&str, (&str,usize,usize)> {
    let (s, _) = tag("p")(s)?;
    let (s, _) = space1(s)?;
    let (s, name) = take_till1(|c:char| c.is_whitespace())(s)?;
    let (s, _) = space1(s)?;
    let (s, (n,m)) = read_two_integers(s)?;
    Ok((s, (name,n,m)))
}

/// reads edge line (WARNING: indices start at 1 in the DIMACS format)
pub fn read_edge(s:&str) -> IResult<&str, (usize,usize)> {
    let (s, _) = tag("e")(s)?;
    let (s, _) = space1(s)?;
    read_two_integers(s)
}
