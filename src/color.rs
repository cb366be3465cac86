use std::fmt::Debug;
use std::ops::Range;

use tracing::info;

/** Vertex Id */
pub type VertexId = usize;

/** Solution of a graph coloring problem
(represented as a partition: solution[c] lists the vertices colored c).
*/
pub type Solution = Vec<Vec<VertexId>>;

/** models a Graph Coloring instance.
The graph is undirected and immutable once built: implementations are shared by
all the coloring attempts on an instance (possibly from several threads).
*/
pub trait ColoringInstance: Debug + Send + Sync {
    /// number of vertices
    fn nb_vertices(&self) -> usize;

    /// number of (distinct) edges
    fn nb_edges(&self) -> usize;

    /// vertices adjacent to u (sorted, no duplicates)
    fn neighbors(&self, u:VertexId) -> &[VertexId];

    /// number of neighbors of u
    fn degree(&self, u:VertexId) -> usize { self.neighbors(u).len() }

    /// edge list (each edge (u,v) given once with u < v)
    fn edges(&self) -> &[(VertexId, VertexId)];

    /// iterates over the vertices
    fn vertices(&self) -> Range<VertexId> { 0..self.nb_vertices() }

    /// logs statistics of the instance
    fn display_statistics(&self) {
        let degrees = self.vertices().map(|u| self.degree(u));
        let min_degree = degrees.clone().min().unwrap_or(0);
        let max_degree = degrees.max().unwrap_or(0);
        info!(
            vertices = self.nb_vertices(),
            edges = self.nb_edges(),
            min_degree,
            max_degree,
            "instance statistics"
        );
    }
}


/** result of the solution checker */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckerResult {
    /// the solution is a proper coloring using the given number of colors
    Ok(usize),
    /// the vertex appears in two color classes (or twice in one)
    VertexAddedTwice(VertexId),
    /// the vertex does not appear in any color class
    VertexNotColored(VertexId),
    /// the vertex does not belong to the instance
    UnknownVertex(VertexId),
    /// both endpoints of the edge share a color
    ConflictingEdge(VertexId, VertexId),
}

/**
checks that the solution is a proper coloring of the instance.
returns the number of colors if it is feasible, the first violation found otherwise.
*/
pub fn checker(inst:&dyn ColoringInstance, sol:&[Vec<VertexId>]) -> CheckerResult {
    let n = inst.nb_vertices();
    let mut color_of:Vec<Option<usize>> = vec![None ; n];
    for (c, class) in sol.iter().enumerate() {
        for v in class {
            match color_of.get(*v) {
                None => return CheckerResult::UnknownVertex(*v),
                Some(Some(_)) => return CheckerResult::VertexAddedTwice(*v),
                Some(None) => color_of[*v] = Some(c),
            }
        }
    }
    if let Some(v) = color_of.iter().position(|c| c.is_none()) {
        return CheckerResult::VertexNotColored(v);
    }
    for (a,b) in inst.edges() {
        if color_of[*a] == color_of[*b] {
            return CheckerResult::ConflictingEdge(*a, *b);
        }
    }
    CheckerResult::Ok(sol.len())
}
