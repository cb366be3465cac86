use crate::color::{ColoringInstance, VertexId};
use crate::error::InstanceError;

/** models a Graph Coloring instance as adjacency lists.
adj_list[u] is sorted and deduplicated. The adjacency is symmetric by construction.
*/
#[derive(Debug, Clone)]
pub struct CompactInstance {
    /// nb vertices
    n: usize,
    /// edges of the graph (u < v)
    edges: Vec<(VertexId,VertexId)>,
    /// adj_list[i]: list of vertices adjacent to i
    adj_list: Vec<Vec<VertexId>>,
}

impl ColoringInstance for CompactInstance {
    fn nb_vertices(&self) -> usize { self.n }

    fn nb_edges(&self) -> usize { self.edges.len() }

    fn neighbors(&self, u:VertexId) -> &[VertexId] { &self.adj_list[u] }

    fn degree(&self, u:VertexId) -> usize { self.adj_list[u].len() }

    fn edges(&self) -> &[(VertexId, VertexId)] { &self.edges }
}


impl CompactInstance {

    /// constructor using an edge list (0-based vertex ids).
    /// Duplicate edges (in any direction) collapse into one.
    ///
    /// # Errors
    ///  - `VertexOutOfRange` if an endpoint is not in [0,n)
    ///  - `SelfLoop` if an edge joins a vertex to itself
    pub fn from_edges(n:usize, edges:&[(VertexId,VertexId)]) -> Result<Self, InstanceError> {
        Self::from_numbered_edges(n, edges.iter().map(|(a,b)| (0, *a, *b)))
    }

    /** constructor using edges tagged with the line they come from (used by the DIMACS reader
    to report errors). Memory is linear in the number of vertices and edges. */
    pub(crate) fn from_numbered_edges<I>(n:usize, edges:I) -> Result<Self, InstanceError>
    where I: IntoIterator<Item=(usize, VertexId, VertexId)> {
        let mut adj_list:Vec<Vec<VertexId>> = vec![Vec::new() ; n];
        for (line, a, b) in edges {
            for v in [a, b].iter() {
                if *v >= n {
                    return Err(InstanceError::VertexOutOfRange { line, vertex: *v, nb_vertices: n });
                }
            }
            if a == b {
                return Err(InstanceError::SelfLoop { line, vertex: a });
            }
            adj_list[a].push(b);
            adj_list[b].push(a);
        }
        for neighbors in adj_list.iter_mut() {
            neighbors.sort_unstable();
            neighbors.dedup();
        }
        let edges = Self::build_edges(&adj_list);
        Ok(Self { n, edges, adj_list })
    }

    /// builds the edge list
    fn build_edges(adj_list:&[Vec<VertexId>]) -> Vec<(VertexId,VertexId)> {
        let mut res = Vec::new();
        for (i,l) in adj_list.iter().enumerate() {
            for j in l {
                if i < *j {
                    res.push((i,*j));
                }
            }
        }
        res
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_cycle() {
        let inst = CompactInstance::from_edges(4, &[(0,1), (1,2), (2,3), (3,0)]).unwrap();
        assert_eq!(inst.nb_vertices(), 4);
        assert_eq!(inst.nb_edges(), 4);
        assert_eq!(inst.neighbors(0), &[1,3]);
        assert_eq!(inst.degree(2), 2);
        assert_eq!(inst.neighbors(3), &[0,2]);
        assert_eq!(inst.edges(), &[(0,1), (0,3), (1,2), (2,3)]);
    }

    #[test]
    fn test_duplicate_edges_collapse() {
        let inst = CompactInstance::from_edges(3, &[(0,1), (1,0), (0,1), (1,2)]).unwrap();
        assert_eq!(inst.nb_edges(), 2);
        assert_eq!(inst.neighbors(1), &[0,2]);
        assert_eq!(inst.neighbors(0), &[1]);
    }

    #[test]
    fn test_symmetric_adjacency() {
        let inst = CompactInstance::from_edges(5, &[(0,4), (3,1), (2,4)]).unwrap();
        for u in inst.vertices() {
            for v in inst.neighbors(u) {
                assert!(inst.neighbors(*v).contains(&u));
            }
        }
    }

    #[test]
    fn test_invalid_edges() {
        assert!(matches!(
            CompactInstance::from_edges(3, &[(0,3)]),
            Err(InstanceError::VertexOutOfRange { vertex: 3, nb_vertices: 3, .. })
        ));
        assert!(matches!(
            CompactInstance::from_edges(3, &[(1,1)]),
            Err(InstanceError::SelfLoop { vertex: 1, .. })
        ));
    }

    #[test]
    fn test_large_sparse_graph() {
        let n = 200_000;
        let edges:Vec<(usize,usize)> = (1..n).map(|i| (i-1, i)).collect();
        let inst = CompactInstance::from_edges(n, &edges).unwrap();
        assert_eq!(inst.nb_vertices(), n);
        assert_eq!(inst.nb_edges(), n-1);
        assert_eq!(inst.neighbors(0), &[1]);
        assert_eq!(inst.neighbors(n/2), &[n/2-1, n/2+1]);
        assert_eq!(inst.degree(n-1), 1);
    }

    #[test]
    fn test_empty_graph() {
        let inst = CompactInstance::from_edges(0, &[]).unwrap();
        assert_eq!(inst.nb_vertices(), 0);
        assert_eq!(inst.nb_edges(), 0);
        inst.display_statistics();
    }
}
