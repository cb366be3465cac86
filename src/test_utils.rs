//! Shared test helpers: small graphs and proptest strategies.

use proptest::prelude::*;

use crate::compact_instance::CompactInstance;

/// cycle 0-1-...-(n-1)-0
pub(crate) fn cycle(n:usize) -> CompactInstance {
    let edges:Vec<(usize,usize)> = (0..n).map(|i| (i, (i+1)%n)).collect();
    CompactInstance::from_edges(n, &edges).unwrap()
}

/// complete graph on n vertices
pub(crate) fn complete(n:usize) -> CompactInstance {
    let mut edges = Vec::new();
    for i in 0..n {
        for j in i+1..n {
            edges.push((i,j));
        }
    }
    CompactInstance::from_edges(n, &edges).unwrap()
}

/// graph with n vertices and no edge
pub(crate) fn edgeless(n:usize) -> CompactInstance {
    CompactInstance::from_edges(n, &[]).unwrap()
}

/// random simple graphs with up to 40 vertices (self-loops dropped, duplicates collapse)
pub(crate) fn graph_strategy() -> impl Strategy<Value=CompactInstance> {
    (1usize..40).prop_flat_map(|n| {
        prop::collection::vec((0..n, 0..n), 0..(3*n)).prop_map(move |pairs| {
            let edges:Vec<(usize,usize)> = pairs.into_iter().filter(|(a,b)| a != b).collect();
            CompactInstance::from_edges(n, &edges).unwrap()
        })
    })
}
