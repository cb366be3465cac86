use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::color::{ColoringInstance, VertexId};

/** strategy used to order the vertices before the greedy sweep.
Shuffling strategies are the only source of diversity between repeated attempts.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VertexOrder {
    /// no reordering (vertex ids in increasing order)
    #[serde(rename = "none")]
    Natural,
    /// increasing degree (stable)
    #[serde(rename = "asc")]
    Ascending,
    /// decreasing degree (stable), a Welsh-Powell like order
    #[serde(rename = "desc")]
    Descending,
    /// decreasing degree, vertices of equal degree shuffled
    DescShuffle,
    /// increasing degree, vertices of equal degree shuffled
    AscShuffle,
    /// uniform random permutation
    Shuffle,
}

impl VertexOrder {
    /// every strategy, in the order of the default schedule
    pub const ALL:[VertexOrder ; 6] = [
        VertexOrder::Natural,
        VertexOrder::Ascending,
        VertexOrder::Descending,
        VertexOrder::DescShuffle,
        VertexOrder::AscShuffle,
        VertexOrder::Shuffle,
    ];

    /// name used on the command line and in the statistics
    pub fn name(&self) -> &'static str {
        match self {
            VertexOrder::Natural => "none",
            VertexOrder::Ascending => "asc",
            VertexOrder::Descending => "desc",
            VertexOrder::DescShuffle => "desc-shuffle",
            VertexOrder::AscShuffle => "asc-shuffle",
            VertexOrder::Shuffle => "shuffle",
        }
    }
}

impl fmt::Display for VertexOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// error returned when parsing an unknown strategy name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown vertex order {0:?} (valid: none, asc, desc, desc-shuffle, asc-shuffle, shuffle)")]
pub struct UnknownVertexOrder(pub String);

impl FromStr for VertexOrder {
    type Err = UnknownVertexOrder;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "natural" => Ok(VertexOrder::Natural),
            "asc" | "ascending" => Ok(VertexOrder::Ascending),
            "desc" | "descending" => Ok(VertexOrder::Descending),
            "desc-shuffle" => Ok(VertexOrder::DescShuffle),
            "asc-shuffle" => Ok(VertexOrder::AscShuffle),
            "shuffle" => Ok(VertexOrder::Shuffle),
            _ => Err(UnknownVertexOrder(s.to_string())),
        }
    }
}


/** returns a permutation of the vertices of the instance following the strategy.
The generator is only used by the shuffling strategies.
*/
pub fn order_vertices<R:Rng + ?Sized>(
    inst:&dyn ColoringInstance,
    order:VertexOrder,
    rng:&mut R
) -> Vec<VertexId> {
    let mut res:Vec<VertexId> = inst.vertices().collect();
    match order {
        VertexOrder::Natural => {},
        VertexOrder::Ascending => res.sort_by_key(|v| inst.degree(*v)),
        VertexOrder::Descending => res.sort_by_key(|v| Reverse(inst.degree(*v))),
        VertexOrder::DescShuffle => {
            res.sort_by_key(|v| Reverse(inst.degree(*v)));
            shuffle_degree_buckets(inst, &mut res, rng);
        },
        VertexOrder::AscShuffle => {
            res.sort_by_key(|v| inst.degree(*v));
            shuffle_degree_buckets(inst, &mut res, rng);
        },
        VertexOrder::Shuffle => res.shuffle(rng),
    }
    res
}

/** shuffles every maximal run of consecutive vertices sharing the same degree.
The degree at each position is unchanged.
*/
pub fn shuffle_degree_buckets<R:Rng + ?Sized>(
    inst:&dyn ColoringInstance,
    vertices:&mut [VertexId],
    rng:&mut R
) {
    let mut begin = 0;
    while begin < vertices.len() {
        let degree = inst.degree(vertices[begin]);
        let mut end = begin+1;
        while end < vertices.len() && inst.degree(vertices[end]) == degree { end += 1; }
        vertices[begin..end].shuffle(rng);
        begin = end;
    }
}
