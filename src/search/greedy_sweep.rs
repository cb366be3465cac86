use bit_set::BitSet;

use crate::color::{ColoringInstance, Solution, VertexId};

/// color of a vertex that has not been colored yet
pub const UNCOLORED:usize = 0;

/** coloring built by the greedy sweep.
colors[v] is 0 while v is uncolored, then a color in 1..=nb_colors.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepColoring {
    /// colors[v]: color of the vertex v
    colors: Vec<usize>,
    /// number of colors opened (largest color used)
    nb_colors: usize,
}

impl SweepColoring {
    /// creates an uncolored coloring for n vertices
    pub fn new(n:usize) -> Self {
        Self { colors: vec![UNCOLORED ; n], nb_colors: 0 }
    }

    /// uncolors every vertex
    pub fn reset(&mut self) {
        self.colors.iter_mut().for_each(|c| *c = UNCOLORED);
        self.nb_colors = 0;
    }

    /// number of colors used
    pub fn nb_colors(&self) -> usize { self.nb_colors }

    /// color of the vertex v (0 if uncolored)
    pub fn color(&self, v:VertexId) -> usize { self.colors[v] }

    /// colors of all vertices
    pub fn colors(&self) -> &[usize] { &self.colors }

    /// true iff v has a color
    pub fn is_colored(&self, v:VertexId) -> bool { self.colors[v] != UNCOLORED }

    /// true iff every vertex has a color
    pub fn is_complete(&self) -> bool { self.colors.iter().all(|c| *c != UNCOLORED) }

    /** partition form: res[c-1] lists (in increasing order) the vertices colored c.
    Uncolored vertices are left out. */
    pub fn to_solution(&self) -> Solution {
        let mut res:Solution = vec![vec![] ; self.nb_colors];
        for (v,c) in self.colors.iter().enumerate() {
            if *c != UNCOLORED {
                res[c-1].push(v);
            }
        }
        res
    }
}


/** greedy sweep coloring. Colors vertices one color class at a time:
1. take the next uncolored vertex v of the order and open a new color for it
2. forbid the neighbors of v for this color
3. scan all vertices by increasing id: each uncolored and non-forbidden vertex takes the
   color and forbids its own neighbors
4. go on with the next uncolored vertex of the order

The order only decides which vertex opens each color; the color classes are always filled
by increasing vertex id.

parameters:
 - inst: reference to an instance
 - order: permutation of the vertices
 - coloring: coloring to complete (vertices already colored are kept)
*/
pub fn greedy_sweep(inst:&dyn ColoringInstance, order:&[VertexId], coloring:&mut SweepColoring) {
    let n = inst.nb_vertices();
    debug_assert_eq!(coloring.colors.len(), n);
    let mut banned:BitSet = BitSet::with_capacity(n); // vertices that cannot take the current color
    for &v in order {
        if coloring.is_colored(v) { continue; }
        coloring.nb_colors += 1;
        let color = coloring.nb_colors;
        banned.clear();
        for u in inst.neighbors(v) { banned.insert(*u); }
        coloring.colors[v] = color;
        for u in 0..n {
            if coloring.colors[u] != UNCOLORED || banned.contains(u) { continue; }
            coloring.colors[u] = color;
            for w in inst.neighbors(u) { banned.insert(*w); }
        }
    }
}

/// colors the instance from scratch following the given order
pub fn greedy_sweep_from_order(inst:&dyn ColoringInstance, order:&[VertexId]) -> SweepColoring {
    let mut res = SweepColoring::new(inst.nb_vertices());
    greedy_sweep(inst, order, &mut res);
    res
}
