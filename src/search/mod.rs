//! Search procedures for the graph coloring problem.

/// vertex ordering strategies applied before a greedy coloring
pub mod vertex_order;

/// greedy sweep coloring (one independent set per color)
pub mod greedy_sweep;

/// randomized multi-trial search over vertex orders
pub mod trials;
