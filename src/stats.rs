//! Statistics and introspection for tries.
//!
//! Useful for checking structural invariants (every leaf is terminal, one terminal per stored key)
//! and for understanding how much prefix sharing a workload gets.

use std::collections::HashMap;

pub trait TrieStatsTrait {
    fn get_trie_stats(&self) -> TrieStats;
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TrieStats {
    /// Number of nodes with a given number of children.
    pub fanout: HashMap<usize, usize>,
    pub num_nodes: usize,
    pub num_edges: usize,
    pub num_terminals: usize,
    pub num_leaves: usize,
    /// Childless, non-terminal nodes other than the root. Always zero for a well-formed trie.
    pub num_dead_leaves: usize,
    /// Length of the longest root-to-node path.
    pub max_depth: usize,
}

pub(crate) fn update_trie_stats(
    stats: &mut TrieStats,
    num_children: usize,
    is_terminal: bool,
    is_root: bool,
    depth: usize,
) {
    stats.num_nodes += 1;
    stats.num_edges += num_children;
    *stats.fanout.entry(num_children).or_insert(0) += 1;
    if is_terminal {
        stats.num_terminals += 1;
    }
    if num_children == 0 {
        stats.num_leaves += 1;
        if !is_terminal && !is_root {
            stats.num_dead_leaves += 1;
        }
    }
    if depth > stats.max_depth {
        stats.max_depth = depth;
    }
}
