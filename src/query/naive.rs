//! Exhaustive reference matcher
//!
//! Walks the root suffix tree symbol by symbol and branches into every
//! child at wildcard positions. Exponential in the number of wildcards; used
//! to check the indexed query paths.

use crate::index::{Locus, SuffixTree};
use crate::text::Symbol;
use roaring::RoaringBitmap;

/// Sorted start offsets of `pattern`, wildcards matching any non-terminator
pub fn naive_offsets(tree: &SuffixTree, pattern: &[Symbol]) -> Vec<usize> {
    if pattern.is_empty() {
        return Vec::new();
    }

    let mut offsets = RoaringBitmap::new();
    let mut stack = vec![(Locus::at(tree.root()), 0usize)];
    while let Some((locus, pos)) = stack.pop() {
        if pos == pattern.len() {
            offsets.extend(tree.leaf_offsets(locus.node).map(|o| o as u32));
            continue;
        }
        let symbol = pattern[pos];

        if locus.is_node() {
            for &child in tree.node(locus.node).children() {
                if symbol.accepts(tree.first_symbol(child)) {
                    let above = tree.node(child).label().len - 1;
                    stack.push((Locus { node: child, above }, pos + 1));
                }
            }
        } else if symbol.accepts(tree.next_symbol(locus)) {
            let above = locus.above - 1;
            stack.push((Locus { node: locus.node, above }, pos + 1));
        }
    }
    offsets.iter().map(|o| o as usize).collect()
}

/// Direct scan of the text; the ground truth for every query path
pub fn scan_offsets(text: &[Symbol], pattern: &[Symbol]) -> Vec<usize> {
    if pattern.is_empty() {
        return Vec::new();
    }
    text.windows(pattern.len())
        .enumerate()
        .filter(|(_, window)| window.iter().zip(pattern).all(|(&t, &p)| p.accepts(t)))
        .map(|(i, _)| i)
        .collect()
}
