use crate::error::{Error, Result};
use crate::index::{NodeId, SuffixTree, WildcardIndex};
use crate::text::{Pattern, Symbol};

/// Where a literal segment falls among the sorted suffixes of the text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentProbe {
    /// Longest prefix of the segment that occurs in the text
    pub matched: usize,
    /// Odd key placed between leaf ranks where the segment would sort
    pub key: u64,
    /// Root-tree leaf whose suffix shares `matched` symbols with the segment
    pub anchor: NodeId,
}

impl SegmentProbe {
    fn before(tree: &SuffixTree, leaf: NodeId, matched: usize) -> Self {
        Self {
            matched,
            key: leaf_rank(tree, leaf) - 1,
            anchor: leaf,
        }
    }

    fn after(tree: &SuffixTree, leaf: NodeId, matched: usize) -> Self {
        Self {
            matched,
            key: leaf_rank(tree, leaf) + 1,
            anchor: leaf,
        }
    }

    /// Descend the root tree as far as the segment matches
    pub fn locate(tree: &SuffixTree, segment: &[Symbol]) -> Self {
        let mut node = tree.root();
        let mut matched = 0;

        loop {
            if matched == segment.len() {
                return Self::before(tree, tree.node(node).leftmost, matched);
            }
            let symbol = segment[matched];

            let Some(child) = tree.child(node, symbol) else {
                let smaller = tree
                    .node(node)
                    .children()
                    .iter()
                    .rev()
                    .find(|&&c| tree.first_symbol(c) < symbol);
                return match smaller {
                    Some(&s) => Self::after(tree, tree.node(s).rightmost, matched),
                    None => Self::before(tree, tree.node(node).leftmost, matched),
                };
            };

            let edge = tree.label_symbols(child);
            let common = edge
                .iter()
                .zip(&segment[matched..])
                .take_while(|(a, b)| a == b)
                .count();
            matched += common;

            if common < edge.len() && matched < segment.len() {
                return if segment[matched] > edge[common] {
                    Self::after(tree, tree.node(child).rightmost, matched)
                } else {
                    Self::before(tree, tree.node(child).leftmost, matched)
                };
            }
            node = child;
        }
    }
}

fn leaf_rank(tree: &SuffixTree, leaf: NodeId) -> u64 {
    tree.node(leaf).leaf().map_or(0, |l| l.rank)
}

/// Query execution plan: literal segments between wildcards and where each
/// segment sits in rank order
#[derive(Debug)]
pub struct QueryPlan<'p> {
    pub segments: Vec<&'p [Symbol]>,
    pub probes: Vec<SegmentProbe>,
}

impl<'p> QueryPlan<'p> {
    /// Validate the pattern against the index and plan its segments
    pub fn new(index: &WildcardIndex, pattern: &'p Pattern) -> Result<Self> {
        validate(index, pattern)?;
        let segments = pattern.segments();
        let probes = segments
            .iter()
            .map(|segment| SegmentProbe::locate(index.tree(), segment))
            .collect();
        Ok(Self { segments, probes })
    }

    /// Number of wildcards the plan consumes
    pub fn wildcards(&self) -> usize {
        self.segments.len() - 1
    }
}

/// Reject patterns the index cannot answer
pub fn validate(index: &WildcardIndex, pattern: &Pattern) -> Result<()> {
    if pattern.is_empty() {
        return Err(Error::EmptyPattern);
    }
    if pattern.symbols().iter().any(|s| s.is_end()) {
        return Err(Error::EndInPattern);
    }
    let wildcards = pattern.wildcard_count();
    let budget = index.config().wildcard_budget;
    if wildcards > budget as usize {
        return Err(Error::WildcardBudgetExceeded { wildcards, budget });
    }
    Ok(())
}
