use super::planner::{QueryPlan, SegmentProbe};
use crate::error::{Error, Result};
use crate::index::{Locus, NodeId, TreeId, WildcardIndex};
use crate::text::{Pattern, Symbol};
use roaring::RoaringBitmap;

/// A point reached after matching a prefix of the pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub tree: TreeId,
    pub locus: Locus,
}

/// Query executor
pub struct QueryExecutor<'a> {
    index: &'a WildcardIndex,
}

impl<'a> QueryExecutor<'a> {
    pub fn new(index: &'a WildcardIndex) -> Self {
        Self { index }
    }

    /// Sorted start offsets of every occurrence of `pattern`
    pub fn execute(&self, pattern: &Pattern) -> Result<Vec<usize>> {
        let plan = QueryPlan::new(self.index, pattern)?;
        let matches = self.smart_matches(&plan)?;
        Ok(self.collect_offsets(&matches))
    }

    /// Same threading as [`execute`](Self::execute), locating each segment by
    /// a plain descent from the root of its tree
    pub fn execute_slow(&self, pattern: &Pattern) -> Result<Vec<usize>> {
        let plan = QueryPlan::new(self.index, pattern)?;
        let matches = self.thread(&plan, |tree, i| {
            let root = self.index.subtree(tree).root();
            self.slow_unrooted_lcp(Locus::at(root), plan.segments[i])
        })?;
        Ok(self.collect_offsets(&matches))
    }

    /// End points of all pattern matches, one per reachable tree
    pub fn smart_matches(&self, plan: &QueryPlan<'_>) -> Result<Vec<Match>> {
        self.thread(plan, |tree, i| {
            Ok(self.rooted_lcp(tree, plan.segments[i], &plan.probes[i]))
        })
    }

    /// Match segment after segment, starting each one where the previous one
    /// ended and consuming one wildcard in between.
    ///
    /// At a node the wildcard either enters the node's wildcard copy, where
    /// `rooted` places the next segment, or consumes the first symbol of the
    /// centroid edge. Mid-edge it consumes the next edge symbol. The
    /// terminator is never consumed.
    fn thread<F>(&self, plan: &QueryPlan<'_>, mut rooted: F) -> Result<Vec<Match>>
    where
        F: FnMut(TreeId, usize) -> Result<Option<Locus>>,
    {
        let tree = self.index.tree();
        let mut frontier: Vec<Match> = rooted(TreeId::ROOT, 0)?
            .map(|locus| Match { tree: TreeId::ROOT, locus })
            .into_iter()
            .collect();

        for (i, segment) in plan.segments.iter().enumerate().skip(1) {
            let mut next = Vec::with_capacity(frontier.len() * 2);
            for m in frontier {
                if m.locus.is_node() {
                    let node = tree.node(m.locus.node);
                    if let Some(copy) = node.wildcard() {
                        if let Some(locus) = rooted(copy, i)? {
                            next.push(Match { tree: copy, locus });
                        }
                    }
                    if let Some(centroid) = node.centroid() {
                        if !tree.first_symbol(centroid).is_end() {
                            let start = Locus {
                                node: centroid,
                                above: tree.node(centroid).label().len - 1,
                            };
                            if let Some(locus) = self.slow_unrooted_lcp(start, segment)? {
                                next.push(Match { tree: m.tree, locus });
                            }
                        }
                    }
                } else if !tree.next_symbol(m.locus).is_end() {
                    let start = Locus {
                        node: m.locus.node,
                        above: m.locus.above - 1,
                    };
                    if let Some(locus) = self.slow_unrooted_lcp(start, segment)? {
                        next.push(Match { tree: m.tree, locus });
                    }
                }
            }

            tracing::trace!(segment = i, candidates = next.len(), "segment threaded");
            frontier = next;
            if frontier.is_empty() {
                break;
            }
        }
        Ok(frontier)
    }

    /// Place a whole segment in `tree` with two rank lookups, one LCA and one
    /// measured-ancestor query.
    ///
    /// The leaves sharing the longest prefix with the segment are the rank
    /// neighbours of the probe key; of the two, the one with the deeper root
    /// tree LCA against the probe anchor wins. `None` if the segment does not
    /// occur in `tree`.
    pub fn rooted_lcp(&self, tree: TreeId, segment: &[Symbol], probe: &SegmentProbe) -> Option<Locus> {
        let subtree = self.index.subtree(tree);
        if segment.is_empty() {
            return Some(Locus::at(subtree.root()));
        }

        let (leaf, shared) = [subtree.ranks.predecessor(probe.key), subtree.ranks.successor(probe.key)]
            .into_iter()
            .flatten()
            .map(|(rank, &leaf)| (leaf, self.shared_prefix(rank, probe)))
            .max_by_key(|&(_, shared)| shared)?;
        if shared < segment.len() {
            return None;
        }

        let arena = self.index.tree();
        let k = arena.node(leaf).depth() - segment.len() as u32;
        let (node, above) = subtree.ladders().measured_ancestor(arena, leaf, k);
        Some(Locus { node, above })
    }

    /// Symbols the segment shares with the suffix of the given rank
    fn shared_prefix(&self, rank: u64, probe: &SegmentProbe) -> usize {
        let tree = self.index.tree();
        let leaf: NodeId = tree.leaf_with_rank(rank);
        let lca = self.index.lca().lca(tree, leaf, probe.anchor);
        (tree.node(lca).depth() as usize).min(probe.matched)
    }

    /// Match `segment` symbol by symbol from `start`
    pub fn slow_unrooted_lcp(&self, start: Locus, segment: &[Symbol]) -> Result<Option<Locus>> {
        let tree = self.index.tree();
        let edge_len = tree.node(start.node).label().len;
        if start.above > edge_len {
            return Err(Error::MalformedLocus {
                above: start.above as usize,
                edge_len: edge_len as usize,
            });
        }
        Ok(tree.find_from(start, segment))
    }

    /// Root offsets below every match, deduplicated and sorted
    pub fn collect_offsets(&self, matches: &[Match]) -> Vec<usize> {
        let tree = self.index.tree();
        let mut offsets = RoaringBitmap::new();
        for m in matches {
            offsets.extend(tree.leaf_offsets(m.locus.node).map(|o| o as u32));
        }
        offsets.iter().map(|o| o as usize).collect()
    }
}
