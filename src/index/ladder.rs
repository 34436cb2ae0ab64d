//! Ladder decomposition for measured-ancestor queries
//!
//! Every node continues through its long child (the child on the deepest
//! downward path), which cuts each tree into disjoint long paths. Each path
//! is extended upward by as many string symbols as it spans, giving a
//! ladder. A doubling table of node-count ancestors moves a query onto a
//! ladder that reaches the target depth, and that ladder's predecessor index
//! over node depths finishes it.

use super::tree::SuffixTree;
use super::types::NodeId;
use crate::error::Result;
use crate::predecessor::PredecessorIndex;

/// A long path plus its upward extension, top first
#[derive(Debug, Clone)]
pub struct Ladder {
    nodes: Vec<NodeId>,
    /// String depth -> node
    heights: PredecessorIndex<NodeId>,
    top_depth: u32,
}

impl Ladder {
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn top_depth(&self) -> u32 {
        self.top_depth
    }
}

#[derive(Debug, Clone)]
pub struct LadderDecomposition {
    ladders: Vec<Ladder>,
    /// `jumps[j][local]`: ancestor `2^j` nodes up, clamped at the tree root
    jumps: Vec<Vec<NodeId>>,
}

impl LadderDecomposition {
    /// Decompose the tree whose preorder is `order` (root first) and record
    /// each node's ladder
    pub fn build(tree: &mut SuffixTree, order: &[NodeId]) -> Result<Self> {
        let root = order[0];
        let mut ladders = Vec::new();

        for &start in order {
            let is_path_top = match tree.node(start).parent {
                Some(p) if start != root => tree.node(p).long_child != Some(start),
                _ => true,
            };
            if !is_path_top {
                continue;
            }

            let mut path = vec![start];
            while let Some(next) = tree.node(path[path.len() - 1]).long_child {
                path.push(next);
            }
            let ladder_id = ladders.len() as u32;
            for &id in &path {
                tree.nodes[id.index()].ladder = ladder_id;
            }

            let top_depth = tree.node(start).depth;
            let span = tree.node(path[path.len() - 1]).depth - top_depth;
            let mut extension = Vec::new();
            let mut top = start;
            while top != root && top_depth - tree.node(top).depth < span {
                let Some(parent) = tree.node(top).parent else {
                    break;
                };
                extension.push(parent);
                top = parent;
            }
            extension.reverse();
            extension.extend(path);

            let heights = PredecessorIndex::build(
                extension
                    .iter()
                    .map(|&id| (tree.node(id).depth as u64, id))
                    .collect(),
            )?;
            ladders.push(Ladder {
                top_depth: tree.node(extension[0]).depth,
                nodes: extension,
                heights,
            });
        }

        let mut jumps: Vec<Vec<NodeId>> = vec![
            order
                .iter()
                .map(|&id| match tree.node(id).parent {
                    Some(p) if id != root => p,
                    _ => root,
                })
                .collect(),
        ];
        let mut reach = 1usize;
        while reach < order.len() {
            let prev = &jumps[jumps.len() - 1];
            let row = prev.iter().map(|&mid| prev[tree.node(mid).local as usize]).collect();
            jumps.push(row);
            reach *= 2;
        }

        Ok(Self { ladders, jumps })
    }

    pub fn ladder_count(&self) -> usize {
        self.ladders.len()
    }

    pub fn ladder_of(&self, tree: &SuffixTree, node: NodeId) -> &Ladder {
        &self.ladders[tree.node(node).ladder as usize]
    }

    /// The point `k` string symbols above node `x`.
    ///
    /// Returns the highest node `b` on the root path of `x` with
    /// `depth(b) >= depth(x) - k`, and how many symbols above `b` the point
    /// lies on its incoming edge.
    pub fn measured_ancestor(&self, tree: &SuffixTree, x: NodeId, k: u32) -> (NodeId, u32) {
        let x_depth = tree.node(x).depth;
        debug_assert!(k <= x_depth, "measured ancestor above the root");
        if k == 0 {
            return (x, 0);
        }
        let target = x_depth.saturating_sub(k);

        let mut y = x;
        loop {
            let ladder = self.ladder_of(tree, y);
            if ladder.top_depth <= target {
                let key = target as u64;
                let hit = match ladder.heights.get(key) {
                    Some(&b) => Some((key, b)),
                    None => ladder.heights.successor(key).map(|(d, &b)| (d, b)),
                };
                if let Some((depth, b)) = hit {
                    return (b, depth as u32 - target);
                }
            }

            let node = tree.node(y);
            match node.parent {
                Some(p) if tree.node(p).depth < target => return (y, node.depth - target),
                None => return (y, node.depth - target),
                _ => {}
            }

            // Longest jump that stays at or below the target depth
            let local = node.local as usize;
            let mut level = self.jumps.len() - 1;
            while level > 0 && tree.node(self.jumps[level][local]).depth < target {
                level -= 1;
            }
            y = self.jumps[level][local];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::types::TreeId;
    use crate::text::Text;

    fn walk_up(tree: &SuffixTree, x: NodeId, k: u32) -> (NodeId, u32) {
        let target = tree.node(x).depth() - k;
        let mut cur = x;
        while let Some(p) = tree.node(cur).parent() {
            if tree.node(p).depth() < target {
                break;
            }
            cur = p;
        }
        (cur, tree.node(cur).depth() - target)
    }

    fn decompose(s: &str) -> (SuffixTree, LadderDecomposition) {
        let mut tree = SuffixTree::build(Text::from(s));
        let root = tree.root();
        let order = tree.annotate(root, TreeId::ROOT);
        let ladders = LadderDecomposition::build(&mut tree, &order).unwrap();
        (tree, ladders)
    }

    #[test]
    fn test_matches_walking_up() {
        for text in ["BANANA", "MISSISSIPPI", "ABRACADABRA", "AAAAAAAAAA", "AB"] {
            let (tree, ladders) = decompose(text);
            for x in tree.preorder(tree.root()) {
                for k in 0..=tree.node(x).depth() {
                    assert_eq!(
                        ladders.measured_ancestor(&tree, x, k),
                        walk_up(&tree, x, k),
                        "text {} node {:?} k {}",
                        text,
                        x,
                        k
                    );
                }
            }
        }
    }

    #[test]
    fn test_every_node_on_exactly_one_path() {
        let (tree, ladders) = decompose("BANANABANANA");
        let nodes = tree.preorder(tree.root());
        for &id in &nodes {
            let ladder = ladders.ladder_of(&tree, id);
            assert!(ladder.nodes().contains(&id));
            assert!(ladder.top_depth() <= tree.node(id).depth());
        }
        // One path per leaf
        assert_eq!(ladders.ladder_count(), tree.node(tree.root()).leaf_count() as usize);
    }

    #[test]
    fn test_ladder_is_a_parent_chain() {
        let (tree, ladders) = decompose("ABRACADABRA");
        for id in tree.preorder(tree.root()) {
            let nodes = ladders.ladder_of(&tree, id).nodes();
            for pair in nodes.windows(2) {
                assert_eq!(tree.node(pair[1]).parent(), Some(pair[0]));
            }
        }
    }
}
