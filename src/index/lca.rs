//! Lowest common ancestors in the root tree
//!
//! An Euler tour records `(node depth, node)` on every visit; the LCA of two
//! nodes is the shallowest entry between their first visits. A sparse table
//! of power-of-two window minima answers that range-minimum query with two
//! overlapping lookups.

use super::tree::SuffixTree;
use super::types::{NodeId, TreeId};

#[derive(Debug, Clone)]
pub struct EulerLca {
    /// Visited nodes in tour order
    tour: Vec<NodeId>,
    /// Node-count depth of each tour entry
    depths: Vec<u32>,
    /// First tour position of each node, by local preorder id
    first: Vec<u32>,
    /// `table[j][i]`: tour position of the minimum over `[i, i + 2^j)`
    table: Vec<Vec<u32>>,
}

impl EulerLca {
    /// Preprocess the root tree in O(n log n)
    pub fn build(tree: &SuffixTree) -> Self {
        let root = tree.root();
        let node_count = tree.preorder(root).len();
        let mut tour = Vec::with_capacity(2 * node_count);
        let mut depths = Vec::with_capacity(2 * node_count);
        let mut first = vec![u32::MAX; node_count];

        // (node, node depth, next child to visit)
        let mut stack: Vec<(NodeId, u32, usize)> = vec![(root, 0, 0)];
        while let Some(top) = stack.last_mut() {
            let (id, depth) = (top.0, top.1);
            let local = tree.node(id).local as usize;
            if first[local] == u32::MAX {
                first[local] = tour.len() as u32;
            }
            tour.push(id);
            depths.push(depth);

            let children = tree.node(id).children();
            if top.2 < children.len() {
                let child = children[top.2];
                top.2 += 1;
                stack.push((child, depth + 1, 0));
            } else {
                stack.pop();
            }
        }

        let table = sparse_table(&depths);
        tracing::debug!(tour_len = tour.len(), levels = table.len(), "euler tour built");
        Self { tour, depths, first, table }
    }

    /// Number of entries in the Euler tour
    pub fn tour_len(&self) -> usize {
        self.tour.len()
    }

    /// Lowest common ancestor of two root-tree nodes.
    ///
    /// Nodes of wildcard copies are not on the tour; passing one is a bug.
    pub fn lca(&self, tree: &SuffixTree, u: NodeId, v: NodeId) -> NodeId {
        debug_assert_eq!(tree.node(u).tree(), TreeId::ROOT, "lca of a wildcard-copy node");
        debug_assert_eq!(tree.node(v).tree(), TreeId::ROOT, "lca of a wildcard-copy node");
        let a = self.first[tree.node(u).local as usize] as usize;
        let b = self.first[tree.node(v).local as usize] as usize;
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };

        let level = (usize::BITS - 1 - (hi - lo + 1).leading_zeros()) as usize;
        let left = self.table[level][lo];
        let right = self.table[level][hi + 1 - (1 << level)];
        let best = if self.depths[right as usize] < self.depths[left as usize] {
            right
        } else {
            left
        };
        self.tour[best as usize]
    }
}

fn sparse_table(depths: &[u32]) -> Vec<Vec<u32>> {
    let mut table: Vec<Vec<u32>> = vec![(0..depths.len() as u32).collect()];
    let mut width = 1;
    while 2 * width <= depths.len() {
        let prev = &table[table.len() - 1];
        let row: Vec<u32> = (0..=depths.len() - 2 * width)
            .map(|i| {
                let (l, r) = (prev[i], prev[i + width]);
                if depths[r as usize] < depths[l as usize] { r } else { l }
            })
            .collect();
        table.push(row);
        width *= 2;
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::{Symbol, Text};

    fn brute_lca(tree: &SuffixTree, u: NodeId, v: NodeId) -> NodeId {
        let mut path = Vec::new();
        let mut cur = Some(u);
        while let Some(id) = cur {
            path.push(id);
            cur = tree.node(id).parent();
        }
        let mut cur = Some(v);
        while let Some(id) = cur {
            if path.contains(&id) {
                return id;
            }
            cur = tree.node(id).parent();
        }
        tree.root()
    }

    #[test]
    fn test_banana_leaves() {
        let tree = SuffixTree::build(Text::from("BANANA"));
        let lca = EulerLca::build(&tree);

        let ana = tree.find(&[Symbol::Char('A'), Symbol::Char('N'), Symbol::Char('A')]).unwrap();
        let ana_leaves: Vec<NodeId> = tree.node(ana.node).children().to_vec();
        assert_eq!(lca.lca(&tree, ana_leaves[0], ana_leaves[1]), ana.node);

        let all = tree.preorder(tree.root());
        for &u in &all {
            for &v in &all {
                assert_eq!(lca.lca(&tree, u, v), brute_lca(&tree, u, v));
            }
        }
    }

    #[test]
    fn test_self_and_root() {
        let tree = SuffixTree::build(Text::from("MISSISSIPPI"));
        let lca = EulerLca::build(&tree);
        let root = tree.root();
        for id in tree.preorder(root) {
            assert_eq!(lca.lca(&tree, id, id), id);
            assert_eq!(lca.lca(&tree, root, id), root);
        }
        assert_eq!(lca.tour_len(), 2 * tree.preorder(root).len() - 1);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "wildcard-copy node")]
    fn test_rejects_wildcard_copy_nodes() {
        use crate::{IndexConfig, WildcardIndex};

        let index = WildcardIndex::from_text("BANANA", IndexConfig::with_budget(1)).unwrap();
        let tree = index.tree();
        let copy = index.subtrees()[1].root();
        index.lca().lca(tree, tree.root(), copy);
    }
}
