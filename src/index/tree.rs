//! Arena-backed compressed suffix tree
//!
//! The arena holds the root suffix tree and, once an index attaches them,
//! every wildcard copy. Navigation only ever follows `children`; wildcard
//! copies hang off `Node::wildcard` and are walked separately.

use super::builder::SuffixTreeBuilder;
use super::types::{Label, Leaf, Locus, Node, NodeId, TreeId};
use crate::text::{render, Symbol, Text};
use std::collections::VecDeque;
use std::fmt::Write as _;

/// Suffix tree over a terminated [`Text`]
#[derive(Debug, Clone)]
pub struct SuffixTree {
    text: Text,
    pub(crate) nodes: Vec<Node>,
    root: NodeId,
    /// Rank of the suffix starting at each offset (terminator suffix included)
    offset_to_rank: Vec<u64>,
    /// Root-tree leaf holding rank `2 * (i + 1)` at position `i`
    rank_to_leaf: Vec<NodeId>,
}

impl SuffixTree {
    /// Build with Ukkonen's algorithm and annotate the root tree
    pub fn build(text: Text) -> Self {
        let tree = SuffixTreeBuilder::new(text).build();
        tracing::debug!(
            text_len = tree.text.len(),
            nodes = tree.nodes.len(),
            "suffix tree built"
        );
        tree
    }

    pub(crate) fn from_parts(text: Text, nodes: Vec<Node>, root: NodeId) -> Self {
        let suffix_count = text.symbols().len();
        let mut tree = Self {
            text,
            nodes,
            root,
            offset_to_rank: vec![0; suffix_count],
            rank_to_leaf: vec![root; suffix_count],
        };

        for (i, node) in tree.nodes.iter().enumerate() {
            if let Some(leaf) = node.leaf {
                tree.offset_to_rank[leaf.offset as usize] = leaf.rank;
                tree.rank_to_leaf[rank_slot(leaf.rank)] = NodeId(i as u32);
            }
        }

        tree.annotate(root, TreeId::ROOT);
        tree
    }

    #[inline]
    pub fn text(&self) -> &Text {
        &self.text
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Total arena size, wildcard copies included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn rank_of_offset(&self, offset: usize) -> u64 {
        self.offset_to_rank[offset]
    }

    /// Root-tree leaf with the given (even) rank
    #[inline]
    pub fn leaf_with_rank(&self, rank: u64) -> NodeId {
        self.rank_to_leaf[rank_slot(rank)]
    }

    /// Symbols of the incoming edge of `id`
    #[inline]
    pub fn label_symbols(&self, id: NodeId) -> &[Symbol] {
        let label = self.node(id).label;
        self.text.slice(label.start as usize, label.len as usize)
    }

    #[inline]
    pub fn first_symbol(&self, id: NodeId) -> Symbol {
        self.text.at(self.node(id).label.start as usize)
    }

    /// Symbol `above` positions up the incoming edge of `node`, i.e. the next
    /// symbol a descent from that point would consume
    #[inline]
    pub(crate) fn next_symbol(&self, locus: Locus) -> Symbol {
        let label = self.node(locus.node).label;
        self.text.at((label.start + label.len - locus.above) as usize)
    }

    /// Child of `id` whose edge starts with `symbol`
    pub fn child(&self, id: NodeId, symbol: Symbol) -> Option<NodeId> {
        let children = &self.node(id).children;
        children
            .binary_search_by(|&c| self.first_symbol(c).cmp(&symbol))
            .ok()
            .map(|i| children[i])
    }

    /// Locus of a literal pattern, or `None` if it does not occur
    pub fn find(&self, pattern: &[Symbol]) -> Option<Locus> {
        self.find_from(Locus::at(self.root), pattern)
    }

    /// Continue a literal descent from `start`
    pub fn find_from(&self, start: Locus, pattern: &[Symbol]) -> Option<Locus> {
        let mut locus = start;
        let mut rest = pattern;

        while !rest.is_empty() {
            if locus.is_node() {
                let child = self.child(locus.node, rest[0])?;
                locus = Locus {
                    node: child,
                    above: self.node(child).label.len,
                };
            }
            let label = self.node(locus.node).label;
            let consumed = (label.len - locus.above) as usize;
            let edge = &self.label_symbols(locus.node)[consumed..];
            let n = edge.len().min(rest.len());
            if edge[..n] != rest[..n] {
                return None;
            }
            rest = &rest[n..];
            locus.above -= n as u32;
        }
        Some(locus)
    }

    /// Root offsets of every leaf at or below `node`
    pub fn leaf_offsets(&self, node: NodeId) -> impl Iterator<Item = usize> + '_ {
        self.preorder(node)
            .into_iter()
            .filter_map(|id| self.node(id).leaf.map(|leaf| leaf.offset as usize))
    }

    /// Sorted start offsets of a literal pattern
    pub fn find_offsets(&self, pattern: &[Symbol]) -> Vec<usize> {
        if pattern.is_empty() {
            return Vec::new();
        }
        let Some(locus) = self.find(pattern) else {
            return Vec::new();
        };
        let mut offsets: Vec<usize> = self.leaf_offsets(locus.node).collect();
        offsets.sort_unstable();
        offsets
    }

    /// Nodes of the tree rooted at `from` in preorder, wildcard copies excluded
    pub fn preorder(&self, from: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.node(id).children.iter().rev().copied());
        }
        order
    }

    /// Every root-to-leaf label in lexicographic order
    pub fn suffixes(&self) -> Vec<Vec<Symbol>> {
        self.suffixes_below(self.root, None)
    }

    /// Root-to-leaf labels below `node` skipping its centroid child
    pub fn suffixes_excluding_centroid(&self, node: NodeId) -> Vec<Vec<Symbol>> {
        self.suffixes_below(node, self.node(node).centroid)
    }

    fn suffixes_below(&self, node: NodeId, skip: Option<NodeId>) -> Vec<Vec<Symbol>> {
        let mut out = Vec::new();
        let mut stack: Vec<(NodeId, Vec<Symbol>)> = self
            .node(node)
            .children
            .iter()
            .rev()
            .filter(|&&c| Some(c) != skip)
            .map(|&c| (c, Vec::new()))
            .collect();
        if self.node(node).is_leaf() {
            stack.push((node, Vec::new()));
        }

        while let Some((id, mut prefix)) = stack.pop() {
            if id != node {
                prefix.extend_from_slice(self.label_symbols(id));
            }
            let n = self.node(id);
            if n.is_leaf() {
                out.push(prefix);
                continue;
            }
            for &c in n.children.iter().rev() {
                stack.push((c, prefix.clone()));
            }
        }
        out
    }

    /// Edge labels in preorder
    pub fn edge_labels_dfs(&self) -> Vec<String> {
        self.preorder(self.root)
            .into_iter()
            .skip(1)
            .map(|id| render(self.label_symbols(id)))
            .collect()
    }

    /// Edge labels level by level
    pub fn edge_labels_bfs(&self) -> Vec<String> {
        let mut out = Vec::new();
        let mut queue: VecDeque<NodeId> = self.node(self.root).children.iter().copied().collect();
        while let Some(id) = queue.pop_front() {
            out.push(render(self.label_symbols(id)));
            queue.extend(self.node(id).children.iter().copied());
        }
        out
    }

    /// Indented drawing of the tree rooted at `from`
    pub fn render(&self, from: NodeId) -> String {
        let mut out = String::new();
        let mut stack: Vec<(NodeId, usize)> = vec![(from, 0)];
        while let Some((id, indent)) = stack.pop() {
            let node = self.node(id);
            if id == from {
                out.push_str("(root)");
            } else {
                let _ = write!(out, "{:width$}{}", "", render(self.label_symbols(id)), width = indent);
            }
            if let Some(leaf) = node.leaf {
                let _ = write!(out, " [{}]", leaf.offset);
            }
            if let Some(tree) = node.wildcard {
                let _ = write!(out, " (*{})", tree.0);
            }
            out.push('\n');
            for &c in node.children.iter().rev() {
                stack.push((c, indent + 2));
            }
        }
        out
    }

    /// Append a node to the arena
    pub(crate) fn push_node(&mut self, parent: Option<NodeId>, label: Label) -> NodeId {
        debug_assert!(self.nodes.len() < u32::MAX as usize, "node arena full");
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new(parent, label));
        id
    }

    /// Fill the per-tree fields of every node below `root`.
    ///
    /// Returns the tree's nodes in preorder, so `order[node.local]` is the
    /// node itself.
    pub(crate) fn annotate(&mut self, root: NodeId, tree: TreeId) -> Vec<NodeId> {
        let order = self.preorder(root);
        let suffix_count = self.text.symbols().len() as u32;

        for (local, &id) in order.iter().enumerate() {
            let depth = match self.nodes[id.index()].parent {
                Some(p) if id != root => self.nodes[p.index()].depth + self.nodes[id.index()].label.len,
                _ => 0,
            };
            let node = &mut self.nodes[id.index()];
            node.tree = tree;
            node.local = local as u32;
            node.depth = depth;
        }

        for &id in order.iter().rev() {
            let idx = id.index();
            if self.nodes[idx].is_leaf() {
                let local_offset = suffix_count - self.nodes[idx].depth;
                let rank = self.offset_to_rank[local_offset as usize];
                let node = &mut self.nodes[idx];
                let offset = node.leaf.map_or(local_offset, |leaf| leaf.offset);
                node.leaf = Some(Leaf { offset, local_offset, rank });
                node.leaf_count = 1;
                node.leftmost = id;
                node.rightmost = id;
                node.centroid = None;
                node.max_height = 0;
                node.long_child = None;
                continue;
            }

            let children = &self.nodes[idx].children;
            let mut leaf_count = 0;
            let mut centroid: Option<(u32, NodeId)> = None;
            let mut long: Option<(u32, NodeId)> = None;
            for &c in children {
                let child = &self.nodes[c.index()];
                leaf_count += child.leaf_count;
                if centroid.is_none_or(|(best, _)| child.leaf_count > best) {
                    centroid = Some((child.leaf_count, c));
                }
                let height = child.label.len + child.max_height;
                if long.is_none_or(|(best, _)| height > best) {
                    long = Some((height, c));
                }
            }
            let leftmost = self.nodes[children[0].index()].leftmost;
            let rightmost = self.nodes[children[children.len() - 1].index()].rightmost;

            let node = &mut self.nodes[idx];
            node.leaf_count = leaf_count;
            node.centroid = centroid.map(|(_, c)| c);
            node.max_height = long.map_or(0, |(h, _)| h);
            node.long_child = long.map(|(_, c)| c);
            node.leftmost = leftmost;
            node.rightmost = rightmost;
        }

        order
    }
}

#[inline]
fn rank_slot(rank: u64) -> usize {
    debug_assert!(rank >= 2 && rank % 2 == 0, "leaf ranks are even and positive");
    (rank / 2 - 1) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn syms(s: &str) -> Vec<Symbol> {
        s.chars().map(Symbol::Char).collect()
    }

    #[test]
    fn test_suffixes_round_trip() {
        let tree = SuffixTree::build(Text::from("BANANA"));
        let got: Vec<String> = tree.suffixes().iter().map(|s| render(s)).collect();
        assert_eq!(got, vec!["$", "A$", "ANA$", "ANANA$", "BANANA$", "NA$", "NANA$"]);
    }

    #[test]
    fn test_find_offsets() {
        let tree = SuffixTree::build(Text::from("BANANA"));
        assert_eq!(tree.find_offsets(&syms("ANA")), vec![1, 3]);
        assert_eq!(tree.find_offsets(&syms("NAN")), vec![2]);
        assert_eq!(tree.find_offsets(&syms("A")), vec![1, 3, 5]);
        assert!(tree.find_offsets(&syms("BAB")).is_empty());
        assert!(tree.find_offsets(&syms("BANANAS")).is_empty());
    }

    #[test]
    fn test_find_stops_mid_edge() {
        let tree = SuffixTree::build(Text::from("BANANA"));
        let locus = tree.find(&syms("BAN")).unwrap();
        assert_eq!(render(tree.label_symbols(locus.node)), "BANANA$");
        assert_eq!(locus.above, 4);
        assert_eq!(tree.next_symbol(locus), Symbol::Char('A'));
    }

    #[test]
    fn test_annotations() {
        let tree = SuffixTree::build(Text::from("BANANA"));
        let root = tree.node(tree.root());
        assert_eq!(root.leaf_count(), 7);
        assert_eq!(root.depth(), 0);

        // "A" subtree has 3 leaves, more than any sibling
        let a = tree.child(tree.root(), Symbol::Char('A')).unwrap();
        assert_eq!(root.centroid(), Some(a));
        assert_eq!(tree.node(a).leaf_count(), 3);
        assert_eq!(tree.node(root.leftmost).leaf().unwrap().offset, 6);
        assert_eq!(tree.node(root.rightmost).leaf().unwrap().offset, 2);

        // Longest path from the root is the whole text
        assert_eq!(root.max_height, 7);
        assert_eq!(render(tree.label_symbols(root.long_child.unwrap())), "BANANA$");
    }

    #[test]
    fn test_rank_maps() {
        let tree = SuffixTree::build(Text::from("BANANA"));
        // $ < A$ < ANA$ < ANANA$ < BANANA$ < NA$ < NANA$
        let expected = [(6, 2), (5, 4), (3, 6), (1, 8), (0, 10), (4, 12), (2, 14)];
        for (offset, rank) in expected {
            assert_eq!(tree.rank_of_offset(offset), rank);
            let leaf = tree.leaf_with_rank(rank);
            assert_eq!(tree.node(leaf).leaf().unwrap().offset as usize, offset);
        }
    }

    #[test]
    fn test_suffixes_excluding_centroid() {
        let tree = SuffixTree::build(Text::from("BANANA"));
        let got: Vec<String> = tree
            .suffixes_excluding_centroid(tree.root())
            .iter()
            .map(|s| render(s))
            .collect();
        assert_eq!(got, vec!["$", "BANANA$", "NA$", "NANA$"]);
    }

    #[test]
    fn test_render_lists_leaves() {
        let tree = SuffixTree::build(Text::from("AB"));
        let drawing = tree.render(tree.root());
        assert!(drawing.starts_with("(root)\n"));
        assert!(drawing.contains("AB$ [0]"));
        assert!(drawing.contains("B$ [1]"));
    }
}
