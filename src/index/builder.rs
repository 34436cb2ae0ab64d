//! Suffix tree builder
//!
//! Builds the suffix tree of a terminated text online with Ukkonen's
//! algorithm:
//! 1. Extend the tree one symbol per phase from an active point, splitting
//!    edges and chaining new internal nodes through suffix links
//! 2. Materialize the result into the arena: close open leaf edges, sort
//!    siblings by first symbol, number leaves in lexicographic order
//!
//! Amortized O(n) for a fixed alphabet (children are hashed by symbol).

use super::tree::SuffixTree;
use super::types::{Label, Leaf, Node, NodeId};
use crate::text::{Symbol, Text};
use rustc_hash::FxHashMap;

const ROOT: usize = 0;

/// Construction-time node
struct BuildNode {
    start: usize,
    /// Exclusive end; `None` for leaves, whose edges grow with the text
    end: Option<usize>,
    suffix_link: Option<usize>,
    children: FxHashMap<Symbol, usize>,
}

impl BuildNode {
    fn new(start: usize, end: Option<usize>) -> Self {
        Self {
            start,
            end,
            suffix_link: None,
            children: FxHashMap::default(),
        }
    }
}

/// Where the next symbol is inserted
#[derive(Debug, Clone, Copy)]
struct ActivePoint {
    node: usize,
    /// Text position of the first symbol of the active edge
    edge: usize,
    length: usize,
}

/// Ukkonen state threaded through the extension phases
pub struct SuffixTreeBuilder {
    text: Text,
    nodes: Vec<BuildNode>,
    active: ActivePoint,
    /// Suffixes still waiting to be inserted explicitly
    remainder: usize,
    /// Shared end of every open (leaf) edge
    global_end: usize,
}

impl SuffixTreeBuilder {
    pub fn new(text: Text) -> Self {
        let mut nodes = Vec::with_capacity(2 * text.symbols().len());
        nodes.push(BuildNode::new(0, Some(0)));
        Self {
            text,
            nodes,
            active: ActivePoint { node: ROOT, edge: 0, length: 0 },
            remainder: 0,
            global_end: 0,
        }
    }

    /// Run all phases and materialize the tree
    pub fn build(mut self) -> SuffixTree {
        for pos in 0..self.text.symbols().len() {
            self.extend(pos);
        }
        debug_assert_eq!(self.remainder, 0, "terminator must flush every suffix");
        self.materialize()
    }

    #[inline]
    fn edge_len(&self, node: usize) -> usize {
        let n = &self.nodes[node];
        n.end.unwrap_or(self.global_end) - n.start
    }

    fn new_node(&mut self, start: usize, end: Option<usize>) -> usize {
        self.nodes.push(BuildNode::new(start, end));
        self.nodes.len() - 1
    }

    /// Point the pending internal node's suffix link at `node`
    fn link_pending(&mut self, pending: &mut Option<usize>, node: usize) {
        if let Some(prev) = pending.take() {
            if prev != ROOT {
                self.nodes[prev].suffix_link = Some(node);
            }
        }
        *pending = Some(node);
    }

    /// One phase: make every suffix ending at `pos` present in the tree
    fn extend(&mut self, pos: usize) {
        let symbol = self.text.at(pos);
        self.global_end = pos + 1;
        self.remainder += 1;
        let mut pending: Option<usize> = None;

        while self.remainder > 0 {
            if self.active.length == 0 {
                self.active.edge = pos;
            }
            let edge_symbol = self.text.at(self.active.edge);

            match self.nodes[self.active.node].children.get(&edge_symbol).copied() {
                None => {
                    let leaf = self.new_node(pos, None);
                    let active_node = self.active.node;
                    self.nodes[active_node].children.insert(edge_symbol, leaf);
                    self.link_pending(&mut pending, active_node);
                }
                Some(next) => {
                    let len = self.edge_len(next);
                    if self.active.length >= len {
                        // Walk down past a whole edge and retry
                        self.active.edge += len;
                        self.active.length -= len;
                        self.active.node = next;
                        continue;
                    }

                    if self.text.at(self.nodes[next].start + self.active.length) == symbol {
                        // Already present: stays implicit until a later phase
                        self.active.length += 1;
                        let active_node = self.active.node;
                        self.link_pending(&mut pending, active_node);
                        break;
                    }

                    // Split the edge at the active point
                    let split_start = self.nodes[next].start;
                    let split = self.new_node(split_start, Some(split_start + self.active.length));
                    let active_node = self.active.node;
                    self.nodes[active_node].children.insert(edge_symbol, split);

                    let leaf = self.new_node(pos, None);
                    self.nodes[split].children.insert(symbol, leaf);

                    self.nodes[next].start += self.active.length;
                    let moved_symbol = self.text.at(self.nodes[next].start);
                    self.nodes[split].children.insert(moved_symbol, next);

                    self.link_pending(&mut pending, split);
                }
            }

            self.remainder -= 1;
            if self.active.node == ROOT && self.active.length > 0 {
                self.active.length -= 1;
                self.active.edge = pos + 1 - self.remainder;
            } else if self.active.node != ROOT {
                self.active.node = self.nodes[self.active.node].suffix_link.unwrap_or(ROOT);
            }
        }
    }

    /// Convert construction nodes into arena nodes.
    ///
    /// Siblings are ordered by first symbol, so a preorder walk meets the
    /// leaves in lexicographic order; leaf `i` gets rank `2 * (i + 1)`.
    fn materialize(self) -> SuffixTree {
        let Self { text, nodes, .. } = self;
        let total = text.symbols().len();
        debug_assert!(u32::try_from(total).is_ok(), "text positions must fit in u32");
        let mut arena: Vec<Node> = Vec::with_capacity(nodes.len());
        arena.push(Node::new(None, Label::default()));

        // (build node, arena id, string depth)
        let mut stack: Vec<(usize, NodeId, usize)> = vec![(ROOT, NodeId(0), 0)];
        let mut leaves_seen: u64 = 0;

        while let Some((build_id, arena_id, depth)) = stack.pop() {
            let mut children: Vec<(Symbol, usize)> = nodes[build_id]
                .children
                .iter()
                .map(|(&s, &c)| (s, c))
                .collect();
            children.sort_unstable_by_key(|&(s, _)| s);

            if children.is_empty() {
                let offset = (total - depth) as u32;
                arena[arena_id.index()].leaf = Some(Leaf {
                    offset,
                    local_offset: offset,
                    rank: 2 * (leaves_seen + 1),
                });
                leaves_seen += 1;
                continue;
            }

            let mut child_ids = Vec::with_capacity(children.len());
            for &(_, child) in &children {
                let node = &nodes[child];
                let len = node.end.unwrap_or(total) - node.start;
                debug_assert!(arena.len() < u32::MAX as usize, "node arena full");
                let id = NodeId(arena.len() as u32);
                arena.push(Node::new(
                    Some(arena_id),
                    Label::new(node.start as u32, len as u32),
                ));
                child_ids.push((child, id, depth + len));
            }
            arena[arena_id.index()].children = child_ids.iter().map(|&(_, id, _)| id).collect();

            // Reverse so the smallest child is expanded first
            stack.extend(child_ids.into_iter().rev());
        }

        SuffixTree::from_parts(text, arena, NodeId(0))
    }
}
