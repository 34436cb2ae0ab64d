//! Wildcard subtree augmentation
//!
//! Consuming one wildcard at node `v` can continue into any child of `v`
//! whose edge does not start with the terminator. The centroid child is
//! followed in place; every other child is covered by a copy of its subtree
//! with the first edge symbol removed. Removing that symbol leaves sibling
//! edges that may share a first symbol again, so the copy is re-condensed by
//! splitting off common prefixes until siblings are distinct.
//!
//! Copies get their own centroids and receive copies themselves while
//! wildcard budget remains.

use super::tree::SuffixTree;
use super::types::{Label, NodeId, TreeId};

/// Where a tree sits in the nesting
#[derive(Debug, Clone)]
pub(crate) struct TreeLayout {
    pub root: NodeId,
    /// Node whose wildcard edge leads here (`None` for the root tree)
    pub anchor: Option<NodeId>,
    /// Wildcard edges crossed from the root tree
    pub level: u32,
    /// Preorder of the tree's nodes
    pub order: Vec<NodeId>,
}

/// Attach wildcard copies breadth-first until every tree at nesting level
/// `budget` is reached. The root tree must already be annotated.
pub(crate) fn attach_wildcard_subtrees(tree: &mut SuffixTree, budget: u32) -> Vec<TreeLayout> {
    let root = tree.root();
    let mut layouts = vec![TreeLayout {
        root,
        anchor: None,
        level: 0,
        order: tree.preorder(root),
    }];

    let mut next = 0;
    while next < layouts.len() {
        let level = layouts[next].level;
        if level < budget {
            let anchors = layouts[next].order.clone();
            for v in anchors {
                let Some(copy_root) = wildcard_copy(tree, v) else {
                    continue;
                };
                let id = TreeId(layouts.len() as u32);
                let order = tree.annotate(copy_root, id);
                tree.nodes[v.index()].wildcard = Some(id);
                layouts.push(TreeLayout {
                    root: copy_root,
                    anchor: Some(v),
                    level: level + 1,
                    order,
                });
            }
        }
        next += 1;
    }

    tracing::debug!(
        trees = layouts.len(),
        arena = tree.node_count(),
        budget,
        "wildcard subtrees attached"
    );
    layouts
}

/// Build the centroid-excluded, first-symbol-stripped copy below `v`.
///
/// Returns `None` when nothing is left, which covers leaves, nodes whose only
/// non-centroid child is the terminator edge, and nodes with a single child.
fn wildcard_copy(tree: &mut SuffixTree, v: NodeId) -> Option<NodeId> {
    let node = tree.node(v);
    let centroid = node.centroid;
    let sources: Vec<NodeId> = node
        .children
        .iter()
        .copied()
        .filter(|&c| Some(c) != centroid)
        .collect();
    if sources.is_empty() {
        return None;
    }

    let copy_root = tree.push_node(None, Label::default());
    let mut top = Vec::new();
    for c in sources {
        let label = tree.node(c).label.skip(1);
        if label.len > 0 {
            top.push(clone_subtree(tree, c, copy_root, label));
        } else if !tree.node(c).is_leaf() {
            // One-symbol edge: its children hang directly off the copy root
            let grandchildren = tree.node(c).children.clone();
            for g in grandchildren {
                let label = tree.node(g).label;
                top.push(clone_subtree(tree, g, copy_root, label));
            }
        }
        // An emptied leaf edge was the bare terminator
    }

    if top.is_empty() {
        tree.nodes.truncate(copy_root.index());
        return None;
    }
    tree.nodes[copy_root.index()].children = top;
    condense(tree, copy_root);
    Some(copy_root)
}

/// Deep-copy the subtree of `src` under `parent` with a new top label.
///
/// Leaves keep their root-tree offset; everything else is recomputed when
/// the copy is annotated.
fn clone_subtree(tree: &mut SuffixTree, src: NodeId, parent: NodeId, label: Label) -> NodeId {
    let top = tree.push_node(Some(parent), label);
    tree.nodes[top.index()].leaf = tree.node(src).leaf;

    let mut stack = vec![(src, top)];
    while let Some((from, to)) = stack.pop() {
        let children = tree.node(from).children.clone();
        let mut copies = Vec::with_capacity(children.len());
        for c in children {
            let label = tree.node(c).label;
            let copy = tree.push_node(Some(to), label);
            tree.nodes[copy.index()].leaf = tree.node(c).leaf;
            copies.push(copy);
            stack.push((c, copy));
        }
        tree.nodes[to.index()].children = copies;
    }
    top
}

/// Merge sibling edges that share a first symbol, top-down from `root`.
///
/// Each run of clashing edges moves under a new node labelled with their
/// common prefix. An edge consumed entirely by that prefix hands its
/// children to the new node and is dropped; the new node is then condensed
/// in turn.
fn condense(tree: &mut SuffixTree, root: NodeId) {
    let mut pending = vec![root];
    while let Some(m) = pending.pop() {
        let mut children = std::mem::take(&mut tree.nodes[m.index()].children);
        children.sort_by_key(|&c| tree.first_symbol(c));

        let mut merged = Vec::with_capacity(children.len());
        let mut i = 0;
        while i < children.len() {
            let symbol = tree.first_symbol(children[i]);
            let mut j = i + 1;
            while j < children.len() && tree.first_symbol(children[j]) == symbol {
                j += 1;
            }
            if j - i == 1 {
                merged.push(children[i]);
                i = j;
                continue;
            }

            let group = &children[i..j];
            let head = tree.node(group[0]).label;
            let shared = group[1..]
                .iter()
                .map(|&c| {
                    let label = tree.node(c).label;
                    tree.text().common_prefix(
                        head.start as usize,
                        head.len as usize,
                        label.start as usize,
                        label.len as usize,
                    )
                })
                .min()
                .unwrap_or(head.len as usize) as u32;

            let joint = tree.push_node(Some(m), head.take(shared));
            let mut joint_children = Vec::new();
            for &c in group {
                let label = tree.node(c).label;
                if label.len == shared {
                    debug_assert!(!tree.node(c).is_leaf(), "two leaves spell the same suffix");
                    let lifted = std::mem::take(&mut tree.nodes[c.index()].children);
                    for &g in &lifted {
                        tree.nodes[g.index()].parent = Some(joint);
                    }
                    joint_children.extend(lifted);
                } else {
                    let moved = &mut tree.nodes[c.index()];
                    moved.label = label.skip(shared);
                    moved.parent = Some(joint);
                    joint_children.push(c);
                }
            }
            tree.nodes[joint.index()].children = joint_children;
            pending.push(joint);
            merged.push(joint);
            i = j;
        }

        tree.nodes[m.index()].children = merged;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::{render, Symbol, Text};

    fn strings_below(tree: &SuffixTree, root: NodeId) -> Vec<String> {
        let mut out: Vec<String> = tree
            .preorder(root)
            .into_iter()
            .filter(|&id| tree.node(id).is_leaf() && id != root)
            .map(|leaf| {
                let mut parts = Vec::new();
                let mut cur = leaf;
                while cur != root {
                    parts.push(render(tree.label_symbols(cur)));
                    cur = tree.node(cur).parent().unwrap();
                }
                parts.reverse();
                parts.concat()
            })
            .collect();
        out.sort();
        out
    }

    fn assert_condensed(tree: &SuffixTree, root: NodeId) {
        for id in tree.preorder(root) {
            let node = tree.node(id);
            let firsts: Vec<Symbol> = node.children().iter().map(|&c| tree.first_symbol(c)).collect();
            assert!(firsts.windows(2).all(|w| w[0] < w[1]), "siblings not distinct and sorted");
            for &c in node.children() {
                assert_eq!(tree.node(c).parent(), Some(id));
                assert!(tree.node(c).label().len > 0);
            }
            if id != root {
                assert!(node.is_leaf() || node.children().len() >= 2, "unary inner node");
            }
        }
    }

    #[test]
    fn test_root_copy_of_banana() {
        let mut tree = SuffixTree::build(Text::from("BANANA"));
        let layouts = attach_wildcard_subtrees(&mut tree, 1);
        let root = tree.root();
        let w = tree.node(root).wildcard().unwrap();
        let copy = &layouts[w.index()];
        assert_eq!(copy.anchor, Some(root));
        assert_eq!(copy.level, 1);

        // Centroid "A" excluded; "$" vanishes; BANANA$ -> ANANA$, NA.. -> A..
        assert_eq!(strings_below(&tree, copy.root), vec!["A$", "ANA$", "ANANA$"]);
        assert_condensed(&tree, copy.root);

        let leaf_offsets: Vec<u32> = tree
            .preorder(copy.root)
            .into_iter()
            .filter_map(|id| tree.node(id).leaf().map(|l| l.offset))
            .collect();
        let mut sorted = leaf_offsets.clone();
        sorted.sort_unstable();
        // Root offsets of NA$ (4), NANA$ (2), BANANA$ (0)
        assert_eq!(sorted, vec![0, 2, 4]);
    }

    #[test]
    fn test_copies_match_stripped_suffixes() {
        let mut tree = SuffixTree::build(Text::from("MISSISSIPPI"));
        let layouts = attach_wildcard_subtrees(&mut tree, 1);
        for layout in &layouts[1..] {
            let anchor = layout.anchor.unwrap();
            let mut expected: Vec<String> = tree
                .suffixes_excluding_centroid(anchor)
                .into_iter()
                .filter(|s| s.len() > 1)
                .map(|s| render(&s[1..]))
                .collect();
            expected.sort();
            assert_eq!(strings_below(&tree, layout.root), expected);
            assert_condensed(&tree, layout.root);
        }
    }

    #[test]
    fn test_nested_levels_follow_budget() {
        let mut tree = SuffixTree::build(Text::from("ABRACADABRA"));
        let layouts = attach_wildcard_subtrees(&mut tree, 2);
        assert!(layouts.iter().any(|l| l.level == 2));
        assert!(layouts.iter().all(|l| l.level <= 2));
        for layout in &layouts {
            for &id in &layout.order {
                let node = tree.node(id);
                assert_eq!(node.tree().index(), layouts.iter().position(|l| l.root == layout.root).unwrap());
                if layout.level == 2 {
                    assert!(node.wildcard().is_none());
                }
            }
        }
    }

    #[test]
    fn test_terminator_only_child_gets_no_copy() {
        // Root of "A": children "$" and "A$"; centroid is "$" (first max)
        let mut tree = SuffixTree::build(Text::from("A"));
        let layouts = attach_wildcard_subtrees(&mut tree, 1);
        let root = tree.root();
        assert_eq!(tree.first_symbol(tree.node(root).centroid().unwrap()), Symbol::End);
        assert_eq!(layouts.len(), 2);
        let copy = &layouts[1];
        assert_eq!(strings_below(&tree, copy.root), vec!["$"]);
    }

    #[test]
    fn test_budget_zero_attaches_nothing() {
        let mut tree = SuffixTree::build(Text::from("BANANA"));
        let before = tree.node_count();
        let layouts = attach_wildcard_subtrees(&mut tree, 0);
        assert_eq!(layouts.len(), 1);
        assert_eq!(tree.node_count(), before);
    }
}
