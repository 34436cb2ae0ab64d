//! Core types shared by the suffix tree and its auxiliary structures
//!
//! All nodes of the root tree and of every attached wildcard copy live in
//! one arena and are addressed by [`NodeId`]. Parent links, suffix links and
//! ladder references are plain ids, so cloning a subtree never has to chase
//! or duplicate them.

/// Index of a node in the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index of a tree: 0 is the root suffix tree, the rest are wildcard copies
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TreeId(pub(crate) u32);

impl TreeId {
    pub const ROOT: TreeId = TreeId(0);

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Edge label: `len` symbols of the indexed text starting at `start`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Label {
    pub start: u32,
    pub len: u32,
}

impl Label {
    #[inline]
    pub fn new(start: u32, len: u32) -> Self {
        Self { start, len }
    }

    /// The label with its first `n` symbols removed
    #[inline]
    pub fn skip(self, n: u32) -> Self {
        debug_assert!(n <= self.len);
        Self {
            start: self.start + n,
            len: self.len - n,
        }
    }

    /// The first `n` symbols of the label
    #[inline]
    pub fn take(self, n: u32) -> Self {
        debug_assert!(n <= self.len);
        Self {
            start: self.start,
            len: n,
        }
    }
}

/// A point in a tree: `above` symbols up the incoming edge of `node`.
///
/// `above == 0` means the point is the node itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Locus {
    pub node: NodeId,
    pub above: u32,
}

impl Locus {
    #[inline]
    pub fn at(node: NodeId) -> Self {
        Self { node, above: 0 }
    }

    #[inline]
    pub fn is_node(&self) -> bool {
        self.above == 0
    }
}

/// Per-leaf data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Leaf {
    /// Start of the matched suffix in the original text
    pub offset: u32,
    /// Start of the suffix spelled from this leaf's own tree root
    pub local_offset: u32,
    /// Doubled lexicographic rank of `local_offset` among all suffixes
    pub rank: u64,
}

/// A tree node
///
/// The incoming edge is stored on the child (`parent` + `label`). Fields
/// below `children` are filled by post-build passes and are read-only
/// afterwards.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) parent: Option<NodeId>,
    /// Label of the incoming edge (empty for tree roots)
    pub(crate) label: Label,
    /// Children sorted by the first symbol of their labels
    pub(crate) children: Vec<NodeId>,
    /// Root of the wildcard copy reached by consuming one wildcard here
    pub(crate) wildcard: Option<TreeId>,
    pub(crate) leaf: Option<Leaf>,

    pub(crate) tree: TreeId,
    /// Preorder position inside its own tree
    pub(crate) local: u32,
    /// String depth inside its own tree
    pub(crate) depth: u32,
    pub(crate) leaf_count: u32,
    /// Heaviest child by leaf count
    pub(crate) centroid: Option<NodeId>,
    /// Longest downward string distance to a leaf
    pub(crate) max_height: u32,
    /// Child on the longest downward path
    pub(crate) long_child: Option<NodeId>,
    pub(crate) leftmost: NodeId,
    pub(crate) rightmost: NodeId,
    /// Ladder of the long path this node lies on
    pub(crate) ladder: u32,
}

impl Node {
    pub(crate) fn new(parent: Option<NodeId>, label: Label) -> Self {
        Self {
            parent,
            label,
            children: Vec::new(),
            wildcard: None,
            leaf: None,
            tree: TreeId::ROOT,
            local: 0,
            depth: 0,
            leaf_count: 0,
            centroid: None,
            max_height: 0,
            long_child: None,
            leftmost: NodeId(0),
            rightmost: NodeId(0),
            ladder: 0,
        }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[inline]
    pub fn label(&self) -> Label {
        self.label
    }

    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    #[inline]
    pub fn leaf(&self) -> Option<&Leaf> {
        self.leaf.as_ref()
    }

    #[inline]
    pub fn leaf_count(&self) -> u32 {
        self.leaf_count
    }

    #[inline]
    pub fn centroid(&self) -> Option<NodeId> {
        self.centroid
    }

    #[inline]
    pub fn wildcard(&self) -> Option<TreeId> {
        self.wildcard
    }

    #[inline]
    pub fn tree(&self) -> TreeId {
        self.tree
    }
}
