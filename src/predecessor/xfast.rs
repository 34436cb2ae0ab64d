//! X-fast trie over a static key set
//!
//! One hash table per bit level holds the prefixes present at that level.
//! Leaves form a doubly linked list in key order. An internal node either has
//! both children, or one child plus a shortcut to the nearest leaf on the
//! missing side (largest leaf of the left subtree when the right child is
//! missing, smallest leaf of the right subtree when the left one is).

use rustc_hash::FxHashMap;

/// Index of a leaf in key order
pub type LeafId = u32;

/// Leaf of the trie: a present key plus its neighbour links
#[derive(Debug, Clone, Copy)]
pub struct XFastLeaf {
    pub key: u64,
    pub prev: Option<LeafId>,
    pub next: Option<LeafId>,
}

/// What an internal node holds besides its (implicit) prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Links {
    /// Both children present; no shortcut
    Both,
    /// Only the left child; shortcut to the largest leaf below it
    LeftChild { shortcut: LeafId },
    /// Only the right child; shortcut to the smallest leaf below it
    RightChild { shortcut: LeafId },
}

#[derive(Debug, Clone, Copy)]
enum XFastNode {
    Internal(Links),
    Leaf(LeafId),
}

/// Static X-fast trie. Queries take O(log log U).
#[derive(Debug, Clone)]
pub struct XFastTrie {
    /// Number of key bits; level `bits` holds the leaves
    bits: u32,
    leaves: Vec<XFastLeaf>,
    /// `levels[l]` maps every present prefix of length `l` to its node
    levels: Vec<FxHashMap<u64, XFastNode>>,
}

impl XFastTrie {
    /// Build from keys that are already sorted and distinct.
    ///
    /// Callers validate the input; an empty slice is a logic error.
    pub(crate) fn from_sorted(keys: &[u64]) -> Self {
        debug_assert!(!keys.is_empty(), "x-fast trie over an empty key set");
        debug_assert!(keys.windows(2).all(|w| w[0] < w[1]), "keys must be sorted and distinct");

        let max_key = keys[keys.len() - 1];
        let bits = (u64::BITS - max_key.leading_zeros()).max(1);

        let leaves: Vec<XFastLeaf> = keys
            .iter()
            .enumerate()
            .map(|(i, &key)| XFastLeaf {
                key,
                prev: i.checked_sub(1).map(|p| p as LeafId),
                next: (i + 1 < keys.len()).then(|| (i + 1) as LeafId),
            })
            .collect();

        let mut levels: Vec<FxHashMap<u64, XFastNode>> =
            (0..=bits).map(|_| FxHashMap::default()).collect();

        for (i, &key) in keys.iter().enumerate() {
            levels[bits as usize].insert(key, XFastNode::Leaf(i as LeafId));
        }

        // Keys are sorted, so each prefix at a level covers a contiguous run
        for level in 0..bits {
            let mut run_start = 0;
            while run_start < keys.len() {
                let prefix = prefix_of(keys[run_start], level, bits);
                let mut run_end = run_start + 1;
                while run_end < keys.len() && prefix_of(keys[run_end], level, bits) == prefix {
                    run_end += 1;
                }

                let branch_bit = bits - level - 1;
                let has_left = (keys[run_start] >> branch_bit) & 1 == 0;
                let has_right = (keys[run_end - 1] >> branch_bit) & 1 == 1;
                let links = match (has_left, has_right) {
                    (true, true) => Links::Both,
                    (true, false) => Links::LeftChild { shortcut: (run_end - 1) as LeafId },
                    (false, true) => Links::RightChild { shortcut: run_start as LeafId },
                    (false, false) => unreachable!("prefix run without keys"),
                };
                levels[level as usize].insert(prefix, XFastNode::Internal(links));

                run_start = run_end;
            }
        }

        Self { bits, leaves, levels }
    }

    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Number of key bits covered by the trie
    pub fn bits(&self) -> u32 {
        self.bits
    }

    #[inline]
    pub fn has_key(&self, key: u64) -> bool {
        self.levels[self.bits as usize].contains_key(&key)
    }

    pub fn min(&self) -> u64 {
        self.leaves[0].key
    }

    pub fn max(&self) -> u64 {
        self.leaves[self.leaves.len() - 1].key
    }

    /// Largest key strictly smaller than `key`
    pub fn predecessor(&self, key: u64) -> Option<u64> {
        self.predecessor_leaf(key).map(|id| self.leaves[id as usize].key)
    }

    /// Smallest key strictly greater than `key`
    pub fn successor(&self, key: u64) -> Option<u64> {
        self.successor_leaf(key).map(|id| self.leaves[id as usize].key)
    }

    fn predecessor_leaf(&self, key: u64) -> Option<LeafId> {
        if self.beyond_universe(key) {
            return Some((self.leaves.len() - 1) as LeafId);
        }
        if let Some(id) = self.leaf_of(key) {
            return self.leaves[id as usize].prev;
        }
        let near = self.nearest_leaf(key);
        let leaf = &self.leaves[near as usize];
        if leaf.key < key { Some(near) } else { leaf.prev }
    }

    fn successor_leaf(&self, key: u64) -> Option<LeafId> {
        if self.beyond_universe(key) {
            return None;
        }
        if let Some(id) = self.leaf_of(key) {
            return self.leaves[id as usize].next;
        }
        let near = self.nearest_leaf(key);
        let leaf = &self.leaves[near as usize];
        if leaf.key > key { Some(near) } else { leaf.next }
    }

    #[inline]
    fn beyond_universe(&self, key: u64) -> bool {
        self.bits < u64::BITS && key >> self.bits != 0
    }

    #[inline]
    fn leaf_of(&self, key: u64) -> Option<LeafId> {
        match self.levels[self.bits as usize].get(&key) {
            Some(XFastNode::Leaf(id)) => Some(*id),
            _ => None,
        }
    }

    /// Follow the shortcut of the lowest present ancestor of an absent key.
    ///
    /// The returned leaf is the key's predecessor or successor.
    fn nearest_leaf(&self, key: u64) -> LeafId {
        // Binary search for the longest present prefix; level 0 always exists
        let (mut lo, mut hi) = (0u32, self.bits - 1);
        while lo < hi {
            let mid = lo + (hi - lo).div_ceil(2);
            if self.levels[mid as usize].contains_key(&prefix_of(key, mid, self.bits)) {
                lo = mid;
            } else {
                hi = mid - 1;
            }
        }

        match self.levels[lo as usize].get(&prefix_of(key, lo, self.bits)) {
            Some(XFastNode::Internal(Links::LeftChild { shortcut }))
            | Some(XFastNode::Internal(Links::RightChild { shortcut })) => *shortcut,
            // A node with both children would have a deeper matching prefix
            other => unreachable!("lowest ancestor without shortcut: {:?}", other),
        }
    }
}

/// The top `len` bits of a `bits`-wide key
#[inline]
fn prefix_of(key: u64, len: u32, bits: u32) -> u64 {
    if len == 0 { 0 } else { key >> (bits - len) }
}
