pub mod builder;
pub mod ladder;
pub mod lca;
pub mod stats;
pub mod tree;
pub mod types;
pub mod wildcard;

pub use ladder::LadderDecomposition;
pub use lca::EulerLca;
pub use stats::IndexStats;
pub use tree::SuffixTree;
pub use types::*;

use crate::config::IndexConfig;
use crate::error::{Error, Result};
use crate::predecessor::PredecessorIndex;
use crate::text::Text;
use wildcard::attach_wildcard_subtrees;

/// Per-tree query structures
#[derive(Debug, Clone)]
pub struct Subtree {
    pub(crate) root: NodeId,
    pub(crate) anchor: Option<NodeId>,
    pub(crate) level: u32,
    pub(crate) node_count: usize,
    pub(crate) ladders: LadderDecomposition,
    /// Leaf rank -> leaf
    pub(crate) ranks: PredecessorIndex<NodeId>,
}

impl Subtree {
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Node carrying the wildcard edge into this tree
    pub fn anchor(&self) -> Option<NodeId> {
        self.anchor
    }

    /// Wildcard edges between the root tree and this one
    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn ladders(&self) -> &LadderDecomposition {
        &self.ladders
    }
}

/// Suffix tree augmented for wildcard queries.
///
/// Read-only once built; share it freely across threads.
#[derive(Debug, Clone)]
pub struct WildcardIndex {
    pub(crate) tree: SuffixTree,
    pub(crate) subtrees: Vec<Subtree>,
    pub(crate) lca: EulerLca,
    pub(crate) config: IndexConfig,
}

impl WildcardIndex {
    /// Build the suffix tree, attach wildcard copies up to the configured
    /// budget and prepare ladders and rank indexes for every tree.
    ///
    /// Offsets, edge labels and node ids are `u32`: texts with more than
    /// `u32::MAX` symbols (terminator included) are rejected with
    /// [`Error::TextTooLong`].
    pub fn build(text: Text, config: IndexConfig) -> Result<Self> {
        config.validate()?;
        check_text_len(text.symbols().len())?;

        let mut tree = SuffixTree::build(text);
        let lca = EulerLca::build(&tree);
        let layouts = attach_wildcard_subtrees(&mut tree, config.wildcard_budget);

        let mut subtrees = Vec::with_capacity(layouts.len());
        for layout in layouts {
            let ladders = LadderDecomposition::build(&mut tree, &layout.order)?;
            let ranks = PredecessorIndex::build(
                layout
                    .order
                    .iter()
                    .filter_map(|&id| tree.node(id).leaf().map(|leaf| (leaf.rank, id)))
                    .collect(),
            )?;
            subtrees.push(Subtree {
                root: layout.root,
                anchor: layout.anchor,
                level: layout.level,
                node_count: layout.order.len(),
                ladders,
                ranks,
            });
        }

        tracing::debug!(
            trees = subtrees.len(),
            arena = tree.node_count(),
            "wildcard index ready"
        );
        Ok(Self {
            tree,
            subtrees,
            lca,
            config,
        })
    }

    /// Build over a plain string with the given configuration
    pub fn from_text(text: &str, config: IndexConfig) -> Result<Self> {
        Self::build(Text::from(text), config)
    }

    #[inline]
    pub fn tree(&self) -> &SuffixTree {
        &self.tree
    }

    #[inline]
    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    #[inline]
    pub fn subtree(&self, id: TreeId) -> &Subtree {
        &self.subtrees[id.index()]
    }

    pub fn subtrees(&self) -> &[Subtree] {
        &self.subtrees
    }

    #[inline]
    pub fn lca(&self) -> &EulerLca {
        &self.lca
    }

    /// Summary counts of the built structures
    pub fn stats(&self) -> IndexStats {
        IndexStats::collect(self)
    }
}

fn check_text_len(len: usize) -> Result<()> {
    if u32::try_from(len).is_err() {
        return Err(Error::TextTooLong { len });
    }
    Ok(())
}
