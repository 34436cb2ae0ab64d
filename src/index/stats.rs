use super::WildcardIndex;
use serde::Serialize;
use std::fmt;

/// Index statistics
#[derive(Debug, Clone, Serialize)]
pub struct IndexStats {
    pub text_len: usize,
    pub wildcard_budget: u32,
    /// Nodes of the plain suffix tree
    pub root_tree_nodes: usize,
    pub root_tree_leaves: usize,
    /// Attached wildcard copies
    pub wildcard_trees: usize,
    /// Reachable nodes per nesting level, root tree first
    pub nodes_per_level: Vec<usize>,
    /// Arena slots, including nodes discarded while condensing copies
    pub arena_nodes: usize,
    pub ladders: usize,
    pub euler_tour_len: usize,
}

impl IndexStats {
    pub fn collect(index: &WildcardIndex) -> Self {
        let tree = index.tree();
        let root = index.subtrees()[0].node_count();

        // Nesting stops at the text length, well below a large budget
        let levels = index.subtrees().iter().map(|s| s.level()).max().unwrap_or(0) as usize + 1;
        let mut nodes_per_level = vec![0; levels];
        for subtree in index.subtrees() {
            nodes_per_level[subtree.level() as usize] += subtree.node_count();
        }

        Self {
            text_len: tree.text().len(),
            wildcard_budget: index.config().wildcard_budget,
            root_tree_nodes: root,
            root_tree_leaves: tree.node(tree.root()).leaf_count() as usize,
            wildcard_trees: index.subtrees().len() - 1,
            nodes_per_level,
            arena_nodes: tree.node_count(),
            ladders: index.subtrees().iter().map(|s| s.ladders().ladder_count()).sum(),
            euler_tour_len: index.lca().tour_len(),
        }
    }

    /// Nodes reachable from the root tree through any number of wildcard edges
    pub fn total_nodes(&self) -> usize {
        self.nodes_per_level.iter().sum()
    }
}

impl fmt::Display for IndexStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Index Statistics")?;
        writeln!(f, "================")?;
        writeln!(f)?;
        writeln!(f, "Text length:      {}", self.text_len)?;
        writeln!(f, "Wildcard budget:  {}", self.wildcard_budget)?;
        writeln!(f, "Suffix tree:      {} nodes, {} leaves", self.root_tree_nodes, self.root_tree_leaves)?;
        writeln!(f, "Wildcard trees:   {}", self.wildcard_trees)?;
        writeln!(f, "Ladders:          {}", self.ladders)?;
        writeln!(f, "Euler tour:       {}", self.euler_tour_len)?;
        writeln!(f)?;
        writeln!(f, "Nodes by level:")?;
        for (level, count) in self.nodes_per_level.iter().enumerate() {
            writeln!(f, "  {:<15} {}", level, count)?;
        }
        write!(f, "Total:            {} ({} arena slots)", self.total_nodes(), self.arena_nodes)
    }
}
