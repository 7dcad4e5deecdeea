//! Sidebar navigation tree with accordion semantics.
//!
//! The tree mirrors the server-rendered nested list: one node per `li`, the
//! parent being the closest enclosing `li`. Only branches (entries with a
//! nested list and a link) can expand. Opening a branch collapses every other
//! branch at the same level.

/// Index of a node inside its [`NavTree`].
pub type NodeId = usize;

/// A single sidebar entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavNode {
    /// Enclosing entry, `None` at the top level.
    pub parent: Option<NodeId>,

    /// Entries nested directly below this one.
    pub children: Vec<NodeId>,

    /// Whether this entry owns a collapsible child list.
    pub has_children: bool,

    /// Whether the child list is shown.
    pub expanded: bool,

    /// Whether this entry itself links to the active page.
    pub is_current: bool,
}

/// Keys handled on a branch link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    /// Enter or Space.
    Activate,
    /// ArrowRight.
    Open,
    /// ArrowLeft.
    Close,
}

impl NavKey {
    /// Map a `KeyboardEvent.key` value.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Enter" | " " => Some(Self::Activate),
            "ArrowRight" => Some(Self::Open),
            "ArrowLeft" => Some(Self::Close),
            _ => None,
        }
    }
}

/// What a click on a branch's link text should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkAction {
    /// Same-page anchor: toggle only, never navigate.
    Toggle,
    /// Let the browser follow the link.
    Navigate,
    /// Expand first, then follow the link after the reveal transition.
    RevealThenNavigate,
}

impl LinkAction {
    /// Classify a branch link by its `href` attribute.
    pub fn for_href(href: &str, reveal_before_navigate: bool) -> Self {
        if href.is_empty() || href.starts_with('#') {
            Self::Toggle
        } else if reveal_before_navigate {
            Self::RevealThenNavigate
        } else {
            Self::Navigate
        }
    }
}

/// Accordion state for one sidebar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavTree {
    nodes: Vec<NavNode>,
}

impl NavTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. Parents must be added before their children.
    pub fn push(&mut self, parent: Option<NodeId>, has_children: bool, is_current: bool) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(NavNode {
            parent,
            children: Vec::new(),
            has_children,
            expanded: false,
            is_current,
        });
        if let Some(parent) = parent {
            self.nodes[parent].children.push(id);
        }
        id
    }

    /// Get a node.
    pub fn node(&self, id: NodeId) -> Option<&NavNode> {
        self.nodes.get(id)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree has no entries.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Ids of all branches, in document order.
    pub fn branches(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.has_children)
            .map(|(id, _)| id)
    }

    /// Whether the branch is expanded.
    pub fn is_expanded(&self, id: NodeId) -> bool {
        self.nodes.get(id).is_some_and(|n| n.expanded)
    }

    /// Whether the entry or any descendant is the active page.
    pub fn contains_current(&self, id: NodeId) -> bool {
        let Some(node) = self.nodes.get(id) else {
            return false;
        };
        node.is_current || node.children.iter().any(|&c| self.contains_current(c))
    }

    /// Branches sharing the parent of `id`, excluding `id` itself.
    pub fn sibling_branches(&self, id: NodeId) -> Vec<NodeId> {
        let Some(node) = self.nodes.get(id) else {
            return Vec::new();
        };
        let parent = node.parent;
        self.branches()
            .filter(|&other| other != id && self.nodes[other].parent == parent)
            .collect()
    }

    /// Set a branch's expanded flag directly. Returns whether it changed.
    fn set_expanded(&mut self, id: NodeId, expanded: bool) -> bool {
        match self.nodes.get_mut(id) {
            Some(node) if node.has_children && node.expanded != expanded => {
                node.expanded = expanded;
                true
            }
            _ => false,
        }
    }

    /// Expand a branch after collapsing its open siblings.
    ///
    /// Returns the ids whose state changed.
    pub fn expand(&mut self, id: NodeId) -> Vec<NodeId> {
        if !self.nodes.get(id).is_some_and(|n| n.has_children) {
            return Vec::new();
        }
        let mut changed: Vec<NodeId> = self
            .sibling_branches(id)
            .into_iter()
            .filter(|&s| self.set_expanded(s, false))
            .collect();
        if self.set_expanded(id, true) {
            changed.push(id);
        }
        changed
    }

    /// Collapse a branch. Returns the ids whose state changed.
    pub fn collapse(&mut self, id: NodeId) -> Vec<NodeId> {
        if self.set_expanded(id, false) {
            vec![id]
        } else {
            Vec::new()
        }
    }

    /// Flip a branch. Opening follows accordion rules.
    pub fn toggle(&mut self, id: NodeId) -> Vec<NodeId> {
        if self.is_expanded(id) {
            self.collapse(id)
        } else {
            self.expand(id)
        }
    }

    /// Apply a keyboard action to a branch.
    pub fn apply_key(&mut self, id: NodeId, key: NavKey) -> Vec<NodeId> {
        match key {
            NavKey::Activate => self.toggle(id),
            NavKey::Open => self.expand(id),
            NavKey::Close => self.collapse(id),
        }
    }

    /// Reset every branch to collapsed and return the branches on the path to
    /// the active page. Those are revealed one frame later with [`reveal`].
    ///
    /// [`reveal`]: NavTree::reveal
    pub fn initialize(&mut self) -> Vec<NodeId> {
        let branches: Vec<NodeId> = self.branches().collect();
        for &id in &branches {
            self.nodes[id].expanded = false;
        }
        branches
            .into_iter()
            .filter(|&id| self.contains_current(id))
            .collect()
    }

    /// Expand the given branches without collapsing siblings, then enforce the
    /// single-open rule per level.
    pub fn reveal(&mut self, ids: &[NodeId]) -> Vec<NodeId> {
        let mut changed: Vec<NodeId> = ids
            .iter()
            .copied()
            .filter(|&id| self.set_expanded(id, true))
            .collect();
        for id in self.normalize() {
            if let Some(pos) = changed.iter().position(|&c| c == id) {
                changed.remove(pos);
            } else {
                changed.push(id);
            }
        }
        changed
    }

    /// Collapse extra open branches per level. Branches containing the active
    /// page all stay open; a level without one keeps its first open branch.
    /// Returns the ids that were collapsed.
    pub fn normalize(&mut self) -> Vec<NodeId> {
        let mut collapsed = Vec::new();
        let mut seen_parents: Vec<Option<NodeId>> = Vec::new();
        let open: Vec<NodeId> = self.branches().filter(|&id| self.nodes[id].expanded).collect();

        for &id in &open {
            let parent = self.nodes[id].parent;
            if seen_parents.contains(&parent) {
                continue;
            }
            seen_parents.push(parent);

            let group: Vec<NodeId> = open
                .iter()
                .copied()
                .filter(|&o| self.nodes[o].parent == parent)
                .collect();
            if group.len() < 2 {
                continue;
            }
            let mut keep: Vec<NodeId> = group
                .iter()
                .copied()
                .filter(|&o| self.contains_current(o))
                .collect();
            if keep.is_empty() {
                keep.push(group[0]);
            }
            for other in group {
                if !keep.contains(&other) && self.set_expanded(other, false) {
                    collapsed.push(other);
                }
            }
        }
        collapsed
    }

    /// Whether any two sibling branches are open at once.
    pub fn has_open_siblings(&self) -> bool {
        self.branches().filter(|&id| self.nodes[id].expanded).any(|id| {
            self.sibling_branches(id)
                .into_iter()
                .any(|s| self.nodes[s].expanded)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two top-level branches `a` and `b`, `a` with nested branch `a1` and
    /// leaf `a2`; `b` has leaf `b1`. Returns (tree, a, a1, b, b1).
    fn sample(current_leaf_in_b: bool) -> (NavTree, NodeId, NodeId, NodeId, NodeId) {
        let mut tree = NavTree::new();
        let a = tree.push(None, true, false);
        let a1 = tree.push(Some(a), true, false);
        tree.push(Some(a1), false, false);
        tree.push(Some(a), false, false);
        let b = tree.push(None, true, false);
        let b1 = tree.push(Some(b), false, current_leaf_in_b);
        tree.push(None, false, false);
        (tree, a, a1, b, b1)
    }

    #[test]
    fn test_toggle_flips() {
        let (mut tree, a, ..) = sample(false);
        assert_eq!(tree.toggle(a), vec![a]);
        assert!(tree.is_expanded(a));
        assert_eq!(tree.toggle(a), vec![a]);
        assert!(!tree.is_expanded(a));
    }

    #[test]
    fn test_opening_collapses_siblings() {
        let (mut tree, a, _, b, _) = sample(false);
        tree.expand(a);
        let changed = tree.expand(b);
        assert_eq!(changed, vec![a, b]);
        assert!(!tree.is_expanded(a));
        assert!(tree.is_expanded(b));
        assert!(!tree.has_open_siblings());
    }

    #[test]
    fn test_opening_nested_keeps_parent_open() {
        let (mut tree, a, a1, ..) = sample(false);
        tree.expand(a);
        tree.expand(a1);
        assert!(tree.is_expanded(a));
        assert!(tree.is_expanded(a1));
    }

    #[test]
    fn test_leaves_never_expand() {
        let (mut tree, _, _, _, b1) = sample(false);
        assert!(tree.expand(b1).is_empty());
        assert!(tree.toggle(b1).is_empty());
        assert!(!tree.is_expanded(b1));
    }

    #[test]
    fn test_keys() {
        assert_eq!(NavKey::from_key("Enter"), Some(NavKey::Activate));
        assert_eq!(NavKey::from_key(" "), Some(NavKey::Activate));
        assert_eq!(NavKey::from_key("ArrowRight"), Some(NavKey::Open));
        assert_eq!(NavKey::from_key("ArrowLeft"), Some(NavKey::Close));
        assert_eq!(NavKey::from_key("Tab"), None);

        let (mut tree, a, _, b, _) = sample(false);
        tree.apply_key(a, NavKey::Open);
        tree.apply_key(b, NavKey::Open);
        assert!(!tree.is_expanded(a));
        tree.apply_key(b, NavKey::Close);
        assert!(!tree.is_expanded(b));
        tree.apply_key(b, NavKey::Activate);
        assert!(tree.is_expanded(b));
    }

    #[test]
    fn test_initialize_returns_current_path() {
        let (mut tree, a, _, b, _) = sample(true);
        tree.expand(a);
        let reveal = tree.initialize();
        assert_eq!(reveal, vec![b]);
        assert!(!tree.is_expanded(a));
        assert!(!tree.is_expanded(b));

        assert_eq!(tree.reveal(&reveal), vec![b]);
        assert!(tree.is_expanded(b));
    }

    #[test]
    fn test_initialize_nested_current() {
        let mut tree = NavTree::new();
        let top = tree.push(None, true, false);
        let mid = tree.push(Some(top), true, false);
        tree.push(Some(mid), false, true);
        let reveal = tree.initialize();
        assert_eq!(reveal, vec![top, mid]);
        tree.reveal(&reveal);
        assert!(tree.is_expanded(top) && tree.is_expanded(mid));
    }

    #[test]
    fn test_normalize_prefers_current() {
        let (mut tree, a, _, b, _) = sample(true);
        // Stale markup left both open.
        tree.nodes[a].expanded = true;
        tree.nodes[b].expanded = true;
        assert_eq!(tree.normalize(), vec![a]);
        assert!(tree.is_expanded(b));
    }

    #[test]
    fn test_normalize_falls_back_to_first() {
        let (mut tree, a, _, b, _) = sample(false);
        tree.nodes[a].expanded = true;
        tree.nodes[b].expanded = true;
        assert_eq!(tree.normalize(), vec![b]);
        assert!(tree.is_expanded(a));
    }

    #[test]
    fn test_reveal_keeps_every_current_sibling_open() {
        let mut tree = NavTree::new();
        let a = tree.push(None, true, false);
        tree.push(Some(a), false, true);
        let b = tree.push(None, true, false);
        tree.push(Some(b), false, true);
        let c = tree.push(None, true, false);
        tree.push(Some(c), false, false);

        let pending = tree.initialize();
        assert_eq!(pending, vec![a, b]);
        assert_eq!(tree.reveal(&pending), vec![a, b]);
        assert!(tree.is_expanded(a));
        assert!(tree.is_expanded(b));

        tree.nodes[c].expanded = true;
        assert_eq!(tree.normalize(), vec![c]);
        assert!(tree.is_expanded(a) && tree.is_expanded(b));
    }

    #[test]
    fn test_link_action() {
        assert_eq!(LinkAction::for_href("#intro", false), LinkAction::Toggle);
        assert_eq!(LinkAction::for_href("", true), LinkAction::Toggle);
        assert_eq!(LinkAction::for_href("guide.html", false), LinkAction::Navigate);
        assert_eq!(
            LinkAction::for_href("guide.html", true),
            LinkAction::RevealThenNavigate
        );
    }
}
