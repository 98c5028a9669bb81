//! Widget tree
//!
//! Arena of widget nodes with parent links. The tree answers the questions
//! the host cannot answer by itself:
//! - which widget is topmost at a screen position
//! - which widgets contain it, up to the root
//! - which subtrees are mounted, and which widget holds focus
//!
//! Nodes are never removed: screens are built once and kept for the life
//! of the process, so ids stay valid.

use crate::content::LessonId;
use crate::geometry::{Position, Rect};

/// Stable handle to a widget node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(usize);

/// What a button does when activated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonAction {
    OpenLesson(LessonId),
    Home,
    ShowQuiz,
    ShowLesson,
    CheckScore,
    SelectAnswer { question: usize, option: usize },
}

/// Widget role, used for activation and rendering decisions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    Root,
    Home,
    Screen(LessonId),
    Container,
    Surface,
    Label,
    Spacer,
    Image,
    Button(ButtonAction),
}

#[derive(Debug)]
struct WidgetNode {
    kind: WidgetKind,
    parent: Option<WidgetId>,
    children: Vec<WidgetId>,
    mounted: bool,
    bounds: Option<Rect>,
}

/// Arena of widgets rooted at a single [`WidgetKind::Root`] node
#[derive(Debug)]
pub struct WidgetTree {
    nodes: Vec<WidgetNode>,
    focus: Option<WidgetId>,
}

impl Default for WidgetTree {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetTree {
    pub fn new() -> Self {
        Self {
            nodes: vec![WidgetNode {
                kind: WidgetKind::Root,
                parent: None,
                children: Vec::new(),
                mounted: true,
                bounds: None,
            }],
            focus: None,
        }
    }

    pub fn root(&self) -> WidgetId {
        WidgetId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add a mounted child without bounds. Later children are drawn on top
    /// of earlier siblings.
    pub fn insert(&mut self, parent: WidgetId, kind: WidgetKind) -> WidgetId {
        let id = WidgetId(self.nodes.len());
        self.nodes.push(WidgetNode {
            kind,
            parent: Some(parent),
            children: Vec::new(),
            mounted: true,
            bounds: None,
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn kind(&self, id: WidgetId) -> Option<WidgetKind> {
        self.nodes.get(id.0).map(|n| n.kind)
    }

    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.nodes.get(id.0).and_then(|n| n.parent)
    }

    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.nodes
            .get(id.0)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn bounds(&self, id: WidgetId) -> Option<Rect> {
        self.nodes.get(id.0).and_then(|n| n.bounds)
    }

    /// Set screen bounds; `None` means not currently on screen
    pub fn set_bounds(&mut self, id: WidgetId, bounds: Option<Rect>) {
        if let Some(node) = self.nodes.get_mut(id.0) {
            node.bounds = bounds;
        }
    }

    pub fn mount(&mut self, id: WidgetId) {
        if let Some(node) = self.nodes.get_mut(id.0) {
            node.mounted = true;
        }
    }

    /// Hide a subtree. Focus inside it is dropped.
    pub fn unmount(&mut self, id: WidgetId) {
        if let Some(node) = self.nodes.get_mut(id.0) {
            node.mounted = false;
        }
        if let Some(focused) = self.focus {
            if self.ancestors(focused).any(|a| a == id) {
                self.focus = None;
            }
        }
    }

    pub fn is_mounted(&self, id: WidgetId) -> bool {
        self.nodes.get(id.0).is_some_and(|n| n.mounted)
    }

    /// Mounted and every ancestor mounted
    pub fn is_visible(&self, id: WidgetId) -> bool {
        id.0 < self.nodes.len() && self.ancestors(id).all(|a| self.nodes[a.0].mounted)
    }

    /// Walk from `id` (inclusive) to the root
    pub fn ancestors(&self, id: WidgetId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: (id.0 < self.nodes.len()).then_some(id),
        }
    }

    /// Topmost visible widget containing `position`.
    ///
    /// A child is only hit inside its own bounds and all of its ancestors'
    /// bounds, so content scrolled out of a viewport is never hit.
    pub fn widget_at(&self, position: Position) -> Option<WidgetId> {
        self.hit(self.root(), position)
    }

    fn hit(&self, id: WidgetId, position: Position) -> Option<WidgetId> {
        let node = &self.nodes[id.0];
        if !node.mounted || !node.bounds?.contains(position) {
            return None;
        }
        node.children
            .iter()
            .rev()
            .find_map(|&child| self.hit(child, position))
            .or(Some(id))
    }

    pub fn focused(&self) -> Option<WidgetId> {
        self.focus
    }

    /// Give focus to a visible widget. Returns false if it is hidden.
    pub fn set_focus(&mut self, id: WidgetId) -> bool {
        if !self.is_visible(id) {
            return false;
        }
        self.focus = Some(id);
        true
    }

    pub fn clear_focus(&mut self) {
        self.focus = None;
    }
}

/// Iterator over a widget and its ancestors
pub struct Ancestors<'a> {
    tree: &'a WidgetTree,
    next: Option<WidgetId>,
}

impl Iterator for Ancestors<'_> {
    type Item = WidgetId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_with_panel() -> (WidgetTree, WidgetId, WidgetId) {
        let mut tree = WidgetTree::new();
        let root = tree.root();
        tree.set_bounds(root, Some(Rect::new(0, 0, 80, 24)));
        let panel = tree.insert(root, WidgetKind::Container);
        tree.set_bounds(panel, Some(Rect::new(0, 5, 80, 10)));
        let label = tree.insert(panel, WidgetKind::Label);
        tree.set_bounds(label, Some(Rect::new(2, 6, 20, 1)));
        (tree, panel, label)
    }

    #[test]
    fn test_widget_at_returns_deepest() {
        let (tree, panel, label) = tree_with_panel();
        assert_eq!(tree.widget_at(Position::new(3, 6)), Some(label));
        assert_eq!(tree.widget_at(Position::new(40, 8)), Some(panel));
        assert_eq!(tree.widget_at(Position::new(40, 20)), Some(tree.root()));
        assert_eq!(tree.widget_at(Position::new(90, 20)), None);
    }

    #[test]
    fn test_later_sibling_is_on_top() {
        let (mut tree, panel, label) = tree_with_panel();
        let overlay = tree.insert(panel, WidgetKind::Image);
        tree.set_bounds(overlay, Some(Rect::new(0, 6, 10, 3)));
        assert_eq!(tree.widget_at(Position::new(3, 6)), Some(overlay));
        assert_eq!(tree.widget_at(Position::new(15, 6)), Some(label));
    }

    #[test]
    fn test_children_clipped_by_parent() {
        let (mut tree, panel, label) = tree_with_panel();
        // Label sticks out below the panel
        tree.set_bounds(label, Some(Rect::new(2, 14, 20, 4)));
        assert_eq!(tree.widget_at(Position::new(3, 14)), Some(label));
        assert_eq!(tree.widget_at(Position::new(3, 16)), Some(tree.root()));
        assert_ne!(tree.widget_at(Position::new(3, 16)), Some(panel));
    }

    #[test]
    fn test_unmounted_subtree_not_hit() {
        let (mut tree, panel, label) = tree_with_panel();
        tree.unmount(panel);
        assert_eq!(tree.widget_at(Position::new(3, 6)), Some(tree.root()));
        assert!(tree.is_mounted(label));
        assert!(!tree.is_visible(label));

        tree.mount(panel);
        assert_eq!(tree.widget_at(Position::new(3, 6)), Some(label));
    }

    #[test]
    fn test_ancestors_walk_to_root() {
        let (tree, panel, label) = tree_with_panel();
        let chain: Vec<_> = tree.ancestors(label).collect();
        assert_eq!(chain, vec![label, panel, tree.root()]);
    }

    #[test]
    fn test_focus_dropped_when_hidden() {
        let (mut tree, panel, label) = tree_with_panel();
        assert!(tree.set_focus(label));
        tree.unmount(panel);
        assert_eq!(tree.focused(), None);
        assert!(!tree.set_focus(label));
    }
}
