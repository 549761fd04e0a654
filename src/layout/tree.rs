//! Shared solver tree and per-widget solver nodes.
//!
//! [`LayoutTree`] is a cheap clonable handle to one [`TaffyTree`]. Every widget
//! owns exactly one [`LayoutNode`], allocated from the tree when the widget is
//! constructed and removed from it when the node is dropped. Nothing else
//! creates or frees solver nodes, so the tree's node count equals the number
//! of live, attached widgets built against it.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use taffy::prelude::*;
use tracing::{debug, warn};

use crate::geometry::Bounds;

// ---------------------------------------------------------------------------
// Available
// ---------------------------------------------------------------------------

/// Space offered to a solve. `None` on an axis means unconstrained (an
/// intrinsic-size measurement).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Available {
    pub width: Option<f32>,
    pub height: Option<f32>,
}

impl Available {
    /// No constraint on either axis.
    pub const UNCONSTRAINED: Available = Available {
        width: None,
        height: None,
    };

    /// A definite width and height.
    pub const fn definite(width: f32, height: f32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
        }
    }

    fn to_taffy(self) -> taffy::geometry::Size<AvailableSpace> {
        let space = |v: Option<f32>| match v {
            Some(v) => AvailableSpace::Definite(v.max(0.0)),
            None => AvailableSpace::MaxContent,
        };
        taffy::geometry::Size {
            width: space(self.width),
            height: space(self.height),
        }
    }
}

// ---------------------------------------------------------------------------
// LayoutTree
// ---------------------------------------------------------------------------

/// Handle to the solver tree shared by every widget of an application.
#[derive(Clone)]
pub struct LayoutTree {
    inner: Rc<RefCell<TaffyTree<()>>>,
}

impl LayoutTree {
    /// Create an empty tree. Rounding is disabled so solved boxes keep their
    /// fractional pixel sizes.
    pub fn new() -> Self {
        let mut tree = TaffyTree::new();
        tree.disable_rounding();
        Self {
            inner: Rc::new(RefCell::new(tree)),
        }
    }

    /// Number of live solver nodes.
    pub fn node_count(&self) -> usize {
        self.inner
            .try_borrow()
            .map(|tree| tree.total_node_count())
            .unwrap_or(0)
    }

    /// Allocate a fresh leaf node with a default style. If the tree is
    /// busy the node is created detached: it takes part in no solve and every
    /// operation on it is skipped.
    pub fn create_node(&self) -> LayoutNode {
        let id = match self.inner.try_borrow_mut() {
            Ok(mut tree) => match tree.new_leaf(taffy::Style::default()) {
                Ok(id) => Some(id),
                Err(err) => {
                    warn!(%err, "failed to allocate layout node, widget detached");
                    None
                }
            },
            Err(_) => {
                warn!("layout tree busy, widget detached");
                None
            }
        };
        LayoutNode {
            tree: self.clone(),
            id,
        }
    }

    /// True if both handles point at the same solver tree.
    pub fn same_tree(&self, other: &LayoutTree) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Default for LayoutTree {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LayoutTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutTree")
            .field("nodes", &self.node_count())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// LayoutNode
// ---------------------------------------------------------------------------

/// One solver node, exclusively owned by one widget.
///
/// Dropping the node removes it from the solver tree. Parent/child links are
/// maintained by the owning container through [`insert_child`](Self::insert_child)
/// and [`remove_child`](Self::remove_child). A node that could not be
/// allocated is detached: [`id`](Self::id) is `None` and every operation on
/// it is a logged no-op.
pub struct LayoutNode {
    tree: LayoutTree,
    id: Option<NodeId>,
}

impl LayoutNode {
    /// The solver id of this node, or `None` if it is detached.
    pub fn id(&self) -> Option<NodeId> {
        self.id
    }

    pub fn is_detached(&self) -> bool {
        self.id.is_none()
    }

    /// The tree this node lives in.
    pub fn tree(&self) -> &LayoutTree {
        &self.tree
    }

    /// Run `f` against the solver tree. `None` if the node is detached or
    /// the tree is already borrowed.
    fn with_tree<T>(&self, f: impl FnOnce(&TaffyTree<()>, NodeId) -> T) -> Option<T> {
        let id = self.id?;
        let tree = self.tree.inner.try_borrow().ok()?;
        Some(f(&tree, id))
    }

    fn with_tree_mut<T>(
        &self,
        what: &str,
        f: impl FnOnce(&mut TaffyTree<()>, NodeId) -> T,
    ) -> Option<T> {
        let Some(id) = self.id else {
            debug!(what, "detached layout node, skipped");
            return None;
        };
        let Ok(mut tree) = self.tree.inner.try_borrow_mut() else {
            warn!(node = ?id, what, "layout tree busy, skipped");
            return None;
        };
        Some(f(&mut tree, id))
    }

    /// Replace the node's solver style.
    pub fn set_style(&self, style: taffy::Style) {
        self.with_tree_mut("set style", |tree, id| {
            if let Err(err) = tree.set_style(id, style) {
                warn!(node = ?id, %err, "failed to set layout style");
            }
        });
    }

    /// A copy of the node's current solver style.
    pub fn style(&self) -> Option<taffy::Style> {
        self.with_tree(|tree, id| tree.style(id).ok().cloned()).flatten()
    }

    /// Attach `child` as the `index`-th solver child of this node.
    pub fn insert_child(&self, index: usize, child: &LayoutNode) {
        let Some(child_id) = child.id else {
            debug!("detached layout child, not attached");
            return;
        };
        self.with_tree_mut("attach child", |tree, id| {
            let index = index.min(tree.child_count(id));
            if let Err(err) = tree.insert_child_at_index(id, index, child_id) {
                warn!(node = ?id, child = ?child_id, %err, "failed to attach layout child");
            }
        });
    }

    /// Detach `child` from this node. The child node stays alive.
    pub fn remove_child(&self, child: &LayoutNode) {
        let Some(child_id) = child.id else {
            return;
        };
        self.with_tree_mut("detach child", |tree, id| {
            if let Err(err) = tree.remove_child(id, child_id) {
                warn!(node = ?id, child = ?child_id, %err, "failed to detach layout child");
            }
        });
    }

    /// The solver children of this node, in order.
    pub fn children(&self) -> Vec<NodeId> {
        self.with_tree(|tree, id| tree.children(id).ok())
            .flatten()
            .unwrap_or_default()
    }

    /// Number of solver children.
    pub fn child_count(&self) -> usize {
        self.with_tree(|tree, id| tree.child_count(id)).unwrap_or(0)
    }

    /// Solve this node's subtree against `available`.
    ///
    /// `pin` fixes the node's own size on the given axes for the duration of
    /// this solve only; the stored style is restored afterwards. Returns false
    /// if the node could not be solved.
    pub fn solve(&self, available: Available, pin: taffy::geometry::Size<Option<f32>>) -> bool {
        self.with_tree_mut("solve", |tree, id| {
            let original = match tree.style(id) {
                Ok(style) => style.clone(),
                Err(err) => {
                    warn!(node = ?id, %err, "layout node missing, solve skipped");
                    return false;
                }
            };

            let pinned = pin.width.is_some() || pin.height.is_some();
            if pinned {
                let mut style = original.clone();
                if let Some(w) = pin.width {
                    style.size.width = Dimension::from_length(w.max(0.0));
                }
                if let Some(h) = pin.height {
                    style.size.height = Dimension::from_length(h.max(0.0));
                }
                let _ = tree.set_style(id, style);
            }

            let result = tree.compute_layout(id, available.to_taffy());

            if pinned {
                let _ = tree.set_style(id, original);
            }

            match result {
                Ok(()) => {
                    debug!(node = ?id, ?available, "solved layout");
                    true
                }
                Err(err) => {
                    warn!(node = ?id, %err, "layout solve failed");
                    false
                }
            }
        })
        .unwrap_or(false)
    }

    /// The last solved box of this node, relative to its parent.
    pub fn bounds(&self) -> Option<Bounds> {
        self.with_tree(|tree, id| {
            tree.layout(id).ok().map(|layout| {
                Bounds::new(
                    layout.location.x,
                    layout.location.y,
                    layout.size.width,
                    layout.size.height,
                )
            })
        })
        .flatten()
    }
}

impl Drop for LayoutNode {
    fn drop(&mut self) {
        let Some(id) = self.id else {
            return;
        };
        match self.tree.inner.try_borrow_mut() {
            Ok(mut tree) => {
                let _ = tree.remove(id);
            }
            Err(_) => warn!(node = ?id, "layout tree busy, solver node leaked"),
        }
    }
}

impl fmt::Debug for LayoutNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LayoutNode").field(&self.id).finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const NO_PIN: taffy::geometry::Size<Option<f32>> = taffy::geometry::Size {
        width: None,
        height: None,
    };

    fn row_style() -> taffy::Style {
        taffy::Style {
            flex_direction: FlexDirection::Row,
            ..Default::default()
        }
    }

    fn fixed(w: f32, h: f32) -> taffy::Style {
        taffy::Style {
            size: taffy::geometry::Size {
                width: Dimension::from_length(w),
                height: Dimension::from_length(h),
            },
            ..Default::default()
        }
    }

    fn ids(nodes: &[&LayoutNode]) -> Vec<NodeId> {
        nodes.iter().filter_map(|n| n.id()).collect()
    }

    #[test]
    fn create_and_drop_track_node_count() {
        let tree = LayoutTree::new();
        assert_eq!(tree.node_count(), 0);
        let a = tree.create_node();
        let b = tree.create_node();
        assert_eq!(tree.node_count(), 2);
        drop(a);
        assert_eq!(tree.node_count(), 1);
        drop(b);
        assert_eq!(tree.node_count(), 0);
    }

    #[test]
    fn insert_and_remove_children_in_order() {
        let tree = LayoutTree::new();
        let parent = tree.create_node();
        let a = tree.create_node();
        let b = tree.create_node();
        let c = tree.create_node();

        parent.insert_child(0, &a);
        parent.insert_child(1, &c);
        parent.insert_child(1, &b);
        assert_eq!(parent.children(), ids(&[&a, &b, &c]));

        parent.remove_child(&b);
        assert_eq!(parent.children(), ids(&[&a, &c]));
        assert_eq!(parent.child_count(), 2);
        assert_eq!(tree.node_count(), 4);
    }

    #[test]
    fn insert_index_past_end_appends() {
        let tree = LayoutTree::new();
        let parent = tree.create_node();
        let a = tree.create_node();
        parent.insert_child(10, &a);
        assert_eq!(parent.children(), ids(&[&a]));
    }

    #[test]
    fn solve_fixed_leaf() {
        let tree = LayoutTree::new();
        let node = tree.create_node();
        node.set_style(fixed(50.0, 20.0));
        assert!(node.solve(Available::definite(300.0, 300.0), NO_PIN));
        assert_eq!(node.bounds(), Some(Bounds::new(0.0, 0.0, 50.0, 20.0)));
    }

    #[test]
    fn pin_is_temporary() {
        let tree = LayoutTree::new();
        let node = tree.create_node();
        node.set_style(row_style());
        let pin = taffy::geometry::Size {
            width: Some(200.0),
            height: Some(100.0),
        };
        assert!(node.solve(Available::definite(200.0, 100.0), pin));
        let b = node.bounds().unwrap();
        assert_eq!((b.width, b.height), (200.0, 100.0));
        assert_eq!(node.style().unwrap().size.width, Dimension::AUTO);
    }

    #[test]
    fn unconstrained_solve_uses_content_size() {
        let tree = LayoutTree::new();
        let parent = tree.create_node();
        parent.set_style(row_style());
        let a = tree.create_node();
        a.set_style(fixed(40.0, 10.0));
        let b = tree.create_node();
        b.set_style(fixed(60.0, 30.0));
        parent.insert_child(0, &a);
        parent.insert_child(1, &b);

        assert!(parent.solve(Available::UNCONSTRAINED, NO_PIN));
        let bounds = parent.bounds().unwrap();
        assert_eq!(bounds.width, 100.0);
        assert_eq!(bounds.height, 30.0);
        assert_eq!(b.bounds().unwrap().x, 40.0);
    }

    #[test]
    fn dropping_child_detaches_it() {
        let tree = LayoutTree::new();
        let parent = tree.create_node();
        let a = tree.create_node();
        parent.insert_child(0, &a);
        drop(a);
        assert_eq!(parent.child_count(), 0);
        assert_eq!(tree.node_count(), 1);
    }

    #[test]
    fn node_created_while_tree_is_busy_is_detached() {
        let tree = LayoutTree::new();
        let parent = tree.create_node();
        let busy = tree.inner.borrow();
        let orphan = tree.create_node();
        drop(busy);

        assert!(orphan.is_detached());
        assert_eq!(tree.node_count(), 1);
        orphan.set_style(fixed(10.0, 10.0));
        assert!(!orphan.solve(Available::definite(50.0, 50.0), NO_PIN));
        assert_eq!(orphan.bounds(), None);
        parent.insert_child(0, &orphan);
        assert_eq!(parent.child_count(), 0);
        drop(orphan);
        assert_eq!(tree.node_count(), 1);
    }
}
