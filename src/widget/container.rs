//! Container children and the structural-mutation capability.
//!
//! A [`Container`] owns its children outright. The only way to add or remove
//! children is through [`ContainerMut`], which pairs the child list with the
//! owning widget's solver node so the two are always updated together: after
//! every operation the solver children of the node are, in order, the nodes of
//! the widget children.

use tracing::debug;

use crate::layout::{Axis, LayoutNode};
use crate::render::Backend;

use super::node::{Widget, WidgetError};

// ---------------------------------------------------------------------------
// Container
// ---------------------------------------------------------------------------

/// Ordered children of a row or column.
#[derive(Debug)]
pub struct Container {
    axis: Axis,
    children: Vec<Widget>,
}

impl Container {
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            children: Vec::new(),
        }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn children(&self) -> &[Widget] {
        &self.children
    }

    pub(crate) fn children_mut(&mut self) -> &mut [Widget] {
        &mut self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Rows draw children on one line; columns use the backend's natural flow.
    pub(crate) fn render(&self, ui: &mut dyn Backend) {
        for (i, child) in self.children.iter().enumerate() {
            if i > 0 && self.axis == Axis::Row {
                ui.same_line();
            }
            child.render(ui);
        }
    }
}

// ---------------------------------------------------------------------------
// ContainerMut
// ---------------------------------------------------------------------------

/// Mutable access to a container's children, obtained from
/// [`Widget::as_container_mut`].
pub struct ContainerMut<'a> {
    node: &'a LayoutNode,
    container: &'a mut Container,
}

impl<'a> ContainerMut<'a> {
    pub(crate) fn new(node: &'a LayoutNode, container: &'a mut Container) -> Self {
        Self { node, container }
    }

    pub fn axis(&self) -> Axis {
        self.container.axis
    }

    /// Append `child` as the last child.
    pub fn add_child(&mut self, child: Widget) -> Result<(), WidgetError> {
        if !child.layout_node().tree().same_tree(self.node.tree()) {
            return Err(WidgetError::ForeignTree(child.id().to_string()));
        }
        self.node.insert_child(self.container.children.len(), child.layout_node());
        debug!(child = child.id(), index = self.container.children.len(), "child attached");
        self.container.children.push(child);
        Ok(())
    }

    /// Detach the first child with `id` and hand it back; `None` if absent.
    pub fn remove_child(&mut self, id: &str) -> Option<Widget> {
        let index = self.container.children.iter().position(|c| c.id() == id)?;
        let child = self.container.children.remove(index);
        self.node.remove_child(child.layout_node());
        debug!(child = id, index, "child detached");
        Some(child)
    }

    /// Remove and drop every child.
    pub fn clear(&mut self) {
        for child in self.container.children.drain(..) {
            self.node.remove_child(child.layout_node());
        }
    }

    pub fn children(&self) -> &[Widget] {
        &self.container.children
    }

    pub fn len(&self) -> usize {
        self.container.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.container.children.is_empty()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutTree;

    fn solver_children_match(widget: &Widget) -> bool {
        let expected: Vec<_> = widget
            .children()
            .iter()
            .filter_map(|c| c.layout_node().id())
            .collect();
        widget.layout_node().children() == expected
    }

    #[test]
    fn add_remove_keeps_solver_children_in_sync() {
        let tree = LayoutTree::new();
        let mut col = Widget::column(&tree, "col");
        for id in ["a", "b", "c", "d"] {
            col.add_child(Widget::label(&tree, id, id)).unwrap();
            assert!(solver_children_match(&col));
        }

        let removed = col.remove_child("b").unwrap();
        assert_eq!(removed.id(), "b");
        assert!(solver_children_match(&col));

        col.add_child(removed).unwrap();
        assert!(solver_children_match(&col));
        let ids: Vec<_> = col.children().iter().map(Widget::id).collect();
        assert_eq!(ids, vec!["a", "c", "d", "b"]);
    }

    #[test]
    fn remove_unknown_is_noop() {
        let tree = LayoutTree::new();
        let mut row = Widget::row(&tree, "row");
        row.add_child(Widget::label(&tree, "a", "A")).unwrap();
        assert!(row.remove_child("zzz").is_none());
        assert_eq!(row.children().len(), 1);
        assert!(solver_children_match(&row));
    }

    #[test]
    fn remove_first_of_duplicates() {
        let tree = LayoutTree::new();
        let mut row = Widget::row(&tree, "row");
        row.add_child(Widget::label(&tree, "x", "one")).unwrap();
        row.add_child(Widget::label(&tree, "x", "two")).unwrap();
        let removed = row.remove_child("x").unwrap();
        assert_eq!(
            removed.downcast_ref::<crate::widgets::Label>().unwrap().text(),
            "one"
        );
        assert!(solver_children_match(&row));
    }

    #[test]
    fn removed_child_is_released_when_dropped() {
        let tree = LayoutTree::new();
        let mut row = Widget::row(&tree, "row");
        row.add_child(Widget::label(&tree, "a", "A")).unwrap();
        assert_eq!(tree.node_count(), 2);
        drop(row.remove_child("a"));
        assert_eq!(tree.node_count(), 1);
    }

    #[test]
    fn clear_drops_all_children() {
        let tree = LayoutTree::new();
        let mut row = Widget::row(&tree, "row");
        for id in ["a", "b"] {
            row.add_child(Widget::label(&tree, id, id)).unwrap();
        }
        let mut container = row.as_container_mut().unwrap();
        assert_eq!(container.len(), 2);
        container.clear();
        assert!(container.is_empty());
        assert_eq!(tree.node_count(), 1);
        assert!(solver_children_match(&row));
    }

    #[test]
    fn foreign_tree_child_is_rejected() {
        let tree = LayoutTree::new();
        let other = LayoutTree::new();
        let mut row = Widget::row(&tree, "row");
        let err = row.add_child(Widget::label(&other, "x", "")).unwrap_err();
        assert!(matches!(err, WidgetError::ForeignTree(_)));
        assert!(row.children().is_empty());
    }

    #[test]
    fn container_reports_axis() {
        let tree = LayoutTree::new();
        let mut row = Widget::row(&tree, "row");
        assert_eq!(row.as_container_mut().unwrap().axis(), Axis::Row);
        assert_eq!(Widget::column(&tree, "c").axis(), Some(Axis::Column));
    }
}
