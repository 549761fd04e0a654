//! Diagnostics and structural validation.
//!
//! Translation never fails on a bad attribute, an unknown binding or a
//! questionable structure. Those findings are collected as [`Diagnostic`]s in
//! a [`Report`] and logged; the widget tree is still produced and used.

use tracing::warn;

use crate::widget::Widget;

/// A non-fatal finding about a document.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Diagnostic {
    #[error("unknown element <{tag}> skipped")]
    UnknownElement { tag: String },
    #[error("{element}: invalid {attribute}=\"{value}\"")]
    InvalidAttribute {
        element: String,
        attribute: String,
        value: String,
    },
    #[error("{element}: binding `{bind}` did not resolve, widget left unbound")]
    UnresolvedBinding { element: String, bind: String },
    #[error("{child} nested directly inside {parent} on the same axis")]
    NestedSameAxis { parent: String, child: String },
    #[error("{element} ignored: {reason}")]
    IgnoredElement { element: String, reason: String },
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// The diagnostics gathered while translating one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    diagnostics: Vec<Diagnostic>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record and log a diagnostic.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        warn!("{diagnostic}");
        self.diagnostics.push(diagnostic);
    }

    /// True if nothing was reported.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl Extend<Diagnostic> for Report {
    fn extend<I: IntoIterator<Item = Diagnostic>>(&mut self, iter: I) {
        for d in iter {
            self.push(d);
        }
    }
}

// ---------------------------------------------------------------------------
// Structural validation
// ---------------------------------------------------------------------------

/// `tag#id` for a widget, matching [`Element::describe`](crate::markup::Element::describe).
pub fn describe(widget: &Widget) -> String {
    if widget.id().is_empty() {
        widget.kind().name().to_string()
    } else {
        format!("{}#{}", widget.kind().name(), widget.id())
    }
}

/// Report every row placed directly inside a row and every column placed
/// directly inside a column, anywhere in the tree.
pub fn validate(root: &Widget) -> Vec<Diagnostic> {
    let mut found = Vec::new();
    walk(root, &mut found);
    found
}

fn walk(widget: &Widget, found: &mut Vec<Diagnostic>) {
    let axis = widget.axis();
    for child in widget.children() {
        if axis.is_some() && child.axis() == axis {
            found.push(Diagnostic::NestedSameAxis {
                parent: describe(widget),
                child: describe(child),
            });
        }
        walk(child, found);
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutTree;

    #[test]
    fn alternating_axes_are_valid() {
        let tree = LayoutTree::new();
        let mut col = Widget::column(&tree, "col");
        let mut row = Widget::row(&tree, "row");
        row.add_child(Widget::column(&tree, "inner")).unwrap();
        col.add_child(row).unwrap();
        assert!(validate(&col).is_empty());
    }

    #[test]
    fn same_axis_nesting_is_reported_at_any_depth() {
        let tree = LayoutTree::new();
        let mut outer = Widget::column(&tree, "outer");
        let mut row = Widget::row(&tree, "row");
        let mut row2 = Widget::row(&tree, "row2");
        row2.add_child(Widget::label(&tree, "l", "x")).unwrap();
        row.add_child(row2).unwrap();
        outer.add_child(row).unwrap();
        outer.add_child(Widget::column(&tree, "")).unwrap();

        assert_eq!(
            validate(&outer),
            vec![
                Diagnostic::NestedSameAxis {
                    parent: "hlayout#row".into(),
                    child: "hlayout#row2".into(),
                },
                Diagnostic::NestedSameAxis {
                    parent: "vlayout#outer".into(),
                    child: "vlayout".into(),
                },
            ]
        );
    }

    #[test]
    fn report_collects() {
        let mut report = Report::new();
        assert!(report.is_clean());
        report.push(Diagnostic::UnknownElement { tag: "slider".into() });
        report.extend(vec![Diagnostic::UnresolvedBinding {
            element: "input#x".into(),
            bind: "x".into(),
        }]);
        assert_eq!(report.len(), 2);
        assert_eq!(
            report.diagnostics()[0].to_string(),
            "unknown element <slider> skipped"
        );
    }
}
