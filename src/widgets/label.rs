//! Label widget: displays fixed text.

use crate::layout::LayoutTree;
use crate::render::Backend;
use crate::widget::{Frame, Widget, WidgetKind};

// ---------------------------------------------------------------------------
// Label
// ---------------------------------------------------------------------------

/// Non-interactive text. Font size, color and weight come from the widget style.
///
/// # Examples
///
/// ```ignore
/// let title = Widget::label(&tree, "title", "Contact details");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    text: String,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub(crate) fn render(&self, frame: &Frame<'_>, ui: &mut dyn Backend) {
        ui.label(&self.text, frame.style);
    }
}

impl Widget {
    /// Create a label.
    pub fn label(tree: &LayoutTree, id: impl Into<String>, text: impl Into<String>) -> Self {
        Widget::new(tree, id, WidgetKind::Label(Label::new(text)))
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{DrawCommand, HeadlessBackend};

    #[test]
    fn renders_text() {
        let tree = LayoutTree::new();
        let w = Widget::label(&tree, "t", "Hello");
        let mut ui = HeadlessBackend::new(200.0, 100.0);
        w.render(&mut ui);
        assert_eq!(
            ui.commands(),
            &[DrawCommand::Label {
                text: "Hello".into()
            }]
        );
    }

    #[test]
    fn set_text() {
        let mut label = Label::new("a");
        label.set_text("b");
        assert_eq!(label.text(), "b");
    }
}
