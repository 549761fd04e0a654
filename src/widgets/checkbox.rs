//! Checkbox widget: a labelled boolean toggle.

use crate::binding::Field;
use crate::layout::LayoutTree;
use crate::render::Backend;
use crate::widget::{Frame, Widget, WidgetKind};

/// A labelled toggle bound to a `bool`. Draws nothing while unbound.
#[derive(Debug, Clone)]
pub struct Checkbox {
    text: String,
    binding: Option<Field<bool>>,
}

impl Checkbox {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            binding: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn binding(&self) -> Option<&Field<bool>> {
        self.binding.as_ref()
    }

    pub fn bind(&mut self, field: Field<bool>) {
        self.binding = Some(field);
    }

    pub fn unbind(&mut self) {
        self.binding = None;
    }

    pub(crate) fn render(&self, frame: &Frame<'_>, ui: &mut dyn Backend) {
        let Some(field) = &self.binding else {
            return;
        };
        let mut checked = field.get().unwrap_or_default();
        if ui.checkbox(frame.id, &self.text, &mut checked, frame.style) {
            field.set(checked);
        }
    }
}

impl Widget {
    /// Create an unbound checkbox.
    pub fn checkbox(tree: &LayoutTree, id: impl Into<String>, text: impl Into<String>) -> Self {
        Widget::new(tree, id, WidgetKind::Checkbox(Checkbox::new(text)))
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::testing::{DrawCommand, HeadlessBackend};

    #[test]
    fn toggle_writes_back() {
        let tree = LayoutTree::new();
        let flag = Rc::new(RefCell::new(false));
        let mut w = Widget::checkbox(&tree, "rust", "Rust");
        w.downcast_mut::<Checkbox>().unwrap().bind(Field::from_cell("rust", &flag));

        let mut ui = HeadlessBackend::new(100.0, 100.0);
        ui.toggle("rust");
        w.render(&mut ui);
        assert!(*flag.borrow());
        assert_eq!(
            ui.commands(),
            &[DrawCommand::Checkbox {
                id: "rust".into(),
                text: "Rust".into(),
                checked: true,
            }]
        );
    }

    #[test]
    fn untouched_checkbox_keeps_value() {
        let tree = LayoutTree::new();
        let flag = Rc::new(RefCell::new(true));
        let mut w = Widget::checkbox(&tree, "go", "Go");
        w.downcast_mut::<Checkbox>().unwrap().bind(Field::from_cell("go", &flag));
        let mut ui = HeadlessBackend::new(100.0, 100.0);
        w.render(&mut ui);
        assert!(*flag.borrow());
    }
}
