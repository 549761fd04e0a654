//! Radio button widget: one option of a mutually exclusive group.

use crate::binding::Field;
use crate::layout::LayoutTree;
use crate::render::Backend;
use crate::widget::{Frame, Widget, WidgetKind};

/// One option of a radio group.
///
/// All buttons of a group share the same bound integer; a button is selected
/// when that integer equals its `value`, and clicking it stores `value`.
#[derive(Debug, Clone)]
pub struct RadioButton {
    text: String,
    group: String,
    value: i32,
    selection: Option<Field<i32>>,
}

impl RadioButton {
    pub fn new(text: impl Into<String>, group: impl Into<String>, value: i32) -> Self {
        Self {
            text: text.into(),
            group: group.into(),
            value,
            selection: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn set_group(&mut self, group: impl Into<String>) {
        self.group = group.into();
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn set_value(&mut self, value: i32) {
        self.value = value;
    }

    pub fn selection(&self) -> Option<&Field<i32>> {
        self.selection.as_ref()
    }

    pub fn bind_selected(&mut self, field: Field<i32>) {
        self.selection = Some(field);
    }

    pub fn unbind(&mut self) {
        self.selection = None;
    }

    /// True if the bound selection currently equals this button's value.
    pub fn is_selected(&self) -> bool {
        self.selection
            .as_ref()
            .and_then(Field::get)
            .is_some_and(|v| v == self.value)
    }

    pub(crate) fn render(&self, frame: &Frame<'_>, ui: &mut dyn Backend) {
        let Some(field) = &self.selection else {
            return;
        };
        if ui.radio(frame.id, &self.text, self.is_selected(), frame.style) {
            field.set(self.value);
        }
    }
}

impl Widget {
    /// Create an unbound radio button.
    pub fn radio(
        tree: &LayoutTree,
        id: impl Into<String>,
        text: impl Into<String>,
        group: impl Into<String>,
        value: i32,
    ) -> Self {
        Widget::new(tree, id, WidgetKind::Radio(RadioButton::new(text, group, value)))
    }
}

// ===========================================================================
// Tests
// ===========================================================================
