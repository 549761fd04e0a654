//! Input widgets: a text field and a numeric field.
//!
//! Both edit a bound [`Field`]. An unbound input draws nothing.

use crate::binding::Field;
use crate::layout::LayoutTree;
use crate::render::Backend;
use crate::widget::{Frame, Widget, WidgetKind};

// ---------------------------------------------------------------------------
// TextInput
// ---------------------------------------------------------------------------

/// Single-line text field.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    binding: Option<Field<String>>,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn binding(&self) -> Option<&Field<String>> {
        self.binding.as_ref()
    }

    pub fn bind(&mut self, field: Field<String>) {
        self.binding = Some(field);
    }

    pub fn unbind(&mut self) {
        self.binding = None;
    }

    pub(crate) fn render(&self, frame: &Frame<'_>, ui: &mut dyn Backend) {
        let Some(field) = &self.binding else {
            return;
        };
        let mut value = field.get().unwrap_or_default();
        if ui.text_field(frame.id, &mut value, frame.width(), frame.style) {
            field.set(value);
        }
    }
}

// ---------------------------------------------------------------------------
// NumberInput
// ---------------------------------------------------------------------------

/// The value a [`NumberInput`] edits.
#[derive(Debug, Clone)]
pub enum NumberBinding {
    Float(Field<f32>),
    Int(Field<i32>),
}

/// Numeric field editing either a float or an integer.
#[derive(Debug, Clone, Default)]
pub struct NumberInput {
    binding: Option<NumberBinding>,
}

impl NumberInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn binding(&self) -> Option<&NumberBinding> {
        self.binding.as_ref()
    }

    pub fn bind_float(&mut self, field: Field<f32>) {
        self.binding = Some(NumberBinding::Float(field));
    }

    pub fn bind_int(&mut self, field: Field<i32>) {
        self.binding = Some(NumberBinding::Int(field));
    }

    pub fn unbind(&mut self) {
        self.binding = None;
    }

    pub(crate) fn render(&self, frame: &Frame<'_>, ui: &mut dyn Backend) {
        match &self.binding {
            Some(NumberBinding::Float(field)) => {
                let mut value = field.get().unwrap_or_default();
                if ui.float_field(frame.id, &mut value, frame.width(), frame.style) {
                    field.set(value);
                }
            }
            Some(NumberBinding::Int(field)) => {
                let mut value = field.get().unwrap_or_default();
                if ui.int_field(frame.id, &mut value, frame.width(), frame.style) {
                    field.set(value);
                }
            }
            None => {}
        }
    }
}

impl Widget {
    /// Create an unbound text field.
    pub fn text_input(tree: &LayoutTree, id: impl Into<String>) -> Self {
        Widget::new(tree, id, WidgetKind::TextInput(TextInput::new()))
    }

    /// Create an unbound numeric field.
    pub fn number_input(tree: &LayoutTree, id: impl Into<String>) -> Self {
        Widget::new(tree, id, WidgetKind::NumberInput(NumberInput::new()))
    }
}

// ===========================================================================
// Tests
// ===========================================================================
