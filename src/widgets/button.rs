//! Button widget: a clickable button invoking a callback.

use std::fmt;
use std::rc::Rc;

use tracing::debug;

use crate::geometry::Extent;
use crate::layout::LayoutTree;
use crate::render::Backend;
use crate::widget::{Frame, Widget, WidgetKind};

/// A shared click handler.
pub type Callback = Rc<dyn Fn()>;

/// Width used when the solver gave the button no width.
const FALLBACK_WIDTH: f32 = 80.0;

/// A clickable button. Without a callback it still draws but does nothing.
#[derive(Clone)]
pub struct Button {
    text: String,
    callback: Option<Callback>,
}

impl Button {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            callback: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn set_callback(&mut self, callback: Option<Callback>) {
        self.callback = callback;
    }

    pub fn has_callback(&self) -> bool {
        self.callback.is_some()
    }

    /// Run the callback as if the button was clicked.
    pub fn click(&self) {
        if let Some(callback) = &self.callback {
            callback();
        }
    }

    pub(crate) fn render(&self, frame: &Frame<'_>, ui: &mut dyn Backend) {
        let b = frame.bounds;
        let size = Extent::new(
            if b.width > 0.0 { b.width } else { FALLBACK_WIDTH },
            b.height.max(0.0),
        );
        if ui.button(frame.id, &self.text, size, frame.style) && !frame.style.disabled {
            debug!(id = frame.id, "button clicked");
            self.click();
        }
    }
}

impl fmt::Debug for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Button")
            .field("text", &self.text)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

impl Widget {
    /// Create a button without a callback.
    pub fn button(tree: &LayoutTree, id: impl Into<String>, text: impl Into<String>) -> Self {
        Widget::new(tree, id, WidgetKind::Button(Button::new(text)))
    }
}

// ===========================================================================
// Tests
// ===========================================================================
