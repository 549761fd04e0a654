//! HeadlessBackend: a [`Backend`] that records draw calls.
//!
//! Interactions are scripted ahead of a frame: [`type_text`](HeadlessBackend::type_text),
//! [`set_float`](HeadlessBackend::set_float), [`set_int`](HeadlessBackend::set_int),
//! [`toggle`](HeadlessBackend::toggle) and [`click`](HeadlessBackend::click) queue
//! one interaction for the widget with that id, consumed the next time the
//! widget is drawn. Interactions aimed at a disabled widget are consumed
//! without effect.

use std::collections::{HashMap, HashSet};

use crate::geometry::Extent;
use crate::render::Backend;
use crate::style::Style;

/// Default per-side window padding, in pixels.
const WINDOW_PADDING: f32 = 8.0;

// ---------------------------------------------------------------------------
// DrawCommand
// ---------------------------------------------------------------------------

/// One recorded backend call. Field values are recorded after any scripted
/// edit was applied.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    BeginPanel {
        title: String,
        size: Extent,
        forced: bool,
    },
    EndPanel,
    SameLine,
    Label {
        text: String,
    },
    TextField {
        id: String,
        value: String,
        width: Option<f32>,
    },
    FloatField {
        id: String,
        value: f32,
        width: Option<f32>,
    },
    IntField {
        id: String,
        value: i32,
        width: Option<f32>,
    },
    Checkbox {
        id: String,
        text: String,
        checked: bool,
    },
    Radio {
        id: String,
        text: String,
        selected: bool,
    },
    Button {
        id: String,
        text: String,
        size: Extent,
    },
}

#[derive(Debug, Clone, PartialEq)]
enum Edit {
    Text(String),
    Float(f32),
    Int(i32),
    Toggle,
}

// ---------------------------------------------------------------------------
// HeadlessBackend
// ---------------------------------------------------------------------------

/// A recording backend with a fixed content area.
#[derive(Debug, Clone)]
pub struct HeadlessBackend {
    available: Extent,
    padding: Extent,
    collapsed: HashSet<String>,
    close_requests: HashSet<String>,
    edits: HashMap<String, Edit>,
    clicks: HashSet<String>,
    commands: Vec<DrawCommand>,
}

impl HeadlessBackend {
    /// Create a backend whose panels report `width` x `height` of content area.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            available: Extent::new(width, height),
            padding: Extent::new(WINDOW_PADDING, WINDOW_PADDING),
            collapsed: HashSet::new(),
            close_requests: HashSet::new(),
            edits: HashMap::new(),
            clicks: HashSet::new(),
            commands: Vec::new(),
        }
    }

    /// Set the window padding reported to panels (builder pattern).
    pub fn with_padding(mut self, padding: Extent) -> Self {
        self.padding = padding;
        self
    }

    /// Change the content area, e.g. to simulate the user resizing a window.
    pub fn set_available(&mut self, width: f32, height: f32) {
        self.available = Extent::new(width, height);
    }

    /// Report the panel titled `title` as collapsed until further notice.
    pub fn collapse(&mut self, title: &str) {
        self.collapsed.insert(title.to_string());
    }

    pub fn expand(&mut self, title: &str) {
        self.collapsed.remove(title);
    }

    /// Close the panel titled `title` the next time it begins.
    pub fn request_close(&mut self, title: &str) {
        self.close_requests.insert(title.to_string());
    }

    // ── Scripted interaction ─────────────────────────────────────────

    pub fn type_text(&mut self, id: &str, text: &str) {
        self.edits.insert(id.to_string(), Edit::Text(text.to_string()));
    }

    pub fn set_float(&mut self, id: &str, value: f32) {
        self.edits.insert(id.to_string(), Edit::Float(value));
    }

    pub fn set_int(&mut self, id: &str, value: i32) {
        self.edits.insert(id.to_string(), Edit::Int(value));
    }

    /// Flip a checkbox.
    pub fn toggle(&mut self, id: &str) {
        self.edits.insert(id.to_string(), Edit::Toggle);
    }

    /// Click a button or radio button.
    pub fn click(&mut self, id: &str) {
        self.clicks.insert(id.to_string());
    }

    /// True if no scripted interaction is still waiting for its widget.
    pub fn is_idle(&self) -> bool {
        self.edits.is_empty() && self.clicks.is_empty()
    }

    // ── Inspection ───────────────────────────────────────────────────

    /// Every command recorded since creation or the last [`take_commands`](Self::take_commands).
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Number of `BeginPanel` commands recorded.
    pub fn panels_begun(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::BeginPanel { .. }))
            .count()
    }

    fn take_edit(&mut self, id: &str, style: &Style) -> Option<Edit> {
        let edit = self.edits.remove(id)?;
        (!style.disabled).then_some(edit)
    }

    fn take_click(&mut self, id: &str, style: &Style) -> bool {
        self.clicks.remove(id) && !style.disabled
    }
}

impl Backend for HeadlessBackend {
    fn begin_panel(&mut self, title: &str, size: Extent, force_size: bool, open: &mut bool) -> bool {
        self.commands.push(DrawCommand::BeginPanel {
            title: title.to_string(),
            size,
            forced: force_size,
        });
        if self.close_requests.remove(title) {
            *open = false;
        }
        !self.collapsed.contains(title)
    }

    fn end_panel(&mut self) {
        self.commands.push(DrawCommand::EndPanel);
    }

    fn available_size(&mut self) -> Extent {
        self.available
    }

    fn window_padding(&self) -> Extent {
        self.padding
    }

    fn same_line(&mut self) {
        self.commands.push(DrawCommand::SameLine);
    }

    fn label(&mut self, text: &str, _style: &Style) {
        self.commands.push(DrawCommand::Label {
            text: text.to_string(),
        });
    }

    fn text_field(&mut self, id: &str, value: &mut String, width: Option<f32>, style: &Style) -> bool {
        let changed = match self.take_edit(id, style) {
            Some(Edit::Text(text)) if text != *value => {
                *value = text;
                true
            }
            _ => false,
        };
        self.commands.push(DrawCommand::TextField {
            id: id.to_string(),
            value: value.clone(),
            width,
        });
        changed
    }

    fn float_field(&mut self, id: &str, value: &mut f32, width: Option<f32>, style: &Style) -> bool {
        let changed = match self.take_edit(id, style) {
            Some(Edit::Float(v)) if v != *value => {
                *value = v;
                true
            }
            _ => false,
        };
        self.commands.push(DrawCommand::FloatField {
            id: id.to_string(),
            value: *value,
            width,
        });
        changed
    }

    fn int_field(&mut self, id: &str, value: &mut i32, width: Option<f32>, style: &Style) -> bool {
        let changed = match self.take_edit(id, style) {
            Some(Edit::Int(v)) if v != *value => {
                *value = v;
                true
            }
            _ => false,
        };
        self.commands.push(DrawCommand::IntField {
            id: id.to_string(),
            value: *value,
            width,
        });
        changed
    }

    fn checkbox(&mut self, id: &str, text: &str, value: &mut bool, style: &Style) -> bool {
        let changed = matches!(self.take_edit(id, style), Some(Edit::Toggle));
        if changed {
            *value = !*value;
        }
        self.commands.push(DrawCommand::Checkbox {
            id: id.to_string(),
            text: text.to_string(),
            checked: *value,
        });
        changed
    }

    fn radio(&mut self, id: &str, text: &str, selected: bool, style: &Style) -> bool {
        self.commands.push(DrawCommand::Radio {
            id: id.to_string(),
            text: text.to_string(),
            selected,
        });
        self.take_click(id, style)
    }

    fn button(&mut self, id: &str, text: &str, size: Extent, style: &Style) -> bool {
        self.commands.push(DrawCommand::Button {
            id: id.to_string(),
            text: text.to_string(),
            size,
        });
        self.take_click(id, style)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
