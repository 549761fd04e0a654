//! Panel: one top-level window and its widget tree.
//!
//! A panel keeps a logical size and a DPI scale; the physical size handed to
//! the backend is always `logical * scale`. Layout is solved lazily during
//! [`Panel::render`]: the tree is re-solved only when the content area moved
//! by more than the configured epsilon since the last solve, or after
//! something invalidated the cached size.

use tracing::{debug, warn};

use crate::config::DEFAULT_LAYOUT_EPSILON;
use crate::geometry::Extent;
use crate::layout::Available;
use crate::render::Backend;
use crate::widget::{Variant, Widget};

use super::stats::LayoutStats;

// ---------------------------------------------------------------------------
// Panel
// ---------------------------------------------------------------------------

/// A window hosting zero or one root widget.
///
/// # Examples
///
/// ```ignore
/// let mut panel = Panel::new("Settings", 400.0, 300.0);
/// panel.set_root(form);
/// panel.set_dpi_scale(2.0);
/// panel.render(&mut backend);
/// ```
#[derive(Debug)]
pub struct Panel {
    title: String,
    logical: Extent,
    dpi_scale: f32,
    open: bool,
    root: Option<Widget>,
    /// Content area of the last solve; `None` forces the next render to solve.
    last_available: Option<Extent>,
    /// Ask the backend to apply our size on the next frame.
    size_dirty: bool,
    epsilon: f32,
    stats: LayoutStats,
}

impl Panel {
    /// Create an open panel at DPI scale 1.
    pub fn new(title: impl Into<String>, width: f32, height: f32) -> Self {
        Self {
            title: title.into(),
            logical: Extent::new(width, height),
            dpi_scale: 1.0,
            open: true,
            root: None,
            last_available: None,
            size_dirty: false,
            epsilon: DEFAULT_LAYOUT_EPSILON,
            stats: LayoutStats::default(),
        }
    }

    /// Set the re-layout threshold (builder pattern).
    pub fn with_layout_epsilon(mut self, epsilon: f32) -> Self {
        self.epsilon = epsilon.max(0.0);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    // ── Visibility ───────────────────────────────────────────────────

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    pub fn show(&mut self) {
        self.open = true;
    }

    pub fn hide(&mut self) {
        self.open = false;
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    // ── Size and scale ───────────────────────────────────────────────

    pub fn dpi_scale(&self) -> f32 {
        self.dpi_scale
    }

    /// Size before DPI scaling.
    pub fn logical_size(&self) -> Extent {
        self.logical
    }

    /// Size handed to the backend: logical size times DPI scale.
    pub fn size(&self) -> Extent {
        self.logical * self.dpi_scale
    }

    /// Set the physical width; the logical width follows the current scale.
    pub fn set_width(&mut self, width: f32) {
        self.logical.width = width / self.dpi_scale;
        self.size_dirty = true;
    }

    /// Set the physical height; the logical height follows the current scale.
    pub fn set_height(&mut self, height: f32) {
        self.logical.height = height / self.dpi_scale;
        self.size_dirty = true;
    }

    /// Set the logical size, keeping the current scale.
    pub fn set_logical_size(&mut self, width: f32, height: f32) {
        self.logical = Extent::new(width, height);
        self.size_dirty = true;
    }

    /// Rescale the panel. Non-positive or NaN scales are ignored. The layout
    /// is invalidated and immediately re-solved at the new physical size.
    pub fn set_dpi_scale(&mut self, scale: f32) {
        if !(scale.is_finite() && scale > 0.0) {
            warn!(title = %self.title, scale, "ignoring invalid DPI scale");
            return;
        }
        self.dpi_scale = scale;
        self.last_available = None;
        self.size_dirty = true;
        self.update_layout();
    }

    // ── Root widget ──────────────────────────────────────────────────

    pub fn root(&self) -> Option<&Widget> {
        self.root.as_ref()
    }

    pub fn root_mut(&mut self) -> Option<&mut Widget> {
        self.root.as_mut()
    }

    /// Install a new root, dropping the previous tree, and solve it.
    pub fn set_root(&mut self, root: Widget) {
        self.root = Some(root);
        self.invalidate_layout();
        self.update_layout();
    }

    /// Remove and return the root widget.
    pub fn take_root(&mut self) -> Option<Widget> {
        self.invalidate_layout();
        self.root.take()
    }

    /// First widget with `id`, searching the root and then depth-first.
    pub fn find_widget(&self, id: &str) -> Option<&Widget> {
        self.root.as_ref()?.find(id)
    }

    pub fn find_widget_mut(&mut self, id: &str) -> Option<&mut Widget> {
        self.root.as_mut()?.find_mut(id)
    }

    /// [`find_widget`](Self::find_widget) narrowed to variant `T`.
    pub fn find_widget_as<T: Variant>(&self, id: &str) -> Option<&T> {
        self.root.as_ref()?.find_as::<T>(id)
    }

    // ── Layout ───────────────────────────────────────────────────────

    /// Force the next render to re-solve.
    pub fn invalidate_layout(&mut self) {
        self.last_available = None;
    }

    pub fn stats(&self) -> &LayoutStats {
        &self.stats
    }

    /// Solve the tree at the panel's physical size.
    pub fn update_layout(&mut self) {
        let size = self.size();
        if self.solve(Available::definite(size.width, size.height)) {
            self.last_available = Some(size);
        }
    }

    /// Resize the panel to the intrinsic size of its tree plus the backend's
    /// window padding on each side, then solve at the new size. Axes where
    /// the tree reports no size keep the current size.
    pub fn fit_to_content(&mut self, ui: &dyn Backend) {
        let padding = ui.window_padding();
        if !self.solve(Available::UNCONSTRAINED) {
            return;
        }
        let Some(content) = self.root.as_ref().map(|r| r.bounds().extent()) else {
            return;
        };
        let current = self.size();
        let width = if content.width > 0.0 {
            content.width
        } else {
            current.width
        };
        let height = if content.height > 0.0 {
            content.height
        } else {
            current.height
        };
        debug!(title = %self.title, width, height, "fitting panel to content");
        self.set_width(width + padding.width * 2.0);
        self.set_height(height + padding.height * 2.0);
        self.update_layout();
    }

    fn solve(&mut self, available: Available) -> bool {
        let Some(root) = self.root.as_mut() else {
            return false;
        };
        self.stats.record(|| root.update_layout(available));
        debug!(title = %self.title, ?available, elapsed = ?self.stats.last, "panel layout solved");
        true
    }

    fn needs_solve(&self, available: Extent) -> bool {
        match self.last_available {
            Some(last) => !last.approx_eq(available, self.epsilon),
            None => true,
        }
    }

    // ── Rendering ────────────────────────────────────────────────────

    /// Draw the panel. Does nothing while closed.
    pub fn render(&mut self, ui: &mut dyn Backend) {
        if !self.open {
            return;
        }
        let force_size = std::mem::take(&mut self.size_dirty);
        let size = self.size();
        if ui.begin_panel(&self.title, size, force_size, &mut self.open) {
            let available = ui.available_size();
            if self.root.is_some() && self.needs_solve(available) {
                self.last_available = Some(available);
                self.solve(Available::definite(available.width, available.height));
            }
            if let Some(root) = &self.root {
                root.render(ui);
            }
        }
        ui.end_panel();
    }
}

// ===========================================================================
// Tests
// ===========================================================================
