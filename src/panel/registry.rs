//! Registry: the application's named panels.
//!
//! Panels are kept in name order, which is also the order they render in.
//! Registering a name that already exists replaces the panel and drops the
//! previous one together with its widget tree.

use std::collections::BTreeMap;
use std::time::Duration;

use tracing::{debug, warn};

use crate::render::Backend;

use super::panel::Panel;

/// Named collection of panels.
#[derive(Debug, Default)]
pub struct Registry {
    panels: BTreeMap<String, Panel>,
    peak_layout: Duration,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `panel` under `name`, dropping any panel previously there.
    pub fn add(&mut self, name: impl Into<String>, panel: Panel) {
        let name = name.into();
        if self.panels.insert(name.clone(), panel).is_some() {
            debug!(%name, "panel replaced");
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<Panel> {
        self.panels.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&Panel> {
        self.panels.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Panel> {
        self.panels.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.panels.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Panel names in render order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.panels.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Panel)> {
        self.panels.iter().map(|(k, v)| (k.as_str(), v))
    }

    // ── Visibility ───────────────────────────────────────────────────

    /// Open `name`; unknown names are ignored.
    pub fn show(&mut self, name: &str) {
        if let Some(panel) = self.panels.get_mut(name) {
            panel.show();
        }
    }

    /// Close `name`; unknown names are ignored.
    pub fn hide(&mut self, name: &str) {
        if let Some(panel) = self.panels.get_mut(name) {
            panel.hide();
        }
    }

    /// Flip `name` between open and closed; unknown names are ignored.
    pub fn toggle(&mut self, name: &str) {
        if let Some(panel) = self.panels.get_mut(name) {
            panel.toggle();
        }
    }

    // ── Bulk operations ──────────────────────────────────────────────

    /// Render every panel in name order.
    pub fn render_all(&mut self, ui: &mut dyn Backend) {
        for panel in self.panels.values_mut() {
            panel.render(ui);
        }
    }

    /// Solve every panel at its physical size.
    pub fn relayout_all(&mut self) {
        for panel in self.panels.values_mut() {
            panel.update_layout();
        }
    }

    /// Rescale every panel. Non-positive or NaN scales are ignored.
    pub fn set_all_dpi_scale(&mut self, scale: f32) {
        if !(scale.is_finite() && scale > 0.0) {
            warn!(scale, "ignoring invalid DPI scale");
            return;
        }
        for panel in self.panels.values_mut() {
            panel.set_dpi_scale(scale);
        }
    }

    /// Fit every panel to its content plus the backend's window padding.
    pub fn fit_all_to_content(&mut self, ui: &dyn Backend) {
        for panel in self.panels.values_mut() {
            panel.fit_to_content(ui);
        }
    }

    /// The longest most-recent solve across panels, and the longest value
    /// this method has ever returned. The peak never decreases.
    pub fn layout_durations(&mut self) -> (Duration, Duration) {
        let current = self
            .panels
            .values()
            .map(|p| p.stats().last)
            .max()
            .unwrap_or_default();
        self.peak_layout = self.peak_layout.max(current);
        (current, self.peak_layout)
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Extent;
    use crate::layout::LayoutTree;
    use crate::testing::{DrawCommand, HeadlessBackend};
    use crate::widget::Widget;

    fn titled(title: &str) -> Panel {
        Panel::new(title, 200.0, 100.0)
    }

    #[test]
    fn add_replaces_and_drops_previous() {
        let tree = LayoutTree::new();
        let mut reg = Registry::new();
        let mut first = titled("First");
        first.set_root(Widget::label(&tree, "a", "A"));
        reg.add("main", first);
        assert_eq!(tree.node_count(), 1);

        reg.add("main", titled("Second"));
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.get("main").map(Panel::title), Some("Second"));
        assert_eq!(tree.node_count(), 0);
    }

    #[test]
    fn visibility_by_name() {
        let mut reg = Registry::new();
        reg.add("a", titled("A"));
        reg.hide("a");
        assert!(!reg.get("a").unwrap().is_open());
        reg.toggle("a");
        assert!(reg.get("a").unwrap().is_open());
        reg.hide("a");
        reg.show("a");
        assert!(reg.get("a").unwrap().is_open());

        reg.toggle("missing");
        reg.show("missing");
        reg.hide("missing");
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn render_all_in_name_order() {
        let mut reg = Registry::new();
        reg.add("b", titled("Beta"));
        reg.add("a", titled("Alpha"));
        reg.add("c", titled("Gamma"));
        reg.hide("c");

        let mut ui = HeadlessBackend::new(100.0, 100.0);
        reg.render_all(&mut ui);
        let titles: Vec<_> = ui
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::BeginPanel { title, .. } => Some(title.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(titles, vec!["Alpha", "Beta"]);
        assert_eq!(reg.names().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    }

    #[test]
    fn set_all_dpi_scale_rejects_non_positive() {
        let mut reg = Registry::new();
        reg.add("a", titled("A"));
        reg.add("b", titled("B"));
        reg.set_all_dpi_scale(2.0);
        reg.set_all_dpi_scale(0.0);
        reg.set_all_dpi_scale(-3.0);
        for (_, panel) in reg.iter() {
            assert_eq!(panel.dpi_scale(), 2.0);
            assert_eq!(panel.size(), Extent::new(400.0, 200.0));
        }
    }

    #[test]
    fn fit_all_and_relayout_all() {
        let tree = LayoutTree::new();
        let mut reg = Registry::new();
        let mut panel = titled("A");
        let mut b = Widget::button(&tree, "b", "B");
        b.set_width(Some(50.0));
        b.set_height(Some(20.0));
        panel.set_root(b);
        reg.add("a", panel);

        let ui = HeadlessBackend::new(400.0, 300.0).with_padding(Extent::new(5.0, 5.0));
        reg.fit_all_to_content(&ui);
        assert_eq!(reg.get("a").unwrap().size(), Extent::new(60.0, 30.0));

        let before = reg.get("a").unwrap().stats().solves;
        reg.relayout_all();
        assert_eq!(reg.get("a").unwrap().stats().solves, before + 1);
    }

    #[test]
    fn peak_duration_never_decreases() {
        let tree = LayoutTree::new();
        let mut reg = Registry::new();
        assert_eq!(reg.layout_durations(), (Duration::ZERO, Duration::ZERO));

        let mut panel = titled("A");
        panel.set_root(Widget::column(&tree, "root"));
        reg.add("a", panel);

        let mut peak = Duration::ZERO;
        for _ in 0..5 {
            reg.relayout_all();
            let (current, p) = reg.layout_durations();
            assert!(p >= current);
            assert!(p >= peak);
            peak = p;
        }
        reg.remove("a");
        let (current, p) = reg.layout_durations();
        assert_eq!(current, Duration::ZERO);
        assert_eq!(p, peak);
    }
}
