//! The immediate-mode drawing surface widgets render onto.
//!
//! A [`Backend`] is called once per widget per frame. Value-editing calls
//! receive the current value by `&mut` and return true when the user changed
//! it; [`Backend::radio`] and [`Backend::button`] return true when clicked.
//! The style is passed along so the backend can pick fonts, colors and the
//! disabled look; a backend must not report edits or clicks for a disabled
//! style.

use crate::geometry::Extent;
use crate::style::Style;

/// Rendering surface for panels and widgets.
pub trait Backend {
    /// Open a window. `force_size` asks the backend to apply `size` even if
    /// the user resized the window. `open` is cleared when the user closes it.
    /// Returns false when the window is collapsed; `end_panel` is still called.
    fn begin_panel(&mut self, title: &str, size: Extent, force_size: bool, open: &mut bool) -> bool;

    /// Close the window opened by the last `begin_panel`.
    fn end_panel(&mut self);

    /// Content area left inside the current window.
    fn available_size(&mut self) -> Extent;

    /// Inner padding of a window on each side.
    fn window_padding(&self) -> Extent;

    /// Place the next widget on the same line as the previous one.
    fn same_line(&mut self);

    fn label(&mut self, text: &str, style: &Style);

    fn text_field(&mut self, id: &str, value: &mut String, width: Option<f32>, style: &Style) -> bool;

    fn float_field(&mut self, id: &str, value: &mut f32, width: Option<f32>, style: &Style) -> bool;

    fn int_field(&mut self, id: &str, value: &mut i32, width: Option<f32>, style: &Style) -> bool;

    fn checkbox(&mut self, id: &str, text: &str, value: &mut bool, style: &Style) -> bool;

    fn radio(&mut self, id: &str, text: &str, selected: bool, style: &Style) -> bool;

    fn button(&mut self, id: &str, text: &str, size: Extent, style: &Style) -> bool;
}
