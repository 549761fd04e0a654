//! Attribute decoding shared by every element strategy.

use std::str::FromStr;

use crate::markup::Element;
use crate::style::{Align, AlignSelf, FontSize, Justify, StylePatch};
use crate::widget::Widget;

use super::validate::{Diagnostic, Report};

/// Booleans follow the markup convention: `true` or `1` switch the flag on,
/// anything else switches it off.
pub fn parse_flag(value: &str) -> bool {
    matches!(value.trim(), "true" | "1")
}

/// Read a numeric attribute. Absent yields `None` silently; unparsable or
/// non-finite values are reported and also yield `None`.
pub(crate) fn number<T>(element: &Element, name: &str, report: &mut Report) -> Option<T>
where
    T: FromStr + Copy + IsFinite,
{
    let raw = element.attr(name)?;
    match raw.trim().parse::<T>() {
        Ok(v) if v.is_finite_value() => Some(v),
        _ => {
            report.push(invalid(element, name, raw));
            None
        }
    }
}

/// Like [`number`] but additionally rejects negative values.
fn length(element: &Element, name: &str, report: &mut Report) -> Option<f32> {
    let raw = element.attr(name)?;
    let v = number::<f32>(element, name, report)?;
    if v < 0.0 {
        report.push(invalid(element, name, raw));
        return None;
    }
    Some(v)
}

fn keyword<T: FromStr>(element: &Element, name: &str, report: &mut Report) -> Option<T> {
    let raw = element.attr(name)?;
    match raw.parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            report.push(invalid(element, name, raw));
            None
        }
    }
}

pub(crate) fn invalid(element: &Element, attribute: &str, value: &str) -> Diagnostic {
    Diagnostic::InvalidAttribute {
        element: element.describe(),
        attribute: attribute.to_string(),
        value: value.to_string(),
    }
}

/// Numbers we accept from markup.
pub(crate) trait IsFinite {
    fn is_finite_value(&self) -> bool;
}

impl IsFinite for f32 {
    fn is_finite_value(&self) -> bool {
        self.is_finite()
    }
}

impl IsFinite for i32 {
    fn is_finite_value(&self) -> bool {
        true
    }
}

// ---------------------------------------------------------------------------
// Style
// ---------------------------------------------------------------------------

/// Build a patch holding exactly the style attributes present on `element`.
pub fn style_patch(element: &Element, report: &mut Report) -> StylePatch {
    let text = |name: &str| element.attr(name).map(str::to_string);
    let flag = |name: &str| element.attr(name).map(parse_flag);

    StylePatch {
        margin: length(element, "margin", report),
        padding: length(element, "padding", report),
        gap: length(element, "gap", report),
        justify: keyword::<Justify>(element, "justify", report),
        align: keyword::<Align>(element, "align", report),
        align_self: keyword::<AlignSelf>(element, "align-self", report),
        disabled: flag("disabled"),
        variant: text("variant"),
        font_size: keyword::<FontSize>(element, "font-size", report),
        bold: flag("bold"),
        text_color: text("text-color"),
        bg_color: text("bg-color"),
        stretch: flag("stretch"),
        wrap: flag("wrap"),
    }
}

/// Apply sizing and style attributes, then re-derive the solver style.
pub fn apply_common(widget: &mut Widget, element: &Element, report: &mut Report) {
    if let Some(w) = length(element, "width", report) {
        widget.set_width(Some(w));
    }
    if let Some(h) = length(element, "height", report) {
        widget.set_height(Some(h));
    }
    if let Some(f) = length(element, "flex", report) {
        widget.set_flex(Some(f));
    }
    let patch = style_patch(element, report);
    widget.apply_style(&patch);
    widget.configure_layout();
}

// ===========================================================================
// Tests
// ===========================================================================
