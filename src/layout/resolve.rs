//! Widget style -> taffy Style conversion.
//!
//! The solver configuration of a node is never patched incrementally: it is
//! re-derived in full from the widget's explicit dimensions, flex factor and
//! [`Style`] every time one of them changes. That makes the result independent
//! of the order in which setters were called.

use taffy::prelude::*;

use crate::style::{Align, AlignSelf, Justify, Style};

/// Main axis of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Children flow left to right.
    Row,
    /// Children flow top to bottom.
    Column,
}

impl Axis {
    /// The markup tag conventionally used for this axis.
    pub fn tag(self) -> &'static str {
        match self {
            Axis::Row => "hlayout",
            Axis::Column => "vlayout",
        }
    }
}

/// Everything the solver needs to know about one widget.
#[derive(Debug, Clone, Copy)]
pub struct LayoutSpec<'a> {
    /// `Some` for containers.
    pub axis: Option<Axis>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub flex: Option<f32>,
    pub style: &'a Style,
}

/// Build the complete taffy style for a widget.
///
/// - explicit width/height become fixed lengths, `None` stays auto
/// - `flex = f` expands to grow `f`, shrink 1, basis 0
/// - margin and padding apply to all four edges when positive
/// - `align_self` overrides the parent's alignment unless `auto`
/// - containers additionally get direction, gap, justify, align and wrap
pub fn resolve_layout(spec: &LayoutSpec<'_>) -> taffy::Style {
    let style = spec.style;
    let mut out = taffy::Style {
        display: Display::Flex,
        size: taffy::geometry::Size {
            width: dimension(spec.width),
            height: dimension(spec.height),
        },
        ..Default::default()
    };

    if let Some(flex) = spec.flex {
        out.flex_grow = flex.max(0.0);
        out.flex_shrink = 1.0;
        out.flex_basis = Dimension::from_length(0.0);
    }

    if style.margin > 0.0 {
        let m = LengthPercentageAuto::from_length(style.margin);
        out.margin = taffy::geometry::Rect {
            top: m,
            right: m,
            bottom: m,
            left: m,
        };
    }

    if style.padding > 0.0 {
        let p = LengthPercentage::from_length(style.padding);
        out.padding = taffy::geometry::Rect {
            top: p,
            right: p,
            bottom: p,
            left: p,
        };
    }

    out.align_self = resolve_align_self(style.align_self);

    if let Some(axis) = spec.axis {
        out.flex_direction = match axis {
            Axis::Row => FlexDirection::Row,
            Axis::Column => FlexDirection::Column,
        };
        let gap = LengthPercentage::from_length(style.gap.max(0.0));
        out.gap = taffy::geometry::Size {
            width: gap,
            height: gap,
        };
        out.justify_content = Some(resolve_justify(style.justify));
        out.align_items = Some(resolve_align(style.align));
        out.flex_wrap = if style.wrap {
            FlexWrap::Wrap
        } else {
            FlexWrap::NoWrap
        };
    }

    out
}

fn dimension(value: Option<f32>) -> Dimension {
    match value {
        Some(v) => Dimension::from_length(v.max(0.0)),
        None => Dimension::AUTO,
    }
}

fn resolve_justify(justify: Justify) -> JustifyContent {
    match justify {
        Justify::FlexStart => JustifyContent::FlexStart,
        Justify::Center => JustifyContent::Center,
        Justify::FlexEnd => JustifyContent::FlexEnd,
        Justify::SpaceBetween => JustifyContent::SpaceBetween,
        Justify::SpaceAround => JustifyContent::SpaceAround,
        Justify::SpaceEvenly => JustifyContent::SpaceEvenly,
    }
}

fn resolve_align(align: Align) -> AlignItems {
    match align {
        Align::Stretch => AlignItems::Stretch,
        Align::FlexStart => AlignItems::FlexStart,
        Align::Center => AlignItems::Center,
        Align::FlexEnd => AlignItems::FlexEnd,
        Align::Baseline => AlignItems::Baseline,
    }
}

fn resolve_align_self(align_self: AlignSelf) -> Option<AlignItems> {
    match align_self {
        AlignSelf::Auto => None,
        AlignSelf::FlexStart => Some(AlignItems::FlexStart),
        AlignSelf::Center => Some(AlignItems::Center),
        AlignSelf::FlexEnd => Some(AlignItems::FlexEnd),
        AlignSelf::Stretch => Some(AlignItems::Stretch),
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::StylePatch;

    fn leaf(style: &Style) -> LayoutSpec<'_> {
        LayoutSpec {
            axis: None,
            width: None,
            height: None,
            flex: None,
            style,
        }
    }

    #[test]
    fn unset_dimensions_are_auto() {
        let style = Style::default();
        let out = resolve_layout(&leaf(&style));
        assert_eq!(out.size.width, Dimension::AUTO);
        assert_eq!(out.size.height, Dimension::AUTO);
        assert_eq!(out.flex_grow, 0.0);
    }

    #[test]
    fn explicit_dimensions_are_lengths() {
        let style = Style::default();
        let out = resolve_layout(&LayoutSpec {
            width: Some(120.0),
            height: Some(30.0),
            ..leaf(&style)
        });
        assert_eq!(out.size.width, Dimension::from_length(120.0));
        assert_eq!(out.size.height, Dimension::from_length(30.0));
    }

    #[test]
    fn flex_expands_to_grow_shrink_basis() {
        let style = Style::default();
        let out = resolve_layout(&LayoutSpec {
            flex: Some(2.0),
            ..leaf(&style)
        });
        assert_eq!(out.flex_grow, 2.0);
        assert_eq!(out.flex_shrink, 1.0);
        assert_eq!(out.flex_basis, Dimension::from_length(0.0));
    }

    #[test]
    fn zero_spacing_is_not_applied() {
        let style = Style::default();
        let out = resolve_layout(&leaf(&style));
        assert_eq!(out.margin.left, LengthPercentageAuto::from_length(0.0));
        assert_eq!(out.padding.top, LengthPercentage::ZERO);
    }

    #[test]
    fn margin_and_padding_apply_to_all_edges() {
        let mut style = Style::default();
        style.apply(&StylePatch::new().with_margin(4.0).with_padding(10.0));
        let out = resolve_layout(&leaf(&style));
        let m = LengthPercentageAuto::from_length(4.0);
        let p = LengthPercentage::from_length(10.0);
        assert_eq!((out.margin.top, out.margin.right, out.margin.bottom, out.margin.left), (m, m, m, m));
        assert_eq!((out.padding.top, out.padding.right, out.padding.bottom, out.padding.left), (p, p, p, p));
    }

    #[test]
    fn align_self_auto_leaves_parent_alignment() {
        let mut style = Style::default();
        assert_eq!(resolve_layout(&leaf(&style)).align_self, None);
        style.align_self = AlignSelf::Center;
        assert_eq!(resolve_layout(&leaf(&style)).align_self, Some(AlignItems::Center));
    }

    #[test]
    fn container_properties_only_on_containers() {
        let style = Style::default();
        let out = resolve_layout(&leaf(&style));
        assert_eq!(out.justify_content, None);
        assert_eq!(out.align_items, None);

        let row = resolve_layout(&LayoutSpec {
            axis: Some(Axis::Row),
            ..leaf(&style)
        });
        assert_eq!(row.flex_direction, FlexDirection::Row);
        assert_eq!(row.gap.width, LengthPercentage::from_length(8.0));
        assert_eq!(row.justify_content, Some(JustifyContent::FlexStart));
        assert_eq!(row.align_items, Some(AlignItems::Stretch));
        assert_eq!(row.flex_wrap, FlexWrap::NoWrap);
    }

    #[test]
    fn column_with_wrap_and_center() {
        let mut style = Style::default();
        style.wrap = true;
        style.justify = Justify::SpaceBetween;
        style.align = Align::Center;
        let out = resolve_layout(&LayoutSpec {
            axis: Some(Axis::Column),
            ..leaf(&style)
        });
        assert_eq!(out.flex_direction, FlexDirection::Column);
        assert_eq!(out.flex_wrap, FlexWrap::Wrap);
        assert_eq!(out.justify_content, Some(JustifyContent::SpaceBetween));
        assert_eq!(out.align_items, Some(AlignItems::Center));
    }
}
