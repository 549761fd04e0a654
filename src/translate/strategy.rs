//! Per-tag construction strategies.
//!
//! Each supported element name maps to a plain function that manufactures the
//! widget variant from the element's variant attributes and wires its binding
//! or callback. Sizing, style and children are handled by the caller so every
//! strategy stays small.

use std::collections::HashMap;

use tracing::debug;

use crate::binding::{Binder, BoundField};
use crate::layout::LayoutTree;
use crate::markup::Element;
use crate::widget::Widget;
use crate::widgets::{Button, Callback, Checkbox, NumberInput, RadioButton, TextInput};

use super::attrs;
use super::validate::{Diagnostic, Report};

/// Everything a strategy may consult while building one widget.
pub(crate) struct Context<'a> {
    pub tree: &'a LayoutTree,
    pub binder: Option<&'a dyn Binder>,
    pub callbacks: &'a HashMap<String, Callback>,
    pub report: &'a mut Report,
}

/// Build a widget for an element, or `None` if the element cannot be used.
pub(crate) type TagFn = fn(&Element, &mut Context<'_>) -> Option<Widget>;

static STRATEGIES: &[(&str, TagFn)] = &[
    ("label", label),
    ("input", input),
    ("checkbox", checkbox),
    ("radio", radio),
    ("button", button),
    ("hlayout", row),
    ("row", row),
    ("vlayout", column),
    ("column", column),
];

pub(crate) fn lookup(tag: &str) -> Option<TagFn> {
    STRATEGIES
        .iter()
        .find(|(name, _)| *name == tag)
        .map(|(_, f)| *f)
}

/// Element names the translator understands.
pub fn supported_tags() -> impl Iterator<Item = &'static str> {
    STRATEGIES.iter().map(|(name, _)| *name)
}

fn id(element: &Element) -> &str {
    element.attr("id").unwrap_or("")
}

fn text(element: &Element) -> &str {
    element.attr("text").unwrap_or("")
}

/// Resolve the element's `bind` attribute. Absent is silent; anything that
/// does not resolve is reported.
fn binding(element: &Element, ctx: &mut Context<'_>) -> Option<BoundField> {
    let path = element.attr("bind")?;
    let found = ctx.binder.and_then(|b| b.resolve(path));
    match &found {
        Some(field) => debug!(element = %element.describe(), path = %field.path(), "bound"),
        None => unresolved(element, path, ctx),
    }
    found
}

fn unresolved(element: &Element, path: &str, ctx: &mut Context<'_>) {
    ctx.report.push(Diagnostic::UnresolvedBinding {
        element: element.describe(),
        bind: path.to_string(),
    });
}

fn mismatch(element: &Element, found: &BoundField, ctx: &mut Context<'_>) {
    debug!(element = %element.describe(), found = found.type_name(), "binding has the wrong type");
    unresolved(element, element.attr("bind").unwrap_or(""), ctx);
}

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn label(element: &Element, ctx: &mut Context<'_>) -> Option<Widget> {
    Some(Widget::label(ctx.tree, id(element), text(element)))
}

fn input(element: &Element, ctx: &mut Context<'_>) -> Option<Widget> {
    match element.attr("type").unwrap_or("text") {
        "text" => {
            let mut widget = Widget::text_input(ctx.tree, id(element));
            match binding(element, ctx) {
                Some(BoundField::Text(field)) => {
                    if let Some(input) = widget.downcast_mut::<TextInput>() {
                        input.bind(field);
                    }
                }
                Some(other) => mismatch(element, &other, ctx),
                None => {}
            }
            Some(widget)
        }
        "number" => {
            let mut widget = Widget::number_input(ctx.tree, id(element));
            let bound = binding(element, ctx);
            if let Some(input) = widget.downcast_mut::<NumberInput>() {
                match bound {
                    Some(BoundField::Float(field)) => input.bind_float(field),
                    Some(BoundField::Int(field)) => input.bind_int(field),
                    Some(other) => mismatch(element, &other, ctx),
                    None => {}
                }
            }
            Some(widget)
        }
        other => {
            ctx.report.push(attrs::invalid(element, "type", other));
            None
        }
    }
}

fn checkbox(element: &Element, ctx: &mut Context<'_>) -> Option<Widget> {
    let mut widget = Widget::checkbox(ctx.tree, id(element), text(element));
    match binding(element, ctx) {
        Some(BoundField::Flag(field)) => {
            if let Some(checkbox) = widget.downcast_mut::<Checkbox>() {
                checkbox.bind(field);
            }
        }
        Some(other) => mismatch(element, &other, ctx),
        None => {}
    }
    Some(widget)
}

fn radio(element: &Element, ctx: &mut Context<'_>) -> Option<Widget> {
    let group = element.attr("group").unwrap_or("");
    let value = attrs::number::<i32>(element, "value", ctx.report).unwrap_or(0);
    let mut widget = Widget::radio(ctx.tree, id(element), text(element), group, value);
    match binding(element, ctx) {
        Some(BoundField::Int(field)) => {
            if let Some(radio) = widget.downcast_mut::<RadioButton>() {
                radio.bind_selected(field);
            }
        }
        Some(other) => mismatch(element, &other, ctx),
        None => {}
    }
    Some(widget)
}

fn button(element: &Element, ctx: &mut Context<'_>) -> Option<Widget> {
    let mut widget = Widget::button(ctx.tree, id(element), text(element));
    let callback = ctx.callbacks.get(id(element)).cloned();
    if callback.is_none() {
        debug!(element = %element.describe(), "no callback registered");
    }
    if let Some(button) = widget.downcast_mut::<Button>() {
        button.set_callback(callback);
    }
    Some(widget)
}

fn row(element: &Element, ctx: &mut Context<'_>) -> Option<Widget> {
    Some(Widget::row(ctx.tree, id(element)))
}

fn column(element: &Element, ctx: &mut Context<'_>) -> Option<Widget> {
    Some(Widget::column(ctx.tree, id(element)))
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_share_a_strategy() {
        assert!(lookup("hlayout").is_some());
        assert!(lookup("row").is_some());
        assert!(lookup("vlayout").is_some());
        assert!(lookup("column").is_some());
        assert!(lookup("slider").is_none());
        assert_eq!(supported_tags().count(), 9);
    }

    #[test]
    fn unknown_input_type_is_rejected() {
        let tree = LayoutTree::new();
        let callbacks = HashMap::new();
        let mut report = Report::new();
        let mut ctx = Context {
            tree: &tree,
            binder: None,
            callbacks: &callbacks,
            report: &mut report,
        };
        let el = Element::new("input").with_attr("id", "d").with_attr("type", "date");
        assert!(input(&el, &mut ctx).is_none());
        assert_eq!(tree.node_count(), 0);
        assert_eq!(report.len(), 1);
    }

    #[test]
    fn binding_without_a_model_is_reported() {
        let tree = LayoutTree::new();
        let callbacks = HashMap::new();
        let mut report = Report::new();
        let mut ctx = Context {
            tree: &tree,
            binder: None,
            callbacks: &callbacks,
            report: &mut report,
        };
        let el = Element::new("checkbox").with_attr("id", "c").with_attr("bind", "enabled");
        let widget = checkbox(&el, &mut ctx).unwrap();
        assert!(widget.downcast_ref::<Checkbox>().unwrap().binding().is_none());
        assert_eq!(
            report.diagnostics(),
            &[Diagnostic::UnresolvedBinding {
                element: "checkbox#c".into(),
                bind: "enabled".into(),
            }]
        );
    }
}
