//! Fluent construction of widget trees in code.
//!
//! [`Ui`] hands out a typed [`Builder`] per widget variant. Every builder
//! shares the sizing and style setters; variant-specific setters (text,
//! bindings, click handlers, children) only exist on the builders they make
//! sense for. Setters only record state, and [`Builder::build`] derives the
//! solver configuration from the final state, so call order does not matter.
//!
//! ```ignore
//! let ui = Ui::new(&tree);
//! let form = ui
//!     .column("form")
//!     .padding(8.0)
//!     .child(ui.label("title", "Cities").bold(true))
//!     .child(ui.row("buttons").child(ui.button("ok", "OK").on_click(|| {})))
//!     .build();
//! ```

use std::marker::PhantomData;
use std::rc::Rc;

use tracing::warn;

use crate::binding::Field;
use crate::layout::LayoutTree;
use crate::style::{Align, AlignSelf, FontSize, Justify};
use crate::widget::Widget;
use crate::widgets::{Button, Callback, Checkbox, Label, NumberInput, RadioButton, TextInput};

/// Type-level tags selecting the setters available on a [`Builder`].
pub mod kind {
    #[derive(Debug)]
    pub struct Row;
    #[derive(Debug)]
    pub struct Column;
    #[derive(Debug)]
    pub struct Label;
    #[derive(Debug)]
    pub struct TextInput;
    #[derive(Debug)]
    pub struct NumberInput;
    #[derive(Debug)]
    pub struct Checkbox;
    #[derive(Debug)]
    pub struct Radio;
    #[derive(Debug)]
    pub struct Button;
}

// ---------------------------------------------------------------------------
// Ui
// ---------------------------------------------------------------------------

/// Factory for builders whose widgets live in one layout tree.
#[derive(Clone)]
pub struct Ui {
    tree: LayoutTree,
}

impl Ui {
    pub fn new(tree: &LayoutTree) -> Self {
        Self { tree: tree.clone() }
    }

    pub fn tree(&self) -> &LayoutTree {
        &self.tree
    }

    pub fn row(&self, id: impl Into<String>) -> Builder<kind::Row> {
        Builder::from_widget(Widget::row(&self.tree, id))
    }

    pub fn column(&self, id: impl Into<String>) -> Builder<kind::Column> {
        Builder::from_widget(Widget::column(&self.tree, id))
    }

    pub fn label(&self, id: impl Into<String>, text: impl Into<String>) -> Builder<kind::Label> {
        Builder::from_widget(Widget::label(&self.tree, id, text))
    }

    pub fn text_input(&self, id: impl Into<String>) -> Builder<kind::TextInput> {
        Builder::from_widget(Widget::text_input(&self.tree, id))
    }

    pub fn number_input(&self, id: impl Into<String>) -> Builder<kind::NumberInput> {
        Builder::from_widget(Widget::number_input(&self.tree, id))
    }

    pub fn checkbox(
        &self,
        id: impl Into<String>,
        text: impl Into<String>,
    ) -> Builder<kind::Checkbox> {
        Builder::from_widget(Widget::checkbox(&self.tree, id, text))
    }

    /// A radio button selecting `value` within `group`.
    pub fn radio(
        &self,
        id: impl Into<String>,
        text: impl Into<String>,
        group: impl Into<String>,
        value: i32,
    ) -> Builder<kind::Radio> {
        Builder::from_widget(Widget::radio(&self.tree, id, text, group, value))
    }

    pub fn button(&self, id: impl Into<String>, text: impl Into<String>) -> Builder<kind::Button> {
        Builder::from_widget(Widget::button(&self.tree, id, text))
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// A widget under construction.
#[derive(Debug)]
pub struct Builder<K> {
    widget: Widget,
    _kind: PhantomData<K>,
}

impl<K> Builder<K> {
    fn from_widget(widget: Widget) -> Self {
        Self {
            widget,
            _kind: PhantomData,
        }
    }

    /// Finish the widget.
    pub fn build(mut self) -> Widget {
        self.widget.configure_layout();
        self.widget
    }

    pub fn width(mut self, width: f32) -> Self {
        self.widget.set_width(Some(width));
        self
    }

    pub fn height(mut self, height: f32) -> Self {
        self.widget.set_height(Some(height));
        self
    }

    /// Grow along the parent's main axis with the given weight.
    pub fn flex(mut self, flex: f32) -> Self {
        self.widget.set_flex(Some(flex));
        self
    }

    pub fn margin(mut self, margin: f32) -> Self {
        self.widget.style_mut().margin = margin;
        self
    }

    pub fn padding(mut self, padding: f32) -> Self {
        self.widget.style_mut().padding = padding;
        self
    }

    pub fn gap(mut self, gap: f32) -> Self {
        self.widget.style_mut().gap = gap;
        self
    }

    pub fn justify(mut self, justify: Justify) -> Self {
        self.widget.style_mut().justify = justify;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.widget.style_mut().align = align;
        self
    }

    pub fn align_self(mut self, align_self: AlignSelf) -> Self {
        self.widget.style_mut().align_self = align_self;
        self
    }

    pub fn font_size(mut self, font_size: FontSize) -> Self {
        self.widget.style_mut().font_size = font_size;
        self
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.widget.style_mut().bold = bold;
        self
    }

    pub fn text_color(mut self, color: impl Into<String>) -> Self {
        self.widget.style_mut().text_color = color.into();
        self
    }

    pub fn background_color(mut self, color: impl Into<String>) -> Self {
        self.widget.style_mut().bg_color = color.into();
        self
    }

    pub fn variant(mut self, variant: impl Into<String>) -> Self {
        self.widget.style_mut().variant = variant.into();
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.widget.style_mut().disabled = disabled;
        self
    }

    pub fn stretch(mut self, stretch: bool) -> Self {
        self.widget.style_mut().stretch = stretch;
        self
    }

    pub fn wrap(mut self, wrap: bool) -> Self {
        self.widget.style_mut().wrap = wrap;
        self
    }
}

impl<K> From<Builder<K>> for Widget {
    fn from(builder: Builder<K>) -> Self {
        builder.build()
    }
}

// ── Variant setters ──────────────────────────────────────────────────

macro_rules! text_setter {
    ($($kind:ident => $variant:ident),+ $(,)?) => {
        $(
            impl Builder<kind::$kind> {
                pub fn text(mut self, text: impl Into<String>) -> Self {
                    if let Some(v) = self.widget.downcast_mut::<$variant>() {
                        v.set_text(text);
                    }
                    self
                }
            }
        )+
    };
}

text_setter! {
    Label => Label,
    Checkbox => Checkbox,
    Radio => RadioButton,
    Button => Button,
}

impl Builder<kind::TextInput> {
    pub fn bind(mut self, field: Field<String>) -> Self {
        if let Some(input) = self.widget.downcast_mut::<TextInput>() {
            input.bind(field);
        }
        self
    }
}

impl Builder<kind::NumberInput> {
    pub fn bind_float(mut self, field: Field<f32>) -> Self {
        if let Some(input) = self.widget.downcast_mut::<NumberInput>() {
            input.bind_float(field);
        }
        self
    }

    pub fn bind_int(mut self, field: Field<i32>) -> Self {
        if let Some(input) = self.widget.downcast_mut::<NumberInput>() {
            input.bind_int(field);
        }
        self
    }
}

impl Builder<kind::Checkbox> {
    pub fn bind(mut self, field: Field<bool>) -> Self {
        if let Some(checkbox) = self.widget.downcast_mut::<Checkbox>() {
            checkbox.bind(field);
        }
        self
    }
}

impl Builder<kind::Radio> {
    /// Bind the group's selected value; the button is on when it equals ours.
    pub fn bind_selected(mut self, field: Field<i32>) -> Self {
        if let Some(radio) = self.widget.downcast_mut::<RadioButton>() {
            radio.bind_selected(field);
        }
        self
    }

    pub fn group(mut self, group: impl Into<String>) -> Self {
        if let Some(radio) = self.widget.downcast_mut::<RadioButton>() {
            radio.set_group(group);
        }
        self
    }

    pub fn value(mut self, value: i32) -> Self {
        if let Some(radio) = self.widget.downcast_mut::<RadioButton>() {
            radio.set_value(value);
        }
        self
    }
}

impl Builder<kind::Button> {
    pub fn on_click(self, f: impl Fn() + 'static) -> Self {
        self.callback(Rc::new(f))
    }

    /// Use an already shared handler.
    pub fn callback(mut self, callback: Callback) -> Self {
        if let Some(button) = self.widget.downcast_mut::<Button>() {
            button.set_callback(Some(callback));
        }
        self
    }
}

// ── Containers ───────────────────────────────────────────────────────

macro_rules! container_setters {
    ($($kind:ident),+) => {
        $(
            impl Builder<kind::$kind> {
                /// Append a finished widget or another builder.
                pub fn child(mut self, child: impl Into<Widget>) -> Self {
                    if let Err(err) = self.widget.add_child(child.into()) {
                        warn!(%err, "child dropped");
                    }
                    self
                }

                pub fn children<I>(self, children: I) -> Self
                where
                    I: IntoIterator,
                    I::Item: Into<Widget>,
                {
                    children.into_iter().fold(self, |b, c| b.child(c))
                }
            }
        )+
    };
}

container_setters!(Row, Column);

// ===========================================================================
// Tests
// ===========================================================================
