//! The widget node.
//!
//! Every widget is one [`Widget`] value: identity, explicit dimensions, a
//! [`Style`], the last solved [`Bounds`], and a closed [`WidgetKind`] that says
//! what it draws. Each widget exclusively owns one [`LayoutNode`]; dropping the
//! widget releases it.

use tracing::debug;

use crate::geometry::Bounds;
use crate::layout::{resolve_layout, Available, Axis, LayoutNode, LayoutSpec, LayoutTree};
use crate::render::Backend;
use crate::style::{Style, StylePatch};
use crate::widgets::{Button, Checkbox, Label, NumberInput, RadioButton, TextInput};

use super::container::{Container, ContainerMut};

/// Errors from structural widget operations.
#[derive(Debug, thiserror::Error)]
pub enum WidgetError {
    #[error("widget `{0}` cannot hold children")]
    NotAContainer(String),
    #[error("widget `{0}` belongs to a different layout tree")]
    ForeignTree(String),
}

// ---------------------------------------------------------------------------
// WidgetKind
// ---------------------------------------------------------------------------

/// What a widget is.
#[derive(Debug)]
pub enum WidgetKind {
    Container(Container),
    Label(Label),
    TextInput(TextInput),
    NumberInput(NumberInput),
    Checkbox(Checkbox),
    Radio(RadioButton),
    Button(Button),
}

impl WidgetKind {
    /// Short lowercase name, matching the markup tag where one exists.
    pub fn name(&self) -> &'static str {
        match self {
            WidgetKind::Container(c) => c.axis().tag(),
            WidgetKind::Label(_) => "label",
            WidgetKind::TextInput(_) | WidgetKind::NumberInput(_) => "input",
            WidgetKind::Checkbox(_) => "checkbox",
            WidgetKind::Radio(_) => "radio",
            WidgetKind::Button(_) => "button",
        }
    }
}

/// Typed narrowing from a [`WidgetKind`] to one concrete variant.
pub trait Variant: Sized {
    fn narrow(kind: &WidgetKind) -> Option<&Self>;
    fn narrow_mut(kind: &mut WidgetKind) -> Option<&mut Self>;
}

macro_rules! impl_variant {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl Variant for $ty {
                fn narrow(kind: &WidgetKind) -> Option<&Self> {
                    match kind {
                        WidgetKind::$variant(v) => Some(v),
                        _ => None,
                    }
                }

                fn narrow_mut(kind: &mut WidgetKind) -> Option<&mut Self> {
                    match kind {
                        WidgetKind::$variant(v) => Some(v),
                        _ => None,
                    }
                }
            }
        )+
    };
}

impl_variant! {
    Container => Container,
    Label => Label,
    TextInput => TextInput,
    NumberInput => NumberInput,
    Checkbox => Checkbox,
    RadioButton => Radio,
    Button => Button,
}

/// What a leaf variant needs from its widget while drawing.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub id: &'a str,
    pub style: &'a Style,
    pub bounds: Bounds,
}

impl Frame<'_> {
    /// The solved width, if the solver gave the widget any.
    pub fn width(&self) -> Option<f32> {
        (self.bounds.width > 0.0).then_some(self.bounds.width)
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

/// A node of the retained widget tree.
#[derive(Debug)]
pub struct Widget {
    id: String,
    width: Option<f32>,
    height: Option<f32>,
    flex: Option<f32>,
    style: Style,
    bounds: Bounds,
    kind: WidgetKind,
    node: LayoutNode,
}

impl Widget {
    /// Create a widget of `kind`, allocating its solver node from `tree`.
    pub fn new(tree: &LayoutTree, id: impl Into<String>, kind: WidgetKind) -> Self {
        let mut widget = Self {
            id: id.into(),
            width: None,
            height: None,
            flex: None,
            style: Style::default(),
            bounds: Bounds::default(),
            kind,
            node: tree.create_node(),
        };
        widget.configure_layout();
        widget
    }

    /// Create an empty row container.
    pub fn row(tree: &LayoutTree, id: impl Into<String>) -> Self {
        Self::new(tree, id, WidgetKind::Container(Container::new(Axis::Row)))
    }

    /// Create an empty column container.
    pub fn column(tree: &LayoutTree, id: impl Into<String>) -> Self {
        Self::new(tree, id, WidgetKind::Container(Container::new(Axis::Column)))
    }

    // -- identity and dimensions ------------------------------------------

    /// The caller-supplied id. Ids are not required to be unique.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    pub fn width(&self) -> Option<f32> {
        self.width
    }

    pub fn height(&self) -> Option<f32> {
        self.height
    }

    pub fn flex(&self) -> Option<f32> {
        self.flex
    }

    /// Set the explicit width; `None` lets the solver size it.
    pub fn set_width(&mut self, width: Option<f32>) {
        self.width = width;
        self.configure_layout();
    }

    /// Set the explicit height; `None` lets the solver size it.
    pub fn set_height(&mut self, height: Option<f32>) {
        self.height = height;
        self.configure_layout();
    }

    /// Set the flex factor; `None` removes it.
    pub fn set_flex(&mut self, flex: Option<f32>) {
        self.flex = flex;
        self.configure_layout();
    }

    // -- style -------------------------------------------------------------

    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Mutable access to the style. Call [`configure_layout`](Self::configure_layout)
    /// afterwards if layout-relevant fields changed.
    pub fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }

    /// Apply `patch` and re-derive the solver configuration.
    pub fn apply_style(&mut self, patch: &StylePatch) {
        self.style.apply(patch);
        self.configure_layout();
    }

    /// Re-derive this node's solver style from dimensions, flex and style.
    pub fn configure_layout(&mut self) {
        let spec = LayoutSpec {
            axis: self.axis(),
            width: self.width,
            height: self.height,
            flex: self.flex,
            style: &self.style,
        };
        self.node.set_style(resolve_layout(&spec));
    }

    // -- kind --------------------------------------------------------------

    pub fn kind(&self) -> &WidgetKind {
        &self.kind
    }

    pub fn kind_mut(&mut self) -> &mut WidgetKind {
        &mut self.kind
    }

    /// The container axis, or `None` for leaves.
    pub fn axis(&self) -> Option<Axis> {
        match &self.kind {
            WidgetKind::Container(c) => Some(c.axis()),
            _ => None,
        }
    }

    /// True for rows and columns.
    pub fn accepts_children(&self) -> bool {
        matches!(self.kind, WidgetKind::Container(_))
    }

    /// Narrow to a concrete variant.
    pub fn downcast_ref<T: Variant>(&self) -> Option<&T> {
        T::narrow(&self.kind)
    }

    pub fn downcast_mut<T: Variant>(&mut self) -> Option<&mut T> {
        T::narrow_mut(&mut self.kind)
    }

    // -- layout ------------------------------------------------------------

    /// The solver node owned by this widget.
    pub fn layout_node(&self) -> &LayoutNode {
        &self.node
    }

    /// The last solved box, relative to the parent.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Solve this subtree against `available`.
    ///
    /// On an axis with a definite available size and no explicit dimension,
    /// the widget fills the available size minus its margins. Every child of
    /// a container is then re-solved against its own computed box.
    pub fn update_layout(&mut self, available: Available) {
        let margins = self.style.margin.max(0.0) * 2.0;
        let fill = |explicit: Option<f32>, space: Option<f32>| match explicit {
            Some(_) => None,
            None => space.map(|s| (s - margins).max(0.0)),
        };
        let pin = taffy::geometry::Size {
            width: fill(self.width, available.width),
            height: fill(self.height, available.height),
        };
        self.solve(available, pin);
    }

    fn solve(&mut self, available: Available, pin: taffy::geometry::Size<Option<f32>>) {
        if !self.node.solve(available, pin) {
            debug!(id = %self.id, "layout skipped");
            return;
        }
        if let Some(bounds) = self.node.bounds() {
            self.bounds = bounds;
        }
        if let WidgetKind::Container(container) = &mut self.kind {
            for child in container.children_mut() {
                let Some(placed) = child.node.bounds() else {
                    continue;
                };
                let own = taffy::geometry::Size {
                    width: Some(placed.width),
                    height: Some(placed.height),
                };
                child.solve(Available::definite(placed.width, placed.height), own);
                child.bounds = placed;
            }
        }
    }

    // -- rendering ---------------------------------------------------------

    /// Draw this widget and its subtree onto `ui`.
    pub fn render(&self, ui: &mut dyn Backend) {
        let frame = Frame {
            id: &self.id,
            style: &self.style,
            bounds: self.bounds,
        };
        match &self.kind {
            WidgetKind::Container(c) => c.render(ui),
            WidgetKind::Label(w) => w.render(&frame, ui),
            WidgetKind::TextInput(w) => w.render(&frame, ui),
            WidgetKind::NumberInput(w) => w.render(&frame, ui),
            WidgetKind::Checkbox(w) => w.render(&frame, ui),
            WidgetKind::Radio(w) => w.render(&frame, ui),
            WidgetKind::Button(w) => w.render(&frame, ui),
        }
    }

    // -- tree --------------------------------------------------------------

    /// Container capability, or `None` for leaves.
    pub fn as_container_mut(&mut self) -> Option<ContainerMut<'_>> {
        match &mut self.kind {
            WidgetKind::Container(container) => Some(ContainerMut::new(&self.node, container)),
            _ => None,
        }
    }

    /// Direct children; empty for leaves.
    pub fn children(&self) -> &[Widget] {
        match &self.kind {
            WidgetKind::Container(c) => c.children(),
            _ => &[],
        }
    }

    /// Append `child`. Fails if this widget is a leaf.
    pub fn add_child(&mut self, child: Widget) -> Result<(), WidgetError> {
        let id = self.id.clone();
        match self.as_container_mut() {
            Some(mut container) => container.add_child(child),
            None => Err(WidgetError::NotAContainer(id)),
        }
    }

    /// Detach and return the first direct child with `id`.
    pub fn remove_child(&mut self, id: &str) -> Option<Widget> {
        self.as_container_mut()?.remove_child(id)
    }

    /// First direct child with `id`.
    pub fn find_child(&self, id: &str) -> Option<&Widget> {
        self.children().iter().find(|c| c.id == id)
    }

    /// This widget or its first depth-first descendant with `id`.
    pub fn find(&self, id: &str) -> Option<&Widget> {
        if self.id == id {
            return Some(self);
        }
        self.children().iter().find_map(|c| c.find(id))
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Widget> {
        if self.id == id {
            return Some(self);
        }
        match &mut self.kind {
            WidgetKind::Container(c) => c.children_mut().iter_mut().find_map(|w| w.find_mut(id)),
            _ => None,
        }
    }

    /// [`find`](Self::find) narrowed to variant `T`; `None` if the first
    /// widget with `id` is of another kind.
    pub fn find_as<T: Variant>(&self, id: &str) -> Option<&T> {
        self.find(id)?.downcast_ref::<T>()
    }

    /// Number of widgets in this subtree, including this one.
    pub fn count(&self) -> usize {
        1 + self.children().iter().map(Widget::count).sum::<usize>()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
