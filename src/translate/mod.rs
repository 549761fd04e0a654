//! Markup to widget tree translation.
//!
//! A [`Translator`] turns a `<panel>` document into a [`Panel`] whose root is
//! the first widget element inside it. Element names are looked up in a
//! static strategy table, `bind` attributes are resolved through an optional
//! [`Binder`], and buttons pick their callback from the translator's callback
//! map by id. Everything short of an unreadable or malformed document is
//! recorded in the returned [`Report`] instead of failing.

mod attrs;
mod strategy;
mod validate;

pub use attrs::{apply_common, parse_flag, style_patch};
pub use strategy::supported_tags;
pub use validate::{describe, validate, Diagnostic, Report};

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tracing::{debug, info, warn};

use crate::binding::{Binder, Model};
use crate::config::{UiConfig, UnknownElementPolicy};
use crate::layout::LayoutTree;
use crate::markup::{parse_elements, Element, ParseError};
use crate::panel::Panel;
use crate::widget::Widget;
use crate::widgets::Callback;

use strategy::Context;

/// Errors that prevent a document from producing anything.
#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("expected a <panel> root element, found <{0}>")]
    MissingPanel(String),

    #[error("unknown element <{0}>")]
    UnknownElement(String),

    #[error("document contains no elements")]
    EmptyDocument,
}

/// A translation result together with its diagnostics.
#[derive(Debug)]
pub struct Translated<T> {
    pub value: T,
    pub report: Report,
}

impl<T> Translated<T> {
    pub fn into_parts(self) -> (T, Report) {
        (self.value, self.report)
    }
}

// ---------------------------------------------------------------------------
// Translator
// ---------------------------------------------------------------------------

/// Builds widgets and panels from markup.
pub struct Translator {
    tree: LayoutTree,
    config: UiConfig,
    binder: Option<Rc<dyn Binder>>,
    callbacks: HashMap<String, Callback>,
}

impl Translator {
    /// Create a translator producing widgets in `tree`.
    pub fn new(tree: &LayoutTree) -> Self {
        Self {
            tree: tree.clone(),
            config: UiConfig::default(),
            binder: None,
            callbacks: HashMap::new(),
        }
    }

    /// Set the configuration (builder pattern).
    pub fn with_config(mut self, config: UiConfig) -> Self {
        self.config = config;
        self
    }

    /// Resolve `bind` attributes through `binder` (builder pattern).
    pub fn with_binder(mut self, binder: Rc<dyn Binder>) -> Self {
        self.binder = Some(binder);
        self
    }

    /// Resolve `bind` attributes against `model` (builder pattern).
    pub fn with_model<R: 'static>(self, model: Model<R>) -> Self {
        self.with_binder(Rc::new(model))
    }

    pub fn set_binder(&mut self, binder: Option<Rc<dyn Binder>>) {
        self.binder = binder;
    }

    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    pub fn tree(&self) -> &LayoutTree {
        &self.tree
    }

    // ── Callbacks ────────────────────────────────────────────────────

    /// Register the click handler for buttons with id `id`, replacing any
    /// previous one. Only documents translated afterwards see it.
    pub fn add_callback(&mut self, id: impl Into<String>, callback: impl Fn() + 'static) {
        self.callbacks.insert(id.into(), Rc::new(callback));
    }

    /// Returns true if a handler was registered under `id`.
    pub fn remove_callback(&mut self, id: &str) -> bool {
        self.callbacks.remove(id).is_some()
    }

    pub fn clear_callbacks(&mut self) {
        self.callbacks.clear();
    }

    pub fn has_callback(&self, id: &str) -> bool {
        self.callbacks.contains_key(id)
    }

    // ── Documents ────────────────────────────────────────────────────

    /// Read and translate a panel document.
    pub fn load_panel(&self, path: impl AsRef<Path>) -> Result<Translated<Panel>, TranslateError> {
        let path = path.as_ref();
        let markup = std::fs::read_to_string(path).map_err(|source| TranslateError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let translated = self.parse_panel(&markup)?;
        info!(
            path = %path.display(),
            widgets = translated.value.root().map_or(0, Widget::count),
            diagnostics = translated.report.len(),
            "panel loaded"
        );
        Ok(translated)
    }

    /// Translate a panel document held in memory.
    pub fn parse_panel(&self, markup: &str) -> Result<Translated<Panel>, TranslateError> {
        let elements = parse_elements(markup)?;
        let (first, rest) = elements.split_first().ok_or(TranslateError::EmptyDocument)?;
        let mut report = Report::new();
        ignore_all(rest, "only the first top-level element is used", &mut report);
        let panel = self.panel(first, &mut report)?;
        Ok(Translated { value: panel, report })
    }

    /// Translate a fragment whose root is a widget element. The value is
    /// `None` if the root element was skipped.
    pub fn parse_widget(&self, markup: &str) -> Result<Translated<Option<Widget>>, TranslateError> {
        let elements = parse_elements(markup)?;
        let (first, rest) = elements.split_first().ok_or(TranslateError::EmptyDocument)?;
        let mut report = Report::new();
        ignore_all(rest, "only the first top-level element is used", &mut report);
        let widget = self.translate_element(first, &mut report)?;
        if let Some(root) = &widget {
            report.extend(validate(root));
        }
        Ok(Translated { value: widget, report })
    }

    /// Load and translate a document purely for its diagnostics.
    pub fn validate_file(&self, path: impl AsRef<Path>) -> Result<Report, TranslateError> {
        self.load_panel(path).map(|t| t.report)
    }

    /// Translate one element and its subtree.
    pub fn translate_element(
        &self,
        element: &Element,
        report: &mut Report,
    ) -> Result<Option<Widget>, TranslateError> {
        let Some(build) = strategy::lookup(&element.name) else {
            return match self.config.unknown_elements {
                UnknownElementPolicy::Skip => {
                    report.push(Diagnostic::UnknownElement {
                        tag: element.name.clone(),
                    });
                    Ok(None)
                }
                UnknownElementPolicy::Abort => {
                    Err(TranslateError::UnknownElement(element.name.clone()))
                }
            };
        };

        let mut ctx = Context {
            tree: &self.tree,
            binder: self.binder.as_deref(),
            callbacks: &self.callbacks,
            report: &mut *report,
        };
        let Some(mut widget) = build(element, &mut ctx) else {
            return Ok(None);
        };
        apply_common(&mut widget, element, report);

        if widget.accepts_children() {
            for child in &element.children {
                let Some(child) = self.translate_element(child, report)? else {
                    continue;
                };
                if let Err(err) = widget.add_child(child) {
                    warn!(%err, "child dropped");
                }
            }
        } else {
            let reason = format!("<{}> cannot hold children", element.name);
            ignore_all(&element.children, &reason, report);
        }
        Ok(Some(widget))
    }

    fn panel(&self, element: &Element, report: &mut Report) -> Result<Panel, TranslateError> {
        if element.name != "panel" {
            return Err(TranslateError::MissingPanel(element.name.clone()));
        }
        let title = element.attr("title").unwrap_or(self.config.default_title.as_str());
        let defaults = self.config.default_panel_size;
        let width = panel_dimension(element, "width", report).unwrap_or(defaults.width);
        let height = panel_dimension(element, "height", report).unwrap_or(defaults.height);

        let mut root = None;
        for (i, child) in element.children.iter().enumerate() {
            root = self.translate_element(child, report)?;
            if root.is_some() {
                ignore_all(
                    &element.children[i + 1..],
                    "a panel holds a single root widget",
                    report,
                );
                break;
            }
        }

        let mut panel =
            Panel::new(title, width, height).with_layout_epsilon(self.config.layout_epsilon);
        if let Some(root) = root {
            report.extend(validate(&root));
            panel.set_root(root);
        } else {
            debug!(title, "panel has no root widget");
        }
        Ok(panel)
    }
}

fn panel_dimension(element: &Element, name: &str, report: &mut Report) -> Option<f32> {
    let v = attrs::number::<f32>(element, name, report)?;
    if v <= 0.0 {
        report.push(attrs::invalid(element, name, element.attr(name).unwrap_or("")));
        return None;
    }
    Some(v)
}

fn ignore_all(elements: &[Element], reason: &str, report: &mut Report) {
    for element in elements {
        report.push(Diagnostic::IgnoredElement {
            element: element.describe(),
            reason: reason.to_string(),
        });
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use super::*;
    use crate::binding::Schema;
    use crate::config::UnknownElementPolicy;
    use crate::widgets::{Button, Checkbox, Label, NumberBinding, NumberInput, TextInput};
    use pretty_assertions::assert_eq;

    #[derive(Default)]
    struct Form {
        name: String,
        age: i32,
        height: f32,
        subscribed: bool,
    }

    fn translator(tree: &LayoutTree) -> (Translator, Rc<RefCell<Form>>) {
        let data = Rc::new(RefCell::new(Form {
            name: "Ada".into(),
            age: 36,
            height: 1.7,
            subscribed: true,
        }));
        let schema = Schema::new()
            .text("name", |f: &mut Form| &mut f.name)
            .int("age", |f: &mut Form| &mut f.age)
            .float("height", |f: &mut Form| &mut f.height)
            .flag("subscribed", |f: &mut Form| &mut f.subscribed);
        let t = Translator::new(tree).with_model(Model::new(data.clone(), schema));
        (t, data)
    }

    const FORM: &str = r#"
        <?xml version="1.0"?>
        <panel title="Profile" width="500" height="240">
          <vlayout id="root" padding="8">
            <label id="hello" text="Hello &amp; welcome" bold="true"/>
            <input id="name" type="text" bind="name" width="200"/>
            <input id="age" type="number" bind="age"/>
            <input id="height" type="number" bind="height"/>
            <checkbox id="sub" text="Subscribe" bind="subscribed"/>
            <button id="save" text="Save"/>
          </vlayout>
        </panel>"#;

    #[test]
    fn panel_document_translates() {
        let tree = LayoutTree::new();
        let (mut t, data) = translator(&tree);
        let saved = Rc::new(Cell::new(0));
        let counter = saved.clone();
        t.add_callback("save", move || counter.set(counter.get() + 1));

        let (panel, report) = t.parse_panel(FORM).unwrap().into_parts();
        assert!(report.is_clean(), "{report:?}");
        assert_eq!(panel.title(), "Profile");
        assert_eq!(panel.size().width, 500.0);
        assert_eq!(panel.size().height, 240.0);

        let root = panel.root().unwrap();
        assert_eq!(root.id(), "root");
        assert_eq!(root.children().len(), 6);
        assert_eq!(root.style().padding, 8.0);
        assert_eq!(tree.node_count(), 7);

        assert_eq!(panel.find_widget_as::<Label>("hello").unwrap().text(), "Hello & welcome");
        assert!(panel.find_widget("hello").unwrap().style().bold);
        assert_eq!(panel.find_widget("name").unwrap().width(), Some(200.0));

        let name = panel.find_widget_as::<TextInput>("name").unwrap();
        assert_eq!(name.binding().unwrap().get().as_deref(), Some("Ada"));
        assert!(matches!(
            panel.find_widget_as::<NumberInput>("age").unwrap().binding(),
            Some(NumberBinding::Int(_))
        ));
        assert!(matches!(
            panel.find_widget_as::<NumberInput>("height").unwrap().binding(),
            Some(NumberBinding::Float(_))
        ));
        let sub = panel.find_widget_as::<Checkbox>("sub").unwrap();
        assert!(sub.binding().unwrap().set(false));
        assert!(!data.borrow().subscribed);

        let save = panel.find_widget_as::<Button>("save").unwrap();
        save.click();
        assert_eq!(saved.get(), 1);
    }

    #[test]
    fn callbacks_are_looked_up_at_translation_time() {
        let tree = LayoutTree::new();
        let mut t = Translator::new(&tree);
        t.add_callback("go", || {});
        assert!(t.has_callback("go"));
        let doc = r#"<button id="go" text="Go"/>"#;

        let with = t.parse_widget(doc).unwrap().value.unwrap();
        assert!(with.downcast_ref::<Button>().unwrap().has_callback());

        assert!(t.remove_callback("go"));
        assert!(!t.remove_callback("go"));
        let without = t.parse_widget(doc).unwrap().value.unwrap();
        assert!(!without.downcast_ref::<Button>().unwrap().has_callback());

        t.add_callback("a", || {});
        t.clear_callbacks();
        assert!(!t.has_callback("a"));
    }

    #[test]
    fn unknown_elements_are_skipped_by_default() {
        let tree = LayoutTree::new();
        let t = Translator::new(&tree);
        let doc = r#"<row id="r"><slider id="s"/><label id="l" text="x"/></row>"#;
        let (widget, report) = t.parse_widget(doc).unwrap().into_parts();
        let widget = widget.unwrap();
        assert_eq!(widget.children().len(), 1);
        assert_eq!(widget.children()[0].id(), "l");
        assert_eq!(
            report.diagnostics(),
            &[Diagnostic::UnknownElement { tag: "slider".into() }]
        );
    }

    #[test]
    fn unknown_elements_abort_when_configured() {
        let tree = LayoutTree::new();
        let t = Translator::new(&tree)
            .with_config(UiConfig::new().with_unknown_elements(UnknownElementPolicy::Abort));
        let doc = r#"<panel><row><slider/></row></panel>"#;
        let err = t.parse_panel(doc).unwrap_err();
        assert!(matches!(err, TranslateError::UnknownElement(tag) if tag == "slider"));
        assert_eq!(tree.node_count(), 0);
    }

    #[test]
    fn unresolved_bindings_leave_widgets_unbound() {
        let tree = LayoutTree::new();
        let (t, _) = translator(&tree);
        let doc = r#"<column>
            <input id="a" type="text" bind="email"/>
            <input id="b" type="text" bind="age"/>
            <checkbox id="c" bind="name"/>
        </column>"#;
        let (widget, report) = t.parse_widget(doc).unwrap().into_parts();
        let widget = widget.unwrap();
        assert!(widget.find_as::<TextInput>("a").unwrap().binding().is_none());
        assert!(widget.find_as::<TextInput>("b").unwrap().binding().is_none());
        assert!(widget.find_as::<Checkbox>("c").unwrap().binding().is_none());
        let binds: Vec<_> = report
            .iter()
            .filter_map(|d| match d {
                Diagnostic::UnresolvedBinding { bind, .. } => Some(bind.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(binds, vec!["email", "age", "name"]);
    }

    #[test]
    fn bad_panel_attributes_fall_back_to_defaults() {
        let tree = LayoutTree::new();
        let t = Translator::new(&tree)
            .with_config(UiConfig::new().with_default_title("Untitled"));
        let (panel, report) = t
            .parse_panel(r#"<panel width="wide" height="-5"/>"#)
            .unwrap()
            .into_parts();
        assert_eq!(panel.title(), "Untitled");
        assert_eq!(panel.size().width, 400.0);
        assert_eq!(panel.size().height, 300.0);
        assert!(panel.root().is_none());
        assert_eq!(report.len(), 2);
    }

    #[test]
    fn document_shape_errors() {
        let tree = LayoutTree::new();
        let t = Translator::new(&tree);
        assert!(matches!(t.parse_panel("   "), Err(TranslateError::EmptyDocument)));
        assert!(matches!(
            t.parse_panel(r#"<vlayout/>"#),
            Err(TranslateError::MissingPanel(name)) if name == "vlayout"
        ));
        assert!(matches!(
            t.parse_panel(r#"<panel><row></panel>"#),
            Err(TranslateError::Parse(_))
        ));
    }

    #[test]
    fn extra_roots_and_leaf_children_are_ignored() {
        let tree = LayoutTree::new();
        let t = Translator::new(&tree);
        let doc = r#"<panel>
            <bogus/>
            <label id="first"><label id="inner"/></label>
            <label id="second"/>
        </panel>"#;
        let (panel, report) = t.parse_panel(doc).unwrap().into_parts();
        assert_eq!(panel.root().unwrap().id(), "first");
        assert_eq!(tree.node_count(), 1);
        let kinds: Vec<String> = report.iter().map(ToString::to_string).collect();
        assert_eq!(
            kinds,
            vec![
                "unknown element <bogus> skipped".to_string(),
                "label#inner ignored: <label> cannot hold children".to_string(),
                "label#second ignored: a panel holds a single root widget".to_string(),
            ]
        );
    }

    #[test]
    fn nested_same_axis_is_reported_but_kept() {
        let tree = LayoutTree::new();
        let t = Translator::new(&tree);
        let doc = r#"<panel><vlayout id="a"><column id="b"/></vlayout></panel>"#;
        let (panel, report) = t.parse_panel(doc).unwrap().into_parts();
        assert!(panel.find_widget("b").is_some());
        assert_eq!(
            report.diagnostics(),
            &[Diagnostic::NestedSameAxis {
                parent: "vlayout#a".into(),
                child: "vlayout#b".into(),
            }]
        );
    }

    #[test]
    fn every_style_attribute_reaches_the_widget() {
        use crate::style::{Align, AlignSelf, FontSize, Justify};

        let tree = LayoutTree::new();
        let t = Translator::new(&tree);
        let doc = r#"<hlayout id="h" width="120" height="40" flex="2"
            margin="3" padding="4" gap="5" justify="space-evenly" align="center"
            align-self="flex-end" disabled="true" variant="primary" font-size="large"
            bold="1" text-color="red" bg-color="blue" stretch="true" wrap="true"/>"#;
        let (widget, report) = t.parse_widget(doc).unwrap().into_parts();
        assert!(report.is_clean(), "{report:?}");
        let widget = widget.unwrap();

        assert_eq!(widget.width(), Some(120.0));
        assert_eq!(widget.height(), Some(40.0));
        assert_eq!(widget.flex(), Some(2.0));

        let s = widget.style();
        assert_eq!(s.margin, 3.0);
        assert_eq!(s.padding, 4.0);
        assert_eq!(s.gap, 5.0);
        assert_eq!(s.justify, Justify::SpaceEvenly);
        assert_eq!(s.align, Align::Center);
        assert_eq!(s.align_self, AlignSelf::FlexEnd);
        assert!(s.disabled);
        assert_eq!(s.variant, "primary");
        assert_eq!(s.font_size, FontSize::Large);
        assert!(s.bold);
        assert_eq!(s.text_color, "red");
        assert_eq!(s.bg_color, "blue");
        assert!(s.stretch);
        assert!(s.wrap);

        let solver = widget.layout_node().style().unwrap();
        assert_eq!(solver.flex_wrap, taffy::style::FlexWrap::Wrap);
        assert_eq!(solver.flex_grow, 2.0);
        assert_eq!(solver.align_self, Some(taffy::style::AlignItems::FlexEnd));
        assert_eq!(solver.justify_content, Some(taffy::style::JustifyContent::SpaceEvenly));
    }

    #[test]
    fn unreadable_file_is_an_io_error() {
        let tree = LayoutTree::new();
        let t = Translator::new(&tree);
        let dir = tempfile::tempdir().unwrap();
        let err = t.validate_file(dir.path().join("missing.xml")).unwrap_err();
        assert!(matches!(err, TranslateError::Io { .. }));
        assert!(err.to_string().starts_with("failed to read"));
    }

    #[test]
    fn panel_uses_configured_epsilon() {
        let tree = LayoutTree::new();
        let t = Translator::new(&tree).with_config(UiConfig::new().with_layout_epsilon(3.0));
        let doc = r#"<panel><vlayout><label text="x"/></vlayout></panel>"#;
        let mut panel = t.parse_panel(doc).unwrap().value;
        let mut ui = crate::testing::HeadlessBackend::new(400.0, 300.0);
        panel.render(&mut ui);
        let solves = panel.stats().solves;
        ui.set_available(402.0, 298.0);
        panel.render(&mut ui);
        assert_eq!(panel.stats().solves, solves);
    }
}
