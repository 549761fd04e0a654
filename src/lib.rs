//! # flexform
//!
//! Flexbox-laid-out forms for immediate-mode GUIs.
//!
//! flexform keeps a retained widget tree whose geometry is solved by
//! [taffy](https://crates.io/crates/taffy) and draws it every frame through a
//! small [`render::Backend`] trait. Trees come from XML-like markup or from a
//! fluent builder, and input widgets read and write an application record
//! through typed field bindings.
//!
//! ## Core Systems
//!
//! - **[`widget`]**: the `Widget` node, its closed kind enum and container capability
//! - **[`widgets`]**: label, text and number inputs, checkbox, radio button, button
//! - **[`layout`]**: taffy node ownership and style resolution
//! - **[`style`]**: presentation fields and keyword enums
//! - **[`binding`]**: field accessors and the record schema used by `bind`
//! - **[`builder`]**: fluent construction in code
//! - **[`markup`]**: tokenizer and parser for the panel document format
//! - **[`translate`]**: markup to widget tree, with diagnostics
//! - **[`panel`]**: panels, DPI scale, epsilon-gated relayout and the registry
//! - **[`reload`]**: polling file watcher and panel hot reload
//! - **[`render`]**: the immediate-mode backend trait
//! - **[`testing`]**: headless backend and render transcripts
//! - **[`config`]**: library-wide settings
//! - **[`geometry`]**: `Extent` and `Bounds` primitives

// Foundation
pub mod config;
pub mod geometry;

// Core systems
pub mod binding;
pub mod layout;
pub mod style;

// Widget system
pub mod builder;
pub mod widget;
pub mod widgets;

// Documents
pub mod markup;
pub mod reload;
pub mod translate;

// Rendering
pub mod panel;
pub mod render;
pub mod testing;

pub use binding::{Binder, BoundField, Field, FieldPath, Model, Schema};
pub use builder::{Builder, Ui};
pub use config::{UiConfig, UnknownElementPolicy};
pub use geometry::{Bounds, Extent};
pub use layout::{Available, LayoutTree};
pub use panel::{Panel, Registry};
pub use render::Backend;
pub use translate::{Diagnostic, Report, TranslateError, Translated, Translator};
pub use widget::{Widget, WidgetError, WidgetKind};
