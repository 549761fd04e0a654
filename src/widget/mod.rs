//! Widget system: the retained node type and container capability.
//!
//! - [`node`]: [`Widget`], [`WidgetKind`], the [`Variant`] try-cast trait
//! - [`container`]: [`Container`] children and the [`ContainerMut`] capability

pub mod container;
pub mod node;

pub use container::{Container, ContainerMut};
pub use node::{Frame, Variant, Widget, WidgetError, WidgetKind};
