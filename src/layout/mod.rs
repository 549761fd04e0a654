//! Layout: the bridge between widgets and the taffy flexbox solver.
//!
//! - [`tree`]: [`LayoutTree`] (shared solver handle) and [`LayoutNode`] (one owned solver node)
//! - [`resolve`]: widget dimensions and [`Style`](crate::style::Style) -> `taffy::Style`

pub mod resolve;
pub mod tree;

pub use resolve::{resolve_layout, Axis, LayoutSpec};
pub use tree::{Available, LayoutNode, LayoutTree};
