//! Style model: the per-widget visual and layout properties.
//!
//! - [`model`]: [`Style`], [`StylePatch`] and the keyword enums with their markup spellings

pub mod model;

pub use model::{Align, AlignSelf, FontSize, Justify, Style, StylePatch, UnknownKeyword};
