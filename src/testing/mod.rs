//! Headless testing: a recording backend and transcript helpers.
//!
//! Use [`HeadlessBackend`] to render panels and widgets without a window,
//! script user edits and clicks, and inspect the recorded [`DrawCommand`]s.
//! Use [`render_to_string`] and [`transcript`] to turn a frame into plain text
//! for snapshot-style assertions.

pub mod headless;
pub mod transcript;

pub use headless::{DrawCommand, HeadlessBackend};
pub use transcript::{render_to_string, transcript};
