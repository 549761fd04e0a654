//! Rendering contract between widgets and an immediate-mode backend.

pub mod backend;

pub use backend::Backend;
