//! Panels: top-level windows hosting one widget tree each.
//!
//! - [`panel`]: [`Panel`] with its size, DPI scale, open state and re-layout control
//! - [`registry`]: [`Registry`], the named and ordered collection of panels
//! - [`stats`]: [`LayoutStats`] per-panel solve telemetry

#[allow(clippy::module_inception)]
pub mod panel;
pub mod registry;
pub mod stats;

pub use panel::Panel;
pub use registry::Registry;
pub use stats::LayoutStats;
