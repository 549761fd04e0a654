//! Reloading panel documents when they change on disk.
//!
//! Polling only: call [`HotReload::poll`] once per frame. There is no
//! background thread and no filesystem notification API involved.

mod hot;
mod watcher;

pub use hot::{HotReload, ReloadOutcome};
pub use watcher::{FileWatcher, ObserverId};
