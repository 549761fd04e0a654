//! Modification-time based file watching.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use slotmap::{new_key_type, SlotMap};
use tracing::debug;

new_key_type! {
    /// Handle for removing an observer again.
    pub struct ObserverId;
}

type Observer = Box<dyn FnMut(&Path)>;

/// Watches one file by polling its modification time.
pub struct FileWatcher {
    path: PathBuf,
    modified: Option<SystemTime>,
    observers: SlotMap<ObserverId, Observer>,
}

impl FileWatcher {
    /// Start watching `path`, taking its current modification time as the
    /// baseline. A file that does not exist yet has no baseline.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let modified = modified_time(&path);
        Self {
            path,
            modified,
            observers: SlotMap::with_key(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Modification time recorded at the last change or reset.
    pub fn last_modified(&self) -> Option<SystemTime> {
        self.modified
    }

    /// Compare the file's modification time with the recorded one. On a
    /// difference the new time is recorded and every observer is notified.
    /// An unreadable or missing file never counts as a change.
    pub fn has_changed(&mut self) -> bool {
        let Some(current) = modified_time(&self.path) else {
            return false;
        };
        if self.modified == Some(current) {
            return false;
        }
        debug!(path = %self.path.display(), "file changed");
        self.modified = Some(current);
        for observer in self.observers.values_mut() {
            observer(&self.path);
        }
        true
    }

    /// Re-read the modification time without notifying anyone.
    pub fn reset(&mut self) {
        self.modified = modified_time(&self.path);
    }

    pub fn add_observer(&mut self, observer: impl FnMut(&Path) + 'static) -> ObserverId {
        self.observers.insert(Box::new(observer))
    }

    /// Returns true if `id` was still registered.
    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        self.observers.remove(id).is_some()
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }
}

impl fmt::Debug for FileWatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileWatcher")
            .field("path", &self.path)
            .field("modified", &self.modified)
            .field("observers", &self.observers.len())
            .finish()
    }
}

fn modified_time(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}

// ===========================================================================
// Tests
// ===========================================================================
