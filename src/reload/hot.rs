//! Swapping panels in a registry when their documents change.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::panel::Registry;
use crate::translate::{Report, TranslateError, Translator};

use super::watcher::FileWatcher;

/// What happened to one panel during a reload.
#[derive(Debug)]
pub enum ReloadOutcome {
    /// The document translated and the new panel replaced the old one.
    Reloaded { name: String, report: Report },
    /// The document could not be loaded; the old panel is untouched.
    Failed { name: String, error: TranslateError },
}

impl ReloadOutcome {
    pub fn name(&self) -> &str {
        match self {
            ReloadOutcome::Reloaded { name, .. } | ReloadOutcome::Failed { name, .. } => name,
        }
    }

    pub fn is_reloaded(&self) -> bool {
        matches!(self, ReloadOutcome::Reloaded { .. })
    }
}

/// Panel names paired with the documents they are loaded from.
#[derive(Debug, Default)]
pub struct HotReload {
    watchers: BTreeMap<String, FileWatcher>,
}

impl HotReload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reload panel `name` from `path` whenever the file changes. Replaces
    /// any previous watch for `name`.
    pub fn watch(&mut self, name: impl Into<String>, path: impl Into<PathBuf>) {
        self.watchers.insert(name.into(), FileWatcher::new(path));
    }

    pub fn unwatch(&mut self, name: &str) -> bool {
        self.watchers.remove(name).is_some()
    }

    pub fn is_watching(&self, name: &str) -> bool {
        self.watchers.contains_key(name)
    }

    pub fn path(&self, name: &str) -> Option<&Path> {
        self.watchers.get(name).map(FileWatcher::path)
    }

    pub fn watcher_mut(&mut self, name: &str) -> Option<&mut FileWatcher> {
        self.watchers.get_mut(name)
    }

    /// Check every watched document once and reload the changed ones.
    pub fn poll(&mut self, registry: &mut Registry, translator: &Translator) -> Vec<ReloadOutcome> {
        self.watchers
            .iter_mut()
            .filter_map(|(name, watcher)| {
                watcher
                    .has_changed()
                    .then(|| reload(name, watcher.path(), registry, translator))
            })
            .collect()
    }

    /// Reload `name` regardless of its modification time. `None` if `name`
    /// is not watched.
    pub fn reload_now(
        &mut self,
        name: &str,
        registry: &mut Registry,
        translator: &Translator,
    ) -> Option<ReloadOutcome> {
        let watcher = self.watchers.get_mut(name)?;
        watcher.reset();
        Some(reload(name, watcher.path(), registry, translator))
    }

    /// Load every watched document now, e.g. at startup.
    pub fn load_all(&mut self, registry: &mut Registry, translator: &Translator) -> Vec<ReloadOutcome> {
        self.watchers
            .iter_mut()
            .map(|(name, watcher)| {
                watcher.reset();
                reload(name, watcher.path(), registry, translator)
            })
            .collect()
    }
}

fn reload(name: &str, path: &Path, registry: &mut Registry, translator: &Translator) -> ReloadOutcome {
    match translator.load_panel(path) {
        Ok(translated) => {
            let (mut panel, report) = translated.into_parts();
            if let Some(previous) = registry.get(name) {
                panel.set_open(previous.is_open());
                let scale = previous.dpi_scale();
                if scale != panel.dpi_scale() {
                    panel.set_dpi_scale(scale);
                }
            }
            registry.add(name, panel);
            info!(name, path = %path.display(), diagnostics = report.len(), "panel reloaded");
            ReloadOutcome::Reloaded {
                name: name.to_string(),
                report,
            }
        }
        Err(error) => {
            warn!(name, path = %path.display(), %error, "reload failed, keeping previous panel");
            ReloadOutcome::Failed {
                name: name.to_string(),
                error,
            }
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
