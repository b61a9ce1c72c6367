//! Host-side collaborators that turn a directory on disk into `FsEvent`s.

use std::ffi::OsStr;
use std::path::Path;

mod event;
mod scan;
mod watch;

pub use event::FsEvent;
pub use scan::scan_directory;
pub use watch::{FsWatcher, spawn_watcher};

/// Entry names skipped at any depth.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IgnoreList {
    names: Vec<String>,
}

impl IgnoreList {
    pub fn new(names: impl IntoIterator<Item = String>) -> Self {
        Self {
            names: names.into_iter().collect(),
        }
    }

    pub fn with(mut self, extra: impl IntoIterator<Item = String>) -> Self {
        self.names.extend(extra);
        self
    }

    pub fn is_ignored(&self, name: &OsStr) -> bool {
        self.names.iter().any(|ignored| OsStr::new(ignored) == name)
    }

    pub fn covers(&self, relative: &Path) -> bool {
        relative
            .components()
            .any(|component| self.is_ignored(component.as_os_str()))
    }
}

impl Default for IgnoreList {
    fn default() -> Self {
        Self::new(
            [".git", "target", "node_modules", ".DS_Store"]
                .into_iter()
                .map(str::to_owned),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_list_skips_vcs_and_build_output() {
        let ignore = IgnoreList::default();
        assert!(ignore.is_ignored(OsStr::new(".git")));
        assert!(ignore.covers(Path::new("crate/target/debug/app")));
        assert!(!ignore.covers(Path::new("src/targets.rs")));
    }

    #[test]
    fn extra_names_extend_the_defaults() {
        let ignore = IgnoreList::default().with(["dist".to_owned()]);
        assert!(ignore.covers(Path::new("web/dist/app.js")));
        assert!(ignore.covers(Path::new(".git/HEAD")));
    }
}
