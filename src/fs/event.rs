use std::path::{Path, PathBuf};

/// A change under the watched directory. Paths are relative to its root.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FsEvent {
    FileAdded(PathBuf),
    FileRemoved(PathBuf),
    FileModified(PathBuf),
    DirAdded(PathBuf),
    DirRemoved(PathBuf),
    /// Something was removed but the watcher could not tell whether it was a
    /// file or a folder.
    PathRemoved(PathBuf),
}

impl FsEvent {
    pub fn path(&self) -> &Path {
        match self {
            FsEvent::FileAdded(path)
            | FsEvent::FileRemoved(path)
            | FsEvent::FileModified(path)
            | FsEvent::DirAdded(path)
            | FsEvent::DirRemoved(path)
            | FsEvent::PathRemoved(path) => path,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            FsEvent::FileAdded(_) => "file_added",
            FsEvent::FileRemoved(_) => "file_removed",
            FsEvent::FileModified(_) => "file_modified",
            FsEvent::DirAdded(_) => "dir_added",
            FsEvent::DirRemoved(_) => "dir_removed",
            FsEvent::PathRemoved(_) => "path_removed",
        }
    }

    /// The same change with its path moved below `prefix`.
    pub(crate) fn under(self, prefix: &Path) -> Self {
        match self {
            FsEvent::FileAdded(path) => FsEvent::FileAdded(prefix.join(path)),
            FsEvent::FileRemoved(path) => FsEvent::FileRemoved(prefix.join(path)),
            FsEvent::FileModified(path) => FsEvent::FileModified(prefix.join(path)),
            FsEvent::DirAdded(path) => FsEvent::DirAdded(prefix.join(path)),
            FsEvent::DirRemoved(path) => FsEvent::DirRemoved(prefix.join(path)),
            FsEvent::PathRemoved(path) => FsEvent::PathRemoved(prefix.join(path)),
        }
    }
}
