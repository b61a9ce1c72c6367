use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::{info, warn};
use walkdir::WalkDir;

use super::{FsEvent, IgnoreList};

/// Walks `root` and reports every folder and file as an addition, parents
/// before their contents and siblings by name.
pub fn scan_directory(root: &Path, ignore: &IgnoreList) -> Result<Vec<FsEvent>> {
    if !root.is_dir() {
        bail!("{} is not a directory", root.display());
    }

    let mut events = Vec::new();
    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !ignore.is_ignored(entry.file_name()));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(error) => {
                warn!(%error, "skipping unreadable entry");
                continue;
            }
        };
        if entry.depth() == 0 {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(root)
            .with_context(|| format!("{} escaped the scan root", entry.path().display()))?
            .to_path_buf();
        if entry.file_type().is_dir() {
            events.push(FsEvent::DirAdded(relative));
        } else {
            events.push(FsEvent::FileAdded(relative));
        }
    }

    info!(root = %root.display(), events = events.len(), "directory scanned");
    Ok(events)
}
