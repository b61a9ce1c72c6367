use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};

use anyhow::{Context, Result};
use notify::event::{CreateKind, ModifyKind, RemoveKind, RenameMode};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{info, warn};

use super::{FsEvent, IgnoreList, scan_directory};

/// A recursive watcher whose events queue up until the frame driver drains them.
pub struct FsWatcher {
    _watcher: RecommendedWatcher,
    rx: Receiver<FsEvent>,
}

impl FsWatcher {
    /// Everything received since the last call, without blocking.
    pub fn drain(&self) -> Vec<FsEvent> {
        self.rx.try_iter().collect()
    }
}

pub fn spawn_watcher(root: &Path, ignore: IgnoreList) -> Result<FsWatcher> {
    let root = root
        .canonicalize()
        .with_context(|| format!("failed to resolve watch root {}", root.display()))?;
    let (tx, rx) = mpsc::channel();

    let callback_root = root.clone();
    let mut watcher = notify::recommended_watcher(move |result: notify::Result<Event>| {
        match result {
            Ok(event) => {
                for fs_event in translate(&callback_root, &ignore, &event) {
                    if tx.send(fs_event).is_err() {
                        return;
                    }
                }
            }
            Err(error) => warn!(%error, "watch error"),
        }
    })
    .context("failed to create file watcher")?;

    watcher
        .watch(&root, RecursiveMode::Recursive)
        .with_context(|| format!("failed to watch {}", root.display()))?;
    info!(root = %root.display(), "watching directory");

    Ok(FsWatcher {
        _watcher: watcher,
        rx,
    })
}

/// Maps one notify event onto zero or more tree changes relative to `root`.
pub(crate) fn translate(root: &Path, ignore: &IgnoreList, event: &Event) -> Vec<FsEvent> {
    let to_relative = |path: &PathBuf| -> Option<PathBuf> {
        let relative = path.strip_prefix(root).ok()?;
        if relative.as_os_str().is_empty() || ignore.covers(relative) {
            return None;
        }
        Some(relative.to_path_buf())
    };

    let mut events = Vec::new();
    match event.kind {
        EventKind::Create(kind) => {
            for path in &event.paths {
                let Some(relative) = to_relative(path) else {
                    continue;
                };
                let is_dir = match kind {
                    CreateKind::Folder => true,
                    CreateKind::File => false,
                    _ => path.is_dir(),
                };
                push_appeared(&mut events, path, relative, is_dir, ignore);
            }
        }
        EventKind::Modify(ModifyKind::Name(mode)) => {
            for (index, path) in event.paths.iter().enumerate() {
                let Some(relative) = to_relative(path) else {
                    continue;
                };
                let gone = match mode {
                    RenameMode::From => true,
                    RenameMode::To => false,
                    RenameMode::Both => index == 0,
                    _ => !path.exists(),
                };
                if gone {
                    events.push(FsEvent::PathRemoved(relative));
                } else {
                    push_appeared(&mut events, path, relative, path.is_dir(), ignore);
                }
            }
        }
        EventKind::Modify(_) => {
            for path in &event.paths {
                if path.is_dir() {
                    continue;
                }
                if let Some(relative) = to_relative(path) {
                    events.push(FsEvent::FileModified(relative));
                }
            }
        }
        EventKind::Remove(kind) => {
            for path in &event.paths {
                let Some(relative) = to_relative(path) else {
                    continue;
                };
                events.push(match kind {
                    RemoveKind::File => FsEvent::FileRemoved(relative),
                    RemoveKind::Folder => FsEvent::DirRemoved(relative),
                    _ => FsEvent::PathRemoved(relative),
                });
            }
        }
        EventKind::Access(_) | EventKind::Any | EventKind::Other => {}
    }
    events
}

/// Reports a new entry. A folder that arrives with contents, as after a rename
/// or a move-in, is walked so everything inside it is reported too.
fn push_appeared(
    events: &mut Vec<FsEvent>,
    path: &Path,
    relative: PathBuf,
    is_dir: bool,
    ignore: &IgnoreList,
) {
    if !is_dir {
        events.push(FsEvent::FileAdded(relative));
        return;
    }

    let contents = if path.is_dir() {
        scan_directory(path, ignore).unwrap_or_else(|error| {
            warn!(error = %format!("{error:#}"), folder = %relative.display(), "cannot walk new folder");
            Vec::new()
        })
    } else {
        Vec::new()
    };
    events.push(FsEvent::DirAdded(relative.clone()));
    events.extend(contents.into_iter().map(|event| event.under(&relative)));
}
