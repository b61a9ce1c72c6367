use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context, Vec2};
use fsorbit::fs::{FsEvent, FsWatcher, IgnoreList, scan_directory, spawn_watcher};
use fsorbit::{Config, NodePath, Simulation};
use tracing::warn;

mod graph;
mod render_utils;
mod ui;

pub struct OrbitApp {
    root_path: PathBuf,
    ignore: IgnoreList,
    config: Config,
    watch: bool,
    state: AppState,
}

enum AppState {
    Loading {
        rx: Receiver<Result<Vec<FsEvent>, String>>,
        watcher: Option<FsWatcher>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    simulation: Simulation,
    watcher: Option<FsWatcher>,
    departed: Vec<DepartedMarker>,
    search: String,
    search_cache: Option<SearchCache>,
    pan: Vec2,
    zoom: f32,
    live_physics: bool,
    hovered: Option<NodePath>,
    events_applied: usize,
}

/// A removed file, drawn where it last was while it fades out.
struct DepartedMarker {
    position: Vec2,
    remaining: f32,
}

struct SearchCache {
    query: String,
    folder_count: usize,
    events_applied: usize,
    matches: Vec<NodePath>,
}

impl OrbitApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        root_path: PathBuf,
        ignore: IgnoreList,
        config: Config,
        watch: bool,
    ) -> Self {
        let state = Self::start_load(&root_path, &ignore, watch);
        Self {
            root_path,
            ignore,
            config,
            watch,
            state,
        }
    }

    fn spawn_scan(root_path: PathBuf, ignore: IgnoreList) -> Receiver<Result<Vec<FsEvent>, String>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = scan_directory(&root_path, &ignore).map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        rx
    }

    // Watch first: changes made while the scan runs must not be missed.
    fn start_load(root_path: &Path, ignore: &IgnoreList, watch: bool) -> AppState {
        let watcher = if watch {
            match spawn_watcher(root_path, ignore.clone()) {
                Ok(watcher) => Some(watcher),
                Err(error) => {
                    warn!(error = %format!("{error:#}"), "continuing without live updates");
                    None
                }
            }
        } else {
            None
        };

        AppState::Loading {
            rx: Self::spawn_scan(root_path.to_path_buf(), ignore.clone()),
            watcher,
        }
    }
}

impl eframe::App for OrbitApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx, watcher } => {
                match rx.try_recv() {
                    Ok(Ok(events)) => {
                        let model = ViewModel::new(self.config, events, watcher.take());
                        transition = Some(AppState::Ready(Box::new(model)));
                    }
                    Ok(Err(error)) => transition = Some(AppState::Error(error)),
                    Err(TryRecvError::Empty) => {}
                    Err(TryRecvError::Disconnected) => {
                        transition = Some(AppState::Error("Scan worker disconnected".to_owned()));
                    }
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading(format!("Scanning {}...", self.root_path.display()));
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
                ctx.request_repaint();
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to scan directory");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(&self.root_path, &self.ignore, self.watch));
                    }
                });
            }
            AppState::Ready(model) => model.show(ctx, &self.root_path),
        }

        if let Some(next_state) = transition {
            self.state = next_state;
        }
    }
}
