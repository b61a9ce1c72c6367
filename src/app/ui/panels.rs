use std::path::Path;

use eframe::egui::{self, Align, Context, Layout, Vec2};
use fsorbit::fs::{FsEvent, FsWatcher};
use fsorbit::util::plural;
use fsorbit::{Config, GraphError, Simulation};
use tracing::{debug, info, warn};

use super::super::{DepartedMarker, ViewModel};

impl ViewModel {
    pub(in crate::app) fn new(
        config: Config,
        events: Vec<FsEvent>,
        watcher: Option<FsWatcher>,
    ) -> Self {
        let mut model = Self {
            simulation: Simulation::new(config),
            watcher,
            departed: Vec::new(),
            search: String::new(),
            search_cache: None,
            pan: Vec2::ZERO,
            zoom: 1.0,
            live_physics: true,
            hovered: None,
            events_applied: 0,
        };
        model.apply_events(events);

        let root = model.simulation.root();
        info!(
            folders = root.node_count(),
            files = root.total_file_count(),
            "graph ready"
        );
        model
    }

    pub(in crate::app) fn show(&mut self, ctx: &Context, root_path: &Path) {
        if let Some(events) = self.watcher.as_ref().map(FsWatcher::drain)
            && !events.is_empty()
        {
            self.apply_events(events);
        }

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("fsorbit");
                    ui.separator();
                    ui.label(root_path.display().to_string());
                    let root = self.simulation.root();
                    ui.label(plural(root.node_count(), "folder", "folders"));
                    ui.label(plural(root.total_file_count(), "file", "files"));
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        let live = if self.watcher.is_some() { "watching" } else { "static" };
                        ui.label(format!("{live} · {} events", self.events_applied));
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::CentralPanel::default().show(ctx, |ui| self.draw_graph(ui));
    }

    /// Feeds file-system changes into the simulation. A modification of a
    /// file the graph never saw is treated as its creation.
    pub(in crate::app) fn apply_events(&mut self, events: Vec<FsEvent>) {
        for event in events {
            let result = match self.simulation.apply(&event) {
                Err(GraphError::FileNotFound { .. }) if matches!(event, FsEvent::FileModified(_)) => {
                    debug!(path = %event.path().display(), "modified file was untracked, adding it");
                    self.simulation
                        .apply(&FsEvent::FileAdded(event.path().to_path_buf()))
                }
                result => result,
            };

            match result {
                Ok(Some(marker)) => self.departed.push(DepartedMarker {
                    position: marker.position(),
                    remaining: 1.0,
                }),
                Ok(None) => {}
                Err(error) => {
                    warn!(%error, kind = event.kind(), "ignoring file-system event");
                    continue;
                }
            }
            self.events_applied += 1;
        }
    }
}
