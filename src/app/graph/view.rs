use std::collections::HashSet;
use std::time::Duration;

use eframe::egui::{Align2, Color32, FontId, Sense, Stroke, Ui, Vec2, vec2};
use fsorbit::NodePath;
use fsorbit::util::plural;

use super::super::render_utils::{
    MARKER_COLOR, MARKER_HIGHLIGHT, SEARCH_HIGHLIGHT, blend_color, circle_visible, draw_background,
    fade, folder_color, folder_radius, world_to_screen,
};
use super::super::{SearchCache, ViewModel};

const LABEL_COLOR: Color32 = Color32::from_rgb(225, 232, 238);

impl ViewModel {
    /// Folders matching the search box, recomputed when the query or the tree changes.
    pub(in crate::app) fn search_matches(&mut self) -> &[NodePath] {
        let query = self.search.trim();
        let folder_count = self.simulation.root().node_count();
        let events_applied = self.events_applied;
        let stale = self.search_cache.as_ref().is_none_or(|cache| {
            cache.query != query
                || cache.folder_count != folder_count
                || cache.events_applied != events_applied
        });

        if stale {
            self.search_cache = Some(SearchCache {
                query: query.to_owned(),
                folder_count,
                events_applied,
                matches: self.simulation.search(query),
            });
        }

        self.search_cache
            .as_ref()
            .map(|cache| cache.matches.as_slice())
            .unwrap_or_default()
    }

    fn step(&mut self, dt: f32) {
        if self.live_physics {
            self.simulation.tick(dt);
        } else {
            let root = self.simulation.root_mut();
            root.reap_killed();
            root.walk_mut(&mut |node| node.update(dt));
        }

        let fade_secs = self.simulation.config().markers.highlight_secs.max(f32::EPSILON);
        for departed in &mut self.departed {
            departed.remaining -= dt / fade_secs;
        }
        self.departed.retain(|departed| departed.remaining > 0.0);
    }

    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        draw_background(&painter, rect, self.pan, self.zoom);

        self.handle_graph_zoom(ui, rect, &response);
        self.handle_graph_pan(&response);

        let frame_delta_seconds = ui
            .ctx()
            .input(|input| input.stable_dt)
            .clamp(1.0 / 240.0, 1.0 / 20.0);
        self.step(frame_delta_seconds);

        let matches = self.search_matches().iter().cloned().collect::<HashSet<_>>();
        let pan = self.pan;
        let zoom = self.zoom;
        let to_screen = |world: Vec2| world_to_screen(rect, pan, zoom, world);
        let root = self.simulation.root();

        let edge_stroke = Stroke::new(1.0, Color32::from_rgba_unmultiplied(150, 165, 180, 90));
        root.walk(&mut |node| {
            let from = to_screen(node.position());
            for child in node.children() {
                painter.line_segment([from, to_screen(child.position())], edge_stroke);
            }
        });

        let marker_radius = (2.2 * zoom.sqrt()).clamp(1.0, 6.0);
        root.walk(&mut |node| {
            for marker in node.files() {
                let center = to_screen(marker.position());
                let radius = marker_radius * (1.0 + marker.highlight() * 0.6);
                if !circle_visible(rect, center, radius) {
                    continue;
                }
                let color = blend_color(MARKER_COLOR, MARKER_HIGHLIGHT, marker.highlight());
                painter.circle_filled(center, radius, color);
            }
        });

        for departed in &self.departed {
            painter.circle_filled(
                to_screen(departed.position),
                marker_radius,
                fade(MARKER_HIGHLIGHT, departed.remaining),
            );
        }

        let mut discs = Vec::new();
        root.walk(&mut |node| {
            let center = to_screen(node.position());
            let radius = folder_radius(node.mass(), zoom);
            discs.push((node.path().clone(), center, radius));
            if !circle_visible(rect, center, radius) {
                return;
            }

            let mut color = folder_color(node.path().depth());
            if matches.contains(node.path()) {
                color = blend_color(color, SEARCH_HIGHLIGHT, 0.7);
                painter.circle_stroke(center, radius + 3.0, Stroke::new(2.0, SEARCH_HIGHLIGHT));
            }
            painter.circle_filled(center, radius, color);

            if zoom >= 1.4 {
                painter.text(
                    center + vec2(0.0, radius + 2.0),
                    Align2::CENTER_TOP,
                    node.name(),
                    FontId::proportional(11.0),
                    LABEL_COLOR,
                );
            }
        });

        self.hovered = Self::hovered_folder(ui, &discs);
        if let Some(path) = &self.hovered
            && let Some(node) = self.simulation.root().descendant(path)
        {
            let center = to_screen(node.position());
            let radius = folder_radius(node.mass(), zoom);
            painter.text(
                center - vec2(0.0, radius + 4.0),
                Align2::CENTER_BOTTOM,
                format!("{path} · {}", plural(node.file_count(), "file", "files")),
                FontId::proportional(13.0),
                LABEL_COLOR,
            );
        }

        if response.double_clicked()
            && let Some(path) = self.hovered.clone()
        {
            self.focus_folder(&path);
        }

        if self.live_physics || !self.departed.is_empty() {
            ui.ctx().request_repaint();
        } else {
            ui.ctx().request_repaint_after(Duration::from_millis(250));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use fsorbit::Config;
    use fsorbit::fs::FsEvent;

    use super::*;

    #[test]
    fn search_follows_a_swapped_folder() {
        let mut model = ViewModel::new(
            Config::default(),
            vec![FsEvent::DirAdded(PathBuf::from("alpha"))],
            None,
        );
        model.search = "beta".to_owned();
        assert!(model.search_matches().is_empty());

        model.apply_events(vec![
            FsEvent::DirRemoved(PathBuf::from("alpha")),
            FsEvent::DirAdded(PathBuf::from("beta")),
        ]);
        model.step(1.0 / 60.0);

        assert_eq!(model.simulation.root().node_count(), 2);
        assert_eq!(model.search_matches().to_vec(), vec![NodePath::parse("beta")]);
    }
}
