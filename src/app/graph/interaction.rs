use eframe::egui::{self, Pos2, Rect, Ui, Vec2};
use fsorbit::NodePath;

use super::super::ViewModel;
use super::super::render_utils::screen_to_world;

impl ViewModel {
    pub(in crate::app) fn handle_graph_zoom(
        &mut self,
        ui: &Ui,
        rect: Rect,
        response: &egui::Response,
    ) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| rect.center());
        let world_before = screen_to_world(rect, self.pan, self.zoom, pointer);

        let zoom_factor = (1.0 + (scroll * 0.0018)).clamp(0.85, 1.15);
        self.zoom = (self.zoom * zoom_factor).clamp(0.05, 6.0);
        self.pan = pointer - rect.center() - (world_before * self.zoom);
    }

    pub(in crate::app) fn handle_graph_pan(&mut self, response: &egui::Response) {
        if response.dragged_by(egui::PointerButton::Primary)
            || response.dragged_by(egui::PointerButton::Secondary)
            || response.dragged_by(egui::PointerButton::Middle)
        {
            self.pan += response.drag_delta();
        }
    }

    /// Closest folder disc under the pointer.
    pub(in crate::app) fn hovered_folder(
        ui: &Ui,
        discs: &[(NodePath, Pos2, f32)],
    ) -> Option<NodePath> {
        let pointer = ui.input(|input| input.pointer.hover_pos())?;
        discs
            .iter()
            .filter_map(|(path, center, radius)| {
                let distance = center.distance(pointer);
                (distance <= *radius).then_some((path, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(path, _)| path.clone())
    }

    pub(in crate::app) fn focus_folder(&mut self, path: &NodePath) {
        if let Some(node) = self.simulation.root().descendant(path) {
            self.pan = -node.position() * self.zoom;
        }
    }

    pub(in crate::app) fn reset_view(&mut self) {
        self.pan = Vec2::ZERO;
        self.zoom = 1.0;
    }
}
