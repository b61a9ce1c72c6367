use eframe::egui::{self, Ui};
use fsorbit::{NodePath, PhysicsConfig};

use super::super::ViewModel;

const MAX_LISTED_MATCHES: usize = 12;

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Controls");
        ui.separator();
        ui.add_space(4.0);

        ui.label("Search folders")
            .on_hover_text("Fuzzy-highlight folders whose path matches.");
        ui.text_edit_singleline(&mut self.search)
            .on_hover_text("Matching folders get a ring; click a result to center it.");

        let mut focus = None::<NodePath>;
        let matches = self.search_matches();
        if !matches.is_empty() {
            ui.label(format!("{} matching", matches.len()));
            for path in matches.iter().take(MAX_LISTED_MATCHES) {
                if ui.button(path.to_string()).clicked() {
                    focus = Some(path.clone());
                }
            }
        }
        if let Some(path) = focus {
            self.focus_folder(&path);
        }

        ui.separator();

        ui.checkbox(&mut self.live_physics, "Live physics")
            .on_hover_text("Pause to freeze folders in place; markers keep updating.");
        if ui.button("Reset view").clicked() {
            self.reset_view();
        }

        ui.add_space(6.0);
        let mut config = *self.simulation.config();
        ui.collapsing("Physics", |ui| {
            let physics = &mut config.physics;
            ui.add(
                egui::Slider::new(&mut physics.damping, 0.5..=0.99)
                    .text("Damping")
                    .clamping(egui::SliderClamping::Always),
            )
            .on_hover_text("Fraction of velocity kept each frame.");
            ui.add(
                egui::Slider::new(&mut physics.spring, -0.05..=0.0)
                    .text("Spring")
                    .clamping(egui::SliderClamping::Always),
            )
            .on_hover_text("Pull of each folder toward its parent; more negative is stronger.");
            ui.add(
                egui::Slider::new(&mut physics.charge, 0.0..=1_000_000.0)
                    .logarithmic(true)
                    .text("Charge")
                    .clamping(egui::SliderClamping::Always),
            )
            .on_hover_text("Repulsion between every pair of folders, scaled by file counts.");
            ui.add(
                egui::Slider::new(&mut physics.force_max, 0.5..=20.0)
                    .text("Force cap")
                    .clamping(egui::SliderClamping::Always),
            )
            .on_hover_text("Per-axis limit on the force a folder accumulates in one frame.");
            ui.add(
                egui::Slider::new(&mut physics.speed, 1.0..=200.0)
                    .text("Speed")
                    .clamping(egui::SliderClamping::Always),
            )
            .on_hover_text("Scales how far accumulated force moves a folder.");
            if ui.button("Restore defaults").clicked() {
                *physics = PhysicsConfig::default();
            }
        });

        ui.collapsing("Markers", |ui| {
            ui.add(
                egui::Slider::new(&mut config.markers.highlight_secs, 0.2..=10.0)
                    .text("Highlight seconds")
                    .clamping(egui::SliderClamping::Always),
            )
            .on_hover_text("How long a new or modified file stays lit.");
        });

        self.simulation.set_config(config);
    }
}
