// ui.rs - Controls and grid drawing for the rule viewer
// Every edit changes the config snapshot; `sync` starts a fresh run for it.

use eframe::egui;
use egui::{Color32, Rect, Vec2};
use elementary::{Curation, Rule, SeedPolicy, rules_in};

use crate::RuleViewer;

impl eframe::App for RuleViewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.pump();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Elementary Cellular Automata (Row Coroutines)");

            // Rule selection
            ui.horizontal(|ui| {
                ui.label("Group:");
                egui::ComboBox::from_id_source("group_selector")
                    .selected_text(self.selected_group.name())
                    .show_ui(ui, |ui| {
                        for group in Curation::ALL {
                            ui.selectable_value(&mut self.selected_group, group, group.name());
                        }
                    });

                ui.label("Rule:");
                egui::ComboBox::from_id_source("rule_selector")
                    .selected_text(self.config.rule_number.to_string())
                    .show_ui(ui, |ui| {
                        for number in rules_in(self.selected_group) {
                            ui.selectable_value(&mut self.config.rule_number, number as u32, number.to_string());
                        }
                    });

                ui.add(egui::DragValue::new(&mut self.config.rule_number).clamp_range(0..=255));

                if let Ok(number) = u8::try_from(self.config.rule_number) {
                    ui.monospace(Rule::from_number(number).to_string());
                }
            });

            ui.separator();

            // Geometry and seeding
            ui.horizontal(|ui| {
                ui.label("Scale:");
                ui.add(egui::Slider::new(&mut self.config.scale, 1..=40).suffix(" px"));

                ui.label("Rows:");
                ui.add(egui::Slider::new(&mut self.config.row_count, 1..=500));

                let mut random = self.config.seed_policy == SeedPolicy::Random;
                if ui.checkbox(&mut random, "Random seed").changed() {
                    self.config.seed_policy = if random { SeedPolicy::Random } else { SeedPolicy::Single };
                }

                if ui.button("🎲 Reseed").clicked() {
                    self.restart();
                }
            });

            ui.horizontal(|ui| {
                ui.label("Pace:");
                ui.add(egui::Slider::new(&mut self.pace_ms, 0..=200).suffix(" ms/row"));

                ui.separator();

                ui.label("Live:");
                ui.color_edit_button_srgba(&mut self.live_color);
                ui.label("Dead:");
                ui.color_edit_button_srgba(&mut self.dead_color);
            });

            if let Some(status) = &self.status {
                ui.colored_label(Color32::LIGHT_RED, status);
            }

            ui.separator();

            self.config.viewport_width = ui.available_width().max(0.0) as u32;
            self.sync();
            self.pump();

            egui::ScrollArea::vertical().show(ui, |ui| self.draw_grid(ui));

            ui.separator();

            let painted = self.canvas.painted();
            let live = self.canvas.live();
            ui.horizontal(|ui| {
                ui.label(format!("Rows: {}", self.canvas.complete_rows()));
                ui.label(format!("Live cells: {}", live));
                ui.label(format!("Dead cells: {}", painted - live));
                if painted > 0 {
                    ui.label(format!("Population: {:.1}%", (live as f32 / painted as f32) * 100.0));
                }
            });
        });

        if self.is_rendering() {
            ctx.request_repaint();
        }
    }
}

impl RuleViewer {
    fn draw_grid(&self, ui: &mut egui::Ui) {
        let Some(geometry) = self.canvas.geometry() else { return };
        let box_size = geometry.scale as f32;
        let total_size = Vec2::new(geometry.layout_width() as f32, geometry.layout_height() as f32);

        let (response, painter) = ui.allocate_painter(total_size, egui::Sense::hover());
        let start_pos = response.rect.min;

        painter.rect_filled(Rect::from_min_size(start_pos, total_size), 0.0, Color32::BLACK);

        for (row, states) in self.canvas.rows().iter().enumerate() {
            for (col, &state) in states.iter().enumerate() {
                let x = start_pos.x + col as f32 * box_size;
                let y = start_pos.y + row as f32 * box_size;
                let rect = Rect::from_min_size(egui::pos2(x, y), Vec2::splat(box_size));

                let cell_color = if state { self.live_color } else { self.dead_color };
                painter.rect_filled(rect, 0.0, cell_color);
            }
        }
    }
}
