use eframe::egui;
use shape_editor::model::Point;
use shape_editor::tools::Tool;

use super::ShapeApp;
use super::help::draw_about_window;
use super::render::{PainterSurface, color_row, tool_button};

impl ShapeApp {
    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        let (undo, redo, open, save) = ctx.input_mut(|i| {
            let redo = i.consume_key(
                egui::Modifiers::COMMAND | egui::Modifiers::SHIFT,
                egui::Key::Z,
            ) || i.consume_key(egui::Modifiers::COMMAND, egui::Key::Y);
            let undo = !redo && i.consume_key(egui::Modifiers::COMMAND, egui::Key::Z);
            let open = i.consume_key(egui::Modifiers::COMMAND, egui::Key::O);
            let save = i.consume_key(egui::Modifiers::COMMAND, egui::Key::S);
            (undo, redo, open, save)
        });
        if redo {
            self.redo();
        } else if undo {
            self.undo();
        }
        if open {
            self.open_text_dialog();
        }
        if save {
            self.save_text_dialog();
        }
    }

    fn menu_bar(&mut self, ui: &mut egui::Ui) {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Open... (⌘O)").clicked() {
                    self.open_text_dialog();
                    ui.close_menu();
                }
                if ui.button("Save... (⌘S)").clicked() {
                    self.save_text_dialog();
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("Open Binary...").clicked() {
                    self.open_binary_dialog();
                    ui.close_menu();
                }
                if ui.button("Save Binary...").clicked() {
                    self.save_binary_dialog();
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("Export SVG...").clicked() {
                    self.export_svg_dialog();
                    ui.close_menu();
                }
            });
            ui.menu_button("Help", |ui| {
                if ui.button("About").clicked() {
                    self.show_about = true;
                    ui.close_menu();
                }
            });
        });
    }

    fn control_row(&mut self, ui: &mut egui::Ui) {
        ui.horizontal_wrapped(|ui| {
            let mut selected = self.tools.tool();
            for tool in Tool::ALL {
                tool_button(ui, tool, &mut selected);
            }
            self.tools.set_tool(&mut self.doc, selected);

            ui.separator();
            let mut style_changed = ui.checkbox(&mut self.tools.filled, "Filled").changed();
            style_changed |= color_row(ui, &mut self.tools.color);
            if style_changed {
                self.persist_settings();
            }

            ui.separator();
            if ui.button("Clear").clicked() {
                self.clear();
            }
            if ui
                .add_enabled(self.doc.can_undo(), egui::Button::new("Undo"))
                .clicked()
            {
                self.undo();
            }
            if ui
                .add_enabled(self.doc.can_redo(), egui::Button::new("Redo"))
                .clicked()
            {
                self.redo();
            }
        });
    }

    fn canvas(&mut self, ui: &mut egui::Ui) {
        let (rect, response) =
            ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());
        let origin = rect.min;
        let to_world = |p: egui::Pos2| Point::from_pos2(egui::pos2(p.x - origin.x, p.y - origin.y));

        let ctx = ui.ctx().clone();
        let pointer = ctx.input(|i| i.pointer.interact_pos()).map(to_world);
        let press_origin = ctx.input(|i| i.pointer.press_origin()).map(to_world);

        if response.drag_started() {
            if let Some(p) = press_origin.or(pointer) {
                self.tools.press(&mut self.doc, p);
            }
        }
        if response.dragged() {
            if let Some(p) = pointer {
                self.tools.drag(&mut self.doc, p);
            }
        }
        if response.drag_stopped() {
            if let Some(p) = pointer {
                self.tools.release(&mut self.doc, p);
            }
        } else if response.clicked() {
            if let Some(p) = pointer {
                self.tools.press(&mut self.doc, p);
                self.tools.release(&mut self.doc, p);
            }
        }

        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, self.background.to_color32());
        let mut surface = PainterSurface::new(&painter, origin);
        self.doc.draw(&mut surface);
        if let Some(preview) = self.tools.preview() {
            preview.draw(&mut surface);
        }
    }
}

impl eframe::App for ShapeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_shortcuts(ctx);

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            self.menu_bar(ui);
            self.control_row(ui);
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!("{} shape(s)", self.doc.len()));
                if let Some(status) = &self.status {
                    ui.separator();
                    ui.label(status);
                }
            });
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| self.canvas(ui));

        draw_about_window(ctx, &mut self.show_about);
    }
}
