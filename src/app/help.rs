use eframe::egui;

pub(super) fn draw_about_window(ctx: &egui::Context, open: &mut bool) {
    egui::Window::new("About")
        .open(open)
        .resizable(false)
        .collapsible(false)
        .default_width(360.0)
        .show(ctx, |ui| {
            ui.heading(format!("Shape Editor {}", env!("CARGO_PKG_VERSION")));
            ui.label("Draw lines, rectangles and ovals; group, copy and move them.");
            ui.separator();

            ui.label("Mouse");
            help_row(ui, "Drag", "Draw with Line, Rectangle or Oval");
            help_row(ui, "Click", "Delete the nearest shape (Delete tool)");
            help_row(ui, "Drag", "Move or copy the nearest shape");
            help_row(ui, "Drag a box", "Group shapes centered inside it");

            ui.add_space(10.0);
            ui.label("Keyboard");
            help_row(ui, "⌘Z", "Undo");
            help_row(ui, "⌘⇧Z / ⌘Y", "Redo");
            help_row(ui, "⌘O / ⌘S", "Open / save text drawing");
        });
}

fn help_row(ui: &mut egui::Ui, key: &str, description: &str) {
    ui.horizontal(|ui| {
        ui.add_sized([110.0, 18.0], egui::Label::new(egui::RichText::new(key).monospace()));
        ui.label(description);
    });
}
