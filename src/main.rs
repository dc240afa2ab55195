mod app;

use shape_editor::init_logging;

fn main() -> anyhow::Result<()> {
    init_logging()?;

    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("Shape Editor")
            .with_inner_size([960.0, 720.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Shape Editor",
        native_options,
        Box::new(|cc| Ok(Box::new(app::ShapeApp::new(cc)))),
    )
    .map_err(|e| anyhow::anyhow!("window failed: {e}"))
}
