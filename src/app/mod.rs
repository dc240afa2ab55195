use shape_editor::document::Document;
use shape_editor::model::Rgb;
use shape_editor::tools::ToolState;

mod actions;
mod help;
mod render;
mod settings;
mod svg;
mod update;

pub struct ShapeApp {
    doc: Document,
    tools: ToolState,
    text_path: String,
    binary_path: String,
    svg_path: String,
    settings_path: String,
    background: Rgb,
    status: Option<String>,
    show_about: bool,
}

impl ShapeApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let settings_path = settings::config_path();
        let settings = settings::load_settings(&settings_path)
            .or_else(|| settings::load_settings("settings.json"))
            .unwrap_or_default();
        tracing::info!(settings = %settings_path, "starting editor");

        let mut tools = ToolState::default();
        tools.color = settings.default_color;
        tools.filled = settings.default_filled;

        Self {
            doc: Document::new(),
            tools,
            text_path: settings.text_path,
            binary_path: settings.binary_path,
            svg_path: settings.svg_path,
            settings_path,
            background: settings.background,
            status: None,
            show_about: false,
        }
    }
}
