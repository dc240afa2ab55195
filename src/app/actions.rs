use std::path::{Path, PathBuf};

use shape_editor::error::DocumentError;
use tracing::warn;

use super::{ShapeApp, settings, svg};

/// Directory and file name of the last path, for seeding a dialog.
fn dialog_for(last: &str) -> rfd::FileDialog {
    let last = Path::new(last);
    let mut dialog = rfd::FileDialog::new();
    if let Some(dir) = last.parent().filter(|d| d.is_dir()) {
        dialog = dialog.set_directory(dir);
    }
    if let Some(name) = last.file_name().and_then(|n| n.to_str()) {
        dialog = dialog.set_file_name(name);
    }
    dialog
}

impl ShapeApp {
    pub(super) fn undo(&mut self) {
        self.tools.cancel(&mut self.doc);
        if !self.doc.undo() {
            self.status = Some("Nothing to undo".to_string());
        }
    }

    pub(super) fn redo(&mut self) {
        self.tools.cancel(&mut self.doc);
        if !self.doc.redo() {
            self.status = Some("Nothing to redo".to_string());
        }
    }

    pub(super) fn clear(&mut self) {
        self.tools.cancel(&mut self.doc);
        self.doc.clear();
        self.status = Some("Cleared".to_string());
    }

    fn report(&mut self, verb: &str, path: &Path, result: Result<(), DocumentError>) -> bool {
        match result {
            Ok(()) => {
                self.status = Some(format!("{verb} {}", path.display()));
                true
            }
            Err(e) => {
                warn!(error = %e, "{} failed", verb.to_lowercase());
                self.status = Some(format!("{verb} failed: {e}"));
                false
            }
        }
    }

    pub(super) fn open_text_dialog(&mut self) {
        let Some(path) = dialog_for(&self.text_path)
            .add_filter("Text drawing", &["txt"])
            .pick_file()
        else {
            return;
        };
        self.tools.cancel(&mut self.doc);
        let result = self.doc.load_text(&path);
        if self.report("Loaded", &path, result) {
            self.remember_path(path, |app| &mut app.text_path);
        }
    }

    pub(super) fn save_text_dialog(&mut self) {
        let Some(path) = dialog_for(&self.text_path)
            .add_filter("Text drawing", &["txt"])
            .save_file()
        else {
            return;
        };
        let result = self.doc.save_text(&path);
        if self.report("Saved", &path, result) {
            self.remember_path(path, |app| &mut app.text_path);
        }
    }

    pub(super) fn open_binary_dialog(&mut self) {
        let Some(path) = dialog_for(&self.binary_path)
            .add_filter("Binary drawing", &["bin"])
            .pick_file()
        else {
            return;
        };
        self.tools.cancel(&mut self.doc);
        let result = self.doc.load_binary(&path);
        if self.report("Loaded", &path, result) {
            self.remember_path(path, |app| &mut app.binary_path);
        }
    }

    pub(super) fn save_binary_dialog(&mut self) {
        let Some(path) = dialog_for(&self.binary_path)
            .add_filter("Binary drawing", &["bin"])
            .save_file()
        else {
            return;
        };
        let result = self.doc.save_binary(&path);
        if self.report("Saved", &path, result) {
            self.remember_path(path, |app| &mut app.binary_path);
        }
    }

    pub(super) fn export_svg_dialog(&mut self) {
        let Some(path) = dialog_for(&self.svg_path)
            .add_filter("SVG", &["svg"])
            .save_file()
        else {
            return;
        };
        let svg = svg::document_to_svg(&self.doc, self.background);
        let result = std::fs::write(&path, svg).map_err(|e| DocumentError::io(&path, e));
        if self.report("Exported", &path, result) {
            self.remember_path(path, |app| &mut app.svg_path);
        }
    }

    fn remember_path(&mut self, path: PathBuf, slot: fn(&mut Self) -> &mut String) {
        *slot(self) = path.display().to_string();
        self.persist_settings();
    }

    pub(super) fn settings_snapshot(&self) -> settings::AppSettings {
        settings::AppSettings {
            text_path: self.text_path.clone(),
            binary_path: self.binary_path.clone(),
            svg_path: self.svg_path.clone(),
            default_color: self.tools.color,
            default_filled: self.tools.filled,
            background: self.background,
        }
    }

    pub(super) fn persist_settings(&mut self) {
        let snapshot = self.settings_snapshot();
        if let Err(e) = settings::save_settings(&self.settings_path, &snapshot) {
            warn!(path = %self.settings_path, error = %e, "settings save failed");
            self.status = Some(format!("Settings save failed: {e}"));
        }
    }
}
