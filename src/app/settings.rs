use serde::{Deserialize, Serialize};
use shape_editor::model::Rgb;
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(super) struct AppSettings {
    pub text_path: String,
    pub binary_path: String,
    pub svg_path: String,
    pub default_color: Rgb,
    pub default_filled: bool,
    pub background: Rgb,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            text_path: "drawing.txt".to_string(),
            binary_path: "drawing.bin".to_string(),
            svg_path: "drawing.svg".to_string(),
            default_color: Rgb::BLACK,
            default_filled: false,
            background: Rgb::new(1.0, 1.0, 1.0),
        }
    }
}

/// `$HOME/.config/shape-editor.toml` when it exists, else `./settings.toml`.
pub(super) fn config_path() -> String {
    if let Some(home) = std::env::var_os("HOME") {
        let path = Path::new(&home).join(".config").join("shape-editor.toml");
        if path.exists() {
            return path.display().to_string();
        }
    }
    "settings.toml".to_string()
}

pub(super) fn load_settings(path: &str) -> Option<AppSettings> {
    let s = std::fs::read_to_string(path).ok()?;
    let parsed = if path.ends_with(".toml") {
        toml::from_str::<AppSettings>(&s)
            .ok()
            .or_else(|| serde_json::from_str::<AppSettings>(&s).ok())
    } else {
        serde_json::from_str::<AppSettings>(&s)
            .ok()
            .or_else(|| toml::from_str::<AppSettings>(&s).ok())
    };
    if parsed.is_none() {
        tracing::warn!(path, "ignoring unreadable settings");
    }
    parsed
}

pub(super) fn save_settings(path: &str, settings: &AppSettings) -> Result<(), String> {
    let body = if path.ends_with(".toml") {
        toml::to_string_pretty(settings).map_err(|e| e.to_string())?
    } else {
        serde_json::to_string_pretty(settings).map_err(|e| e.to_string())?
    };
    std::fs::write(path, body).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_in(dir: &tempfile::TempDir, name: &str) -> String {
        dir.path().join(name).display().to_string()
    }

    #[test]
    fn toml_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = path_in(&dir, "settings.toml");
        let settings = AppSettings {
            text_path: "/tmp/house.txt".to_string(),
            default_color: Rgb::new(0.0, 0.0, 1.0),
            default_filled: true,
            ..AppSettings::default()
        };

        save_settings(&path, &settings).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("default_filled = true"));
        assert_eq!(load_settings(&path), Some(settings));
    }

    #[test]
    fn json_chosen_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = path_in(&dir, "settings.json");
        save_settings(&path, &AppSettings::default()).unwrap();
        let body = std::fs::read_to_string(&path).unwrap();
        assert!(body.trim_start().starts_with('{'));
        assert_eq!(load_settings(&path), Some(AppSettings::default()));
    }

    #[test]
    fn missing_fields_take_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = path_in(&dir, "settings.toml");
        std::fs::write(&path, "svg_path = \"out.svg\"\n").unwrap();
        let loaded = load_settings(&path).unwrap();
        assert_eq!(loaded.svg_path, "out.svg");
        assert_eq!(loaded.text_path, AppSettings::default().text_path);
    }

    #[test]
    fn garbage_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = path_in(&dir, "settings.toml");
        std::fs::write(&path, "this is = = not settings").unwrap();
        assert!(load_settings(&path).is_none());
        assert!(load_settings(&path_in(&dir, "absent.toml")).is_none());
    }
}
