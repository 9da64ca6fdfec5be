use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH};

const SETTINGS_KEY: &str = "figure_poser_settings";

/// User preferences restored between sessions through eframe's storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // settings written by older builds keep working
pub struct EditorSettings {
    /// Canvas size used when the app starts
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub scene_path: String,
    pub export_path: String,
    pub show_joint_handles: bool,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            scene_path: "scene.json".to_owned(),
            export_path: "figure.png".to_owned(),
            show_joint_handles: true,
        }
    }
}

impl EditorSettings {
    pub fn load(storage: Option<&dyn eframe::Storage>) -> Self {
        storage
            .and_then(|storage| eframe::get_value(storage, SETTINGS_KEY))
            .unwrap_or_default()
    }

    pub fn save(&self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, SETTINGS_KEY, self);
    }
}
