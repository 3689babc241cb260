use eframe::egui::Vec2;
use serde::{Deserialize, Serialize};

use crate::command::DEFAULT_HISTORY_LIMIT;
use crate::document::DEFAULT_PAGE_SIZE;
use crate::style::Style;

pub const DEFAULT_GRID_SIZE: f32 = 20.0;

/// User preferences, persisted between runs through eframe's storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    pub grid_visible: bool,
    pub grid_size: f32,
    pub snap_to_grid: bool,
    /// Maximum number of commands kept on each history stack
    pub history_limit: usize,
    /// Page size of new documents
    pub document_size: Vec2,
    /// Style new shapes are drawn with
    pub style: Style,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            grid_visible: true,
            grid_size: DEFAULT_GRID_SIZE,
            snap_to_grid: false,
            history_limit: DEFAULT_HISTORY_LIMIT,
            document_size: DEFAULT_PAGE_SIZE,
            style: Style::tool_default(),
        }
    }
}

impl EditorSettings {
    /// Key used with `eframe::get_value` / `set_value`
    pub const STORAGE_KEY: &'static str = "vector_paint_settings";

    pub fn load(storage: Option<&dyn eframe::Storage>) -> Self {
        storage
            .and_then(|storage| eframe::get_value(storage, Self::STORAGE_KEY))
            .unwrap_or_default()
    }

    pub fn save(&self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, Self::STORAGE_KEY, self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_take_defaults() {
        let settings: EditorSettings = serde_json::from_str(r#"{"grid_size": 8.0}"#).unwrap();
        assert_eq!(settings.grid_size, 8.0);
        assert!(settings.grid_visible);
        assert_eq!(settings.history_limit, DEFAULT_HISTORY_LIMIT);
    }

    #[test]
    fn test_load_without_storage_is_default() {
        assert_eq!(EditorSettings::load(None), EditorSettings::default());
    }
}
