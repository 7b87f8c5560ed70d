use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::constants::*;
use crate::error::ConfigError;
use crate::geometry::Size;

/// Tunables of the pane manager. Every field falls back to its default when it
/// is missing from a config file, so partial files are fine.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct WmConfig {
    pub snap_distance: i32,
    pub min_width: i32,
    pub min_height: i32,
    pub default_width: i32,
    pub default_height: i32,
    pub default_top_offset: i32,
    pub toolbar_offset: i32,
    pub cascade_origin_x: i32,
    pub cascade_origin_y: i32,
    pub cascade_step: i32,
    pub save_debounce_ms: u64,
    pub z_index_floor: i64,
    pub storage_key_prefix: String,
}

impl Default for WmConfig {
    fn default() -> Self {
        Self {
            snap_distance: SNAP_DISTANCE,
            min_width: MIN_PANE_WIDTH,
            min_height: MIN_PANE_HEIGHT,
            default_width: DEFAULT_PANE_WIDTH,
            default_height: DEFAULT_PANE_HEIGHT,
            default_top_offset: DEFAULT_TOP_OFFSET,
            toolbar_offset: TOOLBAR_OFFSET,
            cascade_origin_x: CASCADE_ORIGIN_X,
            cascade_origin_y: CASCADE_ORIGIN_Y,
            cascade_step: CASCADE_STEP,
            save_debounce_ms: SAVE_DEBOUNCE_MS,
            z_index_floor: Z_INDEX_FLOOR,
            storage_key_prefix: STORAGE_KEY_PREFIX.to_string(),
        }
    }
}

impl WmConfig {
    /// Read a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn min_size(&self) -> Size {
        Size::new(self.min_width, self.min_height)
    }

    pub fn default_size(&self) -> Size {
        Size::new(self.default_width, self.default_height)
    }

    pub fn save_debounce(&self) -> Duration {
        Duration::from_millis(self.save_debounce_ms)
    }
}
