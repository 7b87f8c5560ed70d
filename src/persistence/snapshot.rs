//! Serialized form of the registry.

use serde::{Deserialize, Serialize};

use crate::error::SnapshotError;
use crate::window::{Pane, PaneId};

/// Stored record of a single pane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedPane {
    pub id: PaneId,
    #[serde(default)]
    pub title: String,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    #[serde(default)]
    pub is_maximized: bool,
    #[serde(default)]
    pub is_minimized: bool,
    #[serde(default)]
    pub z_index: i64,
    #[serde(default)]
    pub created_at: u64,
}

impl From<&Pane> for PersistedPane {
    fn from(pane: &Pane) -> Self {
        Self {
            id: pane.id.clone(),
            title: pane.title.clone(),
            x: pane.x,
            y: pane.y,
            width: pane.width,
            height: pane.height,
            is_maximized: pane.is_maximized,
            is_minimized: pane.is_minimized,
            z_index: pane.z_index,
            created_at: pane.created_at,
        }
    }
}

/// Everything needed to rebuild a registry: the panes in iteration order and
/// the active pane.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutSnapshot {
    pub panes: Vec<PersistedPane>,
    pub active_window_id: Option<PaneId>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WindowsEnvelope {
    version: u32,
    windows: Vec<PersistedPane>,
}

/// The windows key holds either the current versioned envelope or the bare
/// array written before versioning existed.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredWindows {
    Envelope(WindowsEnvelope),
    Bare(Vec<PersistedPane>),
}

impl LayoutSnapshot {
    /// Version written by [`encode_windows`](Self::encode_windows).
    pub const CURRENT_VERSION: u32 = 1;

    pub fn new(panes: Vec<PersistedPane>, active_window_id: Option<PaneId>) -> Self {
        Self {
            panes,
            active_window_id,
        }
    }

    pub fn encode_windows(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&WindowsEnvelope {
            version: Self::CURRENT_VERSION,
            windows: self.panes.clone(),
        })
    }

    pub fn encode_active(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.active_window_id)
    }

    pub fn decode_windows(raw: &str) -> Result<Vec<PersistedPane>, SnapshotError> {
        match serde_json::from_str::<StoredWindows>(raw)? {
            StoredWindows::Envelope(envelope) => {
                if envelope.version > Self::CURRENT_VERSION {
                    return Err(SnapshotError::UnsupportedVersion {
                        found: envelope.version,
                        supported: Self::CURRENT_VERSION,
                    });
                }
                Ok(envelope.windows)
            }
            StoredWindows::Bare(windows) => Ok(windows),
        }
    }

    pub fn decode_active(raw: &str) -> Result<Option<PaneId>, SnapshotError> {
        Ok(serde_json::from_str(raw)?)
    }
}
