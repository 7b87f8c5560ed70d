mod registry;
mod z_order;

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::geometry::{PaneRect, Position, Size};
use crate::layout::LayoutStrategy;

pub use registry::WindowRegistry;
pub use z_order::ZOrderStack;

/// Opaque, caller-supplied pane identifier (a conversation id, for example).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaneId(String);

impl PaneId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PaneId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for PaneId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// One managed pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pane {
    pub id: PaneId,
    pub title: String,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub is_maximized: bool,
    pub is_minimized: bool,
    /// Stacking hint for renderers. Stamped from a counter that only grows, so
    /// sorting by it reproduces the z-order stack.
    pub z_index: i64,
    /// Milliseconds since the Unix epoch.
    pub created_at: u64,
    /// Insertion sequence; defines the registry iteration order.
    pub(crate) creation_order: usize,
}

impl Pane {
    pub fn rect(&self) -> PaneRect {
        PaneRect::new(self.x, self.y, self.width, self.height)
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn is_visible(&self) -> bool {
        !self.is_minimized
    }
}

/// State changes queued by the registry; hosts drain them with
/// [`WindowRegistry::take_events`] after dispatching input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowEvent {
    Created(PaneId),
    Activated(PaneId),
    ActiveChanged(Option<PaneId>),
    GeometryChanged { id: PaneId, rect: PaneRect },
    MinimizeToggled { id: PaneId, minimized: bool },
    MaximizeToggled { id: PaneId, maximized: bool },
    Closed(PaneId),
    Arranged(LayoutStrategy),
    Restored { panes: usize },
}

pub(crate) fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
