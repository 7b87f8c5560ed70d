//! Window management for multi-pane chat canvases.
//!
//! [`WindowRegistry`] owns the pane records, the z-order stack and the active
//! pane. Geometry helpers keep panes inside the viewport and snap them to
//! edges, layout planners arrange the visible panes in bulk, and a debounced
//! [`PersistenceAdapter`] writes the layout to a key/value store so it survives
//! a restart.

pub mod config;
pub mod constants;
pub mod drag;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod persistence;
pub mod tracing_sub;
pub mod viewport;
pub mod window;

pub use config::WmConfig;
pub use drag::{DragController, ResizeEdge};
pub use error::{ConfigError, PersistError, SnapshotError, StoreError};
pub use geometry::{PaneRect, Position, Size, Viewport};
pub use layout::LayoutStrategy;
pub use persistence::{FileStore, KeyValueStore, LayoutSnapshot, MemoryStore, PersistenceAdapter};
pub use viewport::{FixedViewport, SharedViewport, ViewportProvider};
pub use window::{Pane, PaneId, WindowEvent, WindowRegistry};
