//! Shared crate-wide constants.
//!
//! These are the defaults behind [`crate::config::WmConfig`]; code that needs a
//! tunable value should read it from the config rather than from here.

/// Distance (in pixels) within which a dragged pane snaps to a viewport edge or
/// to the edge of another visible pane.
pub const SNAP_DISTANCE: i32 = 15;

/// Smallest width a pane may have after any mutation.
pub const MIN_PANE_WIDTH: i32 = 300;

/// Smallest height a pane may have after any mutation.
pub const MIN_PANE_HEIGHT: i32 = 400;

/// Size given to newly created panes and to cascaded panes.
pub const DEFAULT_PANE_WIDTH: i32 = 400;
pub const DEFAULT_PANE_HEIGHT: i32 = 600;

/// Vertical offset of a newly created pane when the caller does not pass an
/// explicit position. Panes are centered horizontally.
pub const DEFAULT_TOP_OFFSET: i32 = 80;

/// Height reserved at the top of the viewport for the toolbar. Bulk layouts and
/// maximized panes never cover it.
pub const TOOLBAR_OFFSET: i32 = 60;

/// Origin of the first pane placed by the cascade layout.
pub const CASCADE_ORIGIN_X: i32 = 50;
pub const CASCADE_ORIGIN_Y: i32 = 80;

/// Diagonal offset between consecutive cascaded panes.
pub const CASCADE_STEP: i32 = 30;

/// Trailing-edge delay between the last mutation and the persisted write.
pub const SAVE_DEBOUNCE_MS: u64 = 300;

/// Lowest value the z-index counter is ever seeded with. Restored layouts whose
/// stored values are all below it start counting from here.
pub const Z_INDEX_FLOOR: i64 = 1000;

/// Prefix of the two keys written to the key/value store.
pub const STORAGE_KEY_PREFIX: &str = "pane-wm";
