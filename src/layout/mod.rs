//! Bulk layout strategies.
//!
//! Planners are pure: they take the visible panes and the viewport and return a
//! target rectangle per pane. The registry applies the plan through its bounded
//! commit path, so minimum sizes and viewport clamping still hold afterwards.

pub mod cascade;
pub mod tiling;

pub use cascade::cascade_plan;
pub use tiling::{Direction, GridDims, grid_dimensions, grid_plan, tile_plan};

use serde::{Deserialize, Serialize};

use crate::config::WmConfig;
use crate::geometry::{PaneRect, Viewport};
use crate::window::{Pane, PaneId, ZOrderStack};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutStrategy {
    Grid,
    TileHorizontal,
    TileVertical,
    Cascade,
}

impl LayoutStrategy {
    pub const ALL: [LayoutStrategy; 4] = [
        LayoutStrategy::Grid,
        LayoutStrategy::TileHorizontal,
        LayoutStrategy::TileVertical,
        LayoutStrategy::Cascade,
    ];

    pub fn label(self) -> &'static str {
        match self {
            LayoutStrategy::Grid => "grid",
            LayoutStrategy::TileHorizontal => "tile-horizontal",
            LayoutStrategy::TileVertical => "tile-vertical",
            LayoutStrategy::Cascade => "cascade",
        }
    }
}

/// One planned placement.
pub type Placement = (PaneId, PaneRect);

/// Area below the toolbar that tiling layouts divide up.
pub fn usable_area(viewport: Viewport, toolbar_offset: i32) -> PaneRect {
    let top = toolbar_offset.clamp(0, viewport.height.max(0));
    PaneRect::new(
        0,
        top,
        viewport.width.max(0),
        viewport.height.saturating_sub(top).max(0),
    )
}

/// Compute placements for `visible`, which must be in registry iteration order.
pub fn plan(
    strategy: LayoutStrategy,
    visible: &[&Pane],
    stack: &ZOrderStack,
    viewport: Viewport,
    config: &WmConfig,
) -> Vec<Placement> {
    let area = usable_area(viewport, config.toolbar_offset);
    let ids: Vec<PaneId> = visible.iter().map(|pane| pane.id.clone()).collect();
    match strategy {
        LayoutStrategy::Grid => grid_plan(&ids, area),
        LayoutStrategy::TileHorizontal => tile_plan(&ids, area, Direction::Horizontal),
        LayoutStrategy::TileVertical => tile_plan(&ids, area, Direction::Vertical),
        LayoutStrategy::Cascade => cascade_plan(visible, stack, config),
    }
}
