use crate::config::WmConfig;
use crate::geometry::PaneRect;
use crate::window::{Pane, ZOrderStack};

use super::Placement;

/// Diagonal cascade, back-most pane first, every pane at the default size.
///
/// Panes are ordered by their place in the z-order stack; creation time breaks
/// ties for panes the stack does not know about.
pub fn cascade_plan(visible: &[&Pane], stack: &ZOrderStack, config: &WmConfig) -> Vec<Placement> {
    let mut ordered: Vec<&Pane> = visible.to_vec();
    ordered.sort_by_key(|pane| {
        (
            stack.position(&pane.id).unwrap_or(usize::MAX),
            pane.created_at,
        )
    });
    let size = config.default_size();
    ordered
        .into_iter()
        .enumerate()
        .map(|(i, pane)| {
            let offset = i as i32 * config.cascade_step;
            (
                pane.id.clone(),
                PaneRect::new(
                    config.cascade_origin_x + offset,
                    config.cascade_origin_y + offset,
                    size.width,
                    size.height,
                ),
            )
        })
        .collect()
}
