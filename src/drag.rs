//! Pointer-driven move and edge-resize gestures.
//!
//! The controller only turns pointer deltas into registry calls: moves go
//! through [`WindowRegistry::update_position`] (snapping included), resizes
//! through [`WindowRegistry::set_bounds`].

use crate::geometry::{PaneRect, Size, Viewport, to_grid};
use crate::window::{PaneId, WindowRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeEdge {
    Left,
    Right,
    Top,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ResizeEdge {
    pub const ALL: [ResizeEdge; 8] = [
        ResizeEdge::Left,
        ResizeEdge::Right,
        ResizeEdge::Top,
        ResizeEdge::Bottom,
        ResizeEdge::TopLeft,
        ResizeEdge::TopRight,
        ResizeEdge::BottomLeft,
        ResizeEdge::BottomRight,
    ];

    fn moves_left(self) -> bool {
        matches!(
            self,
            ResizeEdge::Left | ResizeEdge::TopLeft | ResizeEdge::BottomLeft
        )
    }

    fn moves_right(self) -> bool {
        matches!(
            self,
            ResizeEdge::Right | ResizeEdge::TopRight | ResizeEdge::BottomRight
        )
    }

    fn moves_top(self) -> bool {
        matches!(
            self,
            ResizeEdge::Top | ResizeEdge::TopLeft | ResizeEdge::TopRight
        )
    }

    fn moves_bottom(self) -> bool {
        matches!(
            self,
            ResizeEdge::Bottom | ResizeEdge::BottomLeft | ResizeEdge::BottomRight
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MoveDrag {
    pub id: PaneId,
    pub initial_x: i32,
    pub initial_y: i32,
    pub start_pointer_x: f64,
    pub start_pointer_y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResizeDrag {
    pub id: PaneId,
    pub edge: ResizeEdge,
    pub start_rect: PaneRect,
    pub start_pointer_x: f64,
    pub start_pointer_y: f64,
}

#[derive(Debug, Clone, PartialEq)]
enum ActiveDrag {
    Move(MoveDrag),
    Resize(ResizeDrag),
}

/// Drag a pane's edge by `(dx, dy)` from `start`.
///
/// Edges not named by `edge` stay put. When the result would be smaller than
/// `min`, the dragged edge stops and the opposite edge keeps its place. Edges
/// dragged past the viewport are trimmed back to it.
pub fn apply_resize_drag(
    start: PaneRect,
    edge: ResizeEdge,
    dx: i32,
    dy: i32,
    min: Size,
    viewport: Viewport,
) -> PaneRect {
    // i64 holds any sum of two i32 values, so none of the steps below overflow
    let (dx, dy) = (i64::from(dx), i64::from(dy));
    let (min_w, min_h) = (i64::from(min.width), i64::from(min.height));
    let mut x = i64::from(start.x);
    let mut y = i64::from(start.y);
    let mut width = i64::from(start.width);
    let mut height = i64::from(start.height);

    if edge.moves_left() {
        x += dx;
        width -= dx;
    } else if edge.moves_right() {
        width += dx;
    }
    if edge.moves_top() {
        y += dy;
        height -= dy;
    } else if edge.moves_bottom() {
        height += dy;
    }

    if width < min_w {
        if edge.moves_left() {
            x -= min_w - width;
        }
        width = min_w;
    }
    if height < min_h {
        if edge.moves_top() {
            y -= min_h - height;
        }
        height = min_h;
    }

    if edge.moves_left() && x < 0 {
        width += x;
        x = 0;
    }
    if edge.moves_top() && y < 0 {
        height += y;
        y = 0;
    }
    let (view_w, view_h) = (i64::from(viewport.width), i64::from(viewport.height));
    if edge.moves_right() && x + width > view_w {
        width = view_w - x;
    }
    if edge.moves_bottom() && y + height > view_h {
        height = view_h - y;
    }

    PaneRect::new(
        narrow(x),
        narrow(y),
        narrow(width.max(min_w)),
        narrow(height.max(min_h)),
    )
}

fn narrow(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Tracks at most one in-flight gesture.
#[derive(Debug, Default)]
pub struct DragController {
    active: Option<ActiveDrag>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    pub fn dragging_id(&self) -> Option<&PaneId> {
        match &self.active {
            Some(ActiveDrag::Move(drag)) => Some(&drag.id),
            Some(ActiveDrag::Resize(drag)) => Some(&drag.id),
            None => None,
        }
    }

    /// Start moving `id` from the given pointer position. Activates the pane.
    pub fn begin_move(
        &mut self,
        registry: &mut WindowRegistry,
        id: &PaneId,
        pointer_x: f64,
        pointer_y: f64,
    ) -> bool {
        let Some(pane) = registry.pane(id) else {
            tracing::warn!(pane_id = %id, "begin_move: unknown pane");
            return false;
        };
        let drag = MoveDrag {
            id: id.clone(),
            initial_x: pane.x,
            initial_y: pane.y,
            start_pointer_x: pointer_x,
            start_pointer_y: pointer_y,
        };
        registry.activate_window(id);
        tracing::debug!(pane_id = %id, "move drag started");
        self.active = Some(ActiveDrag::Move(drag));
        true
    }

    /// Start resizing `id` by `edge`. Activates the pane.
    pub fn begin_resize(
        &mut self,
        registry: &mut WindowRegistry,
        id: &PaneId,
        edge: ResizeEdge,
        pointer_x: f64,
        pointer_y: f64,
    ) -> bool {
        let Some(pane) = registry.pane(id) else {
            tracing::warn!(pane_id = %id, "begin_resize: unknown pane");
            return false;
        };
        let drag = ResizeDrag {
            id: id.clone(),
            edge,
            start_rect: pane.rect(),
            start_pointer_x: pointer_x,
            start_pointer_y: pointer_y,
        };
        registry.activate_window(id);
        tracing::debug!(pane_id = %id, ?edge, "resize drag started");
        self.active = Some(ActiveDrag::Resize(drag));
        true
    }

    /// Feed a pointer position. Returns the rectangle committed for the dragged
    /// pane, or `None` when idle, when the pane went away or when the pointer
    /// position is not finite.
    pub fn pointer_moved(
        &mut self,
        registry: &mut WindowRegistry,
        pointer_x: f64,
        pointer_y: f64,
    ) -> Option<PaneRect> {
        if !(pointer_x.is_finite() && pointer_y.is_finite()) {
            return None;
        }
        match self.active.as_ref()? {
            ActiveDrag::Move(drag) => {
                let x = f64::from(drag.initial_x) + (pointer_x - drag.start_pointer_x);
                let y = f64::from(drag.initial_y) + (pointer_y - drag.start_pointer_y);
                let id = drag.id.clone();
                let Some(position) = registry.update_position(&id, x, y) else {
                    self.active = None;
                    return None;
                };
                let size = registry.pane(&id)?.size();
                Some(PaneRect::from_parts(position, size))
            }
            ActiveDrag::Resize(drag) => {
                let dx = to_grid(pointer_x - drag.start_pointer_x);
                let dy = to_grid(pointer_y - drag.start_pointer_y);
                let target = apply_resize_drag(
                    drag.start_rect,
                    drag.edge,
                    dx,
                    dy,
                    registry.config().min_size(),
                    registry.viewport(),
                );
                let id = drag.id.clone();
                let committed = registry.set_bounds(&id, target);
                if committed.is_none() {
                    self.active = None;
                }
                committed
            }
        }
    }

    /// Finish the gesture, returning the pane that was being dragged.
    pub fn end(&mut self) -> Option<PaneId> {
        let id = match self.active.take()? {
            ActiveDrag::Move(drag) => drag.id,
            ActiveDrag::Resize(drag) => drag.id,
        };
        tracing::debug!(pane_id = %id, "drag finished");
        Some(id)
    }
}
