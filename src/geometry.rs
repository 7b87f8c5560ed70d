//! Pure geometry helpers: viewport bounding and edge snapping.
//!
//! Nothing here holds state. The registry feeds in the candidate coordinates and
//! the rectangles of the other visible panes and commits whatever comes out.

use serde::{Deserialize, Serialize};

/// Current size of the canvas the panes live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Raise both dimensions to at least `min`.
    pub fn at_least(self, min: Size) -> Self {
        Self {
            width: self.width.max(min.width),
            height: self.height.max(min.height),
        }
    }
}

/// Signed pane rectangle in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PaneRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl PaneRect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_parts(position: Position, size: Size) -> Self {
        Self::new(position.x, position.y, size.width, size.height)
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        if self.width <= 0 || self.height <= 0 {
            return false;
        }
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// Clamp an origin so a `width` x `height` pane stays inside the viewport.
///
/// When the pane is larger than the viewport the upper bound drops below zero;
/// the lower bound wins and the pane is pinned to the top-left corner.
pub fn clamp_to_viewport(x: i32, y: i32, width: i32, height: i32, viewport: Viewport) -> Position {
    let max_x = viewport.width.saturating_sub(width);
    let max_y = viewport.height.saturating_sub(height);
    Position {
        x: x.min(max_x).max(0),
        y: y.min(max_y).max(0),
    }
}

/// Snap a candidate origin to the viewport edges and to the edges of `others`.
///
/// Rules run in a fixed order and each one that fires overwrites whatever an
/// earlier rule produced, so later rules win: left, right, top and bottom
/// viewport edges first, then for every other pane (in the order given) its
/// left, right, top and bottom edges. Every rule compares against the raw
/// candidate, not against an already snapped value.
///
/// Non-finite input (coordinates or the pane's own size) comes back unchanged.
pub fn snap<I>(
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    others: I,
    viewport: Viewport,
    snap_distance: f64,
) -> (f64, f64)
where
    I: IntoIterator<Item = PaneRect>,
{
    if !(x.is_finite() && y.is_finite() && width.is_finite() && height.is_finite()) {
        return (x, y);
    }
    let near = |a: f64, b: f64| (a - b).abs() < snap_distance;
    let vw = f64::from(viewport.width);
    let vh = f64::from(viewport.height);

    let mut snapped_x = x;
    let mut snapped_y = y;

    if near(x, 0.0) {
        snapped_x = 0.0;
    }
    if near(x + width, vw) {
        snapped_x = vw - width;
    }
    if near(y, 0.0) {
        snapped_y = 0.0;
    }
    if near(y + height, vh) {
        snapped_y = vh - height;
    }

    for other in others {
        let left = f64::from(other.x);
        let top = f64::from(other.y);
        let right = left + f64::from(other.width);
        let bottom = top + f64::from(other.height);

        // our right edge onto their left edge
        if near(x + width, left) {
            snapped_x = left - width;
        }
        // our left edge onto their right edge
        if near(x, right) {
            snapped_x = right;
        }
        if near(y + height, top) {
            snapped_y = top - height;
        }
        if near(y, bottom) {
            snapped_y = bottom;
        }
    }

    (snapped_x, snapped_y)
}

/// Round a finite coordinate to the integer grid panes are stored on.
pub(crate) fn to_grid(value: f64) -> i32 {
    // `as` saturates at the i32 range, which clamping then pulls back in.
    value.round() as i32
}
