use crate::geometry::PaneRect;
use crate::window::PaneId;

use super::Placement;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Side by side: one column per pane.
    Horizontal,
    /// Stacked: one row per pane.
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridDims {
    pub cols: usize,
    pub rows: usize,
}

/// `cols = ceil(sqrt(n))`, `rows = ceil(n / cols)`.
pub fn grid_dimensions(count: usize) -> GridDims {
    if count == 0 {
        return GridDims { cols: 0, rows: 0 };
    }
    let mut cols = (count as f64).sqrt().ceil() as usize;
    // guard against float error on perfect squares
    while cols > 1 && (cols - 1) * (cols - 1) >= count {
        cols -= 1;
    }
    while cols * cols < count {
        cols += 1;
    }
    GridDims {
        cols,
        rows: count.div_ceil(cols),
    }
}

/// Row-major grid over `area`, in the order `ids` are given.
pub fn grid_plan(ids: &[PaneId], area: PaneRect) -> Vec<Placement> {
    let GridDims { cols, rows } = grid_dimensions(ids.len());
    if cols == 0 {
        return Vec::new();
    }
    let cell_w = area.width / cols as i32;
    let cell_h = area.height / rows as i32;
    ids.iter()
        .enumerate()
        .map(|(i, id)| {
            let col = (i % cols) as i32;
            let row = (i / cols) as i32;
            (
                id.clone(),
                PaneRect::new(
                    area.x + col * cell_w,
                    area.y + row * cell_h,
                    cell_w,
                    cell_h,
                ),
            )
        })
        .collect()
}

/// Equal slices of `area` along `direction`, in the order `ids` are given.
pub fn tile_plan(ids: &[PaneId], area: PaneRect, direction: Direction) -> Vec<Placement> {
    if ids.is_empty() {
        return Vec::new();
    }
    let count = ids.len() as i32;
    ids.iter()
        .enumerate()
        .map(|(i, id)| {
            let i = i as i32;
            let rect = match direction {
                Direction::Horizontal => {
                    let w = area.width / count;
                    PaneRect::new(area.x + i * w, area.y, w, area.height)
                }
                Direction::Vertical => {
                    let h = area.height / count;
                    PaneRect::new(area.x, area.y + i * h, area.width, h)
                }
            };
            (id.clone(), rect)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(names: &[&str]) -> Vec<PaneId> {
        names.iter().map(|n| PaneId::from(*n)).collect()
    }

    #[test]
    fn grid_dimensions_follow_square_root() {
        assert_eq!(grid_dimensions(0), GridDims { cols: 0, rows: 0 });
        assert_eq!(grid_dimensions(1), GridDims { cols: 1, rows: 1 });
        assert_eq!(grid_dimensions(2), GridDims { cols: 2, rows: 1 });
        assert_eq!(grid_dimensions(3), GridDims { cols: 2, rows: 2 });
        assert_eq!(grid_dimensions(4), GridDims { cols: 2, rows: 2 });
        assert_eq!(grid_dimensions(5), GridDims { cols: 3, rows: 2 });
        assert_eq!(grid_dimensions(9), GridDims { cols: 3, rows: 3 });
        assert_eq!(grid_dimensions(10), GridDims { cols: 4, rows: 3 });
    }

    #[test]
    fn four_panes_fill_two_by_two() {
        let area = PaneRect::new(0, 60, 1000, 740);
        let plan = grid_plan(&ids(&["a", "b", "c", "d"]), area);
        let rects: Vec<PaneRect> = plan.iter().map(|(_, r)| *r).collect();
        assert_eq!(
            rects,
            vec![
                PaneRect::new(0, 60, 500, 370),
                PaneRect::new(500, 60, 500, 370),
                PaneRect::new(0, 430, 500, 370),
                PaneRect::new(500, 430, 500, 370),
            ]
        );
        // row-major in the given order
        assert_eq!(plan[2].0, PaneId::from("c"));
    }

    #[test]
    fn horizontal_tile_gives_equal_columns() {
        let area = PaneRect::new(0, 60, 1200, 740);
        let plan = tile_plan(&ids(&["a", "b", "c"]), area, Direction::Horizontal);
        assert_eq!(plan[0].1, PaneRect::new(0, 60, 400, 740));
        assert_eq!(plan[2].1, PaneRect::new(800, 60, 400, 740));
    }

    #[test]
    fn vertical_tile_gives_equal_rows() {
        let area = PaneRect::new(0, 60, 1200, 900);
        let plan = tile_plan(&ids(&["a", "b"]), area, Direction::Vertical);
        assert_eq!(plan[0].1, PaneRect::new(0, 60, 1200, 450));
        assert_eq!(plan[1].1, PaneRect::new(0, 510, 1200, 450));
    }

    #[test]
    fn empty_input_plans_nothing() {
        let area = PaneRect::new(0, 0, 10, 10);
        assert!(grid_plan(&[], area).is_empty());
        assert!(tile_plan(&[], area, Direction::Vertical).is_empty());
    }
}
