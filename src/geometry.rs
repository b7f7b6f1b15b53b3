use crate::constant::GRID_UNIT;

/// Selection rectangle derived from a drag, snapped to the grid.
///
/// The origin is the lesser corner and may lie outside the surface. Width and
/// height are always multiples of the grid unit they were snapped to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NormalizedRect {
    pub origin_x: i32,
    pub origin_y: i32,
    pub width: u32,
    pub height: u32,
}

/// Region of a raster in pixel coordinates, always inside its bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl NormalizedRect {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Dimension label shown next to the selection outline.
    pub fn label(&self) -> String {
        format!("{} x {}", self.width, self.height)
    }

    /// Intersect with a `width` x `height` raster anchored at the origin.
    ///
    /// Returns `None` when nothing of the rectangle lies on the raster.
    pub fn clamp_to(&self, width: u32, height: u32) -> Option<PixelRect> {
        let x0 = i64::from(self.origin_x).max(0);
        let y0 = i64::from(self.origin_y).max(0);
        let x1 = (i64::from(self.origin_x) + i64::from(self.width)).min(i64::from(width));
        let y1 = (i64::from(self.origin_y) + i64::from(self.height)).min(i64::from(height));

        if x1 <= x0 || y1 <= y0 {
            return None;
        }

        // All four values are within 0..=u32::MAX here.
        Some(PixelRect {
            x: x0 as u32,
            y: y0 as u32,
            width: (x1 - x0) as u32,
            height: (y1 - y0) as u32,
        })
    }
}

/// Normalize a drag from `(start_x, start_y)` to `(end_x, end_y)` on the default grid.
pub fn normalize(start_x: i32, start_y: i32, end_x: i32, end_y: i32) -> NormalizedRect {
    normalize_on_grid(GRID_UNIT, start_x, start_y, end_x, end_y)
}

/// Normalize a drag, snapping both dimensions to multiples of `grid`.
///
/// Dragging right/down rounds the size up to the next grid line, dragging
/// left/up rounds it down. The rectangle always extends from the anchor
/// towards the drag direction.
pub fn normalize_on_grid(
    grid: u32,
    start_x: i32,
    start_y: i32,
    end_x: i32,
    end_y: i32,
) -> NormalizedRect {
    let grid = i64::from(grid.max(1));
    let (origin_x, width) = snap_axis(grid, start_x, end_x);
    let (origin_y, height) = snap_axis(grid, start_y, end_y);

    NormalizedRect {
        origin_x,
        origin_y,
        width,
        height,
    }
}

fn snap_axis(grid: i64, start: i32, end: i32) -> (i32, u32) {
    let (start, end) = (i64::from(start), i64::from(end));
    let grows = end > start;
    let raw = (end - start).abs();

    let size = if grows {
        (raw + grid - 1) / grid * grid
    } else {
        raw / grid * grid
    };
    let origin = if grows { start } else { start - size };

    let origin = origin.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
    let size = u32::try_from(size).unwrap_or(u32::MAX);
    (origin, size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_right_down_grows_to_next_grid_line() {
        let rect = normalize(10, 10, 37, 22);
        assert_eq!(
            rect,
            NormalizedRect {
                origin_x: 10,
                origin_y: 10,
                width: 30,
                height: 15,
            }
        );
    }

    #[test]
    fn drag_left_up_shrinks_to_previous_grid_line() {
        let rect = normalize(37, 22, 10, 10);
        assert_eq!(
            rect,
            NormalizedRect {
                origin_x: 12,
                origin_y: 12,
                width: 25,
                height: 10,
            }
        );
    }

    #[test]
    fn mixed_directions_snap_each_axis_independently() {
        // right on x (ceil), up on y (floor)
        let rect = normalize(100, 100, 103, 92);
        assert_eq!(rect.origin_x, 100);
        assert_eq!(rect.width, 5);
        assert_eq!(rect.height, 5);
        assert_eq!(rect.origin_y, 95);
    }

    #[test]
    fn zero_delta_gives_empty_rect_at_anchor() {
        let rect = normalize(42, 17, 42, 17);
        assert!(rect.is_empty());
        assert_eq!((rect.origin_x, rect.origin_y), (42, 17));
    }

    #[test]
    fn small_backwards_drag_collapses_to_zero() {
        let rect = normalize(20, 20, 16, 18);
        assert_eq!((rect.width, rect.height), (0, 0));
        assert_eq!((rect.origin_x, rect.origin_y), (20, 20));
    }

    #[test]
    fn exact_grid_multiples_are_kept() {
        assert_eq!(normalize(0, 0, 50, 25).width, 50);
        assert_eq!(normalize(50, 25, 0, 0).height, 25);
    }

    #[test]
    fn repeated_input_yields_same_rect() {
        let first = normalize(-7, 300, 211, -48);
        for _ in 0..10 {
            assert_eq!(normalize(-7, 300, 211, -48), first);
        }
    }

    #[test]
    fn extreme_coordinates_do_not_overflow() {
        let rect = normalize(i32::MIN, i32::MIN, i32::MAX, i32::MAX);
        assert_eq!(rect.origin_x, i32::MIN);
        assert_eq!(rect.width, u32::MAX);

        let rect = normalize(i32::MAX, i32::MAX, i32::MIN, i32::MIN);
        assert_eq!(rect.origin_x, i32::MIN);
        assert_eq!(rect.width, u32::MAX);
    }

    #[test]
    fn custom_grid_and_zero_grid() {
        let rect = normalize_on_grid(8, 0, 0, 9, 9);
        assert_eq!((rect.width, rect.height), (16, 16));

        // a grid of zero behaves like no snapping
        let rect = normalize_on_grid(0, 0, 0, 9, 7);
        assert_eq!((rect.width, rect.height), (9, 7));
    }

    #[test]
    fn label_formats_dimensions() {
        assert_eq!(normalize(10, 10, 37, 22).label(), "30 x 15");
    }

    #[test]
    fn clamp_inside_bounds_is_identity() {
        let rect = normalize(10, 10, 37, 22);
        assert_eq!(
            rect.clamp_to(100, 100),
            Some(PixelRect {
                x: 10,
                y: 10,
                width: 30,
                height: 15,
            })
        );
    }

    #[test]
    fn clamp_trims_off_surface_parts() {
        let rect = normalize(-12, 90, 40, 130);
        assert_eq!(
            rect.clamp_to(50, 100),
            Some(PixelRect {
                x: 0,
                y: 90,
                width: 43,
                height: 10,
            })
        );
    }

    #[test]
    fn clamp_fully_outside_is_none() {
        assert_eq!(normalize(200, 200, 260, 260).clamp_to(100, 100), None);
        assert_eq!(normalize(-80, 0, -20, 40).clamp_to(100, 100), None);
    }
}
