// Values that are part of the cropping behavior rather than user preference.

/// Grid unit, in pixels, that selection sizes snap to.
pub const GRID_UNIT: u32 = 5;

/// Label position relative to the selection origin.
pub const LABEL_OFFSET: (i32, i32) = (5, 15);

/// Payload tag carried by a row's drag handle. Drops with any other payload are ignored.
pub const DRAG_TAG: &str = "drag";

/// Side length of the square stroked onto a surface when a drag is dropped on it.
pub const PLACEHOLDER_SIZE: u32 = 100;

/// Padding around each surface inside its row.
pub const ROW_PADDING: f32 = 20.0;
