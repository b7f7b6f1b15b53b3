use image::Rgba;

use crate::config::{CropperConfig, HintStyle};
use crate::constant::DRAG_TAG;
use crate::geometry::{NormalizedRect, normalize_on_grid};
use crate::overlay::HintOverlay;
use crate::surface::Surface;

pub type RowId = u64;

/// Live drag on one surface, in surface-local pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DragState {
    pub start_x: i32,
    pub start_y: i32,
    pub delta_x: i32,
    pub delta_y: i32,
}

impl DragState {
    fn rect(&self, grid: u32) -> NormalizedRect {
        normalize_on_grid(
            grid,
            self.start_x,
            self.start_y,
            self.start_x.saturating_add(self.delta_x),
            self.start_y.saturating_add(self.delta_y),
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEvent {
    Down { x: i32, y: i32 },
    Move { x: i32, y: i32 },
    Up,
}

pub enum CommitOutcome {
    /// No drag was in progress.
    Idle,
    /// The selection had no area on the surface.
    Discarded,
    /// The selected region, ready to replace the surface.
    Cropped(Surface),
}

/// Drives one Begin -> Update* -> Commit cycle at a time for a single surface.
pub struct SelectionController {
    drag: Option<DragState>,
    grid: u32,
    style: HintStyle,
}

impl SelectionController {
    pub fn new(config: &CropperConfig) -> Self {
        Self {
            drag: None,
            grid: config.grid_unit,
            style: config.hint,
        }
    }

    pub fn is_drawing(&self) -> bool {
        self.drag.is_some()
    }

    pub fn begin(&mut self, x: i32, y: i32) {
        self.drag = Some(DragState {
            start_x: x,
            start_y: y,
            delta_x: 0,
            delta_y: 0,
        });
    }

    /// Track the pointer and redraw the hint. Returns the live rectangle.
    pub fn update(&mut self, x: i32, y: i32, overlay: &mut HintOverlay) -> Option<NormalizedRect> {
        let drag = self.drag.as_mut()?;
        drag.delta_x = x.saturating_sub(drag.start_x);
        drag.delta_y = y.saturating_sub(drag.start_y);

        let rect = drag.rect(self.grid);
        overlay.draw_selection_hint(rect, &self.style);
        Some(rect)
    }

    /// End the drag. The overlay is cleared whether or not anything gets cropped.
    pub fn commit(&mut self, surface: &Surface, overlay: &mut HintOverlay) -> CommitOutcome {
        let Some(drag) = self.drag.take() else {
            return CommitOutcome::Idle;
        };
        overlay.clear();

        let rect = drag.rect(self.grid);
        if rect.is_empty() {
            log::debug!("discarding empty selection at ({}, {})", rect.origin_x, rect.origin_y);
            return CommitOutcome::Discarded;
        }

        match rect.clamp_to(surface.width(), surface.height()) {
            Some(region) => CommitOutcome::Cropped(surface.crop(region)),
            None => {
                log::debug!("discarding selection {rect:?} outside the surface");
                CommitOutcome::Discarded
            }
        }
    }
}

/// One pasted image: its surface, the overlay stacked on it and the controller driving both.
pub struct CropRow {
    id: RowId,
    surface: Surface,
    overlay: HintOverlay,
    controller: SelectionController,
    config: CropperConfig,
}

impl CropRow {
    /// Wire a surface to a fresh overlay and controller.
    ///
    /// Used both for newly ingested images and for the result of a crop.
    pub fn attach(id: RowId, surface: Surface, config: &CropperConfig) -> Self {
        let overlay = HintOverlay::new(surface.width(), surface.height());
        Self {
            id,
            surface,
            overlay,
            controller: SelectionController::new(config),
            config: *config,
        }
    }

    pub fn id(&self) -> RowId {
        self.id
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn overlay(&self) -> &HintOverlay {
        &self.overlay
    }

    pub fn controller(&self) -> &SelectionController {
        &self.controller
    }

    /// Feed a pointer event. Returns `true` when the surface was replaced by a crop.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        match event {
            PointerEvent::Down { x, y } => {
                self.controller.begin(x, y);
                false
            }
            PointerEvent::Move { x, y } => {
                self.controller.update(x, y, &mut self.overlay);
                false
            }
            PointerEvent::Up => {
                match self.controller.commit(&self.surface, &mut self.overlay) {
                    CommitOutcome::Cropped(cropped) => {
                        log::info!(
                            "cropped row {} from {}x{} to {}x{}",
                            self.id,
                            self.surface.width(),
                            self.surface.height(),
                            cropped.width(),
                            cropped.height()
                        );
                        *self = CropRow::attach(self.id, cropped, &self.config);
                        true
                    }
                    CommitOutcome::Idle | CommitOutcome::Discarded => false,
                }
            }
        }
    }

    /// React to an in-window drop at `(x, y)`.
    ///
    /// Only the [`DRAG_TAG`] payload is acted on: a placeholder square is
    /// stroked onto the surface and the surface is copied onto its overlay.
    pub fn acknowledge_drop(&mut self, payload: &str, x: i32, y: i32) -> bool {
        if payload != DRAG_TAG {
            return false;
        }

        let [r, g, b, a] = self.config.hint.stroke.to_srgba_unmultiplied();
        let size = self.config.placeholder_size;
        self.surface.stroke_rect(x, y, size, size, Rgba([r, g, b, a]));
        self.overlay.copy_surface();
        log::debug!("drop acknowledged on row {} at ({x}, {y})", self.id);
        true
    }
}
