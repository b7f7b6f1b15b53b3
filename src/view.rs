use eframe::egui;

use crate::constant::{DRAG_TAG, ROW_PADDING};
use crate::controller::{CropRow, PointerEvent};

/// Texture uploaded for a row, tagged with the surface revision it was built from.
pub struct RowTexture {
    revision: u64,
    handle: egui::TextureHandle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowAction {
    None,
    Remove,
}

/// Map a screen position to surface-local pixels for a surface drawn at
/// `image_origin` with `scale` screen points per pixel. Points left of or
/// above the surface come out negative.
pub fn screen_to_surface(pos: egui::Pos2, image_origin: egui::Pos2, scale: f32) -> (i32, i32) {
    let local = (pos - image_origin) / scale;
    (local.x.floor() as i32, local.y.floor() as i32)
}

/// Inverse of [`screen_to_surface`] for the top left corner of a pixel.
pub fn surface_to_screen(x: i32, y: i32, image_origin: egui::Pos2, scale: f32) -> egui::Pos2 {
    image_origin + egui::vec2(x as f32 * scale, y as f32 * scale)
}

/// Upload the surface pixels if the cached texture is missing or stale.
fn ensure_texture(
    ctx: &egui::Context,
    row: &CropRow,
    slot: &mut Option<RowTexture>,
) -> egui::TextureId {
    let revision = row.surface().revision();
    if let Some(texture) = slot.as_ref().filter(|t| t.revision == revision) {
        return texture.handle.id();
    }

    let pixels = row.surface().pixels();
    let size = [pixels.width() as _, pixels.height() as _];
    let color_image = egui::ColorImage::from_rgba_unmultiplied(size, pixels.as_raw());
    let handle = ctx.load_texture(
        format!("row-{}", row.id()),
        color_image,
        egui::TextureOptions::LINEAR,
    );
    let id = handle.id();
    *slot = Some(RowTexture { revision, handle });
    id
}

/// Draw one row and route its pointer and drop input into the row.
pub fn show_row(ui: &mut egui::Ui, row: &mut CropRow, texture: &mut Option<RowTexture>) -> RowAction {
    let mut action = RowAction::None;

    ui.horizontal(|ui| {
        ui.dnd_drag_source(egui::Id::new(("drag-handle", row.id())), DRAG_TAG.to_owned(), |ui| {
            ui.label("✋")
        })
        .response
        .on_hover_text("Drag onto an image");
        ui.label(format!("{} x {}", row.surface().width(), row.surface().height()));
        if row.surface().is_cropped() {
            ui.weak("cropped");
        }
        if ui.small_button("✖").on_hover_text("Remove").clicked() {
            action = RowAction::Remove;
        }
    });

    // Shrink to the available width, never enlarge
    let image_size = egui::vec2(row.surface().width() as f32, row.surface().height() as f32);
    let max_width = (ui.available_width() - ROW_PADDING * 2.0).max(1.0);
    let scale = (max_width / image_size.x).min(1.0);
    let display_size = image_size * scale;
    let total_size = display_size + egui::vec2(ROW_PADDING * 2.0, ROW_PADDING * 2.0);

    let (target_rect, response) = ui.allocate_exact_size(total_size, egui::Sense::drag());
    let image_origin = target_rect.min + egui::vec2(ROW_PADDING, ROW_PADDING);

    let to_surface = |pos: egui::Pos2| screen_to_surface(pos, image_origin, scale);

    let mut replaced = false;
    if response.drag_started() {
        let origin = ui.input(|i| i.pointer.press_origin());
        if let Some(pos) = origin.or(response.interact_pointer_pos()) {
            let (x, y) = to_surface(pos);
            row.handle_pointer(PointerEvent::Down { x, y });
        }
    }
    if response.dragged() {
        if let Some(pos) = response.interact_pointer_pos() {
            let (x, y) = to_surface(pos);
            row.handle_pointer(PointerEvent::Move { x, y });
        }
    }
    if response.drag_stopped() {
        replaced = row.handle_pointer(PointerEvent::Up);
    }

    if let Some(payload) = response.dnd_release_payload::<String>() {
        if let Some(pos) = ui.input(|i| i.pointer.interact_pos()) {
            let (x, y) = to_surface(pos);
            row.acknowledge_drop(&payload, x, y);
        }
    }

    if replaced {
        *texture = None;
        ui.ctx().request_repaint();
    }

    let texture_id = ensure_texture(ui.ctx(), row, texture);
    let image_rect = egui::Rect::from_min_size(
        image_origin,
        egui::vec2(row.surface().width() as f32, row.surface().height() as f32) * scale,
    );

    let painter = ui.painter_at(target_rect);
    painter.image(
        texture_id,
        image_rect,
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        egui::Color32::WHITE,
    );
    row.overlay().paint(&painter, image_rect, Some(texture_id));

    if response.hovered() || row.controller().is_drawing() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::Crosshair);
    }

    action
}
