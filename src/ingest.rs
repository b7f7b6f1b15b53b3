use std::path::Path;

use anyhow::{Context, Result};
use eframe::egui;
use image::RgbaImage;

use crate::surface::Surface;

/// One entry read from the system clipboard.
pub enum ClipboardItem {
    Image(RgbaImage),
    Text(String),
}

impl ClipboardItem {
    pub fn is_image(&self) -> bool {
        matches!(self, ClipboardItem::Image(_))
    }
}

/// Read everything the clipboard currently offers.
///
/// A format that is not on the clipboard is left out. Any other clipboard
/// error is logged and that format is skipped.
pub fn read_clipboard() -> Result<Vec<ClipboardItem>> {
    let mut clipboard = arboard::Clipboard::new().context("failed to open clipboard")?;
    let mut items = Vec::new();

    match if_available(clipboard.get_image()) {
        Ok(Some(data)) => {
            if let Some(item) = image_item(data.width, data.height, data.bytes.into_owned()) {
                items.push(item);
            }
        }
        Ok(None) => {}
        Err(e) => log::warn!("failed to read clipboard image: {e}"),
    }
    match if_available(clipboard.get_text()) {
        Ok(Some(text)) => items.push(ClipboardItem::Text(text)),
        Ok(None) => {}
        Err(e) => log::warn!("failed to read clipboard text: {e}"),
    }

    Ok(items)
}

/// Separate "nothing of this kind on the clipboard" from real failures.
fn if_available<T>(result: Result<T, arboard::Error>) -> Result<Option<T>, arboard::Error> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(arboard::Error::ContentNotAvailable) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Build an image item from raw RGBA clipboard data, or skip it with a warning.
fn image_item(width: usize, height: usize, bytes: Vec<u8>) -> Option<ClipboardItem> {
    let (Ok(w), Ok(h)) = (u32::try_from(width), u32::try_from(height)) else {
        log::warn!("clipboard image {width}x{height} is too large");
        return None;
    };
    match RgbaImage::from_raw(w, h, bytes) {
        Some(image) => Some(ClipboardItem::Image(image)),
        None => {
            log::warn!("clipboard image {w}x{h} has a malformed buffer");
            None
        }
    }
}

/// One surface per image item, in clipboard order. Other items are skipped.
pub fn surfaces_from_clipboard(items: Vec<ClipboardItem>) -> Vec<Surface> {
    items
        .into_iter()
        .filter_map(|item| match item {
            ClipboardItem::Image(image) => Some(Surface::original(image)),
            ClipboardItem::Text(text) => {
                log::debug!("ignoring {} bytes of clipboard text", text.len());
                None
            }
        })
        .collect()
}

pub fn open_path(path: &Path) -> Result<Surface> {
    let image = image::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    Ok(Surface::original(image.to_rgba8()))
}

/// Decode in-memory image bytes.
///
/// `mime` may be empty when the platform does not report one. A non-empty,
/// non-image MIME type is skipped without trying to decode.
pub fn decode_bytes(mime: &str, bytes: &[u8]) -> Result<Option<Surface>> {
    if !mime.is_empty() && !mime.contains("image") {
        return Ok(None);
    }
    let image = image::load_from_memory(bytes).context("failed to decode image data")?;
    Ok(Some(Surface::original(image.to_rgba8())))
}

/// Decode a file dropped onto the window, from its path or its bytes.
pub fn decode_dropped(file: &egui::DroppedFile) -> Result<Option<Surface>> {
    if let Some(path) = &file.path {
        return open_path(path).map(Some);
    }
    match &file.bytes {
        Some(bytes) => decode_bytes(&file.mime, bytes),
        None => Ok(None),
    }
}
