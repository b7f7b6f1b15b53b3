use eframe::egui;

use crate::config::HintStyle;
use crate::geometry::NormalizedRect;
use crate::view::surface_to_screen;

/// A shape drawn on the hint overlay, in surface pixel coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum HintShape {
    Outline {
        rect: NormalizedRect,
        color: egui::Color32,
    },
    /// Text drawn twice: outline color first, then fill color on top.
    OutlinedText {
        text: String,
        x: i32,
        y: i32,
        size: f32,
        outline: egui::Color32,
        fill: egui::Color32,
    },
    /// A copy of the owning surface drawn onto the overlay.
    SurfaceCopy,
}

/// Transparent layer stacked on top of a surface for selection feedback.
pub struct HintOverlay {
    width: u32,
    height: u32,
    shapes: Vec<HintShape>,
}

impl HintOverlay {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            shapes: Vec::new(),
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn shapes(&self) -> &[HintShape] {
        &self.shapes
    }

    pub fn is_clear(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    pub fn stroke_rect(&mut self, rect: NormalizedRect, color: egui::Color32) {
        self.shapes.push(HintShape::Outline { rect, color });
    }

    pub fn outlined_text(&mut self, text: String, x: i32, y: i32, style: &HintStyle) {
        self.shapes.push(HintShape::OutlinedText {
            text,
            x,
            y,
            size: style.label_size,
            outline: style.label_outline,
            fill: style.label_fill,
        });
    }

    pub fn copy_surface(&mut self) {
        self.shapes.push(HintShape::SurfaceCopy);
    }

    /// Replace the overlay content with the hint for `rect`.
    pub fn draw_selection_hint(&mut self, rect: NormalizedRect, style: &HintStyle) {
        self.clear();
        self.stroke_rect(rect, style.stroke);

        let (dx, dy) = style.label_offset;
        self.outlined_text(
            rect.label(),
            rect.origin_x.saturating_add(dx),
            rect.origin_y.saturating_add(dy),
            style,
        );
    }

    /// Paint the overlay over a surface displayed in `image_rect`.
    ///
    /// `texture` is the surface's texture, used for [`HintShape::SurfaceCopy`].
    pub fn paint(
        &self,
        painter: &egui::Painter,
        image_rect: egui::Rect,
        texture: Option<egui::TextureId>,
    ) {
        let (width, height) = self.size();
        if self.is_clear() || width == 0 || height == 0 {
            return;
        }
        let scale = image_rect.width() / width as f32;
        let to_screen = |x: i32, y: i32| surface_to_screen(x, y, image_rect.min, scale);

        for shape in self.shapes() {
            match shape {
                HintShape::Outline { rect, color } => {
                    let min = to_screen(rect.origin_x, rect.origin_y);
                    let size = egui::vec2(rect.width as f32 * scale, rect.height as f32 * scale);
                    painter.rect_stroke(
                        egui::Rect::from_min_size(min, size),
                        0.0,
                        egui::Stroke::new(1.0, *color),
                    );
                }
                HintShape::OutlinedText {
                    text,
                    x,
                    y,
                    size,
                    outline,
                    fill,
                } => {
                    // y is the text's bottom edge
                    let pos = to_screen(*x, *y);
                    let font = egui::FontId::monospace(size * scale);
                    for offset in [
                        egui::vec2(-1.0, 0.0),
                        egui::vec2(1.0, 0.0),
                        egui::vec2(0.0, -1.0),
                        egui::vec2(0.0, 1.0),
                    ] {
                        painter.text(
                            pos + offset,
                            egui::Align2::LEFT_BOTTOM,
                            text,
                            font.clone(),
                            *outline,
                        );
                    }
                    painter.text(pos, egui::Align2::LEFT_BOTTOM, text, font, *fill);
                }
                HintShape::SurfaceCopy => {
                    if let Some(texture) = texture {
                        painter.image(
                            texture,
                            image_rect,
                            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                            egui::Color32::WHITE,
                        );
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::normalize;

    #[test]
    fn hint_is_outline_then_label() {
        let mut overlay = HintOverlay::new(100, 100);
        let style = HintStyle::default();
        overlay.draw_selection_hint(normalize(10, 10, 37, 22), &style);

        assert_eq!(
            overlay.shapes(),
            &[
                HintShape::Outline {
                    rect: normalize(10, 10, 37, 22),
                    color: egui::Color32::RED,
                },
                HintShape::OutlinedText {
                    text: "30 x 15".to_owned(),
                    x: 15,
                    y: 25,
                    size: 22.0,
                    outline: egui::Color32::WHITE,
                    fill: egui::Color32::BLACK,
                },
            ]
        );
    }

    #[test]
    fn redrawing_replaces_previous_hint() {
        let mut overlay = HintOverlay::new(100, 100);
        let style = HintStyle::default();
        overlay.draw_selection_hint(normalize(0, 0, 10, 10), &style);
        overlay.draw_selection_hint(normalize(0, 0, 20, 20), &style);

        assert_eq!(overlay.shapes().len(), 2);
        assert!(matches!(
            &overlay.shapes()[1],
            HintShape::OutlinedText { text, .. } if text == "20 x 20"
        ));
    }

    #[test]
    fn clear_empties_overlay() {
        let mut overlay = HintOverlay::new(4, 4);
        overlay.copy_surface();
        assert!(!overlay.is_clear());
        overlay.clear();
        assert!(overlay.is_clear());
        assert_eq!(overlay.size(), (4, 4));
    }
}
