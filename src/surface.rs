use image::{Rgba, RgbaImage, imageops};

use crate::geometry::PixelRect;

/// An owned raster the user can select on and crop.
///
/// `is_cropped` only tags where the pixels came from; nothing branches on it.
pub struct Surface {
    pixels: RgbaImage,
    is_cropped: bool,
    revision: u64,
}

impl Surface {
    /// A surface holding a freshly ingested image.
    pub fn original(pixels: RgbaImage) -> Self {
        Self {
            pixels,
            is_cropped: false,
            revision: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn is_cropped(&self) -> bool {
        self.is_cropped
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Bumped whenever the pixels change in place.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Copy `region` into a new surface tagged as cropped.
    pub fn crop(&self, region: PixelRect) -> Surface {
        let pixels =
            imageops::crop_imm(&self.pixels, region.x, region.y, region.width, region.height)
                .to_image();
        Surface {
            pixels,
            is_cropped: true,
            revision: 0,
        }
    }

    /// Stroke a one pixel rectangle outline onto the pixels, clipped to the bounds.
    pub fn stroke_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Rgba<u8>) {
        if width == 0 || height == 0 {
            return;
        }

        let (x0, y0) = (i64::from(x), i64::from(y));
        let x1 = x0 + i64::from(width) - 1;
        let y1 = y0 + i64::from(height) - 1;

        for px in x0..=x1 {
            self.put(px, y0, color);
            self.put(px, y1, color);
        }
        for py in y0..=y1 {
            self.put(x0, py, color);
            self.put(x1, py, color);
        }
        self.revision += 1;
    }

    fn put(&mut self, x: i64, y: i64, color: Rgba<u8>) {
        let in_bounds = (0..i64::from(self.width())).contains(&x)
            && (0..i64::from(self.height())).contains(&y);
        if in_bounds {
            self.pixels.put_pixel(x as u32, y as u32, color);
        }
    }
}

#[cfg(test)]
pub(crate) fn gradient(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| Rgba([x as u8, y as u8, 0, 255]))
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

    #[test]
    fn original_is_not_cropped() {
        let surface = Surface::original(gradient(8, 4));
        assert!(!surface.is_cropped());
        assert_eq!((surface.width(), surface.height()), (8, 4));
    }

    #[test]
    fn crop_copies_exact_region() {
        let surface = Surface::original(gradient(40, 30));
        let cropped = surface.crop(PixelRect {
            x: 10,
            y: 5,
            width: 15,
            height: 20,
        });

        assert!(cropped.is_cropped());
        assert_eq!((cropped.width(), cropped.height()), (15, 20));
        assert_eq!(cropped.pixels().get_pixel(0, 0), &Rgba([10, 5, 0, 255]));
        assert_eq!(cropped.pixels().get_pixel(14, 19), &Rgba([24, 24, 0, 255]));
        // the source is left untouched
        assert_eq!((surface.width(), surface.height()), (40, 30));
    }

    #[test]
    fn stroke_rect_draws_outline_only() {
        let mut surface = Surface::original(RgbaImage::new(10, 10));
        surface.stroke_rect(2, 2, 4, 4, RED);

        let pixels = surface.pixels();
        assert_eq!(pixels.get_pixel(2, 2), &RED);
        assert_eq!(pixels.get_pixel(5, 5), &RED);
        assert_eq!(pixels.get_pixel(5, 2), &RED);
        assert_eq!(pixels.get_pixel(3, 3), &Rgba([0, 0, 0, 0]));
        assert_eq!(surface.revision(), 1);
    }

    #[test]
    fn stroke_rect_is_clipped_to_bounds() {
        let mut surface = Surface::original(RgbaImage::new(10, 10));
        surface.stroke_rect(6, -3, 100, 100, RED);

        let pixels = surface.pixels();
        assert_eq!(pixels.get_pixel(6, 0), &RED);
        assert_eq!(pixels.get_pixel(6, 9), &RED);
        assert_eq!(pixels.get_pixel(9, 5), &Rgba([0, 0, 0, 0]));
    }
}
