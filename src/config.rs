use std::path::PathBuf;

use clap::Parser;
use eframe::egui::Color32;

use crate::constant::{GRID_UNIT, LABEL_OFFSET, PLACEHOLDER_SIZE};

#[derive(Parser, Debug)]
#[command(name = "paste-cropper", version, about = "Paste an image and crop it in place")]
pub struct Args {
    /// Images to load at startup.
    pub files: Vec<PathBuf>,

    /// Grid unit, in pixels, that selection sizes snap to.
    #[arg(long, default_value_t = GRID_UNIT, value_parser = clap::value_parser!(u32).range(1..))]
    pub grid: u32,

    /// Initial window width.
    #[arg(long, default_value_t = 800.0)]
    pub width: f32,

    /// Initial window height.
    #[arg(long, default_value_t = 600.0)]
    pub height: f32,
}

/// Colors and sizes used to draw the selection hint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HintStyle {
    pub stroke: Color32,
    pub label_outline: Color32,
    pub label_fill: Color32,
    pub label_size: f32,
    pub label_offset: (i32, i32),
}

impl Default for HintStyle {
    fn default() -> Self {
        Self {
            stroke: Color32::RED,
            label_outline: Color32::WHITE,
            label_fill: Color32::BLACK,
            label_size: 22.0,
            label_offset: LABEL_OFFSET,
        }
    }
}

/// Settings shared by every row.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CropperConfig {
    pub grid_unit: u32,
    pub hint: HintStyle,
    pub placeholder_size: u32,
    pub window_size: [f32; 2],
}

impl Default for CropperConfig {
    fn default() -> Self {
        Self {
            grid_unit: GRID_UNIT,
            hint: HintStyle::default(),
            placeholder_size: PLACEHOLDER_SIZE,
            window_size: [800.0, 600.0],
        }
    }
}

impl CropperConfig {
    pub fn from_args(args: &Args) -> Self {
        Self {
            grid_unit: args.grid,
            window_size: [args.width, args.height],
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_hint_rendering() {
        let config = CropperConfig::default();
        assert_eq!(config.grid_unit, 5);
        assert_eq!(config.hint.stroke, Color32::RED);
        assert_eq!(config.hint.label_offset, (5, 15));
        assert_eq!(config.placeholder_size, 100);
    }

    #[test]
    fn args_override_grid_and_window() {
        let args = Args::parse_from(["paste-cropper", "--grid", "10", "--width", "1024", "a.png"]);
        let config = CropperConfig::from_args(&args);
        assert_eq!(config.grid_unit, 10);
        assert_eq!(config.window_size, [1024.0, 600.0]);
        assert_eq!(args.files, vec![PathBuf::from("a.png")]);
    }

    #[test]
    fn zero_grid_is_rejected() {
        assert!(Args::try_parse_from(["paste-cropper", "--grid", "0"]).is_err());
    }
}
