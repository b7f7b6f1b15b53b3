#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

mod app;
mod config;
mod constant;
mod controller;
mod geometry;
mod ingest;
mod overlay;
mod surface;
mod view;

use anyhow::Result;
use clap::Parser;
use eframe::egui;

use crate::app::PasteCropper;
use crate::config::{Args, CropperConfig};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = CropperConfig::from_args(&args);

    let surfaces = args
        .files
        .iter()
        .filter_map(|path| match ingest::open_path(path) {
            Ok(surface) => Some(surface),
            Err(e) => {
                log::warn!("{e:#}");
                None
            }
        })
        .collect();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size(config.window_size),
        ..Default::default()
    };
    eframe::run_native(
        "Paste Cropper",
        options,
        Box::new(move |cc| Ok(Box::new(PasteCropper::new(cc, config, surfaces)))),
    )
    .map_err(|e| anyhow::anyhow!("failed to run window: {e}"))
}
