use std::collections::HashMap;

use eframe::egui;

use crate::config::CropperConfig;
use crate::controller::{CropRow, RowId};
use crate::ingest;
use crate::surface::Surface;
use crate::view::{self, RowAction, RowTexture};

pub struct PasteCropper {
    config: CropperConfig,
    rows: Vec<CropRow>,
    textures: HashMap<RowId, Option<RowTexture>>,
    next_id: RowId,
}

impl PasteCropper {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: CropperConfig,
        surfaces: Vec<Surface>,
    ) -> Self {
        Self::with_surfaces(config, surfaces)
    }

    fn with_surfaces(config: CropperConfig, surfaces: Vec<Surface>) -> Self {
        let mut app = Self {
            config,
            rows: Vec::new(),
            textures: HashMap::new(),
            next_id: 0,
        };
        for surface in surfaces {
            app.push_surface(surface);
        }
        app
    }

    /// Add a surface as a new row at the bottom of the list.
    fn push_surface(&mut self, surface: Surface) {
        if surface.width() == 0 || surface.height() == 0 {
            log::warn!("skipping empty image");
            return;
        }
        let id = self.next_id;
        self.next_id += 1;
        log::info!("added image {}x{} as row {id}", surface.width(), surface.height());
        self.rows.push(CropRow::attach(id, surface, &self.config));
    }

    fn remove_row(&mut self, id: RowId) {
        self.rows.retain(|row| row.id() != id);
        self.textures.remove(&id);
    }

    fn paste_from_clipboard(&mut self) {
        let items = match ingest::read_clipboard() {
            Ok(items) => items,
            Err(e) => {
                log::warn!("{e:#}");
                return;
            }
        };
        let skipped = items.iter().filter(|item| !item.is_image()).count();
        let surfaces = ingest::surfaces_from_clipboard(items);
        log::debug!(
            "clipboard: {} image(s), {skipped} other item(s) ignored",
            surfaces.len()
        );
        for surface in surfaces {
            self.push_surface(surface);
        }
    }

    fn ingest_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped_files = ctx.input(|i| i.raw.dropped_files.clone());
        for file in &dropped_files {
            match ingest::decode_dropped(file) {
                Ok(Some(surface)) => self.push_surface(surface),
                Ok(None) => log::debug!("ignoring dropped non-image {:?}", file.name),
                Err(e) => log::warn!("{e:#}"),
            }
        }
    }

    fn open_with_dialog(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Image", &["png", "jpg", "jpeg", "bmp"])
            .pick_file()
        {
            match ingest::open_path(&path) {
                Ok(surface) => self.push_surface(surface),
                Err(e) => log::warn!("{e:#}"),
            }
        }
    }
}

/// Ctrl/Cmd+V was released this frame.
///
/// egui-winit swallows the paste key press and only turns it into
/// `Event::Paste` when the clipboard holds text, so an image-only clipboard
/// produces nothing on press. The release always comes through as a key event.
fn paste_requested(events: &[egui::Event]) -> bool {
    events.iter().any(|event| {
        matches!(
            event,
            egui::Event::Key {
                key: egui::Key::V,
                pressed: false,
                modifiers,
                ..
            } if modifiers.command
        )
    })
}

impl eframe::App for PasteCropper {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ingest_dropped_files(ctx);
        if ctx.input(|i| paste_requested(&i.events)) {
            self.paste_from_clipboard();
        }

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Paste").clicked() {
                    self.paste_from_clipboard();
                }
                if ui.button("Open Image").clicked() {
                    self.open_with_dialog();
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.rows.is_empty() {
                ui.centered_and_justified(|ui| {
                    ui.label("Paste an image (Ctrl+V or the Paste button) or drop one here");
                });
                return;
            }

            let mut removed = Vec::new();
            egui::ScrollArea::vertical().show(ui, |ui| {
                for row in &mut self.rows {
                    let texture = self.textures.entry(row.id()).or_default();
                    if view::show_row(ui, row, texture) == RowAction::Remove {
                        removed.push(row.id());
                    }
                    ui.separator();
                }
            });
            for id in removed {
                self.remove_row(id);
            }
        });
    }
}
