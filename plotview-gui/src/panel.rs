//! Embedded image panel
//!
//! Lists the generated plots; the selected one is shown in a scroll area
//! and can be zoomed with the slider or with ctrl + mouse wheel.

use eframe::egui;
use plotview::{image_io, PlotKind, Plotter};
use strum::IntoEnumIterator;

use crate::app::{describe, texture};

const ZOOM_RANGE: std::ops::RangeInclusive<f32> = 0.25..=4.0;

struct Entry {
    kind: PlotKind,
    texture: Result<egui::TextureHandle, String>,
}
impl Entry {
    fn load(ctx: &egui::Context, plotter: &Plotter, kind: PlotKind, max_size: u32) -> Self {
        let texture = image_io::load_scaled(plotter.path(kind), max_size)
            .map(|img| texture(ctx, &kind.to_string(), &img))
            .map_err(describe);
        Self { kind, texture }
    }
}

pub struct ImagePanel {
    entries: Vec<Entry>,
    selected: PlotKind,
    zoom: f32,
    max_size: u32,
}
impl Default for ImagePanel {
    fn default() -> Self {
        Self {
            entries: vec![],
            selected: PlotKind::Bessel,
            zoom: 1.0,
            max_size: plotview::MAX_IMAGE_SIZE,
        }
    }
}
impl ImagePanel {
    /// Renders all the plots and loads them
    pub fn new(ctx: &egui::Context, plotter: &Plotter, max_size: u32) -> Self {
        let entries = PlotKind::iter()
            .map(|kind| match plotter.render(kind) {
                Ok(_) => Entry::load(ctx, plotter, kind, max_size),
                Err(e) => {
                    log::error!("{}", e);
                    Entry {
                        kind,
                        texture: Err(describe(e)),
                    }
                }
            })
            .collect();
        Self {
            entries,
            max_size,
            ..Default::default()
        }
    }
    /// Reloads a plot from disk
    pub fn reload(&mut self, ctx: &egui::Context, plotter: &Plotter, kind: PlotKind) {
        let max_size = self.max_size;
        if let Some(entry) = self.entries.iter_mut().find(|e| e.kind == kind) {
            *entry = Entry::load(ctx, plotter, kind, max_size);
        }
    }
    /// Rendering or loading error of a plot
    pub fn error(&self, kind: PlotKind) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.kind == kind)
            .and_then(|e| e.texture.as_ref().err())
            .map(String::as_str)
    }
    pub fn select(&mut self, kind: PlotKind) {
        self.selected = kind;
    }
    pub fn selected_size(&self) -> Option<[usize; 2]> {
        self.entries
            .iter()
            .find(|e| e.kind == self.selected)
            .and_then(|e| e.texture.as_ref().ok())
            .map(|t| t.size())
    }
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.heading("Plots");
        ui.horizontal_wrapped(|ui| {
            for entry in &self.entries {
                ui.selectable_value(&mut self.selected, entry.kind, entry.kind.title());
            }
        });
        ui.add(egui::Slider::new(&mut self.zoom, ZOOM_RANGE).text("zoom"));
        ui.separator();

        let Some(entry) = self.entries.iter().find(|e| e.kind == self.selected) else {
            ui.label("no plot");
            return;
        };
        match &entry.texture {
            Ok(texture) => {
                let response = egui::ScrollArea::both()
                    .show(ui, |ui| {
                        ui.image(egui::load::SizedTexture::new(
                            texture.id(),
                            texture.size_vec2() * self.zoom,
                        ))
                    })
                    .inner;
                if response.hovered() {
                    let zoom_delta = ui.input(|i| i.zoom_delta());
                    if zoom_delta != 1.0 {
                        self.zoom = (self.zoom * zoom_delta)
                            .clamp(*ZOOM_RANGE.start(), *ZOOM_RANGE.end());
                    }
                }
            }
            Err(error) => {
                ui.colored_label(egui::Color32::RED, error);
            }
        }
    }
}
