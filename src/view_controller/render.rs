use crate::image_source::blob_store::BlobStore;
use crate::image_source::preview::PreviewImage;
use crate::library::logger::interface::Logger;
use crate::view_controller::core::Event;
use crate::view_controller::view::{
    FormView, PreviewView, ResultRow, View, BEST_GUESS, CLASSIFY_BUTTON, HEADER, UPLOAD_BUTTON,
    URL_PLACEHOLDER,
};
use image::DynamicImage;
use std::borrow::Cow;
use std::path::Path;
use std::sync::Arc;

pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp", "tif", "tiff"];

const MAX_PREVIEW_SIZE: f32 = 420.0;

/// Draws a [`View`] with egui and turns widget interactions into events.
pub struct Render {
    blob_store: Arc<BlobStore>,
    logger: Arc<dyn Logger + Send + Sync>,
    texture: Option<(u64, egui::TextureHandle)>,
}

impl Render {
    pub fn new(blob_store: Arc<BlobStore>, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            blob_store,
            logger: logger.with_namespace("render"),
            texture: None,
        }
    }

    pub fn render(&mut self, ctx: &egui::Context, view: &View) -> Vec<Event> {
        let mut events = vec![];

        if let View::Form(_) = view {
            events.extend(self.dropped_file(ctx));
        }

        egui::CentralPanel::default().show(ctx, |ui| match view {
            View::Loading { message } => {
                ui.vertical_centered(|ui| {
                    ui.add_space(40.0);
                    ui.heading(*message);
                });
            }
            View::Form(form) => self.render_form(ui, form, &mut events),
        });

        events
    }

    fn render_form(&mut self, ui: &mut egui::Ui, form: &FormView, events: &mut Vec<Event>) {
        ui.vertical_centered(|ui| {
            ui.heading(HEADER);
        });
        ui.separator();

        if let Some(notice) = &form.notice {
            ui.colored_label(egui::Color32::from_rgb(200, 70, 70), notice);
        }

        ui.horizontal(|ui| {
            if ui.button(UPLOAD_BUTTON).clicked() {
                events.push(self.pick_file());
            }

            ui.label("OR");

            let mut url = form.url_input.clone();
            let response = ui.add(
                egui::TextEdit::singleline(&mut url)
                    .hint_text(URL_PLACEHOLDER)
                    .desired_width(360.0),
            );
            if response.changed() {
                events.push(Event::UrlChanged(url));
            }
        });

        ui.add_space(12.0);

        ui.horizontal_top(|ui| {
            if let Some(preview) = &form.preview {
                ui.vertical(|ui| self.render_preview(ui, preview));
            }

            if !form.results.is_empty() {
                ui.vertical(|ui| render_results(ui, &form.results));
            }
        });

        if form.show_classify_button {
            ui.add_space(8.0);
            if ui.button(CLASSIFY_BUTTON).clicked() {
                events.push(Event::ClassifyClicked);
            }
        }
    }

    fn render_preview(&mut self, ui: &mut egui::Ui, preview: &PreviewView) {
        match preview {
            PreviewView::Loading => {
                ui.spinner();
            }
            PreviewView::Broken { alt, reason } => {
                ui.label(egui::RichText::new(*alt).italics());
                ui.small(reason);
            }
            PreviewView::Image(image) => {
                let texture = self.texture_for(ui.ctx(), image);
                ui.add(
                    egui::Image::new(egui::load::SizedTexture::from_handle(&texture))
                        .max_size(egui::vec2(MAX_PREVIEW_SIZE, MAX_PREVIEW_SIZE)),
                );
            }
        }
    }

    fn texture_for(&mut self, ctx: &egui::Context, preview: &PreviewImage) -> egui::TextureHandle {
        match &self.texture {
            Some((generation, handle)) if *generation == preview.generation => handle.clone(),
            _ => {
                let rgba = shrink_to_fit(&preview.image, preview_side(ctx)).to_rgba8();
                let size = [rgba.width() as usize, rgba.height() as usize];
                let color_image = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
                let handle = ctx.load_texture(
                    format!("preview-{}", preview.generation),
                    color_image,
                    egui::TextureOptions::LINEAR,
                );
                self.texture = Some((preview.generation, handle.clone()));
                handle
            }
        }
    }

    fn pick_file(&self) -> Event {
        let picked = rfd::FileDialog::new()
            .set_title(UPLOAD_BUTTON)
            .add_filter("Image", IMAGE_EXTENSIONS)
            .pick_file();

        match picked {
            Some(path) => Event::FileSelected(Some(self.blob_store.create(path))),
            None => {
                let _ = self.logger.info("File selection cancelled");
                Event::FileSelected(None)
            }
        }
    }

    fn dropped_file(&self, ctx: &egui::Context) -> Option<Event> {
        let path = ctx.input(|input| {
            input
                .raw
                .dropped_files
                .iter()
                .find_map(|file| file.path.clone())
        })?;

        if !is_image_path(&path) {
            let _ = self
                .logger
                .info(&format!("Ignoring dropped file {}", path.display()));
            return None;
        }

        Some(Event::FileSelected(Some(self.blob_store.create(path))))
    }
}

fn render_results(ui: &mut egui::Ui, rows: &[ResultRow]) {
    for row in rows {
        ui.horizontal(|ui| {
            ui.strong(&row.label);
            ui.label(&row.accuracy);
            if row.best_guess {
                ui.label(
                    egui::RichText::new(BEST_GUESS)
                        .strong()
                        .color(egui::Color32::from_rgb(40, 140, 60)),
                );
            }
        });
    }
}

/// Largest texture side worth uploading for a preview on this display.
fn preview_side(ctx: &egui::Context) -> u32 {
    let wanted = (MAX_PREVIEW_SIZE * ctx.pixels_per_point()).ceil() as usize;
    let max_texture_side = ctx.input(|input| input.max_texture_side);
    wanted.min(max_texture_side).max(1) as u32
}

fn shrink_to_fit(image: &DynamicImage, side: u32) -> Cow<'_, DynamicImage> {
    if image.width() <= side && image.height() <= side {
        Cow::Borrowed(image)
    } else {
        Cow::Owned(image.thumbnail(side, side))
    }
}

pub fn is_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(extension))
        })
}
