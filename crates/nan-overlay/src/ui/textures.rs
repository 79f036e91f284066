use crate::{AppError, AppResult};

use std::panic::Location;

use eframe::egui;
use error_location::ErrorLocation;

/// Decode an embedded PNG and upload it as an egui texture.
#[track_caller]
pub(crate) fn load_texture(
    ctx: &egui::Context,
    name: &str,
    png: &[u8],
) -> AppResult<egui::TextureHandle> {
    let img = image::load_from_memory(png).map_err(|e| AppError::ResourceError {
        reason: format!("Failed to decode {}: {}", name, e),
        location: ErrorLocation::from(Location::caller()),
    })?;

    let rgba = img.into_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    let color_image = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());

    Ok(ctx.load_texture(name, color_image, egui::TextureOptions::LINEAR))
}
