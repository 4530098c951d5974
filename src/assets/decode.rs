use std::path::Path;

use anyhow::Context;

use crate::foundation::core::Argb;
use crate::foundation::error::{PixError, PixResult};
use crate::pixmap::{PixelFormat, Pixmap};

/// Decode an encoded image (PNG, JPEG, GIF, BMP, WebP) into an ARGB pixmap.
pub fn decode_image(bytes: &[u8]) -> PixResult<Pixmap> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(pixmap_from_rgba8(&dyn_img.to_rgba8()))
}

/// Read and decode the image file at `path`.
pub fn load_image(path: impl AsRef<Path>) -> PixResult<Pixmap> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let dyn_img = image::load_from_memory(&bytes)
        .with_context(|| format!("decode image '{}'", path.display()))?;
    Ok(pixmap_from_rgba8(&dyn_img.to_rgba8()))
}

/// Convert straight-alpha RGBA8 pixels into an ARGB pixmap.
pub fn pixmap_from_rgba8(img: &image::RgbaImage) -> Pixmap {
    let (width, height) = img.dimensions();
    let mut pm = Pixmap::new(PixelFormat::Argb, width as usize, height as usize);
    for (px, dst) in img.pixels().zip(pm.bytes_mut().chunks_exact_mut(4)) {
        let [r, g, b, a] = px.0;
        dst.copy_from_slice(&Argb::new(a, r, g, b).to_bytes());
    }
    pm
}

/// Convert a color pixmap into straight-alpha RGBA8. `Rgb` pixmaps come out opaque.
pub fn pixmap_to_rgba8<B: AsRef<[u8]>>(pm: &Pixmap<B>) -> PixResult<image::RgbaImage> {
    if !pm.format().is_color() {
        return Err(PixError::format(format!(
            "cannot export a {:?} pixmap as RGBA",
            pm.format()
        )));
    }
    let mut raw = Vec::with_capacity(pm.width() * pm.height() * 4);
    for y in 0..pm.height() {
        for x in 0..pm.width() {
            let px = pm.at(x, y);
            raw.extend_from_slice(&[px.r, px.g, px.b, px.a]);
        }
    }
    image::RgbaImage::from_raw(pm.width() as u32, pm.height() as u32, raw)
        .ok_or_else(|| PixError::format("pixmap dimensions overflow an RGBA image"))
}

/// Encode a color pixmap as PNG at `path`.
pub fn save_png<B: AsRef<[u8]>>(pm: &Pixmap<B>, path: impl AsRef<Path>) -> PixResult<()> {
    let path = path.as_ref();
    let rgba = pixmap_to_rgba8(pm)?;
    image::save_buffer_with_format(
        path,
        rgba.as_raw(),
        rgba.width(),
        rgba.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
