//! # Pixel Source Adapter
//!
//! Turns an externally decoded picture into a normalized [`Image`].
//!
//! Decoding is delegated to the `image` crate, so any format it enables
//! (PNG, GIF, JPEG, BMP, ...) is accepted. With the `heif` feature, HEIC/HEIF
//! files are decoded through libheif.
//!
//! Whatever the source color mode, the result is 8-bit, 3-channel, in the
//! requested [`ChannelOrder`]. Alpha is dropped, never pre-multiplied:
//! transparency is a blit-time concern handled by `blit_blend`.

use std::path::Path;

use image::DynamicImage;

use super::{ChannelOrder, Image};
use crate::error::{PixelbakeError, Result};

/// Normalize an already-decoded image.
pub fn from_dynamic(img: &DynamicImage, order: ChannelOrder) -> Result<Image> {
    let (width, height) = (img.width(), img.height());
    if width == 0 || height == 0 {
        return Err(PixelbakeError::InvalidImage(format!(
            "image has zero dimension ({}x{})",
            width, height
        )));
    }

    let rgb = Image::from_raw(width, height, ChannelOrder::Rgb, img.to_rgb8().into_raw())?;

    log::info!(
        "Normalized {}x{} {:?} -> {}",
        width,
        height,
        img.color(),
        order.format_tag().to_uppercase()
    );

    Ok(rgb.into_channel_order(order))
}

/// Decode an encoded image held in memory.
pub fn load_from_memory(bytes: &[u8], order: ChannelOrder) -> Result<Image> {
    let img = decode_bytes(bytes, false)?;
    from_dynamic(&img, order)
}

/// Decode an image file.
pub fn open(path: &Path, order: ChannelOrder) -> Result<Image> {
    if !path.is_file() {
        return Err(PixelbakeError::InvalidImage(format!(
            "input file '{}' not found",
            path.display()
        )));
    }

    let bytes = std::fs::read(path).map_err(|e| {
        PixelbakeError::InvalidImage(format!("could not read '{}': {}", path.display(), e))
    })?;

    let heif_ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("heic") || e.eq_ignore_ascii_case("heif"))
        .unwrap_or(false);

    let img = decode_bytes(&bytes, heif_ext).map_err(|e| match e {
        PixelbakeError::InvalidImage(msg) => PixelbakeError::InvalidImage(format!(
            "could not open image '{}': {}",
            path.display(),
            msg
        )),
        other => other,
    })?;

    from_dynamic(&img, order)
}

fn decode_bytes(bytes: &[u8], heif_hint: bool) -> Result<DynamicImage> {
    if heif_hint || is_heic(bytes) {
        return decode_heic(bytes);
    }

    image::load_from_memory(bytes)
        .map_err(|e| PixelbakeError::InvalidImage(format!("failed to decode image: {}", e)))
}

/// Check for an ISO-BMFF `ftyp` box with a HEIF-family brand.
fn is_heic(data: &[u8]) -> bool {
    if data.len() < 12 {
        return false;
    }

    // Box size (4 bytes) then "ftyp", then the major brand
    if &data[4..8] != b"ftyp" {
        return false;
    }

    matches!(
        &data[8..12],
        b"heic" | b"heix" | b"hevc" | b"hevx" | b"heim" | b"heis" | b"hevm" | b"hevs" | b"mif1" | b"msf1"
    )
}

#[cfg(feature = "heif")]
fn decode_heic(data: &[u8]) -> Result<DynamicImage> {
    use image::RgbImage;
    use libheif_rs::{ColorSpace, HeifContext, LibHeif, RgbChroma};

    let heif_err = |what: &str, e: libheif_rs::HeifError| {
        PixelbakeError::InvalidImage(format!("{}: {}", what, e))
    };

    let lib_heif = LibHeif::new();
    let ctx = HeifContext::read_from_bytes(data).map_err(|e| heif_err("failed to read HEIC", e))?;
    let handle = ctx
        .primary_image_handle()
        .map_err(|e| heif_err("failed to get primary image", e))?;
    let image = lib_heif
        .decode(&handle, ColorSpace::Rgb(RgbChroma::Rgb), None)
        .map_err(|e| heif_err("failed to decode HEIC image", e))?;

    let planes = image.planes();
    let interleaved = planes
        .interleaved
        .ok_or_else(|| PixelbakeError::InvalidImage("no interleaved RGB data in HEIC".into()))?;

    let width = image.width();
    let height = image.height();
    let stride = interleaved.stride;
    let src = interleaved.data;

    let row_bytes = width as usize * 3;
    let mut packed = Vec::with_capacity(row_bytes * height as usize);
    for y in 0..height as usize {
        let start = y * stride;
        let row = src.get(start..start + row_bytes).ok_or_else(|| {
            PixelbakeError::InvalidImage("HEIC plane shorter than its dimensions".into())
        })?;
        packed.extend_from_slice(row);
    }

    RgbImage::from_raw(width, height, packed)
        .map(DynamicImage::ImageRgb8)
        .ok_or_else(|| PixelbakeError::InvalidImage("HEIC dimensions do not match data".into()))
}

#[cfg(not(feature = "heif"))]
fn decode_heic(_data: &[u8]) -> Result<DynamicImage> {
    Err(PixelbakeError::InvalidImage(
        "HEIC/HEIF input requires the `heif` feature".into(),
    ))
}

// ============================================================================
// TESTS
// ============================================================================
