//! # Blit Preview
//!
//! Runs one of the reference blit operations into an in-memory frame buffer
//! and hands the result back as an RGB image, so the output of a generated
//! routine can be inspected on the host before flashing.
//!
//! ```text
//! Image ──► canvas (clear color, image channel order) ──► blit ──► RgbImage
//! ```
//!
//! ## Example
//!
//! ```
//! use pixelbake::pixel::{ChannelOrder, Image};
//! use pixelbake::preview::{PreviewMode, PreviewOptions, render_preview};
//!
//! let logo = Image::from_fn(2, 2, ChannelOrder::Bgr, |_, _| [0, 0, 255])?;
//! let opts = PreviewOptions {
//!     width: 8,
//!     height: 8,
//!     mode: PreviewMode::Scaled(2),
//!     ..PreviewOptions::default()
//! };
//! let png = render_preview(&logo, &opts);
//!
//! // BGR [0, 0, 255] is red; the 4x4 block is centered at (2, 2).
//! assert_eq!(png.get_pixel(2, 2).0, [255, 0, 0]);
//! assert_eq!(png.get_pixel(0, 0).0, [0, 0, 0]);
//! # Ok::<(), pixelbake::PixelbakeError>(())
//! ```

use image::RgbImage;

use crate::blit::{self, BlendParams, Destination};
use crate::pixel::{BYTES_PER_PIXEL, Image};

/// Default canvas edge, the size of the boot display.
pub const DEFAULT_CANVAS: u32 = 720;

/// Which reference operation draws the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewMode {
    Copy,
    Scaled(u32),
    Blend(BlendParams),
}

impl PreviewMode {
    /// Effective upscale factor, used for centering.
    pub fn scale(&self) -> u32 {
        match self {
            PreviewMode::Copy => 1,
            PreviewMode::Scaled(s) => *s,
            PreviewMode::Blend(p) => p.scale.max(1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewOptions {
    pub width: u32,
    pub height: u32,
    /// Top-left corner of the placed image; centered when `None`
    pub origin: Option<(i32, i32)>,
    pub mode: PreviewMode,
    /// Canvas fill as `[r, g, b]`
    pub clear: [u8; 3],
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS,
            height: DEFAULT_CANVAS,
            origin: None,
            mode: PreviewMode::Copy,
            clear: [0, 0, 0],
        }
    }
}

impl PreviewOptions {
    /// The origin that will be used for `image`.
    pub fn resolve_origin(&self, image: &Image) -> (i32, i32) {
        if let Some(origin) = self.origin {
            return origin;
        }
        let scale = i64::from(self.mode.scale());
        let center = |canvas: u32, size: u32| {
            let offset = (i64::from(canvas) - i64::from(size) * scale) / 2;
            offset.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
        };
        (center(self.width, image.width()), center(self.height, image.height()))
    }
}

/// Draw `image` on a fresh canvas and return the canvas as RGB.
pub fn render_preview(image: &Image, opts: &PreviewOptions) -> RgbImage {
    let order = image.channel_order();
    let clear = order.arrange(opts.clear);

    let mut canvas: Vec<u8> = clear
        .iter()
        .copied()
        .cycle()
        .take(opts.width as usize * opts.height as usize * BYTES_PER_PIXEL)
        .collect();

    let (x, y) = opts.resolve_origin(image);
    let width = i32::try_from(opts.width).unwrap_or(i32::MAX);
    let height = i32::try_from(opts.height).unwrap_or(i32::MAX);
    let mut dst = Destination::packed(&mut canvas, width, height);

    let written = match opts.mode {
        PreviewMode::Copy => blit::blit_copy(image, &mut dst, x, y),
        PreviewMode::Scaled(scale) => blit::blit_copy_scaled(image, &mut dst, x, y, scale),
        PreviewMode::Blend(params) => blit::blit_blend(image, &mut dst, x, y, params),
    };
    log::debug!(
        "Preview {:?} at ({}, {}) wrote {} pixels on {}x{}",
        opts.mode,
        x,
        y,
        written,
        opts.width,
        opts.height
    );

    for px in canvas.chunks_exact_mut(BYTES_PER_PIXEL) {
        let rgb = order.to_rgb([px[0], px[1], px[2]]);
        px.copy_from_slice(&rgb);
    }

    // Length is width * height * 3 by construction.
    RgbImage::from_raw(opts.width, opts.height, canvas).unwrap_or_else(|| RgbImage::new(opts.width, opts.height))
}
