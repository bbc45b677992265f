//! Alpha compositing over a solid background, optionally scaled.
//!
//! The destination is never read: each written pixel is the source blended
//! with the background color, so the result is always fully opaque.
//!
//! ## Alpha Paths
//!
//! | Alpha | Output | Source read? |
//! |-------|--------|--------------|
//! | 0 | background | no |
//! | 255 | source, verbatim | yes |
//! | 1..=254 | `(src*a + bg*(255-a) + 127) / 255` | yes |
//!
//! The middle path rounds half up with integer math only. Full opacity
//! skips the arithmetic so it is bit-identical to a plain copy.

use super::clip;
use super::scaled::for_each_mapped;
use super::{Destination, PixelSource};
use crate::pixel::BYTES_PER_PIXEL;

/// Parameters of [`blit_blend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlendParams {
    /// Opacity, 0 = background only, 255 = source only
    pub alpha: u8,
    /// Background color in the destination's channel order
    pub background: [u8; 3],
    /// 0 or 1 = unscaled, 2..=16 = integer upscale
    pub scale: u32,
}

impl BlendParams {
    pub fn new(alpha: u8, background: [u8; 3]) -> Self {
        Self {
            alpha,
            background,
            scale: 1,
        }
    }

    /// Fully opaque, no scaling.
    pub fn opaque() -> Self {
        Self::new(u8::MAX, [0, 0, 0])
    }

    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale;
        self
    }
}

impl Default for BlendParams {
    fn default() -> Self {
        Self::opaque()
    }
}

/// Blend one channel: `(src*alpha + bg*(255-alpha) + 127) / 255`.
///
/// ```
/// use pixelbake::blit::blend_channel;
///
/// assert_eq!(blend_channel(200, 0, 128), 100);
/// assert_eq!(blend_channel(100, 0, 128), 50);
/// assert_eq!(blend_channel(50, 0, 128), 25);
/// assert_eq!(blend_channel(255, 255, 77), 255);
/// ```
#[inline]
pub fn blend_channel(src: u8, bg: u8, alpha: u8) -> u8 {
    let a = u32::from(alpha);
    let n = u32::from(src) * a + u32::from(bg) * (255 - a);
    // Max is 255*255 + 127, so the quotient always fits
    ((n + 127) / 255) as u8
}

/// Composite `src` over `params.background` into `dst`, top-left at `(x, y)`.
///
/// Clipping and source mapping are the same as [`super::blit_copy_scaled`]
/// with `params.scale`. Returns the number of pixels written.
pub fn blit_blend<S>(src: &S, dst: &mut Destination<'_>, x: i32, y: i32, params: BlendParams) -> usize
where
    S: PixelSource + ?Sized,
{
    let Some(window) = clip::scaled(
        src.width(),
        src.height(),
        params.scale,
        dst.width(),
        dst.height(),
        x,
        y,
    ) else {
        return 0;
    };

    let bg = params.background;

    match params.alpha {
        0 => {
            let mut written = 0;
            for dy in window.y0..window.y1 {
                let Some(row) = dst.span_mut(dy, window.x0, window.width()) else {
                    break;
                };
                for out in row.chunks_exact_mut(BYTES_PER_PIXEL) {
                    out.copy_from_slice(&bg);
                }
                written += window.width();
            }
            written
        }
        u8::MAX => for_each_mapped(src, dst, &window, |px, out| out.copy_from_slice(px)),
        alpha => for_each_mapped(src, dst, &window, |px, out| {
            out[0] = blend_channel(px[0], bg[0], alpha);
            out[1] = blend_channel(px[1], bg[1], alpha);
            out[2] = blend_channel(px[2], bg[2], alpha);
        }),
    }
}
