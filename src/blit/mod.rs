//! # Blit Engine
//!
//! Reference implementation of the three routines that pixelbake emits as C.
//! The generated code and these functions implement the same arithmetic, so
//! everything the firmware does can be tested (and previewed) from Rust.
//!
//! | Operation | Scaling | Blending | Inner loop |
//! |-----------|---------|----------|------------|
//! | [`blit_copy`] | no | no | one `copy_from_slice` per row |
//! | [`blit_copy_scaled`] | nearest neighbor | no | per pixel |
//! | [`blit_blend`] | optional | alpha over solid background | per pixel |
//!
//! ## Coordinate System
//!
//! ```text
//!        x < 0 clips the left edge
//!          │
//!   (x,y) ─┼──────────────┐
//!          │ ░░░░┌────────┼──────────── destination (0,0)..(dst_w,dst_h)
//!          │ ░░░░│▓▓▓▓▓▓▓▓│
//!          │ ░░░░│▓▓▓▓▓▓▓▓│  ▓ = clipped window, the only bytes written
//!          └─────┼────────┘
//!                │
//! ```
//!
//! ## Guarantees
//!
//! - Every placement is valid. Off-screen placement writes nothing.
//! - Nothing outside `[0, dst_w) × [0, dst_h)` is ever written.
//! - No allocation; time is proportional to the clipped pixel count.
//!
//! Each function returns the number of destination pixels written.
//!
//! ## Precondition
//!
//! The destination stride must be at least `dst_w * 3`. This is not checked.
//! Rows that would fall past the end of the slice are skipped instead of
//! written, so a violated precondition shows up as missing rows rather than
//! memory corruption.

pub mod blend;
pub mod clip;
pub mod copy;
pub mod scaled;

pub use blend::{BlendParams, blend_channel, blit_blend};
pub use copy::blit_copy;
pub use scaled::blit_copy_scaled;

use crate::pixel::{BYTES_PER_PIXEL, Image};

/// Packed 3-byte-per-pixel source data.
///
/// Implementors must return `width * height * 3` bytes with no row padding.
pub trait PixelSource {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn bytes(&self) -> &[u8];
}

impl PixelSource for Image {
    fn width(&self) -> usize {
        Image::width(self) as usize
    }

    fn height(&self) -> usize {
        Image::height(self) as usize
    }

    fn bytes(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// A caller-owned destination frame buffer.
///
/// Sizes are `i32` to mirror the generated C signature; a non-positive width
/// or height simply makes every blit a no-op.
#[derive(Debug)]
pub struct Destination<'a> {
    buf: &'a mut [u8],
    width: i32,
    height: i32,
    stride: usize,
}

impl<'a> Destination<'a> {
    /// Wrap a buffer with an explicit row stride in bytes.
    pub fn new(buf: &'a mut [u8], width: i32, height: i32, stride: usize) -> Self {
        Self {
            buf,
            width,
            height,
            stride,
        }
    }

    /// Wrap a buffer whose rows are packed (stride = `width * 3`).
    pub fn packed(buf: &'a mut [u8], width: i32, height: i32) -> Self {
        let stride = width.max(0) as usize * BYTES_PER_PIXEL;
        Self::new(buf, width, height, stride)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..]
    }

    /// Mutable bytes of `count` pixels starting at `(col, row)`.
    ///
    /// `None` when the span does not fit inside the buffer slice.
    pub(crate) fn span_mut(&mut self, row: usize, col: usize, count: usize) -> Option<&mut [u8]> {
        let start = row
            .checked_mul(self.stride)?
            .checked_add(col.checked_mul(BYTES_PER_PIXEL)?)?;
        let end = start.checked_add(count.checked_mul(BYTES_PER_PIXEL)?)?;
        self.buf.get_mut(start..end)
    }
}
