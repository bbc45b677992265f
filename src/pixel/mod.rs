//! # Normalized Images
//!
//! Every image that enters pixelbake is normalized into one shape before it
//! is encoded or blitted:
//!
//! - exactly 3 bytes per pixel, 8 bits per channel
//! - channels interleaved in a declared [`ChannelOrder`]
//! - rows packed top-to-bottom with no padding (stride = `width * 3`)
//! - no alpha channel
//!
//! ```text
//! BGR888, 2x2 image:
//!
//!   byte:  0  1  2  3  4  5  6  7  8  9 10 11
//!          B  G  R  B  G  R  B  G  R  B  G  R
//!          └─(0,0)─┘└─(1,0)─┘└─(0,1)─┘└─(1,1)─┘
//! ```
//!
//! Decoding from files lives in [`source`].

pub mod source;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PixelbakeError, Result};

/// Bytes per stored pixel.
pub const BYTES_PER_PIXEL: usize = 3;

/// Order in which the three color channels are stored per pixel.
///
/// The destination frame buffer must use the same order as the table it is
/// blitted from; no conversion happens at blit time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelOrder {
    /// Red, green, blue
    Rgb,
    /// Blue, green, red (the native order of most ESP32 LCD panels)
    #[default]
    Bgr,
}

impl ChannelOrder {
    /// Lowercase name (`"rgb"` / `"bgr"`).
    pub fn name(self) -> &'static str {
        match self {
            ChannelOrder::Rgb => "rgb",
            ChannelOrder::Bgr => "bgr",
        }
    }

    /// Format tag used in generated identifiers (`"rgb888"` / `"bgr888"`).
    pub fn format_tag(self) -> &'static str {
        match self {
            ChannelOrder::Rgb => "rgb888",
            ChannelOrder::Bgr => "bgr888",
        }
    }

    /// Single-letter channel names in storage order.
    pub fn channel_names(self) -> [char; 3] {
        match self {
            ChannelOrder::Rgb => ['r', 'g', 'b'],
            ChannelOrder::Bgr => ['b', 'g', 'r'],
        }
    }

    /// Reorder an `[r, g, b]` triple into this order.
    ///
    /// The reorder is its own inverse, so the same call converts back.
    #[inline]
    pub fn arrange(self, [r, g, b]: [u8; 3]) -> [u8; 3] {
        match self {
            ChannelOrder::Rgb => [r, g, b],
            ChannelOrder::Bgr => [b, g, r],
        }
    }

    /// Reorder a triple stored in this order back into `[r, g, b]`.
    #[inline]
    pub fn to_rgb(self, px: [u8; 3]) -> [u8; 3] {
        self.arrange(px)
    }
}

impl fmt::Display for ChannelOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ChannelOrder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rgb" | "rgb888" => Ok(ChannelOrder::Rgb),
            "bgr" | "bgr888" => Ok(ChannelOrder::Bgr),
            other => Err(format!("unknown channel order '{}' (expected rgb or bgr)", other)),
        }
    }
}

/// An immutable, normalized image.
///
/// Invariant: `data.len() == width * height * 3` and both dimensions are
/// non-zero. Construction is the only place this is checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    order: ChannelOrder,
    data: Vec<u8>,
}

impl Image {
    /// Build an image from packed pixel bytes already in `order`.
    pub fn from_raw(width: u32, height: u32, order: ChannelOrder, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(PixelbakeError::InvalidImage(format!(
                "image has zero dimension ({}x{})",
                width, height
            )));
        }

        let expected = packed_len(width, height)?;
        if data.len() != expected {
            return Err(PixelbakeError::InvalidTable(format!(
                "{}x{} image needs {} bytes, got {}",
                width,
                height,
                expected,
                data.len()
            )));
        }

        Ok(Self {
            width,
            height,
            order,
            data,
        })
    }

    /// Build an image by calling `f(x, y)` for every pixel.
    ///
    /// `f` returns channels already in `order`.
    pub fn from_fn<F>(width: u32, height: u32, order: ChannelOrder, mut f: F) -> Result<Self>
    where
        F: FnMut(u32, u32) -> [u8; 3],
    {
        let mut data = Vec::with_capacity(packed_len(width, height)?);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&f(x, y));
            }
        }
        Self::from_raw(width, height, order, data)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channel_order(&self) -> ChannelOrder {
        self.order
    }

    /// Bytes between the start of consecutive rows.
    pub fn stride(&self) -> usize {
        self.width as usize * BYTES_PER_PIXEL
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Packed pixel bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// One row of packed pixel bytes. Panics if `y >= height`.
    pub fn row(&self, y: u32) -> &[u8] {
        let start = y as usize * self.stride();
        &self.data[start..start + self.stride()]
    }

    /// Pixel at `(x, y)` in storage order, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        Some([self.data[i], self.data[i + 1], self.data[i + 2]])
    }

    /// Same pixels, re-interleaved into another channel order.
    pub fn into_channel_order(mut self, order: ChannelOrder) -> Image {
        if order != self.order {
            for px in self.data.chunks_exact_mut(BYTES_PER_PIXEL) {
                px.swap(0, 2);
            }
            self.order = order;
        }
        self
    }
}

fn packed_len(width: u32, height: u32) -> Result<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(BYTES_PER_PIXEL))
        .ok_or_else(|| {
            PixelbakeError::InvalidImage(format!("image too large ({}x{})", width, height))
        })
}

// ============================================================================
// TESTS
// ============================================================================
