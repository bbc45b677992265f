//! # Encoding Layer
//!
//! Serializes a normalized [`Image`] into the constant table that gets baked
//! into firmware.
//!
//! ## Table Layout
//!
//! | Property | Value |
//! |----------|-------|
//! | Length | `width * height * 3` bytes |
//! | Order | row-major, top-to-bottom, left-to-right |
//! | Pixel | 3 interleaved channels in the declared [`ChannelOrder`] |
//! | Row padding | none (stride is always `width * 3`) |
//! | Compression | none |
//!
//! The table's stride is unrelated to the destination stride used at blit
//! time; the blit routines translate between the two.
//!
//! ```
//! use pixelbake::encode;
//! use pixelbake::pixel::{ChannelOrder, Image};
//!
//! let img = Image::from_raw(2, 1, ChannelOrder::Bgr, vec![1, 2, 3, 4, 5, 6])?;
//! let table = encode::encode(&img);
//! assert_eq!(table.len(), 6);
//! assert_eq!(encode::format_rows(table.as_bytes(), 4), "    0x01, 0x02, 0x03, 0x04,\n    0x05, 0x06,");
//! assert_eq!(table.decode()?, img);
//! # Ok::<(), pixelbake::PixelbakeError>(())
//! ```

pub mod parse;

use crate::blit::PixelSource;
use crate::error::Result;
use crate::pixel::{BYTES_PER_PIXEL, ChannelOrder, Image};

/// Bytes per line in emitted table initializers.
pub const DEFAULT_BYTES_PER_LINE: usize = 16;

/// The encoded pixel table plus the metadata needed to interpret it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelTable {
    width: u32,
    height: u32,
    order: ChannelOrder,
    bytes: Vec<u8>,
}

/// Encode an image into its table. Total and deterministic.
pub fn encode(image: &Image) -> PixelTable {
    PixelTable {
        width: image.width(),
        height: image.height(),
        order: image.channel_order(),
        bytes: image.as_bytes().to_vec(),
    }
}

impl PixelTable {
    /// Rebuild a table from raw bytes, validating the length.
    pub fn from_raw(width: u32, height: u32, order: ChannelOrder, bytes: Vec<u8>) -> Result<Self> {
        // Image::from_raw owns the dimension and length checks
        let image = Image::from_raw(width, height, order, bytes)?;
        Ok(encode_owned(image))
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

    /// Table stride in bytes (`width * 3`).
    pub fn stride(&self) -> usize {
        self.width as usize * BYTES_PER_PIXEL
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Decode the table back into an image. Lossless.
    pub fn decode(&self) -> Result<Image> {
        Image::from_raw(self.width, self.height, self.order, self.bytes.clone())
    }
}

fn encode_owned(image: Image) -> PixelTable {
    let (width, height, order) = (image.width(), image.height(), image.channel_order());
    PixelTable {
        width,
        height,
        order,
        bytes: image.into_bytes(),
    }
}

impl PixelSource for PixelTable {
    fn width(&self) -> usize {
        self.width as usize
    }

    fn height(&self) -> usize {
        self.height as usize
    }

    fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Format bytes as C initializer lines.
///
/// Each line holds up to `bytes_per_line` values as `0xNN`, is indented by
/// four spaces, and ends with a comma. Lines are joined with `\n` and there
/// is no trailing newline. A `bytes_per_line` of 0 is treated as 1.
pub fn format_rows(bytes: &[u8], bytes_per_line: usize) -> String {
    let per_line = bytes_per_line.max(1);
    let mut out = String::with_capacity(bytes.len() * 6 + 8);

    for (i, chunk) in bytes.chunks(per_line).enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str("    ");
        for (j, b) in chunk.iter().enumerate() {
            if j > 0 {
                out.push(' ');
            }
            out.push_str(&format!("0x{:02x},", b));
        }
    }

    out
}

// ============================================================================
// TESTS
// ============================================================================
