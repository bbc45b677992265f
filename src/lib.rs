//! # pixelbake - Images as Freestanding C Blit Routines
//!
//! pixelbake turns an image file into a pair of C artifacts that embed the
//! pixels as a constant table and draw them into a 24-bit frame buffer,
//! without any runtime decoder or allocator. It provides:
//!
//! - **Normalization**: any decodable image to packed 8-bit RGB or BGR
//! - **Encoding**: a row-major byte table that round-trips losslessly
//! - **Blitting**: clipped copy, nearest-neighbor scaling, alpha blending
//! - **Emission**: `<name>.h` and `<name>.c` implementing the same blits
//!
//! ## Quick Start
//!
//! ```
//! use pixelbake::blit::{self, Destination};
//! use pixelbake::emit::{self, Operations};
//! use pixelbake::encode;
//! use pixelbake::pixel::{ChannelOrder, Image};
//!
//! let logo = Image::from_fn(4, 2, ChannelOrder::Bgr, |x, y| [x as u8, y as u8, 0xFF])?;
//!
//! // Reference blit into a host-side frame buffer
//! let mut fb = vec![0u8; 8 * 8 * 3];
//! let mut dst = Destination::packed(&mut fb, 8, 8);
//! assert_eq!(blit::blit_copy(&logo, &mut dst, 6, 0), 4);
//!
//! // The C rendition of the same routine
//! let table = encode::encode(&logo);
//! let artifacts = emit::emit("logo", &table, &Operations::default(), 16);
//! assert!(artifacts.header.contains("void logo_blit_bgr888("));
//! # Ok::<(), pixelbake::PixelbakeError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`pixel`] | Normalized images, channel order, decoding |
//! | [`encode`] | Pixel tables and parsing them back from C |
//! | [`blit`] | Reference blit operations and clipping |
//! | [`emit`] | C header and source generation |
//! | [`config`] | Per-image configuration and batch manifests |
//! | [`pipeline`] | File-level conversion, single and batch |
//! | [`preview`] | Render a blit to an RGB image |
//! | [`error`] | Error types |

pub mod blit;
pub mod config;
pub mod emit;
pub mod encode;
pub mod error;
pub mod pipeline;
pub mod pixel;
pub mod preview;

/// Generator version stamped into every artifact banner.
pub const BUILD_VERSION: &str = env!("PIXELBAKE_BUILD_VERSION");

// Re-exports for convenience
pub use config::{GeneratorConfig, Manifest, Scale};
pub use encode::PixelTable;
pub use error::PixelbakeError;
pub use pixel::{ChannelOrder, Image};
