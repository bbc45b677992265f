//! # Generator Configuration
//!
//! Everything that decides what gets generated for one image, plus the JSON
//! manifest used to convert many images in one run.
//!
//! ## Manifest Format
//!
//! ```json
//! {
//!   "outdir": "gen",
//!   "channel_order": "bgr",
//!   "images": [
//!     { "input": "assets/logo.png", "scale": 3, "alpha": true },
//!     { "input": "assets/wifi.png", "name": "wifi_icon", "channel_order": "rgb" }
//!   ]
//! }
//! ```
//!
//! Manifest-level `outdir` and `channel_order` apply to entries that do not
//! set their own. Relative paths are resolved against the manifest's
//! directory.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::emit::Operations;
use crate::encode::DEFAULT_BYTES_PER_LINE;
use crate::error::{PixelbakeError, Result};
use crate::pixel::ChannelOrder;

/// Smallest generation-time scale factor.
pub const MIN_SCALE: u32 = 2;
/// Largest generation-time scale factor.
pub const MAX_SCALE: u32 = 16;

/// A validated integer upscale factor in `2..=16`.
///
/// ```
/// use pixelbake::config::Scale;
///
/// assert_eq!(Scale::new(3)?.get(), 3);
/// assert!(Scale::new(1).is_err());
/// assert!("17".parse::<Scale>().is_err());
/// # Ok::<(), pixelbake::PixelbakeError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Scale(u32);

impl Scale {
    pub fn new(value: u32) -> Result<Self> {
        if (MIN_SCALE..=MAX_SCALE).contains(&value) {
            Ok(Self(value))
        } else {
            Err(PixelbakeError::InvalidScale(value))
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for Scale {
    type Error = PixelbakeError;

    fn try_from(value: u32) -> Result<Self> {
        Scale::new(value)
    }
}

impl From<Scale> for u32 {
    fn from(scale: Scale) -> u32 {
        scale.0
    }
}

impl FromStr for Scale {
    type Err = PixelbakeError;

    fn from_str(s: &str) -> Result<Self> {
        let value = s
            .trim()
            .parse::<u32>()
            .map_err(|_| PixelbakeError::InvalidScale(0))?;
        Scale::new(value)
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Configuration for converting one image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Source image path
    pub input: PathBuf,

    /// Base name for files and identifiers (defaults to the input file stem)
    #[serde(default)]
    pub name: Option<String>,

    /// Directory both artifacts are written to
    #[serde(default)]
    pub outdir: Option<PathBuf>,

    /// Also generate a fixed-scale nearest-neighbor blit
    #[serde(default)]
    pub scale: Option<Scale>,

    /// Also generate the alpha-blending blit
    #[serde(default)]
    pub alpha: bool,

    /// Generate the direct row-copy blit
    #[serde(default = "default_true")]
    pub copy: bool,

    /// Channel order of the table and of the destination buffers
    #[serde(default)]
    pub channel_order: Option<ChannelOrder>,

    /// Bytes per line in the emitted table
    #[serde(default = "default_bytes_per_line")]
    pub bytes_per_line: usize,
}

fn default_true() -> bool {
    true
}

fn default_bytes_per_line() -> usize {
    DEFAULT_BYTES_PER_LINE
}

impl GeneratorConfig {
    /// Defaults for `input`: direct copy only, BGR, current directory.
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            name: None,
            outdir: None,
            scale: None,
            alpha: false,
            copy: true,
            channel_order: None,
            bytes_per_line: DEFAULT_BYTES_PER_LINE,
        }
    }

    /// The requested base name, before sanitization.
    pub fn base_name(&self) -> String {
        if let Some(name) = &self.name {
            return name.clone();
        }
        self.input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn outdir(&self) -> &Path {
        self.outdir.as_deref().unwrap_or(Path::new("."))
    }

    pub fn channel_order(&self) -> ChannelOrder {
        self.channel_order.unwrap_or_default()
    }

    pub fn operations(&self) -> Operations {
        Operations {
            copy: self.copy,
            scaled: self.scale,
            blend: self.alpha,
        }
    }
}

/// A batch of conversions loaded from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Default output directory for entries without one
    #[serde(default)]
    pub outdir: Option<PathBuf>,

    /// Default channel order for entries without one
    #[serde(default)]
    pub channel_order: Option<ChannelOrder>,

    pub images: Vec<GeneratorConfig>,
}

/// One manifest entry as written, before validation. `scale` stays a raw
/// number so an out-of-range value is reported as
/// [`PixelbakeError::InvalidScale`] rather than a JSON error.
#[derive(Debug, Deserialize)]
struct RawEntry {
    input: PathBuf,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    outdir: Option<PathBuf>,
    #[serde(default)]
    scale: Option<u32>,
    #[serde(default)]
    alpha: bool,
    #[serde(default = "default_true")]
    copy: bool,
    #[serde(default)]
    channel_order: Option<ChannelOrder>,
    #[serde(default = "default_bytes_per_line")]
    bytes_per_line: usize,
}

#[derive(Debug, Deserialize)]
struct RawManifest {
    #[serde(default)]
    outdir: Option<PathBuf>,
    #[serde(default)]
    channel_order: Option<ChannelOrder>,
    images: Vec<RawEntry>,
}

impl Manifest {
    /// Parse a manifest and resolve it against `base_dir`.
    pub fn from_json(text: &str, base_dir: &Path) -> Result<Self> {
        let raw: RawManifest =
            serde_json::from_str(text).map_err(|e| PixelbakeError::Manifest(e.to_string()))?;
        Self::resolve(raw, base_dir)
    }

    /// Read and parse a manifest file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            PixelbakeError::Manifest(format!("could not read '{}': {}", path.display(), e))
        })?;
        let base_dir = path.parent().unwrap_or(Path::new("."));
        Self::from_json(&text, base_dir)
    }

    /// Validate scales, apply manifest defaults and join relative paths
    /// onto `base_dir`.
    fn resolve(raw: RawManifest, base_dir: &Path) -> Result<Self> {
        let default_outdir = raw.outdir.as_ref().map(|d| base_dir.join(d));

        let images = raw
            .images
            .into_iter()
            .map(|entry| -> Result<GeneratorConfig> {
                let outdir = match entry.outdir {
                    Some(dir) => base_dir.join(dir),
                    None => default_outdir.clone().unwrap_or_else(|| base_dir.to_path_buf()),
                };
                Ok(GeneratorConfig {
                    input: base_dir.join(entry.input),
                    name: entry.name,
                    outdir: Some(outdir),
                    scale: entry.scale.map(Scale::new).transpose()?,
                    alpha: entry.alpha,
                    copy: entry.copy,
                    channel_order: entry.channel_order.or(raw.channel_order),
                    bytes_per_line: entry.bytes_per_line,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Manifest {
            outdir: raw.outdir,
            channel_order: raw.channel_order,
            images,
        })
    }
}
