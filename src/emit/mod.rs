//! # Emission Layer
//!
//! Renders a [`PixelTable`] and the enabled blit operations as two C
//! artifacts:
//!
//! | Artifact | Contents |
//! |----------|----------|
//! | `<name>.h` | dimension constants, scale constants (if scaling), prototypes |
//! | `<name>.c` | the pixel table and the bodies of the enabled operations |
//!
//! The generated code is freestanding: it needs `<stdint.h>` and `<stddef.h>`, plus
//! `<string.h>` for `memcpy` when the direct copy is enabled.
//!
//! ## Naming
//!
//! With base name `logo` and BGR tables:
//!
//! | Operation | Function |
//! |-----------|----------|
//! | direct copy | `logo_blit_bgr888` |
//! | scaled copy (n) | `logo_blit_bgr888_<n>x` |
//! | alpha blend | `logo_blit_bgr888_alpha` |
//!
//! ## Example
//!
//! ```
//! use pixelbake::emit::{self, Operations};
//! use pixelbake::encode;
//! use pixelbake::pixel::{ChannelOrder, Image};
//!
//! let img = Image::from_raw(1, 1, ChannelOrder::Rgb, vec![1, 2, 3])?;
//! let artifacts = emit::emit("Boot Logo", &encode::encode(&img), &Operations::default(), 16);
//!
//! assert_eq!(artifacts.name, "boot_logo");
//! assert!(artifacts.header.contains("void boot_logo_blit_rgb888("));
//! assert!(artifacts.source.contains("0x01, 0x02, 0x03,"));
//! # Ok::<(), pixelbake::PixelbakeError>(())
//! ```

mod header;
mod identifier;
mod source;
mod writer;

pub use identifier::{DEFAULT_IDENTIFIER, sanitize_identifier};

use crate::BUILD_VERSION;
use crate::config::Scale;
use crate::encode::PixelTable;
use crate::pixel::ChannelOrder;

/// Which blit routines to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operations {
    /// Row-copy blit, no scaling or blending
    pub copy: bool,
    /// Nearest-neighbor blit at a fixed, baked-in scale
    pub scaled: Option<Scale>,
    /// Alpha blend over a background color with a runtime scale
    pub blend: bool,
}

impl Default for Operations {
    fn default() -> Self {
        Self {
            copy: true,
            scaled: None,
            blend: false,
        }
    }
}

impl Operations {
    pub fn is_empty(&self) -> bool {
        !self.copy && self.scaled.is_none() && !self.blend
    }
}

/// The two rendered artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    /// Sanitized base name shared by files and identifiers
    pub name: String,
    pub header: String,
    pub source: String,
    /// Names of the generated C functions, in emission order
    pub functions: Vec<String>,
}

impl Artifacts {
    pub fn header_file_name(&self) -> String {
        format!("{}.h", self.name)
    }

    pub fn source_file_name(&self) -> String {
        format!("{}.c", self.name)
    }
}

/// Render both artifacts for `table` under `base_name`.
///
/// `base_name` is sanitized first; see [`sanitize_identifier`].
pub fn emit(base_name: &str, table: &PixelTable, ops: &Operations, bytes_per_line: usize) -> Artifacts {
    let name = sanitize_identifier(base_name);
    if name != base_name {
        log::info!("Name sanitized from '{}' to '{}'", base_name, name);
    }

    let symbols = Symbols::new(&name, table.channel_order());
    let header = header::render(&symbols, table, ops);
    let source = source::render(&symbols, table, ops, bytes_per_line);
    let functions = symbols.functions(ops);

    log::debug!("Emitted {} for {}x{} table", functions.join(", "), table.width(), table.height());

    Artifacts {
        name,
        header,
        source,
        functions,
    }
}

/// Every generated identifier, derived from one sanitized base name.
#[derive(Debug, Clone)]
pub(crate) struct Symbols {
    pub name: String,
    pub order: ChannelOrder,
}

impl Symbols {
    pub fn new(name: &str, order: ChannelOrder) -> Self {
        Self {
            name: name.to_string(),
            order,
        }
    }

    /// Upper-case stem for macros. C reserves macro names with a leading
    /// underscore, so those get a `PIXELBAKE` prefix.
    fn macro_stem(&self) -> String {
        let upper = self.name.to_uppercase();
        if upper.starts_with('_') {
            format!("PIXELBAKE{}", upper)
        } else {
            upper
        }
    }

    pub fn guard(&self) -> String {
        format!("{}_H", self.macro_stem())
    }

    pub fn width_const(&self) -> String {
        format!("{}_w", self.name)
    }

    pub fn height_const(&self) -> String {
        format!("{}_h", self.name)
    }

    pub fn scaled_width_const(&self) -> String {
        format!("{}_scaled_w", self.name)
    }

    pub fn scaled_height_const(&self) -> String {
        format!("{}_scaled_h", self.name)
    }

    pub fn scale_macro(&self) -> String {
        format!("{}_SCALE", self.macro_stem())
    }

    pub fn pixels(&self) -> String {
        format!("{}_pixels", self.name)
    }

    /// Upper-case pixel format for comments (`RGB888`).
    pub fn format_label(&self) -> String {
        self.order.format_tag().to_uppercase()
    }

    pub fn copy_fn(&self) -> String {
        format!("{}_blit_{}", self.name, self.order.format_tag())
    }

    pub fn scaled_fn(&self, scale: Scale) -> String {
        format!("{}_blit_{}_{}x", self.name, self.order.format_tag(), scale.get())
    }

    pub fn blend_fn(&self) -> String {
        format!("{}_blit_{}_alpha", self.name, self.order.format_tag())
    }

    /// Background parameter names in storage order (`bg_b, bg_g, bg_r` for BGR).
    pub fn bg_params(&self) -> [String; 3] {
        self.order.channel_names().map(|c| format!("bg_{}", c))
    }

    pub fn functions(&self, ops: &Operations) -> Vec<String> {
        let mut out = Vec::new();
        if ops.copy {
            out.push(self.copy_fn());
        }
        if let Some(scale) = ops.scaled {
            out.push(self.scaled_fn(scale));
        }
        if ops.blend {
            out.push(self.blend_fn());
        }
        out
    }
}

/// One-line banner placed at the top of both artifacts.
pub(crate) fn banner(table: &PixelTable) -> String {
    format!(
        "/* Generated by pixelbake {} from a {}x{} {} image. Do not edit. */",
        BUILD_VERSION,
        table.width(),
        table.height(),
        table.channel_order().format_tag().to_uppercase()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode;
    use crate::pixel::Image;

    fn table(order: ChannelOrder) -> PixelTable {
        encode::encode(&Image::from_raw(2, 1, order, vec![1, 2, 3, 4, 5, 6]).unwrap())
    }

    #[test]
    fn test_symbol_names() {
        let s = Symbols::new("logo", ChannelOrder::Bgr);
        assert_eq!(s.guard(), "LOGO_H");
        assert_eq!(s.copy_fn(), "logo_blit_bgr888");
        assert_eq!(s.scaled_fn(Scale::new(3).unwrap()), "logo_blit_bgr888_3x");
        assert_eq!(s.blend_fn(), "logo_blit_bgr888_alpha");
        assert_eq!(s.bg_params(), ["bg_b", "bg_g", "bg_r"]);
        assert_eq!(Symbols::new("x", ChannelOrder::Rgb).bg_params(), ["bg_r", "bg_g", "bg_b"]);
    }

    #[test]
    fn test_functions_follow_operations() {
        let s = Symbols::new("logo", ChannelOrder::Rgb);
        let ops = Operations {
            copy: false,
            scaled: Some(Scale::new(2).unwrap()),
            blend: true,
        };
        assert_eq!(s.functions(&ops), vec!["logo_blit_rgb888_2x", "logo_blit_rgb888_alpha"]);
        assert!(Operations { copy: false, scaled: None, blend: false }.is_empty());
    }

    #[test]
    fn test_emit_sanitizes_name() {
        let a = emit("123 Splash", &table(ChannelOrder::Bgr), &Operations::default(), 16);
        assert_eq!(a.name, "_123_splash");
        assert_eq!(a.header_file_name(), "_123_splash.h");
        assert_eq!(a.source_file_name(), "_123_splash.c");
        assert!(a.source.contains("#include \"_123_splash.h\""));
    }

    #[test]
    fn test_macros_never_start_with_underscore() {
        let s = Symbols::new("_123abc", ChannelOrder::Bgr);
        assert_eq!(s.guard(), "PIXELBAKE_123ABC_H");
        assert_eq!(s.scale_macro(), "PIXELBAKE_123ABC_SCALE");
        assert_eq!(Symbols::new("logo_2", ChannelOrder::Bgr).scale_macro(), "LOGO_2_SCALE");

        let ops = Operations {
            scaled: Some(Scale::new(2).unwrap()),
            ..Operations::default()
        };
        let a = emit("123 Splash", &table(ChannelOrder::Bgr), &ops, 16);
        assert!(a.header.contains("#ifndef PIXELBAKE_123_SPLASH_H\n#define PIXELBAKE_123_SPLASH_H\n"));
        assert!(a.header.contains("#define PIXELBAKE_123_SPLASH_SCALE 2"));
        assert!(a.header.contains("#endif /* PIXELBAKE_123_SPLASH_H */"));
        assert!(a.source.contains("PIXELBAKE_123_SPLASH_SCALE;"));
        assert!(!a.header.contains("#define _"));
    }

    #[test]
    fn test_banner_carries_build_version() {
        let b = banner(&table(ChannelOrder::Rgb));
        assert!(b.contains(BUILD_VERSION));
        assert!(b.contains("2x1 RGB888"));
    }
}
