//! Declarations artifact (`<name>.h`).

use super::writer::CodeWriter;
use super::{Operations, Symbols, banner};
use crate::encode::PixelTable;

pub(crate) fn render(sym: &Symbols, table: &PixelTable, ops: &Operations) -> String {
    let mut w = CodeWriter::new();
    let guard = sym.guard();

    w.line(banner(table))
        .line(format!("#ifndef {}", guard))
        .line(format!("#define {}", guard))
        .blank()
        .line("#include <stdint.h>")
        .blank();

    if let Some(scale) = ops.scaled {
        w.line(format!("#define {} {}", sym.scale_macro(), scale.get()))
            .blank();
    }

    w.line(format!("extern const int {};", sym.width_const()))
        .line(format!("extern const int {};", sym.height_const()));
    if ops.scaled.is_some() {
        w.line(format!("extern const int {};", sym.scaled_width_const()))
            .line(format!("extern const int {};", sym.scaled_height_const()));
    }
    w.blank();

    let format = sym.format_label();

    if ops.copy {
        w.line("/**")
            .line(format!(
                " * Blit the {} image to a destination {} buffer.",
                sym.name, format
            ))
            .line(" *")
            .line(" * Row-by-row memcpy; no scaling, no blending.")
            .line(" *");
        geometry_docs(&mut w, &format);
        w.line(" */");
        prototype(&mut w, &sym.copy_fn(), &[]);
        w.blank();
    }

    if let Some(scale) = ops.scaled {
        w.line("/**")
            .line(format!(
                " * Blit the {} image scaled {}x to a destination {} buffer.",
                sym.name,
                scale.get(),
                format
            ))
            .line(" *")
            .line(" * Nearest neighbor: every source pixel becomes a square block.")
            .line(" *");
        geometry_docs(&mut w, &format);
        w.line(" */");
        prototype(&mut w, &sym.scaled_fn(scale), &[]);
        w.blank();
    }

    if ops.blend {
        let [bg0, bg1, bg2] = sym.bg_params();
        w.line("/**")
            .line(format!(
                " * Blit the {} image with alpha blending to a destination {} buffer.",
                sym.name, format
            ))
            .line(" *")
            .line(" * Composites the image over a solid background color. The destination")
            .line(" * is not read; every written pixel is fully opaque.")
            .line(" * - alpha = 255: direct pixel copy")
            .line(" * - alpha = 0: background color only")
            .line(" * - otherwise: (src * alpha + bg * (255 - alpha) + 127) / 255")
            .line(" *");
        geometry_docs(&mut w, &format);
        w.line(" * @param alpha            Alpha value (0=background only, 255=fully opaque)");
        for (param, channel) in [&bg0, &bg1, &bg2].into_iter().zip(channel_words(sym)) {
            w.line(format!(
                " * @param {:<16} Background {} component (0-255)",
                param, channel
            ));
        }
        w.line(" * @param scale            Scale factor (0 or 1 = no scaling, 2-16 = scale up)")
            .line(" */");
        let extra = [
            "uint8_t alpha".to_string(),
            format!("uint8_t {}", bg0),
            format!("uint8_t {}", bg1),
            format!("uint8_t {}", bg2),
            "int scale".to_string(),
        ];
        prototype(&mut w, &sym.blend_fn(), &extra);
        w.blank();
    }

    w.line(format!("#endif /* {} */", guard));
    w.finish()
}

/// The six destination parameters every operation shares.
pub(crate) const GEOMETRY_PARAMS: [&str; 6] = [
    "uint8_t *dst",
    "int dst_w",
    "int dst_h",
    "int dst_stride_bytes",
    "int x",
    "int y",
];

/// `void name(\n    a,\n    b\n)` with no terminator; callers add `;` or a body.
pub(crate) fn signature(w: &mut CodeWriter, name: &str, extra: &[String]) {
    let params: Vec<String> = GEOMETRY_PARAMS
        .iter()
        .map(|p| p.to_string())
        .chain(extra.iter().cloned())
        .collect();

    w.line(format!("void {}(", name));
    let last = params.len() - 1;
    for (i, p) in params.iter().enumerate() {
        let sep = if i == last { "" } else { "," };
        w.line(format!("    {}{}", p, sep));
    }
}

fn prototype(w: &mut CodeWriter, name: &str, extra: &[String]) {
    signature(w, name, extra);
    w.line(");");
}

fn geometry_docs(w: &mut CodeWriter, format: &str) {
    w.lines([
        format!(" * @param dst              Pointer to destination buffer ({} format)", format),
        " * @param dst_w            Width of destination buffer in pixels".to_string(),
        " * @param dst_h            Height of destination buffer in pixels".to_string(),
        " * @param dst_stride_bytes Stride of destination buffer in bytes (usually dst_w * 3)"
            .to_string(),
        " * @param x                X position to blit to (can be negative for clipping)"
            .to_string(),
        " * @param y                Y position to blit to (can be negative for clipping)"
            .to_string(),
    ]);
}

fn channel_words(sym: &Symbols) -> [&'static str; 3] {
    sym.order.channel_names().map(|c| match c {
        'r' => "red",
        'g' => "green",
        _ => "blue",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Scale;
    use crate::encode;
    use crate::pixel::{ChannelOrder, Image};

    fn render_with(order: ChannelOrder, ops: Operations) -> String {
        let img = Image::from_raw(3, 2, order, vec![0; 18]).unwrap();
        render(&Symbols::new("logo", order), &encode::encode(&img), &ops)
    }

    #[test]
    fn test_guard_and_dimensions() {
        let h = render_with(ChannelOrder::Bgr, Operations::default());
        assert!(h.contains("#ifndef LOGO_H\n#define LOGO_H\n"));
        assert!(h.trim_end().ends_with("#endif /* LOGO_H */"));
        assert!(h.contains("extern const int logo_w;"));
        assert!(h.contains("extern const int logo_h;"));
        assert!(!h.contains("logo_scaled_w"));
        assert!(!h.contains("LOGO_SCALE"));
    }

    #[test]
    fn test_copy_prototype() {
        let h = render_with(ChannelOrder::Bgr, Operations::default());
        assert!(h.contains(
            "void logo_blit_bgr888(\n    uint8_t *dst,\n    int dst_w,\n    int dst_h,\n    int dst_stride_bytes,\n    int x,\n    int y\n);"
        ));
        assert!(!h.contains("_alpha("));
    }

    #[test]
    fn test_scaled_constants_only_when_scaling() {
        let ops = Operations {
            copy: true,
            scaled: Some(Scale::new(4).unwrap()),
            blend: false,
        };
        let h = render_with(ChannelOrder::Rgb, ops);
        assert!(h.contains("#define LOGO_SCALE 4"));
        assert!(h.contains("extern const int logo_scaled_w;"));
        assert!(h.contains("extern const int logo_scaled_h;"));
        assert!(h.contains("void logo_blit_rgb888_4x("));
    }

    #[test]
    fn test_blend_prototype_uses_channel_order() {
        let ops = Operations {
            copy: false,
            scaled: None,
            blend: true,
        };
        let h = render_with(ChannelOrder::Bgr, ops);
        assert!(h.contains("    uint8_t alpha,\n    uint8_t bg_b,\n    uint8_t bg_g,\n    uint8_t bg_r,\n    int scale\n);"));
        assert!(h.contains("@param bg_b             Background blue component"));
        assert!(!h.contains("void logo_blit_bgr888("));

        let h = render_with(ChannelOrder::Rgb, ops);
        assert!(h.contains("    uint8_t bg_r,\n    uint8_t bg_g,\n    uint8_t bg_b,\n"));
    }
}
