//! Definitions artifact (`<name>.c`).
//!
//! The bodies below are the C rendition of [`crate::blit`]. Clip bounds are
//! computed in `int64_t` so extreme origins cannot overflow `int`, exactly as
//! the Rust engine does them in `i64`.

use super::header::signature;
use super::writer::CodeWriter;
use super::{Operations, Symbols, banner};
use crate::config::Scale;
use crate::encode::{self, PixelTable};

pub(crate) fn render(sym: &Symbols, table: &PixelTable, ops: &Operations, bytes_per_line: usize) -> String {
    let mut w = CodeWriter::new();

    w.line(banner(table))
        .line(format!("#include \"{}.h\"", sym.name))
        .line("#include <stddef.h>");
    if ops.copy {
        w.line("#include <string.h>");
    }
    w.blank();

    w.line(format!("const int {} = {};", sym.width_const(), table.width()))
        .line(format!("const int {} = {};", sym.height_const(), table.height()));
    if ops.scaled.is_some() {
        w.line(format!(
            "const int {} = {} * {};",
            sym.scaled_width_const(),
            table.width(),
            sym.scale_macro()
        ))
        .line(format!(
            "const int {} = {} * {};",
            sym.scaled_height_const(),
            table.height(),
            sym.scale_macro()
        ));
    }
    w.blank();

    w.line(format!("static const uint8_t {}[] = {{", sym.pixels()));
    let rows = encode::format_rows(table.as_bytes(), bytes_per_line);
    if !rows.is_empty() {
        w.line(rows);
    }
    w.line("};").blank();

    if ops.copy {
        copy_body(&mut w, sym);
    }
    if let Some(scale) = ops.scaled {
        scaled_body(&mut w, sym, scale);
    }
    if ops.blend {
        blend_body(&mut w, sym);
    }

    w.finish()
}

fn copy_body(w: &mut CodeWriter, sym: &Symbols) {
    signature(w, &sym.copy_fn(), &[]);
    w.line(")").line("{");
    w.lines([
        format!("    const int src_w = {};", sym.width_const()),
        format!("    const int src_h = {};", sym.height_const()),
        String::new(),
        "    /* Clip the placed rectangle against the destination */".into(),
        "    const int64_t src_x = x < 0 ? -(int64_t)x : 0;".into(),
        "    const int64_t src_y = y < 0 ? -(int64_t)y : 0;".into(),
        "    const int64_t dst_x = x > 0 ? x : 0;".into(),
        "    const int64_t dst_y = y > 0 ? y : 0;".into(),
        "    int64_t copy_w = src_w - src_x;".into(),
        "    int64_t copy_h = src_h - src_y;".into(),
        "    if (copy_w > dst_w - dst_x) copy_w = dst_w - dst_x;".into(),
        "    if (copy_h > dst_h - dst_y) copy_h = dst_h - dst_y;".into(),
        String::new(),
        "    /* Fully clipped */".into(),
        "    if (copy_w <= 0 || copy_h <= 0) {".into(),
        "        return;".into(),
        "    }".into(),
        String::new(),
        "    const size_t src_stride = (size_t)src_w * 3;".into(),
        "    const size_t copy_bytes = (size_t)copy_w * 3;".into(),
        String::new(),
        "    for (int64_t j = 0; j < copy_h; j++) {".into(),
        format!(
            "        const uint8_t *src_row = {} + (size_t)(src_y + j) * src_stride + (size_t)src_x * 3;",
            sym.pixels()
        ),
        "        uint8_t *dst_row = dst + (size_t)(dst_y + j) * (size_t)dst_stride_bytes + (size_t)dst_x * 3;".into(),
        "        memcpy(dst_row, src_row, copy_bytes);".into(),
        "    }".into(),
        "}".into(),
        String::new(),
    ]);
}

/// Clip `[dst_x0, dst_x1) × [dst_y0, dst_y1)` for a rectangle scaled by `scale`.
fn scaled_window(w: &mut CodeWriter, sym: &Symbols) {
    w.lines([
        format!("    const int64_t scaled_w = (int64_t){} * scale;", sym.width_const()),
        format!("    const int64_t scaled_h = (int64_t){} * scale;", sym.height_const()),
        String::new(),
        "    /* Clip in scaled coordinates */".into(),
        "    int64_t dst_x0 = x > 0 ? x : 0;".into(),
        "    int64_t dst_y0 = y > 0 ? y : 0;".into(),
        "    int64_t dst_x1 = (int64_t)x + scaled_w;".into(),
        "    int64_t dst_y1 = (int64_t)y + scaled_h;".into(),
        "    if (dst_x1 > dst_w) dst_x1 = dst_w;".into(),
        "    if (dst_y1 > dst_h) dst_y1 = dst_h;".into(),
        String::new(),
        "    /* Fully clipped */".into(),
        "    if (dst_x0 >= dst_x1 || dst_y0 >= dst_y1) {".into(),
        "        return;".into(),
        "    }".into(),
        String::new(),
    ]);
}

/// Nested destination loops; `inner` is the per-pixel statement block.
fn mapped_loop(w: &mut CodeWriter, sym: &Symbols, indent: &str, inner: &[String]) {
    w.lines([
        format!("{indent}for (int64_t dy = dst_y0; dy < dst_y1; dy++) {{"),
        format!("{indent}    const int64_t src_y_idx = (dy - y) / scale;"),
        format!(
            "{indent}    const uint8_t *src_row = {} + (size_t)src_y_idx * (size_t){} * 3;",
            sym.pixels(),
            sym.width_const()
        ),
        format!("{indent}    uint8_t *dst_row = dst + (size_t)dy * (size_t)dst_stride_bytes;"),
        String::new(),
        format!("{indent}    for (int64_t dx = dst_x0; dx < dst_x1; dx++) {{"),
        format!("{indent}        const int64_t src_x_idx = (dx - x) / scale;"),
        format!("{indent}        const uint8_t *src_px = src_row + (size_t)src_x_idx * 3;"),
        format!("{indent}        uint8_t *dst_px = dst_row + (size_t)dx * 3;"),
    ]);
    for line in inner {
        w.line(format!("{indent}        {line}"));
    }
    w.line(format!("{indent}    }}")).line(format!("{indent}}}"));
}

fn verbatim_copy() -> Vec<String> {
    vec![
        "dst_px[0] = src_px[0];".into(),
        "dst_px[1] = src_px[1];".into(),
        "dst_px[2] = src_px[2];".into(),
    ]
}

fn scaled_body(w: &mut CodeWriter, sym: &Symbols, scale: Scale) {
    signature(w, &sym.scaled_fn(scale), &[]);
    w.line(")").line("{");
    w.line(format!("    const int scale = {};", sym.scale_macro()));
    scaled_window(w, sym);
    mapped_loop(w, sym, "    ", &verbatim_copy());
    w.line("}").blank();
}

fn blend_body(w: &mut CodeWriter, sym: &Symbols) {
    let bg = sym.bg_params();
    let extra = [
        "uint8_t alpha".to_string(),
        format!("uint8_t {}", bg[0]),
        format!("uint8_t {}", bg[1]),
        format!("uint8_t {}", bg[2]),
        "int scale".to_string(),
    ];
    signature(w, &sym.blend_fn(), &extra);
    w.line(")").line("{");
    w.line("    /* 0 and 1 both mean unscaled */")
        .line("    if (scale <= 1) scale = 1;")
        .blank();
    scaled_window(w, sym);

    // alpha == 0: background only, the table is never read
    w.line("    if (alpha == 0) {")
        .line("        for (int64_t dy = dst_y0; dy < dst_y1; dy++) {")
        .line("            uint8_t *dst_row = dst + (size_t)dy * (size_t)dst_stride_bytes;")
        .line("            for (int64_t dx = dst_x0; dx < dst_x1; dx++) {")
        .line("                uint8_t *dst_px = dst_row + (size_t)dx * 3;");
    for (i, name) in bg.iter().enumerate() {
        w.line(format!("                dst_px[{}] = {};", i, name));
    }
    w.line("            }").line("        }");

    w.line("    } else if (alpha == 255) {");
    mapped_loop(w, sym, "        ", &verbatim_copy());

    w.line("    } else {")
        .line("        const int inv_alpha = 255 - alpha;")
        .blank();
    let blended: Vec<String> = bg
        .iter()
        .enumerate()
        .map(|(i, name)| {
            format!(
                "dst_px[{i}] = (uint8_t)((src_px[{i}] * alpha + {name} * inv_alpha + 127) / 255);"
            )
        })
        .collect();
    mapped_loop(w, sym, "        ", &blended);
    w.line("    }").line("}").blank();
}
